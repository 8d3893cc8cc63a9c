use super::{
    kinds::Flank,
    types::{Family, Side, TagShape, Token, TokenKind},
};

/// What an entry on the pairing stack is waiting for.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Opener {
    Marker(Family),
    Tag(String),
}

/// Second pass: pairs delimiters and HTML tags with stack discipline.
///
/// - An opener pushes.
/// - A closer searches the stack from the top for an opener of its family
///   (or tag name). When found, everything above it is discarded unmatched,
///   and the pair is matched unless it encloses only whitespace.
/// - Whatever is left on the stack at the end stays unmatched.
///
/// Runs that may both open and close try closing first. Link delimiters
/// arrive already paired and are left alone.
pub fn pair_delimiters(chars: &[char], mut tokens: Vec<Token>, flanks: &[Flank]) -> Vec<Token> {
    let mut stack: Vec<(usize, Opener)> = Vec::new();

    for i in 0..tokens.len() {
        let (want, can_open, can_close) = match &tokens[i].kind {
            TokenKind::Delimiter { family, .. } if *family != Family::Link => {
                let flank = flanks[i];
                (Opener::Marker(*family), flank.can_open, flank.can_close)
            }
            TokenKind::HtmlTag { name, shape } => match shape {
                TagShape::Open => (Opener::Tag(name.clone()), true, false),
                TagShape::Close => (Opener::Tag(name.clone()), false, true),
                TagShape::SelfClosing => continue,
            },
            _ => continue,
        };

        if can_close
            && let Some(depth) = stack.iter().rposition(|(_, o)| *o == want)
        {
            let open_idx = stack[depth].0;
            let inner_start = tokens[open_idx].span.end;
            let inner_end = tokens[i].span.start;
            let has_content = chars[inner_start..inner_end]
                .iter()
                .any(|c| !c.is_whitespace());
            if has_content {
                stack.truncate(depth);
                mark(&mut tokens[open_idx], Side::Open);
                mark(&mut tokens[i], Side::Close);
                continue;
            }
        }

        if can_open {
            stack.push((i, want));
        }
    }

    tokens
}

fn mark(token: &mut Token, side: Side) {
    token.matched = true;
    if let TokenKind::Delimiter { side: s, .. } = &mut token.kind {
        *s = side;
    }
}
