use crate::parsing::span::Span;

use super::{
    cursor::Cursor,
    kinds::{CodeSpan, Flank, HtmlTag, Image, Link, MarkerRun},
    pairing::pair_delimiters,
    types::{Family, Side, TagShape, Token, TokenKind},
};

/// Tokenizes one node's inline content.
///
/// # Scan order
/// At each position the scanner tries, in priority order: a backslash escape,
/// a code span, an image, a link opener, an HTML tag, a marker run. Anything
/// else extends the current plain-text run.
///
/// # Returns
/// Tokens covering the entire input with spans in character offsets.
/// Delimiters and tags carry their matched flag from the pairing pass.
/// The result depends only on `content`.
pub fn tokenize(content: &str) -> Vec<Token> {
    let chars: Vec<char> = content.chars().collect();
    let (tokens, flanks) = scan(&chars);
    pair_delimiters(&chars, tokens, &flanks)
}

/// First pass: produce tokens plus the flank facts of every marker chunk.
///
/// `flanks[i]` is meaningful only for marker-run delimiter tokens; every other
/// entry is the default. Link delimiters leave this pass already paired.
fn scan(chars: &[char]) -> (Vec<Token>, Vec<Flank>) {
    let mut cur = Cursor::new(chars);
    let mut out = Scanned::default();
    let mut text_start = 0;
    // `](url)` tails of links opened earlier, innermost last: (start, end)
    let mut link_tails: Vec<(usize, usize)> = Vec::new();

    while !cur.eof() {
        let here = cur.pos();

        if let Some(&(tail_start, tail_end)) = link_tails.last()
            && tail_start == here
        {
            link_tails.pop();
            out.flush_text(text_start, here);
            let open_idx = out.open_link_indices.pop();
            out.push_link(Side::Close, Span::new(tail_start, tail_end), open_idx, chars);
            cur.bump_n(tail_end - tail_start);
            text_start = cur.pos();
            continue;
        }
        // Nothing may cross the tail of the innermost open link.
        let limit = link_tails.last().map_or(chars.len(), |&(start, _)| start);

        match cur.peek() {
            Some('\\') if cur.peek_at(1).is_some_and(|c| c.is_ascii_punctuation()) => {
                cur.bump_n(2);
            }
            Some(CodeSpan::TICK) => {
                let fence = cur.run_len(CodeSpan::TICK);
                match CodeSpan::find_close(chars, here + fence, fence) {
                    // A blank body pairs with nothing: both runs stay literal text.
                    Some(close)
                        if close + fence <= limit && CodeSpan::is_blank(&chars[here + fence..close]) =>
                    {
                        cur.bump_n(close + fence - here);
                    }
                    Some(close) if close + fence <= limit => {
                        out.flush_text(text_start, here);
                        out.push(Token {
                            kind: TokenKind::CodeSpan { fence },
                            span: Span::new(here, close + fence),
                            matched: false,
                        });
                        cur.bump_n(close + fence - here);
                        text_start = cur.pos();
                    }
                    // An unclosed run is literal text in full.
                    _ => cur.bump_n(fence),
                }
            }
            Some('!') if cur.starts_with(Image::OPEN) => {
                match Link::scan(chars, here + 1) {
                    Some((_, end)) if end <= limit => {
                        out.flush_text(text_start, here);
                        out.push(Token {
                            kind: TokenKind::Image,
                            span: Span::new(here, end),
                            matched: false,
                        });
                        cur.bump_n(end - here);
                        text_start = cur.pos();
                    }
                    _ => {
                        cur.bump();
                    }
                }
            }
            Some(Link::OPEN) => match Link::scan(chars, here) {
                Some((text_end, tail_end)) if tail_end <= limit => {
                    out.flush_text(text_start, here);
                    out.push_link(Side::Open, Span::new(here, here + 1), None, chars);
                    link_tails.push((text_end, tail_end));
                    cur.bump();
                    text_start = cur.pos();
                }
                _ => {
                    cur.bump();
                }
            },
            Some(HtmlTag::OPEN) => match HtmlTag::scan(chars, here) {
                Some(tag) if tag.end <= limit => {
                    out.flush_text(text_start, here);
                    let end = tag.end;
                    out.push(Token {
                        kind: TokenKind::HtmlTag {
                            name: tag.name,
                            shape: tag.shape,
                        },
                        span: Span::new(here, end),
                        matched: false,
                    });
                    cur.bump_n(end - here);
                    text_start = cur.pos();
                }
                _ => {
                    cur.bump();
                }
            },
            Some(c) if MarkerRun::is_marker(c) => {
                let len = cur.run_len(c).min(limit - here);
                let flank = MarkerRun::flank(chars, here, here + len);
                if flank.can_open || flank.can_close {
                    out.flush_text(text_start, here);
                    let closing_only = flank.can_close && !flank.can_open;
                    let mut at = here;
                    for chunk in MarkerRun::chunks(c, len, closing_only) {
                        out.push_marker(MarkerRun::family(c, chunk), Span::new(at, at + chunk), flank);
                        at += chunk;
                    }
                    text_start = here + len;
                }
                // A run that can neither open nor close stays inside the text run.
                cur.bump_n(len);
            }
            _ => {
                cur.bump();
            }
        }
    }

    out.flush_text(text_start, cur.pos());
    (out.tokens, out.flanks)
}

/// Accumulator for the scanning pass.
#[derive(Default)]
struct Scanned {
    tokens: Vec<Token>,
    flanks: Vec<Flank>,
    open_link_indices: Vec<usize>,
}

impl Scanned {
    fn push(&mut self, token: Token) {
        self.tokens.push(token);
        self.flanks.push(Flank::default());
    }

    fn flush_text(&mut self, start: usize, end: usize) {
        if end > start {
            self.push(Token::text(Span::new(start, end)));
        }
    }

    fn push_marker(&mut self, family: Family, span: Span, flank: Flank) {
        let side = if flank.can_close && !flank.can_open {
            Side::Close
        } else {
            Side::Open
        };
        self.tokens.push(Token {
            kind: TokenKind::Delimiter { family, side },
            span,
            matched: false,
        });
        self.flanks.push(flank);
    }

    /// Links are paired structurally by [`Link::scan`]; the pair is matched
    /// unless the link text is blank.
    fn push_link(&mut self, side: Side, span: Span, open_idx: Option<usize>, chars: &[char]) {
        let idx = self.tokens.len();
        let mut matched = false;
        if let Some(open_idx) = open_idx {
            let inner_start = self.tokens[open_idx].span.end;
            matched = chars[inner_start..span.start]
                .iter()
                .any(|c| !c.is_whitespace());
            self.tokens[open_idx].matched = matched;
        }
        self.push(Token {
            kind: TokenKind::Delimiter {
                family: Family::Link,
                side,
            },
            span,
            matched,
        });
        if side == Side::Open {
            self.open_link_indices.push(idx);
        }
    }
}

/// Rendered text for a token list, used by tests and debug output.
pub fn describe(content: &str, tokens: &[Token]) -> Vec<String> {
    let chars: Vec<char> = content.chars().collect();
    tokens
        .iter()
        .map(|t| {
            let text: String = chars[t.span.start..t.span.end].iter().collect();
            let tag = match &t.kind {
                TokenKind::Text => "text".to_string(),
                TokenKind::Delimiter { family, side } => format!("{family:?}/{side:?}"),
                TokenKind::CodeSpan { fence } => format!("code{fence}"),
                TokenKind::Image => "image".to_string(),
                TokenKind::HtmlTag { shape, .. } => match shape {
                    TagShape::Open => "tag/Open".to_string(),
                    TagShape::Close => "tag/Close".to_string(),
                    TagShape::SelfClosing => "tag/Void".to_string(),
                },
            };
            let mark = if t.matched { "+" } else { "" };
            format!("{tag}{mark}:{text}")
        })
        .collect()
}
