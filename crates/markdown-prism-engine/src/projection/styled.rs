use crate::{
    mapping::OBJECT_REPLACEMENT,
    parsing::inline::{Family, Side, TagShape, TokenKind, tokenize},
};

/// Formatting in effect for a run of rendered text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub strike: bool,
    pub code: bool,
    pub subscript: bool,
    pub superscript: bool,
    pub link: bool,
    pub image: bool,
}

/// A run of rendered text with uniform formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Active {
    Marker(Family),
    Tag(String),
}

/// The rendered projection of `content` as styled runs.
///
/// Concatenating the runs' text gives exactly the rendered text the offset
/// mapper describes: matched markers and tags vanish, code fences vanish,
/// images become one replacement character.
pub fn styled_runs(content: &str) -> Vec<StyledRun> {
    let chars: Vec<char> = content.chars().collect();
    let mut active: Vec<Active> = Vec::new();
    let mut out = Vec::new();

    for token in tokenize(content) {
        let sp = token.span;
        let literal = || chars[sp.start..sp.end].iter().collect::<String>();
        let style = style_of(&active);
        match &token.kind {
            TokenKind::Text => out.push(StyledRun {
                text: literal(),
                style,
            }),
            TokenKind::CodeSpan { fence } => {
                let body: String = chars[sp.start + fence..sp.end - fence].iter().collect();
                if !body.is_empty() {
                    out.push(StyledRun {
                        text: body,
                        style: TextStyle {
                            code: true,
                            ..style
                        },
                    });
                }
            }
            TokenKind::Image => out.push(StyledRun {
                text: OBJECT_REPLACEMENT.to_string(),
                style: TextStyle {
                    image: true,
                    ..style
                },
            }),
            TokenKind::Delimiter { family, side } if token.matched => match side {
                Side::Open => active.push(Active::Marker(*family)),
                Side::Close => close(&mut active, &Active::Marker(*family)),
            },
            TokenKind::HtmlTag { name, shape } if token.matched => match shape {
                TagShape::Open => active.push(Active::Tag(name.clone())),
                _ => close(&mut active, &Active::Tag(name.clone())),
            },
            TokenKind::Delimiter { .. } | TokenKind::HtmlTag { .. } => out.push(StyledRun {
                text: literal(),
                style,
            }),
        }
    }
    out
}

fn close(active: &mut Vec<Active>, which: &Active) {
    if let Some(i) = active.iter().rposition(|a| a == which) {
        active.remove(i);
    }
}

fn style_of(active: &[Active]) -> TextStyle {
    let mut s = TextStyle::default();
    for a in active {
        match a {
            Active::Marker(Family::Strong(_)) => s.bold = true,
            Active::Marker(Family::Emphasis(_)) => s.italic = true,
            Active::Marker(Family::Strike) => s.strike = true,
            Active::Marker(Family::Subscript) => s.subscript = true,
            Active::Marker(Family::Superscript) => s.superscript = true,
            Active::Marker(Family::Link) => s.link = true,
            Active::Tag(name) => match name.as_str() {
                "b" | "strong" => s.bold = true,
                "i" | "em" => s.italic = true,
                "s" | "del" | "strike" => s.strike = true,
                "sub" => s.subscript = true,
                "sup" => s.superscript = true,
                "code" => s.code = true,
                "a" => s.link = true,
                _ => {}
            },
        }
    }
    s
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::mapping::rendered_text;

    #[test]
    fn bold_run_is_styled() {
        let runs = styled_runs("a **b** c");
        assert_eq!(runs.len(), 3);
        assert_eq!(runs[1].text, "b");
        assert!(runs[1].style.bold);
        assert!(!runs[2].style.bold);
    }

    #[test]
    fn html_sub_is_subscript() {
        let runs = styled_runs("H<sub>2</sub>O");
        assert_eq!(runs[1].text, "2");
        assert!(runs[1].style.subscript);
    }

    #[rstest]
    #[case("a **b** c")]
    #[case("x `co*de*` y ![i](u) [l](v)")]
    #[case("***both*** <br> ~~s~~ *open")]
    #[case("``")]
    fn runs_concatenate_to_rendered_text(#[case] content: &str) {
        let joined: String = styled_runs(content).into_iter().map(|r| r.text).collect();
        assert_eq!(joined, rendered_text(content));
    }
}
