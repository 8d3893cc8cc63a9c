use std::collections::HashMap;

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{
    model::{Alignment, ListMarker, Node, NodeKind, Tree},
    parsing::inline::{Family, Side, TagShape, Token, TokenKind, kinds::Link, tokenize},
    selection::ViewMode,
};

/// Renders the tree as HTML, one element per node carrying `data-node-id`.
///
/// In the rendered view inline markup becomes elements; in the source view
/// each node's content is shown escaped and verbatim.
pub fn to_html(tree: &Tree, view: ViewMode) -> String {
    let mut out = String::new();
    for node in tree.nodes() {
        block_html(&mut out, node, view);
        out.push('\n');
    }
    out
}

fn block_html(out: &mut String, node: &Node, view: ViewMode) {
    let id = node.id;
    let inline = |content: &str| match view {
        ViewMode::Rendered => inline_html(content),
        ViewMode::Source => encode_text(content).replace('\n', "<br>"),
    };
    match &node.kind {
        NodeKind::Paragraph => {
            out.push_str(&format!(r#"<p data-node-id="{id}">{}</p>"#, inline(&node.content)));
        }
        NodeKind::Heading { level } => {
            out.push_str(&format!(
                r#"<h{level} data-node-id="{id}">{}</h{level}>"#,
                inline(&node.content)
            ));
        }
        NodeKind::ListItem { marker, indent } => {
            let (class, extra) = match marker {
                ListMarker::Bullet(_) => ("bullet", String::new()),
                ListMarker::Ordered { number, .. } => ("ordered", format!(r#" value="{number}""#)),
                ListMarker::Checklist { .. } => ("checklist", String::new()),
            };
            let checkbox = match marker {
                ListMarker::Checklist { checked: true, .. } => {
                    r#"<input type="checkbox" disabled checked> "#
                }
                ListMarker::Checklist { checked: false, .. } => r#"<input type="checkbox" disabled> "#,
                _ => "",
            };
            out.push_str(&format!(
                r#"<li data-node-id="{id}" class="{class}" data-indent="{indent}"{extra}>{checkbox}{}</li>"#,
                inline(&node.content)
            ));
        }
        NodeKind::BlockQuote => {
            out.push_str(&format!(
                r#"<blockquote data-node-id="{id}">{}</blockquote>"#,
                inline(&node.content)
            ));
        }
        NodeKind::CodeBlock { language, .. } => {
            let class = if language.is_empty() {
                String::new()
            } else {
                format!(
                    r#" class="language-{}""#,
                    encode_double_quoted_attribute(language)
                )
            };
            out.push_str(&format!(
                r#"<pre data-node-id="{id}"><code{class}>{}</code></pre>"#,
                encode_text(&node.content)
            ));
        }
        NodeKind::Table(table) => {
            out.push_str(&format!(r#"<table data-node-id="{id}">"#));
            for (r, row) in table.rows.iter().enumerate() {
                let cell_tag = if r == 0 { "th" } else { "td" };
                out.push_str("<tr>");
                for (c, cell) in row.iter().enumerate() {
                    let align = match table.alignments.get(c).copied().unwrap_or_default() {
                        Alignment::None => "",
                        Alignment::Left => r#" style="text-align: left""#,
                        Alignment::Center => r#" style="text-align: center""#,
                        Alignment::Right => r#" style="text-align: right""#,
                    };
                    out.push_str(&format!(
                        r#"<{cell_tag}{align} data-row="{r}" data-col="{c}">{}</{cell_tag}>"#,
                        encode_text(cell)
                    ));
                }
                out.push_str("</tr>");
            }
            out.push_str("</table>");
        }
        NodeKind::Image { alt, url } => {
            out.push_str(&format!(
                r#"<img data-node-id="{id}" src="{}" alt="{}">"#,
                encode_double_quoted_attribute(url),
                encode_double_quoted_attribute(alt)
            ));
        }
        NodeKind::HorizontalRule { .. } => {
            out.push_str(&format!(r#"<hr data-node-id="{id}">"#));
        }
        NodeKind::HtmlBlock { opening, closing } => {
            out.push_str(&format!(
                r#"<div data-node-id="{id}" class="html-block"><div data-tag="opening">{}</div><div class="content">{}</div><div data-tag="closing">{}</div></div>"#,
                encode_text(opening),
                inline(&node.content),
                encode_text(closing)
            ));
        }
    }
}

/// Inline markup of one node's content as HTML.
///
/// Text is escaped; matched delimiters become elements; matched and void
/// tags are passed through; unmatched markers stay literal.
pub fn inline_html(content: &str) -> String {
    let chars: Vec<char> = content.chars().collect();
    let tokens = tokenize(content);
    let hrefs = link_targets(&chars, &tokens);
    let mut out = String::new();
    for (i, token) in tokens.iter().enumerate() {
        let sp = token.span;
        let raw: String = chars[sp.start..sp.end].iter().collect();
        match &token.kind {
            TokenKind::Text => out.push_str(&encode_text(&raw).replace('\n', "<br>")),
            TokenKind::CodeSpan { fence } => {
                let body: String = chars[sp.start + fence..sp.end - fence].iter().collect();
                out.push_str("<code>");
                out.push_str(&encode_text(&body));
                out.push_str("</code>");
            }
            TokenKind::Image => match Link::scan(&chars, sp.start + 1) {
                Some((text_end, tail_end)) => {
                    let alt: String = chars[sp.start + 2..text_end].iter().collect();
                    let url: String = chars[text_end + 2..tail_end - 1].iter().collect();
                    out.push_str(&format!(
                        r#"<img src="{}" alt="{}">"#,
                        encode_double_quoted_attribute(&url),
                        encode_double_quoted_attribute(&alt)
                    ));
                }
                None => out.push_str(&encode_text(&raw)),
            },
            TokenKind::Delimiter {
                family: Family::Link,
                side,
            } if token.matched => match side {
                Side::Open => {
                    let href = hrefs.get(&i).map_or("", String::as_str);
                    out.push_str(&format!(
                        r#"<a href="{}">"#,
                        encode_double_quoted_attribute(href)
                    ));
                }
                Side::Close => out.push_str("</a>"),
            },
            TokenKind::Delimiter { family, side } if token.matched => {
                out.push_str(&delimiter_html(*family, *side));
            }
            TokenKind::HtmlTag { shape, .. } if token.matched || *shape == TagShape::SelfClosing => {
                out.push_str(&raw);
            }
            TokenKind::Delimiter { .. } | TokenKind::HtmlTag { .. } => {
                out.push_str(&encode_text(&raw));
            }
        }
    }
    out
}

/// Url of each matched link opener, keyed by token index.
fn link_targets(chars: &[char], tokens: &[Token]) -> HashMap<usize, String> {
    let mut open = Vec::new();
    let mut out = HashMap::new();
    for (i, t) in tokens.iter().enumerate() {
        match t.kind {
            TokenKind::Delimiter {
                family: Family::Link,
                side: Side::Open,
            } => open.push(i),
            TokenKind::Delimiter {
                family: Family::Link,
                side: Side::Close,
            } => {
                if let Some(o) = open.pop() {
                    // The closer is `](url)`.
                    let url = chars[t.span.start + 2..t.span.end - 1].iter().collect();
                    out.insert(o, url);
                }
            }
            _ => {}
        }
    }
    out
}

fn delimiter_html(family: Family, side: Side) -> String {
    let tag = match family {
        Family::Emphasis(_) => "em",
        Family::Strong(_) => "strong",
        Family::Strike => "del",
        Family::Subscript => "sub",
        Family::Superscript => "sup",
        Family::Link => "a",
    };
    match side {
        Side::Open => format!("<{tag}>"),
        Side::Close => format!("</{tag}>"),
    }
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn inline_formatting() {
        assert_snapshot!(inline_html("a **b** _c_ `d<e>` H<sub>2</sub>O"), @"a <strong>b</strong> <em>c</em> <code>d&lt;e&gt;</code> H<sub>2</sub>O");
    }

    #[test]
    fn links_take_their_url_from_the_closer() {
        assert_snapshot!(inline_html("see [**here**](a.md)"), @r#"see <a href="a.md"><strong>here</strong></a>"#);
    }

    #[test]
    fn unmatched_markers_stay_literal() {
        assert_snapshot!(inline_html("this is a * and <b>"), @"this is a * and &lt;b&gt;");
    }

    #[test]
    fn blocks_carry_node_ids() {
        let tree = Tree::parse("# T\n\n- [x] done");
        let html = to_html(&tree, ViewMode::Rendered);
        for node in tree.nodes() {
            assert!(html.contains(&format!(r#"data-node-id="{}""#, node.id)));
        }
        assert!(html.contains("<input type=\"checkbox\" disabled checked>"));
    }

    #[test]
    fn source_view_escapes_markers() {
        let tree = Tree::parse("a **b**");
        let html = to_html(&tree, ViewMode::Source);
        assert!(html.contains(">a **b**</p>"));
    }
}
