//! # Block Parsing
//!
//! Two-phase, line based block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a
//!    `LineClass` holding local facts (blank status, what it could open)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` walks the classified
//!    lines and emits one [`Node`] per block
//!
//! ## Modules
//!
//! - **`kinds`**: block-specific types owning their syntax (headings, list
//!   items, quotes, fences, tables, rules, images, HTML blocks)
//! - **`open`**: `try_open_leaf` dispatch for detecting block openers
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`builder`**: `BlockBuilder` assembling nodes
//!
//! ## Key Invariants
//!
//! - Fenced code blocks are raw zones: no block parsing inside
//! - Every node gets a fresh id

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod open;

pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};

use crate::model::{IndentStyle, Node};

pub fn parse_blocks(text: &str, style: IndentStyle) -> Vec<Node> {
    let classifier = MarkdownLineClassifier;
    let lines = text.lines().map(|l| classifier.classify(l)).collect();
    BlockBuilder::new(lines, style).finish()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::{Alignment, ListMarker, NodeKind};

    fn parse(text: &str) -> Vec<(NodeKind, String)> {
        parse_blocks(text, IndentStyle::detect(text))
            .into_iter()
            .map(|n| (n.kind, n.content))
            .collect()
    }

    #[test]
    fn paragraphs_split_on_blank_lines() {
        assert_eq!(
            parse("one\ntwo\n\nthree"),
            vec![
                (NodeKind::Paragraph, "one\ntwo".to_string()),
                (NodeKind::Paragraph, "three".to_string()),
            ]
        );
    }

    #[test]
    fn heading_interrupts_paragraph() {
        assert_eq!(
            parse("text\n## Sub"),
            vec![
                (NodeKind::Paragraph, "text".to_string()),
                (NodeKind::Heading { level: 2 }, "Sub".to_string()),
            ]
        );
    }

    #[test]
    fn list_items_with_indent_and_continuation() {
        assert_eq!(
            parse("- a\n  more\n  1. b"),
            vec![
                (
                    NodeKind::ListItem {
                        marker: ListMarker::Bullet('-'),
                        indent: 0
                    },
                    "a\nmore".to_string()
                ),
                (
                    NodeKind::ListItem {
                        marker: ListMarker::Ordered {
                            number: 1,
                            delimiter: '.'
                        },
                        indent: 1
                    },
                    "b".to_string()
                ),
            ]
        );
    }

    #[test]
    fn quote_lines_join() {
        assert_eq!(
            parse("> a\n>\n> b"),
            vec![(NodeKind::BlockQuote, "a\n\nb".to_string())]
        );
    }

    #[test]
    fn fenced_code_keeps_markup_raw() {
        assert_eq!(
            parse("```rust\n# not heading\n\n- no\n```\nafter"),
            vec![
                (
                    NodeKind::CodeBlock {
                        language: "rust".into(),
                        fence: "```".into()
                    },
                    "# not heading\n\n- no".to_string()
                ),
                (NodeKind::Paragraph, "after".to_string()),
            ]
        );
    }

    #[test]
    fn unclosed_fence_runs_to_end() {
        assert_eq!(
            parse("~~~\ncode"),
            vec![(
                NodeKind::CodeBlock {
                    language: String::new(),
                    fence: "~~~".into()
                },
                "code".to_string()
            )]
        );
    }

    #[test]
    fn table_block() {
        let nodes = parse("| a | b |\n| :-- | --: |\n| 1 | 2 |\ntext");
        let NodeKind::Table(table) = &nodes[0].0 else {
            panic!("expected table, got {:?}", nodes[0]);
        };
        assert_eq!(table.alignments, vec![Alignment::Left, Alignment::Right]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(nodes[1], (NodeKind::Paragraph, "text".to_string()));
    }

    #[test]
    fn pipe_line_without_delimiter_row_is_text() {
        assert_eq!(
            parse("| not a table"),
            vec![(NodeKind::Paragraph, "| not a table".to_string())]
        );
    }

    #[test]
    fn image_and_rule_blocks() {
        assert_eq!(
            parse("![a](b.png)\n\n***"),
            vec![
                (
                    NodeKind::Image {
                        alt: "a".into(),
                        url: "b.png".into()
                    },
                    String::new()
                ),
                (NodeKind::HorizontalRule { marker: '*' }, String::new()),
            ]
        );
    }

    #[test]
    fn html_block_with_nesting() {
        assert_eq!(
            parse("<div class=\"x\">\n<div>\ninner\n</div>\n</div>"),
            vec![(
                NodeKind::HtmlBlock {
                    opening: "<div class=\"x\">".into(),
                    closing: "</div>".into()
                },
                "<div>\ninner\n</div>".to_string()
            )]
        );
    }

    #[test]
    fn unclosed_html_falls_back_to_paragraph() {
        assert_eq!(
            parse("<div>\ntext"),
            vec![(NodeKind::Paragraph, "<div>\ntext".to_string())]
        );
    }

    #[test]
    fn empty_input_has_no_nodes() {
        assert!(parse("").is_empty());
        assert!(parse("\n\n  \n").is_empty());
    }
}
