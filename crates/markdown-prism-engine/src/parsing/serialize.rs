use crate::model::{IndentStyle, Node, NodeKind, Tree};

use super::blocks::kinds::{BlockQuote, CodeFence, Heading, ImageLine, TableSyntax, ThematicBreak};

/// Serializes a tree back to markdown.
///
/// Blocks are separated by a blank line, except consecutive list items which
/// are separated by a single newline. Non-empty output ends with a newline.
pub fn serialize(tree: &Tree) -> String {
    let mut out = String::new();
    let mut prev: Option<&Node> = None;
    for node in tree.nodes() {
        if let Some(p) = prev {
            let tight = p.kind.is_list_item() && node.kind.is_list_item();
            out.push_str(if tight { "\n" } else { "\n\n" });
        }
        out.push_str(&block_text(node, tree.indent_style));
        prev = Some(node);
    }
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

/// One node as markdown, without a trailing newline.
pub fn block_text(node: &Node, style: IndentStyle) -> String {
    let content = node.content.as_str();
    match &node.kind {
        NodeKind::Paragraph => content.to_string(),
        NodeKind::Heading { level } => with_space(&Heading::prefix(*level), content),
        NodeKind::ListItem { marker, indent } => {
            let lead = style.indent_string(*indent);
            let marker = marker.text();
            let hang = format!("{lead}{}", " ".repeat(marker.chars().count() + 1));
            let mut lines = content.split('\n');
            let mut out = with_space(&format!("{lead}{marker}"), lines.next().unwrap_or(""));
            for line in lines {
                out.push('\n');
                out.push_str(&hang);
                out.push_str(line);
            }
            out
        }
        NodeKind::BlockQuote => content
            .split('\n')
            .map(BlockQuote::prefixed)
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::CodeBlock { language, fence } => {
            let fence = CodeFence::fence_for(fence, content);
            let mut out = format!("{fence}{language}\n");
            if !content.is_empty() {
                out.push_str(content);
                out.push('\n');
            }
            out.push_str(&fence);
            out
        }
        NodeKind::Table(table) => {
            let mut lines = Vec::with_capacity(table.rows.len() + 1);
            for (i, row) in table.rows.iter().enumerate() {
                lines.push(TableSyntax::row_line(row));
                if i == 0 {
                    lines.push(TableSyntax::delimiter_line(&table.alignments));
                }
            }
            lines.join("\n")
        }
        NodeKind::Image { alt, url } => ImageLine::line(alt, url),
        NodeKind::HorizontalRule { marker } => ThematicBreak::line(*marker),
        NodeKind::HtmlBlock { opening, closing } => {
            if content.is_empty() {
                format!("{opening}\n{closing}")
            } else {
                format!("{opening}\n{content}\n{closing}")
            }
        }
    }
}

/// `prefix content`, or just `prefix` when the content is empty.
fn with_space(prefix: &str, content: &str) -> String {
    if content.is_empty() {
        prefix.to_string()
    } else {
        format!("{prefix} {content}")
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::model::{Node, NodeKind, Tree};

    fn roundtrip(text: &str) -> String {
        Tree::parse(text).to_markdown()
    }

    #[rstest]
    #[case::paragraphs("one\ntwo\n\nthree\n")]
    #[case::headings("# A\n\n###### F\n\n##\n")]
    #[case::tight_list("- a\n  continued\n- b\n  1. nested\n  2. nested\n")]
    #[case::checklist("- [ ] todo\n- [x] done\n- [ ]\n")]
    #[case::quote("> a\n>\n> b\n")]
    #[case::code("```rust\nfn main() {}\n\n```\n")]
    #[case::empty_code("~~~~\n~~~~\n")]
    #[case::table("| a | b |\n| :--- | ---: |\n| 1 | \\| |\n")]
    #[case::image_and_rule("![cat](cat.png)\n\n***\n")]
    #[case::html("<details>\n<summary>S</summary>\n\nbody\n</details>\n")]
    #[case::inline_markup("a **b** <sub>c</sub> ![i](u) [l](v) `code`\n")]
    #[case::tabs("- a\n\t- b\n")]
    fn canonical_documents_round_trip_exactly(#[case] text: &str) {
        assert_eq!(roundtrip(text), text);
    }

    #[rstest]
    #[case::loose_list("- a\n\n- b")]
    #[case::odd_spacing("#   Title\n\n\n\nPara   \n")]
    #[case::star_rule("* * *\n* item")]
    #[case::unclosed_fence("```\ncode")]
    #[case::ragged_table("|a|b|\n|-|-|\n|1|\n")]
    #[case::quote_then_text("> q\nnot quote")]
    #[case::crlf("line\r\n\r\n- item\r\n")]
    fn serialization_is_idempotent(#[case] text: &str) {
        let once = roundtrip(text);
        assert_eq!(roundtrip(&once), once);
    }

    #[test]
    fn code_containing_its_own_fence_gets_a_longer_one() {
        let code = Node::new(
            NodeKind::CodeBlock {
                language: "md".into(),
                fence: "```".into(),
            },
            "a\n```\n# not a heading",
        );
        let text = Tree::new(vec![code.clone()]).to_markdown();
        assert_eq!(text, "````md\na\n```\n# not a heading\n````\n");

        let reparsed = Tree::parse(&text);
        assert_eq!(reparsed.len(), 1);
        assert_eq!(reparsed.nodes()[0].content, code.content);
        assert_eq!(reparsed.to_markdown(), text);
    }

    #[test]
    fn empty_tree_serializes_to_nothing() {
        assert_eq!(roundtrip(""), "");
    }
}
