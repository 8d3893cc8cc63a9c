//! Operations that span a selection or carry multi-line payloads.

use crate::{
    model::{Node, NodeKind},
    selection::{TreeCursor, TreePoint},
};

use super::{
    EditError, Format,
    draft::{Draft, is_textual},
    inline::toggle_format,
    text,
};

impl Draft {
    /// Deletes the text between two ordered points. The caret collapses to
    /// `start`, or to the first surviving position when `start`'s node goes.
    pub fn delete_range(&mut self, start: TreePoint, end: TreePoint) -> Result<(), EditError> {
        let first = self
            .tree
            .get(start.node)
            .cloned()
            .ok_or(EditError::StaleCursor(start.node))?;
        let i = self.tree.index_of(start.node).unwrap_or(0);
        let j = self
            .tree
            .index_of(end.node)
            .ok_or(EditError::StaleCursor(end.node))?;

        if i == j {
            if !is_textual(&first) {
                self.cursor = TreeCursor::at(first.id, 0);
                return self.remove_current();
            }
            let a = start.offset.min(first.len());
            let b = end.offset.min(first.len()).max(a);
            let mut content = first.content.clone();
            text::remove(&mut content, a, b);
            self.tree.replace_content(first.id, content);
            self.touch(first.id);
            self.cursor = TreeCursor::at(first.id, a);
            return Ok(());
        }

        let span: Vec<Node> = self.tree.nodes()[i..=j].to_vec();
        let last = &span[span.len() - 1];
        let middle = &span[1..span.len() - 1];
        let tail = if is_textual(last) {
            text::split_at(&last.content, end.offset.min(last.len())).1.to_string()
        } else {
            String::new()
        };

        if is_textual(&first) {
            let a = start.offset.min(first.len());
            let mut content = text::split_at(&first.content, a).0.to_string();
            content.push_str(&tail);
            if matches!(first.kind, NodeKind::Heading { .. }) {
                content = content.replace('\n', " ");
            }
            self.tree.replace_content(first.id, content);
            self.touch(first.id);
            for node in middle.iter().chain(std::iter::once(last)) {
                self.tree.remove(node.id);
                self.touch(node.id);
            }
            self.cursor = TreeCursor::at(first.id, a);
        } else if is_textual(last) {
            self.tree.replace_content(last.id, tail);
            self.touch(last.id);
            for node in std::iter::once(&first).chain(middle) {
                self.tree.remove(node.id);
                self.touch(node.id);
            }
            self.cursor = TreeCursor::at(last.id, 0);
        } else {
            for node in &span {
                self.tree.remove(node.id);
                self.touch(node.id);
            }
            let para = Node::paragraph("");
            self.cursor = TreeCursor::at(para.id, 0);
            self.touch(para.id);
            self.tree.insert(i, para);
        }
        self.renumber_near(i);
        Ok(())
    }

    /// Inserts text that may contain line breaks.
    ///
    /// Table cells and tag lines are single-line, so breaks become spaces;
    /// code and HTML blocks take the text verbatim; anywhere else every
    /// break splits the node.
    pub fn paste(&mut self, pasted: &str) -> Result<(), EditError> {
        let pasted = pasted.replace("\r\n", "\n").replace('\r', "\n");
        if self.on_cell_or_tag() {
            return self.insert_text(&pasted.replace('\n', " "));
        }
        self.ensure_textual()?;
        if matches!(
            self.current()?.kind,
            NodeKind::CodeBlock { .. } | NodeKind::HtmlBlock { .. }
        ) {
            return self.insert_text(&pasted);
        }
        for (k, line) in pasted.split('\n').enumerate() {
            if k > 0 {
                self.split(false)?;
            }
            if !line.is_empty() {
                self.insert_text(line)?;
            }
        }
        Ok(())
    }

    /// Toggles `format` over `[start, end)` of the caret's node, or inserts
    /// an empty pair at the caret when the range is collapsed.
    pub fn toggle_format(&mut self, format: Format, start: usize, end: usize) -> Result<(), EditError> {
        if self.on_cell_or_tag() {
            return Err(EditError::Unsupported("formatting inside a table cell or tag line"));
        }
        let node = self.current()?.clone();
        if !node.kind.supports_inline() {
            return Err(EditError::Unsupported("formatting needs inline content"));
        }
        let a = start.min(node.len());
        let b = end.min(node.len()).max(a);
        let (content, caret) = toggle_format(&node.content, a, b, format);
        self.tree.replace_content(node.id, content);
        self.touch(node.id);
        self.cursor = TreeCursor::at(node.id, caret);
        Ok(())
    }
}
