use log::trace;

use crate::{
    mapping::OffsetMap,
    model::{Node, NodeId, NodeKind, Tree},
    parsing::{blocks::kinds::HtmlBlockSyntax, span::Span},
    selection::{TagPart, TreeCursor, ViewMode},
};

use super::{EditError, Patch, inline::delete_pruning_empty, text};

/// Working state of one command: a private copy of the tree plus the caret.
///
/// Operations mutate the draft freely; nothing reaches the session unless
/// the resulting [`Patch`] is installed.
pub(crate) struct Draft {
    pub tree: Tree,
    pub cursor: TreeCursor,
    pub view: ViewMode,
    pub prune_empty_spans: bool,
    changed: Vec<NodeId>,
}

impl Draft {
    pub fn new(tree: Tree, cursor: TreeCursor, view: ViewMode, prune_empty_spans: bool) -> Self {
        Self {
            tree,
            cursor,
            view,
            prune_empty_spans,
            changed: Vec::new(),
        }
    }

    pub fn into_patch(self, version: u64) -> Patch {
        Patch {
            tree: self.tree,
            cursor: self.cursor,
            changed: self.changed,
            version,
        }
    }

    pub fn touch(&mut self, id: NodeId) {
        if !self.changed.contains(&id) {
            self.changed.push(id);
        }
    }

    /// Rejects the draft if a changed HTML block's content would end the
    /// block early, or leave it unclosed, once written out.
    pub fn check_html_blocks(&self) -> Result<(), EditError> {
        for id in &self.changed {
            if let Some(node) = self.tree.get(*id)
                && let NodeKind::HtmlBlock { opening, closing } = &node.kind
                && !HtmlBlockSyntax::keeps_shape(opening, closing, &node.content)
            {
                return Err(EditError::Unsupported("content that would end the HTML block early"));
            }
        }
        Ok(())
    }

    /// The node under the caret.
    pub fn current(&self) -> Result<&Node, EditError> {
        self.tree
            .get(self.cursor.node)
            .ok_or(EditError::StaleCursor(self.cursor.node))
    }

    pub fn on_cell_or_tag(&self) -> bool {
        self.cursor.cell.is_some() || self.cursor.tag.is_some()
    }

    /// The text the caret addresses: a table cell, a tag line, or content.
    pub fn target_text(&mut self) -> Result<&mut String, EditError> {
        let c = self.cursor;
        let node = self
            .tree
            .get_mut(c.node)
            .ok_or(EditError::StaleCursor(c.node))?;
        match (c.cell, c.tag, &mut node.kind) {
            (Some(cell), _, NodeKind::Table(table)) => table
                .cell_mut(cell.row, cell.col)
                .ok_or(EditError::StaleCursor(c.node)),
            (Some(_), _, _) => Err(EditError::StaleCursor(c.node)),
            (None, Some(part), NodeKind::HtmlBlock { opening, closing }) => Ok(match part {
                TagPart::Opening => opening,
                TagPart::Closing => closing,
            }),
            (None, Some(_), _) => Err(EditError::StaleCursor(c.node)),
            (None, None, kind) if kind.is_atomic() || matches!(kind, NodeKind::Table(_)) => {
                Err(EditError::NotEditable(kind.name()))
            }
            (None, None, _) => Ok(&mut node.content),
        }
    }

    /// Inserts `inserted` (no line breaks) at the caret.
    pub fn insert_text(&mut self, inserted: &str) -> Result<(), EditError> {
        let offset = self.cursor.offset;
        let target = self.target_text()?;
        let at = offset.min(text::char_len(target));
        text::insert(target, at, inserted);
        self.cursor.offset = at + text::char_len(inserted);
        self.touch(self.cursor.node);
        Ok(())
    }

    pub fn delete_backward(&mut self) -> Result<(), EditError> {
        if self.on_cell_or_tag() {
            let offset = self.cursor.offset;
            let target = self.target_text()?;
            let at = offset.min(text::char_len(target));
            if at > 0 {
                text::remove(target, at - 1, at);
                self.cursor.offset = at - 1;
                self.touch(self.cursor.node);
            }
            return Ok(());
        }

        let node = self.current()?.clone();
        match &node.kind {
            NodeKind::Image { .. } | NodeKind::HorizontalRule { .. } => return self.remove_current(),
            NodeKind::Table(_) => return Err(EditError::NotEditable(node.kind.name())),
            _ => {}
        }
        let at = self.cursor.offset.min(node.len());
        let unit = if self.shows_rendered(&node) {
            OffsetMap::new(&node.content).visible_unit_before(at)
        } else {
            at.checked_sub(1).map(|p| Span::new(p, p + 1))
        };
        match unit {
            Some(unit) => {
                self.delete_unit(&node, unit);
                Ok(())
            }
            None => self.backspace_at_start(&node),
        }
    }

    pub fn delete_forward(&mut self) -> Result<(), EditError> {
        if self.on_cell_or_tag() {
            let offset = self.cursor.offset;
            let target = self.target_text()?;
            let len = text::char_len(target);
            if offset < len {
                text::remove(target, offset, offset + 1);
                self.touch(self.cursor.node);
            }
            return Ok(());
        }

        let node = self.current()?.clone();
        match &node.kind {
            NodeKind::Image { .. } | NodeKind::HorizontalRule { .. } => return self.remove_current(),
            NodeKind::Table(_) => return Err(EditError::NotEditable(node.kind.name())),
            _ => {}
        }
        let at = self.cursor.offset.min(node.len());
        let unit = if self.shows_rendered(&node) {
            OffsetMap::new(&node.content).visible_unit_after(at)
        } else {
            (at < node.len()).then(|| Span::new(at, at + 1))
        };
        match unit {
            Some(unit) => {
                self.delete_unit(&node, unit);
                Ok(())
            }
            None => self.merge_next(),
        }
    }

    /// Whether `node`'s content is displayed with markers hidden.
    pub fn shows_rendered(&self, node: &Node) -> bool {
        self.view == ViewMode::Rendered && node.kind.supports_inline()
    }

    /// Removes one displayed unit from `node`'s content.
    fn delete_unit(&mut self, node: &Node, unit: Span) {
        let (content, caret) = if self.prune_empty_spans && self.shows_rendered(node) {
            delete_pruning_empty(&node.content, unit)
        } else {
            let mut content = node.content.clone();
            text::remove(&mut content, unit.start, unit.end);
            (content, unit.start)
        };
        self.tree.replace_content(node.id, content);
        self.cursor = TreeCursor::at(node.id, caret);
        self.touch(node.id);
    }

    /// Removes the node under the caret, moving the caret to the end of the
    /// previous node, else the start of the next. An emptied tree gets a
    /// fresh empty paragraph.
    pub fn remove_current(&mut self) -> Result<(), EditError> {
        let id = self.cursor.node;
        let index = self.tree.index_of(id).ok_or(EditError::StaleCursor(id))?;
        self.tree.remove(id);
        self.touch(id);

        self.cursor = if let Some(prev) = index.checked_sub(1).and_then(|i| self.tree.at(i)) {
            TreeCursor::at(prev.id, end_offset(prev))
        } else if let Some(next) = self.tree.at(index) {
            TreeCursor::at(next.id, 0)
        } else {
            let para = Node::paragraph("");
            let pid = para.id;
            self.tree.insert(0, para);
            self.touch(pid);
            TreeCursor::at(pid, 0)
        };
        self.renumber_near(index);
        trace!("removed node {id}");
        Ok(())
    }

    /// Renumbers ordered runs touching position `index` and its neighbours.
    pub fn renumber_near(&mut self, index: usize) {
        let from = index.saturating_sub(1);
        let ids: Vec<NodeId> = self.tree.nodes()[from.min(self.tree.len())..]
            .iter()
            .take(3)
            .map(|n| n.id)
            .collect();
        for id in ids {
            self.tree.renumber_ordered(id);
        }
    }
}

/// The caret offset at the end of `node`.
pub(crate) fn end_offset(node: &Node) -> usize {
    if node.kind.is_atomic() || matches!(node.kind, NodeKind::Table(_)) {
        0
    } else {
        node.len()
    }
}

/// Whether `node` holds editable content text.
pub(crate) fn is_textual(node: &Node) -> bool {
    !node.kind.is_atomic() && !matches!(node.kind, NodeKind::Table(_))
}
