//! Block-level operations: split, merge, conversion and list structure.

use log::trace;

use crate::{
    model::{BlockType, ListMarker, Node, NodeId, NodeKind},
    selection::TreeCursor,
};

use super::{
    EditError,
    draft::{Draft, is_textual},
    inline::split_content,
};

impl Draft {
    /// Splits the node under the caret.
    ///
    /// With `exit_empty`, an empty list item or blockquote turns into a
    /// paragraph instead of producing a second empty sibling.
    pub fn split(&mut self, exit_empty: bool) -> Result<(), EditError> {
        let id = self.cursor.node;
        if let Some(cell) = self.cursor.cell {
            let node = self.tree.get_mut(id).ok_or(EditError::StaleCursor(id))?;
            let NodeKind::Table(table) = &mut node.kind else {
                return Err(EditError::StaleCursor(id));
            };
            let row = table.insert_row_after(cell.row);
            self.cursor = TreeCursor::in_cell(id, row, 0, 0);
            self.touch(id);
            return Ok(());
        }
        if self.cursor.tag.is_some() {
            return Err(EditError::Unsupported("line breaks inside an HTML tag line"));
        }

        let node = self.current()?.clone();
        match &node.kind {
            NodeKind::Image { .. } | NodeKind::HorizontalRule { .. } | NodeKind::Table(_) => {
                let para = Node::paragraph("");
                let pid = para.id;
                self.tree.insert_after(id, para);
                self.cursor = TreeCursor::at(pid, 0);
                self.touch(pid);
                return Ok(());
            }
            NodeKind::CodeBlock { .. } | NodeKind::HtmlBlock { .. } => {
                return self.insert_text("\n");
            }
            NodeKind::ListItem { .. } | NodeKind::BlockQuote if exit_empty && node.is_empty() => {
                return self.set_kind(id, NodeKind::Paragraph, 0);
            }
            _ => {}
        }

        let parts = split_content(&node.content, self.cursor.offset);
        let kind = match &node.kind {
            NodeKind::ListItem {
                marker: ListMarker::Ordered { number, delimiter },
                indent,
            } => NodeKind::ListItem {
                marker: ListMarker::Ordered {
                    number: number + 1,
                    delimiter: *delimiter,
                },
                indent: *indent,
            },
            NodeKind::ListItem {
                marker: ListMarker::Checklist { bullet, .. },
                indent,
            } => NodeKind::ListItem {
                marker: ListMarker::Checklist {
                    bullet: *bullet,
                    checked: false,
                },
                indent: *indent,
            },
            other => other.clone(),
        };
        let second = Node::new(kind, parts.right);
        let second_id = second.id;

        self.tree.replace_content(id, parts.left);
        self.tree.insert_after(id, second);
        self.tree.renumber_ordered(second_id);
        self.touch(id);
        self.touch(second_id);
        self.cursor = TreeCursor::at(second_id, parts.caret);
        trace!("split {id} into {second_id}");
        Ok(())
    }

    /// Joins the caret's node onto the previous node.
    pub fn merge_previous(&mut self) -> Result<(), EditError> {
        let node = self.current()?.clone();
        if !is_textual(&node) {
            return Err(EditError::NotEditable(node.kind.name()));
        }
        let Some(prev) = self.tree.previous(node.id).cloned() else {
            return Ok(());
        };
        match &prev.kind {
            NodeKind::Image { .. } | NodeKind::HorizontalRule { .. } => {
                self.tree.remove(prev.id);
                self.touch(prev.id);
                self.cursor = TreeCursor::at(node.id, 0);
                Ok(())
            }
            NodeKind::Table(_) => Ok(()),
            _ => self.join(&prev, &node),
        }
    }

    /// Joins the next node onto the caret's node.
    pub fn merge_next(&mut self) -> Result<(), EditError> {
        let node = self.current()?.clone();
        let Some(next) = self.tree.next(node.id).cloned() else {
            return Ok(());
        };
        match &next.kind {
            NodeKind::Image { .. } | NodeKind::HorizontalRule { .. } => {
                self.tree.remove(next.id);
                self.touch(next.id);
                self.cursor = TreeCursor::at(node.id, node.len());
                Ok(())
            }
            NodeKind::Table(_) => Ok(()),
            _ => self.join(&node, &next),
        }
    }

    /// Appends `second`'s content to `first` and removes `second`. The caret
    /// lands at the seam.
    fn join(&mut self, first: &Node, second: &Node) -> Result<(), EditError> {
        let mut content = first.content.clone();
        content.push_str(&second.content);
        if matches!(first.kind, NodeKind::Heading { .. }) {
            content = content.replace('\n', " ");
        }
        let index = self.tree.index_of(first.id).unwrap_or(0);
        self.tree.replace_content(first.id, content);
        self.tree.remove(second.id);
        self.touch(first.id);
        self.touch(second.id);
        self.cursor = TreeCursor::at(first.id, first.len());
        self.renumber_near(index + 1);
        trace!("joined {} onto {}", second.id, first.id);
        Ok(())
    }

    /// Backspace with nothing before the caret.
    pub fn backspace_at_start(&mut self, node: &Node) -> Result<(), EditError> {
        match node.kind {
            NodeKind::ListItem { .. } | NodeKind::Heading { .. } | NodeKind::BlockQuote => {
                self.set_kind(node.id, NodeKind::Paragraph, 0)
            }
            _ => self.merge_previous(),
        }
    }

    pub fn convert(&mut self, to: BlockType) -> Result<(), EditError> {
        if self.on_cell_or_tag() {
            return Err(EditError::Unsupported("converting from inside a table cell or tag line"));
        }
        let node = self.current()?.clone();
        let indent = match &node.kind {
            NodeKind::ListItem { indent, .. } => *indent,
            NodeKind::Table(_)
            | NodeKind::Image { .. }
            | NodeKind::HorizontalRule { .. }
            | NodeKind::HtmlBlock { .. } => {
                return Err(EditError::Unsupported("conversion of tables, images, rules and HTML blocks"));
            }
            _ => 0,
        };

        let kind = match (to, &node.kind) {
            (BlockType::Paragraph, _) => NodeKind::Paragraph,
            (BlockType::Heading(level), _) => NodeKind::Heading {
                level: level.clamp(1, 6),
            },
            (BlockType::BulletItem, kind @ NodeKind::ListItem { marker: ListMarker::Bullet(_), .. })
            | (BlockType::OrderedItem, kind @ NodeKind::ListItem { marker: ListMarker::Ordered { .. }, .. })
            | (BlockType::ChecklistItem, kind @ NodeKind::ListItem { marker: ListMarker::Checklist { .. }, .. })
            | (BlockType::CodeBlock, kind @ NodeKind::CodeBlock { .. }) => kind.clone(),
            (BlockType::BulletItem, _) => NodeKind::ListItem {
                marker: ListMarker::Bullet('-'),
                indent,
            },
            (BlockType::OrderedItem, _) => NodeKind::ListItem {
                marker: ListMarker::Ordered {
                    number: 1,
                    delimiter: '.',
                },
                indent,
            },
            (BlockType::ChecklistItem, _) => NodeKind::ListItem {
                marker: ListMarker::Checklist {
                    bullet: '-',
                    checked: false,
                },
                indent,
            },
            (BlockType::BlockQuote, _) => NodeKind::BlockQuote,
            (BlockType::CodeBlock, _) => NodeKind::CodeBlock {
                language: String::new(),
                fence: "```".to_string(),
            },
        };

        if matches!(kind, NodeKind::Heading { .. }) && node.content.contains('\n') {
            self.tree
                .replace_content(node.id, node.content.replace('\n', " "));
        }
        let offset = if kind.supports_inline() {
            self.cursor.offset
        } else {
            0
        };
        self.set_kind(node.id, kind, offset)
    }

    /// Replaces `id`'s kind, keeps its content and renumbers around it.
    fn set_kind(&mut self, id: NodeId, kind: NodeKind, offset: usize) -> Result<(), EditError> {
        let index = self.tree.index_of(id).ok_or(EditError::StaleCursor(id))?;
        let node = self.tree.get_mut(id).ok_or(EditError::StaleCursor(id))?;
        node.kind = kind;
        let len = node.len();
        self.cursor = TreeCursor::at(id, offset.min(len));
        self.touch(id);
        self.renumber_near(index);
        Ok(())
    }

    /// Moves a list item one level deeper, at most one past the item above.
    pub fn indent(&mut self) -> Result<(), EditError> {
        let id = self.cursor.node;
        let ceiling = match self.tree.previous(id).map(|n| &n.kind) {
            Some(NodeKind::ListItem { indent, .. }) => indent + 1,
            _ => 0,
        };
        self.change_indent(|indent| (indent + 1).min(ceiling.max(indent)))
    }

    pub fn outdent(&mut self) -> Result<(), EditError> {
        self.change_indent(|indent| indent.saturating_sub(1))
    }

    fn change_indent(&mut self, f: impl FnOnce(usize) -> usize) -> Result<(), EditError> {
        let id = self.cursor.node;
        let index = self.tree.index_of(id).ok_or(EditError::StaleCursor(id))?;
        let node = self.tree.get_mut(id).ok_or(EditError::StaleCursor(id))?;
        let NodeKind::ListItem { indent, .. } = &mut node.kind else {
            return Err(EditError::Unsupported("indentation applies to list items"));
        };
        let level = f(*indent);
        if level == *indent {
            return Ok(());
        }
        *indent = level;
        if !self.continues_ordered_run(index, level)
            && let Some(NodeKind::ListItem {
                marker: ListMarker::Ordered { number, .. },
                ..
            }) = self.tree.get_mut(id).map(|n| &mut n.kind)
        {
            *number = 1;
        }
        self.touch(id);
        // Both the run the item left and the one it joined need numbers.
        self.renumber_near(index);
        let deeper: Vec<NodeId> = self.tree.nodes()[index..]
            .iter()
            .skip(1)
            .take_while(|n| n.kind.is_list_item())
            .map(|n| n.id)
            .collect();
        for next in deeper {
            self.tree.renumber_ordered(next);
        }
        Ok(())
    }

    /// Whether the nearest list item above `index` at or above `level` is an
    /// ordered item at exactly `level`.
    fn continues_ordered_run(&self, index: usize, level: usize) -> bool {
        self.tree.nodes()[..index]
            .iter()
            .rev()
            .map_while(|n| match &n.kind {
                NodeKind::ListItem { marker, indent } => Some((marker, *indent)),
                _ => None,
            })
            .find(|(_, indent)| *indent <= level)
            .is_some_and(|(marker, indent)| indent == level && marker.is_ordered())
    }

    pub fn toggle_checked(&mut self) -> Result<(), EditError> {
        let id = self.cursor.node;
        let node = self.tree.get_mut(id).ok_or(EditError::StaleCursor(id))?;
        match &mut node.kind {
            NodeKind::ListItem {
                marker: ListMarker::Checklist { checked, .. },
                ..
            } => {
                *checked = !*checked;
                self.touch(id);
                Ok(())
            }
            _ => Err(EditError::Unsupported("only checklist items can be checked")),
        }
    }

    /// Moves the caret into a fresh paragraph after an atomic node so text
    /// has somewhere to go.
    pub fn ensure_textual(&mut self) -> Result<(), EditError> {
        let node = self.current()?;
        if is_textual(node) {
            Ok(())
        } else {
            self.split(false)
        }
    }
}
