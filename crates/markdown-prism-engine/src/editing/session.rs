use anyhow::Context;
use log::{debug, warn};

use crate::{
    model::{Node, NodeKind, Tree},
    selection::{TreeCursor, TreeRange, ViewMode},
    sync::{self, DisplaySurface},
};

use super::{Cmd, EditError, Patch, draft::Draft};

/// Behaviour switches for the edit engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditOptions {
    /// Remove the markers of a matched span once its last visible character
    /// is deleted in the rendered view.
    pub prune_empty_spans: bool,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            prune_empty_spans: true,
        }
    }
}

/// One open document: the tree, the caret and selection, and the view.
///
/// The session is the only owner of editing state. Commands never mutate it
/// directly: [`Session::apply`] computes a [`Patch`] and
/// [`Session::install`] commits it, so a caller can inspect or drop an
/// edit before it lands.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    tree: Tree,
    cursor: Option<TreeCursor>,
    range: Option<TreeRange>,
    view: ViewMode,
    options: EditOptions,
    /// Incremented by every installed patch
    version: u64,
}

impl Session {
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            cursor: None,
            range: None,
            view: ViewMode::default(),
            options: EditOptions::default(),
            version: 0,
        }
    }

    pub fn with_options(mut self, options: EditOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_view(mut self, view: ViewMode) -> Self {
        self.view = view;
        self
    }

    /// Parses `text` into a session. An empty document gets one empty
    /// paragraph so there is always somewhere to put the caret.
    pub fn from_markdown(text: &str) -> Self {
        let mut tree = Tree::parse(text);
        if tree.is_empty() {
            tree.insert(0, Node::paragraph(""));
        }
        Self::new(tree)
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes).context("Document is not valid UTF-8")?;
        Ok(Self::from_markdown(text))
    }

    pub fn to_markdown(&self) -> String {
        self.tree.to_markdown()
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn cursor(&self) -> Option<TreeCursor> {
        self.cursor
    }

    pub fn range(&self) -> Option<TreeRange> {
        self.range
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn options(&self) -> EditOptions {
        self.options
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Collapses the selection to `cursor`.
    pub fn focus(&mut self, cursor: TreeCursor) {
        self.cursor = Some(cursor);
        self.range = None;
    }

    /// Selects `range`; the caret sits at its focus end.
    pub fn select(&mut self, range: TreeRange) {
        self.cursor = Some(TreeCursor::at(range.focus.node, range.focus.offset));
        self.range = Some(range);
    }

    /// Computes the effect of `cmd` without touching the session.
    ///
    /// ## Pipeline
    ///
    /// 1. Validate the cursor (and range) against the current tree
    /// 2. Copy the tree into a working draft
    /// 3. Delete the selection if the command replaces it
    /// 4. Run the command at the caret
    /// 5. Package the draft as a [`Patch`]
    ///
    /// Any error leaves the session exactly as it was.
    pub fn apply(&self, cmd: Cmd) -> Result<Patch, EditError> {
        let cursor = self.cursor.ok_or(EditError::NoCursor)?;
        self.validate(&cursor)?;
        let range = match self.range {
            Some(range) => Some(range.ordered(&self.tree).ok_or_else(|| {
                warn!("selection refers to a node that is gone");
                EditError::StaleCursor(range.anchor.node)
            })?),
            None => None,
        };

        let mut draft = Draft::new(
            self.tree.clone(),
            cursor,
            self.view,
            self.options.prune_empty_spans,
        );

        match &cmd {
            Cmd::InsertText { text } | Cmd::ReplaceRange { text } => {
                if let Some((start, end)) = range {
                    draft.delete_range(start, end)?;
                }
                if text.contains(['\n', '\r']) {
                    draft.paste(text)?;
                } else if !text.is_empty() {
                    draft.ensure_textual()?;
                    draft.insert_text(text)?;
                }
            }
            Cmd::Paste { text } => {
                if let Some((start, end)) = range {
                    draft.delete_range(start, end)?;
                }
                draft.paste(text)?;
            }
            Cmd::DeleteBackward => match range {
                Some((start, end)) => draft.delete_range(start, end)?,
                None => draft.delete_backward()?,
            },
            Cmd::DeleteForward => match range {
                Some((start, end)) => draft.delete_range(start, end)?,
                None => draft.delete_forward()?,
            },
            Cmd::Split => {
                if let Some((start, end)) = range {
                    draft.delete_range(start, end)?;
                }
                draft.split(true)?;
            }
            Cmd::MergeWithPrevious => draft.merge_previous()?,
            Cmd::ConvertBlock { to } => draft.convert(*to)?,
            Cmd::ToggleFormat { format } => match range {
                Some((start, end)) if start.node != end.node => {
                    return Err(EditError::Unsupported("formatting across blocks"));
                }
                Some((start, end)) => {
                    draft.cursor = TreeCursor::at(start.node, start.offset);
                    draft.toggle_format(*format, start.offset, end.offset)?;
                }
                None => draft.toggle_format(*format, cursor.offset, cursor.offset)?,
            },
            Cmd::Indent => draft.indent()?,
            Cmd::Outdent => draft.outdent()?,
            Cmd::ToggleChecked => draft.toggle_checked()?,
        }

        draft.check_html_blocks()?;
        let patch = draft.into_patch(self.version + 1);
        debug!(
            "applied {cmd:?}: cursor {}@{}, {} node(s) changed",
            patch.cursor.node,
            patch.cursor.offset,
            patch.changed.len()
        );
        Ok(patch)
    }

    /// Checks that `cursor` addresses something in the current tree.
    fn validate(&self, cursor: &TreeCursor) -> Result<(), EditError> {
        let Some(node) = self.tree.get(cursor.node) else {
            warn!("rejecting edit: cursor names missing node {}", cursor.node);
            return Err(EditError::StaleCursor(cursor.node));
        };
        let cell_ok = match (cursor.cell, &node.kind) {
            (None, _) => true,
            (Some(cell), NodeKind::Table(table)) => table.cell(cell.row, cell.col).is_some(),
            (Some(_), _) => false,
        };
        let tag_ok = cursor.tag.is_none() || matches!(node.kind, NodeKind::HtmlBlock { .. });
        if cell_ok && tag_ok {
            Ok(())
        } else {
            warn!("rejecting edit: cursor address does not fit a {} node", node.kind.name());
            Err(EditError::StaleCursor(cursor.node))
        }
    }

    /// Commits a patch produced by [`Session::apply`].
    pub fn install(&mut self, patch: Patch) {
        self.tree = patch.tree;
        self.cursor = Some(patch.cursor);
        self.range = None;
        self.version = patch.version;
    }

    /// Applies and installs `cmd` in one step.
    pub fn edit(&mut self, cmd: Cmd) -> Result<(), EditError> {
        let patch = self.apply(cmd)?;
        self.install(patch);
        Ok(())
    }

    /// Reads the surface's native selection into the session.
    ///
    /// Returns false, leaving the cursor and range alone, when the selection
    /// cannot be traced to a node.
    pub fn sync_from_surface<S: DisplaySurface>(&mut self, surface: &S) -> bool {
        match sync::sync_from_surface(surface, &self.tree, self.view) {
            Some(synced) => {
                self.cursor = Some(synced.cursor);
                self.range = synced.range;
                true
            }
            None => false,
        }
    }

    /// Shows the session's selection on `surface`.
    pub fn place_on<S: DisplaySurface>(&self, surface: &mut S) -> bool {
        match (self.range, self.cursor) {
            (Some(range), _) => sync::place_selection(surface, &self.tree, self.view, &range),
            (None, Some(cursor)) => sync::place_cursor(surface, &self.tree, self.view, &cursor),
            (None, None) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;
    use crate::{
        editing::Format,
        model::{BlockType, NodeId},
        projection::ProjectedSurface,
        selection::{TagPart, TreePoint},
    };

    fn focused(text: &str, index: usize, offset: usize) -> Session {
        let mut session = Session::from_markdown(text);
        let id = session.tree().nodes()[index].id;
        session.focus(TreeCursor::at(id, offset));
        session
    }

    fn id(session: &Session, index: usize) -> NodeId {
        session.tree().nodes()[index].id
    }

    fn contents(session: &Session) -> Vec<String> {
        session
            .tree()
            .nodes()
            .iter()
            .map(|n| n.content.clone())
            .collect()
    }

    fn edited(mut session: Session, cmds: Vec<Cmd>) -> Session {
        for cmd in cmds {
            session.edit(cmd).unwrap();
        }
        session
    }

    fn insert(text: &str) -> Cmd {
        Cmd::InsertText { text: text.into() }
    }

    fn range(session: &Session, from: (usize, usize), to: (usize, usize)) -> TreeRange {
        TreeRange::new(
            TreePoint {
                node: id(session, from.0),
                offset: from.1,
            },
            TreePoint {
                node: id(session, to.0),
                offset: to.1,
            },
        )
        .unwrap()
    }

    #[test]
    fn insert_at_end_of_paragraph() {
        let session = focused("hello", 0, 5);
        let patch = session.apply(insert("x")).unwrap();
        assert_eq!(patch.cursor, TreeCursor::at(id(&session, 0), 6));
        assert_eq!(patch.tree.nodes()[0].content, "hellox");
        assert_eq!(patch.changed, vec![id(&session, 0)]);
    }

    #[test]
    fn apply_leaves_the_session_untouched() {
        let mut session = focused("hello", 0, 5);
        let patch = session.apply(insert("x")).unwrap();
        assert_eq!(session.to_markdown(), "hello\n");
        assert_eq!(session.version(), 0);

        session.install(patch);
        assert_eq!(session.to_markdown(), "hellox\n");
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn split_moves_the_tail_into_a_new_node() {
        let session = focused("first second", 0, 3);
        let original = id(&session, 0);
        let session = edited(session, vec![Cmd::Split]);
        assert_eq!(contents(&session), vec!["fir", "st second"]);
        assert_eq!(id(&session, 0), original);
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 1), 0)));
    }

    #[test]
    fn split_closes_and_reopens_formatting() {
        let session = edited(focused("a **bold** c", 0, 6), vec![Cmd::Split]);
        assert_eq!(contents(&session), vec!["a **bo**", "**ld** c"]);
        assert_eq!(session.cursor().map(|c| c.offset), Some(2));
    }

    #[test]
    fn split_renumbers_ordered_items() {
        let session = edited(focused("1. a\n2. b", 0, 1), vec![Cmd::Split]);
        assert_eq!(session.to_markdown(), "1. a\n2.\n3. b\n");
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 1), 0)));
    }

    #[test]
    fn second_split_on_empty_item_exits_the_list() {
        let session = edited(focused("- a", 0, 1), vec![Cmd::Split, Cmd::Split]);
        assert_eq!(session.tree().len(), 2);
        assert_eq!(session.tree().nodes()[1].kind, NodeKind::Paragraph);
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 1), 0)));
    }

    #[test]
    fn split_checklist_starts_unchecked() {
        let session = edited(focused("- [x] done", 0, 4), vec![Cmd::Split]);
        assert_eq!(session.to_markdown(), "- [x] done\n- [ ]\n");
    }

    #[test]
    fn split_inside_code_inserts_a_line_break() {
        let session = edited(focused("```\nab\n```", 0, 1), vec![Cmd::Split]);
        assert_eq!(contents(&session), vec!["a\nb"]);
    }

    #[test]
    fn rendered_backspace_prunes_emptied_span() {
        let session = edited(focused("a **b** c", 0, 7), vec![Cmd::DeleteBackward]);
        assert_eq!(contents(&session), vec!["a  c"]);
        assert_eq!(session.cursor().map(|c| c.offset), Some(2));
    }

    #[test]
    fn rendered_backspace_without_pruning_keeps_markers() {
        let session = focused("a **b** c", 0, 7).with_options(EditOptions {
            prune_empty_spans: false,
        });
        let session = edited(session, vec![Cmd::DeleteBackward]);
        assert_eq!(contents(&session), vec!["a **** c"]);
        assert_eq!(session.cursor().map(|c| c.offset), Some(4));
    }

    #[test]
    fn source_backspace_deletes_one_character() {
        let session = focused("a **b** c", 0, 7).with_view(ViewMode::Source);
        let session = edited(session, vec![Cmd::DeleteBackward]);
        assert_eq!(contents(&session), vec!["a **b* c"]);
    }

    #[test]
    fn rendered_delete_forward_removes_an_image_whole() {
        let session = edited(focused("x![i](u)y", 0, 1), vec![Cmd::DeleteForward]);
        assert_eq!(contents(&session), vec!["xy"]);
    }

    #[rstest]
    #[case::list_item("- a")]
    #[case::heading("# a")]
    #[case::quote("> a")]
    fn backspace_at_start_converts_to_paragraph(#[case] text: &str) {
        let session = edited(focused(text, 0, 0), vec![Cmd::DeleteBackward]);
        assert_eq!(session.tree().nodes()[0].kind, NodeKind::Paragraph);
        assert_eq!(session.to_markdown(), "a\n");
    }

    #[test]
    fn backspace_at_start_of_paragraph_merges() {
        let session = edited(focused("ab\n\ncd", 1, 0), vec![Cmd::DeleteBackward]);
        assert_eq!(session.to_markdown(), "abcd\n");
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 0), 2)));
    }

    #[test]
    fn delete_forward_at_end_merges_next() {
        let session = edited(focused("ab\n\ncd", 0, 2), vec![Cmd::DeleteForward]);
        assert_eq!(session.to_markdown(), "abcd\n");
        assert_eq!(session.cursor().map(|c| c.offset), Some(2));
    }

    #[test]
    fn merge_into_heading_flattens_line_breaks() {
        let session = edited(focused("# T\n\nx\ny", 1, 0), vec![Cmd::MergeWithPrevious]);
        assert_eq!(session.to_markdown(), "# Tx y\n");
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 0), 1)));
    }

    #[test]
    fn delete_on_image_removes_the_node() {
        let session = edited(focused("para\n\n![a](u)", 1, 0), vec![Cmd::DeleteBackward]);
        assert_eq!(session.to_markdown(), "para\n");
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 0), 4)));
    }

    #[test]
    fn removing_the_last_node_leaves_an_empty_paragraph() {
        let session = edited(focused("---", 0, 0), vec![Cmd::DeleteForward]);
        assert_eq!(session.tree().len(), 1);
        assert_eq!(session.tree().nodes()[0].kind, NodeKind::Paragraph);
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 0), 0)));
    }

    #[test]
    fn typing_on_a_rule_opens_a_paragraph_after_it() {
        let session = edited(focused("---", 0, 0), vec![insert("x")]);
        assert_eq!(session.to_markdown(), "---\n\nx\n");
    }

    #[test]
    fn convert_keeps_offset_for_inline_kinds() {
        let session = edited(
            focused("hello", 0, 3),
            vec![Cmd::ConvertBlock {
                to: BlockType::Heading(2),
            }],
        );
        assert_eq!(session.to_markdown(), "## hello\n");
        assert_eq!(session.cursor().map(|c| c.offset), Some(3));
    }

    #[test]
    fn convert_to_code_resets_offset() {
        let session = edited(
            focused("hello", 0, 3),
            vec![Cmd::ConvertBlock {
                to: BlockType::CodeBlock,
            }],
        );
        assert_eq!(session.to_markdown(), "```\nhello\n```\n");
        assert_eq!(session.cursor().map(|c| c.offset), Some(0));
    }

    #[test]
    fn convert_to_ordered_renumbers() {
        let session = edited(
            focused("1. a\n- b", 1, 0),
            vec![Cmd::ConvertBlock {
                to: BlockType::OrderedItem,
            }],
        );
        assert_eq!(session.to_markdown(), "1. a\n2. b\n");
    }

    #[test]
    fn convert_table_is_unsupported() {
        let session = focused("| a |\n| --- |", 0, 0);
        assert!(matches!(
            session.apply(Cmd::ConvertBlock {
                to: BlockType::Paragraph
            }),
            Err(EditError::Unsupported(_))
        ));
    }

    #[test]
    fn indent_is_bounded_by_previous_item() {
        let session = edited(focused("- a\n- b", 1, 0), vec![Cmd::Indent, Cmd::Indent]);
        assert_eq!(session.to_markdown(), "- a\n  - b\n");
        let session = edited(session, vec![Cmd::Outdent]);
        assert_eq!(session.to_markdown(), "- a\n- b\n");
    }

    #[test]
    fn first_item_cannot_indent() {
        let session = edited(focused("- a", 0, 0), vec![Cmd::Indent]);
        assert_eq!(session.to_markdown(), "- a\n");
    }

    #[test]
    fn indented_ordered_item_starts_a_new_run() {
        let session = edited(focused("1. a\n2. b\n3. c", 1, 0), vec![Cmd::Indent]);
        assert_eq!(session.to_markdown(), "1. a\n  1. b\n2. c\n");
    }

    #[test]
    fn toggle_checked_flips_checklist_items_only() {
        let session = edited(focused("- [ ] t", 0, 0), vec![Cmd::ToggleChecked]);
        assert_eq!(session.to_markdown(), "- [x] t\n");
        assert!(matches!(
            focused("p", 0, 0).apply(Cmd::ToggleChecked),
            Err(EditError::Unsupported(_))
        ));
    }

    #[test]
    fn table_cell_edits_stay_in_the_cell() {
        let mut session = Session::from_markdown("| a | b |\n| --- | --- |\n| 1 | 2 |");
        let table = id(&session, 0);
        session.focus(TreeCursor::in_cell(table, 1, 1, 1));
        let session = edited(session, vec![insert("0")]);
        assert_eq!(
            session.to_markdown(),
            "| a | b |\n| --- | --- |\n| 1 | 20 |\n"
        );
        let session = edited(session, vec![Cmd::Split]);
        assert_eq!(session.cursor(), Some(TreeCursor::in_cell(table, 2, 0, 0)));
    }

    #[test]
    fn tag_lines_are_edited_in_place() {
        let mut session = Session::from_markdown("<div>\nbody\n</div>");
        let html = id(&session, 0);
        session.focus(TreeCursor::on_tag(html, TagPart::Opening, 4));
        let session = edited(session, vec![insert(" id=\"n\"")]);
        assert_eq!(session.to_markdown(), "<div id=\"n\">\nbody\n</div>\n");
        assert!(matches!(
            session.apply(Cmd::Split),
            Err(EditError::Unsupported(_))
        ));
    }

    #[test]
    fn paste_splits_on_line_breaks() {
        let session = edited(
            focused("ab", 0, 1),
            vec![Cmd::Paste {
                text: "x\r\ny".into(),
            }],
        );
        assert_eq!(contents(&session), vec!["ax", "yb"]);
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 1), 1)));
    }

    #[test]
    fn paste_into_code_is_verbatim() {
        let session = edited(
            focused("```\nab\n```", 0, 1),
            vec![Cmd::Paste {
                text: "x\ny".into(),
            }],
        );
        assert_eq!(contents(&session), vec!["ax\nyb"]);
    }

    #[test]
    fn pasted_fence_line_stays_inside_the_code_block() {
        let session = edited(
            focused("```\nab\n```", 0, 1),
            vec![Cmd::Paste {
                text: "\n```\n# not code".into(),
            }],
        );
        let saved = session.to_markdown();
        assert_eq!(saved, "````\na\n```\n# not codeb\n````\n");

        let reopened = Session::from_markdown(&saved);
        assert_eq!(contents(&reopened), contents(&session));
        assert_eq!(reopened.to_markdown(), saved);
    }

    #[test]
    fn html_block_rejects_content_that_closes_it() {
        let session = focused("<div>\nx\n</div>", 0, 1);
        assert_eq!(
            session.apply(Cmd::Paste {
                text: "\n</div>\ny".into(),
            }),
            Err(EditError::Unsupported("content that would end the HTML block early"))
        );

        let session = edited(
            session,
            vec![Cmd::Paste {
                text: "\n<div>\nz\n</div>".into(),
            }],
        );
        assert_eq!(session.to_markdown(), "<div>\nx\n<div>\nz\n</div>\n</div>\n");
        assert_eq!(Session::from_markdown(&session.to_markdown()).tree().len(), 1);
    }

    #[test]
    fn typing_over_a_cross_node_selection() {
        let mut session = Session::from_markdown("abc\n\ndef\n\nghi");
        let sel = range(&session, (0, 1), (2, 1));
        session.select(sel);
        let session = edited(session, vec![insert("X")]);
        assert_eq!(session.to_markdown(), "aXhi\n");
        assert_eq!(session.cursor(), Some(TreeCursor::at(id(&session, 0), 2)));
        assert_eq!(session.range(), None);
    }

    #[test]
    fn backward_selection_is_ordered_before_deleting() {
        let mut session = Session::from_markdown("hello");
        let sel = range(&session, (0, 4), (0, 1));
        session.select(sel);
        let session = edited(session, vec![Cmd::DeleteBackward]);
        assert_eq!(contents(&session), vec!["ho"]);
        assert_eq!(session.cursor().map(|c| c.offset), Some(1));
    }

    #[test]
    fn toggle_bold_over_selection() {
        let mut session = Session::from_markdown("a b c");
        let sel = range(&session, (0, 2), (0, 3));
        session.select(sel);
        let session = edited(
            session,
            vec![Cmd::ToggleFormat {
                format: Format::Bold,
            }],
        );
        assert_eq!(session.to_markdown(), "a **b** c\n");
        assert_eq!(session.cursor().map(|c| c.offset), Some(5));
    }

    #[test]
    fn toggle_at_collapsed_cursor_inserts_an_empty_pair() {
        let session = edited(
            focused("ab", 0, 1),
            vec![Cmd::ToggleFormat {
                format: Format::Code,
            }],
        );
        assert_eq!(contents(&session), vec!["a``b"]);
        assert_eq!(session.cursor().map(|c| c.offset), Some(2));
    }

    #[test]
    fn missing_cursor_is_rejected() {
        let session = Session::from_markdown("a");
        assert_eq!(session.apply(Cmd::DeleteBackward), Err(EditError::NoCursor));
    }

    #[test]
    fn stale_cursor_is_rejected() {
        let mut session = Session::from_markdown("a");
        let gone = NodeId::new();
        session.focus(TreeCursor::at(gone, 0));
        assert_eq!(session.edit(insert("x")), Err(EditError::StaleCursor(gone)));
        assert_eq!(session.to_markdown(), "a\n");
    }

    #[test]
    fn cell_address_outside_the_table_is_stale() {
        let mut session = Session::from_markdown("| a |\n| --- |");
        let table = id(&session, 0);
        session.focus(TreeCursor::in_cell(table, 4, 0, 0));
        assert_eq!(
            session.apply(insert("x")),
            Err(EditError::StaleCursor(table))
        );
    }

    #[test]
    fn backspace_at_cell_start_is_a_no_op() {
        let mut session = Session::from_markdown("| a |\n| --- |");
        let before = session.tree().clone();
        session.focus(TreeCursor::in_cell(id(&session, 0), 0, 0, 0));
        let patch = session.apply(Cmd::DeleteBackward).unwrap();
        assert_eq!(patch.tree, before);
        assert!(patch.changed.is_empty());
    }

    #[test]
    fn empty_document_has_a_paragraph() {
        let session = Session::from_markdown("");
        assert_eq!(session.tree().len(), 1);
        assert_eq!(session.tree().nodes()[0].kind, NodeKind::Paragraph);
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        assert!(Session::from_bytes(&[0xff, 0xfe]).is_err());
    }

    #[test]
    fn cursor_round_trips_through_a_surface() {
        let session = focused("a **b** c", 0, 7);
        let mut surface = ProjectedSurface::build(session.tree(), session.view());
        assert!(session.place_on(&mut surface));

        let mut reader = Session::from_markdown("unrelated");
        reader.install(Patch {
            tree: session.tree().clone(),
            cursor: TreeCursor::at(id(&session, 0), 0),
            changed: Vec::new(),
            version: 1,
        });
        assert!(reader.sync_from_surface(&surface));
        assert_eq!(reader.cursor(), session.cursor());
    }
}
