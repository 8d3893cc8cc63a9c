use log::{debug, trace};

use crate::{
    model::{NodeKind, Tree},
    selection::{TagPart, TreeCursor, TreeRange, ViewMode},
};

use super::{DisplaySurface, Role, content_map};

/// Result of reading the native selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncedSelection {
    /// The caret: the selection's focus end.
    pub cursor: TreeCursor,
    /// `None` when the native selection is collapsed.
    pub range: Option<TreeRange>,
}

/// Reads the native selection and resolves it to tree coordinates.
///
/// Returns `None`, leaving the caller's cursor alone, when the anchor cannot
/// be traced to a node of `tree`. An unresolvable extent collapses the
/// selection at the anchor.
pub fn sync_from_surface<S: DisplaySurface>(
    surface: &S,
    tree: &Tree,
    view: ViewMode,
) -> Option<SyncedSelection> {
    let (anchor_el, anchor_off) = surface.anchor()?;
    let anchor = resolve_point(surface, tree, view, anchor_el, anchor_off)?;

    let focus = surface
        .extent()
        .and_then(|(el, off)| resolve_point(surface, tree, view, el, off))
        .unwrap_or(anchor);

    // Cell and tag positions are not range endpoints.
    let range = if anchor.cell.is_none()
        && anchor.tag.is_none()
        && focus.cell.is_none()
        && focus.tag.is_none()
    {
        TreeRange::new(anchor.point(), focus.point())
    } else {
        None
    };
    let cursor = if range.is_some() { focus } else { anchor };

    debug!(
        "synced cursor {}@{} (range: {})",
        cursor.node,
        cursor.offset,
        range.is_some()
    );
    Some(SyncedSelection { cursor, range })
}

/// Resolves one native position to a tree cursor.
///
/// Walks up from `element` to the node root, remembering the innermost
/// editable region and whether the position sits in a decoration.
pub fn resolve_point<S: DisplaySurface>(
    surface: &S,
    tree: &Tree,
    view: ViewMode,
    element: S::Element,
    offset: usize,
) -> Option<TreeCursor> {
    let mut region: Option<(S::Element, Role)> = None;
    let mut decoration = false;
    let mut current = element;

    let id = loop {
        match surface.role(current) {
            Role::NodeRoot(id) => break id,
            Role::Decoration if region.is_none() => decoration = true,
            role @ (Role::Content | Role::Cell { .. } | Role::Tag(_)) if region.is_none() => {
                region = Some((current, role));
            }
            _ => {}
        }
        let Some(parent) = surface.parent(current) else {
            trace!("selection at {element:?} is not inside a node");
            return None;
        };
        current = parent;
    };

    let Some(node) = tree.get(id) else {
        trace!("selection names node {id} which is not in the tree");
        return None;
    };

    if decoration {
        return Some(TreeCursor::at(id, 0));
    }

    let Some((region_el, role)) = region else {
        return Some(TreeCursor::at(id, 0));
    };
    let shown = surface.offset_in(region_el, element, offset)?;

    let cursor = match (role, &node.kind) {
        (Role::Cell { row, col }, NodeKind::Table(table)) => {
            let len = table.cell(row, col).map_or(0, |c| c.chars().count());
            TreeCursor::in_cell(id, row, col, shown.min(len))
        }
        (Role::Tag(part), NodeKind::HtmlBlock { opening, closing }) => {
            let line = match part {
                TagPart::Opening => opening,
                TagPart::Closing => closing,
            };
            TreeCursor::on_tag(id, part, shown.min(line.chars().count()))
        }
        (Role::Content, kind) => {
            let map = content_map(kind, &node.content, view);
            TreeCursor::at(id, map.rendered_to_raw_forward(shown))
        }
        _ => {
            trace!("region {role:?} does not fit a {} node", node.kind.name());
            return None;
        }
    };
    Some(cursor)
}
