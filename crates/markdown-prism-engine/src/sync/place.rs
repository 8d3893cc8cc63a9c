use log::trace;

use crate::{
    model::{NodeKind, Tree},
    selection::{TreeCursor, TreeRange, ViewMode},
};

use super::{DisplaySurface, Region, content_map};

/// Installs a collapsed native selection for `cursor`.
///
/// Offsets past the end of the addressed text are clamped. Returns false
/// (and leaves the surface alone) when the node is not displayed.
pub fn place_cursor<S: DisplaySurface>(
    surface: &mut S,
    tree: &Tree,
    view: ViewMode,
    cursor: &TreeCursor,
) -> bool {
    match locate(surface, tree, view, cursor) {
        Some((el, off)) => {
            surface.set_collapsed(el, off);
            true
        }
        None => {
            trace!("cannot place cursor in {}", cursor.node);
            false
        }
    }
}

/// Installs an extended native selection for `range`.
pub fn place_selection<S: DisplaySurface>(
    surface: &mut S,
    tree: &Tree,
    view: ViewMode,
    range: &TreeRange,
) -> bool {
    let anchor = TreeCursor::at(range.anchor.node, range.anchor.offset);
    let focus = TreeCursor::at(range.focus.node, range.focus.offset);
    match (
        locate(surface, tree, view, &anchor),
        locate(surface, tree, view, &focus),
    ) {
        (Some(a), Some(f)) => {
            surface.set_extended(a, f);
            true
        }
        _ => false,
    }
}

/// The native position showing `cursor`.
fn locate<S: DisplaySurface>(
    surface: &S,
    tree: &Tree,
    view: ViewMode,
    cursor: &TreeCursor,
) -> Option<(S::Element, usize)> {
    let node = tree.get(cursor.node)?;
    let root = surface.node_root(cursor.node)?;

    let literal = |region: Region| {
        let el = surface.find_region(root, region)?;
        Some((el, cursor.offset.min(surface.text_len(el))))
    };

    if let Some(cell) = cursor.cell {
        return literal(Region::Cell {
            row: cell.row,
            col: cell.col,
        });
    }
    if let Some(part) = cursor.tag {
        return literal(Region::Tag(part));
    }

    match &node.kind {
        NodeKind::Image { .. } | NodeKind::HorizontalRule { .. } => Some((root, 0)),
        NodeKind::Table(_) => surface
            .find_region(root, Region::Cell { row: 0, col: 0 })
            .map(|el| (el, 0))
            .or(Some((root, 0))),
        NodeKind::CodeBlock { .. } => literal(Region::Content),
        kind => {
            let el = surface.find_region(root, Region::Content)?;
            let map = content_map(kind, &node.content, view);
            Some((el, map.raw_to_rendered(cursor.offset)))
        }
    }
}
