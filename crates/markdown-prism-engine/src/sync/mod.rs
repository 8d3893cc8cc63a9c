//! # Cursor/Selection Synchronizer
//!
//! Two-way bridge between a display surface's native selection and tree
//! coordinates.
//!
//! - [`sync_from_surface`] reads the native anchor/extent, walks up to the
//!   enclosing node root and resolves raw offsets ([`resolve_point`]).
//! - [`place_cursor`] / [`place_selection`] go the other way and only touch
//!   the surface.
//!
//! ## Affinity
//!
//! A displayed caret right after formatted text resolves past the closing
//! hidden markers (`**bold**|` is raw offset 8, not 6), via
//! [`OffsetMap::rendered_to_raw_forward`]. Placement uses the plain
//! raw-to-rendered mapping, so placing and re-reading a cursor that already
//! sits past a closer is a no-op.

mod place;
mod resolve;

pub use place::{place_cursor, place_selection};
pub use resolve::{SyncedSelection, resolve_point, sync_from_surface};

use std::fmt::Debug;

use crate::{
    mapping::OffsetMap,
    model::{NodeId, NodeKind},
    selection::{TagPart, ViewMode},
};

/// What a display element stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The element carrying a node's identity attribute.
    NodeRoot(NodeId),
    /// The region showing a node's content.
    Content,
    /// A table cell region.
    Cell { row: usize, col: usize },
    /// One of an HTML block's tag lines.
    Tag(TagPart),
    /// Bullets, checkboxes, heading markers and the like.
    Decoration,
    /// Formatting spans and text inside a region.
    Inline,
}

/// Editable regions a node root can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Content,
    Cell { row: usize, col: usize },
    Tag(TagPart),
}

/// The selection probe/setter of a rendering collaborator.
///
/// Positions are (element, offset) pairs. For an element holding text the
/// offset counts characters; for any other element it counts children, as in
/// a DOM range.
pub trait DisplaySurface {
    type Element: Copy + Eq + Debug;

    fn anchor(&self) -> Option<(Self::Element, usize)>;
    fn extent(&self) -> Option<(Self::Element, usize)>;
    fn parent(&self, element: Self::Element) -> Option<Self::Element>;
    fn role(&self, element: Self::Element) -> Role;

    /// Characters of text inside `container` that precede the position
    /// (`element`, `offset`), or `None` if the position is outside it.
    fn offset_in(
        &self,
        container: Self::Element,
        element: Self::Element,
        offset: usize,
    ) -> Option<usize>;

    fn node_root(&self, id: NodeId) -> Option<Self::Element>;
    fn find_region(&self, root: Self::Element, region: Region) -> Option<Self::Element>;

    /// Characters of text inside `element`.
    fn text_len(&self, element: Self::Element) -> usize;

    /// Collapses the native selection at a character offset within `element`.
    fn set_collapsed(&mut self, element: Self::Element, offset: usize);

    /// Installs an extended native selection; offsets as in `set_collapsed`.
    fn set_extended(&mut self, anchor: (Self::Element, usize), focus: (Self::Element, usize));
}

/// The offset map between a node's content and what the view displays.
///
/// Inline-capable nodes in the rendered view hide their markers; everything
/// else is shown literally.
pub fn content_map(kind: &NodeKind, content: &str, view: ViewMode) -> OffsetMap {
    if view == ViewMode::Rendered && kind.supports_inline() {
        OffsetMap::new(content)
    } else {
        OffsetMap::identity(content)
    }
}
