//! Tree coordinates for the caret and selection.
//!
//! Offsets are raw character offsets into the addressed text: the node's
//! content, a table cell, or an HTML block's tag line.

use crate::model::{NodeId, Tree};

/// Which of an HTML block's two tag lines a cursor sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagPart {
    Opening,
    Closing,
}

/// A table cell; row 0 is the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellAddress {
    pub row: usize,
    pub col: usize,
}

/// Which projection the display shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Matched inline markers hidden and replaced by styling.
    #[default]
    Rendered,
    /// Literal source: markers visible, mapping is the identity.
    Source,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Rendered => ViewMode::Source,
            ViewMode::Source => ViewMode::Rendered,
        }
    }
}

/// The authoritative caret position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeCursor {
    pub node: NodeId,
    pub offset: usize,
    pub cell: Option<CellAddress>,
    pub tag: Option<TagPart>,
}

impl TreeCursor {
    pub fn at(node: NodeId, offset: usize) -> Self {
        Self {
            node,
            offset,
            cell: None,
            tag: None,
        }
    }

    pub fn in_cell(node: NodeId, row: usize, col: usize, offset: usize) -> Self {
        Self {
            cell: Some(CellAddress { row, col }),
            ..Self::at(node, offset)
        }
    }

    pub fn on_tag(node: NodeId, part: TagPart, offset: usize) -> Self {
        Self {
            tag: Some(part),
            ..Self::at(node, offset)
        }
    }

    pub fn point(&self) -> TreePoint {
        TreePoint {
            node: self.node,
            offset: self.offset,
        }
    }
}

/// One endpoint of a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreePoint {
    pub node: NodeId,
    pub offset: usize,
}

/// A non-collapsed selection, possibly spanning nodes.
///
/// `anchor` is where the selection started, `focus` where it ends; either
/// may come first in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeRange {
    pub anchor: TreePoint,
    pub focus: TreePoint,
}

impl TreeRange {
    /// Returns `None` for a collapsed pair.
    pub fn new(anchor: TreePoint, focus: TreePoint) -> Option<Self> {
        (anchor != focus).then_some(Self { anchor, focus })
    }

    /// Endpoints in document order, or `None` if either node is missing.
    pub fn ordered(&self, tree: &Tree) -> Option<(TreePoint, TreePoint)> {
        let a = (tree.index_of(self.anchor.node)?, self.anchor.offset);
        let f = (tree.index_of(self.focus.node)?, self.focus.offset);
        if a <= f {
            Some((self.anchor, self.focus))
        } else {
            Some((self.focus, self.anchor))
        }
    }

    pub fn is_within_one_node(&self) -> bool {
        self.anchor.node == self.focus.node
    }
}
