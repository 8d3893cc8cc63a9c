//! # Document Model
//!
//! The tree is the single source of truth: an ordered sequence of block
//! nodes, each with a stable [`NodeId`], a closed [`NodeKind`] tag with its
//! per-kind attributes, and the raw content the node owns.
//!
//! - **`node`**: `NodeId`, `Node`, `NodeKind`, `ListMarker`, `BlockType`
//! - **`table`**: `Table` cells and column alignment
//! - **`tree`**: `Tree` lookup, mutation and list renumbering
//! - **`indent`**: `IndentStyle` detection for list nesting

pub mod indent;
pub mod node;
pub mod table;
pub mod tree;

pub use indent::IndentStyle;
pub use node::{BlockType, ListMarker, Node, NodeId, NodeKind};
pub use table::{Alignment, Table};
pub use tree::Tree;
