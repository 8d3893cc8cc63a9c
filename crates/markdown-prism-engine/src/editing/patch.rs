use crate::{model::NodeId, model::Tree, selection::TreeCursor};

/// Result of applying a command: the new tree and where the caret goes.
///
/// Nothing is installed until the caller hands the patch to
/// [`Session::install`](super::Session::install).
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    pub tree: Tree,
    pub cursor: TreeCursor,
    /// Nodes inserted, removed or modified, in the order they were touched.
    pub changed: Vec<NodeId>,
    /// Session version the patch produces once installed.
    pub version: u64,
}
