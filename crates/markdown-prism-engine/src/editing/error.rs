use crate::model::NodeId;

/// Why an edit was rejected. A rejected edit leaves the session untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    #[error("No cursor: nothing is focused")]
    NoCursor,
    #[error("Stale cursor: node {0} is not in the tree")]
    StaleCursor(NodeId),
    #[error("Unsupported: {0}")]
    Unsupported(&'static str),
    #[error("Not editable: {0} nodes have no text content")]
    NotEditable(&'static str),
}
