pub mod editing;
pub mod mapping;
pub mod model;
pub mod parsing;
pub mod projection;
pub mod selection;
pub mod sync;

// Re-export key types for easier usage
pub use editing::{Cmd, EditError, EditOptions, Format, Patch, Session};
pub use mapping::{OffsetMap, raw_to_rendered, rendered_text, rendered_to_raw};
pub use model::{BlockType, IndentStyle, ListMarker, Node, NodeId, NodeKind, Tree};
pub use parsing::{serialize, tokenize};
pub use selection::{CellAddress, TagPart, TreeCursor, TreePoint, TreeRange, ViewMode};
pub use sync::{DisplaySurface, place_cursor, place_selection, sync_from_surface};
