pub mod blocks;
pub mod inline;
pub mod serialize;
pub mod span;

pub use blocks::parse_blocks;
pub use inline::tokenize;
pub use serialize::{block_text, serialize};
