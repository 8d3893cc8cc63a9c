pub mod block_quote;
pub mod code_fence;
pub mod heading;
pub mod html_block;
pub mod image_line;
pub mod list_item;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::{CodeFence, FenceOpen};
pub use heading::Heading;
pub use html_block::HtmlBlockSyntax;
pub use image_line::ImageLine;
pub use list_item::{ListItemSyntax, ListLine};
pub use table::TableSyntax;
pub use thematic_break::ThematicBreak;
