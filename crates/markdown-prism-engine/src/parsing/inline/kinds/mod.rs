//! # Inline Kinds
//!
//! Inline-specific types that own their syntax delimiters.
//!
//! ## Types
//!
//! - **`CodeSpan`**: `TICK` - raw zone that suppresses other parsing
//! - **`Image`** / **`Link`**: bracket syntax, `OPEN`, `MID`, `CLOSE`
//! - **`HtmlTag`**: tag boundary scanning and void element list
//! - **`MarkerRun`**: emphasis/strong/strike/sub/sup run splitting and flanking
//!
//! ## Design Principle
//!
//! All delimiter constants live here, not scattered in tokenizer code.

pub mod brackets;
pub mod code_span;
pub mod html_tag;
pub mod marker_run;

pub use brackets::{Image, Link};
pub use code_span::CodeSpan;
pub use html_tag::HtmlTag;
pub use marker_run::{Flank, MarkerRun};
