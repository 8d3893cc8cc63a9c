//! # Inline Tokenizer
//!
//! Turns one node's raw content into a flat token sequence and classifies
//! every delimiter as matched (hidden when rendered) or unmatched (literal).
//!
//! ## Modules
//!
//! - **`types`**: `Token`, `TokenKind`, delimiter `Family` and `Side`
//! - **`kinds`**: syntax-owning types (code spans, brackets, HTML tags, marker runs)
//! - **`cursor`**: `Cursor` for character-by-character scanning
//! - **`parser`**: `tokenize()` entry point and the scanning pass
//! - **`pairing`**: stack-discipline pairing pass
//!
//! ## Raw Zone Precedence
//!
//! Code spans and images are checked before markers, so `` `**x**` `` is a
//! single code span and the alt text of an image is never decomposed.
//!
//! Tokens are never cached; call [`tokenize`] again whenever content changes.

pub mod cursor;
pub mod kinds;
pub mod pairing;
pub mod parser;
pub mod types;

pub use parser::tokenize;
pub use types::{Family, Side, TagShape, Token, TokenKind};
