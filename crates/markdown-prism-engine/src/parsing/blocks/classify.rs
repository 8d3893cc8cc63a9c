use super::open::{BlockOpen, try_open_leaf};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass<'a> {
    /// Line text without its line ending.
    pub text: &'a str,
    /// Whether the line is whitespace only.
    pub is_blank: bool,
    /// The block this line would open at a block boundary.
    pub open: Option<BlockOpen<'a>>,
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    pub fn classify<'a>(&self, line: &'a str) -> LineClass<'a> {
        let text = line.trim_end_matches(['\r', '\n']);
        let is_blank = text.trim().is_empty();
        LineClass {
            text,
            is_blank,
            open: if is_blank { None } else { try_open_leaf(text) },
        }
    }
}
