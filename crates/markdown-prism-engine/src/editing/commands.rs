use crate::{
    model::BlockType,
    parsing::inline::Family,
};

use super::inline::PairKind;

/// Inline formats that can be toggled on a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bold,
    Italic,
    Strike,
    Code,
    Subscript,
    Superscript,
}

impl Format {
    /// The marker written on each side when wrapping.
    pub fn marker(&self) -> &'static str {
        match self {
            Format::Bold => "**",
            Format::Italic => "*",
            Format::Strike => "~~",
            Format::Code => "`",
            Format::Subscript => "~",
            Format::Superscript => "^",
        }
    }

    /// Whether an existing pair already applies this format.
    pub fn matches(&self, kind: &PairKind) -> bool {
        match kind {
            PairKind::Marker(family) => matches!(
                (self, family),
                (Format::Bold, Family::Strong(_))
                    | (Format::Italic, Family::Emphasis(_))
                    | (Format::Strike, Family::Strike)
                    | (Format::Subscript, Family::Subscript)
                    | (Format::Superscript, Family::Superscript)
            ),
            PairKind::Code => *self == Format::Code,
            PairKind::Tag(name) => matches!(
                (self, name.as_str()),
                (Format::Bold, "b" | "strong")
                    | (Format::Italic, "i" | "em")
                    | (Format::Strike, "s" | "del" | "strike")
                    | (Format::Code, "code")
                    | (Format::Subscript, "sub")
                    | (Format::Superscript, "sup")
            ),
        }
    }
}

/// Commands that can be applied to a session.
///
/// Every command acts at the session's cursor; a non-collapsed range is
/// deleted first by the commands that replace a selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    InsertText { text: String },
    DeleteBackward,
    DeleteForward,
    Split,
    MergeWithPrevious,
    ConvertBlock { to: BlockType },
    ReplaceRange { text: String },
    Paste { text: String },
    ToggleFormat { format: Format },
    Indent,
    Outdent,
    ToggleChecked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_matches_both_strong_spellings() {
        assert!(Format::Bold.matches(&PairKind::Marker(Family::Strong('_'))));
        assert!(Format::Bold.matches(&PairKind::Tag("strong".into())));
        assert!(!Format::Bold.matches(&PairKind::Marker(Family::Emphasis('*'))));
    }

    #[test]
    fn subscript_is_single_tilde() {
        assert_eq!(Format::Subscript.marker(), "~");
        assert!(Format::Subscript.matches(&PairKind::Tag("sub".into())));
        assert!(!Format::Strike.matches(&PairKind::Marker(Family::Subscript)));
    }
}
