use crate::parsing::span::Span;

/// Which kind of formatting a delimiter belongs to.
///
/// Only delimiters of the same family pair with each other. Emphasis and
/// strong keep their marker character so `*a_` never pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// `*text*` or `_text_`
    Emphasis(char),
    /// `**text**` or `__text__`
    Strong(char),
    /// `~~text~~`
    Strike,
    /// `~text~`
    Subscript,
    /// `^text^`
    Superscript,
    /// `[text](url)`; the opener is `[`, the closer is the whole `](url)` tail.
    Link,
}

/// Opening or closing side of a delimiter or HTML tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Open,
    Close,
}

/// Shape of an HTML tag token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagShape {
    /// `<name attr="...">`
    Open,
    /// `</name>`
    Close,
    /// `<name/>` or a void element such as `<br>`; never pairs.
    SelfClosing,
}

/// The kind of an inline token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Literal text, including backslash escapes.
    Text,
    /// A formatting marker run (or one chunk of a longer run).
    Delimiter { family: Family, side: Side },
    /// A code span; `fence` backticks on each side.
    CodeSpan { fence: usize },
    /// `![alt](src)`, atomic.
    Image,
    /// An HTML tag boundary; `name` is lowercased.
    HtmlTag { name: String, shape: TagShape },
}

/// One token of a node's inline content.
///
/// Tokens are recomputed from content on every call and never stored on a
/// node. `matched` is only meaningful for delimiters and HTML tags; it is
/// `false` for every other kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    pub matched: bool,
}

impl Token {
    pub fn text(span: Span) -> Self {
        Self {
            kind: TokenKind::Text,
            span,
            matched: false,
        }
    }

    /// True for delimiters and HTML tags that were paired and are therefore
    /// hidden in the rendered projection.
    pub fn is_hidden_marker(&self) -> bool {
        self.matched
            && matches!(
                self.kind,
                TokenKind::Delimiter { .. } | TokenKind::HtmlTag { .. }
            )
    }

    /// True for the closing half of a matched pair.
    pub fn is_matched_closer(&self) -> bool {
        self.matched
            && matches!(
                self.kind,
                TokenKind::Delimiter {
                    side: Side::Close,
                    ..
                } | TokenKind::HtmlTag {
                    shape: TagShape::Close,
                    ..
                }
            )
    }
}
