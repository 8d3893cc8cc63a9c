use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use super::table::Table;

/// Stable identity of a node, assigned once and never reused.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        NodeId(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NodeId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(NodeId(Uuid::parse_str(s)?))
    }
}

/// List marker variants, each carrying what it needs to serialize itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListMarker {
    /// `-`, `*` or `+`
    Bullet(char),
    /// `1.` or `1)`
    Ordered { number: u64, delimiter: char },
    /// `- [ ]` / `- [x]`
    Checklist { bullet: char, checked: bool },
}

impl ListMarker {
    /// Marker text as written before the content, without the separating space.
    pub fn text(&self) -> String {
        match self {
            ListMarker::Bullet(c) => c.to_string(),
            ListMarker::Ordered { number, delimiter } => format!("{number}{delimiter}"),
            ListMarker::Checklist { bullet, checked } => {
                format!("{bullet} [{}]", if *checked { 'x' } else { ' ' })
            }
        }
    }

    pub fn is_ordered(&self) -> bool {
        matches!(self, ListMarker::Ordered { .. })
    }
}

/// Closed set of block node types with their per-type attributes.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Paragraph,
    Heading {
        level: u8,
    },
    ListItem {
        marker: ListMarker,
        /// Nesting depth in units of the tree's indent style.
        indent: usize,
    },
    BlockQuote,
    CodeBlock {
        language: String,
        /// Opening fence as written (```` ``` ````, `~~~~`, ...)
        fence: String,
    },
    Table(Table),
    Image {
        alt: String,
        url: String,
    },
    HorizontalRule {
        marker: char,
    },
    HtmlBlock {
        /// The opening tag line, e.g. `<div class="note">`
        opening: String,
        /// The closing tag line, e.g. `</div>`
        closing: String,
    },
}

impl NodeKind {
    /// Whether the node's content is inline markup (tokenized and mapped).
    pub fn supports_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::Paragraph
                | NodeKind::Heading { .. }
                | NodeKind::ListItem { .. }
                | NodeKind::BlockQuote
                | NodeKind::HtmlBlock { .. }
        )
    }

    /// Nodes whose content is never edited as text.
    pub fn is_atomic(&self) -> bool {
        matches!(self, NodeKind::Image { .. } | NodeKind::HorizontalRule { .. })
    }

    pub fn is_list_item(&self) -> bool {
        matches!(self, NodeKind::ListItem { .. })
    }

    /// Short tag used in logs and rendered projections.
    pub fn name(&self) -> &'static str {
        match self {
            NodeKind::Paragraph => "paragraph",
            NodeKind::Heading { .. } => "heading",
            NodeKind::ListItem { marker, .. } => match marker {
                ListMarker::Bullet(_) => "bullet-item",
                ListMarker::Ordered { .. } => "ordered-item",
                ListMarker::Checklist { .. } => "checklist-item",
            },
            NodeKind::BlockQuote => "blockquote",
            NodeKind::CodeBlock { .. } => "code-block",
            NodeKind::Table(_) => "table",
            NodeKind::Image { .. } => "image",
            NodeKind::HorizontalRule { .. } => "horizontal-rule",
            NodeKind::HtmlBlock { .. } => "html-block",
        }
    }
}

/// Target of a block-type conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockType {
    Paragraph,
    Heading(u8),
    BulletItem,
    OrderedItem,
    ChecklistItem,
    BlockQuote,
    CodeBlock,
}

/// A block node: identity, type and the raw content it owns.
///
/// `content` excludes wrapper syntax the kind can reconstruct (heading
/// hashes, list markers, quote prefixes, code fences, tag lines).
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub content: String,
}

impl Node {
    pub fn new(kind: NodeKind, content: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            kind,
            content: content.into(),
        }
    }

    pub fn paragraph(content: impl Into<String>) -> Self {
        Self::new(NodeKind::Paragraph, content)
    }

    /// Content length in characters.
    pub fn len(&self) -> usize {
        self.content.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
