use super::kinds::{
    BlockQuote, CodeFence, FenceOpen, Heading, HtmlBlockSyntax, ImageLine, ListItemSyntax,
    ListLine, TableSyntax, ThematicBreak,
};

/// What a line could open, judged from the line alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockOpen<'a> {
    FencedCode(FenceOpen<'a>),
    Heading { level: u8, content: &'a str },
    ThematicBreak(char),
    ListItem(ListLine<'a>),
    Quote(&'a str),
    Image { alt: &'a str, url: &'a str },
    HtmlOpen(&'a str),
    TableRow,
}

impl BlockOpen<'_> {
    /// Whether this opener ends a running paragraph or list item.
    ///
    /// Images, HTML tag lines and pipe rows only open blocks at a block
    /// boundary; table rows are checked separately since they need the
    /// following delimiter row.
    pub fn interrupts_paragraph(&self) -> bool {
        !matches!(
            self,
            BlockOpen::Image { .. } | BlockOpen::HtmlOpen(_) | BlockOpen::TableRow
        )
    }
}

pub fn try_open_leaf(line: &str) -> Option<BlockOpen<'_>> {
    // Precedence: fence beats everything else, rules beat bullets.
    if let Some(fence) = CodeFence::open(line) {
        return Some(BlockOpen::FencedCode(fence));
    }
    if let Some((level, content)) = Heading::parse(line) {
        return Some(BlockOpen::Heading { level, content });
    }
    if let Some(marker) = ThematicBreak::parse(line) {
        return Some(BlockOpen::ThematicBreak(marker));
    }
    if let Some(item) = ListItemSyntax::parse(line) {
        return Some(BlockOpen::ListItem(item));
    }
    if let Some(rest) = BlockQuote::strip_prefix(line) {
        return Some(BlockOpen::Quote(rest));
    }
    if let Some((alt, url)) = ImageLine::parse(line) {
        return Some(BlockOpen::Image { alt, url });
    }
    if let Some(name) = HtmlBlockSyntax::opening(line) {
        return Some(BlockOpen::HtmlOpen(name));
    }
    if TableSyntax::is_row(line) {
        return Some(BlockOpen::TableRow);
    }
    None
}
