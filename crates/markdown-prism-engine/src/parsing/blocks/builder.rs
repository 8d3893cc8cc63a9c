use crate::model::{IndentStyle, Node, NodeKind};

use super::{
    classify::LineClass,
    kinds::{CodeFence, FenceOpen, HtmlBlockSyntax, ListLine, TableSyntax},
    open::BlockOpen,
};

/// Phase 2: assembles classified lines into block nodes.
///
/// Works over the whole line list so tables and HTML blocks can look ahead
/// for their delimiter row or closing tag line.
pub struct BlockBuilder<'a> {
    lines: Vec<LineClass<'a>>,
    style: IndentStyle,
    out: Vec<Node>,
}

impl<'a> BlockBuilder<'a> {
    pub fn new(lines: Vec<LineClass<'a>>, style: IndentStyle) -> Self {
        Self {
            lines,
            style,
            out: vec![],
        }
    }

    pub fn finish(mut self) -> Vec<Node> {
        let mut i = 0;
        while i < self.lines.len() {
            i = self.step(i);
        }
        self.out
    }

    /// Consumes the block starting at line `i`, returning the next line index.
    fn step(&mut self, i: usize) -> usize {
        if self.lines[i].is_blank {
            return i + 1;
        }
        match self.lines[i].open.clone() {
            Some(BlockOpen::FencedCode(fence)) => self.fence(i, fence),
            Some(BlockOpen::Heading { level, content }) => {
                self.emit(NodeKind::Heading { level }, content.to_string());
                i + 1
            }
            Some(BlockOpen::ThematicBreak(marker)) => {
                self.emit(NodeKind::HorizontalRule { marker }, String::new());
                i + 1
            }
            Some(BlockOpen::ListItem(item)) => self.list_item(i, item),
            Some(BlockOpen::Quote(_)) => self.quote(i),
            Some(BlockOpen::Image { alt, url }) => {
                self.emit(
                    NodeKind::Image {
                        alt: alt.to_string(),
                        url: url.to_string(),
                    },
                    String::new(),
                );
                i + 1
            }
            Some(BlockOpen::HtmlOpen(name)) => match self.html_block(i, name) {
                Some(next) => next,
                None => self.paragraph(i),
            },
            Some(BlockOpen::TableRow) if self.is_table_start(i) => self.table(i),
            Some(BlockOpen::TableRow) | None => self.paragraph(i),
        }
    }

    fn emit(&mut self, kind: NodeKind, content: String) {
        self.out.push(Node::new(kind, content));
    }

    /// Whether line `j` ends a running paragraph or list item.
    fn interrupts(&self, j: usize) -> bool {
        let line = &self.lines[j];
        line.is_blank
            || line.open.as_ref().is_some_and(|o| o.interrupts_paragraph())
            || self.is_table_start(j)
    }

    fn is_table_start(&self, i: usize) -> bool {
        matches!(self.lines[i].open, Some(BlockOpen::TableRow))
            && self
                .lines
                .get(i + 1)
                .and_then(|l| TableSyntax::delimiter_row(l.text))
                .is_some()
    }

    /// Index just past the continuation lines following line `i`.
    fn continuation_end(&self, i: usize) -> usize {
        let mut j = i + 1;
        while j < self.lines.len() && !self.interrupts(j) {
            j += 1;
        }
        j
    }

    fn paragraph(&mut self, i: usize) -> usize {
        let end = self.continuation_end(i);
        let content = self.lines[i..end]
            .iter()
            .map(|l| l.text)
            .collect::<Vec<_>>()
            .join("\n");
        self.emit(NodeKind::Paragraph, content);
        end
    }

    fn list_item(&mut self, i: usize, item: ListLine<'a>) -> usize {
        let end = self.continuation_end(i);
        let mut content = item.content.to_string();
        for line in &self.lines[i + 1..end] {
            content.push('\n');
            content.push_str(line.text.trim_start());
        }
        let indent = self.style.calculate_depth(item.indent);
        self.emit(
            NodeKind::ListItem {
                marker: item.marker,
                indent,
            },
            content,
        );
        end
    }

    fn quote(&mut self, i: usize) -> usize {
        let mut parts = Vec::new();
        let mut j = i;
        while let Some(BlockOpen::Quote(rest)) = self.lines.get(j).and_then(|l| l.open.clone()) {
            parts.push(rest);
            j += 1;
        }
        self.emit(NodeKind::BlockQuote, parts.join("\n"));
        j
    }

    /// An unclosed fence runs to the end of the document.
    fn fence(&mut self, i: usize, open: FenceOpen<'a>) -> usize {
        let mut j = i + 1;
        let mut body = Vec::new();
        while j < self.lines.len() && !CodeFence::closes(open.fence, self.lines[j].text) {
            body.push(self.lines[j].text);
            j += 1;
        }
        self.emit(
            NodeKind::CodeBlock {
                language: open.info.to_string(),
                fence: open.fence.to_string(),
            },
            body.join("\n"),
        );
        (j + 1).min(self.lines.len())
    }

    fn table(&mut self, i: usize) -> usize {
        let Some(alignments) = TableSyntax::delimiter_row(self.lines[i + 1].text) else {
            return self.paragraph(i);
        };
        let mut j = i + 2;
        while j < self.lines.len()
            && !self.lines[j].is_blank
            && matches!(self.lines[j].open, Some(BlockOpen::TableRow))
        {
            j += 1;
        }
        let body: Vec<&str> = self.lines[i + 2..j].iter().map(|l| l.text).collect();
        let table = TableSyntax::build(self.lines[i].text, alignments, &body);
        self.emit(NodeKind::Table(table), String::new());
        j
    }

    /// Returns `None` when no closing tag line exists.
    fn html_block(&mut self, i: usize, name: &str) -> Option<usize> {
        let texts: Vec<&str> = self.lines[i..].iter().map(|l| l.text).collect();
        let close = HtmlBlockSyntax::find_close(&texts, name)?;
        let content = texts[1..close].join("\n");
        self.emit(
            NodeKind::HtmlBlock {
                opening: texts[0].trim_end().to_string(),
                closing: texts[close].trim_end().to_string(),
            },
            content,
        );
        Some(i + close + 1)
    }
}
