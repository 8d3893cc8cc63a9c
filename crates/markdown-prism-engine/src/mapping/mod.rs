//! # Offset Mapper
//!
//! Pure translation between raw offsets (positions in a node's literal
//! content, markers included) and rendered offsets (positions in the text a
//! reader sees once matched markers are hidden).
//!
//! The mapping is built from a segment table derived from the token stream:
//!
//! | token                 | segment(s)                          |
//! |-----------------------|-------------------------------------|
//! | text, unmatched marker| visible, 1:1                        |
//! | code span             | hidden fence, visible body, hidden fence |
//! | image                 | atomic, one rendered unit           |
//! | matched marker / tag  | hidden, zero rendered width         |
//!
//! ## Boundary convention
//!
//! Where several raw offsets produce the same rendered offset (around hidden
//! segments), [`OffsetMap::rendered_to_raw`] returns the *earliest* one.
//! [`OffsetMap::rendered_to_raw_forward`] starts from that same answer and
//! steps over closing hidden segments, which is the affinity the
//! synchronizer uses when reading a caret from the display.

mod segments;

pub use segments::{Segment, SegmentKind};

use crate::parsing::{inline::tokenize, span::Span};

/// Rendered stand-in for an image: one position unit.
pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

/// Bidirectional offset mapping for one piece of content.
///
/// Construct it, use it, drop it: the map is derived from content and must
/// not outlive an edit to that content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetMap {
    segments: Vec<Segment>,
    raw_len: usize,
    rendered_len: usize,
}

impl OffsetMap {
    /// Map for content rendered with inline formatting.
    pub fn new(content: &str) -> Self {
        Self::from_segments(segments::build(&tokenize(content)))
    }

    /// Identity map for content shown literally (source view, code blocks).
    pub fn identity(content: &str) -> Self {
        let len = content.chars().count();
        let segments = if len == 0 {
            Vec::new()
        } else {
            vec![Segment {
                raw: Span::new(0, len),
                kind: SegmentKind::Visible,
            }]
        };
        Self::from_segments(segments)
    }

    fn from_segments(segments: Vec<Segment>) -> Self {
        let raw_len = segments.last().map_or(0, |s| s.raw.end);
        let rendered_len = segments.iter().map(Segment::rendered_len).sum();
        Self {
            segments,
            raw_len,
            rendered_len,
        }
    }

    pub fn raw_len(&self) -> usize {
        self.raw_len
    }

    pub fn rendered_len(&self) -> usize {
        self.rendered_len
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Rendered offset for a raw offset, clamping to `[0, raw_len]`.
    ///
    /// Offsets inside a hidden segment map to the rendered position adjacent
    /// to it; offsets strictly inside an image map to the position before
    /// the image unit.
    pub fn raw_to_rendered(&self, raw: usize) -> usize {
        let raw = raw.min(self.raw_len);
        let mut acc = 0;
        for seg in &self.segments {
            if raw <= seg.raw.start {
                break;
            }
            if raw < seg.raw.end {
                return match seg.kind {
                    SegmentKind::Visible => acc + (raw - seg.raw.start),
                    SegmentKind::Hidden { .. } | SegmentKind::Atomic => acc,
                };
            }
            acc += seg.rendered_len();
        }
        acc
    }

    /// The earliest raw offset whose rendered offset is `rendered`, clamping
    /// to `[0, rendered_len]`.
    pub fn rendered_to_raw(&self, rendered: usize) -> usize {
        let rendered = rendered.min(self.rendered_len);
        let mut acc = 0;
        for seg in &self.segments {
            if acc == rendered {
                return seg.raw.start;
            }
            match seg.kind {
                SegmentKind::Visible => {
                    if rendered < acc + seg.raw.len() {
                        return seg.raw.start + (rendered - acc);
                    }
                }
                SegmentKind::Atomic | SegmentKind::Hidden { .. } => {}
            }
            acc += seg.rendered_len();
        }
        self.raw_len
    }

    /// Like [`rendered_to_raw`](Self::rendered_to_raw), then advances past
    /// any closing hidden segments that start at the result.
    ///
    /// A caret shown right after `**bold**` therefore lands after the closing
    /// `**`, so typing continues outside the span. Opening segments are never
    /// skipped: a caret before `**bold**` stays before its opener.
    pub fn rendered_to_raw_forward(&self, rendered: usize) -> usize {
        let mut raw = self.rendered_to_raw(rendered);
        while let Some(seg) = self.segment_starting_at(raw) {
            match seg.kind {
                SegmentKind::Hidden { closing: true } => raw = seg.raw.end,
                _ => break,
            }
        }
        raw
    }

    /// Raw span of the visible unit just before the caret at `raw`, if any.
    ///
    /// An image counts as one unit and yields its whole raw span.
    pub fn visible_unit_before(&self, raw: usize) -> Option<Span> {
        let rendered = self.raw_to_rendered(raw);
        rendered.checked_sub(1).and_then(|p| self.unit_at(p))
    }

    /// Raw span of the visible unit just after the caret at `raw`, if any.
    pub fn visible_unit_after(&self, raw: usize) -> Option<Span> {
        self.unit_at(self.raw_to_rendered(raw))
    }

    /// Raw span of the rendered unit at rendered index `p`.
    fn unit_at(&self, p: usize) -> Option<Span> {
        let mut acc = 0;
        for seg in &self.segments {
            let len = seg.rendered_len();
            if p < acc + len {
                return Some(match seg.kind {
                    SegmentKind::Atomic => seg.raw,
                    _ => {
                        let at = seg.raw.start + (p - acc);
                        Span::new(at, at + 1)
                    }
                });
            }
            acc += len;
        }
        None
    }

    fn segment_starting_at(&self, raw: usize) -> Option<&Segment> {
        self.segments.iter().find(|s| s.raw.start == raw)
    }

    /// The rendered projection of `content`: visible characters in order,
    /// images as [`OBJECT_REPLACEMENT`], hidden markers omitted.
    ///
    /// `content` must be the text this map was built from.
    pub fn render(&self, content: &str) -> String {
        let chars: Vec<char> = content.chars().collect();
        let mut out = String::with_capacity(content.len());
        for seg in &self.segments {
            match seg.kind {
                SegmentKind::Visible => out.extend(&chars[seg.raw.start..seg.raw.end]),
                SegmentKind::Atomic => out.push(OBJECT_REPLACEMENT),
                SegmentKind::Hidden { .. } => {}
            }
        }
        out
    }
}

/// Rendered offset for `raw_offset` in `content`.
pub fn raw_to_rendered(content: &str, raw_offset: usize) -> usize {
    OffsetMap::new(content).raw_to_rendered(raw_offset)
}

/// Earliest raw offset for `rendered_offset` in `content`.
pub fn rendered_to_raw(content: &str, rendered_offset: usize) -> usize {
    OffsetMap::new(content).rendered_to_raw(rendered_offset)
}

/// The text a reader sees for `content`.
pub fn rendered_text(content: &str) -> String {
    OffsetMap::new(content).render(content)
}
