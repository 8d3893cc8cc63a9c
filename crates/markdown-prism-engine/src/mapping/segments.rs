use crate::parsing::{
    inline::{Token, TokenKind},
    span::Span,
};

/// How a raw segment appears in the rendered projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// Shown character for character.
    Visible,
    /// Not shown at all. `closing` marks the closing half of a pair.
    Hidden { closing: bool },
    /// Shown as exactly one unit (images).
    Atomic,
}

/// A run of raw content with a single rendering behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub raw: Span,
    pub kind: SegmentKind,
}

impl Segment {
    pub fn rendered_len(&self) -> usize {
        match self.kind {
            SegmentKind::Visible => self.raw.len(),
            SegmentKind::Hidden { .. } => 0,
            SegmentKind::Atomic => 1,
        }
    }
}

/// Builds the segment table for a token stream.
///
/// Segments are contiguous, non-empty and cover exactly the tokens' spans.
/// Adjacent visible segments are merged.
pub fn build(tokens: &[Token]) -> Vec<Segment> {
    let mut out: Vec<Segment> = Vec::with_capacity(tokens.len());
    let mut push = |raw: Span, kind: SegmentKind| {
        if raw.is_empty() {
            return;
        }
        if let Some(last) = out.last_mut()
            && kind == SegmentKind::Visible
            && last.kind == SegmentKind::Visible
            && last.raw.end == raw.start
        {
            last.raw.end = raw.end;
            return;
        }
        out.push(Segment { raw, kind });
    };

    for token in tokens {
        let sp = token.span;
        match &token.kind {
            TokenKind::Text => push(sp, SegmentKind::Visible),
            TokenKind::CodeSpan { fence } => {
                push(
                    Span::new(sp.start, sp.start + fence),
                    SegmentKind::Hidden { closing: false },
                );
                push(
                    Span::new(sp.start + fence, sp.end - fence),
                    SegmentKind::Visible,
                );
                push(
                    Span::new(sp.end - fence, sp.end),
                    SegmentKind::Hidden { closing: true },
                );
            }
            TokenKind::Image => push(sp, SegmentKind::Atomic),
            TokenKind::Delimiter { .. } | TokenKind::HtmlTag { .. } => {
                if token.is_hidden_marker() {
                    push(
                        sp,
                        SegmentKind::Hidden {
                            closing: token.is_matched_closer(),
                        },
                    );
                } else {
                    push(sp, SegmentKind::Visible);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::tokenize;

    #[test]
    fn segments_cover_content_contiguously() {
        let content = "a **b** `c` ![d](e) <i>f</i> *g";
        let segs = build(&tokenize(content));
        let mut at = 0;
        for seg in &segs {
            assert_eq!(seg.raw.start, at, "gap before {seg:?}");
            assert!(!seg.raw.is_empty());
            at = seg.raw.end;
        }
        assert_eq!(at, content.chars().count());
    }

    #[test]
    fn unmatched_marker_merges_with_text() {
        let segs = build(&tokenize("this is a *"));
        assert_eq!(
            segs,
            vec![Segment {
                raw: Span::new(0, 11),
                kind: SegmentKind::Visible
            }]
        );
    }

    #[test]
    fn code_span_fences_are_hidden() {
        let segs = build(&tokenize("``x``"));
        let kinds: Vec<SegmentKind> = segs.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Hidden { closing: false },
                SegmentKind::Visible,
                SegmentKind::Hidden { closing: true }
            ]
        );
    }
}
