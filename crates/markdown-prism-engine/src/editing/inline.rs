//! Edits that must respect inline marker pairs.

use crate::parsing::{
    inline::{Family, Side, TagShape, TokenKind, tokenize},
    span::Span,
};

use super::{commands::Format, text};

/// What a [`MarkerPair`] is made of.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairKind {
    Marker(Family),
    Tag(String),
    Code,
}

/// A matched opener/closer pair, or a code span's two fences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPair {
    pub kind: PairKind,
    pub open: Span,
    pub close: Span,
}

impl MarkerPair {
    /// Raw span strictly between the two markers.
    pub fn inner(&self) -> Span {
        Span::new(self.open.end, self.close.start)
    }
}

/// Matched pairs of `content`, ordered by opener position.
pub fn matched_pairs(content: &str) -> Vec<MarkerPair> {
    let mut open: Vec<(PairKind, Span)> = Vec::new();
    let mut out = Vec::new();

    for token in tokenize(content) {
        let (kind, side) = match &token.kind {
            TokenKind::CodeSpan { fence } => {
                out.push(MarkerPair {
                    kind: PairKind::Code,
                    open: Span::new(token.span.start, token.span.start + fence),
                    close: Span::new(token.span.end - fence, token.span.end),
                });
                continue;
            }
            TokenKind::Delimiter { family, side } if token.matched => {
                (PairKind::Marker(*family), *side)
            }
            TokenKind::HtmlTag { name, shape } if token.matched => (
                PairKind::Tag(name.clone()),
                if *shape == TagShape::Open {
                    Side::Open
                } else {
                    Side::Close
                },
            ),
            _ => continue,
        };
        match side {
            Side::Open => open.push((kind, token.span)),
            Side::Close => {
                if let Some(i) = open.iter().rposition(|(k, _)| *k == kind) {
                    let (kind, span) = open.remove(i);
                    out.push(MarkerPair {
                        kind,
                        open: span,
                        close: token.span,
                    });
                }
            }
        }
    }
    out.sort_by_key(|p| p.open.start);
    out
}

/// Removes the raw span `unit`, then the markers of every pair left
/// enclosing only whitespace by the removal, innermost first.
///
/// Returns the new content and the caret offset where `unit` was.
pub fn delete_pruning_empty(content: &str, unit: Span) -> (String, usize) {
    let chars: Vec<char> = content.chars().collect();
    let mut pairs = matched_pairs(content);
    pairs.sort_by_key(|p| p.inner().len());

    let mut removed = vec![unit];
    let is_removed = |removed: &[Span], i: usize| removed.iter().any(|r| r.start <= i && i < r.end);

    for pair in &pairs {
        let inner = pair.inner();
        if !(inner.start <= unit.start && unit.end <= inner.end) {
            continue;
        }
        let emptied = (inner.start..inner.end)
            .filter(|&i| !is_removed(&removed, i))
            .all(|i| chars[i].is_whitespace());
        if emptied {
            removed.push(pair.open);
            removed.push(pair.close);
        }
    }

    let kept: String = chars
        .iter()
        .enumerate()
        .filter(|(i, _)| !is_removed(&removed, *i))
        .map(|(_, c)| c)
        .collect();
    let caret = unit.start - (0..unit.start).filter(|&i| is_removed(&removed, i)).count();
    (kept, caret)
}

/// Result of splitting inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitContent {
    pub left: String,
    pub right: String,
    /// Caret offset in `right`: just after any reopened markers.
    pub caret: usize,
}

/// Splits `content` at `offset`, closing the spans open there at the end of
/// the left part and reopening them at the start of the right part.
///
/// A split point touching a marker is first moved outside it: right after an
/// opener moves before it, right before a closer moves after it. Whole spans
/// thus travel with their text instead of leaving empty pairs behind.
pub fn split_content(content: &str, offset: usize) -> SplitContent {
    let pairs = matched_pairs(content);
    let mut at = offset.min(text::char_len(content));

    loop {
        let moved = pairs.iter().find_map(|p| {
            if at > p.open.start && at <= p.open.end {
                Some(p.open.start)
            } else if at >= p.close.start && at < p.close.end {
                Some(p.close.end)
            } else {
                None
            }
        });
        match moved {
            Some(next) => at = next,
            None => break,
        }
    }

    let spanning: Vec<&MarkerPair> = pairs
        .iter()
        .filter(|p| p.open.end <= at && at <= p.close.start)
        .collect();

    let (before, after) = text::split_at(content, at);
    let mut left = before.to_string();
    for p in spanning.iter().rev() {
        left.push_str(text::slice(content, p.close.start, p.close.end));
    }
    let mut right = String::new();
    for p in &spanning {
        right.push_str(text::slice(content, p.open.start, p.open.end));
    }
    let caret = text::char_len(&right);
    right.push_str(after);

    SplitContent { left, right, caret }
}

/// Toggles `format` on the raw selection `[start, end)`.
///
/// Removes the markers of a pair of that format that exactly wraps the
/// selection (markers just outside it, or as its first and last characters).
/// Otherwise wraps the selection. A collapsed selection inserts an empty pair,
/// or removes one it sits in the middle of. Returns the new content and the
/// caret offset.
pub fn toggle_format(content: &str, start: usize, end: usize, format: Format) -> (String, usize) {
    let len = text::char_len(content);
    let (start, end) = (start.min(len), end.min(len));
    let marker = format.marker();
    let m = text::char_len(marker);

    if start < end {
        let wrapping = matched_pairs(content).into_iter().find(|p| {
            format.matches(&p.kind)
                && ((p.open.end == start && p.close.start == end)
                    || (p.open.start == start && p.close.end == end))
        });
        if let Some(p) = wrapping {
            let mut out = content.to_string();
            text::remove(&mut out, p.close.start, p.close.end);
            text::remove(&mut out, p.open.start, p.open.end);
            let removed_before_end = p.open.len() + if p.close.end <= end { p.close.len() } else { 0 };
            return (out, end - removed_before_end);
        }
    } else if start >= m
        && text::slice(content, start - m, start) == marker
        && text::slice(content, start, start + m) == marker
    {
        let mut out = content.to_string();
        text::remove(&mut out, start - m, start + m);
        return (out, start - m);
    }

    let mut out = content.to_string();
    text::insert(&mut out, end, marker);
    text::insert(&mut out, start, marker);
    (out, end + m)
}
