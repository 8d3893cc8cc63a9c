use crate::parsing::inline::types::Family;

/// Runs of emphasis-style marker characters: `*`, `_`, `~`, `^`.
pub struct MarkerRun;

/// Whether a run may open and/or close a span, decided from its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Flank {
    pub can_open: bool,
    pub can_close: bool,
}

impl MarkerRun {
    pub const MARKERS: [char; 4] = ['*', '_', '~', '^'];

    pub fn is_marker(c: char) -> bool {
        Self::MARKERS.contains(&c)
    }

    /// Flanking rules for the run `chars[start..end]`.
    ///
    /// A run opens when followed by non-whitespace and closes when preceded by
    /// non-whitespace, with punctuation on the inner side only allowed when the
    /// outer side is whitespace, punctuation, or the content edge.
    /// Underscores additionally refuse to open or close inside a word, so
    /// `snake_case_name` stays literal.
    pub fn flank(chars: &[char], start: usize, end: usize) -> Flank {
        let before = start.checked_sub(1).and_then(|i| chars.get(i).copied());
        let after = chars.get(end).copied();
        let is_space = |c: Option<char>| c.is_none_or(char::is_whitespace);
        let is_punct = |c: Option<char>| c.is_some_and(|c| c.is_ascii_punctuation());

        let left = !is_space(after) && (!is_punct(after) || is_space(before) || is_punct(before));
        let right = !is_space(before) && (!is_punct(before) || is_space(after) || is_punct(after));

        if chars.get(start) == Some(&'_') {
            Flank {
                can_open: left && (!right || is_punct(before)),
                can_close: right && (!left || is_punct(after)),
            }
        } else {
            Flank {
                can_open: left,
                can_close: right,
            }
        }
    }

    /// Family for a chunk of `len` (1 or 2) copies of `marker`.
    pub fn family(marker: char, len: usize) -> Family {
        match (marker, len) {
            ('~', 1) => Family::Subscript,
            ('~', _) => Family::Strike,
            ('^', _) => Family::Superscript,
            (c, 1) => Family::Emphasis(c),
            (c, _) => Family::Strong(c),
        }
    }

    /// Splits a run of `len` markers into chunk lengths.
    ///
    /// `*`, `_` and `~` split into pairs first with a single remainder
    /// (`***` → 2, 1); `^` always splits into singles. A run that can only
    /// close reverses the order so nested spans close innermost first.
    pub fn chunks(marker: char, len: usize, closing_only: bool) -> Vec<usize> {
        let mut out = Vec::new();
        if marker == '^' {
            out.resize(len, 1);
            return out;
        }
        let mut left = len;
        while left >= 2 {
            out.push(2);
            left -= 2;
        }
        if left == 1 {
            out.push(1);
        }
        if closing_only {
            out.reverse();
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flank(s: &str, start: usize, end: usize) -> Flank {
        let chars: Vec<char> = s.chars().collect();
        MarkerRun::flank(&chars, start, end)
    }

    #[test]
    fn opener_and_closer_around_word() {
        assert_eq!(
            flank("a **b** c", 2, 4),
            Flank {
                can_open: true,
                can_close: false
            }
        );
        assert_eq!(
            flank("a **b** c", 5, 7),
            Flank {
                can_open: false,
                can_close: true
            }
        );
    }

    #[test]
    fn trailing_marker_neither_opens_nor_closes() {
        assert_eq!(flank("this is a *", 10, 11), Flank::default());
    }

    #[test]
    fn intraword_underscore_is_inert() {
        let f = flank("snake_case", 5, 6);
        assert!(!f.can_open);
        assert!(!f.can_close);
    }

    #[test]
    fn intraword_tilde_both_opens_and_closes() {
        let f = flank("H~2~O", 1, 2);
        assert!(f.can_open && f.can_close);
    }

    #[test]
    fn chunking() {
        assert_eq!(MarkerRun::chunks('*', 3, false), vec![2, 1]);
        assert_eq!(MarkerRun::chunks('*', 3, true), vec![1, 2]);
        assert_eq!(MarkerRun::chunks('~', 2, false), vec![2]);
        assert_eq!(MarkerRun::chunks('^', 2, false), vec![1, 1]);
    }

    #[test]
    fn families() {
        assert_eq!(MarkerRun::family('*', 1), Family::Emphasis('*'));
        assert_eq!(MarkerRun::family('_', 2), Family::Strong('_'));
        assert_eq!(MarkerRun::family('~', 1), Family::Subscript);
        assert_eq!(MarkerRun::family('~', 2), Family::Strike);
        assert_eq!(MarkerRun::family('^', 1), Family::Superscript);
    }
}
