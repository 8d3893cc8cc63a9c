/// A cursor for character-by-character inline scanning with position tracking.
///
/// Operates over the decoded characters of one node's content; positions are
/// character offsets into that content.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The characters being scanned.
    pub chars: &'a [char],
    /// Current index into `chars`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `chars`.
    pub fn new(chars: &'a [char]) -> Self {
        Self { chars, i: 0 }
    }

    /// Returns the current offset.
    pub fn pos(&self) -> usize {
        self.i
    }

    /// Returns true if at end of input.
    pub fn eof(&self) -> bool {
        self.i >= self.chars.len()
    }

    /// Peeks at the current character without advancing.
    pub fn peek(&self) -> Option<char> {
        self.chars.get(self.i).copied()
    }

    /// Peeks `n` characters ahead of the current one.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.chars.get(self.i + n).copied()
    }

    /// Checks if the remaining input starts with the given pattern.
    pub fn starts_with(&self, pat: &str) -> bool {
        let mut j = self.i;
        for c in pat.chars() {
            if self.chars.get(j) != Some(&c) {
                return false;
            }
            j += 1;
        }
        true
    }

    /// Advances by one character, returning the consumed character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.i).copied()?;
        self.i += 1;
        Some(c)
    }

    /// Advances by `n` characters.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }

    /// Length of the run of `c` starting at the current position.
    pub fn run_len(&self, c: char) -> usize {
        self.chars[self.i.min(self.chars.len())..]
            .iter()
            .take_while(|&&x| x == c)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn cursor_basics() {
        let input = chars("hello");
        let mut cur = Cursor::new(&input);
        assert_eq!(cur.pos(), 0);
        assert!(!cur.eof());
        assert_eq!(cur.peek(), Some('h'));
        assert_eq!(cur.bump(), Some('h'));
        assert_eq!(cur.pos(), 1);
    }

    #[test]
    fn cursor_starts_with() {
        let input = chars("![alt](src)");
        let cur = Cursor::new(&input);
        assert!(cur.starts_with("!["));
        assert!(!cur.starts_with("]("));
    }

    #[test]
    fn empty_input() {
        let input = chars("");
        let cur = Cursor::new(&input);
        assert!(cur.eof());
        assert_eq!(cur.peek(), None);
        assert_eq!(cur.run_len('*'), 0);
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let input = chars("ab");
        let mut cur = Cursor::new(&input);
        assert!(!cur.starts_with("abcdef"));
        cur.bump();
        assert!(!cur.starts_with("bc"));
        assert!(cur.starts_with("b"));
    }

    #[test]
    fn run_len_counts_repeated_chars() {
        let input = chars("***x");
        let mut cur = Cursor::new(&input);
        assert_eq!(cur.run_len('*'), 3);
        cur.bump_n(3);
        assert_eq!(cur.run_len('*'), 0);
    }

    #[test]
    fn multibyte_characters_count_once() {
        let input = chars("é*");
        let mut cur = Cursor::new(&input);
        assert_eq!(cur.bump(), Some('é'));
        assert_eq!(cur.pos(), 1);
        assert_eq!(cur.peek(), Some('*'));
    }
}
