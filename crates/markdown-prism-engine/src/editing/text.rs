//! Character-offset string helpers. Offsets past the end clamp.

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Byte index of character offset `offset`.
pub fn byte_at(s: &str, offset: usize) -> usize {
    s.char_indices().nth(offset).map_or(s.len(), |(i, _)| i)
}

pub fn slice(s: &str, start: usize, end: usize) -> &str {
    let a = byte_at(s, start);
    let b = byte_at(s, end.max(start));
    &s[a..b]
}

pub fn insert(s: &mut String, offset: usize, text: &str) {
    let at = byte_at(s, offset);
    s.insert_str(at, text);
}

pub fn remove(s: &mut String, start: usize, end: usize) {
    let a = byte_at(s, start);
    let b = byte_at(s, end.max(start));
    s.replace_range(a..b, "");
}

/// Splits at `offset`, returning (before, after).
pub fn split_at(s: &str, offset: usize) -> (&str, &str) {
    s.split_at(byte_at(s, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_characters() {
        let mut s = String::from("héllo");
        insert(&mut s, 2, "X");
        assert_eq!(s, "héXllo");
        remove(&mut s, 1, 3);
        assert_eq!(s, "hllo");
        assert_eq!(slice("héllo", 1, 3), "él");
        assert_eq!(split_at("héllo", 2), ("hé", "llo"));
    }

    #[test]
    fn offsets_clamp() {
        let mut s = String::from("ab");
        insert(&mut s, 10, "c");
        assert_eq!(s, "abc");
        remove(&mut s, 2, 10);
        assert_eq!(s, "ab");
        assert_eq!(slice("ab", 5, 1), "");
    }
}
