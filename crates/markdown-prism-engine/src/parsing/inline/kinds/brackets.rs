/// Image syntax `![alt](src)`, tokenized as one atomic unit.
pub struct Image;

impl Image {
    pub const OPEN: &'static str = "![";
}

/// Link syntax `[text](url)`.
pub struct Link;

impl Link {
    pub const OPEN: char = '[';
    pub const MID: &'static str = "](";
    pub const CLOSE: char = ')';

    /// Given the offset of an opening `[`, finds the `](url)` tail.
    ///
    /// Returns `(text_end, tail_end)`: the offset of the `]` and the offset
    /// just past the `)`. Brackets nest inside the text, parentheses nest
    /// inside the destination, backslash escapes are honored, and neither part
    /// may span a line break.
    pub fn scan(chars: &[char], open: usize) -> Option<(usize, usize)> {
        let mut i = open + 1;
        let mut depth = 0usize;
        let text_end = loop {
            match *chars.get(i)? {
                '\\' => i += 2,
                '\n' => return None,
                '[' => {
                    depth += 1;
                    i += 1;
                }
                ']' if depth == 0 => break i,
                ']' => {
                    depth -= 1;
                    i += 1;
                }
                _ => i += 1,
            }
        };
        if chars.get(text_end + 1) != Some(&'(') {
            return None;
        }
        let mut i = text_end + 2;
        let mut parens = 0usize;
        loop {
            match *chars.get(i)? {
                '\\' => i += 2,
                '\n' => return None,
                '(' => {
                    parens += 1;
                    i += 1;
                }
                ')' if parens == 0 => return Some((text_end, i + 1)),
                ')' => {
                    parens -= 1;
                    i += 1;
                }
                _ => i += 1,
            }
        }
    }
}
