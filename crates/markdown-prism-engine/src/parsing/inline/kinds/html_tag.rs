use crate::parsing::inline::types::TagShape;

/// Inline HTML tag boundaries (`<sub>`, `</sub>`, `<br/>`).
pub struct HtmlTag;

/// A recognized tag: where it ends, its lowercased name and its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedTag {
    pub end: usize,
    pub name: String,
    pub shape: TagShape,
}

impl HtmlTag {
    pub const OPEN: char = '<';
    pub const CLOSE: char = '>';

    /// Elements that never take a closing tag.
    pub const VOID: &'static [&'static str] = &[
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
        "track", "wbr",
    ];

    pub fn is_void(name: &str) -> bool {
        Self::VOID.iter().any(|v| v.eq_ignore_ascii_case(name))
    }

    /// Scans a tag starting at `start` (which must hold `<`).
    ///
    /// The name must start with an ASCII letter and be followed by whitespace,
    /// `/` or `>`; so `<http://x>` and `a < b` are not tags. Attributes are
    /// skipped up to the first `>` outside quotes and may not contain a line
    /// break.
    pub fn scan(chars: &[char], start: usize) -> Option<ScannedTag> {
        if chars.get(start) != Some(&Self::OPEN) {
            return None;
        }
        let mut i = start + 1;
        let closing = chars.get(i) == Some(&'/');
        if closing {
            i += 1;
        }
        if !chars.get(i)?.is_ascii_alphabetic() {
            return None;
        }
        let name_start = i;
        while chars
            .get(i)
            .is_some_and(|c| c.is_ascii_alphanumeric() || *c == '-')
        {
            i += 1;
        }
        let name: String = chars[name_start..i]
            .iter()
            .collect::<String>()
            .to_ascii_lowercase();

        match *chars.get(i)? {
            c if c.is_whitespace() && c != '\n' => {}
            '/' | '>' => {}
            _ => return None,
        }

        let mut quote: Option<char> = None;
        let mut self_closing = false;
        loop {
            let c = *chars.get(i)?;
            match (quote, c) {
                (_, '\n') => return None,
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') if !closing => quote = Some(c),
                (None, '>') => break,
                (None, '/') => self_closing = chars.get(i + 1) == Some(&Self::CLOSE),
                (None, _) => self_closing = false,
            }
            i += 1;
        }

        let shape = if closing {
            TagShape::Close
        } else if self_closing || Self::is_void(&name) {
            TagShape::SelfClosing
        } else {
            TagShape::Open
        };
        Some(ScannedTag {
            end: i + 1,
            name,
            shape,
        })
    }
}
