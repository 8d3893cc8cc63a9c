/// Code span inline type with owned delimiter constant.
///
/// Code spans are "raw zones" - no other inline parsing occurs inside them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';

    /// Finds the closing run for an opening run of `fence` backticks that ends
    /// at `from`. Returns the offset where the closing run starts.
    ///
    /// Only a run of exactly `fence` backticks closes; backslashes do not
    /// escape inside code.
    pub fn find_close(chars: &[char], from: usize, fence: usize) -> Option<usize> {
        let mut i = from;
        while i < chars.len() {
            if chars[i] == Self::TICK {
                let run = chars[i..].iter().take_while(|&&c| c == Self::TICK).count();
                if run == fence {
                    return Some(i);
                }
                i += run;
            } else {
                i += 1;
            }
        }
        None
    }

    /// Whether a span body holds nothing but whitespace.
    pub fn is_blank(body: &[char]) -> bool {
        body.iter().all(|c| c.is_whitespace())
    }
}
