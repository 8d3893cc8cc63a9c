/// Blockquote block type with owned delimiter constant.
///
/// One level of `>` per node; nested quote markers stay in the content.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix character.
    pub const PREFIX: char = '>';

    /// Strips one `>` and an optional following space.
    ///
    /// Returns `None` when the line is not a quote line.
    pub fn strip_prefix(line: &str) -> Option<&str> {
        let rest = line.strip_prefix(Self::PREFIX)?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }

    /// The line as written for quote content `line`.
    pub fn prefixed(line: &str) -> String {
        if line.is_empty() {
            Self::PREFIX.to_string()
        } else {
            format!("{} {line}", Self::PREFIX)
        }
    }
}
