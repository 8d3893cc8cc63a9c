use std::sync::OnceLock;

use regex::Regex;

/// ATX headings: one to six `#` followed by a space or the end of the line.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: u8 = 6;

    /// Returns (level, content) for a heading line.
    pub fn parse(line: &str) -> Option<(u8, &str)> {
        static HEADING: OnceLock<Regex> = OnceLock::new();
        let re = HEADING
            .get_or_init(|| Regex::new(r"^(#{1,6})(?:[ \t]+(.*))?$").expect("Invalid heading regex"));
        let caps = re.captures(line)?;
        let level = caps.get(1)?.as_str().len() as u8;
        let content = caps.get(2).map_or("", |m| m.as_str());
        Some((level, content))
    }

    pub fn prefix(level: u8) -> String {
        Self::MARKER
            .to_string()
            .repeat(level.clamp(1, Self::MAX_LEVEL) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels() {
        assert_eq!(Heading::parse("# Title"), Some((1, "Title")));
        assert_eq!(Heading::parse("###### six"), Some((6, "six")));
        assert_eq!(Heading::parse("##"), Some((2, "")));
    }

    #[test]
    fn rejects_non_headings() {
        assert_eq!(Heading::parse("####### seven"), None);
        assert_eq!(Heading::parse("#hashtag"), None);
        assert_eq!(Heading::parse(" # indented"), None);
    }
}
