use std::sync::OnceLock;

use regex::Regex;

/// Horizontal rules: three or more `-`, `*` or `_`, optionally spaced.
pub struct ThematicBreak;

impl ThematicBreak {
    /// Returns the rule's marker character.
    pub fn parse(line: &str) -> Option<char> {
        static RULE: OnceLock<Regex> = OnceLock::new();
        let re = RULE.get_or_init(|| {
            Regex::new(r"^(?:(?:-[ \t]*){3,}|(?:\*[ \t]*){3,}|(?:_[ \t]*){3,})$")
                .expect("Invalid thematic break regex")
        });
        if re.is_match(line) {
            line.chars().next()
        } else {
            None
        }
    }

    pub fn line(marker: char) -> String {
        marker.to_string().repeat(3)
    }
}
