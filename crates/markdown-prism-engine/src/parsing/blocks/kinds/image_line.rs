use std::sync::OnceLock;

use regex::Regex;

/// A line consisting of a single image, which becomes an image node.
pub struct ImageLine;

impl ImageLine {
    /// Returns (alt, url).
    pub fn parse(line: &str) -> Option<(&str, &str)> {
        static IMAGE: OnceLock<Regex> = OnceLock::new();
        let re = IMAGE.get_or_init(|| {
            Regex::new(r"^!\[([^\]]*)\]\(([^)\s]*)\)$").expect("Invalid image regex")
        });
        let caps = re.captures(line)?;
        Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
    }

    pub fn line(alt: &str, url: &str) -> String {
        format!("![{alt}]({url})")
    }
}
