use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::inline::kinds::HtmlTag;

/// HTML blocks: an opening tag line, inner lines, and a matching closing line.
pub struct HtmlBlockSyntax;

impl HtmlBlockSyntax {
    /// Tag name of a line consisting only of a non-void opening tag.
    pub fn opening(line: &str) -> Option<&str> {
        static OPEN: OnceLock<Regex> = OnceLock::new();
        let re = OPEN.get_or_init(|| {
            Regex::new(r"^<([A-Za-z][A-Za-z0-9-]*)(?:\s[^<>]*)?>\s*$").expect("Invalid html open regex")
        });
        let caps = re.captures(line)?;
        let name = caps.get(1)?.as_str();
        if line.trim_end().ends_with("/>") || HtmlTag::is_void(name) {
            return None;
        }
        Some(name)
    }

    /// Tag name of a line consisting only of a closing tag.
    pub fn closing(line: &str) -> Option<&str> {
        static CLOSE: OnceLock<Regex> = OnceLock::new();
        let re = CLOSE.get_or_init(|| {
            Regex::new(r"^</([A-Za-z][A-Za-z0-9-]*)\s*>\s*$").expect("Invalid html close regex")
        });
        Some(re.captures(line)?.get(1)?.as_str())
    }

    /// Index of the line closing the block opened at `lines[0]`, honoring
    /// nested blocks of the same tag name.
    pub fn find_close(lines: &[&str], name: &str) -> Option<usize> {
        let mut depth = 0usize;
        for (i, line) in lines.iter().enumerate() {
            if Self::opening(line).is_some_and(|n| n.eq_ignore_ascii_case(name)) {
                depth += 1;
            } else if Self::closing(line).is_some_and(|n| n.eq_ignore_ascii_case(name)) {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i);
                }
            }
        }
        None
    }

    /// Whether a block written as `opening`, `content`, `closing` parses back
    /// as one block with the same content.
    ///
    /// Tag lines that no longer pair by name (mid-edit) are not judged.
    pub fn keeps_shape(opening: &str, closing: &str, content: &str) -> bool {
        let (Some(name), Some(close_name)) = (Self::opening(opening), Self::closing(closing)) else {
            return true;
        };
        if !name.eq_ignore_ascii_case(close_name) {
            return true;
        }
        let mut lines = vec![opening];
        if !content.is_empty() {
            lines.extend(content.split('\n'));
        }
        lines.push(closing);
        Self::find_close(&lines, name) == Some(lines.len() - 1)
    }
}
