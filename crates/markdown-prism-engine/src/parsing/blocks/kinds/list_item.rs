use std::sync::OnceLock;

use regex::Regex;

use crate::model::ListMarker;

/// A list line split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLine<'a> {
    /// Leading whitespace before the marker.
    pub indent: &'a str,
    pub marker: ListMarker,
    pub content: &'a str,
}

/// Bullet, ordered and checklist item syntax.
pub struct ListItemSyntax;

impl ListItemSyntax {
    pub const BULLETS: [char; 3] = ['-', '*', '+'];

    pub fn parse(line: &str) -> Option<ListLine<'_>> {
        static CHECKLIST: OnceLock<Regex> = OnceLock::new();
        static BULLET: OnceLock<Regex> = OnceLock::new();
        static ORDERED: OnceLock<Regex> = OnceLock::new();

        let checklist = CHECKLIST.get_or_init(|| {
            Regex::new(r"^([ \t]*)([-*+]) \[([ xX])\](?: (.*))?$").expect("Invalid checklist regex")
        });
        if let Some(caps) = checklist.captures(line) {
            return Some(ListLine {
                indent: caps.get(1)?.as_str(),
                marker: ListMarker::Checklist {
                    bullet: first_char(caps.get(2)?.as_str())?,
                    checked: caps.get(3)?.as_str() != " ",
                },
                content: caps.get(4).map_or("", |m| m.as_str()),
            });
        }

        let bullet = BULLET.get_or_init(|| {
            Regex::new(r"^([ \t]*)([-*+])(?:[ \t](.*))?$").expect("Invalid bullet regex")
        });
        if let Some(caps) = bullet.captures(line) {
            return Some(ListLine {
                indent: caps.get(1)?.as_str(),
                marker: ListMarker::Bullet(first_char(caps.get(2)?.as_str())?),
                content: caps.get(3).map_or("", |m| m.as_str()),
            });
        }

        let ordered = ORDERED.get_or_init(|| {
            Regex::new(r"^([ \t]*)(\d{1,9})([.)])(?:[ \t](.*))?$").expect("Invalid ordered regex")
        });
        let caps = ordered.captures(line)?;
        Some(ListLine {
            indent: caps.get(1)?.as_str(),
            marker: ListMarker::Ordered {
                number: caps.get(2)?.as_str().parse().ok()?,
                delimiter: first_char(caps.get(3)?.as_str())?,
            },
            content: caps.get(4).map_or("", |m| m.as_str()),
        })
    }

    pub fn is_list_line(line: &str) -> bool {
        Self::parse(line).is_some()
    }
}

fn first_char(s: &str) -> Option<char> {
    s.chars().next()
}
