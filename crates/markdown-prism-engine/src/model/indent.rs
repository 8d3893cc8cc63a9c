/// Indentation style detected in the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentStyle {
    Spaces(usize), // Number of spaces per indent level
    Tabs,          // Tab characters
}

impl Default for IndentStyle {
    fn default() -> Self {
        IndentStyle::Spaces(2)
    }
}

impl IndentStyle {
    /// Convert an indentation string to depth level
    pub fn calculate_depth(&self, indent_str: &str) -> usize {
        match self {
            IndentStyle::Tabs => {
                // Count tab characters for depth
                indent_str.chars().take_while(|&c| c == '\t').count()
            }
            IndentStyle::Spaces(spaces_per_level) => {
                let space_count = indent_str.chars().take_while(|&c| c == ' ').count();
                space_count / (*spaces_per_level).max(1)
            }
        }
    }

    /// The indentation string for `depth` levels.
    pub fn indent_string(&self, depth: usize) -> String {
        match self {
            IndentStyle::Tabs => "\t".repeat(depth),
            IndentStyle::Spaces(n) => " ".repeat(n * depth),
        }
    }

    /// Detects the style from the first indented list item line.
    ///
    /// Only list lines count; indentation inside code fences or paragraph
    /// continuations says nothing about nesting. Falls back to two spaces.
    pub fn detect(text: &str) -> IndentStyle {
        let mut in_fence = false;
        for line in text.lines() {
            let trimmed = line.trim_start();
            if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
                in_fence = !in_fence;
                continue;
            }
            if in_fence || !crate::parsing::blocks::kinds::ListItemSyntax::is_list_line(line) {
                continue;
            }
            if line.starts_with('\t') {
                return IndentStyle::Tabs;
            }
            let spaces = line.chars().take_while(|&c| c == ' ').count();
            if spaces > 0 {
                return IndentStyle::Spaces(spaces);
            }
        }
        IndentStyle::default()
    }
}
