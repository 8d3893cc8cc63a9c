use crate::model::{Alignment, Table};

/// Pipe tables: a header row, a delimiter row, then body rows.
pub struct TableSyntax;

impl TableSyntax {
    pub const PIPE: char = '|';

    pub fn is_row(line: &str) -> bool {
        line.trim_start().starts_with(Self::PIPE)
    }

    /// Splits a row on unescaped pipes, dropping the outer pipes and
    /// trimming each cell.
    pub fn split_cells(line: &str) -> Vec<String> {
        let t = line.trim();
        let t = t.strip_prefix(Self::PIPE).unwrap_or(t);
        let mut cells = Vec::new();
        let mut cell = String::new();
        let mut escaped = false;
        for c in t.chars() {
            if c == Self::PIPE && !escaped {
                cells.push(cell.trim().to_string());
                cell.clear();
            } else {
                cell.push(c);
            }
            escaped = c == '\\' && !escaped;
        }
        // Text after the last pipe only forms a cell when non-blank.
        if !cell.trim().is_empty() {
            cells.push(cell.trim().to_string());
        }
        cells
    }

    /// Alignments of a delimiter row, or `None` if `line` is not one.
    pub fn delimiter_row(line: &str) -> Option<Vec<Alignment>> {
        if !Self::is_row(line) {
            return None;
        }
        let cells = Self::split_cells(line);
        if cells.is_empty() {
            return None;
        }
        cells.iter().map(|c| Alignment::from_cell(c)).collect()
    }

    /// Builds a table from a header row, its alignments and body rows.
    /// Rows are padded or truncated to the column count.
    pub fn build(header: &str, alignments: Vec<Alignment>, body: &[&str]) -> Table {
        let columns = alignments.len();
        let normalize = |line: &str| {
            let mut cells = Self::split_cells(line);
            cells.resize(columns, String::new());
            cells
        };
        let mut rows = vec![normalize(header)];
        rows.extend(body.iter().map(|l| normalize(l)));
        Table { alignments, rows }
    }

    pub fn row_line(cells: &[String]) -> String {
        let mut out = String::from("|");
        for cell in cells {
            out.push(' ');
            out.push_str(cell);
            out.push_str(" |");
        }
        out
    }

    pub fn delimiter_line(alignments: &[Alignment]) -> String {
        let mut out = String::from("|");
        for a in alignments {
            out.push(' ');
            out.push_str(a.delimiter());
            out.push_str(" |");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn split_on_unescaped_pipes() {
        assert_eq!(
            TableSyntax::split_cells(r"| a | b \| c |"),
            vec!["a".to_string(), r"b \| c".to_string()]
        );
    }

    #[test]
    fn empty_cells_are_kept() {
        assert_eq!(
            TableSyntax::split_cells("| | x |"),
            vec![String::new(), "x".to_string()]
        );
    }

    #[test]
    fn delimiter_rows() {
        assert_eq!(
            TableSyntax::delimiter_row("| --- | :-: |"),
            Some(vec![Alignment::None, Alignment::Center])
        );
        assert_eq!(TableSyntax::delimiter_row("| a | b |"), None);
    }

    #[test]
    fn build_normalizes_row_width() {
        let t = TableSyntax::build("| a | b |", vec![Alignment::None; 2], &["| 1 |", "| 1 | 2 | 3 |"]);
        assert_eq!(t.rows[1], vec!["1".to_string(), String::new()]);
        assert_eq!(t.rows[2], vec!["1".to_string(), "2".to_string()]);
    }

    #[test]
    fn lines() {
        assert_eq!(
            TableSyntax::row_line(&["a".to_string(), String::new()]),
            "| a |  |"
        );
        assert_eq!(
            TableSyntax::delimiter_line(&[Alignment::Left, Alignment::Right]),
            "| :--- | ---: |"
        );
    }
}
