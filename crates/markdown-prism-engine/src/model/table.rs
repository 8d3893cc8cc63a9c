/// Column alignment from a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl Alignment {
    /// Parses one delimiter-row cell such as `:---:`.
    pub fn from_cell(cell: &str) -> Option<Alignment> {
        let t = cell.trim();
        let left = t.starts_with(':');
        let right = t.ends_with(':') && t.len() > 1;
        let dashes = t.trim_start_matches(':').trim_end_matches(':');
        if dashes.is_empty() || !dashes.chars().all(|c| c == '-') {
            return None;
        }
        Some(match (left, right) {
            (true, true) => Alignment::Center,
            (true, false) => Alignment::Left,
            (false, true) => Alignment::Right,
            (false, false) => Alignment::None,
        })
    }

    pub fn delimiter(&self) -> &'static str {
        match self {
            Alignment::None => "---",
            Alignment::Left => ":---",
            Alignment::Center => ":---:",
            Alignment::Right => "---:",
        }
    }
}

/// Table payload. Row 0 is the header row; every row has one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub alignments: Vec<Alignment>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn columns(&self) -> usize {
        self.alignments.len()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&String> {
        self.rows.get(row)?.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut String> {
        self.rows.get_mut(row)?.get_mut(col)
    }

    /// Inserts an empty row after `row`, returning the new row's index.
    pub fn insert_row_after(&mut self, row: usize) -> usize {
        let at = (row + 1).min(self.rows.len());
        self.rows.insert(at, vec![String::new(); self.columns()]);
        at
    }
}
