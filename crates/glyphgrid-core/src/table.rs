//! Table output types.

use crate::columns::ColumnBoundaries;
use crate::script::{Script, TextDirection};

/// One cell of a reconstructed table.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    /// Cell text. Empty for a blank cell.
    pub text: String,
    /// Largest font size of the glyphs placed in the cell.
    pub font_size: f64,
    /// Whether the first glyph placed in the cell was bold.
    pub is_bold: bool,
    /// Font family for export. Before resolution, the first glyph's face name.
    pub font_name: String,
    /// Detected writing system.
    pub language: Script,
    /// Base text direction.
    pub direction: TextDirection,
}

impl Cell {
    /// Create a cell holding `text` with default styling.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns true if the cell holds no visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A rectangular table: every row has exactly one cell per column.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Table {
    /// Column start positions, left to right.
    pub columns: ColumnBoundaries,
    /// Rows, top to bottom.
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns true if every row has one cell per column.
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|row| row.len() == width)
    }

    /// Cell at `(row, column)`, if present.
    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.get(column))
    }

    /// Drop rows in which every cell is blank.
    pub fn retain_filled_rows(&mut self) {
        self.rows.retain(|row| row.iter().any(|cell| !cell.is_blank()));
    }

    /// Cell texts as a grid of strings.
    pub fn text_grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.text.clone()).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Table {
        Table {
            columns: ColumnBoundaries::new(vec![100.0, 250.0], 2.0),
            rows: vec![
                vec![Cell::new("Name"), Cell::new("Age")],
                vec![Cell::new("Alice"), Cell::new("")],
            ],
        }
    }

    #[test]
    fn counts_and_lookup() {
        let t = table();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.column_count(), 2);
        assert!(t.is_rectangular());
        assert_eq!(t.cell(1, 0).map(|c| c.text.as_str()), Some("Alice"));
        assert!(t.cell(2, 0).is_none());
    }

    #[test]
    fn text_grid_mirrors_rows() {
        assert_eq!(
            table().text_grid(),
            vec![vec!["Name", "Age"], vec!["Alice", ""]]
        );
    }

    #[test]
    fn ragged_rows_are_detected() {
        let mut t = table();
        t.rows[1].pop();
        assert!(!t.is_rectangular());
    }

    #[test]
    fn retain_filled_rows_drops_all_blank_rows() {
        let mut t = table();
        t.rows.push(vec![Cell::new(""), Cell::new(" ")]);
        t.retain_filled_rows();
        assert_eq!(t.row_count(), 2);
        assert_eq!(t.rows[1][0].text, "Alice");
    }

    #[test]
    fn blank_cells() {
        assert!(Cell::new("  ").is_blank());
        assert!(Cell::default().is_blank());
        assert!(!Cell::new("x").is_blank());
    }
}
