//! Container-independent sheet model.
//!
//! The read path works on a [`Grid`] of typed [`Cell`]s; the write path produces an
//! [`OutputSheet`] of [`CellContent`]s. Decoding and encoding the physical workbook happens in
//! [`crate::codec`].

use std::fmt;

use chrono::NaiveDateTime;

/// Physical type tag of a raw cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    Numeric,
    StringText,
    Boolean,
    Formula,
    Blank,
    Error,
    Unknown,
}

impl fmt::Display for CellType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CellType::Numeric => "Numeric",
            CellType::StringText => "String",
            CellType::Boolean => "Boolean",
            CellType::Formula => "Formula",
            CellType::Blank => "Blank",
            CellType::Error => "Error",
            CellType::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// A raw cell as handed over by the workbook container.
///
/// Date/time cells are numeric: the container delivers them as spreadsheet serial numbers.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Numeric(f64),
    Text(String),
    Boolean(bool),
    /// Formula source text (without evaluation).
    Formula(String),
    Blank,
    /// Error code text such as `#DIV/0!`.
    Error(String),
    /// A cell the container could not classify; carries its raw text.
    Unknown(String),
}

impl Cell {
    /// Physical type of this cell.
    pub fn cell_type(&self) -> CellType {
        match self {
            Cell::Numeric(_) => CellType::Numeric,
            Cell::Text(_) => CellType::StringText,
            Cell::Boolean(_) => CellType::Boolean,
            Cell::Formula(_) => CellType::Formula,
            Cell::Blank => CellType::Blank,
            Cell::Error(_) => CellType::Error,
            Cell::Unknown(_) => CellType::Unknown,
        }
    }

    /// Text representation used for header matching and in diagnostics.
    ///
    /// Numbers render as their shortest decimal form, booleans as `True`/`False`, blanks as the
    /// empty string and formulas as their source.
    pub fn text_value(&self) -> String {
        match self {
            Cell::Numeric(n) => n.to_string(),
            Cell::Text(s) | Cell::Formula(s) | Cell::Error(s) | Cell::Unknown(s) => s.clone(),
            Cell::Boolean(b) => bool_text(*b).to_string(),
            Cell::Blank => String::new(),
        }
    }
}

pub(crate) fn bool_text(b: bool) -> &'static str {
    if b { "True" } else { "False" }
}

/// An in-memory sheet: row 0 is the header, rows may be ragged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grid {
    /// Row-major cell storage.
    pub rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Create a grid from rows.
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    /// The header row (empty when the sheet has no rows).
    pub fn header(&self) -> &[Cell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Data rows with their sheet row index (the first data row has index 1).
    pub fn data_rows(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.rows
            .iter()
            .enumerate()
            .skip(1)
            .map(|(idx, row)| (idx, row.as_slice()))
    }

    /// Number of data rows (excluding the header).
    pub fn data_row_count(&self) -> usize {
        self.rows.len().saturating_sub(1)
    }
}

/// Content of one written cell.
#[derive(Debug, Clone, PartialEq)]
pub enum CellContent {
    /// Native numeric cell.
    Number(f64),
    /// Text cell.
    Text(String),
    /// Native date/time cell.
    DateTime(NaiveDateTime),
}

/// The write-side sheet: header texts plus data rows.
///
/// `None` in a data row means the cell is left untouched (no value is written at all).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputSheet {
    /// Header texts in column order.
    pub header: Vec<String>,
    /// One entry per record, one slot per column.
    pub rows: Vec<Vec<Option<CellContent>>>,
}

#[cfg(test)]
mod tests {
    use super::{Cell, CellType, Grid};

    #[test]
    fn text_value_renders_every_physical_type() {
        assert_eq!(Cell::Numeric(42.0).text_value(), "42");
        assert_eq!(Cell::Numeric(1.5).text_value(), "1.5");
        assert_eq!(Cell::Boolean(true).text_value(), "True");
        assert_eq!(Cell::Blank.text_value(), "");
        assert_eq!(Cell::Formula("SUM(A1:A3)".into()).text_value(), "SUM(A1:A3)");
        assert_eq!(Cell::Error("#N/A".into()).text_value(), "#N/A");
        assert_eq!(Cell::Text("x".into()).cell_type(), CellType::StringText);
    }

    #[test]
    fn data_rows_start_at_sheet_row_one() {
        let grid = Grid::new(vec![
            vec![Cell::Text("h".into())],
            vec![Cell::Numeric(1.0)],
            vec![Cell::Numeric(2.0)],
        ]);
        let idxs: Vec<usize> = grid.data_rows().map(|(i, _)| i).collect();
        assert_eq!(idxs, vec![1, 2]);
        assert_eq!(grid.data_row_count(), 2);
        assert!(Grid::default().header().is_empty());
    }
}
