//! Workbook decoding: `.xlsx` / `.xls` bytes → [`Grid`].

use std::io::Cursor;
use std::path::Path;

use calamine::{Data, Range, Reader, Xls, Xlsx};

use crate::error::{CodecError, CodecResult};
use crate::grid::{Cell, Grid};

/// Physical workbook container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerFormat {
    /// Office Open XML workbook.
    Xlsx,
    /// Legacy BIFF workbook.
    Xls,
}

impl ContainerFormat {
    /// Pick the container from a file name's extension (case-insensitive).
    ///
    /// The error carries the extension with its leading dot, or an empty string when the name
    /// has none.
    pub fn from_file_name(file_name: &str) -> CodecResult<Self> {
        let ext = Path::new(file_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        match ext.to_ascii_lowercase().as_str() {
            ".xlsx" => Ok(Self::Xlsx),
            ".xls" => Ok(Self::Xls),
            _ => Err(CodecError::UnsupportedExtension { ext }),
        }
    }
}

/// Decode the first sheet of a workbook.
///
/// Row 0 of the grid is row 0 of the sheet, even when the used range starts lower. Formula cells
/// become [`Cell::Formula`] with their source text; date-formatted cells become their serial
/// number. Trailing empty cells of each row are dropped.
pub fn read_first_sheet(bytes: &[u8], format: ContainerFormat) -> CodecResult<Grid> {
    let cursor = Cursor::new(bytes);
    match format {
        ContainerFormat::Xlsx => {
            let workbook: Xlsx<_> = Xlsx::new(cursor).map_err(calamine::Error::from)?;
            load_grid(workbook)
        }
        ContainerFormat::Xls => {
            let workbook: Xls<_> = Xls::new(cursor).map_err(calamine::Error::from)?;
            load_grid(workbook)
        }
    }
}

fn load_grid<'a, R>(mut workbook: R) -> CodecResult<Grid>
where
    R: Reader<Cursor<&'a [u8]>>,
    calamine::Error: From<<R as Reader<Cursor<&'a [u8]>>>::Error>,
{
    let sheet = workbook
        .sheet_names()
        .into_iter()
        .next()
        .ok_or_else(|| CodecError::SchemaMismatch {
            message: "workbook has no sheets".to_string(),
        })?;

    let values = workbook
        .worksheet_range(&sheet)
        .map_err(calamine::Error::from)?;
    // Formula sources are best effort; a sheet without formulas is not an error.
    let formulas = workbook.worksheet_formula(&sheet).ok();

    Ok(build_grid(&values, formulas.as_ref()))
}

fn build_grid(values: &Range<Data>, formulas: Option<&Range<String>>) -> Grid {
    let last = [values.end(), formulas.and_then(Range::end)]
        .into_iter()
        .flatten()
        .fold(None, |acc: Option<(u32, u32)>, (r, c)| match acc {
            Some((ar, ac)) => Some((ar.max(r), ac.max(c))),
            None => Some((r, c)),
        });
    let Some((last_row, last_col)) = last else {
        return Grid::default();
    };

    let rows = (0..=last_row)
        .map(|r| {
            let mut row: Vec<Cell> = (0..=last_col)
                .map(|c| {
                    let formula = formulas
                        .and_then(|f| f.get_value((r, c)))
                        .filter(|src| !src.is_empty());
                    match formula {
                        Some(src) => Cell::Formula(src.clone()),
                        None => values.get_value((r, c)).map(to_cell).unwrap_or(Cell::Blank),
                    }
                })
                .collect();
            while matches!(row.last(), Some(Cell::Blank)) {
                row.pop();
            }
            row
        })
        .collect();
    Grid::new(rows)
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Int(i) => Cell::Numeric(*i as f64),
        Data::Float(f) => Cell::Numeric(*f),
        Data::DateTime(dt) => Cell::Numeric(dt.as_f64()),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Bool(b) => Cell::Boolean(*b),
        Data::Error(e) => Cell::Error(e.to_string()),
        Data::Empty => Cell::Blank,
    }
}
