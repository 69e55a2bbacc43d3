//! Header row matching.

use std::collections::HashSet;

use thiserror::Error;

use crate::grid::Cell;
use crate::schema::FieldSpec;

/// The header row contains texts that match no display name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid Header text detacted: {}", .unmatched.join(";"))]
pub struct HeaderError {
    /// Every unmatched header text, in column order.
    pub unmatched: Vec<String>,
}

/// A sheet column bound to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBinding<'a> {
    /// Zero-based column index in the sheet.
    pub column: usize,
    /// The field the column feeds.
    pub field: &'a FieldSpec,
}

/// Column → field mapping produced by [`match_header`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMapping<'a> {
    /// Bindings in column order.
    pub columns: Vec<ColumnBinding<'a>>,
}

/// Align a header row with the resolved fields.
///
/// Header cells are compared as text whatever their physical type. Every text must be one of the
/// fields' display names, otherwise all offending texts are reported together. Each column then
/// binds to the field with that display name, falling back to a raw field-name match.
///
/// Duplicate header texts are not rejected: both columns bind to the same field, and the later
/// column's value wins when a row is mapped.
pub fn match_header<'a>(
    header: &[Cell],
    fields: &'a [FieldSpec],
) -> Result<HeaderMapping<'a>, HeaderError> {
    let texts: Vec<String> = header.iter().map(Cell::text_value).collect();
    let display_names: HashSet<&str> = fields.iter().map(|f| f.display_name.as_str()).collect();

    let unmatched: Vec<String> = texts
        .iter()
        .filter(|t| !display_names.contains(t.as_str()))
        .cloned()
        .collect();
    if !unmatched.is_empty() {
        return Err(HeaderError { unmatched });
    }

    let columns = texts
        .iter()
        .enumerate()
        .filter_map(|(column, text)| {
            fields
                .iter()
                .find(|f| f.display_name == *text)
                .or_else(|| fields.iter().find(|f| f.name == *text))
                .map(|field| ColumnBinding { column, field })
        })
        .collect();
    Ok(HeaderMapping { columns })
}
