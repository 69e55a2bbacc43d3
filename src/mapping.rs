//! Row mapping: header check, per-cell coercion and validation aggregation.

use std::fmt;

use crate::coercion::{CoercionOptions, coerce_in};
use crate::grid::{Cell, Grid};
use crate::header::{HeaderError, match_header};
use crate::schema::FieldSpec;
use crate::types::Record;
use crate::validation::RecordValidator;

/// One recoverable problem found while mapping a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A cell could not be converted to the field's type.
    Coercion { field: String, message: String },
    /// The record validator rejected a field.
    Validation { field: String, message: String },
}

impl Diagnostic {
    /// Raw name of the affected field.
    pub fn field(&self) -> &str {
        match self {
            Diagnostic::Coercion { field, .. } | Diagnostic::Validation { field, .. } => field,
        }
    }

    /// The human-readable message.
    pub fn message(&self) -> &str {
        match self {
            Diagnostic::Coercion { message, .. } | Diagnostic::Validation { message, .. } => {
                message
            }
        }
    }
}

/// All diagnostics of one sheet row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDiagnostic {
    /// Sheet row index; the header is row 0, so the first data row is 1.
    pub row: usize,
    /// Diagnostics in discovery order: coercion first, then validation.
    pub diagnostics: Vec<Diagnostic>,
}

impl fmt::Display for RowDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row:{} ", self.row)?;
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(d.message())?;
        }
        Ok(())
    }
}

/// Outcome of reading a sheet into records.
#[derive(Debug, Clone)]
pub struct ConversionReport<T> {
    /// Mapped records, one per data row. `None` only when the header was rejected.
    pub records: Option<Vec<T>>,
    /// Set when the header row did not match the schema.
    pub header_error: Option<HeaderError>,
    /// Rows that produced at least one diagnostic, in row order.
    pub rows: Vec<RowDiagnostic>,
}

impl<T> ConversionReport<T> {
    /// Flatten the report into its diagnostic text.
    ///
    /// A header failure yields the header message alone. Otherwise each flagged row becomes one
    /// `Row:<n> <messages>` line. A clean read yields the empty string.
    pub fn diagnostic_text(&self) -> String {
        if let Some(err) = &self.header_error {
            return err.to_string();
        }
        self.rows
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// `true` when there is nothing to report.
    pub fn is_clean(&self) -> bool {
        self.header_error.is_none() && self.rows.is_empty()
    }

    /// Total number of diagnostics across all rows.
    pub fn diagnostic_count(&self) -> usize {
        self.rows.iter().map(|r| r.diagnostics.len()).sum()
    }

    /// Split into `(records, diagnostic text)`.
    pub fn into_parts(self) -> (Option<Vec<T>>, String) {
        let text = self.diagnostic_text();
        (self.records, text)
    }
}

/// Map every data row of `grid` into a record.
///
/// Rows are never dropped: a row with problems still yields a record holding whatever could be
/// converted, and its messages are collected in the report.
pub fn map_rows<T: Record>(
    grid: &Grid,
    fields: &[FieldSpec],
    validator: &dyn RecordValidator<T>,
    options: &CoercionOptions,
) -> ConversionReport<T> {
    let mapping = match match_header(grid.header(), fields) {
        Ok(mapping) => mapping,
        Err(err) => {
            return ConversionReport {
                records: None,
                header_error: Some(err),
                rows: Vec::new(),
            };
        }
    };

    let missing = Cell::Text(String::new());
    let mut records = Vec::with_capacity(grid.data_row_count());
    let mut rows = Vec::new();

    for (row, cells) in grid.data_rows() {
        let mut record = T::default();
        let mut diagnostics = Vec::new();

        for binding in &mapping.columns {
            let cell = cells.get(binding.column).unwrap_or(&missing);
            let coerced = coerce_in(cell, binding.field, options);
            if let Some(message) = coerced.diagnostic {
                diagnostics.push(Diagnostic::Coercion {
                    field: binding.field.name.clone(),
                    message,
                });
            }
            record.set_field(&binding.field.name, coerced.value);
        }

        diagnostics.extend(validator.validate(&record).into_iter().map(|e| {
            Diagnostic::Validation {
                field: e.field,
                message: e.message,
            }
        }));

        if !diagnostics.is_empty() {
            rows.push(RowDiagnostic { row, diagnostics });
        }
        records.push(record);
    }

    ConversionReport {
        records: Some(records),
        header_error: None,
        rows,
    }
}
