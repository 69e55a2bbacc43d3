//! Type coercion between physical cells and logical field values.
//!
//! - [`coerce_in`] (read direction) converts a [`crate::grid::Cell`] into a
//!   [`crate::types::Value`] of the field's logical type. It never fails: mismatches produce the
//!   type's zero value plus a diagnostic message.
//! - [`coerce_out`] (write direction) converts a value into [`crate::grid::CellContent`], applying
//!   the field's format directive.

pub mod parse;
mod read;
pub mod serial;
mod write;

pub use read::coerce_in;
pub use write::coerce_out;

use crate::types::Value;

/// Knobs for the read-direction coercion matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoercionOptions {
    /// Report formula/error/unknown cells read into a boolean field.
    ///
    /// Off by default: such cells silently read as `false`.
    pub report_unsupported_bool_cells: bool,
}

/// Result of coercing one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Coerced {
    /// The value to assign (a zero/default value when `diagnostic` is set).
    pub value: Value,
    /// Message describing a recoverable mismatch.
    pub diagnostic: Option<String>,
}

impl Coerced {
    pub(crate) fn ok(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            diagnostic: None,
        }
    }

    pub(crate) fn with_diagnostic(value: impl Into<Value>, message: String) -> Self {
        Self {
            value: value.into(),
            diagnostic: Some(message),
        }
    }
}
