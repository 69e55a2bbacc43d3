//! Schema resolution: turns a declared [`Schema`] into the ordered [`FieldSpec`] list shared by the
//! read and write paths.

use crate::types::{LogicalType, Schema};

/// A resolved field: everything the codec needs to read or write one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    /// Raw field name (record field identity).
    pub name: String,
    /// Declared logical type.
    pub logical_type: LogicalType,
    /// Header text; the raw name when no display name is declared.
    pub display_name: String,
    /// Optional composite format directive applied on write.
    pub format: Option<String>,
    /// Zero-based column position in declaration order.
    pub ordinal: usize,
}

/// Resolve a schema into field specs, preserving declaration order.
///
/// A schema without fields resolves to an empty list.
pub fn resolve(schema: &Schema) -> Vec<FieldSpec> {
    schema
        .fields
        .iter()
        .enumerate()
        .map(|(ordinal, f)| FieldSpec {
            name: f.name.clone(),
            logical_type: f.logical_type.clone(),
            display_name: f.display_name.clone().unwrap_or_else(|| f.name.clone()),
            format: f.format.clone(),
            ordinal,
        })
        .collect()
}
