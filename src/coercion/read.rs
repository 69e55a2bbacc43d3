use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::grid::{Cell, bool_text};
use crate::schema::FieldSpec;
use crate::types::{LogicalType, Value};

use super::parse::{parse_datetime, parse_decimal, parse_float, parse_integer};
use super::serial::serial_to_datetime;
use super::{Coerced, CoercionOptions};

/// Convert one cell into a value of `field`'s logical type.
///
/// On a mismatch the returned value is the type's zero (`0`, `false`, `""`, the epoch) and the
/// diagnostic reads `'<raw>' is not a valid value for type:<Type>`. Cell types the matrix does not
/// cover for a type produce the generic
/// `'<display name>' format error, celltype:<CellType> doesn't match property type <Type>`.
///
/// Nullable fields read blank cells (and empty text) as [`Value::Null`], and use it in place of the
/// zero for unsupported cell types.
pub fn coerce_in(cell: &Cell, field: &FieldSpec, options: &CoercionOptions) -> Coerced {
    let ty = field.logical_type.base();
    if field.logical_type.is_nullable() && is_blank_input(cell, ty) {
        return Coerced::ok(Value::Null);
    }

    match ty {
        LogicalType::Bool => bool_in(cell, field, options),
        LogicalType::Int16 => number_in(cell, field, |f| Some(f as i16), parse_integer::<i16>),
        LogicalType::UInt16 => number_in(cell, field, |f| Some(f as u16), parse_integer::<u16>),
        LogicalType::Int32 => number_in(cell, field, |f| Some(f as i32), parse_integer::<i32>),
        LogicalType::UInt32 => number_in(cell, field, |f| Some(f as u32), parse_integer::<u32>),
        LogicalType::Int64 => number_in(cell, field, |f| Some(f as i64), parse_integer::<i64>),
        LogicalType::UInt64 => number_in(cell, field, |f| Some(f as u64), parse_integer::<u64>),
        LogicalType::Float32 => number_in(cell, field, |f| Some(f as f32), parse_float::<f32>),
        LogicalType::Float64 => number_in(cell, field, Some, parse_float::<f64>),
        LogicalType::Decimal => number_in(cell, field, Decimal::from_f64, parse_decimal),
        LogicalType::DateTime => datetime_in(cell, field),
        LogicalType::String => string_in(cell, field),
        LogicalType::Nullable(_) => unreachable!("base() never returns Nullable"),
    }
}

fn is_blank_input(cell: &Cell, ty: &LogicalType) -> bool {
    match cell {
        Cell::Blank => true,
        Cell::Text(s) if *ty == LogicalType::String => s.is_empty(),
        Cell::Text(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn invalid_value(raw: &str, field: &FieldSpec) -> String {
    format!("'{raw}' is not a valid value for type:{}", field.logical_type)
}

fn unsupported(cell: &Cell, field: &FieldSpec) -> Coerced {
    Coerced::with_diagnostic(
        field.logical_type.default_value(),
        format!(
            "'{}' format error, celltype:{} doesn't match property type {}",
            field.display_name,
            cell.cell_type(),
            field.logical_type
        ),
    )
}

fn bool_in(cell: &Cell, field: &FieldSpec, options: &CoercionOptions) -> Coerced {
    match cell {
        Cell::Numeric(n) => Coerced::ok(*n == 1.0),
        Cell::Text(s) => Coerced::ok(s == "1" || s.eq_ignore_ascii_case("true")),
        Cell::Boolean(b) => Coerced::ok(*b),
        Cell::Blank => Coerced::ok(false),
        Cell::Formula(_) | Cell::Error(_) | Cell::Unknown(_) => {
            if options.report_unsupported_bool_cells {
                unsupported(cell, field)
            } else {
                Coerced::ok(false)
            }
        }
    }
}

// Shared by integer, floating point and decimal types: numeric cells go through `from_f64`,
// text through `parse`, booleans become 1/0.
fn number_in<T>(
    cell: &Cell,
    field: &FieldSpec,
    from_f64: impl Fn(f64) -> Option<T>,
    parse: impl Fn(&str) -> Option<T>,
) -> Coerced
where
    T: From<u8> + Into<Value>,
{
    match cell {
        Cell::Numeric(n) => match from_f64(*n) {
            Some(v) => Coerced::ok(v),
            None => Coerced::with_diagnostic(T::from(0), invalid_value(&n.to_string(), field)),
        },
        Cell::Text(s) => match parse(s) {
            Some(v) => Coerced::ok(v),
            None => Coerced::with_diagnostic(T::from(0), invalid_value(s, field)),
        },
        Cell::Boolean(b) => Coerced::ok(T::from(u8::from(*b))),
        _ => unsupported(cell, field),
    }
}

fn datetime_in(cell: &Cell, field: &FieldSpec) -> Coerced {
    let (parsed, raw) = match cell {
        Cell::Numeric(n) => (serial_to_datetime(*n), n.to_string()),
        Cell::Text(s) => (parse_datetime(s), s.clone()),
        _ => return unsupported(cell, field),
    };
    match parsed {
        Some(dt) => Coerced::ok(dt),
        None => Coerced::with_diagnostic(NaiveDateTime::default(), invalid_value(&raw, field)),
    }
}

fn string_in(cell: &Cell, field: &FieldSpec) -> Coerced {
    match cell {
        Cell::Numeric(n) => Coerced::ok(n.to_string()),
        Cell::Text(s) | Cell::Formula(s) | Cell::Error(s) => Coerced::ok(s.clone()),
        Cell::Blank => Coerced::ok(String::new()),
        Cell::Boolean(b) => Coerced::ok(bool_text(*b)),
        Cell::Unknown(raw) => {
            Coerced::with_diagnostic(field.logical_type.default_value(), invalid_value(raw, field))
        }
    }
}
