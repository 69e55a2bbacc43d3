use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::format::{format_datetime, format_decimal, format_f64};
use crate::grid::CellContent;
use crate::schema::FieldSpec;
use crate::types::Value;

/// Convert a field value into cell content.
///
/// Returns `None` for [`Value::Null`]: the cell is left untouched rather than blanked. With a
/// format directive, numbers and date/times are written as formatted text. Booleans are written
/// as the text `1`/`0`.
pub fn coerce_out(value: &Value, field: &FieldSpec) -> Option<CellContent> {
    let directive = field.format.as_deref();
    let content = match value {
        Value::Null => return None,
        Value::Bool(b) => CellContent::Text(if *b { "1" } else { "0" }.to_string()),
        Value::String(s) => CellContent::Text(s.clone()),
        Value::DateTime(dt) => match directive {
            Some(d) => CellContent::Text(format_datetime(dt, d)),
            None => CellContent::DateTime(*dt),
        },
        numeric => match directive {
            Some(d) => CellContent::Text(format_numeric(numeric, d)?),
            None => CellContent::Number(numeric.as_f64()?),
        },
    };
    Some(content)
}

fn format_numeric(value: &Value, directive: &str) -> Option<String> {
    let exact = match value {
        Value::Int16(v) => Decimal::from(*v),
        Value::UInt16(v) => Decimal::from(*v),
        Value::Int32(v) => Decimal::from(*v),
        Value::UInt32(v) => Decimal::from(*v),
        Value::Int64(v) => Decimal::from(*v),
        Value::UInt64(v) => Decimal::from(*v),
        Value::Decimal(d) => *d,
        Value::Float32(v) => match Decimal::from_f32(*v) {
            Some(d) => d,
            None => return Some(format_f64(f64::from(*v), directive)),
        },
        Value::Float64(v) => return Some(format_f64(*v, directive)),
        _ => return None,
    };
    Some(format_decimal(exact, directive))
}

#[cfg(test)]
mod tests {
    use super::coerce_out;
    use crate::grid::CellContent;
    use crate::schema::FieldSpec;
    use crate::types::{LogicalType, Value};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn field(ty: LogicalType, format: Option<&str>) -> FieldSpec {
        FieldSpec {
            name: "f".to_string(),
            logical_type: ty,
            display_name: "f".to_string(),
            format: format.map(str::to_string),
            ordinal: 0,
        }
    }

    #[test]
    fn null_leaves_cell_untouched() {
        let f = field(LogicalType::nullable(LogicalType::Int32), None);
        assert_eq!(coerce_out(&Value::Null, &f), None);
    }

    #[test]
    fn numbers_are_native_unless_formatted() {
        let plain = field(LogicalType::Int32, None);
        assert_eq!(coerce_out(&Value::Int32(7), &plain), Some(CellContent::Number(7.0)));

        let formatted = field(LogicalType::Float64, Some("{0:N2}"));
        assert_eq!(
            coerce_out(&Value::Float64(1234.5), &formatted),
            Some(CellContent::Text("1,234.50".into()))
        );

        let dec = field(LogicalType::Decimal, Some("{0:F3}"));
        assert_eq!(
            coerce_out(&Value::Decimal(Decimal::new(15, 1)), &dec),
            Some(CellContent::Text("1.500".into()))
        );

        let big = field(LogicalType::UInt64, Some("{0:N0}"));
        assert_eq!(
            coerce_out(&Value::UInt64(u64::MAX), &big),
            Some(CellContent::Text("18,446,744,073,709,551,615".into()))
        );
    }

    #[test]
    fn huge_percentages_still_render() {
        let pct = field(LogicalType::Float64, Some("{0:P}"));
        let Some(CellContent::Text(text)) = coerce_out(&Value::Float64(1e28), &pct) else {
            panic!("expected text content");
        };
        assert!(text.starts_with("1,000,000,000,000,000,0"), "{text}");
        assert!(text.ends_with(".00 %"), "{text}");

        let custom = field(LogicalType::Decimal, Some("{0:#,##0%}"));
        let Some(CellContent::Text(text)) = coerce_out(&Value::Decimal(Decimal::MAX), &custom)
        else {
            panic!("expected text content");
        };
        assert!(text.starts_with("7,922,816,251,426,43"), "{text}");
        assert!(text.ends_with('%'), "{text}");
    }

    #[test]
    fn datetimes_bools_and_strings() {
        let dt = NaiveDate::from_ymd_opt(2021, 1, 25)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        assert_eq!(
            coerce_out(&Value::DateTime(dt), &field(LogicalType::DateTime, None)),
            Some(CellContent::DateTime(dt))
        );
        assert_eq!(
            coerce_out(
                &Value::DateTime(dt),
                &field(LogicalType::DateTime, Some("{0:yyyy-MM-dd}"))
            ),
            Some(CellContent::Text("2021-01-25".into()))
        );
        assert_eq!(
            coerce_out(&Value::Bool(true), &field(LogicalType::Bool, None)),
            Some(CellContent::Text("1".into()))
        );
        assert_eq!(
            coerce_out(&Value::Bool(false), &field(LogicalType::Bool, Some("{0:N2}"))),
            Some(CellContent::Text("0".into()))
        );
        assert_eq!(
            coerce_out(&Value::String("x".into()), &field(LogicalType::String, None)),
            Some(CellContent::Text("x".into()))
        );
    }
}
