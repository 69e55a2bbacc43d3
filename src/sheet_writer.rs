//! Records → [`OutputSheet`].

use crate::coercion::coerce_out;
use crate::grid::OutputSheet;
use crate::schema::FieldSpec;
use crate::types::Record;

/// Lay out `records` as a sheet: a header of display names, then one row per record.
///
/// Columns follow the order of `fields`. Null values leave their cell untouched.
pub fn write_sheet<T: Record>(records: &[T], fields: &[FieldSpec]) -> OutputSheet {
    let header = fields.iter().map(|f| f.display_name.clone()).collect();
    let rows = records
        .iter()
        .map(|record| {
            fields
                .iter()
                .map(|field| coerce_out(&record.field(&field.name), field))
                .collect()
        })
        .collect();
    OutputSheet { header, rows }
}

#[cfg(test)]
mod tests {
    use super::write_sheet;
    use crate::grid::CellContent;
    use crate::schema::resolve;
    use crate::types::{Field, LogicalType, Record, Schema, Value};

    #[derive(Debug, Default)]
    struct Price {
        sku: String,
        amount: f64,
        discount: Option<f64>,
        active: bool,
    }

    impl Record for Price {
        fn schema() -> Schema {
            Schema::new(vec![
                Field::new("sku", LogicalType::String).with_display_name("SKU"),
                Field::new("amount", LogicalType::Float64).with_format("{0:N2}"),
                Field::new("discount", LogicalType::nullable(LogicalType::Float64)),
                Field::new("active", LogicalType::Bool),
            ])
        }

        fn field(&self, name: &str) -> Value {
            match name {
                "sku" => self.sku.clone().into(),
                "amount" => self.amount.into(),
                "discount" => self.discount.into(),
                "active" => self.active.into(),
                _ => Value::Null,
            }
        }

        fn set_field(&mut self, name: &str, value: Value) {
            match name {
                "sku" => self.sku = value.get().unwrap_or_default(),
                "amount" => self.amount = value.get().unwrap_or_default(),
                "discount" => self.discount = value.get().unwrap_or_default(),
                "active" => self.active = value.get().unwrap_or_default(),
                _ => {}
            }
        }
    }

    #[test]
    fn header_then_one_row_per_record() {
        let fields = resolve(&Price::schema());
        let records = vec![
            Price {
                sku: "A-1".into(),
                amount: 1234.5,
                discount: Some(0.25),
                active: true,
            },
            Price {
                sku: "B-2".into(),
                amount: 3.0,
                discount: None,
                active: false,
            },
        ];
        let sheet = write_sheet(&records, &fields);
        assert_eq!(sheet.header, vec!["SKU", "amount", "discount", "active"]);
        assert_eq!(
            sheet.rows[0],
            vec![
                Some(CellContent::Text("A-1".into())),
                Some(CellContent::Text("1,234.50".into())),
                Some(CellContent::Number(0.25)),
                Some(CellContent::Text("1".into())),
            ]
        );
        assert_eq!(sheet.rows[1][2], None);
        assert_eq!(sheet.rows[1][3], Some(CellContent::Text("0".into())));
    }

    #[test]
    fn empty_collection_writes_header_only() {
        let fields = resolve(&Price::schema());
        let sheet = write_sheet::<Price>(&[], &fields);
        assert_eq!(sheet.header.len(), 4);
        assert!(sheet.rows.is_empty());
    }
}
