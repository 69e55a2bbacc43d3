use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use rust_excel_records::codec::{CodecOptions, read, write};
use rust_excel_records::types::{Field, LogicalType, Record, Schema, Value};
use rust_excel_records::validation::NoValidation;

#[derive(Debug, Default, Clone)]
struct Order {
    id: i64,
    customer: String,
    amount: f64,
    paid: bool,
}

impl Record for Order {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("id", LogicalType::Int64).with_display_name("Id"),
            Field::new("customer", LogicalType::String).with_display_name("Customer"),
            Field::new("amount", LogicalType::Float64)
                .with_display_name("Amount")
                .with_format("{0:N2}"),
            Field::new("paid", LogicalType::Bool).with_display_name("Paid"),
        ])
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "id" => self.id.into(),
            "customer" => self.customer.clone().into(),
            "amount" => self.amount.into(),
            "paid" => self.paid.into(),
            _ => Value::Null,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "id" => self.id = value.get().unwrap_or_default(),
            "customer" => self.customer = value.get().unwrap_or_default(),
            "amount" => self.amount = value.get().unwrap_or_default(),
            "paid" => self.paid = value.get().unwrap_or_default(),
            _ => {}
        }
    }
}

fn orders(n: usize) -> Vec<Order> {
    (0..n)
        .map(|i| Order {
            id: i as i64,
            customer: format!("customer-{}", i % 97),
            amount: i as f64 * 1.25,
            paid: i % 3 == 0,
        })
        .collect()
}

fn bench_codec(c: &mut Criterion) {
    let options = CodecOptions::default();
    let records = orders(10_000);
    let bytes = write(&records, &options).expect("write");

    c.bench_function("write_10k_orders", |b| {
        b.iter(|| write(black_box(&records), &options).expect("write"))
    });
    c.bench_function("read_10k_orders", |b| {
        b.iter(|| {
            read::<Order>(black_box(&bytes), "orders.xlsx", &NoValidation, &options).expect("read")
        })
    });
}

criterion_group!(benches, bench_codec);
criterion_main!(benches);
