#![allow(dead_code)]

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use rust_excel_records::types::{Field, LogicalType, Record, Schema, Value};

pub fn tmp_file(name: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("rust-excel-records-{name}-{nanos}.{ext}"))
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, s)
        .unwrap()
}

/// One field per supported logical type, plus nullable and formatted variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    pub flag: bool,
    pub small: i16,
    pub usmall: u16,
    pub int: i32,
    pub uint: u32,
    pub big: i64,
    pub ubig: u64,
    pub single: f32,
    pub double: f64,
    pub money: Decimal,
    pub when: NaiveDateTime,
    pub text: String,
    pub maybe_int: Option<i32>,
    pub maybe_when: Option<NaiveDateTime>,
    pub maybe_text: Option<String>,
    pub price: f64,
}

impl Record for Sample {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("flag", LogicalType::Bool).with_display_name("Flag"),
            Field::new("small", LogicalType::Int16),
            Field::new("usmall", LogicalType::UInt16),
            Field::new("int", LogicalType::Int32),
            Field::new("uint", LogicalType::UInt32),
            Field::new("big", LogicalType::Int64),
            Field::new("ubig", LogicalType::UInt64),
            Field::new("single", LogicalType::Float32),
            Field::new("double", LogicalType::Float64),
            Field::new("money", LogicalType::Decimal).with_display_name("Money"),
            Field::new("when", LogicalType::DateTime).with_display_name("When"),
            Field::new("text", LogicalType::String).with_display_name("Text"),
            Field::new("maybe_int", LogicalType::nullable(LogicalType::Int32)),
            Field::new("maybe_when", LogicalType::nullable(LogicalType::DateTime)),
            Field::new("maybe_text", LogicalType::nullable(LogicalType::String)),
            Field::new("price", LogicalType::Float64)
                .with_display_name("Price")
                .with_format("{0:N2}"),
        ])
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "flag" => self.flag.into(),
            "small" => self.small.into(),
            "usmall" => self.usmall.into(),
            "int" => self.int.into(),
            "uint" => self.uint.into(),
            "big" => self.big.into(),
            "ubig" => self.ubig.into(),
            "single" => self.single.into(),
            "double" => self.double.into(),
            "money" => self.money.into(),
            "when" => self.when.into(),
            "text" => self.text.clone().into(),
            "maybe_int" => self.maybe_int.into(),
            "maybe_when" => self.maybe_when.into(),
            "maybe_text" => self.maybe_text.clone().into(),
            "price" => self.price.into(),
            _ => Value::Null,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "flag" => self.flag = value.get().unwrap_or_default(),
            "small" => self.small = value.get().unwrap_or_default(),
            "usmall" => self.usmall = value.get().unwrap_or_default(),
            "int" => self.int = value.get().unwrap_or_default(),
            "uint" => self.uint = value.get().unwrap_or_default(),
            "big" => self.big = value.get().unwrap_or_default(),
            "ubig" => self.ubig = value.get().unwrap_or_default(),
            "single" => self.single = value.get().unwrap_or_default(),
            "double" => self.double = value.get().unwrap_or_default(),
            "money" => self.money = value.get().unwrap_or_default(),
            "when" => self.when = value.get().unwrap_or_default(),
            "text" => self.text = value.get().unwrap_or_default(),
            "maybe_int" => self.maybe_int = value.get().unwrap_or_default(),
            "maybe_when" => self.maybe_when = value.get().unwrap_or_default(),
            "maybe_text" => self.maybe_text = value.get().unwrap_or_default(),
            "price" => self.price = value.get().unwrap_or_default(),
            _ => {}
        }
    }
}

pub fn samples() -> Vec<Sample> {
    vec![
        Sample {
            flag: true,
            small: -12,
            usmall: 65_000,
            int: -2_000_000,
            uint: 4_000_000_000,
            big: 1_234_567_890_123,
            ubig: 9_876_543_210,
            single: 1.5,
            double: 0.125,
            money: Decimal::new(1234, 2),
            when: at(2021, 1, 25, 9, 30, 15),
            text: "hello".into(),
            maybe_int: Some(7),
            maybe_when: Some(at(1999, 12, 31, 23, 59, 59)),
            maybe_text: Some("there".into()),
            price: 1234.5,
        },
        Sample {
            flag: false,
            small: 0,
            usmall: 0,
            int: 42,
            uint: 0,
            big: -5,
            ubig: 0,
            single: -0.25,
            double: -1e-3,
            money: Decimal::ZERO,
            when: at(1900, 3, 1, 0, 0, 0),
            text: String::new(),
            maybe_int: None,
            maybe_when: None,
            maybe_text: None,
            price: 0.0,
        },
    ]
}

/// Minimal record used by header and validation tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Person {
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
}

impl Record for Person {
    fn schema() -> Schema {
        Schema::new(vec![
            Field::new("name", LogicalType::String).with_display_name("Name"),
            Field::new("age", LogicalType::Int32).with_display_name("Age"),
            Field::new("email", LogicalType::nullable(LogicalType::String))
                .with_display_name("Email"),
        ])
    }

    fn field(&self, name: &str) -> Value {
        match name {
            "name" => self.name.clone().into(),
            "age" => self.age.into(),
            "email" => self.email.clone().into(),
            _ => Value::Null,
        }
    }

    fn set_field(&mut self, name: &str, value: Value) {
        match name {
            "name" => self.name = value.get().unwrap_or_default(),
            "age" => self.age = value.get().unwrap_or_default(),
            "email" => self.email = value.get().unwrap_or_default(),
            _ => {}
        }
    }
}
