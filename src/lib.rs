//! `rust-excel-records` converts between Excel sheets (`.xlsx` / `.xls`) and collections of
//! strongly-typed records, driven by a per-type [`types::Schema`].
//!
//! The primary entrypoints are [`codec::read`] and [`codec::write`].
//!
//! ## Reading
//!
//! Row 0 of the first sheet is the header. Every header text must be the display name of a
//! schema field, otherwise nothing is read and the report carries
//! `invalid Header text detacted: <texts>`. Each data row becomes one record, even when some of
//! its cells cannot be converted: such cells get the field type's zero value and a message in the
//! row's diagnostics, e.g.
//!
//! ```text
//! Row:2 'abc' is not a valid value for type:Int32
//! ```
//!
//! An optional [`validation::RecordValidator`] runs on every record and its messages join the
//! same row line.
//!
//! ## Writing
//!
//! [`codec::write`] produces a single-sheet `.xlsx`: a bold, centered header of display names,
//! then one row per record. Fields with a format directive (`{0:N2}`, `{0:yyyy-MM-dd}`, ...) are
//! written as formatted text, see [`format`].
//!
//! ## Supported logical types
//!
//! - integers: [`types::LogicalType::Int16`] through [`types::LogicalType::UInt64`]
//! - [`types::LogicalType::Float32`], [`types::LogicalType::Float64`],
//!   [`types::LogicalType::Decimal`]
//! - [`types::LogicalType::Bool`], [`types::LogicalType::DateTime`],
//!   [`types::LogicalType::String`]
//! - any of the above wrapped in [`types::LogicalType::Nullable`]
//!
//! ## Quick example
//!
//! ```rust
//! use rust_excel_records::codec::{read, write, CodecOptions};
//! use rust_excel_records::types::{Field, LogicalType, Record, Schema, Value};
//! use rust_excel_records::validation::NoValidation;
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Person {
//!     name: String,
//!     age: Option<i32>,
//! }
//!
//! impl Record for Person {
//!     fn schema() -> Schema {
//!         Schema::new(vec![
//!             Field::new("name", LogicalType::String).with_display_name("Name"),
//!             Field::new("age", LogicalType::nullable(LogicalType::Int32)).with_display_name("Age"),
//!         ])
//!     }
//!
//!     fn field(&self, name: &str) -> Value {
//!         match name {
//!             "name" => self.name.clone().into(),
//!             "age" => self.age.into(),
//!             _ => Value::Null,
//!         }
//!     }
//!
//!     fn set_field(&mut self, name: &str, value: Value) {
//!         match name {
//!             "name" => self.name = value.get().unwrap_or_default(),
//!             "age" => self.age = value.get().unwrap_or_default(),
//!             _ => {}
//!         }
//!     }
//! }
//!
//! # fn main() -> Result<(), rust_excel_records::CodecError> {
//! let people = vec![
//!     Person { name: "Ann".into(), age: Some(30) },
//!     Person { name: "Bob".into(), age: None },
//! ];
//! let options = CodecOptions::default();
//! let bytes = write(&people, &options)?;
//!
//! let report = read::<Person>(&bytes, "people.xlsx", &NoValidation, &options)?;
//! assert!(report.is_clean());
//! assert_eq!(report.records, Some(people));
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`codec`]: read/write entrypoints, container adapters and observers
//! - [`types`]: schema, logical types, values and the [`types::Record`] trait
//! - [`mapping`]: row mapping and [`mapping::ConversionReport`]
//! - [`validation`]: record validation capability and a rule-based validator
//! - [`coercion`]: cell ⇄ value conversion
//! - [`format`]: composite format directives
//! - [`error`]: error types

pub mod codec;
pub mod coercion;
pub mod error;
pub mod format;
pub mod grid;
pub mod header;
pub mod mapping;
pub mod schema;
pub mod sheet_writer;
pub mod types;
pub mod validation;

pub use error::{CodecError, CodecResult};
