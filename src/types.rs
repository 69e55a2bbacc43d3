//! Core data model types for the record codec.
//!
//! A record type describes itself with a [`Schema`] (an ordered list of typed [`Field`]s) and
//! exposes its fields as dynamically typed [`Value`]s through the [`Record`] trait.

use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CodecResult;

/// Logical data type of a schema field.
///
/// `Nullable` wraps any other type. For coercion purposes a nullable type behaves like its
/// underlying type, except that blank input maps to [`Value::Null`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalType {
    /// Boolean.
    Bool,
    /// 16-bit signed integer.
    Int16,
    /// 16-bit unsigned integer.
    UInt16,
    /// 32-bit signed integer.
    Int32,
    /// 32-bit unsigned integer.
    UInt32,
    /// 64-bit signed integer.
    Int64,
    /// 64-bit unsigned integer.
    UInt64,
    /// 32-bit floating point number.
    Float32,
    /// 64-bit floating point number.
    Float64,
    /// Exact decimal number.
    Decimal,
    /// Calendar date and time of day (no time zone).
    DateTime,
    /// UTF-8 string.
    String,
    /// Optional value of the wrapped type.
    Nullable(Box<LogicalType>),
}

impl LogicalType {
    /// Wrap a type in [`LogicalType::Nullable`].
    pub fn nullable(inner: LogicalType) -> Self {
        match inner {
            already @ LogicalType::Nullable(_) => already,
            other => LogicalType::Nullable(Box::new(other)),
        }
    }

    /// Returns `true` for `Nullable(_)`.
    pub fn is_nullable(&self) -> bool {
        matches!(self, LogicalType::Nullable(_))
    }

    /// The type used for coercion: the wrapped type for nullable fields, `self` otherwise.
    pub fn base(&self) -> &LogicalType {
        match self {
            LogicalType::Nullable(inner) => inner.base(),
            other => other,
        }
    }

    /// Returns `true` for integer, floating point and decimal types.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.base(),
            LogicalType::Int16
                | LogicalType::UInt16
                | LogicalType::Int32
                | LogicalType::UInt32
                | LogicalType::Int64
                | LogicalType::UInt64
                | LogicalType::Float32
                | LogicalType::Float64
                | LogicalType::Decimal
        )
    }

    /// The zero value of the type (`0`, `false`, `""`, the Unix epoch); [`Value::Null`] for a
    /// nullable type.
    pub fn default_value(&self) -> Value {
        match self {
            LogicalType::Bool => Value::Bool(false),
            LogicalType::Int16 => Value::Int16(0),
            LogicalType::UInt16 => Value::UInt16(0),
            LogicalType::Int32 => Value::Int32(0),
            LogicalType::UInt32 => Value::UInt32(0),
            LogicalType::Int64 => Value::Int64(0),
            LogicalType::UInt64 => Value::UInt64(0),
            LogicalType::Float32 => Value::Float32(0.0),
            LogicalType::Float64 => Value::Float64(0.0),
            LogicalType::Decimal => Value::Decimal(Decimal::ZERO),
            LogicalType::DateTime => Value::DateTime(NaiveDateTime::default()),
            LogicalType::String => Value::String(String::new()),
            LogicalType::Nullable(_) => Value::Null,
        }
    }
}

impl fmt::Display for LogicalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.base() {
            LogicalType::Bool => "Bool",
            LogicalType::Int16 => "Int16",
            LogicalType::UInt16 => "UInt16",
            LogicalType::Int32 => "Int32",
            LogicalType::UInt32 => "UInt32",
            LogicalType::Int64 => "Int64",
            LogicalType::UInt64 => "UInt64",
            LogicalType::Float32 => "Float32",
            LogicalType::Float64 => "Float64",
            LogicalType::Decimal => "Decimal",
            LogicalType::DateTime => "DateTime",
            LogicalType::String => "String",
            LogicalType::Nullable(_) => unreachable!("base() never returns Nullable"),
        };
        f.write_str(name)
    }
}

/// A single declared field of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Field identity (the raw field name).
    pub name: String,
    /// Field data type.
    pub logical_type: LogicalType,
    /// Name shown in the header row. Defaults to `name`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// Composite format directive used on write, e.g. `{0:N2}` or `{0:yyyy-MM-dd}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Field {
    /// Create a new field without display name or format directive.
    pub fn new(name: impl Into<String>, logical_type: LogicalType) -> Self {
        Self {
            name: name.into(),
            logical_type,
            display_name: None,
            format: None,
        }
    }

    /// Set the header display name.
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set the format directive.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }
}

/// Ordered list of fields describing a record type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Fields in declaration order.
    pub fields: Vec<Field>,
}

impl Schema {
    /// Create a new schema from fields.
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Load a schema descriptor from JSON (`{"fields": [{"name": ..., "logical_type": ...}]}`).
    pub fn from_json_str(json: &str) -> CodecResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Iterate field names in order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the index of a field by name, if present.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// A single typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value (only valid for nullable fields).
    Null,
    Bool(bool),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float32(f32),
    Float64(f64),
    Decimal(Decimal),
    DateTime(NaiveDateTime),
    String(String),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Lossy conversion of any numeric variant (and booleans) to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Value::Int16(v) => Some(f64::from(*v)),
            Value::UInt16(v) => Some(f64::from(*v)),
            Value::Int32(v) => Some(f64::from(*v)),
            Value::UInt32(v) => Some(f64::from(*v)),
            Value::Int64(v) => Some(*v as f64),
            Value::UInt64(v) => Some(*v as f64),
            Value::Float32(v) => Some(f64::from(*v)),
            Value::Float64(v) => Some(*v),
            Value::Decimal(d) => rust_decimal::prelude::ToPrimitive::to_f64(d),
            _ => None,
        }
    }

    /// Convert into a Rust field type, see [`FromValue`].
    pub fn get<T: FromValue>(self) -> Option<T> {
        T::from_value(self)
    }
}

/// Conversion from a [`Value`] into a concrete field type.
///
/// Returns `None` when the value has a different variant. `Option<T>` maps [`Value::Null`] to
/// `Some(None)`.
pub trait FromValue: Sized {
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! value_conversions {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl FromValue for $ty {
                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v)
                }
            }
        )*
    };
}

value_conversions! {
    bool => Bool,
    i16 => Int16,
    u16 => UInt16,
    i32 => Int32,
    u32 => UInt32,
    i64 => Int64,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
    Decimal => Decimal,
    NaiveDateTime => DateTime,
    String => String,
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_owned())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(Value::Null)
    }
}

/// A strongly-typed record that can be read from and written to a sheet.
///
/// Implementations describe their fields once in [`Record::schema`] and expose each field by
/// name. `set_field` receives values already coerced to the declared [`LogicalType`].
///
/// ```rust
/// use rust_excel_records::types::{Field, LogicalType, Record, Schema, Value};
///
/// #[derive(Debug, Default, PartialEq)]
/// struct Person {
///     name: String,
///     age: Option<i32>,
/// }
///
/// impl Record for Person {
///     fn schema() -> Schema {
///         Schema::new(vec![
///             Field::new("name", LogicalType::String).with_display_name("Name"),
///             Field::new("age", LogicalType::nullable(LogicalType::Int32)).with_display_name("Age"),
///         ])
///     }
///
///     fn field(&self, name: &str) -> Value {
///         match name {
///             "name" => self.name.clone().into(),
///             "age" => self.age.into(),
///             _ => Value::Null,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: Value) {
///         match name {
///             "name" => self.name = value.get().unwrap_or_default(),
///             "age" => self.age = value.get().unwrap_or_default(),
///             _ => {}
///         }
///     }
/// }
///
/// let mut p = Person::default();
/// p.set_field("age", Value::Int32(42));
/// assert_eq!(p.field("age"), Value::Int32(42));
/// ```
pub trait Record: Default {
    /// Field declarations, in column order.
    fn schema() -> Schema;

    /// Current value of a field. Unknown names return [`Value::Null`].
    fn field(&self, name: &str) -> Value;

    /// Assign a field. Unknown names are ignored.
    fn set_field(&mut self, name: &str, value: Value);
}
