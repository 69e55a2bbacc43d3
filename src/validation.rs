//! Field-level validation.
//!
//! The row mapper only knows the [`RecordValidator`] capability: it hands over each fully
//! populated record and appends every returned message to that row's diagnostics.
//! [`RuleValidator`] is a ready-made implementation for the usual declarative rules.

use std::collections::HashMap;

use regex::Regex;

use crate::types::{Record, Schema, Value};

/// One failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Raw name of the offending field.
    pub field: String,
    /// Human-readable message.
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validates a record after all of its fields were read.
pub trait RecordValidator<T> {
    /// Returns every violation; an empty list means the record is valid.
    fn validate(&self, record: &T) -> Vec<ValidationError>;
}

/// Accepts every record.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoValidation;

impl<T> RecordValidator<T> for NoValidation {
    fn validate(&self, _record: &T) -> Vec<ValidationError> {
        Vec::new()
    }
}

impl<T, F> RecordValidator<T> for F
where
    F: Fn(&T) -> Vec<ValidationError>,
{
    fn validate(&self, record: &T) -> Vec<ValidationError> {
        self(record)
    }
}

/// A declarative per-field rule.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Value must be present; strings must contain a non-whitespace character.
    Required,
    /// Numeric value must lie in `min..=max`.
    Range { min: f64, max: f64 },
    /// String value must match the whole pattern.
    Pattern(FieldPattern),
    /// String value must have at most this many characters.
    MaxLength(usize),
}

/// A regular expression anchored to match a whole value.
#[derive(Debug, Clone)]
pub struct FieldPattern {
    source: String,
    regex: Regex,
}

impl FieldPattern {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            source: pattern.to_string(),
            regex: Regex::new(&format!("^(?:{pattern})$"))?,
        })
    }

    /// The pattern as written, without the anchors.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

#[derive(Debug, Clone)]
struct FieldRule {
    field: String,
    rule: Rule,
    message: Option<String>,
}

/// Rule-based [`RecordValidator`].
///
/// Messages name the field by its display name. A custom message may use `{0}` for it.
/// Null values only fail [`Rule::Required`].
///
/// ```rust
/// use rust_excel_records::types::{Field, LogicalType, Schema};
/// use rust_excel_records::validation::{Rule, RuleValidator};
///
/// let schema = Schema::new(vec![
///     Field::new("name", LogicalType::String).with_display_name("Name"),
///     Field::new("age", LogicalType::Int32),
/// ]);
/// let validator = RuleValidator::for_schema(&schema)
///     .rule("name", Rule::Required)
///     .rule("age", Rule::Range { min: 0.0, max: 150.0 })
///     .pattern("name", r"[A-Za-z ]+")
///     .unwrap();
/// # let _ = validator;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RuleValidator {
    display_names: HashMap<String, String>,
    rules: Vec<FieldRule>,
}

impl RuleValidator {
    /// Create an empty validator that knows the display names of `schema`.
    pub fn for_schema(schema: &Schema) -> Self {
        let display_names = schema
            .fields
            .iter()
            .map(|f| {
                let display = f.display_name.clone().unwrap_or_else(|| f.name.clone());
                (f.name.clone(), display)
            })
            .collect();
        Self {
            display_names,
            rules: Vec::new(),
        }
    }

    /// Create an empty validator for record type `T`.
    pub fn for_record<T: Record>() -> Self {
        Self::for_schema(&T::schema())
    }

    /// Add a rule with the default message.
    pub fn rule(self, field: impl Into<String>, rule: Rule) -> Self {
        self.push(field.into(), rule, None)
    }

    /// Add a rule with a custom message (`{0}` is replaced by the display name).
    pub fn rule_with_message(
        self,
        field: impl Into<String>,
        rule: Rule,
        message: impl Into<String>,
    ) -> Self {
        self.push(field.into(), rule, Some(message.into()))
    }

    /// Add a [`Rule::Pattern`]; the pattern must match the whole value.
    pub fn pattern(self, field: impl Into<String>, pattern: &str) -> Result<Self, regex::Error> {
        let pattern = FieldPattern::new(pattern)?;
        Ok(self.push(field.into(), Rule::Pattern(pattern), None))
    }

    fn push(mut self, field: String, rule: Rule, message: Option<String>) -> Self {
        self.rules.push(FieldRule {
            field,
            rule,
            message,
        });
        self
    }

    fn display_name<'a>(&'a self, field: &'a str) -> &'a str {
        self.display_names
            .get(field)
            .map(String::as_str)
            .unwrap_or(field)
    }

    fn check(&self, rule: &FieldRule, value: &Value) -> Option<String> {
        let display = self.display_name(&rule.field);
        let default_message = match (&rule.rule, value) {
            (Rule::Required, Value::Null) => format!("The {display} field is required."),
            (Rule::Required, Value::String(s)) if s.trim().is_empty() => {
                format!("The {display} field is required.")
            }
            (Rule::Required, _) | (_, Value::Null) => return None,
            (Rule::Range { min, max }, v) => {
                let n = v.as_f64()?;
                if n >= *min && n <= *max {
                    return None;
                }
                format!("The field {display} must be between {min} and {max}.")
            }
            (Rule::Pattern(pattern), Value::String(s)) => {
                if pattern.is_match(s) {
                    return None;
                }
                format!(
                    "The field {display} must match the regular expression '{}'.",
                    pattern.as_str()
                )
            }
            (Rule::MaxLength(max), Value::String(s)) => {
                if s.chars().count() <= *max {
                    return None;
                }
                format!("The field {display} must be a string with a maximum length of {max}.")
            }
            (Rule::Pattern(_) | Rule::MaxLength(_), _) => return None,
        };
        Some(match &rule.message {
            Some(custom) => custom.replace("{0}", display),
            None => default_message,
        })
    }
}

impl<T: Record> RecordValidator<T> for RuleValidator {
    fn validate(&self, record: &T) -> Vec<ValidationError> {
        self.rules
            .iter()
            .filter_map(|rule| {
                let value = record.field(&rule.field);
                self.check(rule, &value)
                    .map(|message| ValidationError::new(rule.field.clone(), message))
            })
            .collect()
    }
}
