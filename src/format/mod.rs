//! Composite format directives.
//!
//! A directive is literal text with `{0}` / `{0,align:spec}` placeholders, e.g. `{0:N2}` or
//! `Due {0:yyyy-MM-dd}`. `{{` and `}}` escape braces. A directive without any placeholder is
//! taken as a bare format specifier (`N2` is the same as `{0:N2}`).
//!
//! Rendering is culture invariant and rounds midpoints away from zero.
//!
//! ```rust
//! use rust_excel_records::format::{format_datetime, format_f64};
//!
//! assert_eq!(format_f64(1234.5, "{0:N2}"), "1,234.50");
//! let dt = chrono::NaiveDate::from_ymd_opt(2021, 1, 25).unwrap().and_hms_opt(8, 5, 0).unwrap();
//! assert_eq!(format_datetime(&dt, "{0:yyyy/MM/dd HH:mm}"), "2021/01/25 08:05");
//! ```

mod datetime;
mod numeric;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

/// Format an exact decimal through a directive.
pub fn format_decimal(value: Decimal, directive: &str) -> String {
    render(directive, |spec| numeric::format_decimal(value, spec))
}

/// Format a floating point number through a directive.
///
/// Non-finite values render as `NaN`, `Infinity` or `-Infinity`.
pub fn format_f64(value: f64, directive: &str) -> String {
    match Decimal::from_f64(value) {
        Some(d) => format_decimal(d, directive),
        None => render(directive, |_| non_finite_text(value).to_string()),
    }
}

/// Format a date/time through a directive.
pub fn format_datetime(value: &NaiveDateTime, directive: &str) -> String {
    render(directive, |spec| datetime::format_datetime(value, spec))
}

fn non_finite_text(value: f64) -> &'static str {
    if value.is_nan() {
        "NaN"
    } else if value.is_sign_negative() {
        "-Infinity"
    } else {
        "Infinity"
    }
}

#[derive(Debug, PartialEq)]
enum Segment<'a> {
    Literal(String),
    Placeholder { align: i32, spec: Option<&'a str> },
}

fn render(directive: &str, mut value_text: impl FnMut(Option<&str>) -> String) -> String {
    let mut out = String::new();
    for segment in parse_directive(directive) {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Placeholder { align, spec } => {
                let text = value_text(spec);
                let width = align.unsigned_abs() as usize;
                let pad = width.saturating_sub(text.chars().count());
                if align > 0 {
                    out.extend(std::iter::repeat_n(' ', pad));
                    out.push_str(&text);
                } else {
                    out.push_str(&text);
                    out.extend(std::iter::repeat_n(' ', pad));
                }
            }
        }
    }
    out
}

fn parse_directive(directive: &str) -> Vec<Segment<'_>> {
    if !directive.contains('{') {
        let spec = (!directive.is_empty()).then_some(directive);
        return vec![Segment::Placeholder { align: 0, spec }];
    }

    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = directive;
    while let Some(ch) = rest.chars().next() {
        match ch {
            '{' if rest.starts_with("{{") => {
                literal.push('{');
                rest = &rest[2..];
            }
            '}' if rest.starts_with("}}") => {
                literal.push('}');
                rest = &rest[2..];
            }
            '{' => match rest.find('}') {
                Some(close) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(parse_placeholder(&rest[1..close]));
                    rest = &rest[close + 1..];
                }
                None => {
                    literal.push_str(rest);
                    rest = "";
                }
            },
            other => {
                literal.push(other);
                rest = &rest[other.len_utf8()..];
            }
        }
    }
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}

// `index[,alignment][:spec]`; the index is ignored since there is only one argument.
fn parse_placeholder(body: &str) -> Segment<'_> {
    let (head, spec) = match body.split_once(':') {
        Some((head, spec)) => (head, Some(spec)),
        None => (body, None),
    };
    let align = head
        .split_once(',')
        .and_then(|(_, a)| a.trim().parse::<i32>().ok())
        .unwrap_or(0);
    Segment::Placeholder {
        align,
        spec: spec.filter(|s| !s.is_empty()),
    }
}
