//! Numeric format specifiers: standard (`N2`, `F0`, `P1`, ...) and custom (`#,##0.00`).

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const MAX_SCALE: u32 = 28;

pub(super) fn format_decimal(value: Decimal, spec: Option<&str>) -> String {
    let Some(spec) = spec.map(str::trim).filter(|s| !s.is_empty()) else {
        return general(value);
    };
    match parse_standard(spec) {
        Some((kind, precision)) => format_standard(value, kind, precision),
        None => format_custom(value, spec),
    }
}

fn parse_standard(spec: &str) -> Option<(char, Option<u32>)> {
    let mut chars = spec.chars();
    let kind = chars.next()?;
    if !matches!(
        kind.to_ascii_uppercase(),
        'N' | 'F' | 'D' | 'E' | 'P' | 'C' | 'G' | 'R' | 'X'
    ) {
        return None;
    }
    let digits = chars.as_str();
    if digits.is_empty() {
        return Some((kind, None));
    }
    if digits.len() > 2 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok().map(|p| (kind, Some(p)))
}

fn format_standard(value: Decimal, kind: char, precision: Option<u32>) -> String {
    match kind.to_ascii_uppercase() {
        'N' => {
            let (neg, int, frac) = fixed_parts(value, precision.unwrap_or(2));
            signed(neg, join_fraction(group_thousands(&int), &frac))
        }
        'F' => {
            let (neg, int, frac) = fixed_parts(value, precision.unwrap_or(2));
            signed(neg, join_fraction(int, &frac))
        }
        'D' => {
            let (neg, int, _) = fixed_parts(value, 0);
            let width = precision.unwrap_or(0) as usize;
            signed(neg, format!("{int:0>width$}"))
        }
        'E' => scientific(value, precision.unwrap_or(6), kind == 'e'),
        'P' => {
            let (neg, int, frac) = scaled_parts(value, true, precision.unwrap_or(2));
            signed(neg, format!("{} %", join_fraction(group_thousands(&int), &frac)))
        }
        'C' => {
            let (neg, int, frac) = fixed_parts(value, precision.unwrap_or(2));
            let body = format!("¤{}", join_fraction(group_thousands(&int), &frac));
            if neg { format!("({body})") } else { body }
        }
        'X' => {
            let n = value.trunc().to_i64().unwrap_or_default();
            let width = precision.unwrap_or(0) as usize;
            if kind == 'x' {
                format!("{n:0>width$x}")
            } else {
                format!("{n:0>width$X}")
            }
        }
        _ => general(value),
    }
}

fn general(value: Decimal) -> String {
    value.normalize().to_string()
}

fn round(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp.min(MAX_SCALE), RoundingStrategy::MidpointAwayFromZero)
}

/// Split `|value|` rounded to `dp` places into integer and fraction digits.
///
/// The sign flag is cleared when the rounded value is zero.
fn fixed_parts(value: Decimal, dp: u32) -> (bool, String, String) {
    let dp = dp.min(MAX_SCALE);
    let mut rounded = round(value.abs(), dp);
    rounded.rescale(dp);
    let text = rounded.to_string();
    let neg = value.is_sign_negative() && !rounded.is_zero();
    match text.split_once('.') {
        Some((int, frac)) => (neg, int.to_string(), frac.to_string()),
        None => (neg, text, String::new()),
    }
}

/// [`fixed_parts`] of `value`, multiplied by 100 first when `percent` is set.
fn scaled_parts(value: Decimal, percent: bool, dp: u32) -> (bool, String, String) {
    if !percent {
        return fixed_parts(value, dp);
    }
    match value.checked_mul(Decimal::ONE_HUNDRED) {
        Some(scaled) => fixed_parts(scaled, dp),
        // Past the decimal range there are no fraction digits left to round.
        None => float_parts(value.to_f64().unwrap_or_default() * 100.0, dp),
    }
}

fn float_parts(value: f64, dp: u32) -> (bool, String, String) {
    let text = format!("{:.*}", dp.min(MAX_SCALE) as usize, value.abs());
    let neg = value.is_sign_negative() && value != 0.0;
    match text.split_once('.') {
        Some((int, frac)) => (neg, int.to_string(), frac.to_string()),
        None => (neg, text, String::new()),
    }
}

fn join_fraction(int: String, frac: &str) -> String {
    if frac.is_empty() {
        int
    } else {
        format!("{int}.{frac}")
    }
}

fn signed(neg: bool, body: String) -> String {
    if neg { format!("-{body}") } else { body }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn scientific(value: Decimal, precision: u32, lower: bool) -> String {
    let f = value.to_f64().unwrap_or_default();
    let text = format!("{:.*e}", precision as usize, f.abs());
    let (mantissa, exp) = text.split_once('e').unwrap_or((text.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or_default();
    let marker = if lower { 'e' } else { 'E' };
    let exp_sign = if exp < 0 { '-' } else { '+' };
    signed(
        f < 0.0,
        format!("{mantissa}{marker}{exp_sign}{:03}", exp.unsigned_abs()),
    )
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Digit { zero: bool },
    Point,
    Group,
    Percent,
    Literal(String),
}

#[derive(Debug, Default)]
struct Section {
    tokens: Vec<Token>,
}

impl Section {
    fn parse(text: &str) -> Self {
        let mut tokens = Vec::new();
        let mut chars = text.chars();
        while let Some(ch) = chars.next() {
            match ch {
                '0' => tokens.push(Token::Digit { zero: true }),
                '#' => tokens.push(Token::Digit { zero: false }),
                '.' if !tokens.contains(&Token::Point) => tokens.push(Token::Point),
                ',' => tokens.push(Token::Group),
                '%' => tokens.push(Token::Percent),
                '\\' => {
                    if let Some(next) = chars.next() {
                        tokens.push(Token::Literal(next.to_string()));
                    }
                }
                '\'' | '"' => {
                    let quoted: String = chars.by_ref().take_while(|c| *c != ch).collect();
                    tokens.push(Token::Literal(quoted));
                }
                other => tokens.push(Token::Literal(other.to_string())),
            }
        }
        Self { tokens }
    }

    fn render(&self, value: Decimal, with_sign: bool) -> String {
        let point = self
            .tokens
            .iter()
            .position(|t| *t == Token::Point)
            .unwrap_or(self.tokens.len());
        let (int_tokens, frac_tokens) = self.tokens.split_at(point);
        let frac_tokens = frac_tokens.get(1..).unwrap_or(&[]);

        let is_digit = |t: &Token| matches!(t, Token::Digit { .. });
        let first_digit = int_tokens.iter().position(is_digit);
        let last_digit = int_tokens.iter().rposition(is_digit);

        // Commas between digit placeholders group; commas right after the last one scale by 1000.
        let mut grouping = false;
        let mut scale_div = 0u32;
        if let (Some(first), Some(last)) = (first_digit, last_digit) {
            grouping = int_tokens[first..last].contains(&Token::Group);
            scale_div = int_tokens[last + 1..]
                .iter()
                .take_while(|t| **t == Token::Group)
                .count() as u32;
        }

        let mut scaled = value.abs();
        for _ in 0..scale_div {
            scaled /= Decimal::ONE_THOUSAND;
        }
        let percent = self.tokens.contains(&Token::Percent);

        let frac_digits: Vec<&Token> = frac_tokens.iter().filter(|t| is_digit(t)).collect();
        let max_frac = frac_digits.len() as u32;
        let min_frac = frac_digits
            .iter()
            .rposition(|t| **t == Token::Digit { zero: true })
            .map(|p| p + 1)
            .unwrap_or(0);
        let int_zeros = int_tokens
            .iter()
            .filter(|t| **t == Token::Digit { zero: true })
            .count();

        let (_, int, mut frac) = scaled_parts(scaled, percent, max_frac);
        while frac.len() > min_frac && frac.ends_with('0') {
            frac.pop();
        }
        let mut int = int.trim_start_matches('0').to_string();
        if int.len() < int_zeros {
            int = format!("{int:0>int_zeros$}");
        }
        if grouping {
            int = group_thousands(&int);
        }

        let nonzero = int.chars().chain(frac.chars()).any(|c| matches!(c, '1'..='9'));
        let negative = with_sign && value.is_sign_negative() && nonzero;

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&fill_integer(int_tokens, &int));
        if !frac.is_empty() {
            out.push('.');
        }
        out.push_str(&fill_fraction(frac_tokens, &frac));
        out
    }
}

// Assigns digits right to left; the leftmost placeholder takes whatever remains.
fn fill_integer(tokens: &[Token], digits: &str) -> String {
    let mut remaining: Vec<char> = digits.chars().collect();
    let first_digit = tokens.iter().position(|t| matches!(t, Token::Digit { .. }));
    let mut parts: Vec<String> = Vec::with_capacity(tokens.len());
    for (idx, token) in tokens.iter().enumerate().rev() {
        let part = match token {
            Token::Digit { .. } if Some(idx) == first_digit => remaining.drain(..).collect(),
            Token::Digit { .. } => remaining.pop().map(String::from).unwrap_or_default(),
            Token::Percent => "%".to_string(),
            Token::Literal(text) => text.clone(),
            Token::Group | Token::Point => String::new(),
        };
        parts.push(part);
    }
    parts.reverse();
    parts.concat()
}

fn fill_fraction(tokens: &[Token], digits: &str) -> String {
    let mut remaining = digits.chars();
    let mut out = String::new();
    for token in tokens {
        match token {
            Token::Digit { .. } => {
                if let Some(ch) = remaining.next() {
                    out.push(ch);
                }
            }
            Token::Percent => out.push('%'),
            Token::Literal(text) => out.push_str(text),
            Token::Group | Token::Point => {}
        }
    }
    out
}

fn split_sections(spec: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for (idx, ch) in spec.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (ch, quote) {
            ('\\', _) => escaped = true,
            ('\'' | '"', None) => quote = Some(ch),
            (c, Some(q)) if c == q => quote = None,
            (';', None) => {
                sections.push(&spec[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    sections.push(&spec[start..]);
    sections
}

fn format_custom(value: Decimal, spec: &str) -> String {
    let sections = split_sections(spec);
    match (sections.len(), value.is_sign_negative(), value.is_zero()) {
        (n, _, true) if n >= 3 && !sections[2].is_empty() => Section::parse(sections[2]).render(value, false),
        (n, true, false) if n >= 2 && !sections[1].is_empty() => Section::parse(sections[1]).render(value, false),
        _ => Section::parse(sections[0]).render(value, true),
    }
}
