//! Date/time format specifiers: standard single letters (`d`, `G`, `s`, ...) and custom patterns
//! (`yyyy-MM-dd HH:mm:ss`).

use chrono::{Datelike, NaiveDateTime, Timelike};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub(super) fn format_datetime(value: &NaiveDateTime, spec: Option<&str>) -> String {
    let spec = spec.unwrap_or("G");
    let pattern = if spec.chars().count() == 1 {
        standard_pattern(spec).unwrap_or(spec)
    } else {
        spec
    };
    format_custom(value, pattern)
}

fn standard_pattern(spec: &str) -> Option<&'static str> {
    Some(match spec {
        "d" => "MM/dd/yyyy",
        "D" => "dddd, dd MMMM yyyy",
        "f" => "dddd, dd MMMM yyyy HH:mm",
        "F" => "dddd, dd MMMM yyyy HH:mm:ss",
        "g" => "MM/dd/yyyy HH:mm",
        "G" => "MM/dd/yyyy HH:mm:ss",
        "M" | "m" => "MMMM dd",
        "O" | "o" => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffff",
        "R" | "r" => "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'",
        "s" => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
        "t" => "HH:mm",
        "T" => "HH:mm:ss",
        "u" => "yyyy'-'MM'-'dd HH':'mm':'ss'Z'",
        "Y" | "y" => "yyyy MMMM",
        _ => return None,
    })
}

fn format_custom(value: &NaiveDateTime, pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        let run = chars[i..].iter().take_while(|c| **c == ch).count();
        match ch {
            'y' => {
                let year = value.year();
                match run {
                    1 => out.push_str(&(year % 100).to_string()),
                    2 => out.push_str(&format!("{:02}", year % 100)),
                    n => out.push_str(&format!("{year:0n$}")),
                }
            }
            'M' => {
                let month = value.month();
                match run {
                    1 => out.push_str(&month.to_string()),
                    2 => out.push_str(&format!("{month:02}")),
                    3 => out.push_str(&MONTHS[month as usize - 1][..3]),
                    _ => out.push_str(MONTHS[month as usize - 1]),
                }
            }
            'd' => {
                let weekday = WEEKDAYS[value.weekday().num_days_from_monday() as usize];
                match run {
                    1 => out.push_str(&value.day().to_string()),
                    2 => out.push_str(&format!("{:02}", value.day())),
                    3 => out.push_str(&weekday[..3]),
                    _ => out.push_str(weekday),
                }
            }
            'H' => push_number(&mut out, value.hour(), run),
            'h' => {
                let hour = match value.hour() % 12 {
                    0 => 12,
                    h => h,
                };
                push_number(&mut out, hour, run);
            }
            'm' => push_number(&mut out, value.minute(), run),
            's' => push_number(&mut out, value.second(), run),
            'f' | 'F' => {
                let digits = format!("{:09}", value.nanosecond() % 1_000_000_000);
                let take = run.min(9);
                let mut frac = digits[..take].to_string();
                if ch == 'F' {
                    frac.truncate(frac.trim_end_matches('0').len());
                }
                out.push_str(&frac);
            }
            't' => {
                let marker = if value.hour() < 12 { "AM" } else { "PM" };
                out.push_str(if run == 1 { &marker[..1] } else { marker });
            }
            'z' => out.push_str(match run {
                1 => "+0",
                2 => "+00",
                _ => "+00:00",
            }),
            'K' => {}
            '\'' | '"' => {
                let end = chars[i + 1..]
                    .iter()
                    .position(|c| *c == ch)
                    .map(|p| i + 1 + p)
                    .unwrap_or(chars.len());
                out.extend(&chars[i + 1..end]);
                i = end + 1;
                continue;
            }
            '\\' => {
                if let Some(next) = chars.get(i + 1) {
                    out.push(*next);
                }
                i += 2;
                continue;
            }
            // `%d` selects the single-letter custom token instead of the standard pattern.
            '%' => {
                i += 1;
                continue;
            }
            other => {
                out.push(other);
                i += 1;
                continue;
            }
        }
        i += run;
    }
    out
}

fn push_number(out: &mut String, n: u32, run: usize) {
    if run >= 2 {
        out.push_str(&format!("{n:02}"));
    } else {
        out.push_str(&n.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::format_datetime;
    use chrono::{NaiveDate, NaiveDateTime};

    fn sample() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2021, 1, 5)
            .unwrap()
            .and_hms_milli_opt(14, 7, 9, 250)
            .unwrap()
    }

    #[test]
    fn custom_tokens() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, Some("yyyy-MM-dd HH:mm:ss")), "2021-01-05 14:07:09");
        assert_eq!(format_datetime(&dt, Some("yy/M/d h:m tt")), "21/1/5 2:7 PM");
        assert_eq!(format_datetime(&dt, Some("dddd, MMM dd")), "Tuesday, Jan 05");
        assert_eq!(format_datetime(&dt, Some("HH:mm:ss.fff")), "14:07:09.250");
        assert_eq!(format_datetime(&dt, Some("ss.FFF")), "09.25");
        assert_eq!(format_datetime(&dt, Some("'Day' d 'of' MMMM")), "Day 5 of January");
        assert_eq!(format_datetime(&dt, Some("%d")), "5");
    }

    #[test]
    fn standard_specifiers() {
        let dt = sample();
        assert_eq!(format_datetime(&dt, Some("d")), "01/05/2021");
        assert_eq!(format_datetime(&dt, Some("s")), "2021-01-05T14:07:09");
        assert_eq!(format_datetime(&dt, Some("t")), "14:07");
        assert_eq!(format_datetime(&dt, None), "01/05/2021 14:07:09");
        assert_eq!(format_datetime(&dt, Some("o")), "2021-01-05T14:07:09.2500000");
    }
}
