//! Display formatting
//!
//! ko-KR renditions of numbers, currency amounts and timestamps. Missing or
//! non-numeric values render as the `-` placeholder.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, Timelike, Datelike};

use crate::model::Country;

/// Placeholder for values that cannot be displayed
pub const PLACEHOLDER: &str = "-";

/// Naive timestamp layouts accepted by [`format_date`], tried in order
const NAIVE_LAYOUTS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Format a number with ko-KR digit grouping and exactly `decimals` fraction digits
///
/// `None` and NaN render as `-`.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if !v.is_nan() => group_fixed(v, decimals, decimals),
        _ => PLACEHOLDER.to_string(),
    }
}

/// Format a currency amount the way `Intl.NumberFormat('ko-KR')` does
///
/// The currency follows the country: KRW has no minor unit, USD shows up to
/// two fraction digits with trailing zeros dropped.
pub fn format_currency(value: Option<f64>, country: Country) -> String {
    let v = match value {
        Some(v) if !v.is_nan() => v,
        _ => return PLACEHOLDER.to_string(),
    };

    let (symbol, max_fraction) = match country {
        Country::Kor => ("₩", 0),
        Country::Usa => ("US$", 2),
    };

    let body = group_fixed(v.abs(), 0, max_fraction);
    if v < 0.0 {
        format!("-{}{}", symbol, body)
    } else {
        format!("{}{}", symbol, body)
    }
}

/// Format an ISO 8601 timestamp as ko-KR date-time (`2024. 01. 15. 오후 02:30`)
///
/// Offsets are converted to local time; naive timestamps are shown as-is.
/// Unparseable input renders as `-`.
pub fn format_date(iso: &str) -> String {
    match parse_timestamp(iso) {
        Some(dt) => {
            let (is_pm, hour12) = dt.hour12();
            format!(
                "{}. {:02}. {:02}. {} {:02}:{:02}",
                dt.year(),
                dt.month(),
                dt.day(),
                if is_pm { "오후" } else { "오전" },
                hour12,
                dt.minute()
            )
        }
        None => {
            tracing::debug!(input = %iso, "Unparseable timestamp");
            PLACEHOLDER.to_string()
        }
    }
}

/// `+` for values at or above zero, empty otherwise (negatives carry their own sign)
pub fn sign_prefix(value: f64) -> &'static str {
    if value >= 0.0 {
        "+"
    } else {
        ""
    }
}

/// Signed percentage with two fraction digits, e.g. `+1.23%`
pub fn format_signed_percent(rate: f64) -> String {
    format!("{}{}%", sign_prefix(rate), format_number(Some(rate), 2))
}

fn parse_timestamp(input: &str) -> Option<NaiveDateTime> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).naive_local());
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, layout) {
            return Some(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Render `value` with grouped integer digits and between `min_fraction`
/// and `max_fraction` fraction digits.
///
/// A negative value keeps its sign even when it rounds to zero (`-0`).
fn group_fixed(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if value.is_infinite() {
        return if value < 0.0 { "-∞".to_string() } else { "∞".to_string() };
    }

    let (int_part, mut frac) = round_half_expand(value.abs(), max_fraction);
    while frac.len() > min_fraction && frac.ends_with('0') {
        frac.pop();
    }

    let mut result = String::with_capacity(int_part.len() + int_part.len() / 3 + frac.len() + 1);
    let digits: Vec<char> = int_part.chars().collect();
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    if !frac.is_empty() {
        result.push('.');
        result.push_str(&frac);
    }

    if value < 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Round a non-negative value to `fraction` digits, ties away from zero.
///
/// Works on the shortest decimal rendition of the double, so `1.005`
/// rounds to `1.01` and `0.125` to `0.13`. Returns the integer and
/// fraction digits.
fn round_half_expand(value: f64, fraction: usize) -> (String, String) {
    let repr = value.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(fraction))
        .collect();

    if frac_part.as_bytes().get(fraction).is_some_and(|d| *d >= b'5') {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let frac_digits = digits.split_off(digits.len() - fraction);
    let digits_to_string = |bytes: &[u8]| bytes.iter().map(|b| *b as char).collect::<String>();
    (digits_to_string(&digits), digits_to_string(&frac_digits))
}
