//! Locale-aware display formatting and forgiving numeric input parsing
//!
//! Amount inputs round-trip through these helpers: the UI shows grouped
//! values ("12,345.6"), the user may type grouped or raw values, and
//! [`to_numeric_value`] recovers the number either way.

use chrono::NaiveDate;

use crate::models::Currency;

/// Group a numeric-looking string with a thousands separator.
///
/// Strips everything except digits and dots, keeps the fraction after the
/// first dot unmodified, and inserts a comma every 3 digits left of the dot.
/// Null-ish input (no digits at all) yields an empty string. Idempotent:
/// formatting an already formatted string changes nothing.
pub fn format_thousands(input: &str) -> String {
    let clean: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if !clean.contains(|c: char| c.is_ascii_digit()) {
        return String::new();
    }

    let mut parts = clean.split('.');
    let integer_part = parts.next().unwrap_or("");
    let fraction = parts.next();

    let grouped = group_digits(integer_part);
    match fraction {
        Some(frac) => format!("{}.{}", grouped, frac),
        None => grouped,
    }
}

/// Remove thousands separators; the left inverse of [`format_thousands`]
/// under numeric parsing.
pub fn strip_thousands(input: &str) -> String {
    input.replace(',', "")
}

/// Parse a (possibly grouped) amount string; 0.0 on failure, never NaN.
pub fn to_numeric_value(input: &str) -> f64 {
    strip_thousands(input).trim().parse::<f64>().unwrap_or(0.0)
}

/// Whole-unit currency display: rounded, grouped, symbol-prefixed, with a
/// leading minus for negative amounts.
pub fn format_currency(amount: f64, currency: Currency) -> String {
    let rounded = amount.round();
    let grouped = group_digits(&format!("{}", rounded.abs() as i64));
    if rounded < 0.0 {
        format!("-{}{}", currency.symbol(), grouped)
    } else {
        format!("{}{}", currency.symbol(), grouped)
    }
}

/// Short date display, DD.MM.YYYY
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
