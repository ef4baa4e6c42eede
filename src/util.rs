// Helpers for identifier normalization, lenient number coercion and
// currency formatting.
//
// Cell coercion is deliberately forgiving: a blank or garbled cell becomes
// zero instead of rejecting the row.
use num_format::{Locale, ToFormattedString};

/// Derive a key-safe identifier from a free-text label.
///
/// Lower-cases the input and replaces every maximal run of characters
/// outside `[a-z0-9]` with a single `-`. Not collision-free: labels that
/// differ only in punctuation or accents map to the same slug.
pub fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_run = false;
    for c in label.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('-');
            in_run = true;
        }
    }
    out
}

/// Parse a monetary cell. Blank, non-numeric, non-finite or negative
/// content yields `0.0`.
pub fn parse_amount(s: Option<&str>) -> f64 {
    let Some(s) = s.map(str::trim) else {
        return 0.0;
    };
    if s.is_empty() {
        return 0.0;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

/// Parse a count cell. Fractional values are truncated; anything that does
/// not read as a non-negative number yields `0`.
pub fn parse_count(s: Option<&str>) -> u32 {
    let v = parse_amount(s);
    if v > u32::MAX as f64 {
        u32::MAX
    } else {
        v as u32
    }
}

/// Parse a year cell with the same coercion as counts; `0` when missing or
/// unreadable.
pub fn parse_year(s: Option<&str>) -> i32 {
    let v = parse_amount(s);
    if v > i32::MAX as f64 {
        i32::MAX
    } else {
        v as i32
    }
}

/// Format a whole-unit BRL amount, e.g. `R$ 185.000`.
pub fn format_brl(n: f64) -> String {
    let rounded = if n.is_finite() { n.round() as i64 } else { 0 };
    let body = rounded.abs().to_formatted_string(&Locale::pt);
    if rounded < 0 {
        format!("-R$ {}", body)
    } else {
        format!("R$ {}", body)
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::pt)
}
