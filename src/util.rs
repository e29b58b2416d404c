// Utility helpers for parsing and number formatting.
//
// This module centralizes all the "dirty" CSV/number handling so the rest of
// the code can assume clean, typed values.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in CSV exports (commas, spaces, text).
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(",", "");
    s.parse::<f64>().ok()
}

pub fn mean(v: &[f64]) -> f64 {
    // Standard arithmetic mean; returns 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

/// Format a monetary/numeric value the way the dashboard displays it:
/// `.` for thousands, `,` as the decimal mark (e.g. `1.234.567,89`).
pub fn format_brl(n: f64, decimals: usize) -> String {
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    // First, format to a plain fixed-decimal string like `1234567.89`.
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    // Use `num-format` to insert the grouping separators into the integer
    // portion; `Locale::pt` groups with `.`.
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::pt);
    if decimals > 0 {
        res.push(',');
        match frac_part {
            Some(frac) => res.push_str(frac),
            None => res.push_str(&"0".repeat(decimals)),
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Plain fixed-decimal rendering with a comma decimal mark and no grouping,
/// the convention used for the semicolon-separated detail export.
pub fn format_decimal(n: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, n).replace('.', ",")
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Thin wrapper around `num-format` for integer-like values. This is used
    // for counts in console messages (e.g., `9.855 rows loaded`).
    n.to_formatted_string(&Locale::pt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_f64_safe_handles_common_csv_noise() {
        assert_eq!(parse_f64_safe(Some(" 1,234.5 ")), Some(1234.5));
        assert_eq!(parse_f64_safe(Some("")), None);
        assert_eq!(parse_f64_safe(Some("n/a")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn mean_of_empty_slice_is_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0]), 3.0);
    }

    #[test]
    fn format_brl_groups_and_uses_comma_decimal() {
        assert_eq!(format_brl(1234567.891, 2), "1.234.567,89");
        assert_eq!(format_brl(-42.5, 2), "-42,50");
        assert_eq!(format_brl(0.0, 2), "0,00");
    }

    #[test]
    fn format_decimal_is_plain_comma_decimal() {
        assert_eq!(format_decimal(1234.5, 2), "1234,50");
    }
}
