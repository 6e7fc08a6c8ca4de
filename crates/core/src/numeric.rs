//! Lenient numeric coercion.
//!
//! Quantities arrive from clients and older data generations as numbers,
//! numeric-bearing text ("12.5 kg"), placeholders ("-"), or nothing at all.
//! Coercion never errors: a value that yields no number degrades to zero.

use serde_json::Value as JsonValue;

/// Extract the leading numeric portion of a string.
///
/// Accepts an optional leading sign, digits, and at most one decimal point;
/// trailing decoration (unit suffixes etc.) is ignored. Returns `None` when
/// no digit is found, e.g. for `"-"` or `"abc"`.
pub fn lenient_f64(text: &str) -> Option<f64> {
    let trimmed = text.trim();

    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (idx, ch) in trimmed.char_indices() {
        match ch {
            '+' | '-' if idx == 0 => end = ch.len_utf8(),
            '0'..='9' => {
                seen_digit = true;
                end = idx + 1;
            }
            '.' if !seen_dot => {
                seen_dot = true;
                end = idx + 1;
            }
            _ => break,
        }
    }

    if !seen_digit {
        return None;
    }
    trimmed[..end].parse().ok()
}

/// Coerce an arbitrary JSON value to `f64`, degrading to `0.0`.
///
/// Numbers pass through; strings go through [`lenient_f64`]; everything else
/// (null, booleans, arrays, objects) is `0.0`.
pub fn coerce_f64(value: &JsonValue) -> f64 {
    match value {
        JsonValue::Number(n) => n.as_f64().unwrap_or(0.0),
        JsonValue::String(s) => lenient_f64(s).unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plain_numbers_parse() {
        assert_eq!(lenient_f64("42"), Some(42.0));
        assert_eq!(lenient_f64("12.5"), Some(12.5));
        assert_eq!(lenient_f64("-3.25"), Some(-3.25));
        assert_eq!(lenient_f64("+7"), Some(7.0));
    }

    #[test]
    fn decorated_numbers_keep_leading_portion() {
        assert_eq!(lenient_f64("12.5 kg"), Some(12.5));
        assert_eq!(lenient_f64("  100 pcs "), Some(100.0));
        assert_eq!(lenient_f64("3.5.7"), Some(3.5));
    }

    #[test]
    fn non_numeric_yields_none() {
        assert_eq!(lenient_f64("-"), None);
        assert_eq!(lenient_f64(""), None);
        assert_eq!(lenient_f64("Manual"), None);
        assert_eq!(lenient_f64("kg 12"), None);
    }

    #[test]
    fn coercion_degrades_to_zero() {
        assert_eq!(coerce_f64(&json!(6)), 6.0);
        assert_eq!(coerce_f64(&json!("2 boxes")), 2.0);
        assert_eq!(coerce_f64(&json!("-")), 0.0);
        assert_eq!(coerce_f64(&json!(null)), 0.0);
        assert_eq!(coerce_f64(&json!(true)), 0.0);
        assert_eq!(coerce_f64(&json!([1])), 0.0);
    }
}
