//! Type coercion of raw option values.

use command_tree_core::{OptionValue, ParseError, ValueKind};
use tracing::debug;

/// Converts a raw value to the declared kind.
///
/// Only [`ValueKind::Number`] can fail; boolean coercion maps anything that
/// is not `"true"`, `"1"` or `"yes"` to `false`.
///
/// # Examples
///
/// ```
/// use command_tree_core::{OptionValue, ValueKind};
/// use command_tree_parser::coerce;
///
/// assert_eq!(coerce("-42", ValueKind::Number).unwrap(), OptionValue::Number(-42.0));
/// assert_eq!(coerce("no", ValueKind::Boolean).unwrap(), OptionValue::Boolean(false));
/// assert_eq!(
///     coerce("a, b,c", ValueKind::Array).unwrap(),
///     OptionValue::from(vec!["a", "b", "c"])
/// );
/// assert!(coerce("abc", ValueKind::Number).is_err());
/// ```
pub fn coerce(value: &str, kind: ValueKind) -> Result<OptionValue, ParseError> {
    let coerced = match kind {
        ValueKind::String => OptionValue::String(value.to_string()),
        ValueKind::Boolean => OptionValue::Boolean(matches!(value, "true" | "1" | "yes")),
        ValueKind::Number => match js_number(value) {
            Some(n) => OptionValue::Number(n),
            None => return Err(ParseError::InvalidNumber(value.to_string())),
        },
        ValueKind::Array => {
            OptionValue::Array(value.split(',').map(|v| v.trim().to_string()).collect())
        }
    };
    debug!(?kind, value, "coerced option value");
    Ok(coerced)
}

/// Parses text with JavaScript `Number()` rules, returning `None` where
/// JavaScript would produce `NaN`.
///
/// Surrounding whitespace is ignored, blank text is `0`, `0x`/`0o`/`0b`
/// prefixes select a radix (unsigned only), and `Infinity` may carry a
/// sign. Rust-only spellings such as `inf` or `nan` are rejected.
pub fn js_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }

    if let Some(n) = parse_radix(text) {
        return n;
    }

    let (sign, unsigned) = match text.as_bytes()[0] {
        b'+' => (1.0, &text[1..]),
        b'-' => (-1.0, &text[1..]),
        _ => (1.0, text),
    };
    if unsigned == "Infinity" {
        return Some(sign * f64::INFINITY);
    }
    if !is_decimal_literal(unsigned) {
        return None;
    }
    unsigned.parse::<f64>().ok().map(|n| sign * n)
}

/// Handles `0x`, `0o` and `0b` literals. The outer `None` means the text has
/// no radix prefix; `Some(None)` means it has one but the digits are bad.
fn parse_radix(text: &str) -> Option<Option<f64>> {
    let lower = text.get(..2)?.to_ascii_lowercase();
    let radix = match lower.as_str() {
        "0x" => 16,
        "0o" => 8,
        "0b" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(None);
    }

    let mut value = 0.0_f64;
    for ch in digits.chars() {
        match ch.to_digit(radix) {
            Some(d) => value = value * f64::from(radix) + f64::from(d),
            None => return Some(None),
        }
    }
    Some(Some(value))
}

/// Accepts `digits[.digits][e[+-]digits]` with at least one mantissa digit.
fn is_decimal_literal(text: &str) -> bool {
    let (mantissa, exponent) = match text.find(['e', 'E']) {
        Some(idx) => (&text[..idx], Some(&text[idx + 1..])),
        None => (text, None),
    };

    let mut digits = 0;
    let mut dots = 0;
    for ch in mantissa.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return false,
        }
    }
    if digits == 0 || dots > 1 {
        return false;
    }

    match exponent {
        None => true,
        Some(exp) => {
            let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
            !exp.is_empty() && exp.chars().all(|c| c.is_ascii_digit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_number_integers_and_decimals() {
        assert_eq!(js_number("123"), Some(123.0));
        assert_eq!(js_number("-42"), Some(-42.0));
        assert_eq!(js_number("+7"), Some(7.0));
        assert_eq!(js_number("3.5"), Some(3.5));
        assert_eq!(js_number(".5"), Some(0.5));
        assert_eq!(js_number("5."), Some(5.0));
        assert_eq!(js_number("1e3"), Some(1000.0));
        assert_eq!(js_number("2.5E-1"), Some(0.25));
    }

    #[test]
    fn test_js_number_whitespace_and_blank() {
        assert_eq!(js_number("  12  "), Some(12.0));
        assert_eq!(js_number(""), Some(0.0));
        assert_eq!(js_number("   "), Some(0.0));
    }

    #[test]
    fn test_js_number_radix_prefixes() {
        assert_eq!(js_number("0x1F"), Some(31.0));
        assert_eq!(js_number("0o17"), Some(15.0));
        assert_eq!(js_number("0B101"), Some(5.0));
        assert_eq!(js_number("0x"), None);
        assert_eq!(js_number("0xZZ"), None);
        assert_eq!(js_number("-0x10"), None);
    }

    #[test]
    fn test_js_number_infinity_spellings() {
        assert_eq!(js_number("Infinity"), Some(f64::INFINITY));
        assert_eq!(js_number("-Infinity"), Some(f64::NEG_INFINITY));
        assert_eq!(js_number("inf"), None);
        assert_eq!(js_number("infinity"), None);
    }

    #[test]
    fn test_js_number_rejects_garbage() {
        assert_eq!(js_number("abc"), None);
        assert_eq!(js_number("NaN"), None);
        assert_eq!(js_number("1.2.3"), None);
        assert_eq!(js_number("12px"), None);
        assert_eq!(js_number("1e"), None);
        assert_eq!(js_number("."), None);
        assert_eq!(js_number("--1"), None);
    }

    #[test]
    fn test_coerce_boolean_truthy_spellings() {
        for value in ["true", "1", "yes"] {
            assert_eq!(
                coerce(value, ValueKind::Boolean).unwrap(),
                OptionValue::Boolean(true)
            );
        }
        for value in ["TRUE", "Yes", "on", "0", ""] {
            assert_eq!(
                coerce(value, ValueKind::Boolean).unwrap(),
                OptionValue::Boolean(false)
            );
        }
    }

    #[test]
    fn test_coerce_array_edge_cases() {
        assert_eq!(
            coerce("", ValueKind::Array).unwrap(),
            OptionValue::Array(vec![String::new()])
        );
        assert_eq!(
            coerce("a,,b", ValueKind::Array).unwrap(),
            OptionValue::from(vec!["a", "", "b"])
        );
    }

    #[test]
    fn test_coerce_number_error_carries_value() {
        assert_eq!(
            coerce("abc", ValueKind::Number),
            Err(ParseError::InvalidNumber("abc".to_string()))
        );
    }
}
