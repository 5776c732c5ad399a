//! Loose coercion rules for comparing values of different variants.
//!
//! These follow the abstract equality and relational comparison algorithms of a
//! dynamically typed scripting host: numbers and numeric strings compare
//! numerically, booleans act as `0`/`1`, and compound values are first reduced to
//! their primitive string form.
use crate::value::Value;
use itertools::Itertools;
use std::cmp::Ordering;

/// Converts any value to its string form (`ToString`).
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_to_string(*n),
        Value::String(s) => s.clone(),
        Value::List(items) => items
            .iter()
            .map(|item| {
                if item.is_nullish() {
                    String::new()
                } else {
                    to_js_string(item)
                }
            })
            .join(","),
        Value::Map(_) => "[object Object]".to_string(),
        Value::Callable(c) => format!("function {}() {{ [native code] }}", c.name()),
    }
}

/// Converts any value to a number (`ToNumber`), yielding `NaN` when there is no
/// sensible numeric reading.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Undefined => f64::NAN,
        Value::Null => 0.0,
        Value::Bool(b) => bool_to_number(*b),
        Value::Number(n) => *n,
        Value::String(s) => string_to_number(s),
        Value::List(_) | Value::Map(_) | Value::Callable(_) => {
            string_to_number(&to_js_string(value))
        }
    }
}

fn bool_to_number(b: bool) -> f64 {
    if b { 1.0 } else { 0.0 }
}

/// Parses numeric text the way the host does: surrounding whitespace is ignored,
/// an empty string is zero, and `0x`/`0o`/`0b` prefixes are honoured.
pub fn string_to_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return f64::NAN;
    }
    s.parse().unwrap_or(f64::NAN)
}

/// Formats a number the way the host prints it: integral values carry no
/// fractional part and very large or very small magnitudes use exponent form.
pub fn number_to_string(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    // `Display` prints the shortest round-trip digits without an exponent.
    if (1e-6..1e21).contains(&abs) {
        return format!("{}", n);
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, e)) if !e.starts_with('-') => format!("{}e+{}", mantissa, e),
        _ => exp,
    }
}

/// Abstract (loose) equality, `a == b`.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (x, y) if x.is_nullish() || y.is_nullish() => x.is_nullish() && y.is_nullish(),
        (Value::Number(x), Value::Number(y)) => x == y,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (x, y) if x.is_compound() && y.is_compound() => false,
        (Value::Number(x), Value::String(s)) | (Value::String(s), Value::Number(x)) => {
            *x == string_to_number(s)
        }
        (Value::Bool(x), other) | (other, Value::Bool(x)) => {
            loose_eq(&Value::Number(bool_to_number(*x)), other)
        }
        (compound, other) | (other, compound) if compound.is_compound() => {
            loose_eq(&Value::String(to_js_string(compound)), other)
        }
        _ => false,
    }
}

/// Abstract relational comparison.
///
/// Two strings (after reducing compound values to strings) compare by UTF-16
/// code units; anything else compares numerically. `None` means the operands
/// are unordered, which happens whenever either side is `NaN`.
pub fn js_compare(a: &Value, b: &Value) -> Option<Ordering> {
    let a = to_primitive(a);
    let b = to_primitive(b);
    match (&a, &b) {
        (Value::String(x), Value::String(y)) => Some(x.encode_utf16().cmp(y.encode_utf16())),
        _ => to_number(&a).partial_cmp(&to_number(&b)),
    }
}

/// Strict equality that also treats `NaN` as equal to itself (`SameValueZero`).
pub fn same_value_zero(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Number(x), Value::Number(y)) => x == y || (x.is_nan() && y.is_nan()),
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        _ => false,
    }
}

fn to_primitive(value: &Value) -> Value {
    if value.is_compound() {
        Value::String(to_js_string(value))
    } else {
        value.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_number_formatting() {
        assert_eq!(number_to_string(5.0), "5");
        assert_eq!(number_to_string(-2.5), "-2.5");
        assert_eq!(number_to_string(f64::NAN), "NaN");
        assert_eq!(number_to_string(1e21), "1e+21");
        assert_eq!(number_to_string(1e16), "10000000000000000");
        assert_eq!(number_to_string(18446744073709551616.0), "18446744073709552000");
        assert_eq!(number_to_string(1e-7), "1e-7");
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(string_to_number(" 42 "), 42.0);
        assert_eq!(string_to_number(""), 0.0);
        assert_eq!(string_to_number("0x1f"), 31.0);
        assert!(string_to_number("inf").is_nan());
        assert!(string_to_number("12px").is_nan());
    }

    #[test]
    fn test_loose_eq_coerces() {
        assert!(loose_eq(&Value::Number(2.0), &Value::from("2")));
        assert!(loose_eq(&Value::Bool(true), &Value::Number(1.0)));
        assert!(loose_eq(&Value::Bool(false), &Value::from("0")));
        assert!(loose_eq(&Value::Null, &Value::Undefined));
        assert!(!loose_eq(&Value::Null, &Value::Number(0.0)));
        assert!(!loose_eq(&Value::Number(f64::NAN), &Value::Number(f64::NAN)));
        assert!(loose_eq(&Value::from(json!([1, 2])), &Value::from("1,2")));
        assert!(!loose_eq(&Value::from(json!([1])), &Value::from(json!([1]))));
    }

    #[test]
    fn test_compare_mixed() {
        assert_eq!(
            js_compare(&Value::from("10"), &Value::from("9")),
            Some(Ordering::Less)
        );
        assert_eq!(
            js_compare(&Value::Number(10.0), &Value::from("9")),
            Some(Ordering::Greater)
        );
        assert_eq!(js_compare(&Value::Undefined, &Value::Number(1.0)), None);
        assert_eq!(
            js_compare(&Value::Null, &Value::Number(0.0)),
            Some(Ordering::Equal)
        );
    }
}
