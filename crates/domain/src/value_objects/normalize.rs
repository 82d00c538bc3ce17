//! Numeric normalization for loosely-typed host values.
//!
//! Resource pools and counters show up as bare numbers, as `{ "value": n }`
//! wrappers, as numeric strings, or not at all. Everything downstream only
//! ever sees the `f64` produced here.

use serde_json::Value;

/// Normalize a host value to a number.
///
/// Rules, in order:
/// - `null` → 0
/// - a number → that number
/// - an object with a `value` field → that field, normalized one level deep
/// - anything else → numeric coercion, with failures mapped to 0
pub fn normalize(value: &Value) -> f64 {
    match value {
        Value::Object(map) => match map.get("value") {
            Some(inner) => coerce(inner),
            None => 0.0,
        },
        other => coerce(other),
    }
}

/// [`normalize`] for a possibly-absent value.
pub fn normalize_opt(value: Option<&Value>) -> f64 {
    value.map_or(0.0, normalize)
}

fn coerce(value: &Value) -> f64 {
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => coerce_str(s),
        Value::Array(items) => match items.as_slice() {
            [] => 0.0,
            [single] if !single.is_array() && !single.is_object() => coerce(single),
            _ => 0.0,
        },
        Value::Object(_) => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn coerce_str(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().unwrap_or(0.0)
}

/// Render a normalized number the way a player would write it.
///
/// Integral values drop the fractional part (`3`, not `3.0`).
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_missing_are_zero() {
        assert_eq!(normalize(&Value::Null), 0.0);
        assert_eq!(normalize_opt(None), 0.0);
    }

    #[test]
    fn numbers_pass_through() {
        assert_eq!(normalize(&json!(7)), 7.0);
        assert_eq!(normalize(&json!(-2.5)), -2.5);
    }

    #[test]
    fn value_wrapper_is_unwrapped() {
        assert_eq!(normalize(&json!({ "value": 2, "max": 3 })), 2.0);
        assert_eq!(normalize(&json!({ "value": "4" })), 4.0);
    }

    #[test]
    fn value_wrapper_only_unwraps_one_level() {
        assert_eq!(normalize(&json!({ "value": { "value": 5 } })), 0.0);
    }

    #[test]
    fn object_without_value_is_zero() {
        assert_eq!(normalize(&json!({ "max": 3 })), 0.0);
    }

    #[test]
    fn strings_are_coerced() {
        assert_eq!(normalize(&json!(" 12 ")), 12.0);
        assert_eq!(normalize(&json!("")), 0.0);
        assert_eq!(normalize(&json!("twelve")), 0.0);
        assert_eq!(normalize(&json!("inf")), 0.0);
    }

    #[test]
    fn booleans_and_arrays_follow_loose_coercion() {
        assert_eq!(normalize(&json!(true)), 1.0);
        assert_eq!(normalize(&json!(false)), 0.0);
        assert_eq!(normalize(&json!([])), 0.0);
        assert_eq!(normalize(&json!(["3"])), 3.0);
        assert_eq!(normalize(&json!([1, 2])), 0.0);
    }

    #[test]
    fn format_number_drops_integral_fraction() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(-5.0), "-5");
        assert_eq!(format_number(2.5), "2.5");
    }
}
