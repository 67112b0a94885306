//! JSON helpers for deterministic token serialization
//!
//! Parsing goes through `miniserde`; writing is done by hand so that member
//! order is fixed, with `miniserde` doing the string and float escaping.

use crate::error::{Error, Result};
use miniserde::json::{Number, Object, Value};

/// Largest integer an f64 represents exactly (2^53)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Append a JSON string literal
pub(crate) fn write_string(out: &mut String, value: &str) {
    out.push_str(&miniserde::json::to_string(value));
}

/// Append a JSON number
///
/// Integral values in the exact f64 range are written without a fraction so
/// that `42.0` serializes as `42`.
pub(crate) fn write_number(out: &mut String, value: f64) {
    if value.fract() == 0.0 && value.abs() < MAX_SAFE_INTEGER {
        out.push_str(&(value as i64).to_string());
    } else {
        out.push_str(&miniserde::json::to_string(&value));
    }
}

/// Append `"name":` inside an object, preceded by a comma when needed
pub(crate) fn write_member_name(out: &mut String, name: &str, first: &mut bool) {
    if !*first {
        out.push(',');
    }
    *first = false;
    write_string(out, name);
    out.push(':');
}

/// Convert a JSON number to f64
pub(crate) fn number_to_f64(number: &Number) -> f64 {
    match number {
        Number::U64(n) => *n as f64,
        Number::I64(n) => *n as f64,
        Number::F64(n) => *n,
    }
}

/// Parse a decoded segment that must contain a JSON object
pub(crate) fn parse_object(bytes: &[u8], segment: &str) -> Result<Object> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| Error::FormatInvalidJson(format!("{segment} is not valid UTF-8: {e}")))?;

    match miniserde::json::from_str::<Value>(text) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(Error::FormatInvalidJson(format!(
            "{segment} is not a JSON object"
        ))),
        Err(e) => Err(Error::FormatInvalidJson(format!(
            "Failed to parse {segment}: {e}"
        ))),
    }
}
