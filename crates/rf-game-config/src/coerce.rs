//! Numeric coercion for client-supplied scalars
//!
//! Strings are read the lenient way browsers read numbers out of form fields:
//! leading whitespace is skipped and the longest numeric prefix wins, so
//! `"5abc"` is `5.0` and `"  .25"` is `0.25`. Anything that does not produce a
//! finite value is rejected.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Coercion failure kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoercionFailure {
    /// No numeric prefix, or the result is not finite
    NotANumber,
    /// Input is not a string or a number
    UnsupportedType,
}

impl fmt::Display for CoercionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => f.write_str("not-a-number"),
            Self::UnsupportedType => f.write_str("unsupported-type"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot coerce {raw_input} to a number ({reason})")]
pub struct CoercionError {
    pub reason: CoercionFailure,
    /// Raw input rendered as JSON text
    pub raw_input: String,
}

impl CoercionError {
    fn new(reason: CoercionFailure, raw: &Value) -> Self {
        Self {
            reason,
            raw_input: raw.to_string(),
        }
    }
}

/// Coerce a JSON scalar into a finite `f64`
pub fn coerce_number(input: &Value) -> Result<f64, CoercionError> {
    let parsed = match input {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_float_prefix(s),
        _ => return Err(CoercionError::new(CoercionFailure::UnsupportedType, input)),
    };

    match parsed {
        Some(v) if v.is_finite() => Ok(v),
        _ => Err(CoercionError::new(CoercionFailure::NotANumber, input)),
    }
}

/// Parse the longest `[sign] digits [. digits] [e [sign] digits]` prefix
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let len = bytes.len();
    let digits_from = |mut i: usize| {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if end < len && bytes[end] == b'.' {
        let frac_end = digits_from(end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits > 0 || frac_digits > 0 {
            mantissa_digits += frac_digits;
            end = frac_end;
        }
    }

    if mantissa_digits == 0 {
        return None;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp = end + 1;
        if exp < len && matches!(bytes[exp], b'+' | b'-') {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse::<f64>().ok()
}
