//! Type inference for `.trs` values.
//!
//! Values are stored as text; the first interpretation that succeeds wins:
//! boolean literal, then `i64`, then `f64`, else the text itself.

use crate::value::Scalar;

/// Cast a raw value into the most specific [`Scalar`].
///
/// Never fails: anything that is not a boolean literal or a number is
/// kept verbatim as [`Scalar::Str`].
pub fn autocast(raw: &str) -> Scalar {
    if let Some(b) = boolify(raw) {
        return Scalar::Bool(b);
    }
    if let Ok(i) = raw.parse::<i64>() {
        return Scalar::Int(i);
    }
    if let Ok(f) = raw.parse::<f64>() {
        return Scalar::Float(f);
    }
    Scalar::Str(raw.to_string())
}

/// Recognise exactly `True`, `true`, `False` and `false`.
pub fn boolify(raw: &str) -> Option<bool> {
    match raw {
        "True" | "true" => Some(true),
        "False" | "false" => Some(false),
        _ => None,
    }
}
