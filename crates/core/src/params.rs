//! Lenient extraction of typed values from a JSON params object.
//!
//! A missing key, a `null`, or a value of the wrong JSON type yields the
//! supplied default. Range checks are left to
//! [`EffectConfig::validate`](crate::EffectConfig::validate).

use serde_json::Value;

/// Reads `params[name]` as an `f64`; integers are widened.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Reads `params[name]` as a non-negative integer.
///
/// Floats and negative numbers fall back to `default` rather than being
/// truncated.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}

/// Reads `params[name]` as a `u64` (used for PRNG seeds).
pub fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}
