//! Normalize model-reported scores into the canonical 0..=100 range.

use serde_json::Value;

/// Convert a loosely-typed score into 0..=100.
///
/// Values in 0..=10 are read as a 10-point scale and multiplied by 10, so an
/// exact 10 becomes 100. Anything that isn't a finite number (or a string
/// holding one) becomes 0.
pub fn normalize_score(value: Option<&Value>) -> f64 {
  let v = match value.and_then(as_number) {
    Some(v) => v,
    None => return 0.0,
  };
  let v = if (0.0..=10.0).contains(&v) { v * 10.0 } else { v };
  // `+ 0.0` folds a negative zero into 0.
  v.clamp(0.0, 100.0) + 0.0
}

fn as_number(value: &Value) -> Option<f64> {
  let v = match value {
    Value::Number(n) => n.as_f64()?,
    Value::String(s) => s.trim().parse::<f64>().ok()?,
    _ => return None,
  };
  v.is_finite().then_some(v)
}
