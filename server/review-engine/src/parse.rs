//! Lenient extraction of a JSON object from free-form model output.

use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;

/// First `{` through the last `}`, across newlines.
fn brace_span() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"\{[\s\S]*\}").expect("static regex"))
}

/// Parse `text` as a JSON object, tolerating prose or fences around it.
///
/// Returns an empty map when no object can be recovered, including when the
/// brace span itself is malformed.
pub fn parse_lenient(text: &str) -> Map<String, Value> {
  if let Ok(value) = serde_json::from_str::<Value>(text) {
    return into_object(value);
  }

  let span = match brace_span().find(text) {
    Some(m) => m.as_str(),
    None => {
      log::warn!("model output contained no JSON object ({} bytes)", text.len());
      return Map::new();
    }
  };

  match serde_json::from_str::<Value>(span) {
    Ok(value) => into_object(value),
    Err(e) => {
      log::warn!("model output JSON span did not parse: {}", e);
      Map::new()
    }
  }
}

fn into_object(value: Value) -> Map<String, Value> {
  match value {
    Value::Object(map) => map,
    _ => Map::new(),
  }
}
