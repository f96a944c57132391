//! Extract the text payload from a completion-API response envelope.

use serde_json::Value;

/// Part type that carries model output text.
const OUTPUT_TEXT: &str = "output_text";

/// Pull the text out of a response envelope.
///
/// A flattened top-level `output_text` string wins. Otherwise every
/// `output[].content[]` part typed `output_text` contributes its `text`, in
/// order. Missing fields are treated as empty.
pub fn extract_text(envelope: &Value) -> String {
  if let Some(text) = envelope.get(OUTPUT_TEXT).and_then(Value::as_str) {
    return text.to_string();
  }

  let mut out = String::new();
  for message in array_field(envelope, "output") {
    for part in array_field(message, "content") {
      if part.get("type").and_then(Value::as_str) != Some(OUTPUT_TEXT) {
        continue;
      }
      if let Some(text) = part.get("text").and_then(Value::as_str) {
        out.push_str(text);
      }
    }
  }
  out
}

fn array_field<'a>(value: &'a Value, key: &str) -> &'a [Value] {
  value
    .get(key)
    .and_then(Value::as_array)
    .map(Vec::as_slice)
    .unwrap_or(&[])
}
