//! Build the scoring prompt, call the model, normalize its answer.

use serde_json::{Map, Value};
use std::sync::Arc;

use crate::completion::CompletionClient;
use crate::error::ReviewError;
use crate::normalize::normalize_score;
use crate::parse;
use crate::types::{Payload, ScoreRecord};

const DEFAULT_PERFORMANCE: &str = "Unknown";
const DEFAULT_DESCRIPTION: &str = "No description";

/// Scores a payload with one completion call.
#[derive(Clone)]
pub struct Analyzer {
  client: Arc<dyn CompletionClient>,
}

impl Analyzer {
  pub fn new(client: Arc<dyn CompletionClient>) -> Self {
    Self { client }
  }

  /// Score `payload`. Upstream failures propagate; unparseable model output
  /// degrades to a default record.
  pub async fn analyze(&self, payload: &Payload) -> Result<ScoreRecord, ReviewError> {
    let prompt = build_prompt(payload)?;
    let text = self.client.complete(&prompt).await?;
    let data = parse::parse_lenient(&text);
    Ok(score_record(&data))
  }
}

/// Prompt asking for a holistic JSON-only score of the payload.
pub fn build_prompt(payload: &Payload) -> Result<String, ReviewError> {
  let code = match payload {
    Payload::MultiFile(files) => serde_json::to_string(files)?,
    Payload::SingleBlob(text) => serde_json::to_string(text)?,
  };
  Ok(format!(
    "\nAnalyze the codebase as a whole.\n\n\
     Score each metric from 0 to 100.\n\n\
     Return ONLY JSON with:\n\
     overall_score, readability, maintainability, performance, description\n\n\
     Code:\n{}\n",
    code
  ))
}

/// Map parsed model output onto the canonical record.
pub fn score_record(data: &Map<String, Value>) -> ScoreRecord {
  ScoreRecord {
    overall_score: normalize_score(data.get("overall_score")),
    readability: normalize_score(data.get("readability")),
    maintainability: normalize_score(data.get("maintainability")),
    performance: text_field(data, "performance", DEFAULT_PERFORMANCE),
    description: text_field(data, "description", DEFAULT_DESCRIPTION),
  }
}

/// Strings verbatim; other non-null values as their JSON text.
fn text_field(data: &Map<String, Value>, key: &str, default: &str) -> String {
  match data.get(key) {
    None | Some(Value::Null) => default.to_string(),
    Some(Value::String(s)) => s.clone(),
    Some(other) => other.to_string(),
  }
}
