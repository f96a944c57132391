//! Structured error types for the review engine.

use thiserror::Error;

/// Max chars of an upstream error body carried into messages.
const MAX_UPSTREAM_BODY: usize = 200;

#[derive(Debug, Error)]
pub enum ReviewError {
  #[error("invalid input: {field}: {reason}")]
  InvalidInput { field: String, reason: String },

  #[error("config: {0}")]
  Config(String),

  #[error("{service} returned {status}: {body}")]
  Upstream {
    service: &'static str,
    status: u16,
    body: String,
  },

  #[error("http: {0}")]
  Http(#[from] reqwest::Error),

  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}

impl ReviewError {
  pub fn invalid_input(field: &str, reason: &str) -> Self {
    Self::InvalidInput {
      field: field.to_string(),
      reason: reason.to_string(),
    }
  }

  pub fn config(msg: impl Into<String>) -> Self {
    Self::Config(msg.into())
  }

  pub fn upstream(service: &'static str, status: u16, body: &str) -> Self {
    let body = match body.char_indices().nth(MAX_UPSTREAM_BODY) {
      Some((cut, _)) => format!("{}... (truncated)", &body[..cut]),
      None => body.to_string(),
    };
    Self::Upstream {
      service,
      status,
      body,
    }
  }

  /// True for errors caused by the caller rather than by an upstream API.
  pub fn is_client_error(&self) -> bool {
    matches!(self, Self::InvalidInput { .. })
  }

  /// Message shown to the client: the bare reason for input errors.
  pub fn public_message(&self) -> String {
    match self {
      Self::InvalidInput { reason, .. } => reason.clone(),
      other => other.to_string(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn upstream_body_is_truncated() {
    let long = "x".repeat(500);
    let err = ReviewError::upstream("github", 403, &long);
    let msg = err.to_string();
    assert!(msg.starts_with("github returned 403: "));
    assert!(msg.ends_with("... (truncated)"));
    assert!(msg.len() < 300);
  }

  #[test]
  fn invalid_input_is_client_error() {
    let err = ReviewError::invalid_input("github_url", "Invalid GitHub URL");
    assert!(err.is_client_error());
    assert_eq!(err.public_message(), "Invalid GitHub URL");
    assert!(err.to_string().contains("github_url"));
    assert!(!ReviewError::config("OPENAI_API must be set").is_client_error());
  }
}
