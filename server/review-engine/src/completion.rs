//! Completion endpoint seam: submit a prompt, get text back.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::config::Config;
use crate::decode;
use crate::error::ReviewError;

/// Anything that can turn a single-turn prompt into model text.
#[async_trait]
pub trait CompletionClient: Send + Sync {
  async fn complete(&self, prompt: &str) -> Result<String, ReviewError>;
}

#[derive(Serialize)]
struct ResponsesRequest<'a> {
  model: &'a str,
  input: [InputMessage<'a>; 1],
}

#[derive(Serialize)]
struct InputMessage<'a> {
  role: &'a str,
  content: &'a str,
}

/// Client for an OpenAI-style Responses endpoint.
pub struct OpenAiClient {
  http: reqwest::Client,
  url: String,
  api_key: String,
  model: String,
}

impl OpenAiClient {
  pub fn new(http: reqwest::Client, config: &Config) -> Self {
    Self {
      http,
      url: config.responses_url.clone(),
      api_key: config.openai_api_key.clone(),
      model: config.model.clone(),
    }
  }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
  async fn complete(&self, prompt: &str) -> Result<String, ReviewError> {
    let request = ResponsesRequest {
      model: &self.model,
      input: [InputMessage {
        role: "user",
        content: prompt,
      }],
    };

    let response = self
      .http
      .post(&self.url)
      .bearer_auth(&self.api_key)
      .json(&request)
      .send()
      .await?;

    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(ReviewError::upstream("completion api", status.as_u16(), &body));
    }

    let envelope: Value = serde_json::from_str(&body)?;
    Ok(decode::extract_text(&envelope))
  }
}
