//! Process-wide configuration, loaded once at startup and read-only afterwards.

use crate::error::ReviewError;

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RESPONSES_URL: &str = "https://api.openai.com/v1/responses";

/// Which repository files are worth sending to the model, and how much of them.
#[derive(Debug, Clone)]
pub struct SelectionRules {
  /// Files with fewer newlines than this are skipped.
  pub min_lines: usize,
  /// Fetching stops once the JSON-encoded file map exceeds this many bytes.
  pub max_payload_bytes: usize,
  /// Max slash count for paths outside the important prefixes.
  pub max_depth: usize,
  pub extensions: Vec<String>,
  pub excluded_prefixes: Vec<String>,
  pub important_prefixes: Vec<String>,
}

impl Default for SelectionRules {
  fn default() -> Self {
    Self {
      min_lines: 20,
      max_payload_bytes: 120_000,
      max_depth: 3,
      extensions: to_strings(&[
        ".py", ".js", ".ts", ".jsx", ".tsx", ".java", ".go", ".rs", ".sh", ".c", ".cpp",
      ]),
      excluded_prefixes: to_strings(&[
        "tests/",
        "docs/",
        "examples/",
        "node_modules/",
        "dist/",
        "build/",
      ]),
      important_prefixes: to_strings(&["src/", "app/", "lib/", "api/", "services/"]),
    }
  }
}

/// Credentials, endpoints and selection rules for one process.
#[derive(Debug, Clone)]
pub struct Config {
  /// Bearer token for the hosting API; unauthenticated when absent.
  pub github_token: Option<String>,
  pub openai_api_key: String,
  pub model: String,
  pub port: u16,
  pub github_api_url: String,
  pub responses_url: String,
  pub selection: SelectionRules,
}

impl Config {
  /// Config with defaults for everything except the completion key.
  pub fn new(openai_api_key: impl Into<String>) -> Self {
    Self {
      github_token: None,
      openai_api_key: openai_api_key.into(),
      model: DEFAULT_MODEL.to_string(),
      port: DEFAULT_PORT,
      github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
      responses_url: DEFAULT_RESPONSES_URL.to_string(),
      selection: SelectionRules::default(),
    }
  }

  pub fn from_env() -> Result<Self, ReviewError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build from any key lookup; empty values count as unset.
  pub fn from_lookup<F>(lookup: F) -> Result<Self, ReviewError>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    let key = get("OPENAI_API").ok_or_else(|| ReviewError::config("OPENAI_API must be set"))?;
    let mut config = Self::new(key);
    config.github_token = get("GITHUB_TOKEN");

    if let Some(port) = get("PORT") {
      config.port = port
        .trim()
        .parse()
        .map_err(|_| ReviewError::config(format!("PORT must be a valid u16, got {}", port)))?;
    }
    if let Some(url) = get("GITHUB_API_URL") {
      config.github_api_url = url.trim_end_matches('/').to_string();
    }
    if let Some(url) = get("OPENAI_RESPONSES_URL") {
      config.responses_url = url;
    }
    Ok(config)
  }
}

fn to_strings(items: &[&str]) -> Vec<String> {
  items.iter().map(|s| s.to_string()).collect()
}
