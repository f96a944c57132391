//! Core types for the review engine (JSON contracts + internal models).

use serde::{Deserialize, Serialize, Serializer};

// ---------------------------------------------------------------------------
// Score record (JSON contract — what we return)
// ---------------------------------------------------------------------------

/// Canonical result of one analysis. Scores are always within 0..=100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
  pub overall_score: f64,
  pub readability: f64,
  pub maintainability: f64,
  pub performance: String,
  pub description: String,
}

impl ScoreRecord {
  /// Placeholder returned when filtering leaves nothing to analyze.
  pub fn no_relevant_files() -> Self {
    Self {
      overall_score: 0.0,
      readability: 0.0,
      maintainability: 0.0,
      performance: "N/A".to_string(),
      description: "No relevant files found.".to_string(),
    }
  }
}

// ---------------------------------------------------------------------------
// Analyzer input
// ---------------------------------------------------------------------------

/// Path -> text, in insertion order. Keys are unique.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FileMap {
  entries: Vec<(String, String)>,
}

impl FileMap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert or replace; a replaced path keeps its original position.
  pub fn insert(&mut self, path: impl Into<String>, text: impl Into<String>) {
    let path = path.into();
    let text = text.into();
    match self.entries.iter_mut().find(|(p, _)| *p == path) {
      Some(slot) => slot.1 = text,
      None => self.entries.push((path, text)),
    }
  }

  pub fn get(&self, path: &str) -> Option<&str> {
    self
      .entries
      .iter()
      .find(|(p, _)| p == path)
      .map(|(_, t)| t.as_str())
  }

  pub fn paths(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(p, _)| p.as_str())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Size in bytes of the map encoded as a JSON object.
  pub fn serialized_len(&self) -> usize {
    serde_json::to_vec(self).map(|v| v.len()).unwrap_or(usize::MAX)
  }
}

impl Serialize for FileMap {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_map(self.entries.iter().map(|(p, t)| (p, t)))
  }
}

/// What the analyzer is asked to score.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
  MultiFile(FileMap),
  SingleBlob(String),
}

// ---------------------------------------------------------------------------
// Hosting API models (read-only)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepoMetadata {
  #[serde(default)]
  pub default_branch: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TreeListing {
  #[serde(default)]
  pub tree: Vec<TreeEntry>,
}

/// One entry of a recursive tree listing. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TreeEntry {
  #[serde(default)]
  pub path: String,
  #[serde(default, rename = "type")]
  pub kind: String,
  #[serde(default)]
  pub url: String,
}

impl TreeEntry {
  pub fn blob(path: &str, url: &str) -> Self {
    Self {
      path: path.to_string(),
      kind: "blob".to_string(),
      url: url.to_string(),
    }
  }

  pub fn is_blob(&self) -> bool {
    self.kind == "blob"
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Blob {
  /// Base64, possibly line-wrapped.
  #[serde(default)]
  pub content: String,
}

/// Owner/name pair parsed from a repository URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
  pub owner: String,
  pub name: String,
}

// ---------------------------------------------------------------------------
// HTTP request/response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct AnalyzeRepoRequest {
  pub github_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
  pub error: String,
}

impl ErrorBody {
  pub fn new(error: impl Into<String>) -> Self {
    Self {
      error: error.into(),
    }
  }
}
