//! File-selection heuristic: which repository files are worth analyzing.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use regex::Regex;
use std::sync::OnceLock;

use crate::config::SelectionRules;
use crate::error::ReviewError;
use crate::types::{RepoRef, TreeEntry};

fn github_url() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| {
    Regex::new(r"^https?://github\.com/([^/?#]+)/([^/?#]+)").expect("static regex")
  })
}

/// Parse owner and repo name out of a `https://github.com/<owner>/<repo>...` URL.
pub fn parse_repo_url(url: &str) -> Result<RepoRef, ReviewError> {
  let invalid = || ReviewError::invalid_input("github_url", "Invalid GitHub URL");
  let caps = github_url().captures(url.trim()).ok_or_else(invalid)?;

  let owner = caps[1].to_string();
  let name = caps[2].trim_end_matches(".git").to_string();
  if name.is_empty() {
    return Err(invalid());
  }
  Ok(RepoRef { owner, name })
}

/// Path-only part of the heuristic, checked in order before any blob fetch:
/// file type, extension, exclusions, then importance or shallow depth.
pub fn is_candidate(entry: &TreeEntry, rules: &SelectionRules) -> bool {
  if !entry.is_blob() {
    return false;
  }
  let path = entry.path.as_str();
  if !rules.extensions.iter().any(|ext| path.ends_with(ext.as_str())) {
    return false;
  }
  if rules
    .excluded_prefixes
    .iter()
    .any(|p| path.starts_with(p.as_str()))
  {
    return false;
  }
  rules
    .important_prefixes
    .iter()
    .any(|p| path.starts_with(p.as_str()))
    || depth(path) <= rules.max_depth
}

/// Slash count of a path.
pub fn depth(path: &str) -> usize {
  path.matches('/').count()
}

/// Content part of the heuristic: enough lines to be worth scoring.
pub fn has_enough_lines(text: &str, rules: &SelectionRules) -> bool {
  text.matches('\n').count() >= rules.min_lines
}

/// Decode base64 blob content as text, dropping bytes that aren't UTF-8.
///
/// Hosting APIs wrap base64 at 60 columns; whitespace is stripped first.
/// Content that still isn't valid base64 decodes to an empty string.
pub fn decode_blob(content: &str) -> String {
  let compact: String = content.chars().filter(|c| !c.is_ascii_whitespace()).collect();
  let bytes = match STANDARD.decode(compact.as_bytes()) {
    Ok(b) => b,
    Err(e) => {
      log::warn!("blob content is not valid base64: {}", e);
      return String::new();
    }
  };
  match String::from_utf8(bytes) {
    Ok(text) => text,
    Err(e) => String::from_utf8_lossy(e.as_bytes())
      .chars()
      .filter(|&c| c != char::REPLACEMENT_CHARACTER)
      .collect(),
  }
}
