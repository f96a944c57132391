//! Repository fetcher: URL -> filtered, size-bounded file map -> score.

use std::sync::Arc;

use crate::analyzer::Analyzer;
use crate::config::SelectionRules;
use crate::error::ReviewError;
use crate::github::RepoSource;
use crate::select;
use crate::types::{FileMap, Payload, RepoRef, ScoreRecord};

const FALLBACK_BRANCH: &str = "main";

#[derive(Clone)]
pub struct RepoFetcher {
  source: Arc<dyn RepoSource>,
  analyzer: Analyzer,
  rules: SelectionRules,
}

impl RepoFetcher {
  pub fn new(source: Arc<dyn RepoSource>, analyzer: Analyzer, rules: SelectionRules) -> Self {
    Self {
      source,
      analyzer,
      rules,
    }
  }

  /// Fetch the repository at `url` and score it.
  ///
  /// Returns the "no relevant files" placeholder without calling the model
  /// when nothing survives selection.
  pub async fn fetch_and_analyze(&self, url: &str) -> Result<ScoreRecord, ReviewError> {
    let repo = select::parse_repo_url(url)?;
    let files = self.collect_files(&repo).await?;

    if files.is_empty() {
      log::info!("{}/{}: no relevant files", repo.owner, repo.name);
      return Ok(ScoreRecord::no_relevant_files());
    }

    log::info!(
      "{}/{}: analyzing {} files ({} bytes)",
      repo.owner,
      repo.name,
      files.len(),
      files.serialized_len()
    );
    self.analyzer.analyze(&Payload::MultiFile(files)).await
  }

  /// Walk the default branch tree and build the file map.
  ///
  /// The budget is checked after each insertion, so the file that crosses it
  /// is kept and fetching stops there.
  pub async fn collect_files(&self, repo: &RepoRef) -> Result<FileMap, ReviewError> {
    let metadata = self.source.metadata(repo).await?;
    let branch = metadata
      .default_branch
      .unwrap_or_else(|| FALLBACK_BRANCH.to_string());
    let tree = self.source.tree(repo, &branch).await?;

    let mut files = FileMap::new();
    for entry in tree
      .iter()
      .filter(|e| select::is_candidate(e, &self.rules))
    {
      let blob = self.source.blob(&entry.url).await?;
      let text = select::decode_blob(&blob.content);
      if !select::has_enough_lines(&text, &self.rules) {
        log::debug!("skip {}: too short", entry.path);
        continue;
      }

      log::debug!("add {}", entry.path);
      files.insert(entry.path.as_str(), text);

      if files.serialized_len() > self.rules.max_payload_bytes {
        log::info!(
          "{}/{}: payload budget reached after {} files",
          repo.owner,
          repo.name,
          files.len()
        );
        break;
      }
    }
    Ok(files)
  }
}
