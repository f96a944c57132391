//! Shared, read-only state for the HTTP handlers.

use std::sync::Arc;

use crate::analyzer::Analyzer;
use crate::completion::{CompletionClient, OpenAiClient};
use crate::config::Config;
use crate::fetcher::RepoFetcher;
use crate::github::{GitHubClient, RepoSource};

pub struct AppState {
  pub analyzer: Analyzer,
  pub fetcher: RepoFetcher,
}

impl AppState {
  /// Wire explicit collaborators; used directly by tests.
  pub fn new(
    config: &Config,
    completion: Arc<dyn CompletionClient>,
    source: Arc<dyn RepoSource>,
  ) -> Self {
    let analyzer = Analyzer::new(completion);
    let fetcher = RepoFetcher::new(source, analyzer.clone(), config.selection.clone());
    Self { analyzer, fetcher }
  }

  /// Production wiring: real GitHub and completion clients sharing one pool.
  pub fn from_config(config: &Config) -> Self {
    let http = reqwest::Client::new();
    let completion = Arc::new(OpenAiClient::new(http.clone(), config));
    let source = Arc::new(GitHubClient::new(http, config));
    Self::new(config, completion, source)
  }
}
