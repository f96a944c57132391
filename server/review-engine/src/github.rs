//! Repository hosting API: metadata, recursive tree listing, blob content.

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;

use crate::config::Config;
use crate::error::ReviewError;
use crate::types::{Blob, RepoMetadata, RepoRef, TreeEntry, TreeListing};

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("review-engine/", env!("CARGO_PKG_VERSION"));

/// Read-only view of a hosted repository.
#[async_trait]
pub trait RepoSource: Send + Sync {
  async fn metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, ReviewError>;

  /// Full recursive file listing at `branch`.
  async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Vec<TreeEntry>, ReviewError>;

  /// Blob behind a tree entry's `url`.
  async fn blob(&self, url: &str) -> Result<Blob, ReviewError>;
}

/// GitHub REST client; authenticated only when a token is configured.
pub struct GitHubClient {
  http: reqwest::Client,
  api_url: String,
  token: Option<String>,
}

impl GitHubClient {
  pub fn new(http: reqwest::Client, config: &Config) -> Self {
    Self {
      http,
      api_url: config.github_api_url.clone(),
      token: config.github_token.clone(),
    }
  }

  async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ReviewError> {
    let mut request = self
      .http
      .get(url)
      .header(ACCEPT, GITHUB_ACCEPT)
      .header(USER_AGENT, CLIENT_USER_AGENT);
    if let Some(token) = &self.token {
      request = request.bearer_auth(token);
    }

    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
      return Err(ReviewError::upstream("github", status.as_u16(), &body));
    }
    Ok(serde_json::from_str(&body)?)
  }
}

#[async_trait]
impl RepoSource for GitHubClient {
  async fn metadata(&self, repo: &RepoRef) -> Result<RepoMetadata, ReviewError> {
    let url = format!("{}/repos/{}/{}", self.api_url, repo.owner, repo.name);
    self.get_json(&url).await
  }

  async fn tree(&self, repo: &RepoRef, branch: &str) -> Result<Vec<TreeEntry>, ReviewError> {
    let url = format!(
      "{}/repos/{}/{}/git/trees/{}?recursive=1",
      self.api_url, repo.owner, repo.name, branch
    );
    let listing: TreeListing = self.get_json(&url).await?;
    Ok(listing.tree)
  }

  async fn blob(&self, url: &str) -> Result<Blob, ReviewError> {
    self.get_json(url).await
  }
}
