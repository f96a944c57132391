//! Review Engine: LLM-backed code quality scoring over HTTP.
//!
//! Accepts an uploaded file or a GitHub repository URL, sends a bounded
//! payload to a completion endpoint, and returns a normalized score record.
//!
//! No DB, no cache; configuration is loaded once and passed explicitly.

pub mod analyzer;
pub mod completion;
pub mod config;
pub mod decode;
pub mod error;
pub mod fetcher;
pub mod github;
pub mod handlers;
pub mod normalize;
pub mod parse;
pub mod select;
pub mod state;
pub mod types;

use axum::{extract::DefaultBodyLimit, routing::get, routing::post, Router};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

pub use analyzer::Analyzer;
pub use completion::CompletionClient;
pub use config::{Config, SelectionRules};
pub use error::ReviewError;
pub use fetcher::RepoFetcher;
pub use github::RepoSource;
pub use state::AppState;
pub use types::{FileMap, Payload, ScoreRecord};

/// Largest request body accepted, uploads included.
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// All routes, with permissive CORS for the browser front-end.
pub fn router(state: Arc<AppState>) -> Router {
  Router::new()
    .route("/health", get(handlers::health))
    .route("/upload/", post(handlers::upload))
    .route("/analyze_repo/", post(handlers::analyze_repo))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(CorsLayer::permissive())
    .with_state(state)
}
