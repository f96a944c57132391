//! Binary entrypoint for the review engine.

use std::net::SocketAddr;
use std::sync::Arc;

use review_engine::{AppState, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
    .target(env_logger::Target::Stderr)
    .init();

  let config = Config::from_env()?;
  if config.github_token.is_none() {
    log::warn!("GITHUB_TOKEN not set; GitHub calls are unauthenticated");
  }

  let state = Arc::new(AppState::from_config(&config));
  let app = review_engine::router(state);

  let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
  log::info!("review-engine listening on http://{} (model {})", addr, config.model);

  let listener = tokio::net::TcpListener::bind(addr).await?;
  axum::serve(listener, app).await?;

  Ok(())
}
