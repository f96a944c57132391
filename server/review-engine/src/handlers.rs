//! HTTP handlers for the review engine.

use axum::{
  extract::{
    multipart::{MultipartError, MultipartRejection},
    rejection::JsonRejection,
    Multipart, State,
  },
  http::StatusCode,
  response::{IntoResponse, Response},
  Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::error::ReviewError;
use crate::state::AppState;
use crate::types::{AnalyzeRepoRequest, ErrorBody, Payload, ScoreRecord};

const UPLOAD_FIELD: &str = "file";

impl IntoResponse for ReviewError {
  fn into_response(self) -> Response {
    let status = if self.is_client_error() {
      StatusCode::BAD_REQUEST
    } else {
      StatusCode::BAD_GATEWAY
    };
    (status, Json(ErrorBody::new(self.public_message()))).into_response()
  }
}

pub async fn health() -> &'static str {
  "ok"
}

/// `POST /upload/`: score one uploaded UTF-8 file as a single blob.
pub async fn upload(
  State(state): State<Arc<AppState>>,
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ScoreRecord>, ReviewError> {
  let request_id = Uuid::new_v4();
  let bytes = read_upload(multipart).await?;
  let text = upload_text(bytes)?;
  log::info!("[{}] upload: {} bytes", request_id, text.len());

  let record = state
    .analyzer
    .analyze(&Payload::SingleBlob(text))
    .await
    .map_err(|e| log_failure(request_id, e))?;
  Ok(Json(record))
}

/// `POST /analyze_repo/`: fetch and score a public repository.
pub async fn analyze_repo(
  State(state): State<Arc<AppState>>,
  payload: Result<Json<AnalyzeRepoRequest>, JsonRejection>,
) -> Result<Json<ScoreRecord>, ReviewError> {
  let request_id = Uuid::new_v4();
  let Json(request) = payload.map_err(|e| {
    log::warn!("[{}] analyze_repo: bad body: {}", request_id, e);
    ReviewError::invalid_input("github_url", "github_url is required")
  })?;
  log::info!("[{}] analyze_repo: {}", request_id, request.github_url);

  let record = state
    .fetcher
    .fetch_and_analyze(&request.github_url)
    .await
    .map_err(|e| log_failure(request_id, e))?;
  Ok(Json(record))
}

/// Bytes of the first `file` field.
async fn read_upload(
  multipart: Result<Multipart, MultipartRejection>,
) -> Result<Vec<u8>, ReviewError> {
  let missing = || ReviewError::invalid_input(UPLOAD_FIELD, "No file provided");
  let mut multipart = multipart.map_err(|_| missing())?;

  let unreadable = |e: MultipartError| {
    ReviewError::invalid_input(UPLOAD_FIELD, &format!("unreadable upload: {}", e))
  };

  while let Some(field) = multipart.next_field().await.map_err(unreadable)? {
    if field.name() != Some(UPLOAD_FIELD) {
      continue;
    }
    let bytes = field.bytes().await.map_err(unreadable)?;
    return Ok(bytes.to_vec());
  }
  Err(missing())
}

/// Strict UTF-8 decode of an uploaded file.
pub fn upload_text(bytes: Vec<u8>) -> Result<String, ReviewError> {
  String::from_utf8(bytes)
    .map_err(|_| ReviewError::invalid_input(UPLOAD_FIELD, "File must be UTF-8 text"))
}

fn log_failure(request_id: Uuid, err: ReviewError) -> ReviewError {
  if err.is_client_error() {
    log::warn!("[{}] rejected: {}", request_id, err);
  } else {
    log::error!("[{}] upstream failure: {}", request_id, err);
  }
  err
}
