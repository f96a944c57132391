//! Wire-level tests for the GitHub and completion clients against a local server.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use review_engine::completion::OpenAiClient;
use review_engine::github::GitHubClient;
use review_engine::types::RepoRef;
use review_engine::{CompletionClient, Config, RepoSource, ReviewError};

/// One request as the local server saw it.
#[derive(Debug, Clone)]
struct Seen {
  path: String,
  headers: HeaderMap,
  body: Bytes,
}

type Log = Arc<Mutex<Vec<Seen>>>;

async fn upstream(State(log): State<Log>, uri: Uri, headers: HeaderMap, body: Bytes) -> Response {
  let path = uri.path().to_string();
  log.lock().unwrap().push(Seen {
    path: path.clone(),
    headers,
    body,
  });

  match path.as_str() {
    "/repos/acme/widgets" => {
      axum::Json(json!({"default_branch": "dev", "private": false})).into_response()
    }
    "/repos/acme/widgets/git/trees/dev" => axum::Json(json!({
      "sha": "abc",
      "tree": [
        {"path": "src", "type": "tree", "url": "http://x/trees/1"},
        {"path": "src/app.py", "type": "blob", "url": "http://x/blobs/2"}
      ],
      "truncated": false
    }))
    .into_response(),
    "/v1/responses" => axum::Json(json!({
      "id": "resp_1",
      "output": [
        {"type": "message", "content": [
          {"type": "output_text", "text": "{\"overall_score\":"},
          {"type": "output_text", "text": "8}"}
        ]}
      ]
    }))
    .into_response(),
    "/v1/broken" => (StatusCode::OK, "<html>not json</html>").into_response(),
    "/v1/limited" => (StatusCode::TOO_MANY_REQUESTS, r#"{"error":"slow down"}"#).into_response(),
    _ => (StatusCode::NOT_FOUND, r#"{"message":"Not Found"}"#).into_response(),
  }
}

async fn serve() -> (SocketAddr, Log) {
  let log: Log = Arc::default();
  let app = Router::new().fallback(upstream).with_state(log.clone());
  let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move {
    axum::serve(listener, app).await.unwrap();
  });
  (addr, log)
}

fn config(addr: SocketAddr, token: Option<&str>, responses_path: &str) -> Config {
  let mut config = Config::new("sk-test");
  config.github_api_url = format!("http://{}", addr);
  config.responses_url = format!("http://{}{}", addr, responses_path);
  config.github_token = token.map(str::to_string);
  config
}

fn repo(name: &str) -> RepoRef {
  RepoRef {
    owner: "acme".into(),
    name: name.into(),
  }
}

fn header_of(seen: &Seen, name: header::HeaderName) -> Option<String> {
  seen
    .headers
    .get(name)
    .and_then(|v| v.to_str().ok())
    .map(str::to_string)
}

#[tokio::test]
async fn github_without_token_sends_no_authorization() {
  let (addr, log) = serve().await;
  let client = GitHubClient::new(reqwest::Client::new(), &config(addr, None, "/v1/responses"));

  let metadata = client.metadata(&repo("widgets")).await.unwrap();
  assert_eq!(metadata.default_branch.as_deref(), Some("dev"));

  let seen = log.lock().unwrap()[0].clone();
  assert_eq!(seen.path, "/repos/acme/widgets");
  assert_eq!(header_of(&seen, header::AUTHORIZATION), None);
  assert_eq!(
    header_of(&seen, header::ACCEPT).as_deref(),
    Some("application/vnd.github+json")
  );
  let ua = header_of(&seen, header::USER_AGENT).unwrap();
  assert!(ua.starts_with("review-engine/"), "user agent {}", ua);
}

#[tokio::test]
async fn github_with_token_sends_bearer() {
  let (addr, log) = serve().await;
  let client = GitHubClient::new(
    reqwest::Client::new(),
    &config(addr, Some("tok"), "/v1/responses"),
  );

  client.metadata(&repo("widgets")).await.unwrap();

  let seen = log.lock().unwrap()[0].clone();
  assert_eq!(header_of(&seen, header::AUTHORIZATION).as_deref(), Some("Bearer tok"));
}

#[tokio::test]
async fn github_tree_is_listed_recursively() {
  let (addr, log) = serve().await;
  let client = GitHubClient::new(reqwest::Client::new(), &config(addr, None, "/v1/responses"));

  let tree = client.tree(&repo("widgets"), "dev").await.unwrap();

  assert_eq!(tree.len(), 2);
  assert!(!tree[0].is_blob());
  assert!(tree[1].is_blob());
  assert_eq!(tree[1].path, "src/app.py");
  assert_eq!(log.lock().unwrap()[0].path, "/repos/acme/widgets/git/trees/dev");
}

#[tokio::test]
async fn github_error_status_becomes_upstream_error() {
  let (addr, _log) = serve().await;
  let client = GitHubClient::new(reqwest::Client::new(), &config(addr, None, "/v1/responses"));

  let err = client.metadata(&repo("missing")).await.unwrap_err();

  match err {
    ReviewError::Upstream {
      service,
      status,
      ref body,
    } => {
      assert_eq!(service, "github");
      assert_eq!(status, 404);
      assert!(body.contains("Not Found"));
    }
    other => panic!("expected upstream error, got {:?}", other),
  }
}

#[tokio::test]
async fn completion_extracts_output_text_parts() {
  let (addr, log) = serve().await;
  let client = OpenAiClient::new(reqwest::Client::new(), &config(addr, None, "/v1/responses"));

  let text = client.complete("score this").await.unwrap();
  assert_eq!(text, r#"{"overall_score":8}"#);

  let seen = log.lock().unwrap()[0].clone();
  assert_eq!(header_of(&seen, header::AUTHORIZATION).as_deref(), Some("Bearer sk-test"));
  let sent: Value = serde_json::from_slice(&seen.body).unwrap();
  assert_eq!(
    sent,
    json!({"model": "gpt-4o-mini", "input": [{"role": "user", "content": "score this"}]})
  );
}

#[tokio::test]
async fn completion_error_status_becomes_upstream_error() {
  let (addr, _log) = serve().await;
  let client = OpenAiClient::new(reqwest::Client::new(), &config(addr, None, "/v1/limited"));

  let err = client.complete("score this").await.unwrap_err();

  assert!(matches!(err, ReviewError::Upstream { status: 429, .. }));
  assert!(!err.is_client_error());
}

#[tokio::test]
async fn completion_non_json_envelope_is_an_error() {
  let (addr, _log) = serve().await;
  let client = OpenAiClient::new(reqwest::Client::new(), &config(addr, None, "/v1/broken"));

  let err = client.complete("score this").await.unwrap_err();

  assert!(matches!(err, ReviewError::Json(_)));
}
