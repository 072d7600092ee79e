#![allow(dead_code)]

use std::time::{SystemTime, UNIX_EPOCH};
use axum::{body::Body, http::{Request, Response}, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use tradesim_backend::{config::Config, midwares::{app_state::AppState, auth::sign}, router};

pub const KEY: &str = "integration-test-key-0123456789";

pub fn now() -> u64 {
  SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_secs()
}

pub fn app_with(config: Config) -> Router {
  router(AppState::new(config).unwrap())
}

pub fn app() -> Router {
  app_with(Config::with_key(KEY))
}

pub fn signed(method: &str, path: &str, timestamp: u64, body: Option<Value>) -> Request<Body> {
  let builder = Request::builder()
    .method(method)
    .uri(path)
    .header("x-timestamp", timestamp.to_string())
    .header("x-signature", sign(KEY, path, timestamp).unwrap());

  match body {
    Some(json) => builder
      .header("content-type", "application/json")
      .body(Body::from(json.to_string()))
      .unwrap(),
    None => builder.body(Body::empty()).unwrap()
  }
}

pub async fn send(app: Router, req: Request<Body>) -> (u16, Value) {
  let resp: Response<Body> = app.oneshot(req).await.unwrap();
  let status = resp.status().as_u16();
  let bytes = resp.into_body().collect().await.unwrap().to_bytes();
  let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
  (status, json)
}
