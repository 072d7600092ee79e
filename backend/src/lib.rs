//! Route simulation service: synthesizes freight routes, estimates cost and
//! transit time, and serves mock market data for the dashboard.

pub mod agent;
pub mod config;
pub mod market_gen;
pub mod midwares;
pub mod planner;
pub mod route_handlers;

use axum::{
  http::{header, HeaderName, HeaderValue, Method},
  middleware,
  routing::{any, get, post},
  Json, Router
};
use serde_json::{json, Value};
use tower_http::{cors::{AllowOrigin, Any, CorsLayer}, trace::TraceLayer};

use midwares::{app_state::AppState, auth::ip_tracker_with_auth};
use route_handlers::{dashboard::dashboard_handler, simulate::simulate_handler, sockets::ws_handler};

async fn health_check() -> Json<Value> {
  Json(json!({"code": 200, "status": "ok"}))
}

fn cors(state: &AppState) -> CorsLayer {
  let allowed = match state.config.allowed_origin.as_deref().map(HeaderValue::from_str) {
    Some(Ok(origin)) => AllowOrigin::exact(origin),
    _ => AllowOrigin::from(Any)
  };

  CorsLayer::new()
    .allow_origin(allowed)
    .allow_methods([Method::GET, Method::POST])
    .allow_headers([
      header::CONTENT_TYPE,
      HeaderName::from_static("x-timestamp"),
      HeaderName::from_static("x-signature"),
    ])
}

pub fn router(state: AppState) -> Router {
  let protected = Router::new()
    .route("/api/simulate", post(simulate_handler))
    .route("/api/dashboard", get(dashboard_handler))
    .route("/ws/ticker", any(ws_handler))
    .route_layer(middleware::from_fn_with_state(state.clone(), ip_tracker_with_auth));

  Router::new()
    .route("/health", get(health_check))
    .merge(protected)
    .layer(cors(&state))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
