mod common;

use serde_json::json;
use tradesim_backend::config::Config;

use common::{app, app_with, now, send, signed, KEY};

fn simulate_body(origin: (f64, f64), destination: (f64, f64), mode: &str) -> serde_json::Value {
  json!({
    "origin": {"lat": origin.0, "lng": origin.1},
    "destination": {"lat": destination.0, "lng": destination.1},
    "mode": mode,
    "volume": 5.0
  })
}

#[tokio::test]
async fn health_needs_no_signature() {
  let req = axum::http::Request::builder().uri("/health").body(axum::body::Body::empty()).unwrap();
  let (status, body) = send(app(), req).await;
  assert_eq!(status, 200);
  assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unsigned_requests_are_rejected() {
  let req = axum::http::Request::builder().uri("/api/dashboard").body(axum::body::Body::empty()).unwrap();
  let (status, body) = send(app(), req).await;
  assert_eq!(status, 401);
  assert_eq!(body["error"], "Missing timestamp or signature");
}

#[tokio::test]
async fn expired_signatures_are_rejected() {
  let (status, body) = send(app(), signed("GET", "/api/dashboard", now() - 120, None)).await;
  assert_eq!(status, 401);
  assert_eq!(body["error"], "Request expired");
}

#[tokio::test]
async fn signatures_are_bound_to_the_path() {
  let ts = now();
  let mut req = signed("GET", "/api/dashboard", ts, None);
  *req.uri_mut() = "/api/simulate".parse().unwrap();
  *req.method_mut() = axum::http::Method::POST;
  let (status, _) = send(app(), req).await;
  assert_eq!(status, 401);
}

#[tokio::test]
async fn foreign_origins_are_rejected() {
  let mut config = Config::with_key(KEY);
  config.allowed_origin = Some("https://tradesim.example".to_string());

  let mut req = signed("GET", "/api/dashboard", now(), None);
  req.headers_mut().insert("origin", "https://evil.example".parse().unwrap());
  let (status, body) = send(app_with(config.clone()), req).await;
  assert_eq!(status, 401);
  assert_eq!(body["error"], "Invalid origin");

  let mut req = signed("GET", "/api/dashboard", now(), None);
  req.headers_mut().insert("origin", "https://tradesim.example.attacker.com".parse().unwrap());
  let (status, _) = send(app_with(config.clone()), req).await;
  assert_eq!(status, 401);

  let mut req = signed("GET", "/api/dashboard", now(), None);
  req.headers_mut().insert("origin", "https://tradesim.example".parse().unwrap());
  let (status, _) = send(app_with(config), req).await;
  assert_eq!(status, 200);
}

#[tokio::test]
async fn dashboard_returns_widgets_data() {
  let (status, body) = send(app(), signed("GET", "/api/dashboard", now(), None)).await;
  assert_eq!(status, 200);
  assert!(body["kpis"]["shipments"].as_u64().unwrap() > 0);
  assert_eq!(body["monthly_volume"].as_array().unwrap().len(), 12);
  assert_eq!(body["mode_split"].as_array().unwrap().len(), 3);
  assert_eq!(body["top_lanes"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn short_land_trip_is_a_direct_route() {
  let body = simulate_body((48.8566, 2.3522), (50.8503, 4.3517), "land");
  let (status, result) = send(app(), signed("POST", "/api/simulate", now(), Some(body))).await;
  assert_eq!(status, 200);
  assert_eq!(result["source"], "heuristic");
  assert_eq!(result["mode"], "land");

  let route = result["route"].as_array().unwrap();
  assert_eq!(route.len(), 2);
  assert!(route.iter().all(|w| w["mode"] == "land"));
  assert!(result["estimate"]["cost"].is_string());
  assert!(result["estimate"]["time_days"].as_f64().unwrap() > 1.0);
  assert!(!result["recommendations"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn land_across_the_atlantic_is_infeasible() {
  let body = simulate_body((40.7128, -74.0060), (51.5074, -0.1278), "land");
  let (status, result) = send(app(), signed("POST", "/api/simulate", now(), Some(body))).await;
  assert_eq!(status, 200);
  assert!(result.get("estimate").is_none());

  let route = result["route"].as_array().unwrap();
  assert_eq!(route.len(), 1);
  assert_eq!(route[0]["name"], "Route unavailable");
  assert_eq!(route[0]["error"], "No land connection between North America and Europe");
}

#[tokio::test]
async fn short_sea_hop_inside_a_region_is_direct() {
  let body = simulate_body((51.9244, 4.4777), (53.5511, 9.9937), "sea");
  let (status, result) = send(app(), signed("POST", "/api/simulate", now(), Some(body))).await;
  assert_eq!(status, 200);
  let route = result["route"].as_array().unwrap();
  assert_eq!(route.len(), 2);
  assert!(route.iter().all(|w| w["mode"] == "sea"));
}

#[tokio::test]
async fn invalid_volume_is_a_bad_request() {
  let mut body = simulate_body((48.8566, 2.3522), (50.8503, 4.3517), "air");
  body["volume"] = json!(-1.0);
  let (status, result) = send(app(), signed("POST", "/api/simulate", now(), Some(body))).await;
  assert_eq!(status, 400);
  assert_eq!(result["code"], 400);
}

#[tokio::test]
async fn out_of_range_coordinates_are_a_bad_request() {
  let body = simulate_body((123.0, 2.3522), (50.8503, 4.3517), "land");
  let (status, _) = send(app(), signed("POST", "/api/simulate", now(), Some(body))).await;
  assert_eq!(status, 400);
}
