use std::fmt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SENTINEL_NAME: &str = "Route unavailable";

/* Simulation service */
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
  pub lat: f64,
  pub lng: f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegMode {
  Land,
  Sea,
  Air
}

impl LegMode {
  pub fn color(&self) -> &'static str {
    match self {
      LegMode::Land => "#f59e0b",
      LegMode::Sea => "#3b82f6",
      LegMode::Air => "#ef4444",
    }
  }
}

impl fmt::Display for LegMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LegMode::Land => write!(f, "Land"),
      LegMode::Sea => write!(f, "Sea"),
      LegMode::Air => write!(f, "Air"),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
  Land,
  Sea,
  Air,
  Multimodal
}

impl TransportMode {
  pub const ALL: [TransportMode; 4] = [TransportMode::Land, TransportMode::Sea, TransportMode::Air, TransportMode::Multimodal];

  pub fn as_value(&self) -> &'static str {
    match self {
      TransportMode::Land => "land",
      TransportMode::Sea => "sea",
      TransportMode::Air => "air",
      TransportMode::Multimodal => "multimodal",
    }
  }

  pub fn from_value(v: &str) -> Option<Self> {
    Self::ALL.into_iter().find(|m| m.as_value() == v)
  }
}

impl fmt::Display for TransportMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TransportMode::Land => write!(f, "Land"),
      TransportMode::Sea => write!(f, "Sea"),
      TransportMode::Air => write!(f, "Air"),
      TransportMode::Multimodal => write!(f, "Multimodal"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
  pub lat: f64,
  pub lng: f64,
  pub name: String,
  pub mode: LegMode,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(pub Vec<Waypoint>);

impl Route {
  /// Reason the service could not build a route, if this is its error marker.
  pub fn error(&self) -> Option<&str> {
    match self.0.as_slice() {
      [only] => only.error.as_deref(),
      _ => None
    }
  }

  pub fn waypoints(&self) -> &[Waypoint] {
    &self.0
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
  pub mode: LegMode,
  pub distance_km: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
  pub cost: Decimal,
  pub time_days: f64,
  pub distance_km: f64,
  pub legs: Vec<Leg>
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRequest {
  pub origin: Coord,
  pub destination: Coord,
  pub origin_name: Option<String>,
  pub destination_name: Option<String>,
  pub mode: TransportMode,
  pub volume: f64,
  pub urgent: bool
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
  Agent,
  Heuristic
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
  pub route: Route,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub estimate: Option<Estimate>,
  pub mode: TransportMode,
  pub recommendations: Vec<String>,
  pub risks: Vec<String>,
  pub source: RouteSource
}

#[derive(Debug, Deserialize)]
pub struct HealthCheckResponse {
  pub code: i32,
  pub status: String
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Kpis {
  pub shipments: u64,
  pub on_time_pct: f64,
  pub avg_cost: Decimal,
  pub active_lanes: u32
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MonthlyVolume {
  pub month: String,
  pub shipments: u64
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModeShare {
  pub mode: LegMode,
  pub share_pct: f64
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaneStat {
  pub origin: String,
  pub destination: String,
  pub mode: LegMode,
  pub shipments: u64,
  pub avg_cost: Decimal,
  pub on_time_pct: f64
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardData {
  pub kpis: Kpis,
  pub monthly_volume: Vec<MonthlyVolume>,
  pub mode_split: Vec<ModeShare>,
  pub top_lanes: Vec<LaneStat>
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LaneTick {
  pub lane: String,
  pub mode: LegMode,
  pub rate: Decimal,
  pub change_pct: f64,
  pub eta_days: f64,
  pub timestamp: u64
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum WsRequest {
  Start { interval_ms: u64 },
  Stop
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum WsResponse {
  Tick { ticks: Vec<LaneTick> },
  Error { message: String }
}

/* Remote REST API */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub id: String,
  pub name: String,
  pub email: String,
  #[serde(default)]
  pub company: Option<String>
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
  pub email: String,
  pub password: String
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
  pub name: String,
  pub email: String,
  pub password: String,
  pub company: Option<String>
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
  pub token: String,
  pub user: User
}

#[derive(Debug, Deserialize)]
pub struct RefreshResponse {
  pub token: String
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
  pub query: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub mode: Option<&'static str>
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
  pub response: String
}

// App Errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
  #[error("Network error: {0}")]
  Network(String),
  #[error("Server answered {status}: {message}")]
  Http { status: u16, message: String },
  #[error("Your session has expired, please log in again")]
  Unauthorized,
  #[error("Unexpected response: {0}")]
  Deserialize(String),
  #[error("Storage error: {0}")]
  Storage(String),
  #[error("Browser error: {0}")]
  Wasm(String),
  #[error("{0}")]
  Infeasible(String),
}

impl From<reqwest::Error> for AppError {
  fn from(e: reqwest::Error) -> Self {
    if e.is_decode() {
      AppError::Deserialize(e.to_string())
    } else {
      AppError::Network(e.to_string())
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sentinel_route_exposes_its_error() {
    let json = r#"[{"lat": 40.7, "lng": -74.0, "name": "Route unavailable", "mode": "land", "error": "No land connection between North America and Europe"}]"#;
    let route: Route = serde_json::from_str(json).unwrap();
    assert_eq!(route.error(), Some("No land connection between North America and Europe"));
    assert_eq!(route.waypoints()[0].name, SENTINEL_NAME);
  }

  #[test]
  fn regular_route_has_no_error() {
    let json = r#"[{"lat": 1.0, "lng": 2.0, "name": "A", "mode": "sea"}, {"lat": 3.0, "lng": 4.0, "name": "B", "mode": "sea"}]"#;
    let route: Route = serde_json::from_str(json).unwrap();
    assert_eq!(route.error(), None);
  }

  #[test]
  fn results_without_estimate_parse() {
    let json = r#"{"route": [], "mode": "multimodal", "recommendations": [], "risks": ["x"], "source": "heuristic"}"#;
    let result: SimulationResult = serde_json::from_str(json).unwrap();
    assert!(result.estimate.is_none());
    assert_eq!(result.mode, TransportMode::Multimodal);
  }

  #[test]
  fn mode_values_round_trip() {
    for mode in TransportMode::ALL {
      assert_eq!(TransportMode::from_value(mode.as_value()), Some(mode));
    }
    assert_eq!(TransportMode::from_value("rail"), None);
  }

  #[test]
  fn ticker_messages_match_the_wire() {
    let start = serde_json::to_string(&WsRequest::Start { interval_ms: 1000 }).unwrap();
    assert_eq!(start, r#"{"type":"Start","interval_ms":1000}"#);
    let tick: WsResponse = serde_json::from_str(r#"{"type":"Tick","ticks":[]}"#).unwrap();
    assert!(matches!(tick, WsResponse::Tick { ticks } if ticks.is_empty()));
  }
}
