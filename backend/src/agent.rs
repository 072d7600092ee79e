use std::time::Duration;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::{
  midwares::app_state::AppError,
  planner::{
    endpoints,
    geo::haversine_km,
    model::{Coord, LegMode, Route, SimulationRequest, Waypoint}
  }
};

/// How far the agent's first/last waypoint may sit from the requested endpoints.
pub const ENDPOINT_TOLERANCE_KM: f64 = 150.0;

#[derive(Debug, Error)]
pub enum AgentError {
  #[error("agent request failed: {0}")]
  Transport(#[from] reqwest::Error),
  #[error("agent answered with status {0}")]
  Status(u16),
  #[error("no waypoint array in agent reply")]
  NoProposal,
  #[error("agent proposal rejected: {0}")]
  Rejected(String),
}

#[derive(Debug, Clone, Deserialize)]
struct ProposedWaypoint {
  lat: f64,
  #[serde(alias = "lon")]
  lng: f64,
  #[serde(default)]
  name: Option<String>,
  #[serde(default)]
  mode: Option<LegMode>
}

#[derive(Clone)]
pub struct AgentClient {
  http: reqwest::Client,
  url: String
}

impl AgentClient {
  pub fn new(url: &str, timeout: Duration) -> Result<Self, AppError> {
    let http = reqwest::Client::builder()
      .timeout(timeout)
      .build()
      .map_err(|e| AppError::InternalError(format!("failed to build agent http client: {}", e)))?;

    Ok(Self { http, url: url.to_string() })
  }

  /// Asks the agent for a route and returns it only if it passes validation.
  pub async fn propose(&self, req: &SimulationRequest) -> Result<Route, AgentError> {
    let body = json!({ "query": planning_prompt(req), "mode": "route_planning" });

    let resp = self.http.post(&self.url).json(&body).send().await?;
    let status = resp.status();
    if !status.is_success() {
      return Err(AgentError::Status(status.as_u16()));
    }

    let reply: Value = resp.json().await?;
    let points = extract_waypoints(&reply).ok_or(AgentError::NoProposal)?;
    debug!("agent proposed {} waypoints", points.len());

    validate_proposal(req, points)
  }
}

fn planning_prompt(req: &SimulationRequest) -> String {
  let (origin, destination) = endpoints(req);
  format!(
    "Plan a {mode} freight route for {volume} cubic metres{urgency} from {o_name} ({o_lat:.4}, {o_lng:.4}) \
     to {d_name} ({d_lat:.4}, {d_lng:.4}). Answer with a JSON array of waypoints, each an object \
     {{\"lat\": number, \"lng\": number, \"name\": string, \"mode\": \"land\"|\"sea\"|\"air\"}}, \
     where mode is the transport used to reach that waypoint. Start at the origin and end at the destination.",
    mode = req.mode,
    volume = req.volume,
    urgency = if req.urgent { " (urgent)" } else { "" },
    o_name = origin.name,
    o_lat = origin.coord.lat,
    o_lng = origin.coord.lng,
    d_name = destination.name,
    d_lat = destination.coord.lat,
    d_lng = destination.coord.lng,
  )
}

/// Pulls a waypoint list out of `{"response": "<text>"}` or a bare JSON array.
fn extract_waypoints(reply: &Value) -> Option<Vec<ProposedWaypoint>> {
  match reply {
    Value::Array(_) => serde_json::from_value(reply.clone()).ok(),
    Value::Object(map) => match map.get("response")? {
      Value::String(text) => scan_text(text),
      nested @ Value::Array(_) => serde_json::from_value(nested.clone()).ok(),
      _ => None
    },
    _ => None
  }
}

// agents tend to wrap the array in prose or markdown fences
fn scan_text(text: &str) -> Option<Vec<ProposedWaypoint>> {
  text.match_indices('[').find_map(|(start, _)| {
    serde_json::Deserializer::from_str(&text[start..])
      .into_iter::<Vec<ProposedWaypoint>>()
      .next()
      .and_then(|parsed| parsed.ok())
  })
}

fn validate_proposal(req: &SimulationRequest, points: Vec<ProposedWaypoint>) -> Result<Route, AgentError> {
  if points.len() < 2 {
    return Err(AgentError::Rejected("fewer than two waypoints".to_string()));
  }

  let default_mode = req.mode.leg_mode().unwrap_or(LegMode::Land);
  let mut waypoints = Vec::with_capacity(points.len());
  for (idx, p) in points.into_iter().enumerate() {
    let coord = Coord::new(p.lat, p.lng);
    if !coord.is_valid() {
      return Err(AgentError::Rejected(format!("waypoint {} has invalid coordinates", idx)));
    }
    let name = p.name.unwrap_or_else(|| format!("Waypoint {}", idx + 1));
    waypoints.push(Waypoint::new(coord, name, p.mode.unwrap_or(default_mode)));
  }

  let (origin, destination) = endpoints(req);
  let first_gap = haversine_km(waypoints[0].coord(), origin.coord);
  let last_gap = waypoints.last().map_or(f64::INFINITY, |w| haversine_km(w.coord(), destination.coord));
  if first_gap > ENDPOINT_TOLERANCE_KM {
    return Err(AgentError::Rejected(format!("route starts {:.0} km from the origin", first_gap)));
  }
  if last_gap > ENDPOINT_TOLERANCE_KM {
    return Err(AgentError::Rejected(format!("route ends {:.0} km from the destination", last_gap)));
  }

  if let Some(requested) = req.mode.leg_mode() {
    let stray = waypoints[1..].iter()
      .find(|w| w.mode != LegMode::Land && w.mode != requested);
    if let Some(w) = stray {
      return Err(AgentError::Rejected(format!("{} leg in a {} request", w.mode, requested)));
    }
  }

  // pin the ends to the requested endpoints
  let last = waypoints.len() - 1;
  waypoints[0].lat = origin.coord.lat;
  waypoints[0].lng = origin.coord.lng;
  waypoints[0].name = origin.name;
  waypoints[0].mode = waypoints[1].mode;
  waypoints[last].lat = destination.coord.lat;
  waypoints[last].lng = destination.coord.lng;
  waypoints[last].name = destination.name;

  Ok(Route(waypoints))
}
