//! Multimodal route synthesis and cost/time estimation.
//!
//! Everything here is a pure function of the request: regions come from static
//! bounding boxes, hubs from a fixed table, prices from per-mode rate tables.

pub mod advice;
pub mod cost;
pub mod geo;
pub mod hubs;
pub mod model;
pub mod synth;

use model::{Route, RouteSource, SimulationRequest, SimulationResult};
use synth::{Endpoint, RouteError, RoutePlan};

pub fn endpoints(req: &SimulationRequest) -> (Endpoint, Endpoint) {
  let origin_name = req.origin_name.clone().unwrap_or_else(|| "Origin".to_string());
  let destination_name = req.destination_name.clone().unwrap_or_else(|| "Destination".to_string());
  (Endpoint::new(req.origin, origin_name), Endpoint::new(req.destination, destination_name))
}

/// Heuristic route for the request.
pub fn plan(req: &SimulationRequest) -> Result<Route, RouteError> {
  let (origin, destination) = endpoints(req);
  RoutePlan { origin: &origin, destination: &destination, mode: req.mode, volume: req.volume, urgent: req.urgent }.synthesize()
}

/// Wraps a route (or the reason there is none) into the result sent to callers.
pub fn simulate_with(req: &SimulationRequest, route: Result<Route, RouteError>, source: RouteSource) -> SimulationResult {
  let fallback_mode = req.mode.leg_mode().unwrap_or(model::LegMode::Land);

  let (route, estimate) = match route {
    Ok(route) => {
      let est = cost::estimate(route.legs(), req.volume, req.urgent);
      (route, Some(est))
    },
    Err(e) => (Route::infeasible(req.origin, fallback_mode, e.to_string()), None)
  };

  let distance = estimate.as_ref().map_or(0.0, |e| e.distance_km);
  let (recommendations, risks) = advice::advise(req.mode, distance, req.urgent);

  SimulationResult { route, estimate, mode: req.mode, recommendations, risks, source }
}

pub fn simulate(req: &SimulationRequest) -> SimulationResult {
  simulate_with(req, plan(req), RouteSource::Heuristic)
}

#[cfg(test)]
mod tests {
  use super::*;
  use model::{Coord, TransportMode};

  fn request(origin: Coord, destination: Coord, mode: TransportMode) -> SimulationRequest {
    SimulationRequest { origin, destination, origin_name: None, destination_name: None, mode, volume: 5.0, urgent: false }
  }

  #[test]
  fn infeasible_land_request_yields_sentinel_without_estimate() {
    let req = request(Coord::new(40.7128, -74.0060), Coord::new(51.5074, -0.1278), TransportMode::Land);
    let result = simulate(&req);
    assert!(result.estimate.is_none());
    assert_eq!(result.route.error(), Some("No land connection between North America and Europe"));
    assert_eq!(result.route.waypoints()[0].name, model::SENTINEL_NAME);
  }

  #[test]
  fn feasible_request_has_estimate_and_default_names() {
    let req = request(Coord::new(48.8566, 2.3522), Coord::new(50.8503, 4.3517), TransportMode::Land);
    let result = simulate(&req);
    let est = result.estimate.expect("estimate");
    assert!(est.cost > rust_decimal::Decimal::ZERO);
    assert_eq!(result.route.waypoints()[0].name, "Origin");
    assert_eq!(result.route.waypoints()[1].name, "Destination");
    assert_eq!(result.source, RouteSource::Heuristic);
  }
}
