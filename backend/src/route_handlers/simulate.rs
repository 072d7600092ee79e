use axum::{extract::State, Extension, Json};
use tracing::{info, warn};

use crate::{
  agent::AgentClient,
  midwares::app_state::{AppError, AppState, RequestContext},
  planner::{self, model::{RouteSource, SimulationRequest, SimulationResult, TransportMode}}
};

pub const MAX_VOLUME: f64 = 100_000.0;

fn validate(req: &SimulationRequest) -> Result<(), AppError> {
  if !req.origin.is_valid() {
    return Err(AppError::BadRequest("origin coordinates out of range".to_string()));
  }
  if !req.destination.is_valid() {
    return Err(AppError::BadRequest("destination coordinates out of range".to_string()));
  }
  if !req.volume.is_finite() || req.volume <= 0.0 || req.volume > MAX_VOLUME {
    return Err(AppError::BadRequest(format!("volume must be in (0, {}] cubic metres", MAX_VOLUME)));
  }
  Ok(())
}

/// Agent proposal first, heuristic otherwise. Land requests the heuristic
/// already knows to be impossible never reach the agent.
pub async fn resolve(agent: Option<&AgentClient>, req: &SimulationRequest) -> SimulationResult {
  let heuristic = planner::plan(req);
  let land_infeasible = req.mode == TransportMode::Land && heuristic.is_err();

  if let (Some(agent), false) = (agent, land_infeasible) {
    match agent.propose(req).await {
      Ok(route) => {
        info!("using agent route with {} waypoints", route.len());
        return planner::simulate_with(req, Ok(route), RouteSource::Agent);
      },
      Err(e) => warn!("{}, falling back to heuristic route", e)
    }
  }

  planner::simulate_with(req, heuristic, RouteSource::Heuristic)
}

pub async fn simulate_handler(
  State(state): State<AppState>,
  Extension(ctx): Extension<RequestContext>,
  Json(req): Json<SimulationRequest>
) -> Result<Json<SimulationResult>, AppError> {

  validate(&req)?;

  if let Some(rate_limiter) = &state.rate_limiter {
    rate_limiter.check_and_record(&ctx.remote_ip).await?;
  }

  info!("{} requested a {} simulation ({} m3, urgent: {})", ctx.remote_ip, req.mode, req.volume, req.urgent);
  let result = resolve(state.agent.as_ref(), &req).await;

  if let Some(reason) = result.route.error() {
    info!("simulation for {} is infeasible: {}", ctx.remote_ip, reason);
  }

  Ok(Json(result))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::planner::model::Coord;

  fn request(volume: f64) -> SimulationRequest {
    SimulationRequest {
      origin: Coord::new(48.8566, 2.3522),
      destination: Coord::new(50.8503, 4.3517),
      origin_name: None,
      destination_name: None,
      mode: TransportMode::Land,
      volume,
      urgent: false
    }
  }

  #[test]
  fn volume_must_be_positive_and_finite() {
    assert!(validate(&request(12.0)).is_ok());
    assert!(validate(&request(0.0)).is_err());
    assert!(validate(&request(-3.0)).is_err());
    assert!(validate(&request(f64::NAN)).is_err());
  }

  #[test]
  fn coordinates_are_checked() {
    let mut req = request(1.0);
    req.destination = Coord::new(95.0, 0.0);
    assert!(matches!(validate(&req), Err(AppError::BadRequest(_))));
  }

  #[tokio::test]
  async fn without_an_agent_the_heuristic_answers() {
    let result = resolve(None, &request(5.0)).await;
    assert_eq!(result.source, RouteSource::Heuristic);
    assert_eq!(result.route.len(), 2);
  }
}
