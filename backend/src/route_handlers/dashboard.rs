use axum::Json;
use tracing::debug;

use crate::{market_gen::gen::{DashboardData, MarketSimulator}, midwares::app_state::AppError};

pub async fn dashboard_handler() -> Result<Json<DashboardData>, AppError> {
  let mut simulator = MarketSimulator::new()?;
  let data = simulator.dashboard();
  debug!("dashboard generated with {} shipments", data.kpis.shipments);

  Ok(Json(data))
}
