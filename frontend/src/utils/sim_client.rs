use dioxus::logger::tracing::{debug, info};
use gloo_net::websocket::futures::WebSocket;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{
  auth::AuthSignature,
  server::{AppError, DashboardData, HealthCheckResponse, SimulationRequest, SimulationResult}
};

pub const SIM_API_URL: &str = env!("SIM_API_URL");
pub const SIM_WS_URL: &str = env!("SIM_WS_URL");

pub const SIMULATE_PATH: &str = "/api/simulate";
pub const DASHBOARD_PATH: &str = "/api/dashboard";
pub const TICKER_PATH: &str = "/ws/ticker";

fn base(url: &str) -> &str {
  url.trim_end_matches('/')
}

async fn signed(method: Method, path: &str) -> Result<RequestBuilder, AppError> {
  let signer = AuthSignature::new().await?;
  let (timestamp, signature) = signer.credentials(path).await?;

  Ok(reqwest::Client::new()
    .request(method, format!("{}{}", base(SIM_API_URL), path))
    .header("x-timestamp", timestamp.to_string())
    .header("x-signature", signature))
}

async fn read_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T, AppError> {
  let resp = req.send().await?;
  let status = resp.status();
  if !status.is_success() {
    let message = resp.text().await.unwrap_or_default();
    return Err(AppError::Http { status: status.as_u16(), message });
  }
  resp.json::<T>().await.map_err(|e| AppError::Deserialize(e.to_string()))
}

pub async fn health() -> Result<HealthCheckResponse, AppError> {
  let resp = reqwest::get(format!("{}/health", base(SIM_API_URL))).await?;
  resp.json::<HealthCheckResponse>().await.map_err(|e| AppError::Deserialize(e.to_string()))
}

pub async fn simulate(request: &SimulationRequest) -> Result<SimulationResult, AppError> {
  info!("simulating {} route", request.mode);
  let req = signed(Method::POST, SIMULATE_PATH).await?.json(request);
  read_json(req).await
}

pub async fn dashboard() -> Result<DashboardData, AppError> {
  read_json(signed(Method::GET, DASHBOARD_PATH).await?).await
}

/// Opens the lane ticker; the HMAC pair travels as websocket subprotocols.
pub async fn open_ticker() -> Result<WebSocket, AppError> {
  let signer = AuthSignature::new().await?;
  let (timestamp, signature) = signer.credentials(TICKER_PATH).await?;
  debug!("opening ticker socket");

  WebSocket::open_with_protocols(
    &format!("{}{}", base(SIM_WS_URL), TICKER_PATH),
    &[timestamp.to_string(), signature]
  ).map_err(|e| AppError::Network(e.to_string()))
}
