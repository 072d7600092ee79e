use std::net::SocketAddr;
use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tradesim_backend::{config::Config, midwares::app_state::AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  if dotenvy::dotenv().is_err() {
    eprintln!("no .env file found, reading configuration from the environment");
  }

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info")))
    .init();

  let config = Config::load().context("invalid configuration")?;
  let bind_addr = config.bind_addr;

  match &config.agent_url {
    Some(url) => info!("route agent enabled at {}", url),
    None => warn!("AGENT_URL not set, routes come from the heuristic planner only"),
  }
  if config.redis_url.is_none() {
    warn!("REDIS_URL not set, simulate rate limiting disabled");
  }

  let state = AppState::new(config)?;
  let app = router(state);

  let listener = TcpListener::bind(bind_addr).await
    .with_context(|| format!("failed to bind {}", bind_addr))?;
  info!("simulation service listening on {}", bind_addr);

  axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await
    .context("server error")?;

  Ok(())
}
