use std::sync::Arc;
use axum::{http::StatusCode, response::IntoResponse, Json};
use redis::{AsyncCommands, Client as RedisClient};
use serde_json::json;
use thiserror::Error;
use tracing::info;

use crate::{agent::AgentClient, config::Config};

// Request context filled in by the auth middleware
#[derive(Debug, Clone)]
pub struct RequestContext {
  pub remote_ip: String,
  pub origin: String,
  pub user_agent: String,
  pub timestamp: String,
  pub signature: String
}

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  Unauthorized(String),
  #[error("{0}")]
  BadRequest(String),
  #[error("{0}")]
  RateLimitExceeded(String),
  #[error("{0}")]
  Upstream(String),
  #[error("{0}")]
  InternalError(String),
}

impl AppError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::RateLimitExceeded(_) => StatusCode::TOO_MANY_REQUESTS,
      Self::Upstream(_) => StatusCode::BAD_GATEWAY,
      Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> axum::response::Response {
    let status = self.status();
    let body = Json(json!({"error": self.to_string(), "code": status.as_u16()}));

    (status, body).into_response()
  }
}

#[derive(Clone)]
pub struct RateLimiter {
  redis: Arc<RedisClient>,
  max_requests: u64,
  window_secs: i64
}

impl RateLimiter {
  pub fn new(redis_url: &str, max_requests: u64, window_secs: u64) -> Result<Self, AppError> {
    info!("redis instance initializing for rate limiter");

    let client = RedisClient::open(redis_url)
      .map_err(|e| AppError::InternalError(format!("Redis connection error: {}", e)))?;

    Ok(Self {
      redis: Arc::new(client),
      max_requests,
      window_secs: window_secs as i64
    })
  }

  /// Counts one request for `ip` and errors once the window budget is spent.
  pub async fn check_and_record(&self, ip: &str) -> Result<(), AppError> {
    let mut conn = self.redis.get_multiplexed_async_connection().await
      .map_err(|e| AppError::InternalError(format!("Redis connection error: {}", e)))?;

    let key = format!("rate:simulate:{}", ip);
    let count: u64 = conn.incr(&key, 1u64).await
      .map_err(|e| AppError::InternalError(format!("Redis operation failed: {}", e)))?;
    // incr returns the delta if key was not present
    if count == 1 {
      let _: () = conn.expire(&key, self.window_secs).await
        .map_err(|e| AppError::InternalError(format!("Redis operation failed: {}", e)))?;
    }

    if count > self.max_requests {
      return Err(AppError::RateLimitExceeded(format!(
        "IP address has exceeded the limit of {} simulations in a {} second window",
        self.max_requests, self.window_secs
      )));
    }
    Ok(())
  }
}

#[derive(Clone)]
pub struct AppState {
  pub config: Arc<Config>,
  pub agent: Option<AgentClient>,
  pub rate_limiter: Option<RateLimiter>
}

impl AppState {
  pub fn new(config: Config) -> Result<Self, AppError> {
    let agent = match &config.agent_url {
      Some(url) => Some(AgentClient::new(url, config.agent_timeout)?),
      None => None
    };
    let rate_limiter = match &config.redis_url {
      Some(url) => Some(RateLimiter::new(url, config.rate_limit_max, config.rate_limit_window_secs)?),
      None => None
    };

    Ok(Self { config: Arc::new(config), agent, rate_limiter })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn errors_map_to_http_statuses() {
    assert_eq!(AppError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::RateLimitExceeded("x".into()).status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(AppError::Upstream("x".into()).status(), StatusCode::BAD_GATEWAY);
  }

  #[test]
  fn state_without_optional_services() {
    let state = AppState::new(Config::with_key("0123456789abcdef")).unwrap();
    assert!(state.agent.is_none());
    assert!(state.rate_limiter.is_none());
  }
}
