use std::{net::SocketAddr, time::{SystemTime, UNIX_EPOCH}};
use axum::{extract::{ConnectInfo, Request, State}, http::HeaderMap, middleware::Next, response::IntoResponse};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, warn};

use super::app_state::{AppError, AppState, RequestContext};

type HmacSha256 = Hmac<Sha256>;

/// Hex HMAC-SHA256 of `path + timestamp`, the value clients put in `x-signature`.
pub fn sign(key: &str, path: &str, timestamp: u64) -> Result<String, AppError> {
  let mut mac = HmacSha256::new_from_slice(key.as_bytes())
    .map_err(|e| AppError::InternalError(e.to_string()))?;
  mac.update(format!("{}{}", path, timestamp).as_bytes());
  Ok(hex::encode(mac.finalize().into_bytes()))
}

fn verify(key: &str, path: &str, timestamp: u64, signature: &str) -> Result<bool, AppError> {
  let Ok(raw) = hex::decode(signature) else {
    return Ok(false);
  };
  let mut mac = HmacSha256::new_from_slice(key.as_bytes())
    .map_err(|e| AppError::InternalError(e.to_string()))?;
  mac.update(format!("{}{}", path, timestamp).as_bytes());
  Ok(mac.verify_slice(&raw).is_ok())
}

fn is_websocket(headers: &HeaderMap) -> bool {
  headers.get("upgrade")
    .and_then(|v| v.to_str().ok())
    .is_some_and(|v| v.eq_ignore_ascii_case("websocket"))
}

// browsers cannot set headers on websocket upgrades, so the pair rides in the subprotocol list
fn credentials(headers: &HeaderMap) -> (Option<u64>, Option<String>) {
  if is_websocket(headers) {
    headers.get("sec-websocket-protocol")
      .and_then(|v| v.to_str().ok())
      .map(|proto| {
        let mut parts = proto.split(',').map(|s| s.trim());
        let ws_ts = parts.next().and_then(|s| s.parse::<u64>().ok());
        let ws_sig = parts.next().map(str::to_string);
        (ws_ts, ws_sig)
      })
      .unwrap_or((None, None))
  } else {
    let http_ts = headers.get("x-timestamp")
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.parse::<u64>().ok());
    let http_sig = headers.get("x-signature")
      .and_then(|v| v.to_str().ok())
      .map(str::to_string);
    (http_ts, http_sig)
  }
}

pub async fn ip_tracker_with_auth(
  State(state): State<AppState>,
  mut req: Request,
  next: Next
) -> Result<impl IntoResponse, AppError> {

  let headers = req.headers();
  let uri_path = req.uri().path().to_string();
  let now = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map_err(|e| AppError::InternalError(e.to_string()))?
      .as_secs();
  debug!("auth check for {}", uri_path);

  let origin = headers
    .get("origin")
    .and_then(|v| v.to_str().ok())
    .unwrap_or("NA")
    .to_string();

  if let Some(expected) = &state.config.allowed_origin {
    if !origin_allowed(&origin, expected) {
      warn!("rejected request from origin {}", origin);
      return Err(AppError::Unauthorized("Invalid origin".to_string()));
    }
  }

  let (Some(ts), Some(sig)) = credentials(headers) else {
    return Err(AppError::Unauthorized("Missing timestamp or signature".to_string()));
  };

  // timestamps from the future are skewed clocks, not expired ones
  if now.saturating_sub(ts) > state.config.signature_max_age_secs {
    return Err(AppError::Unauthorized("Request expired".to_string()));
  }

  if !verify(&state.config.hmac_key, &uri_path, ts, &sig)? {
    return Err(AppError::Unauthorized("Invalid signature".to_string()));
  }

  // Get IP from headers, or fallback to socket address
  let socket_ip = req.extensions()
    .get::<ConnectInfo<SocketAddr>>()
    .map(|ConnectInfo(addr)| addr.ip().to_string())
    .unwrap_or_else(|| "unknown".to_string());
  let remote_ip = headers
    .get("x-forwarded-for")
    .and_then(|h| h.to_str().ok())
    .and_then(|h| h.split(',').next())
    .map(|h| h.trim().to_string())
    .unwrap_or(socket_ip);

  let user_agent = headers
    .get("user-agent")
    .and_then(|h| h.to_str().ok())
    .unwrap_or("NA")
    .to_string();

  req.extensions_mut().insert(RequestContext {
    remote_ip,
    origin,
    user_agent,
    timestamp: ts.to_string(),
    signature: sig
  });

  Ok(next.run(req).await)
}

/// Exact scheme, host and port match; a trailing slash is tolerated.
fn origin_allowed(origin: &str, expected: &str) -> bool {
  origin.trim_end_matches('/').eq_ignore_ascii_case(expected.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
  use super::*;
  use axum::http::HeaderValue;

  const KEY: &str = "0123456789abcdef";

  #[test]
  fn signature_round_trips_through_verify() {
    let sig = sign(KEY, "/api/simulate", 1_700_000_000).unwrap();
    assert_eq!(sig.len(), 64);
    assert!(verify(KEY, "/api/simulate", 1_700_000_000, &sig).unwrap());
    assert!(!verify(KEY, "/api/dashboard", 1_700_000_000, &sig).unwrap());
    assert!(!verify(KEY, "/api/simulate", 1_700_000_001, &sig).unwrap());
    assert!(!verify(KEY, "/api/simulate", 1_700_000_000, "not-hex").unwrap());
  }

  #[test]
  fn websocket_credentials_come_from_the_protocol_header() {
    let mut headers = HeaderMap::new();
    headers.insert("upgrade", HeaderValue::from_static("websocket"));
    headers.insert("sec-websocket-protocol", HeaderValue::from_static("1700000000, abcd"));
    assert_eq!(credentials(&headers), (Some(1_700_000_000), Some("abcd".to_string())));
  }

  #[test]
  fn origin_must_match_exactly() {
    let expected = "https://tradesim.example";
    assert!(origin_allowed("https://tradesim.example", expected));
    assert!(origin_allowed("https://tradesim.example/", expected));
    assert!(origin_allowed("https://TradeSim.example", expected));
    assert!(!origin_allowed("https://tradesim.example.attacker.com", expected));
    assert!(!origin_allowed("https://evil.tradesim.example", expected));
    assert!(!origin_allowed("http://tradesim.example", expected));
    assert!(!origin_allowed("https://tradesim.example:8443", expected));
    assert!(!origin_allowed("NA", expected));
  }

  #[test]
  fn http_credentials_come_from_x_headers() {
    let mut headers = HeaderMap::new();
    headers.insert("x-timestamp", HeaderValue::from_static("42"));
    headers.insert("x-signature", HeaderValue::from_static("ff"));
    assert_eq!(credentials(&headers), (Some(42), Some("ff".to_string())));
    assert_eq!(credentials(&HeaderMap::new()), (None, None));
  }
}
