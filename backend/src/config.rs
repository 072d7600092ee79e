use std::{env, net::SocketAddr, time::Duration};
use anyhow::{anyhow, Context, Result};

fn get_env(key: &str) -> Option<String> {
  env::var(key)
    .ok()
    .map(|s| s.trim().to_string())
    .filter(|s| !s.is_empty())
}

fn get_env_u64(key: &str, default: u64) -> Result<u64> {
  match get_env(key) {
    None => Ok(default),
    Some(v) => v.parse::<u64>().map_err(|e| anyhow!("{key} invalid int: {e}"))
  }
}

#[derive(Debug, Clone)]
pub struct Config {
  pub bind_addr: SocketAddr,
  pub hmac_key: String,
  /// requests whose `origin` header does not contain this are rejected
  pub allowed_origin: Option<String>,
  pub agent_url: Option<String>,
  pub agent_timeout: Duration,
  pub redis_url: Option<String>,
  pub rate_limit_max: u64,
  pub rate_limit_window_secs: u64,
  pub signature_max_age_secs: u64
}

impl Config {
  pub fn with_key(hmac_key: impl Into<String>) -> Self {
    Self {
      bind_addr: SocketAddr::from(([0, 0, 0, 0], 7575)),
      hmac_key: hmac_key.into(),
      allowed_origin: None,
      agent_url: None,
      agent_timeout: Duration::from_secs(20),
      redis_url: None,
      rate_limit_max: 30,
      rate_limit_window_secs: 60,
      signature_max_age_secs: 60
    }
  }

  pub fn load() -> Result<Self> {
    let hmac_key = get_env("HMAC_KEY").ok_or_else(|| anyhow!("HMAC_KEY must be set"))?;
    let mut cfg = Self::with_key(hmac_key);

    if let Some(addr) = get_env("BIND_ADDR") {
      cfg.bind_addr = addr.parse().with_context(|| format!("BIND_ADDR invalid socket address: {addr}"))?;
    }
    cfg.allowed_origin = get_env("ALLOWED_ORIGIN");
    cfg.agent_url = get_env("AGENT_URL");
    cfg.agent_timeout = Duration::from_secs(get_env_u64("AGENT_TIMEOUT_SECS", 20)?);
    cfg.redis_url = get_env("REDIS_URL");
    cfg.rate_limit_max = get_env_u64("RATE_LIMIT_MAX", 30)?;
    cfg.rate_limit_window_secs = get_env_u64("RATE_LIMIT_WINDOW_SECS", 60)?;

    cfg.validate()?;
    Ok(cfg)
  }

  pub fn validate(&self) -> Result<()> {
    if self.hmac_key.len() < 16 {
      return Err(anyhow!("HMAC_KEY must be at least 16 bytes (got {})", self.hmac_key.len()));
    }
    if self.rate_limit_max == 0 || self.rate_limit_window_secs == 0 {
      return Err(anyhow!("RATE_LIMIT_MAX and RATE_LIMIT_WINDOW_SECS must be > 0"));
    }
    if let Some(url) = &self.agent_url {
      if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(anyhow!("AGENT_URL must be an http(s) url (got {url})"));
      }
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults_are_valid_with_a_long_key() {
    assert!(Config::with_key("0123456789abcdef").validate().is_ok());
  }

  #[test]
  fn short_keys_are_rejected() {
    assert!(Config::with_key("short").validate().is_err());
  }

  #[test]
  fn agent_url_must_be_http() {
    let mut cfg = Config::with_key("0123456789abcdef");
    cfg.agent_url = Some("ftp://agent".to_string());
    assert!(cfg.validate().is_err());
  }
}
