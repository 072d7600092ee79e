use dioxus::logger::tracing::{info, warn};
use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
  server::{AppError, AuthResponse, ChatRequest, ChatResponse, LoginRequest, RefreshResponse, RegisterRequest, SimulationResult, User},
  session::{Session, SessionState}
};

pub const API_BASE_URL: &str = env!("API_BASE_URL");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
  Accept,
  RefreshAndRetry,
  Fail
}

/// What to do with an authenticated response: a 401 earns exactly one token
/// refresh and one retry, a second 401 ends the session.
pub fn after_response(status: u16, already_refreshed: bool) -> RetryDecision {
  match (status, already_refreshed) {
    (401, false) => RetryDecision::RefreshAndRetry,
    (401, true) => RetryDecision::Fail,
    _ => RetryDecision::Accept
  }
}

async fn error_for(resp: Response) -> AppError {
  let status = resp.status().as_u16();
  let message = match resp.text().await {
    Ok(body) => serde_json::from_str::<Value>(&body)
      .ok()
      .and_then(|v| v.get("error").or_else(|| v.get("message")).and_then(Value::as_str).map(str::to_string))
      .unwrap_or(body),
    Err(e) => e.to_string()
  };
  AppError::Http { status, message }
}

#[derive(Clone)]
pub struct ApiClient {
  http: reqwest::Client,
  base_url: String,
  session: SessionState
}

impl ApiClient {
  pub fn new(session: SessionState) -> Self {
    Self { http: reqwest::Client::new(), base_url: API_BASE_URL.trim_end_matches('/').to_string(), session }
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.base_url, path)
  }

  async fn send_once(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Response, AppError> {
    let mut req = self.http.request(method, self.url(path));
    if let Some(token) = self.session.token() {
      req = req.bearer_auth(token);
    }
    if let Some(body) = body {
      req = req.json(body);
    }
    Ok(req.send().await?)
  }

  async fn send_authed(&self, method: Method, path: &str, body: Option<Value>) -> Result<Response, AppError> {
    let mut refreshed = false;
    loop {
      let resp = self.send_once(method.clone(), path, body.as_ref()).await?;

      match after_response(resp.status().as_u16(), refreshed) {
        RetryDecision::Accept if resp.status().is_success() => return Ok(resp),
        RetryDecision::Accept => return Err(error_for(resp).await),
        RetryDecision::RefreshAndRetry => {
          refreshed = true;
          if let Err(e) = self.refresh().await {
            warn!("token refresh failed: {}", e);
            self.end_session();
            return Err(AppError::Unauthorized);
          }
          info!("token refreshed, retrying {}", path);
        },
        RetryDecision::Fail => {
          self.end_session();
          return Err(AppError::Unauthorized);
        }
      }
    }
  }

  async fn json_authed<T: DeserializeOwned>(&self, method: Method, path: &str, body: Option<Value>) -> Result<T, AppError> {
    let resp = self.send_authed(method, path, body).await?;
    resp.json::<T>().await.map_err(|e| AppError::Deserialize(e.to_string()))
  }

  fn end_session(&self) {
    let mut session = self.session;
    session.sign_out();
  }

  pub async fn refresh(&self) -> Result<(), AppError> {
    let resp = self.send_once(Method::POST, "/auth/refresh", None).await?;
    if !resp.status().is_success() {
      return Err(error_for(resp).await);
    }
    let RefreshResponse { token } = resp.json().await.map_err(|e| AppError::Deserialize(e.to_string()))?;
    let mut session = self.session;
    session.replace_token(token);
    Ok(())
  }

  async fn authenticate(&self, path: &str, body: Value) -> Result<Session, AppError> {
    let resp = self.http.post(self.url(path)).json(&body).send().await?;
    if !resp.status().is_success() {
      return Err(error_for(resp).await);
    }
    let AuthResponse { token, user } = resp.json().await.map_err(|e| AppError::Deserialize(e.to_string()))?;
    Ok(Session { token, user })
  }

  pub async fn login(&self, email: &str, password: &str) -> Result<Session, AppError> {
    let body = LoginRequest { email: email.to_string(), password: password.to_string() };
    self.authenticate("/auth/login", serde_json::to_value(body).map_err(|e| AppError::Deserialize(e.to_string()))?).await
  }

  pub async fn register(&self, request: RegisterRequest) -> Result<Session, AppError> {
    self.authenticate("/auth/register", serde_json::to_value(request).map_err(|e| AppError::Deserialize(e.to_string()))?).await
  }

  pub async fn verify(&self) -> Result<User, AppError> {
    self.json_authed(Method::GET, "/auth/verify", None).await
  }

  pub async fn rag_chat(&self, query: &str) -> Result<String, AppError> {
    let body = ChatRequest { query: query.to_string(), mode: None };
    let reply: ChatResponse = self.json_authed(Method::POST, "/chat/rag", serde_json::to_value(body).ok()).await?;
    Ok(reply.response)
  }

  pub async fn agent_chat(&self, query: &str) -> Result<String, AppError> {
    let body = ChatRequest { query: query.to_string(), mode: Some("chat") };
    let reply: ChatResponse = self.json_authed(Method::POST, "/agent/chat", serde_json::to_value(body).ok()).await?;
    Ok(reply.response)
  }

  pub async fn report_pdf(&self, result: &SimulationResult) -> Result<Vec<u8>, AppError> {
    let body = serde_json::to_value(result).map_err(|e| AppError::Deserialize(e.to_string()))?;
    let resp = self.send_authed(Method::POST, "/reports/pdf", Some(body)).await?;
    let bytes = resp.bytes().await?;
    Ok(bytes.to_vec())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_unauthorized_triggers_one_refresh() {
    assert_eq!(after_response(401, false), RetryDecision::RefreshAndRetry);
  }

  #[test]
  fn second_unauthorized_gives_up() {
    assert_eq!(after_response(401, true), RetryDecision::Fail);
  }

  #[test]
  fn other_statuses_are_returned_as_is() {
    assert_eq!(after_response(200, false), RetryDecision::Accept);
    assert_eq!(after_response(500, false), RetryDecision::Accept);
    assert_eq!(after_response(403, true), RetryDecision::Accept);
  }
}
