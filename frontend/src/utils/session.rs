use dioxus::{logger::tracing::warn, prelude::*};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use web_sys::{window, Storage};

use super::server::{AppError, User};

pub const TOKEN_KEY: &str = "tradesim_token";
pub const USER_KEY: &str = "tradesim_user";
pub const REMEMBER_KEY: &str = "tradesim_remember";

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
  pub token: String,
  pub user: User
}

/// Only the email is remembered; credentials never touch storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RememberedLogin {
  pub email: String
}

fn local_storage() -> Result<Storage, AppError> {
  window()
    .ok_or_else(|| AppError::Storage("no global window".to_string()))?
    .local_storage()
    .map_err(|e| AppError::Storage(format!("{:?}", e)))?
    .ok_or_else(|| AppError::Storage("localStorage unavailable".to_string()))
}

fn save<T: Serialize>(key: &str, value: &T) -> Result<(), AppError> {
  let json = serde_json::to_string(value).map_err(|e| AppError::Storage(e.to_string()))?;
  local_storage()?
    .set_item(key, &json)
    .map_err(|e| AppError::Storage(format!("{:?}", e)))
}

fn load<T: DeserializeOwned>(key: &str) -> Option<T> {
  let json = local_storage().ok()?.get_item(key).ok()??;
  serde_json::from_str(&json).ok()
}

fn remove(key: &str) {
  if let Ok(storage) = local_storage() {
    let _ = storage.remove_item(key);
  }
}

pub fn load_session() -> Option<Session> {
  let token: String = load(TOKEN_KEY)?;
  let user: User = load(USER_KEY)?;
  Some(Session { token, user })
}

pub fn save_session(session: &Session) -> Result<(), AppError> {
  save(TOKEN_KEY, &session.token)?;
  save(USER_KEY, &session.user)
}

pub fn clear_stored_session() {
  remove(TOKEN_KEY);
  remove(USER_KEY);
}

pub fn remembered_email() -> Option<String> {
  load::<RememberedLogin>(REMEMBER_KEY).map(|r| r.email)
}

pub fn set_remembered_email(email: Option<&str>) {
  let result = match email {
    Some(email) => save(REMEMBER_KEY, &RememberedLogin { email: email.to_string() }),
    None => {
      remove(REMEMBER_KEY);
      Ok(())
    }
  };
  if let Err(e) = result {
    warn!("could not update remember-me: {}", e);
  }
}

/// Shared session handle provided at the app root.
#[derive(Clone, Copy, PartialEq)]
pub struct SessionState(pub Signal<Option<Session>>);

impl SessionState {
  pub fn current(&self) -> Option<Session> {
    self.0.read().clone()
  }

  pub fn is_logged_in(&self) -> bool {
    self.0.read().is_some()
  }

  pub fn token(&self) -> Option<String> {
    self.0.read().as_ref().map(|s| s.token.clone())
  }

  pub fn sign_in(&mut self, session: Session) {
    if let Err(e) = save_session(&session) {
      warn!("session kept in memory only: {}", e);
    }
    self.0.set(Some(session));
  }

  pub fn replace_token(&mut self, token: String) {
    let updated = self.0.read().as_ref().map(|s| Session { token, user: s.user.clone() });
    if let Some(session) = updated {
      self.sign_in(session);
    }
  }

  pub fn sign_out(&mut self) {
    clear_stored_session();
    self.0.set(None);
  }
}

pub fn use_session() -> SessionState {
  use_context::<SessionState>()
}
