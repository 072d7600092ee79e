use std::time::Duration;
use dioxus::{logger::tracing::error, prelude::*};
use uuid::Uuid;

use super::server::AppError;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ToastKind {
  Error,
  Success,
  Info
}

impl ToastKind {
  pub fn class(&self) -> &'static str {
    match self {
      ToastKind::Error => "toast toast-error",
      ToastKind::Success => "toast toast-success",
      ToastKind::Info => "toast toast-info",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
  pub id: Uuid,
  pub kind: ToastKind,
  pub message: String
}

#[derive(Clone, Copy, PartialEq)]
pub struct Toasts(pub Signal<Vec<Toast>>);

impl Toasts {
  pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) {
    let id = Uuid::new_v4();
    self.0.write().push(Toast { id, kind, message: message.into() });

    let mut toasts = *self;
    spawn(async move {
      async_std::task::sleep(TOAST_LIFETIME).await;
      toasts.dismiss(id);
    });
  }

  pub fn error(&mut self, e: &AppError) {
    error!("{}", e);
    self.push(ToastKind::Error, e.to_string());
  }

  pub fn dismiss(&mut self, id: Uuid) {
    self.0.write().retain(|t| t.id != id);
  }
}

pub fn use_toasts() -> Toasts {
  use_context::<Toasts>()
}
