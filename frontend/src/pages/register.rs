use dioxus::{logger::tracing::info, prelude::*};

use crate::{
  utils::{
    api::ApiClient,
    server::RegisterRequest,
    session::use_session,
    toast::{use_toasts, ToastKind}
  },
  Route
};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Client-side checks before the form is sent.
pub fn validate_registration(name: &str, email: &str, password: &str, confirm: &str) -> Result<(), String> {
  if name.trim().is_empty() {
    return Err("Please tell us your name".to_string());
  }
  let email = email.trim();
  let valid_email = email.split_once('@').is_some_and(|(user, domain)| !user.is_empty() && domain.contains('.'));
  if !valid_email {
    return Err("Please enter a valid email address".to_string());
  }
  if password.chars().count() < MIN_PASSWORD_LEN {
    return Err(format!("Passwords need at least {} characters", MIN_PASSWORD_LEN));
  }
  if password != confirm {
    return Err("Passwords do not match".to_string());
  }
  Ok(())
}

#[component]
pub fn Register() -> Element {
  static CSS: Asset = asset!("/assets/auth.css");

  let mut session = use_session();
  let mut toasts = use_toasts();
  let navigator = use_navigator();

  let mut name = use_signal(String::new);
  let mut email = use_signal(String::new);
  let mut company = use_signal(String::new);
  let mut password = use_signal(String::new);
  let mut confirm = use_signal(String::new);
  let mut pending = use_signal(|| false);
  let mut form_error: Signal<Option<String>> = use_signal(|| None);

  let submit = move |evt: FormEvent| {
    evt.prevent_default();
    if let Err(msg) = validate_registration(&name(), &email(), &password(), &confirm()) {
      form_error.set(Some(msg));
      return;
    }
    pending.set(true);
    form_error.set(None);

    let company_value = company().trim().to_string();
    let request = RegisterRequest {
      name: name().trim().to_string(),
      email: email().trim().to_string(),
      password: password(),
      company: (!company_value.is_empty()).then_some(company_value)
    };

    spawn(async move {
      match ApiClient::new(session).register(request).await {
        Ok(new_session) => {
          info!("registered {}", new_session.user.email);
          toasts.push(ToastKind::Success, "Account created");
          session.sign_in(new_session);
          navigator.push(Route::Dashboard {});
        },
        Err(e) => {
          toasts.error(&e);
          form_error.set(Some(e.to_string()));
        }
      }
      password.set(String::new());
      confirm.set(String::new());
      pending.set(false);
    });
  };

  rsx! {
    document::Stylesheet {href: CSS},
    div {
      class: "auth-page",
      form {
        class: "auth-card",
        onsubmit: submit,
        h2 { "Create your account" }
        if let Some(err) = form_error() {
          p { class: "form-error", "{err}" }
        }
        label {
          "Name",
          input { value: "{name}", autocomplete: "name", oninput: move |evt| name.set(evt.value()) }
        }
        label {
          "Email",
          input { r#type: "email", autocomplete: "email", value: "{email}", oninput: move |evt| email.set(evt.value()) }
        }
        label {
          "Company (optional)",
          input { value: "{company}", autocomplete: "organization", oninput: move |evt| company.set(evt.value()) }
        }
        label {
          "Password",
          input { r#type: "password", autocomplete: "new-password", value: "{password}", oninput: move |evt| password.set(evt.value()) }
        }
        label {
          "Confirm password",
          input { r#type: "password", autocomplete: "new-password", value: "{confirm}", oninput: move |evt| confirm.set(evt.value()) }
        }
        button {
          class: "button button-primary",
          r#type: "submit",
          disabled: pending(),
          if pending() { "Creating account..." } else { "Register" }
        }
        p {
          class: "auth-switch",
          "Already registered? ",
          Link { to: Route::Login {}, "Log in" }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn complete_forms_pass() {
    assert!(validate_registration("Ada", "ada@example.com", "longenough", "longenough").is_ok());
  }

  #[test]
  fn bad_fields_are_reported() {
    assert!(validate_registration(" ", "ada@example.com", "longenough", "longenough").is_err());
    assert!(validate_registration("Ada", "ada.example.com", "longenough", "longenough").is_err());
    assert!(validate_registration("Ada", "@example.com", "longenough", "longenough").is_err());
    assert!(validate_registration("Ada", "ada@example.com", "short", "short").is_err());
    assert!(validate_registration("Ada", "ada@example.com", "longenough", "different").is_err());
  }
}
