use dioxus::{logger::tracing::info, prelude::*};

use crate::{
  utils::{
    api::ApiClient,
    server::AppError,
    session::{remembered_email, set_remembered_email, use_session},
    toast::{use_toasts, ToastKind}
  },
  Route
};

#[component]
pub fn Login() -> Element {
  static CSS: Asset = asset!("/assets/auth.css");

  let mut session = use_session();
  let mut toasts = use_toasts();
  let navigator = use_navigator();

  let remembered = use_hook(remembered_email);
  let mut email = use_signal(|| remembered.clone().unwrap_or_default());
  let mut password = use_signal(String::new);
  let mut remember = use_signal(|| remembered.is_some());
  let mut pending = use_signal(|| false);
  let mut form_error: Signal<Option<String>> = use_signal(|| None);

  use_effect(move || {
    if session.is_logged_in() {
      navigator.replace(Route::Dashboard {});
    }
  });

  let submit = move |evt: FormEvent| {
    evt.prevent_default();
    if email().trim().is_empty() || password().is_empty() {
      form_error.set(Some("Email and password are required".to_string()));
      return;
    }
    pending.set(true);
    form_error.set(None);

    spawn(async move {
      let client = ApiClient::new(session);
      match client.login(email().trim(), &password()).await {
        Ok(new_session) => {
          info!("logged in as {}", new_session.user.email);
          set_remembered_email(remember().then(|| email()).as_deref());
          toasts.push(ToastKind::Success, format!("Welcome back, {}", new_session.user.name));
          session.sign_in(new_session);
          navigator.push(Route::Dashboard {});
        },
        Err(AppError::Http { status: 401, .. }) => {
          form_error.set(Some("Invalid email or password".to_string()));
        },
        Err(e) => {
          toasts.error(&e);
          form_error.set(Some(e.to_string()));
        }
      }
      password.set(String::new());
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
        h2 { "Log in" }
        if let Some(err) = form_error() {
          p { class: "form-error", "{err}" }
        }
        label {
          "Email",
          input {
            r#type: "email",
            autocomplete: "email",
            value: "{email}",
            oninput: move |evt| email.set(evt.value())
          }
        }
        label {
          "Password",
          input {
            r#type: "password",
            autocomplete: "current-password",
            value: "{password}",
            oninput: move |evt| password.set(evt.value())
          }
        }
        label {
          class: "checkbox",
          input {
            r#type: "checkbox",
            checked: remember(),
            onchange: move |evt| remember.set(evt.checked())
          }
          "Remember my email"
        }
        button {
          class: "button button-primary",
          r#type: "submit",
          disabled: pending(),
          if pending() { "Logging in..." } else { "Log in" }
        }
        p {
          class: "auth-switch",
          "New here? ",
          Link { to: Route::Register {}, "Create an account" }
        }
      }
    }
  }
}
