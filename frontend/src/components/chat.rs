#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::utils::{api::ApiClient, session::use_session, toast::use_toasts};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Assistant {
  Knowledge,
  Agent
}

impl Assistant {
  fn label(&self) -> &'static str {
    match self {
      Assistant::Knowledge => "Knowledge base",
      Assistant::Agent => "Route agent",
    }
  }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Speaker {
  User,
  Assistant(Assistant)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
  pub speaker: Speaker,
  pub text: String
}

#[component]
pub fn ChatPanel() -> Element {
  let session = use_session();
  let mut toasts = use_toasts();
  let mut assistant = use_signal(|| Assistant::Knowledge);
  let mut messages: Signal<Vec<ChatMessage>> = use_signal(Vec::new);
  let mut draft = use_signal(String::new);
  let mut waiting = use_signal(|| false);

  let mut ask = move || {
    let query = draft().trim().to_string();
    if query.is_empty() || waiting() {
      return;
    }
    let target = assistant();
    messages.write().push(ChatMessage { speaker: Speaker::User, text: query.clone() });
    draft.set(String::new());
    waiting.set(true);

    spawn(async move {
      let client = ApiClient::new(session);
      let reply = match target {
        Assistant::Knowledge => client.rag_chat(&query).await,
        Assistant::Agent => client.agent_chat(&query).await,
      };
      match reply {
        Ok(text) => messages.write().push(ChatMessage { speaker: Speaker::Assistant(target), text }),
        Err(e) => toasts.error(&e),
      }
      waiting.set(false);
    });
  };

  rsx! {
    div {
      class: "chat-panel",
      div {
        class: "chat-header",
        h3 { "Ask the assistant" }
        div {
          class: "chat-toggle",
          for option in [Assistant::Knowledge, Assistant::Agent] {
            button {
              class: if assistant() == option { "toggle active" } else { "toggle" },
              onclick: move |_| assistant.set(option),
              "{option.label()}"
            }
          }
        }
      }
      div {
        class: "chat-log",
        if messages.read().is_empty() {
          p { class: "muted", "Ask about lanes, tariffs, transit times or how a route was planned." }
        }
        for (i, msg) in messages.read().iter().cloned().enumerate() {
          div {
            key: "{i}",
            class: if msg.speaker == Speaker::User { "chat-msg from-user" } else { "chat-msg from-assistant" },
            if let Speaker::Assistant(who) = msg.speaker {
              span { class: "chat-who", "{who.label()}" }
            }
            p { "{msg.text}" }
          }
        }
        if waiting() {
          div { class: "chat-msg from-assistant typing", "..." }
        }
      }
      form {
        class: "chat-input",
        onsubmit: move |evt: FormEvent| {
          evt.prevent_default();
          ask();
        },
        input {
          placeholder: "Type a question",
          value: "{draft}",
          oninput: move |evt| draft.set(evt.value())
        }
        button { class: "button button-primary", r#type: "submit", disabled: waiting(), "Send" }
      }
    }
  }
}
