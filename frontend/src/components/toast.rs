#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::utils::toast::use_toasts;

#[component]
pub fn ToastHost() -> Element {
  let mut toasts = use_toasts();

  rsx! {
    div {
      class: "toast-stack",
      for toast in toasts.0.read().iter().cloned() {
        div {
          key: "{toast.id}",
          class: toast.kind.class(),
          span { "{toast.message}" }
          button {
            class: "toast-close",
            onclick: move |_| toasts.dismiss(toast.id),
            "×"
          }
        }
      }
    }
  }
}
