use dioxus::prelude::*;
use crate::{utils::session::use_session, Route};

#[component]
pub fn Template() -> Element {
  static CSS: Asset = asset!("/assets/template.css");

  rsx! {
    document::Stylesheet {href: CSS},
    Header { }
    main {
      class: "page",
      Outlet::<Route> {}
    }
    Footer { }
  }
}


#[component]
fn Header() -> Element {
  let mut session = use_session();
  let navigator = use_navigator();
  let mut menu_open = use_signal(|| false);
  let user_name = session.current().map(|s| s.user.name);

  rsx!{
    nav {
      div {
        class: "nav-container",
        Link {
          class: "logo",
          to: Route::Home { },
          "TradeSim",
        }
        button {
          class: "menu-button",
          onclick: move |_| menu_open.toggle(),
          span {
            class: "menu-icon",
            svg {
              class: "menu-icon-svg",
              xmlns: "http://www.w3.org/2000/svg",
              view_box: "0 0 24 24",
              path {
                d: "M6 12H18",
                stroke: "currentcolor",
                stroke_linecap: "round"
              }
              path {
                d: "M6 15.5H18",
                stroke: "currentcolor",
                stroke_linecap: "round"
              }
              path {
                d: "M6 8.5H18",
                stroke: "currentcolor",
                stroke_linecap: "round"
              }
            }
          }
        },
        div {
          class: if menu_open() { "nav-links open" } else { "nav-links" },
          onclick: move |_| menu_open.set(false),
          if let Some(name) = user_name {
            Link {
              active_class: "nav-active",
              to: Route::Dashboard { },
              "Dashboard"
            },
            Link {
              active_class: "nav-active",
              to: Route::Playground { },
              "Playground"
            },
            span { class: "nav-user", "{name}" },
            button {
              class: "button button-ghost",
              onclick: move |_| {
                session.sign_out();
                navigator.push(Route::Home {});
              },
              "Log out"
            }
          } else {
            Link {
              active_class: "nav-active",
              to: Route::Login { },
              "Log in"
            },
            Link {
              class: "button button-primary",
              to: Route::Register { },
              "Get started"
            },
          }
        }
      }
    }
  }
}

#[component]
fn Footer() -> Element {
  rsx!{
    footer {
      div {
        class: "footer-container",
        div {
          class: "copyright",
          p { "© 2025 TradeSim" }
        },
        div {
          class: "footer-links",
          Link { to: Route::Home {}, "Home" }
          Link { to: Route::Playground {}, "Playground" }
          a {
            href: "mailto:support@tradesim.example",
            class: "social-link",
            title: "Email",
            svg {
              xmlns: "http://www.w3.org/2000/svg",
              width: "24",
              height: "24",
              view_box: "0 0 24 24",
              fill: "none",
              stroke: "currentcolor",
              stroke_width: "2",
              stroke_linecap: "round",
              stroke_linejoin: "round",
              path {
                d: "M4 4h16c1.1 0 2 .9 2 2v12c0 1.1-.9 2-2 2H4c-1.1 0-2-.9-2-2V6c0-1.1.9-2 2-2z"
              }
              polyline {
                points: "22,6 12,13 2,6"
              }
            }
          }
        }
      }
    }
  }
}
