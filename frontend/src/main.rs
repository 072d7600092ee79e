#![allow(non_snake_case)]
mod pages;
mod components;
mod utils;

use dioxus::{logger::tracing::{info, warn}, prelude::*};

use components::{template::Template, toast::ToastHost};
use pages::{dashboard::Dashboard, home::Home, login::Login, playground::Playground, register::Register};
use utils::{
    api::ApiClient,
    server::AppError,
    session::{load_session, SessionState},
    toast::Toasts
};

#[derive(Routable, PartialEq, Clone)]
enum Route {
    #[layout(Template)]
    #[route("/")]
    Home {},
    #[route("/login")]
    Login {},
    #[route("/register")]
    Register {},
    #[route("/dashboard")]
    Dashboard {},
    #[route("/playground")]
    Playground {},
    #[route("/:..route")]
    PageNotFound { route: Vec<String> }
}

fn main() {
    dioxus::launch(App);
}

fn App() -> Element {
    static CSS: Asset = asset!("/assets/main.css");

    let session = use_context_provider(|| SessionState(Signal::new(load_session())));
    use_context_provider(|| Toasts(Signal::new(Vec::new())));

    // a stored token may have expired while the tab was closed
    use_future(move || async move {
        if !session.is_logged_in() {
            return;
        }
        match ApiClient::new(session).verify().await {
            Ok(user) => info!("session verified for {}", user.email),
            Err(AppError::Unauthorized) => warn!("stored session rejected"),
            Err(e) => warn!("could not verify session: {}", e),
        }
    });

    rsx! {
        document::Stylesheet { href: CSS },
        Router::<Route> {},
        ToastHost {}
    }
}

/// Sends visitors without a session to the login page.
pub fn use_auth_guard() -> SessionState {
    let session = utils::session::use_session();
    let navigator = use_navigator();

    use_effect(move || {
        if !session.is_logged_in() {
            navigator.replace(Route::Login {});
        }
    });
    session
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    rsx! {
        div {
            class: "not-found",
            h1 { "Page not found" }
            p { "We are terribly sorry, but the page you requested doesn't exist." }
            pre { color: "red", "log:\nattemped to navigate to: {route:?}" }
            Link { class: "cta-button", to: Route::Home {}, "Back home" }
        }
    }
}
