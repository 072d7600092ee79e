use dioxus::{logger::tracing::info, prelude::*};

use crate::{
  components::{route_map::RouteMap, sim_form::SimForm, sim_results::SimResults},
  use_auth_guard,
  utils::{
    api::ApiClient,
    playground::{Place, PlaygroundState},
    report::{report_filename, save_pdf},
    scripts::{use_scripts, LEAFLET_SRC},
    server::Waypoint,
    sim_client,
    toast::{use_toasts, ToastKind}
  }
};

#[component]
pub fn Playground() -> Element {
  static CSS: Asset = asset!("/assets/playground.css");

  let session = use_auth_guard();
  let mut toasts = use_toasts();
  let map_ready = use_scripts(&[LEAFLET_SRC]);

  let mut state = use_signal(PlaygroundState::default);
  let mut pending = use_signal(|| false);
  let mut downloading = use_signal(|| false);

  let simulate = move |_: ()| {
    let request = match state.read().to_request() {
      Ok(r) => r,
      Err(msg) => {
        toasts.push(ToastKind::Info, msg);
        return;
      }
    };
    state.write().clear_outcome();
    pending.set(true);

    spawn(async move {
      match sim_client::simulate(&request).await {
        Ok(result) => {
          info!("route with {} waypoints from {:?}", result.route.waypoints().len(), result.source);
          state.write().apply(result);
        },
        Err(e) => toasts.error(&e),
      }
      pending.set(false);
    });
  };

  let download = move |_: ()| {
    let Some(result) = state.read().reportable().cloned() else {
      return;
    };
    downloading.set(true);

    spawn(async move {
      let outcome = ApiClient::new(session)
        .report_pdf(&result)
        .await
        .and_then(|bytes| save_pdf(&bytes, &report_filename(&result)));
      match outcome {
        Ok(()) => toasts.push(ToastKind::Success, "Report downloaded"),
        Err(e) => toasts.error(&e),
      }
      downloading.set(false);
    });
  };

  let snapshot = state.read().clone();
  let route: Vec<Waypoint> = match &snapshot.result {
    Some(r) if snapshot.drawable() => r.route.waypoints().to_vec(),
    _ => Vec::new()
  };

  rsx! {
    document::Stylesheet {href: CSS},
    div {
      class: "playground-page",
      aside {
        class: "playground-controls",
        h2 { "Route playground" }
        p { class: "muted", "Pick ports from the lists or click the map: the first click sets the origin, the second the destination." }
        SimForm {
          state,
          pending,
          on_simulate: simulate,
          on_reset: move |_: ()| state.write().reset()
        }
        if let Some(result) = snapshot.result {
          SimResults {
            result,
            error: snapshot.error,
            downloading,
            on_download: download
          }
        }
      }
      section {
        class: "playground-map",
        RouteMap {
          map_id: "route-map",
          ready: map_ready,
          route,
          on_pick: move |(lat, lng): (f64, f64)| state.write().pick(Place::from_click(lat, lng))
        }
      }
    }
  }
}
