use dioxus::{logger::tracing::info, prelude::*};

use crate::{
  components::{
    cards::{KpiCards, TopLanes},
    chat::ChatPanel,
    plot::{ModeSplitChart, VolumeChart},
    route_map::RouteMap,
    ticker::LaneTicker
  },
  use_auth_guard,
  utils::{
    playground::preset_ports,
    scripts::{use_scripts, ECHARTS_SRC, LEAFLET_SRC},
    sim_client,
    toast::use_toasts
  }
};

#[component]
pub fn Dashboard() -> Element {
  static CSS: Asset = asset!("/assets/dashboard.css");

  let session = use_auth_guard();
  let mut toasts = use_toasts();
  let scripts_ready = use_scripts(&[ECHARTS_SRC, LEAFLET_SRC]);

  let mut data = use_resource(move || async move {
    match sim_client::dashboard().await {
      Ok(d) => {
        info!("dashboard loaded with {} lanes", d.top_lanes.len());
        Some(d)
      },
      Err(e) => {
        toasts.error(&e);
        None
      }
    }
  });

  let greeting = session.current().map(|s| s.user.name).unwrap_or_default();
  let loaded = data.read().clone();

  rsx! {
    document::Stylesheet {href: CSS},
    div {
      class: "dashboard-page",
      div {
        class: "dashboard-header",
        h1 { "Welcome back, {greeting}" }
        button {
          class: "button button-ghost",
          onclick: move |_| data.restart(),
          "Refresh"
        }
      }
      match loaded {
        None => rsx! { p { class: "muted", "Loading dashboard..." } },
        Some(None) => rsx! {
          div {
            class: "dashboard-error",
            p { "The simulation service could not be reached." }
            button { class: "button button-primary", onclick: move |_| data.restart(), "Try again" }
          }
        },
        Some(Some(d)) => rsx! {
          KpiCards { kpis: d.kpis.clone() }
          div {
            class: "chart-row",
            VolumeChart { data: d.monthly_volume.clone(), ready: scripts_ready }
            ModeSplitChart { data: d.mode_split.clone(), ready: scripts_ready }
          }
          TopLanes { lanes: d.top_lanes.clone() }
        }
      }
      div {
        class: "dashboard-grid",
        LaneTicker {}
        ChatPanel {}
      }
      div {
        class: "coverage",
        h3 { "Network coverage" }
        RouteMap { map_id: "coverage-map", ready: scripts_ready, route: Vec::new(), markers: preset_ports(), countries: true }
      }
    }
  }
}
