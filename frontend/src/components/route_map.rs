#![allow(non_snake_case)]

use dioxus::{logger::tracing::debug, prelude::*};

use crate::utils::{
  map::{clear_route_js, countries_js, draw_route_js, init_js, legend, markers_js},
  playground::Place,
  scripts::LEAFLET_CSS,
  server::Waypoint
};

const WORLD_CENTER: [f64; 2] = [25.0, 10.0];

#[component]
pub fn RouteMap(
  map_id: &'static str,
  ready: ReadOnlySignal<bool>,
  route: ReadOnlySignal<Vec<Waypoint>>,
  #[props(default)] markers: Vec<Place>,
  #[props(default)] countries: bool,
  on_pick: Option<EventHandler<(f64, f64)>>
) -> Element {
  use_effect(move || {
    if !ready() {
      return;
    }
    document::eval(&init_js(map_id, WORLD_CENTER, 2));
    if !markers.is_empty() {
      document::eval(&markers_js(map_id, &markers));
    }
    if countries {
      document::eval(&countries_js(map_id));
    }

    if let Some(handler) = on_pick {
      spawn(async move {
        let mut clicks = document::eval(&format!(
          "TradeSimMap.onClick({:?}, function(lat, lng) {{ dioxus.send([lat, lng]); }});",
          map_id
        ));
        while let Ok((lat, lng)) = clicks.recv::<(f64, f64)>().await {
          debug!("map click at {:.3}, {:.3}", lat, lng);
          handler.call((lat, lng));
        }
      });
    }
  });

  use_effect(move || {
    if !ready() {
      return;
    }
    let waypoints = route();
    if waypoints.len() < 2 {
      document::eval(&clear_route_js(map_id));
    } else {
      document::eval(&draw_route_js(map_id, &waypoints));
    }
  });

  let modes = legend(&route.read());

  rsx! {
    document::Stylesheet { href: LEAFLET_CSS },
    div {
      class: "map-wrapper",
      div { id: map_id, class: "map-canvas" }
      if !ready() {
        div { class: "map-loading", "Loading map..." }
      }
      if !modes.is_empty() {
        div {
          class: "map-legend",
          for (mode, color) in modes {
            span {
              class: "legend-item",
              span { class: "legend-swatch", background_color: color }
              "{mode}"
            }
          }
        }
      }
    }
  }
}
