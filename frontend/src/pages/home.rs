use std::time::Duration;
use dioxus::prelude::*;
use crate::{utils::session::use_session, Route};

const COUNTER_MS: u64 = 1_600;
const COUNTER_STEP_MS: u64 = 40;

/// Value shown `elapsed_ms` into a counter animation towards `target` (ease-out cubic).
pub fn counter_value(target: u64, elapsed_ms: u64, duration_ms: u64) -> u64 {
  if duration_ms == 0 || elapsed_ms >= duration_ms {
    return target;
  }
  let t = elapsed_ms as f64 / duration_ms as f64;
  let eased = 1.0 - (1.0 - t).powi(3);
  (target as f64 * eased).round() as u64
}

#[component]
fn StatCounter(target: u64, suffix: &'static str, label: &'static str) -> Element {
  let mut value = use_signal(|| 0u64);

  use_future(move || async move {
    let mut elapsed = 0;
    while elapsed < COUNTER_MS {
      async_std::task::sleep(Duration::from_millis(COUNTER_STEP_MS)).await;
      elapsed += COUNTER_STEP_MS;
      value.set(counter_value(target, elapsed, COUNTER_MS));
    }
  });

  rsx! {
    div {
      class: "stat",
      span { class: "stat-value", "{value}{suffix}" }
      span { class: "stat-label", "{label}" }
    }
  }
}

#[component]
pub fn Home() -> Element {
  static CSS: Asset = asset!("/assets/home.css");
  let session = use_session();
  let cta = if session.is_logged_in() { Route::Playground {} } else { Route::Register {} };

  rsx! {
    document::Stylesheet {href: CSS},
    div {
      class: "home-page",
      section {
        class : "hero",
        h1 { "Plan global freight before you ship it" },
        p { "Simulate land, sea, air and multimodal routes between any two points on the map. Compare cost and transit time, see the hubs your cargo passes through, and get risk notes before you commit." },
        Link {
          class: "cta-button",
          to: cta.clone(),
          "Launch the Playground"
        }
      },
      section {
        class: "stats",
        StatCounter { target: 33, suffix: "", label: "ports, airports and terminals" }
        StatCounter { target: 4, suffix: "", label: "transport modes" }
        StatCounter { target: 12, suffix: "", label: "live trade lanes" }
        StatCounter { target: 8, suffix: "", label: "world regions covered" }
      },
      section {
        class: "features",
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"🗺️"}
            "Route Synthesis"
          }
          p { "Routes are built through real seaports, cargo airports and inland terminals, and fall back to a clear explanation when no land connection exists." }
        },
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"💰"}
            "Cost and Transit Estimates" }
          p { "Per-mode rates, handling fees, volume discounts and urgency surcharges combine into a cost and a door-to-door transit time." }
        },
        div {
          class: "feature-card",
          h3 {
            class: "feature-card-title",
            span {"📈"}
            "Live Market Dashboard"
          }
          p { "Track shipment KPIs, mode split and a streaming lane-rate ticker, then ask the assistant about any lane." }
        }
      },
      section {
        class: "cta-band",
        h2 { "Ready to route your next shipment?" }
        Link { class: "cta-button", to: cta, "Start simulating" }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn counter_starts_at_zero_and_lands_on_target() {
    assert_eq!(counter_value(500, 0, 1_000), 0);
    assert_eq!(counter_value(500, 1_000, 1_000), 500);
    assert_eq!(counter_value(500, 5_000, 1_000), 500);
    assert_eq!(counter_value(7, 10, 0), 7);
  }

  #[test]
  fn counter_never_decreases() {
    let values: Vec<u64> = (0..=25).map(|i| counter_value(1_000, i * 40, 1_000)).collect();
    assert!(values.windows(2).all(|w| w[0] <= w[1]));
  }
}
