#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::{
  components::cards::usd,
  utils::server::{Estimate, LegMode, RouteSource, SimulationResult}
};

/// Kilometres per leg mode, in the order the modes appear on the route.
pub fn distance_by_mode(estimate: &Estimate) -> Vec<(LegMode, f64)> {
  let mut totals: Vec<(LegMode, f64)> = Vec::new();
  for leg in &estimate.legs {
    match totals.iter_mut().find(|(m, _)| *m == leg.mode) {
      Some((_, km)) => *km += leg.distance_km,
      None => totals.push((leg.mode, leg.distance_km)),
    }
  }
  totals
}

fn source_badge(source: RouteSource) -> (&'static str, &'static str) {
  match source {
    RouteSource::Agent => ("badge badge-agent", "Planned by route agent"),
    RouteSource::Heuristic => ("badge", "Planned by hub heuristic"),
  }
}

#[component]
pub fn SimResults(
  result: SimulationResult,
  error: Option<String>,
  downloading: ReadOnlySignal<bool>,
  on_download: EventHandler<()>
) -> Element {
  let (badge_class, badge_text) = source_badge(result.source);
  let stops: Vec<String> = result.route.waypoints().iter().map(|w| w.name.clone()).collect();

  if let Some(reason) = error {
    return rsx! {
      div {
        class: "sim-results infeasible",
        h3 { "No {result.mode} route" }
        p { "{reason}" }
        if !result.recommendations.is_empty() {
          ul {
            for tip in result.recommendations.iter().cloned() {
              li { "{tip}" }
            }
          }
        }
      }
    };
  }

  rsx! {
    div {
      class: "sim-results",
      div {
        class: "sim-results-header",
        h3 { "{result.mode} route" }
        span { class: badge_class, "{badge_text}" }
      }
      if let Some(estimate) = result.estimate.clone() {
        div {
          class: "kpi-grid",
          div { class: "kpi-card", span { class: "kpi-label", "Estimated cost" } span { class: "kpi-value", {usd(estimate.cost)} } }
          div { class: "kpi-card", span { class: "kpi-label", "Transit time" } span { class: "kpi-value", {format!("{:.1} days", estimate.time_days)} } }
          div { class: "kpi-card", span { class: "kpi-label", "Distance" } span { class: "kpi-value", {format!("{:.0} km", estimate.distance_km)} } }
        }
        ul {
          class: "leg-breakdown",
          for (mode, km) in distance_by_mode(&estimate) {
            li {
              span { class: "legend-swatch", background_color: mode.color() }
              {format!("{}: {:.0} km", mode, km)}
            }
          }
        }
      }
      p { class: "stops", {stops.join(" → ")} }
      if !result.recommendations.is_empty() {
        h4 { "Recommendations" }
        ul {
          for tip in result.recommendations.iter().cloned() {
            li { "{tip}" }
          }
        }
      }
      if !result.risks.is_empty() {
        h4 { "Risks" }
        ul {
          class: "risks",
          for risk in result.risks.iter().cloned() {
            li { "{risk}" }
          }
        }
      }
      button {
        class: "button button-primary",
        disabled: downloading(),
        onclick: move |_| on_download.call(()),
        if downloading() { "Preparing report..." } else { "Download report" }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rust_decimal::Decimal;
  use crate::utils::server::Leg;

  #[test]
  fn distances_are_summed_per_mode() {
    let estimate = Estimate {
      cost: Decimal::new(12_000, 0),
      time_days: 31.5,
      distance_km: 11_150.0,
      legs: vec![
        Leg { mode: LegMode::Land, distance_km: 150.0 },
        Leg { mode: LegMode::Sea, distance_km: 10_500.0 },
        Leg { mode: LegMode::Land, distance_km: 500.0 },
      ]
    };
    assert_eq!(distance_by_mode(&estimate), vec![(LegMode::Land, 650.0), (LegMode::Sea, 10_500.0)]);
  }
}
