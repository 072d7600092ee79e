#![allow(non_snake_case)]

use dioxus::prelude::*;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use crate::utils::server::{Kpis, LaneStat};

/// Groups thousands with commas: 48213 -> "48,213".
pub fn group_thousands(n: u64) -> String {
  let digits = n.to_string();
  let mut out = String::with_capacity(digits.len() + digits.len() / 3);
  for (i, c) in digits.chars().enumerate() {
    if i > 0 && (digits.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(c);
  }
  out
}

pub fn usd(amount: Decimal) -> String {
  let whole = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero).to_u64().unwrap_or(0);
  format!("${}", group_thousands(whole))
}

#[component]
fn KpiCard(label: &'static str, value: String, hint: Option<String>) -> Element {
  rsx! {
    div {
      class: "kpi-card",
      span { class: "kpi-label", "{label}" }
      span { class: "kpi-value", "{value}" }
      if let Some(hint) = hint {
        span { class: "kpi-hint", "{hint}" }
      }
    }
  }
}

#[component]
pub fn KpiCards(kpis: Kpis) -> Element {
  rsx! {
    div {
      class: "kpi-grid",
      KpiCard { label: "Shipments (12 mo)", value: group_thousands(kpis.shipments) }
      KpiCard { label: "On-time delivery", value: format!("{:.1}%", kpis.on_time_pct) }
      KpiCard { label: "Average cost", value: usd(kpis.avg_cost), hint: "per shipment".to_string() }
      KpiCard { label: "Active lanes", value: kpis.active_lanes.to_string() }
    }
  }
}

#[component]
pub fn TopLanes(lanes: Vec<LaneStat>) -> Element {
  rsx! {
    div {
      class: "lanes",
      h3 { "Top lanes" }
      table {
        thead {
          tr {
            th { "Lane" }
            th { "Mode" }
            th { "Shipments" }
            th { "Avg cost" }
            th { "On time" }
          }
        }
        tbody {
          for lane in lanes {
            tr {
              key: "{lane.origin}-{lane.destination}",
              td { "{lane.origin} → {lane.destination}" }
              td { "{lane.mode}" }
              td { {group_thousands(lane.shipments)} }
              td { {usd(lane.avg_cost)} }
              td { {format!("{:.1}%", lane.on_time_pct)} }
            }
          }
        }
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn thousands_are_grouped() {
    assert_eq!(group_thousands(0), "0");
    assert_eq!(group_thousands(999), "999");
    assert_eq!(group_thousands(1_000), "1,000");
    assert_eq!(group_thousands(48_213), "48,213");
    assert_eq!(group_thousands(1_234_567), "1,234,567");
  }

  #[test]
  fn dollars_are_rounded() {
    assert_eq!(usd(Decimal::new(2_481_49, 2)), "$2,481");
    assert_eq!(usd(Decimal::new(2_481_50, 2)), "$2,482");
  }
}
