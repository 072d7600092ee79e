use super::{cost::LONG_ROUTE_KM, model::TransportMode};

fn recommendations_for(mode: TransportMode) -> &'static [&'static str] {
  match mode {
    TransportMode::Land => &[
      "Consolidate partial loads at the nearest terminal to fill trucks",
      "Pre-clear customs documents for every border crossing on the route",
    ],
    TransportMode::Sea => &[
      "Book container space at least two weeks ahead of the cut-off date",
      "Insure cargo against general average claims",
    ],
    TransportMode::Air => &[
      "Confirm dimensional weight with the carrier before booking",
      "Schedule pick-up to meet the airline's cargo acceptance window",
    ],
    TransportMode::Multimodal => &[
      "Use a single through bill of lading to cover every leg",
      "Track hand-overs at each hub to avoid dwell time between legs",
    ],
  }
}

fn risks_for(mode: TransportMode) -> &'static [&'static str] {
  match mode {
    TransportMode::Land => &["Border queues and driver-hour limits can add days", "Road and rail disruptions from weather"],
    TransportMode::Sea => &["Port congestion and blank sailings", "Weather delays on open-ocean legs"],
    TransportMode::Air => &["Capacity shortages during peak season", "Strict dangerous-goods screening"],
    TransportMode::Multimodal => &["Missed connections between legs", "Handling damage at transfer points"],
  }
}

pub fn advise(mode: TransportMode, distance_km: f64, urgent: bool) -> (Vec<String>, Vec<String>) {
  let mut recommendations: Vec<String> = recommendations_for(mode).iter().map(|s| s.to_string()).collect();
  let mut risks: Vec<String> = risks_for(mode).iter().map(|s| s.to_string()).collect();

  if urgent {
    recommendations.push("Request expedited handling and priority customs clearance".to_string());
  }
  if distance_km > LONG_ROUTE_KM {
    risks.push("Long-haul route: exposure to currency and fuel surcharge changes".to_string());
  }
  (recommendations, risks)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn urgent_requests_get_an_expedite_hint() {
    let (calm, _) = advise(TransportMode::Sea, 100.0, false);
    let (rushed, _) = advise(TransportMode::Sea, 100.0, true);
    assert_eq!(rushed.len(), calm.len() + 1);
    assert!(rushed.last().unwrap().contains("expedited"));
  }

  #[test]
  fn long_routes_carry_an_extra_risk() {
    let (_, short) = advise(TransportMode::Air, 1_000.0, false);
    let (_, long) = advise(TransportMode::Air, 12_000.0, false);
    assert_eq!(long.len(), short.len() + 1);
  }
}
