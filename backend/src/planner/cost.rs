use rust_decimal::{prelude::FromPrimitive, Decimal};

use super::model::{Estimate, Leg, LegMode};

#[derive(Debug, Clone, Copy)]
pub struct ModeRates {
  /// currency per km per cubic metre
  pub rate_per_km: f64,
  pub handling_fee: f64,
  pub speed_km_per_day: f64,
  pub processing_days: f64
}

pub const fn rates(mode: LegMode) -> ModeRates {
  match mode {
    LegMode::Land => ModeRates { rate_per_km: 0.10, handling_fee: 120.0, speed_km_per_day: 650.0, processing_days: 1.0 },
    LegMode::Sea => ModeRates { rate_per_km: 0.015, handling_fee: 450.0, speed_km_per_day: 700.0, processing_days: 4.0 },
    LegMode::Air => ModeRates { rate_per_km: 0.85, handling_fee: 300.0, speed_km_per_day: 9_000.0, processing_days: 1.0 },
  }
}

pub const LONG_ROUTE_KM: f64 = 8_000.0;
const VERY_LONG_ROUTE_KM: f64 = 15_000.0;
const URGENT_COST_FACTOR: f64 = 1.30;
const URGENT_PROCESSING_FACTOR: f64 = 0.5;

/// Economies of scale on the variable part of the cost.
pub fn volume_discount(volume: f64) -> f64 {
  if volume < 10.0 {
    0.0
  } else if volume < 50.0 {
    0.10
  } else if volume < 200.0 {
    0.18
  } else {
    0.25
  }
}

/// Step penalty for coordinating long routes; non-decreasing in distance.
/// Monotonicity holds per leg and for a fixed leg composition: a different
/// route shape (another hub) is a different composition.
pub fn complexity_penalty(total_km: f64) -> f64 {
  if total_km > VERY_LONG_ROUTE_KM {
    1.15
  } else if total_km > LONG_ROUTE_KM {
    1.08
  } else {
    1.0
  }
}

/// Raw cost before rounding. Exposed for candidate comparison.
pub fn raw_cost(legs: &[Leg], volume: f64, urgent: bool) -> f64 {
  let total_km: f64 = legs.iter().map(|l| l.distance_km).sum();
  let variable: f64 = legs.iter().map(|l| l.distance_km * rates(l.mode).rate_per_km).sum();
  let fixed: f64 = legs.iter().map(|l| rates(l.mode).handling_fee).sum();

  let mut cost = (variable * volume * (1.0 - volume_discount(volume)) + fixed) * complexity_penalty(total_km);
  if urgent {
    cost *= URGENT_COST_FACTOR;
  }
  cost
}

pub fn transit_days(legs: &[Leg], urgent: bool) -> f64 {
  let processing_factor = if urgent { URGENT_PROCESSING_FACTOR } else { 1.0 };
  legs.iter()
    .map(|l| {
      let r = rates(l.mode);
      l.distance_km / r.speed_km_per_day + r.processing_days * processing_factor
    })
    .sum()
}

pub fn estimate(legs: Vec<Leg>, volume: f64, urgent: bool) -> Estimate {
  let cost = Decimal::from_f64(raw_cost(&legs, volume, urgent))
    .unwrap_or_default()
    .round_dp(2);
  let time_days = (transit_days(&legs, urgent) * 10.0).round() / 10.0;
  let distance_km = (legs.iter().map(|l| l.distance_km).sum::<f64>() * 10.0).round() / 10.0;

  Estimate { cost, time_days, distance_km, legs }
}

#[cfg(test)]
mod tests {
  use super::*;
  use proptest::prelude::*;
  use std::str::FromStr;

  fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
  }

  fn leg(mode: LegMode, distance_km: f64) -> Leg {
    Leg { mode, distance_km }
  }

  #[test]
  fn single_land_leg_cost_and_time() {
    let est = estimate(vec![leg(LegMode::Land, 1_000.0)], 1.0, false);
    // 1000 * 0.10 * 1 + 120
    assert_eq!(est.cost, dec("220.00"));
    // 1000 / 650 + 1.0 = 2.538..
    assert_eq!(est.time_days, 2.5);
  }

  #[test]
  fn volume_discount_applies_to_variable_part_only() {
    let est = estimate(vec![leg(LegMode::Land, 1_000.0)], 100.0, false);
    // 1000 * 0.10 * 100 * 0.82 + 120
    assert_eq!(est.cost, dec("8320.00"));
  }

  #[test]
  fn long_routes_pay_the_complexity_penalty() {
    let short = raw_cost(&[leg(LegMode::Sea, 7_999.0)], 1.0, false);
    let long = raw_cost(&[leg(LegMode::Sea, 8_001.0)], 1.0, false);
    assert!(long > short * 1.07);
  }

  #[test]
  fn urgency_costs_more_but_processes_faster() {
    let legs = vec![leg(LegMode::Sea, 5_000.0)];
    assert!(raw_cost(&legs, 5.0, true) > raw_cost(&legs, 5.0, false));
    assert!(transit_days(&legs, true) < transit_days(&legs, false));
  }

  #[test]
  fn empty_route_costs_nothing() {
    let est = estimate(vec![], 10.0, false);
    assert_eq!(est.cost, Decimal::ZERO);
    assert_eq!(est.time_days, 0.0);
  }

  fn any_mode() -> impl Strategy<Value = LegMode> {
    prop_oneof![Just(LegMode::Land), Just(LegMode::Sea), Just(LegMode::Air)]
  }

  proptest! {
    #[test]
    fn cost_and_time_never_decrease_with_distance(
      mode in any_mode(),
      a in 0.0f64..25_000.0,
      b in 0.0f64..25_000.0,
      volume in 0.1f64..500.0,
      urgent in any::<bool>(),
    ) {
      let (near, far) = if a <= b { (a, b) } else { (b, a) };
      let e_near = estimate(vec![leg(mode, near)], volume, urgent);
      let e_far = estimate(vec![leg(mode, far)], volume, urgent);
      prop_assert!(e_near.cost <= e_far.cost);
      prop_assert!(e_near.time_days <= e_far.time_days);
    }

    #[test]
    fn lengthening_legs_of_a_fixed_route_never_gets_cheaper(
      legs in prop::collection::vec((any_mode(), 0.0f64..9_000.0, 0.0f64..4_000.0), 1..5),
      volume in 0.1f64..500.0,
      urgent in any::<bool>(),
    ) {
      let short: Vec<Leg> = legs.iter().map(|(m, d, _)| leg(*m, *d)).collect();
      let long: Vec<Leg> = legs.iter().map(|(m, d, extra)| leg(*m, d + extra)).collect();
      let (e_short, e_long) = (estimate(short, volume, urgent), estimate(long, volume, urgent));
      prop_assert!(e_short.cost <= e_long.cost);
      prop_assert!(e_short.time_days <= e_long.time_days);
    }

    #[test]
    fn moving_the_destination_out_along_a_fixed_hub_sequence_never_gets_cheaper(
      near in 25.0f64..60.0,
      further in 0.0f64..60.0,
      volume in 0.1f64..500.0,
    ) {
      use crate::planner::model::{Coord, Route, Waypoint};

      let route = |dest_lng: f64| Route(vec![
        Waypoint::new(Coord::new(0.0, 0.0), "origin", LegMode::Land),
        Waypoint::new(Coord::new(0.0, 5.0), "port A", LegMode::Land),
        Waypoint::new(Coord::new(0.0, 20.0), "port B", LegMode::Sea),
        Waypoint::new(Coord::new(0.0, dest_lng), "destination", LegMode::Land),
      ]);
      let e_near = estimate(route(near).legs(), volume, false);
      let e_far = estimate(route(near + further).legs(), volume, false);
      prop_assert!(e_near.cost <= e_far.cost);
      prop_assert!(e_near.time_days <= e_far.time_days);
    }
  }
}
