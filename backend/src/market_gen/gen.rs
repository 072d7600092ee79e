use std::time::{SystemTime, UNIX_EPOCH};
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::{Distribution, Normal, Uniform};
use rust_decimal::{prelude::FromPrimitive, Decimal};
use serde::{Deserialize, Serialize};

use crate::{midwares::app_state::AppError, planner::model::LegMode};

const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];

struct Lane {
  origin: &'static str,
  destination: &'static str,
  mode: LegMode,
  base_rate: f64,
  base_days: f64
}

const LANES: &[Lane] = &[
  Lane { origin: "Shanghai", destination: "Los Angeles", mode: LegMode::Sea, base_rate: 2_150.0, base_days: 18.0 },
  Lane { origin: "Singapore", destination: "Rotterdam", mode: LegMode::Sea, base_rate: 2_900.0, base_days: 26.0 },
  Lane { origin: "Busan", destination: "Hamburg", mode: LegMode::Sea, base_rate: 3_050.0, base_days: 31.0 },
  Lane { origin: "Mumbai", destination: "Jebel Ali", mode: LegMode::Sea, base_rate: 780.0, base_days: 5.0 },
  Lane { origin: "Santos", destination: "Valencia", mode: LegMode::Sea, base_rate: 1_900.0, base_days: 16.0 },
  Lane { origin: "Hong Kong", destination: "Frankfurt", mode: LegMode::Air, base_rate: 6_400.0, base_days: 2.0 },
  Lane { origin: "Dubai", destination: "Johannesburg", mode: LegMode::Air, base_rate: 4_200.0, base_days: 2.0 },
  Lane { origin: "Memphis", destination: "Sao Paulo", mode: LegMode::Air, base_rate: 5_100.0, base_days: 3.0 },
  Lane { origin: "Duisburg", destination: "Warsaw", mode: LegMode::Land, base_rate: 1_150.0, base_days: 2.0 },
  Lane { origin: "Chicago", destination: "Dallas", mode: LegMode::Land, base_rate: 1_600.0, base_days: 3.0 },
  Lane { origin: "Chongqing", destination: "Duisburg", mode: LegMode::Land, base_rate: 5_800.0, base_days: 16.0 },
  Lane { origin: "Nairobi", destination: "Johannesburg", mode: LegMode::Land, base_rate: 2_400.0, base_days: 6.0 },
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpis {
  pub shipments: u64,
  pub on_time_pct: f64,
  pub avg_cost: Decimal,
  pub active_lanes: u32
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyVolume {
  pub month: String,
  pub shipments: u64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeShare {
  pub mode: LegMode,
  pub share_pct: f64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneStat {
  pub origin: String,
  pub destination: String,
  pub mode: LegMode,
  pub shipments: u64,
  pub avg_cost: Decimal,
  pub on_time_pct: f64
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardData {
  pub kpis: Kpis,
  pub monthly_volume: Vec<MonthlyVolume>,
  pub mode_split: Vec<ModeShare>,
  pub top_lanes: Vec<LaneStat>
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneTick {
  pub lane: String,
  pub mode: LegMode,
  pub rate: Decimal,
  pub change_pct: f64,
  pub eta_days: f64,
  pub timestamp: u64
}

fn money(v: f64) -> Decimal {
  Decimal::from_f64(v).unwrap_or_default().round_dp(2)
}

fn one_decimal(v: f64) -> f64 {
  (v * 10.0).round() / 10.0
}

fn internal<E: std::fmt::Display>(e: E) -> AppError {
  AppError::InternalError(format!("distribution setup failed: {}", e))
}

pub struct MarketSimulator {
  rng: StdRng,
  lane_dist: Uniform<usize>,
  drift_dist: Normal<f64>,
  volume_dist: Normal<f64>,
  on_time_dist: Normal<f64>
}

impl MarketSimulator {
  pub fn new() -> Result<Self, AppError> {
    Self::from_rng(StdRng::from_os_rng())
  }

  pub fn with_seed(seed: u64) -> Result<Self, AppError> {
    Self::from_rng(StdRng::seed_from_u64(seed))
  }

  fn from_rng(rng: StdRng) -> Result<Self, AppError> {
    Ok(MarketSimulator {
      rng,
      lane_dist: Uniform::new(0, LANES.len()).map_err(internal)?,
      // percent change of a lane rate between ticks
      drift_dist: Normal::new(0.0, 1.5).map_err(internal)?,
      volume_dist: Normal::new(1_800.0, 350.0).map_err(internal)?,
      on_time_dist: Normal::new(91.0, 3.5).map_err(internal)?,
    })
  }

  fn on_time(&mut self) -> f64 {
    one_decimal(self.on_time_dist.sample(&mut self.rng).clamp(60.0, 100.0))
  }

  pub fn dashboard(&mut self) -> DashboardData {
    let monthly_volume: Vec<MonthlyVolume> = MONTHS.iter()
      .map(|m| MonthlyVolume {
        month: m.to_string(),
        shipments: self.volume_dist.sample(&mut self.rng).max(0.0).round() as u64
      })
      .collect();

    let weights: Vec<f64> = (0..3).map(|_| self.rng.random_range(0.5..1.5)).collect();
    let total: f64 = weights.iter().sum();
    let mode_split = [LegMode::Sea, LegMode::Land, LegMode::Air].into_iter()
      .zip(weights)
      .map(|(mode, w)| ModeShare { mode, share_pct: one_decimal(100.0 * w / total) })
      .collect();

    let mut top_lanes: Vec<LaneStat> = LANES.iter()
      .map(|lane| {
        let shipments = self.rng.random_range(40..400);
        let cost = lane.base_rate * (1.0 + self.drift_dist.sample(&mut self.rng) / 10.0);
        LaneStat {
          origin: lane.origin.to_string(),
          destination: lane.destination.to_string(),
          mode: lane.mode,
          shipments,
          avg_cost: money(cost.max(0.0)),
          on_time_pct: self.on_time()
        }
      })
      .collect();
    top_lanes.sort_by(|a, b| b.shipments.cmp(&a.shipments));
    top_lanes.truncate(5);

    let shipments = monthly_volume.iter().map(|m| m.shipments).sum();
    let avg_cost = LANES.iter().map(|l| l.base_rate).sum::<f64>() / LANES.len() as f64;

    DashboardData {
      kpis: Kpis {
        shipments,
        on_time_pct: self.on_time(),
        avg_cost: money(avg_cost * self.rng.random_range(0.9..1.1)),
        active_lanes: LANES.len() as u32
      },
      monthly_volume,
      mode_split,
      top_lanes
    }
  }

  pub fn ticks(&mut self, n: usize) -> Vec<LaneTick> {
    let timestamp = SystemTime::now()
      .duration_since(UNIX_EPOCH)
      .map(|d| d.as_millis() as u64)
      .unwrap_or_default();

    (0..n).map(|_| {
      let lane = &LANES[self.lane_dist.sample(&mut self.rng)];
      let change_pct = one_decimal(self.drift_dist.sample(&mut self.rng));
      let rate = lane.base_rate * (1.0 + change_pct / 100.0);
      let eta_days = one_decimal((lane.base_days * self.rng.random_range(0.9..1.2)).max(0.5));
      LaneTick {
        lane: format!("{} - {}", lane.origin, lane.destination),
        mode: lane.mode,
        rate: money(rate),
        change_pct,
        eta_days,
        timestamp
      }
    }).collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn dashboard_has_the_expected_shape() {
    let mut sim = MarketSimulator::with_seed(7).unwrap();
    let data = sim.dashboard();
    assert_eq!(data.monthly_volume.len(), 12);
    assert_eq!(data.mode_split.len(), 3);
    assert_eq!(data.top_lanes.len(), 5);
    assert_eq!(data.kpis.active_lanes as usize, LANES.len());
    assert!((60.0..=100.0).contains(&data.kpis.on_time_pct));

    let share: f64 = data.mode_split.iter().map(|m| m.share_pct).sum();
    assert!((share - 100.0).abs() < 0.5);
    assert!(data.top_lanes.windows(2).all(|w| w[0].shipments >= w[1].shipments));
  }

  #[test]
  fn ticks_cover_known_lanes() {
    let mut sim = MarketSimulator::with_seed(11).unwrap();
    let ticks = sim.ticks(20);
    assert_eq!(ticks.len(), 20);
    for t in ticks {
      assert!(LANES.iter().any(|l| t.lane == format!("{} - {}", l.origin, l.destination)));
      assert!(t.rate > Decimal::ZERO);
      assert!(t.eta_days >= 0.5);
    }
  }

  #[test]
  fn same_seed_same_data() {
    let a = MarketSimulator::with_seed(3).unwrap().dashboard();
    let b = MarketSimulator::with_seed(3).unwrap().dashboard();
    assert_eq!(a.kpis.shipments, b.kpis.shipments);
  }
}
