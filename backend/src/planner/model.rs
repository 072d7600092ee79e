use std::fmt;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const SENTINEL_NAME: &str = "Route unavailable";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coord {
  pub lat: f64,
  pub lng: f64
}

impl Coord {
  pub const fn new(lat: f64, lng: f64) -> Self {
    Self { lat, lng }
  }

  pub fn is_valid(&self) -> bool {
    self.lat.is_finite() && self.lng.is_finite()
      && (-90.0..=90.0).contains(&self.lat)
      && (-180.0..=180.0).contains(&self.lng)
  }
}

/// Mode tag carried by a single route segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegMode {
  Land,
  Sea,
  Air
}

impl fmt::Display for LegMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      LegMode::Land => write!(f, "land"),
      LegMode::Sea => write!(f, "sea"),
      LegMode::Air => write!(f, "air"),
    }
  }
}

/// Mode requested by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
  Land,
  Sea,
  Air,
  Multimodal
}

impl TransportMode {
  /// The single leg mode this request is pinned to, `None` for multimodal.
  pub fn leg_mode(&self) -> Option<LegMode> {
    match self {
      TransportMode::Land => Some(LegMode::Land),
      TransportMode::Sea => Some(LegMode::Sea),
      TransportMode::Air => Some(LegMode::Air),
      TransportMode::Multimodal => None,
    }
  }
}

impl fmt::Display for TransportMode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self.leg_mode() {
      Some(leg) => write!(f, "{}", leg),
      None => write!(f, "multimodal"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
  pub lat: f64,
  pub lng: f64,
  pub name: String,
  /// mode of the segment ending here; the origin carries the first segment's mode
  pub mode: LegMode,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>
}

impl Waypoint {
  pub fn new(coord: Coord, name: impl Into<String>, mode: LegMode) -> Self {
    Self { lat: coord.lat, lng: coord.lng, name: name.into(), mode, error: None }
  }

  pub fn coord(&self) -> Coord {
    Coord::new(self.lat, self.lng)
  }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Route(pub Vec<Waypoint>);

impl Route {
  /// Wire form of an infeasible request: a lone error waypoint at the origin.
  pub fn infeasible(origin: Coord, mode: LegMode, reason: impl Into<String>) -> Self {
    let mut marker = Waypoint::new(origin, SENTINEL_NAME, mode);
    marker.error = Some(reason.into());
    Route(vec![marker])
  }

  pub fn error(&self) -> Option<&str> {
    match self.0.as_slice() {
      [only] => only.error.as_deref(),
      _ => None
    }
  }

  pub fn waypoints(&self) -> &[Waypoint] {
    &self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Consecutive (mode, distance) pairs, one per segment.
  pub fn legs(&self) -> Vec<Leg> {
    self.0.windows(2)
      .map(|pair| Leg {
        mode: pair[1].mode,
        distance_km: super::geo::haversine_km(pair[0].coord(), pair[1].coord())
      })
      .collect()
  }

  pub fn distance_km(&self) -> f64 {
    self.legs().iter().map(|l| l.distance_km).sum()
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Leg {
  pub mode: LegMode,
  pub distance_km: f64
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Estimate {
  pub cost: Decimal,
  pub time_days: f64,
  pub distance_km: f64,
  pub legs: Vec<Leg>
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationRequest {
  pub origin: Coord,
  pub destination: Coord,
  #[serde(default)]
  pub origin_name: Option<String>,
  #[serde(default)]
  pub destination_name: Option<String>,
  pub mode: TransportMode,
  pub volume: f64,
  #[serde(default)]
  pub urgent: bool
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteSource {
  Agent,
  Heuristic
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
  pub route: Route,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub estimate: Option<Estimate>,
  pub mode: TransportMode,
  pub recommendations: Vec<String>,
  pub risks: Vec<String>,
  pub source: RouteSource
}
