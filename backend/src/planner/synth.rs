use thiserror::Error;

use super::{
  cost::{raw_cost, transit_days},
  geo::{classify, haversine_km, Region},
  hubs::{cheapest_detour, nearest, HubKind},
  model::{Coord, LegMode, Route, TransportMode, Waypoint}
};

pub const DIRECT_LAND_KM: f64 = 500.0;
pub const DIRECT_SEA_KM: f64 = 1_000.0;
pub const DIRECT_AIR_KM: f64 = 500.0;
const MAX_TERMINAL_DETOUR: f64 = 1.25;
const MERGE_RADIUS_KM: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
  #[error("No land connection between {from} and {to}")]
  NoLandConnection { from: Region, to: Region },
  #[error("No {0} available for this route")]
  NoHub(&'static str),
}

#[derive(Debug, Clone)]
pub struct Endpoint {
  pub coord: Coord,
  pub name: String
}

impl Endpoint {
  pub fn new(coord: Coord, name: impl Into<String>) -> Self {
    Self { coord, name: name.into() }
  }

  fn waypoint(&self, mode: LegMode) -> Waypoint {
    Waypoint::new(self.coord, self.name.clone(), mode)
  }
}

pub struct RoutePlan<'a> {
  pub origin: &'a Endpoint,
  pub destination: &'a Endpoint,
  pub mode: TransportMode,
  pub volume: f64,
  pub urgent: bool
}

impl RoutePlan<'_> {
  pub fn synthesize(&self) -> Result<Route, RouteError> {
    match self.mode {
      TransportMode::Land => land_route(self.origin, self.destination),
      TransportMode::Sea => sea_route(self.origin, self.destination),
      TransportMode::Air => air_route(self.origin, self.destination),
      TransportMode::Multimodal => self.multimodal_route(),
    }
  }

  /// Cheapest candidate, or fastest when the shipment is urgent.
  fn multimodal_route(&self) -> Result<Route, RouteError> {
    let candidates = [
      land_route(self.origin, self.destination),
      sea_route(self.origin, self.destination),
      air_route(self.origin, self.destination),
    ];

    let score = |route: &Route| {
      let legs = route.legs();
      if self.urgent {
        transit_days(&legs, true)
      } else {
        raw_cost(&legs, self.volume, false)
      }
    };

    let mut best: Option<(Route, f64)> = None;
    let mut first_err = None;
    for candidate in candidates {
      match candidate {
        Ok(route) => {
          let s = score(&route);
          if best.as_ref().map_or(true, |(_, b)| s < *b) {
            best = Some((route, s));
          }
        },
        Err(e) => {
          first_err.get_or_insert(e);
        }
      }
    }

    match (best, first_err) {
      (Some((route, _)), _) => Ok(route),
      (None, Some(e)) => Err(e),
      (None, None) => Err(RouteError::NoHub("transport hub")),
    }
  }
}

fn direct(origin: &Endpoint, destination: &Endpoint, mode: LegMode) -> Route {
  Route(vec![origin.waypoint(mode), destination.waypoint(mode)])
}

pub fn land_route(origin: &Endpoint, destination: &Endpoint) -> Result<Route, RouteError> {
  let (from, to) = (classify(origin.coord), classify(destination.coord));
  let landmass = match (from.landmass(), to.landmass()) {
    (Some(a), Some(b)) if a == b => a,
    _ => return Err(RouteError::NoLandConnection { from, to })
  };

  if haversine_km(origin.coord, destination.coord) <= DIRECT_LAND_KM {
    return Ok(direct(origin, destination, LegMode::Land));
  }

  let mut points = vec![origin.waypoint(LegMode::Land)];
  if let Some((hub, ratio)) = cheapest_detour(origin.coord, destination.coord, HubKind::Terminal, landmass) {
    if ratio <= MAX_TERMINAL_DETOUR {
      points.push(Waypoint::new(hub.coord, hub.name, LegMode::Land));
    }
  }
  points.push(destination.waypoint(LegMode::Land));

  Ok(simplify(points))
}

pub fn sea_route(origin: &Endpoint, destination: &Endpoint) -> Result<Route, RouteError> {
  let same_region = classify(origin.coord) == classify(destination.coord);
  if same_region && haversine_km(origin.coord, destination.coord) < DIRECT_SEA_KM {
    return Ok(direct(origin, destination, LegMode::Sea));
  }
  via_hubs(origin, destination, HubKind::Seaport, LegMode::Sea, "seaport")
}

pub fn air_route(origin: &Endpoint, destination: &Endpoint) -> Result<Route, RouteError> {
  if haversine_km(origin.coord, destination.coord) < DIRECT_AIR_KM {
    return Ok(direct(origin, destination, LegMode::Air));
  }
  via_hubs(origin, destination, HubKind::Airport, LegMode::Air, "airport")
}

// origin -land-> hub -main-> hub -land-> destination
fn via_hubs(origin: &Endpoint, destination: &Endpoint, kind: HubKind, main: LegMode, label: &'static str) -> Result<Route, RouteError> {
  let departure = nearest(origin.coord, kind).ok_or(RouteError::NoHub(label))?;
  let arrival = nearest(destination.coord, kind).ok_or(RouteError::NoHub(label))?;

  if departure.name == arrival.name {
    return Ok(direct(origin, destination, main));
  }

  Ok(simplify(vec![
    origin.waypoint(LegMode::Land),
    Waypoint::new(departure.coord, departure.name, LegMode::Land),
    Waypoint::new(arrival.coord, arrival.name, main),
    destination.waypoint(LegMode::Land),
  ]))
}

/// Drops hubs that sit on top of an endpoint or of the previous stop.
/// A hub merged into the destination hands its (long) leg mode over to it.
pub fn simplify(points: Vec<Waypoint>) -> Route {
  if points.len() < 2 {
    return Route(points);
  }

  let mut points = points;
  let Some(mut destination) = points.pop() else {
    return Route(points);
  };
  let mut rest = points.into_iter();
  let Some(origin) = rest.next() else {
    return Route(vec![destination]);
  };

  let mut kept = vec![origin];
  let mut carried: Option<LegMode> = None;

  for wp in rest {
    let prev = kept.last().map(Waypoint::coord).unwrap_or(wp.coord());
    if haversine_km(prev, wp.coord()) < MERGE_RADIUS_KM {
      continue;
    }
    if haversine_km(wp.coord(), destination.coord()) < MERGE_RADIUS_KM {
      carried.get_or_insert(wp.mode);
      continue;
    }
    kept.push(wp);
  }

  if let Some(mode) = carried {
    destination.mode = mode;
  }
  kept.push(destination);

  // origin is tagged with the mode of the first segment
  kept[0].mode = kept[1].mode;
  Route(kept)
}
