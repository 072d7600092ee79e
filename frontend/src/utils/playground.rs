use super::server::{Coord, SimulationRequest, SimulationResult, TransportMode};

#[derive(Debug, Clone, PartialEq)]
pub struct Place {
  pub name: String,
  pub coord: Coord
}

impl Place {
  pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
    Self { name: name.into(), coord: Coord { lat, lng } }
  }

  pub fn from_click(lat: f64, lng: f64) -> Self {
    Self::new(format!("{:.3}, {:.3}", lat, lng), lat, lng)
  }
}

pub fn preset_ports() -> Vec<Place> {
  vec![
    Place::new("Shanghai", 31.2304, 121.4737),
    Place::new("Singapore", 1.2903, 103.8519),
    Place::new("Busan", 35.1796, 129.0756),
    Place::new("Mumbai", 19.0760, 72.8777),
    Place::new("Dubai", 25.2048, 55.2708),
    Place::new("Rotterdam", 51.9244, 4.4777),
    Place::new("Hamburg", 53.5511, 9.9937),
    Place::new("Berlin", 52.5200, 13.4050),
    Place::new("Lagos", 6.5244, 3.3792),
    Place::new("Durban", -29.8587, 31.0218),
    Place::new("Los Angeles", 34.0522, -118.2437),
    Place::new("New York", 40.7128, -74.0060),
    Place::new("Chicago", 41.8781, -87.6298),
    Place::new("Santos", -23.9608, -46.3336),
    Place::new("Sydney", -33.8688, 151.2093),
  ]
}

pub const DEFAULT_VOLUME: f64 = 10.0;

/// Everything the playground page shows; `reset` returns it to a blank slate.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaygroundState {
  pub origin: Option<Place>,
  pub destination: Option<Place>,
  pub mode: TransportMode,
  pub volume: f64,
  pub urgent: bool,
  pub result: Option<SimulationResult>,
  pub error: Option<String>
}

impl Default for PlaygroundState {
  fn default() -> Self {
    Self {
      origin: None,
      destination: None,
      mode: TransportMode::Multimodal,
      volume: DEFAULT_VOLUME,
      urgent: false,
      result: None,
      error: None
    }
  }
}

impl PlaygroundState {
  pub fn reset(&mut self) {
    *self = Self::default();
  }

  /// A map click fills the origin first, then the destination, then starts over.
  pub fn pick(&mut self, place: Place) {
    match (&self.origin, &self.destination) {
      (None, _) => self.origin = Some(place),
      (Some(_), None) => self.destination = Some(place),
      (Some(_), Some(_)) => {
        self.origin = Some(place);
        self.destination = None;
      }
    }
    self.clear_outcome();
  }

  pub fn clear_outcome(&mut self) {
    self.result = None;
    self.error = None;
  }

  pub fn to_request(&self) -> Result<SimulationRequest, String> {
    let origin = self.origin.as_ref().ok_or("Pick an origin first")?;
    let destination = self.destination.as_ref().ok_or("Pick a destination first")?;
    if origin.coord == destination.coord {
      return Err("Origin and destination are the same place".to_string());
    }
    if !self.volume.is_finite() || self.volume <= 0.0 {
      return Err("Volume must be a positive number of cubic metres".to_string());
    }

    Ok(SimulationRequest {
      origin: origin.coord,
      destination: destination.coord,
      origin_name: Some(origin.name.clone()),
      destination_name: Some(destination.name.clone()),
      mode: self.mode,
      volume: self.volume,
      urgent: self.urgent
    })
  }

  /// Stores the result; an infeasible route becomes the page's error message.
  pub fn apply(&mut self, result: SimulationResult) {
    self.error = result.route.error().map(str::to_string);
    self.result = Some(result);
  }

  /// The result a PDF report can be built from; infeasible outcomes have none.
  pub fn reportable(&self) -> Option<&SimulationResult> {
    self.result.as_ref().filter(|r| self.error.is_none() && r.route.error().is_none())
  }

  pub fn drawable(&self) -> bool {
    self.error.is_none() && self.result.as_ref().is_some_and(|r| r.route.waypoints().len() >= 2)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::utils::server::{LegMode, Route, RouteSource, Waypoint};

  fn result_with(route: Vec<Waypoint>) -> SimulationResult {
    SimulationResult {
      route: Route(route),
      estimate: None,
      mode: TransportMode::Land,
      recommendations: vec![],
      risks: vec![],
      source: RouteSource::Heuristic
    }
  }

  fn waypoint(name: &str, error: Option<&str>) -> Waypoint {
    Waypoint { lat: 1.0, lng: 2.0, name: name.to_string(), mode: LegMode::Land, error: error.map(str::to_string) }
  }

  #[test]
  fn reset_clears_everything() {
    let mut state = PlaygroundState::default();
    state.pick(Place::new("A", 1.0, 1.0));
    state.pick(Place::new("B", 2.0, 2.0));
    state.mode = TransportMode::Air;
    state.volume = 99.0;
    state.urgent = true;
    state.apply(result_with(vec![waypoint("A", None), waypoint("B", None)]));

    state.reset();
    assert_eq!(state, PlaygroundState::default());
  }

  #[test]
  fn clicks_fill_origin_then_destination() {
    let mut state = PlaygroundState::default();
    state.pick(Place::from_click(10.0, 20.0));
    state.pick(Place::from_click(30.0, 40.0));
    assert_eq!(state.origin.as_ref().unwrap().name, "10.000, 20.000");
    assert_eq!(state.destination.as_ref().unwrap().coord, Coord { lat: 30.0, lng: 40.0 });

    state.pick(Place::from_click(50.0, 60.0));
    assert_eq!(state.origin.as_ref().unwrap().coord.lat, 50.0);
    assert!(state.destination.is_none());
  }

  #[test]
  fn request_needs_both_endpoints_and_a_volume() {
    let mut state = PlaygroundState::default();
    assert!(state.to_request().is_err());
    state.pick(Place::new("Shanghai", 31.23, 121.47));
    state.pick(Place::new("Los Angeles", 34.05, -118.24));
    let req = state.to_request().unwrap();
    assert_eq!(req.origin_name.as_deref(), Some("Shanghai"));
    assert_eq!(req.mode, TransportMode::Multimodal);

    state.volume = 0.0;
    assert!(state.to_request().is_err());
  }

  #[test]
  fn infeasible_results_surface_the_message() {
    let mut state = PlaygroundState::default();
    state.apply(result_with(vec![waypoint("Route unavailable", Some("No land connection between Asia and North America"))]));
    assert_eq!(state.error.as_deref(), Some("No land connection between Asia and North America"));
    assert!(!state.drawable());
    assert!(state.reportable().is_none());
  }

  #[test]
  fn only_feasible_results_are_reportable() {
    let mut state = PlaygroundState::default();
    assert!(state.reportable().is_none());

    state.apply(result_with(vec![waypoint("Paris", None), waypoint("Brussels", None)]));
    assert_eq!(state.reportable().map(|r| r.route.waypoints().len()), Some(2));

    state.apply(result_with(vec![waypoint("Route unavailable", Some("No land connection between Hawaii and North America"))]));
    assert!(state.reportable().is_none());
  }

  #[test]
  fn presets_are_unique() {
    let ports = preset_ports();
    let mut names: Vec<_> = ports.iter().map(|p| p.name.clone()).collect();
    names.dedup();
    assert_eq!(names.len(), ports.len());
  }
}
