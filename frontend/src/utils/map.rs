use serde::Serialize;

use super::{
  playground::Place,
  server::{LegMode, Waypoint}
};

pub const GEOJSON_URL: &str = env!("GEOJSON_URL");

/// One drawn polyline; the leg's mode is the mode tagged on the waypoint it arrives at.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteSegment {
  pub from: [f64; 2],
  pub to: [f64; 2],
  pub color: &'static str,
  pub label: String
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
  pub lat: f64,
  pub lng: f64,
  pub name: String
}

impl From<&Place> for MapMarker {
  fn from(place: &Place) -> Self {
    Self { lat: place.coord.lat, lng: place.coord.lng, name: place.name.clone() }
  }
}

impl From<&Waypoint> for MapMarker {
  fn from(w: &Waypoint) -> Self {
    Self { lat: w.lat, lng: w.lng, name: w.name.clone() }
  }
}

pub fn route_segments(waypoints: &[Waypoint]) -> Vec<RouteSegment> {
  waypoints
    .windows(2)
    .map(|pair| RouteSegment {
      from: [pair[0].lat, pair[0].lng],
      to: [pair[1].lat, pair[1].lng],
      color: pair[1].mode.color(),
      label: format!("{} leg to {}", pair[1].mode, pair[1].name)
    })
    .collect()
}

/// Leg modes present on the route, in the order they first appear.
pub fn legend(waypoints: &[Waypoint]) -> Vec<(LegMode, &'static str)> {
  let mut modes: Vec<(LegMode, &'static str)> = Vec::new();
  for w in waypoints.iter().skip(1) {
    if !modes.iter().any(|(m, _)| *m == w.mode) {
      modes.push((w.mode, w.mode.color()));
    }
  }
  modes
}

fn js_value<T: Serialize>(value: &T) -> String {
  serde_json::to_string(value).unwrap_or_else(|_| "null".to_string())
}

pub fn init_js(map_id: &str, center: [f64; 2], zoom: u8) -> String {
  format!("TradeSimMap.init({}, {}, {});", js_value(&map_id), js_value(&center), zoom)
}

pub fn draw_route_js(map_id: &str, waypoints: &[Waypoint]) -> String {
  let stops: Vec<MapMarker> = waypoints.iter().map(MapMarker::from).collect();
  format!(
    "TradeSimMap.drawRoute({}, {}, {});",
    js_value(&map_id),
    js_value(&route_segments(waypoints)),
    js_value(&stops)
  )
}

pub fn clear_route_js(map_id: &str) -> String {
  format!("TradeSimMap.clearRoute({});", js_value(&map_id))
}

pub fn markers_js(map_id: &str, places: &[Place]) -> String {
  let markers: Vec<MapMarker> = places.iter().map(MapMarker::from).collect();
  format!("TradeSimMap.setMarkers({}, {});", js_value(&map_id), js_value(&markers))
}

pub fn countries_js(map_id: &str) -> String {
  format!("TradeSimMap.loadCountries({}, {});", js_value(&map_id), js_value(&GEOJSON_URL))
}
