use super::{geo::{classify, haversine_km, Landmass}, model::Coord};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HubKind {
  Seaport,
  Airport,
  Terminal
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hub {
  pub name: &'static str,
  pub coord: Coord,
  pub kind: HubKind
}

impl Hub {
  const fn new(name: &'static str, lat: f64, lng: f64, kind: HubKind) -> Self {
    Self { name, coord: Coord::new(lat, lng), kind }
  }

  pub fn landmass(&self) -> Option<Landmass> {
    classify(self.coord).landmass()
  }
}

pub const HUBS: &[Hub] = &[
  // seaports
  Hub::new("Port of Shanghai", 31.23, 121.49, HubKind::Seaport),
  Hub::new("Port of Singapore", 1.26, 103.84, HubKind::Seaport),
  Hub::new("Port of Busan", 35.10, 129.04, HubKind::Seaport),
  Hub::new("Nhava Sheva", 18.95, 72.95, HubKind::Seaport),
  Hub::new("Jebel Ali", 25.01, 55.06, HubKind::Seaport),
  Hub::new("Port of Rotterdam", 51.95, 4.14, HubKind::Seaport),
  Hub::new("Port of Hamburg", 53.54, 9.97, HubKind::Seaport),
  Hub::new("Port of Valencia", 39.44, -0.32, HubKind::Seaport),
  Hub::new("Port of Lagos", 6.44, 3.39, HubKind::Seaport),
  Hub::new("Port of Durban", -29.87, 31.03, HubKind::Seaport),
  Hub::new("Port of Los Angeles", 33.74, -118.27, HubKind::Seaport),
  Hub::new("Port of New York and New Jersey", 40.67, -74.05, HubKind::Seaport),
  Hub::new("Port of Colon", 9.36, -79.90, HubKind::Seaport),
  Hub::new("Port of Santos", -23.96, -46.30, HubKind::Seaport),
  Hub::new("Port Botany", -33.97, 151.22, HubKind::Seaport),
  // airports
  Hub::new("Hong Kong International", 22.31, 113.91, HubKind::Airport),
  Hub::new("Singapore Changi", 1.36, 103.99, HubKind::Airport),
  Hub::new("Dubai International", 25.25, 55.36, HubKind::Airport),
  Hub::new("Frankfurt Airport", 50.04, 8.56, HubKind::Airport),
  Hub::new("Johannesburg OR Tambo", -26.14, 28.24, HubKind::Airport),
  Hub::new("Memphis International", 35.04, -89.98, HubKind::Airport),
  Hub::new("Ted Stevens Anchorage", 61.17, -149.99, HubKind::Airport),
  Hub::new("Sao Paulo Guarulhos", -23.43, -46.47, HubKind::Airport),
  Hub::new("Sydney Kingsford Smith", -33.94, 151.18, HubKind::Airport),
  // inland terminals
  Hub::new("Duisburg Intermodal", 51.43, 6.76, HubKind::Terminal),
  Hub::new("Warsaw Rail Terminal", 52.23, 21.01, HubKind::Terminal),
  Hub::new("Khorgos Gateway", 44.21, 80.41, HubKind::Terminal),
  Hub::new("Chongqing Logistics Park", 29.56, 106.55, HubKind::Terminal),
  Hub::new("Chicago Rail Hub", 41.88, -87.63, HubKind::Terminal),
  Hub::new("Dallas Logistics Hub", 32.78, -96.80, HubKind::Terminal),
  Hub::new("Johannesburg City Deep", -26.22, 28.07, HubKind::Terminal),
  Hub::new("Nairobi Inland Depot", -1.32, 36.88, HubKind::Terminal),
  Hub::new("Adelaide Freight Terminal", -34.93, 138.60, HubKind::Terminal),
];

fn of_kind(kind: HubKind) -> impl Iterator<Item = &'static Hub> {
  HUBS.iter().filter(move |h| h.kind == kind)
}

/// Closest hub of `kind` to `point`.
pub fn nearest(point: Coord, kind: HubKind) -> Option<&'static Hub> {
  of_kind(kind).min_by(|a, b| {
    haversine_km(point, a.coord).total_cmp(&haversine_km(point, b.coord))
  })
}

/// Hub of `kind` on `landmass` that adds the least distance to the trip `from -> to`.
/// Returns the hub together with its detour ratio `(d(from,h) + d(h,to)) / d(from,to)`.
pub fn cheapest_detour(from: Coord, to: Coord, kind: HubKind, landmass: Landmass) -> Option<(&'static Hub, f64)> {
  let direct = haversine_km(from, to);
  if direct <= f64::EPSILON {
    return None;
  }

  of_kind(kind)
    .filter(|h| h.landmass() == Some(landmass))
    .map(|h| {
      let via = haversine_km(from, h.coord) + haversine_km(h.coord, to);
      (h, via / direct)
    })
    .min_by(|a, b| a.1.total_cmp(&b.1))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_hub_sits_on_a_landmass() {
    for hub in HUBS {
      assert!(hub.landmass().is_some(), "{} is not on a landmass", hub.name);
    }
  }

  #[test]
  fn nearest_seaport_to_shanghai_is_shanghai() {
    let hub = nearest(Coord::new(31.2304, 121.4737), HubKind::Seaport).unwrap();
    assert_eq!(hub.name, "Port of Shanghai");
  }

  #[test]
  fn nearest_airport_to_berlin_is_frankfurt() {
    let hub = nearest(Coord::new(52.52, 13.405), HubKind::Airport).unwrap();
    assert_eq!(hub.name, "Frankfurt Airport");
  }

  #[test]
  fn detour_between_chicago_neighbours_prefers_chicago() {
    // indianapolis to milwaukee passes right by the chicago terminal
    let (hub, ratio) = cheapest_detour(Coord::new(39.77, -86.16), Coord::new(43.04, -87.91), HubKind::Terminal, Landmass::Americas).unwrap();
    assert_eq!(hub.name, "Chicago Rail Hub");
    assert!(ratio < 1.05);
  }

  #[test]
  fn detour_is_undefined_for_identical_endpoints() {
    let p = Coord::new(10.0, 10.0);
    assert!(cheapest_detour(p, p, HubKind::Terminal, Landmass::AfroEurasia).is_none());
  }
}
