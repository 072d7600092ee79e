use std::fmt;
use serde::Serialize;

use super::model::Coord;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates.
pub fn haversine_km(a: Coord, b: Coord) -> f64 {
  let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
  let d_lat = (b.lat - a.lat).to_radians();
  let d_lng = (b.lng - a.lng).to_radians();

  let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);
  2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Region {
  NorthAmerica,
  CentralAmerica,
  SouthAmerica,
  Europe,
  Africa,
  MiddleEast,
  Asia,
  Oceania,
  Island(Island),
  Open
}

/// Islands with no fixed link to the continent their region box would give them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Island {
  Hawaii,
  Cuba,
  Hispaniola,
  Jamaica,
  PuertoRico,
  Bahamas,
  LesserAntilles,
  Greenland,
  Iceland,
  Ireland,
  Corsica,
  Sardinia,
  Madagascar,
  SriLanka,
  Japan,
  Taiwan,
  Philippines,
  Borneo,
  Sumatra,
  Java,
  Sulawesi,
  NewGuinea,
  Tasmania,
  NorthIsland,
  SouthIsland
}

impl Island {
  /// Island chains: no two points in one can be assumed to share land.
  pub fn is_archipelago(&self) -> bool {
    matches!(self, Island::Bahamas | Island::LesserAntilles | Island::Philippines)
  }
}

impl fmt::Display for Island {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Island::Hawaii => "Hawaii",
      Island::Cuba => "Cuba",
      Island::Hispaniola => "Hispaniola",
      Island::Jamaica => "Jamaica",
      Island::PuertoRico => "Puerto Rico",
      Island::Bahamas => "the Bahamas",
      Island::LesserAntilles => "the Lesser Antilles",
      Island::Greenland => "Greenland",
      Island::Iceland => "Iceland",
      Island::Ireland => "Ireland",
      Island::Corsica => "Corsica",
      Island::Sardinia => "Sardinia",
      Island::Madagascar => "Madagascar",
      Island::SriLanka => "Sri Lanka",
      Island::Japan => "Japan",
      Island::Taiwan => "Taiwan",
      Island::Philippines => "the Philippines",
      Island::Borneo => "Borneo",
      Island::Sumatra => "Sumatra",
      Island::Java => "Java",
      Island::Sulawesi => "Sulawesi",
      Island::NewGuinea => "New Guinea",
      Island::Tasmania => "Tasmania",
      Island::NorthIsland => "the North Island of New Zealand",
      Island::SouthIsland => "the South Island of New Zealand",
    };
    write!(f, "{}", name)
  }
}

impl fmt::Display for Region {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      Region::NorthAmerica => "North America",
      Region::CentralAmerica => "Central America",
      Region::SouthAmerica => "South America",
      Region::Europe => "Europe",
      Region::Africa => "Africa",
      Region::MiddleEast => "the Middle East",
      Region::Asia => "Asia",
      Region::Oceania => "Oceania",
      Region::Island(island) => return write!(f, "{}", island),
      Region::Open => "open water",
    };
    write!(f, "{}", name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Landmass {
  AfroEurasia,
  Americas,
  Oceania,
  Island(Island)
}

impl Region {
  pub fn landmass(&self) -> Option<Landmass> {
    match self {
      Region::Europe | Region::Africa | Region::MiddleEast | Region::Asia => Some(Landmass::AfroEurasia),
      Region::NorthAmerica | Region::CentralAmerica | Region::SouthAmerica => Some(Landmass::Americas),
      Region::Oceania => Some(Landmass::Oceania),
      Region::Island(island) if island.is_archipelago() => None,
      Region::Island(island) => Some(Landmass::Island(*island)),
      Region::Open => None,
    }
  }
}

#[derive(Debug, Clone, Copy)]
struct BBox {
  lat_min: f64,
  lat_max: f64,
  lng_min: f64,
  lng_max: f64
}

impl BBox {
  const fn new(lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> Self {
    Self { lat_min, lat_max, lng_min, lng_max }
  }

  fn contains(&self, c: Coord) -> bool {
    c.lat >= self.lat_min && c.lat <= self.lat_max && c.lng >= self.lng_min && c.lng <= self.lng_max
  }
}

const fn island(island: Island, lat_min: f64, lat_max: f64, lng_min: f64, lng_max: f64) -> (Region, BBox) {
  (Region::Island(island), BBox::new(lat_min, lat_max, lng_min, lng_max))
}

// first match wins, so the narrow boxes go before the broad ones they overlap
const REGION_BOXES: &[(Region, BBox)] = &[
  island(Island::Hawaii, 18.8, 22.3, -160.6, -154.7),
  island(Island::Cuba, 19.8, 23.3, -85.0, -74.1),
  island(Island::Hispaniola, 17.5, 20.1, -74.5, -68.3),
  island(Island::Jamaica, 17.7, 18.6, -78.4, -76.1),
  island(Island::PuertoRico, 17.9, 18.6, -67.3, -65.2),
  island(Island::Bahamas, 20.9, 27.0, -79.3, -72.7),
  island(Island::LesserAntilles, 11.9, 18.5, -65.0, -59.0),
  island(Island::Iceland, 63.2, 66.6, -24.6, -13.4),
  island(Island::Greenland, 59.5, 83.7, -60.0, -11.0),
  island(Island::Ireland, 51.3, 54.6, -10.7, -5.4),
  island(Island::Ireland, 54.6, 55.4, -8.7, -6.0),
  island(Island::Corsica, 41.3, 43.1, 8.5, 9.6),
  island(Island::Sardinia, 38.8, 41.3, 8.1, 9.9),
  island(Island::Madagascar, -25.7, -11.9, 43.2, 50.5),
  island(Island::SriLanka, 5.9, 9.9, 79.6, 82.0),
  island(Island::Japan, 30.9, 34.7, 129.6, 132.2),
  island(Island::Japan, 32.5, 41.6, 130.8, 142.2),
  island(Island::Japan, 41.3, 45.6, 139.3, 146.0),
  island(Island::Taiwan, 21.8, 25.4, 119.9, 122.1),
  island(Island::Borneo, -4.2, 7.1, 108.5, 119.3),
  island(Island::Philippines, 4.5, 21.2, 116.8, 127.0),
  island(Island::Sumatra, 1.0, 5.9, 95.0, 99.5),
  island(Island::Sumatra, -2.0, 1.0, 98.0, 104.0),
  island(Island::Sumatra, -6.0, -2.0, 100.0, 106.2),
  island(Island::Java, -8.8, -5.8, 105.0, 114.6),
  island(Island::Sulawesi, -5.6, 1.8, 119.3, 125.3),
  island(Island::NewGuinea, -9.5, -0.8, 130.8, 146.0),
  island(Island::NewGuinea, -10.7, -4.5, 146.0, 150.9),
  island(Island::SouthIsland, -47.4, -40.4, 166.3, 174.5),
  island(Island::NorthIsland, -41.7, -34.3, 172.5, 178.7),
  island(Island::Tasmania, -43.7, -39.5, 143.5, 148.5),
  (Region::Oceania, BBox::new(-48.0, -10.0, 110.0, 180.0)),
  (Region::Africa, BBox::new(35.0, 37.5, -10.0, 11.5)),
  (Region::Europe, BBox::new(35.0, 72.0, -25.0, 40.0)),
  (Region::MiddleEast, BBox::new(12.0, 42.0, 34.0, 63.0)),
  (Region::Africa, BBox::new(-35.0, 35.0, -18.0, 52.0)),
  (Region::Asia, BBox::new(-11.0, 78.0, 40.0, 180.0)),
  (Region::NorthAmerica, BBox::new(15.0, 72.0, -170.0, -50.0)),
  (Region::CentralAmerica, BBox::new(7.0, 15.0, -92.0, -77.0)),
  (Region::SouthAmerica, BBox::new(-56.0, 13.0, -82.0, -34.0)),
];

pub fn classify(c: Coord) -> Region {
  REGION_BOXES.iter()
    .find(|(_, bbox)| bbox.contains(c))
    .map(|(region, _)| *region)
    .unwrap_or(Region::Open)
}

pub fn same_landmass(a: Coord, b: Coord) -> bool {
  match (classify(a).landmass(), classify(b).landmass()) {
    (Some(la), Some(lb)) => la == lb,
    _ => false
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const LONDON: Coord = Coord::new(51.5074, -0.1278);
  const PARIS: Coord = Coord::new(48.8566, 2.3522);
  const NEW_YORK: Coord = Coord::new(40.7128, -74.0060);

  #[test]
  fn haversine_matches_known_distances() {
    let d = haversine_km(LONDON, PARIS);
    assert!((d - 343.5).abs() < 3.0, "london-paris was {d}");

    let d = haversine_km(LONDON, NEW_YORK);
    assert!((d - 5570.0).abs() < 20.0, "london-new york was {d}");

    assert_eq!(haversine_km(PARIS, PARIS), 0.0);
  }

  #[test]
  fn haversine_is_symmetric() {
    let ab = haversine_km(LONDON, NEW_YORK);
    let ba = haversine_km(NEW_YORK, LONDON);
    assert!((ab - ba).abs() < 1e-9);
  }

  #[test]
  fn classifies_major_cities() {
    assert_eq!(classify(LONDON), Region::Europe);
    assert_eq!(classify(NEW_YORK), Region::NorthAmerica);
    assert_eq!(classify(Coord::new(31.23, 121.47)), Region::Asia);
    assert_eq!(classify(Coord::new(-33.86, 151.21)), Region::Oceania);
    assert_eq!(classify(Coord::new(25.20, 55.27)), Region::MiddleEast);
    assert_eq!(classify(Coord::new(30.04, 31.24)), Region::Africa);
    assert_eq!(classify(Coord::new(-23.55, -46.63)), Region::SouthAmerica);
    assert_eq!(classify(Coord::new(8.98, -79.52)), Region::CentralAmerica);
    assert_eq!(classify(Coord::new(36.75, 3.06)), Region::Africa);
  }

  #[test]
  fn mid_ocean_is_open_water() {
    assert_eq!(classify(Coord::new(30.0, -40.0)), Region::Open);
    assert_eq!(classify(Coord::new(-50.0, -120.0)), Region::Open);
    assert_eq!(Region::Open.landmass(), None);
  }

  #[test]
  fn landmass_groups_connected_regions() {
    assert!(same_landmass(LONDON, Coord::new(31.23, 121.47)));
    assert!(same_landmass(NEW_YORK, Coord::new(-23.55, -46.63)));
    assert!(!same_landmass(LONDON, NEW_YORK));
    assert!(!same_landmass(Coord::new(-33.86, 151.21), Coord::new(1.29, 103.85)));
  }

  #[test]
  fn islands_get_their_own_region() {
    assert_eq!(classify(Coord::new(21.31, -157.86)), Region::Island(Island::Hawaii));
    assert_eq!(classify(Coord::new(35.68, 139.69)), Region::Island(Island::Japan));
    assert_eq!(classify(Coord::new(-36.85, 174.76)), Region::Island(Island::NorthIsland));
    assert_eq!(classify(Coord::new(64.15, -21.94)), Region::Island(Island::Iceland));
    assert_eq!(classify(Coord::new(-18.88, 47.51)), Region::Island(Island::Madagascar));
    assert_eq!(classify(Coord::new(23.11, -82.37)), Region::Island(Island::Cuba));
    assert_eq!(Region::Island(Island::Hawaii).to_string(), "Hawaii");
  }

  #[test]
  fn island_boxes_leave_nearby_mainland_alone() {
    assert_eq!(classify(Coord::new(25.76, -80.19)), Region::NorthAmerica);
    assert_eq!(classify(Coord::new(35.10, 129.04)), Region::Asia);
    assert_eq!(classify(Coord::new(43.12, 131.89)), Region::Asia);
    assert_eq!(classify(Coord::new(1.29, 103.85)), Region::Asia);
    assert_eq!(classify(Coord::new(5.41, 100.33)), Region::Asia);
    assert_eq!(classify(Coord::new(-10.69, 142.53)), Region::Oceania);
    assert_eq!(classify(Coord::new(-37.81, 144.96)), Region::Oceania);
    assert_eq!(classify(Coord::new(55.86, -4.25)), Region::Europe);
    assert_eq!(classify(Coord::new(-25.97, 32.57)), Region::Africa);
  }

  #[test]
  fn water_separates_islands_from_the_mainland() {
    let tokyo = Coord::new(35.68, 139.69);
    assert!(same_landmass(tokyo, Coord::new(34.69, 135.50)));
    assert!(same_landmass(tokyo, Coord::new(43.06, 141.35)));
    assert!(!same_landmass(tokyo, Coord::new(31.23, 121.47)));
    assert!(!same_landmass(Coord::new(-33.86, 151.21), Coord::new(-36.85, 174.76)));
    assert!(!same_landmass(Coord::new(53.35, -6.26), LONDON));
  }

  #[test]
  fn archipelagos_have_no_land_at_all() {
    let nassau = Coord::new(25.05, -77.35);
    assert_eq!(classify(nassau), Region::Island(Island::Bahamas));
    assert_eq!(classify(nassau).landmass(), None);
    assert!(!same_landmass(nassau, nassau));
    assert_eq!(classify(Coord::new(14.60, 120.98)).landmass(), None);
  }
}
