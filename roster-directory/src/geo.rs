//! City distribution for the map view.

use rand::Rng;
use serde::Serialize;

use crate::types::EmployeeRecord;

/// Label used for records without a city.
pub const UNKNOWN_CITY: &str = "Unknown";

/// Centre of the jitter box used for cities missing from the lookup table.
const FALLBACK_CENTER: Coordinates = Coordinates { lat: 37.0, lon: -95.0 };
const LAT_SPREAD: f64 = 10.0;
const LON_SPREAD: f64 = 20.0;

const CITY_COORDS: [(&str, f64, f64); 20] = [
    ("New York", 40.7128, -74.006),
    ("Los Angeles", 34.0522, -118.2437),
    ("Chicago", 41.8781, -87.6298),
    ("Houston", 29.7604, -95.3698),
    ("Phoenix", 33.4484, -112.074),
    ("Philadelphia", 39.9526, -75.1652),
    ("San Antonio", 29.4241, -98.4936),
    ("San Diego", 32.7157, -117.1611),
    ("Dallas", 32.7767, -96.797),
    ("San Jose", 37.3382, -121.8863),
    ("San Francisco", 37.7749, -122.4194),
    ("Seattle", 47.6062, -122.3321),
    ("Austin", 30.2672, -97.7431),
    ("Miami", 25.7617, -80.1918),
    ("Denver", 39.7392, -104.9903),
    ("Boston", 42.3601, -71.0589),
    ("Portland", 45.5152, -122.6784),
    ("Atlanta", 33.749, -84.388),
    ("Las Vegas", 36.1699, -115.1398),
    ("Minneapolis", 44.9778, -93.265),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Known coordinates for a city name (exact match).
pub fn lookup_city(city: &str) -> Option<Coordinates> {
    CITY_COORDS
        .iter()
        .find(|(name, _, _)| *name == city)
        .map(|(_, lat, lon)| Coordinates { lat: *lat, lon: *lon })
}

/// Employees grouped under one map marker.
#[derive(Debug, Clone, Serialize)]
pub struct CityLocation {
    pub city: String,
    pub employees: Vec<EmployeeRecord>,
    pub coords: Coordinates,
    /// True when `coords` were jittered rather than looked up
    pub approximate: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DistributionStats {
    pub cities: usize,
    pub employees: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct CityDistribution {
    pub locations: Vec<CityLocation>,
    pub stats: DistributionStats,
}

/// Group records by city in first-appearance order and place each group.
pub fn city_distribution<R: Rng + ?Sized>(records: &[EmployeeRecord], rng: &mut R) -> CityDistribution {
    let mut locations: Vec<CityLocation> = Vec::new();

    for record in records {
        let city = record.city.as_deref().unwrap_or(UNKNOWN_CITY);
        match locations.iter_mut().find(|loc| loc.city == city) {
            Some(location) => location.employees.push(record.clone()),
            None => {
                let (coords, approximate) = match lookup_city(city) {
                    Some(coords) => (coords, false),
                    None => (jitter(rng), true),
                };
                locations.push(CityLocation {
                    city: city.to_string(),
                    employees: vec![record.clone()],
                    coords,
                    approximate,
                });
            }
        }
    }

    let stats = DistributionStats {
        cities: locations.len(),
        employees: records.len(),
    };

    CityDistribution { locations, stats }
}

fn jitter<R: Rng + ?Sized>(rng: &mut R) -> Coordinates {
    Coordinates {
        lat: FALLBACK_CENTER.lat + (rng.gen::<f64>() - 0.5) * LAT_SPREAD,
        lon: FALLBACK_CENTER.lon + (rng.gen::<f64>() - 0.5) * LON_SPREAD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fallback_employees, normalize_rows, RawTableRow};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_fallback_cities_are_all_known() {
        let mut rng = StdRng::seed_from_u64(7);
        let dist = city_distribution(&fallback_employees(), &mut rng);

        assert_eq!(dist.stats, DistributionStats { cities: 12, employees: 12 });
        assert!(dist.locations.iter().all(|loc| !loc.approximate));
        assert_eq!(dist.locations[0].city, "New York");
        assert_eq!(dist.locations[0].coords, Coordinates { lat: 40.7128, lon: -74.006 });
    }

    #[test]
    fn test_groups_preserve_first_appearance() {
        let rows = vec![
            RawTableRow::from_strs(&["A", "x", "Boston"]),
            RawTableRow::from_strs(&["B", "x", "Miami"]),
            RawTableRow::from_strs(&["C", "x", "Boston"]),
            RawTableRow::from_strs(&["D", "x"]),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let dist = city_distribution(&normalize_rows(&rows), &mut rng);

        let cities: Vec<_> = dist.locations.iter().map(|l| l.city.as_str()).collect();
        assert_eq!(cities, vec!["Boston", "Miami", UNKNOWN_CITY]);
        assert_eq!(dist.locations[0].employees.len(), 2);
        assert_eq!(dist.stats, DistributionStats { cities: 3, employees: 4 });
    }

    #[test]
    fn test_unknown_city_is_jittered_within_box() {
        let rows = vec![RawTableRow::from_strs(&["A", "x", "Atlantis"])];
        let mut rng = StdRng::seed_from_u64(42);
        let dist = city_distribution(&normalize_rows(&rows), &mut rng);

        let loc = &dist.locations[0];
        assert!(loc.approximate);
        assert!((loc.coords.lat - 37.0).abs() <= LAT_SPREAD / 2.0);
        assert!((loc.coords.lon + 95.0).abs() <= LON_SPREAD / 2.0);
    }
}
