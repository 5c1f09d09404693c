//! Static city → coordinate table used to place regional performance on a map.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Fallback for region names missing from the table.
    pub const ORIGIN: Coordinates = Coordinates { lat: 0.0, lng: 0.0 };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Exact-match lookup from region name to coordinates.
///
/// Names are matched verbatim (case and whitespace included). A missing entry
/// is not an error: [`CityCoordinates::resolve`] returns [`Coordinates::ORIGIN`].
#[derive(Debug, Clone, Default)]
pub struct CityCoordinates {
    cities: HashMap<String, Coordinates>,
}

impl CityCoordinates {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Gulf cities the regional dashboard ships with.
    pub fn gulf_defaults() -> Self {
        let mut table = Self::new();
        for (name, lat, lng) in [
            ("Abu Dhabi", 24.4539, 54.3773),
            ("Dubai", 25.276987, 55.296249),
            ("Sharjah", 25.357964, 55.3913),
            ("Riyadh", 24.7136, 46.6753),
            ("Doha", 25.2854, 51.531),
            ("Kuwait City", 29.3759, 47.9774),
            ("Manama", 26.2235, 50.5876),
        ] {
            table.insert(name, Coordinates::new(lat, lng));
        }
        table
    }

    pub fn with_city(mut self, name: impl Into<String>, coords: Coordinates) -> Self {
        self.insert(name, coords);
        self
    }

    /// Add or replace a city.
    pub fn insert(&mut self, name: impl Into<String>, coords: Coordinates) {
        self.cities.insert(name.into(), coords);
    }

    pub fn extend<I, S>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (S, Coordinates)>,
        S: Into<String>,
    {
        for (name, coords) in entries {
            self.insert(name, coords);
        }
    }

    pub fn lookup(&self, region: &str) -> Option<Coordinates> {
        self.cities.get(region).copied()
    }

    /// Coordinates for `region`, or `(0, 0)` when the city is unknown.
    pub fn resolve(&self, region: &str) -> Coordinates {
        self.lookup(region).unwrap_or(Coordinates::ORIGIN)
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_contain_gulf_cities() {
        let table = CityCoordinates::gulf_defaults();
        assert_eq!(table.len(), 7);
        assert_eq!(table.lookup("Doha"), Some(Coordinates::new(25.2854, 51.531)));
    }

    #[test]
    fn test_unknown_city_resolves_to_origin() {
        let table = CityCoordinates::gulf_defaults();
        assert_eq!(table.resolve("Muscat"), Coordinates::ORIGIN);
        // Lookup is exact; no case folding.
        assert_eq!(table.resolve("dubai"), Coordinates::ORIGIN);
    }

    #[test]
    fn test_extend_overrides_existing_entry() {
        let mut table = CityCoordinates::gulf_defaults();
        table.extend([
            ("Muscat", Coordinates::new(23.588, 58.3829)),
            ("Dubai", Coordinates::new(25.2, 55.3)),
        ]);
        assert_eq!(table.len(), 8);
        assert_eq!(table.resolve("Muscat"), Coordinates::new(23.588, 58.3829));
        assert_eq!(table.resolve("Dubai"), Coordinates::new(25.2, 55.3));
    }
}
