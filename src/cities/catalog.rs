//! City reference data and the validated catalog built from it

use anyhow::{Context, Result};
use bevy::prelude::*;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::zone::{ZoneError, parse_zone};

/// A city as shipped in the catalog. Never mutated after load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct City {
    pub id: String,
    pub name: String,
    pub country: String,
    /// IANA timezone name, e.g. `Asia/Tokyo`
    pub timezone: String,
    /// `[longitude, latitude]` in degrees. Note the order.
    pub coordinates: [f64; 2],
    pub description: String,
    /// Shown in order
    pub trivia: Vec<String>,
}

impl City {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    Empty,
    DuplicateId(String),
    UnknownZone { city: String, source: ZoneError },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "city catalog is empty"),
            CatalogError::DuplicateId(id) => write!(f, "duplicate city id {:?}", id),
            CatalogError::UnknownZone { city, source } => {
                write!(f, "city {:?}: {}", city, source)
            }
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::UnknownZone { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Ordered list of cities with their parsed timezones.
///
/// Indices into the catalog are stable for the lifetime of the app and are
/// what the rest of the app uses to refer to a city.
#[derive(Resource, Debug, Clone)]
pub struct CityCatalog {
    cities: Vec<City>,
    zones: Vec<Tz>,
}

impl CityCatalog {
    pub fn new(cities: Vec<City>) -> Result<Self, CatalogError> {
        if cities.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        let mut zones = Vec::with_capacity(cities.len());
        for city in &cities {
            if !seen.insert(city.id.as_str()) {
                return Err(CatalogError::DuplicateId(city.id.clone()));
            }
            let zone = parse_zone(&city.timezone).map_err(|source| CatalogError::UnknownZone {
                city: city.id.clone(),
                source,
            })?;
            zones.push(zone);
        }

        Ok(Self { cities, zones })
    }

    pub fn builtin() -> Result<Self, CatalogError> {
        Self::new(super::data::builtin_cities())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let cities: Vec<City> = serde_json::from_str(json).context("parsing city list")?;
        Ok(Self::new(cities)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::from_json(&contents).with_context(|| format!("loading {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    pub fn zone(&self, index: usize) -> Option<Tz> {
        self.zones.get(index).copied()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.cities.iter().position(|c| c.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &City, Tz)> {
        self.cities
            .iter()
            .zip(self.zones.iter().copied())
            .enumerate()
            .map(|(i, (city, zone))| (i, city, zone))
    }

    /// Index after `index`, wrapping around.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.cities.len()
    }

    /// Index before `index`, wrapping around.
    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.cities.len() - 1) % self.cities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: &str, timezone: &str) -> City {
        City {
            id: id.to_string(),
            name: id.to_string(),
            country: "Nowhere".to_string(),
            timezone: timezone.to_string(),
            coordinates: [0.0, 0.0],
            description: String::new(),
            trivia: vec![],
        }
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let catalog = CityCatalog::builtin().unwrap();
        assert_eq!(catalog.len(), 6);
        assert_eq!(catalog.get(0).unwrap().id, "tokyo");
        assert_eq!(catalog.zone(0), Some(chrono_tz::Asia::Tokyo));
    }

    #[test]
    fn test_coordinates_are_longitude_first() {
        let catalog = CityCatalog::builtin().unwrap();
        let tokyo = catalog.get(catalog.position("tokyo").unwrap()).unwrap();
        assert_eq!(tokyo.longitude(), 139.6917);
        assert_eq!(tokyo.latitude(), 35.6895);
    }

    #[test]
    fn test_rejects_empty() {
        assert_eq!(CityCatalog::new(vec![]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let err = CityCatalog::new(vec![city("a", "UTC"), city("a", "Europe/Paris")]).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateId("a".to_string()));
    }

    #[test]
    fn test_rejects_unknown_zone() {
        let err = CityCatalog::new(vec![city("x", "Not/AZone")]).unwrap_err();
        match err {
            CatalogError::UnknownZone { city, source } => {
                assert_eq!(city, "x");
                assert_eq!(source.name, "Not/AZone");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_from_json() {
        let json = r#"[{
            "id": "oslo",
            "name": "Oslo",
            "country": "Norway",
            "timezone": "Europe/Oslo",
            "coordinates": [10.7522, 59.9139],
            "description": "Capital of Norway.",
            "trivia": ["first", "second"]
        }]"#;
        let catalog = CityCatalog::from_json(json).unwrap();
        let oslo = catalog.get(0).unwrap();
        assert_eq!(oslo.trivia, vec!["first", "second"]);
        assert_eq!(oslo.latitude(), 59.9139);
    }

    #[test]
    fn test_from_json_reports_bad_zone() {
        let json = r#"[{"id":"a","name":"A","country":"B","timezone":"Bad/Zone",
            "coordinates":[0,0],"description":"","trivia":[]}]"#;
        let err = CityCatalog::from_json(json).unwrap_err();
        assert!(format!("{err:#}").contains("Bad/Zone"));
    }

    #[test]
    fn test_index_wrapping() {
        let catalog = CityCatalog::new(vec![city("a", "UTC"), city("b", "UTC"), city("c", "UTC")])
            .unwrap();
        assert_eq!(catalog.next_index(2), 0);
        assert_eq!(catalog.previous_index(0), 2);
        assert_eq!(catalog.position("b"), Some(1));
        assert_eq!(catalog.iter().count(), 3);
    }
}
