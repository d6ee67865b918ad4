//! Core types for the location subsystem.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Build a coordinate, rejecting non-finite or out-of-range degrees.
    pub fn try_new(lat: f64, lon: f64) -> Result<Self, String> {
        if !(-90.0..=90.0).contains(&lat) {
            return Err(format!("latitude {} is outside [-90, 90]", lat));
        }
        if !(-180.0..=180.0).contains(&lon) {
            return Err(format!("longitude {} is outside [-180, 180]", lon));
        }
        Ok(Self { lat, lon })
    }

    /// Great-circle distance to `other` in kilometers.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        crate::distance::haversine(self.lat, self.lon, other.lat, other.lon)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        write!(f, "{:.4}\u{00B0}{}, {:.4}\u{00B0}{}", self.lat.abs(), ns, self.lon.abs(), ew)
    }
}

/// A city/country pair used purely as a lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct City {
    pub name: String,
    pub country: String,
}

impl City {
    pub fn new(name: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            country: country.into(),
        }
    }

    /// Case-insensitive comparison, ignoring surrounding whitespace on both sides.
    pub fn matches(&self, name: &str, country: &str) -> bool {
        fold(&self.name) == fold(name) && fold(&self.country) == fold(country)
    }
}

fn fold(s: &str) -> String {
    s.trim().to_lowercase()
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.name.trim(), self.country.trim())
    }
}

/// Parse "Mexico City, Mexico". The split happens on the last comma.
impl FromStr for City {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, country) = s
            .rsplit_once(',')
            .ok_or_else(|| LocationError::InvalidCity(s.to_string()))?;
        let (name, country) = (name.trim(), country.trim());
        if name.is_empty() || country.is_empty() {
            return Err(LocationError::InvalidCity(s.to_string()));
        }
        Ok(City::new(name, country))
    }
}

/// Which coordinate source backs the distance calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Dataset,
    Nominatim,
    Stub,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dataset => write!(f, "dataset"),
            Self::Nominatim => write!(f, "nominatim"),
            Self::Stub => write!(f, "stub"),
        }
    }
}

impl FromStr for Backend {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dataset" | "csv" | "1" => Ok(Self::Dataset),
            "nominatim" | "api" | "remote" | "2" => Ok(Self::Nominatim),
            "stub" | "mock" => Ok(Self::Stub),
            _ => Err(LocationError::UnknownBackend(s.trim().to_string())),
        }
    }
}

/// Location resolution errors.
///
/// A city that simply isn't known is not an error; resolvers return `Ok(None)`.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("cannot read dataset {}: {}", .path.display(), .source)]
    Dataset {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("malformed dataset record at line {line}: {reason}")]
    InvalidRecord { line: u64, reason: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
    #[error("expected \"City, Country\", got '{0}'")]
    InvalidCity(String),
    #[error("unknown backend '{0}' (expected dataset, nominatim or stub)")]
    UnknownBackend(String),
}
