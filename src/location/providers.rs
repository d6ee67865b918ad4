//! Coordinate providers: CSV dataset, OpenStreetMap Nominatim, and a fixed stub.

use super::resolver::CoordinateResolver;
use super::types::{City, Coordinate, LocationError};
use serde::Deserialize;
use std::path::PathBuf;
use tracing::{debug, warn};

// ─── CSV dataset ────────────────────────────────────────────────

/// Looks cities up in a `city,country,lat,lng` CSV file.
///
/// The file is opened on every call and released when the call returns.
#[derive(Debug, Clone)]
pub struct DatasetResolver {
    path: PathBuf,
}

struct Columns {
    city: usize,
    country: usize,
    lat: usize,
    lng: usize,
}

impl DatasetResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn dataset_error(&self, source: csv::Error) -> LocationError {
        LocationError::Dataset {
            path: self.path.clone(),
            source,
        }
    }

    fn columns(&self, headers: &csv::StringRecord) -> Result<Columns, LocationError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or_else(|| LocationError::InvalidRecord {
                    line: 1,
                    reason: format!("missing '{}' column in header", name),
                })
        };
        Ok(Columns {
            city: find("city")?,
            country: find("country")?,
            lat: find("lat")?,
            lng: find("lng")?,
        })
    }
}

fn parse_degrees(field: Option<&str>, column: &str, line: u64) -> Result<f64, LocationError> {
    let raw = field.unwrap_or_default();
    raw.parse().map_err(|_| LocationError::InvalidRecord {
        line,
        reason: format!("{} '{}' is not a number", column, raw),
    })
}

impl CoordinateResolver for DatasetResolver {
    fn resolve(&self, city: &City) -> Result<Option<Coordinate>, LocationError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(&self.path)
            .map_err(|e| self.dataset_error(e))?;

        let headers = reader.headers().map_err(|e| self.dataset_error(e))?.clone();
        let cols = self.columns(&headers)?;

        for record in reader.records() {
            let record = record.map_err(|e| self.dataset_error(e))?;
            let (Some(name), Some(country)) = (record.get(cols.city), record.get(cols.country)) else {
                continue;
            };
            if !city.matches(name, country) {
                continue;
            }

            let line = record.position().map(|p| p.line()).unwrap_or_default();
            let lat = parse_degrees(record.get(cols.lat), "lat", line)?;
            let lon = parse_degrees(record.get(cols.lng), "lng", line)?;
            let coord = Coordinate::try_new(lat, lon).map_err(|reason| LocationError::InvalidRecord { line, reason })?;
            debug!(%city, line, lat, lon, "dataset hit");
            return Ok(Some(coord));
        }

        debug!(%city, path = %self.path.display(), "dataset miss");
        Ok(None)
    }

    fn name(&self) -> &'static str {
        "dataset"
    }
}

// ─── Nominatim provider ─────────────────────────────────────────

pub const NOMINATIM_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";

/// Latitude/longitude as Nominatim sends them: usually strings, sometimes numbers.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum Degrees {
    Number(f64),
    Text(String),
}

impl Degrees {
    fn value(&self) -> Result<f64, LocationError> {
        match self {
            Self::Number(v) => Ok(*v),
            Self::Text(s) => s
                .trim()
                .parse()
                .map_err(|_| LocationError::InvalidResponse(format!("'{}' is not a coordinate", s))),
        }
    }
}

#[derive(Deserialize, Debug, Clone)]
struct SearchHit {
    lat: Degrees,
    lon: Degrees,
}

/// Extract the first coordinate from a Nominatim `format=json` search body.
pub fn parse_search_response(body: &str) -> Result<Option<Coordinate>, LocationError> {
    let results: Vec<serde_json::Value> =
        serde_json::from_str(body).map_err(|e| LocationError::InvalidResponse(e.to_string()))?;

    let Some(first) = results.into_iter().next() else {
        return Ok(None);
    };

    let hit: SearchHit =
        serde_json::from_value(first).map_err(|e| LocationError::InvalidResponse(e.to_string()))?;
    Coordinate::try_new(hit.lat.value()?, hit.lon.value()?)
        .map(Some)
        .map_err(LocationError::InvalidResponse)
}

/// Resolves cities through an OpenStreetMap Nominatim search endpoint.
///
/// One blocking request per lookup; no timeout, no retry.
#[derive(Debug, Clone)]
pub struct NominatimResolver {
    endpoint: String,
    user_agent: String,
}

impl NominatimResolver {
    pub fn new(endpoint: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl CoordinateResolver for NominatimResolver {
    fn resolve(&self, city: &City) -> Result<Option<Coordinate>, LocationError> {
        let query = format!("{},{}", city.name.trim(), city.country.trim());
        debug!(endpoint = %self.endpoint, %query, "nominatim request");

        let response = match ureq::get(&self.endpoint)
            .query("q", &query)
            .query("format", "json")
            .set("User-Agent", &self.user_agent)
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, _)) => {
                warn!(%city, status = code, "geocoder returned non-success status");
                return Ok(None);
            }
            Err(e) => return Err(LocationError::Network(e.to_string())),
        };

        if !(200..300).contains(&response.status()) {
            warn!(%city, status = response.status(), "geocoder returned non-success status");
            return Ok(None);
        }

        let body = response
            .into_string()
            .map_err(|e| LocationError::Network(e.to_string()))?;
        let coord = parse_search_response(&body)?;
        debug!(%city, hit = coord.is_some(), "nominatim response");
        Ok(coord)
    }

    fn name(&self) -> &'static str {
        "nominatim"
    }
}

// ─── Stub ───────────────────────────────────────────────────────

/// Always answers with the placeholder coordinate (0, 0). For offline testing only.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubResolver;

impl StubResolver {
    pub const PLACEHOLDER: Coordinate = Coordinate::new(0.0, 0.0);
}

impl CoordinateResolver for StubResolver {
    fn resolve(&self, city: &City) -> Result<Option<Coordinate>, LocationError> {
        debug!(%city, "stub lookup");
        Ok(Some(Self::PLACEHOLDER))
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
