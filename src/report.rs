//! User-facing result lines and their JSON form.

use crate::location::City;
use crate::search::ClosestPair;
use serde::Serialize;

/// JSON shape of a single pairwise result.
#[derive(Debug, Serialize)]
pub struct DistanceReport<'a> {
    pub from: &'a City,
    pub to: &'a City,
    pub distance_km: f64,
}

pub const UNRESOLVED_MESSAGE: &str = "Could not obtain coordinates for one or more cities.";

pub fn distance_line(a: &City, b: &City, km: f64) -> String {
    format!("Distance between {} and {}: {:.2} km", a, b, km)
}

pub fn closest_line(pair: &ClosestPair) -> String {
    format!(
        "The closest cities are {} and {} with a distance of {:.2} km.",
        pair.first, pair.second, pair.distance_km
    )
}

pub fn distance_json(a: &City, b: &City, km: f64) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&DistanceReport {
        from: a,
        to: b,
        distance_km: km,
    })
}

pub fn closest_json(pair: &ClosestPair) -> serde_json::Result<String> {
    serde_json::to_string_pretty(pair)
}
