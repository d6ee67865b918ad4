//! Closest-pair search over three cities.

use crate::distance::DistanceCalculator;
use crate::location::{City, LocationError};
use serde::Serialize;
use tracing::debug;

/// Pair enumeration order. Earlier pairs win ties.
const PAIRS: [(usize, usize); 3] = [(0, 1), (0, 2), (1, 2)];

/// The winning pair and the distance between them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosestPair {
    pub first: City,
    pub second: City,
    pub distance_km: f64,
}

/// Find the two closest of three cities.
///
/// Pairs whose distance is unavailable are skipped. Returns `Ok(None)` when
/// no pair could be measured.
pub fn closest_pair(cities: &[City; 3], calculator: &DistanceCalculator) -> Result<Option<ClosestPair>, LocationError> {
    let mut best: Option<(usize, usize, f64)> = None;

    for (i, j) in PAIRS {
        let Some(km) = calculator.calculate(&cities[i], &cities[j])? else {
            debug!(a = %cities[i], b = %cities[j], "pair skipped");
            continue;
        };
        if best.map_or(true, |(_, _, best_km)| km < best_km) {
            best = Some((i, j, km));
        }
    }

    Ok(best.map(|(i, j, distance_km)| ClosestPair {
        first: cities[i].clone(),
        second: cities[j].clone(),
        distance_km,
    }))
}
