//! Great-circle distance on a spherical Earth.
//!
//! Inputs are decimal degrees, all trigonometry happens in radians, output is km.

use crate::location::{City, CoordinateResolver, LocationError};
use tracing::debug;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two points, in kilometers.
pub fn haversine(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    // Rounding can push `a` just past 1 for near-antipodal points.
    let a = ((d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Resolves two cities and measures the distance between them.
pub struct DistanceCalculator {
    resolver: Box<dyn CoordinateResolver>,
}

impl DistanceCalculator {
    pub fn new(resolver: Box<dyn CoordinateResolver>) -> Self {
        Self { resolver }
    }

    pub fn from_resolver(resolver: impl CoordinateResolver + 'static) -> Self {
        Self::new(Box::new(resolver))
    }

    /// Distance in km, or `None` when either city could not be resolved.
    pub fn calculate(&self, a: &City, b: &City) -> Result<Option<f64>, LocationError> {
        let from = self.resolver.resolve(a)?;
        let to = self.resolver.resolve(b)?;

        let (Some(from), Some(to)) = (from, to) else {
            debug!(%a, %b, "distance unavailable: unresolved city");
            return Ok(None);
        };

        let km = from.distance_to(&to);
        debug!(%a, %b, km, "distance computed");
        Ok(Some(km))
    }
}
