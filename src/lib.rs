//! citydist: great-circle distances between named cities.
//!
//! City names are resolved to coordinates by a [`location::CoordinateResolver`]
//! (CSV dataset, Nominatim, or a fixed stub), measured with the haversine
//! formula, and optionally ranked to find the closest of three.

pub mod config;
pub mod distance;
pub mod location;
pub mod prompt;
pub mod report;
pub mod search;

pub use distance::{haversine, DistanceCalculator, EARTH_RADIUS_KM};
pub use search::{closest_pair, ClosestPair};
