//! Location subsystem for citydist.
//!
//! Turns city/country names into coordinates through one of three
//! interchangeable sources: a CSV dataset, Nominatim, or a fixed stub.

pub mod providers;
pub mod resolver;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use providers::{parse_search_response, DatasetResolver, NominatimResolver, StubResolver, NOMINATIM_ENDPOINT};
pub use resolver::{build_resolver, CoordinateResolver};
pub use types::{Backend, City, Coordinate, LocationError};
