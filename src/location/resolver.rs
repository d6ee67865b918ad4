//! The coordinate-lookup seam and backend selection.

use super::providers::{DatasetResolver, NominatimResolver, StubResolver};
use super::types::{Backend, City, Coordinate, LocationError};
use crate::config::Config;
use tracing::info;

/// Anything that can turn a city/country pair into coordinates.
///
/// `Ok(None)` means the city is unknown to this source. `Err` is reserved for
/// failures of the source itself (unreadable dataset, unreachable geocoder).
pub trait CoordinateResolver {
    fn resolve(&self, city: &City) -> Result<Option<Coordinate>, LocationError>;

    /// Short backend label for logs and banners.
    fn name(&self) -> &'static str;
}

impl<R: CoordinateResolver + ?Sized> CoordinateResolver for Box<R> {
    fn resolve(&self, city: &City) -> Result<Option<Coordinate>, LocationError> {
        (**self).resolve(city)
    }

    fn name(&self) -> &'static str {
        (**self).name()
    }
}

/// Build the resolver for `backend` from the loaded configuration.
pub fn build_resolver(backend: Backend, config: &Config) -> Box<dyn CoordinateResolver> {
    let resolver: Box<dyn CoordinateResolver> = match backend {
        Backend::Dataset => Box::new(DatasetResolver::new(config.dataset_path.clone())),
        Backend::Nominatim => Box::new(NominatimResolver::new(&config.endpoint, &config.user_agent)),
        Backend::Stub => Box::new(StubResolver),
    };
    info!(backend = resolver.name(), "coordinate resolver ready");
    resolver
}
