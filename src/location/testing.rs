//! In-memory resolvers shared by unit tests.

use super::resolver::CoordinateResolver;
use super::types::{City, Coordinate, LocationError};
use std::collections::HashMap;

/// Resolves by city name only, from a fixed table.
pub struct TableResolver {
    entries: HashMap<String, Coordinate>,
}

impl TableResolver {
    pub fn new(entries: &[(&str, f64, f64)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(name, lat, lon)| (name.to_lowercase(), Coordinate::new(*lat, *lon)))
                .collect(),
        }
    }
}

impl CoordinateResolver for TableResolver {
    fn resolve(&self, city: &City) -> Result<Option<Coordinate>, LocationError> {
        Ok(self.entries.get(&city.name.trim().to_lowercase()).copied())
    }

    fn name(&self) -> &'static str {
        "table"
    }
}

pub struct FailingResolver;

impl CoordinateResolver for FailingResolver {
    fn resolve(&self, _city: &City) -> Result<Option<Coordinate>, LocationError> {
        Err(LocationError::Network("unreachable".into()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
