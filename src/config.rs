//! Runtime configuration.
//!
//! Layers, lowest priority first: built-in defaults, `~/.citydist/config.json`,
//! `CITYDIST_*` environment variables. CLI flags are applied on top in `main`.

use crate::location::{Backend, LocationError, NOMINATIM_ENDPOINT};
use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Relative to the working directory; the sample ships here in the repository.
pub const DEFAULT_DATASET: &str = "data/worldcities.csv";
pub const DEFAULT_USER_AGENT: &str = concat!("citydist/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `None` means the operator picks interactively.
    pub backend: Option<Backend>,
    pub dataset_path: PathBuf,
    pub endpoint: String,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: None,
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            endpoint: NOMINATIM_ENDPOINT.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// On-disk shape of the config file. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    #[serde(deserialize_with = "backend_alias")]
    backend: Option<Backend>,
    dataset: Option<PathBuf>,
    endpoint: Option<String>,
    user_agent: Option<String>,
}

/// Accept the same spellings as `--backend` and `CITYDIST_BACKEND`.
fn backend_alias<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Backend>, D::Error> {
    Option::<String>::deserialize(deserializer)?
        .map(|raw| raw.parse().map_err(serde::de::Error::custom))
        .transpose()
}

impl Config {
    /// Load defaults, the user's config file and the process environment.
    pub fn load() -> Result<Self, LocationError> {
        let mut config = Self::default();
        if let Some(path) = Self::default_path() {
            config.apply_file(&path);
        }
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".citydist").join("config.json"))
    }

    /// Overlay settings from a JSON file. Missing or unparsable files are ignored.
    pub fn apply_file(&mut self, path: &Path) {
        let Ok(data) = fs::read_to_string(path) else {
            debug!(path = %path.display(), "no config file");
            return;
        };
        let file: FileConfig = match serde_json::from_str(&data) {
            Ok(file) => file,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                return;
            }
        };

        if file.backend.is_some() {
            self.backend = file.backend;
        }
        if let Some(dataset) = file.dataset {
            self.dataset_path = dataset;
        }
        if let Some(endpoint) = file.endpoint {
            self.endpoint = endpoint;
        }
        if let Some(user_agent) = file.user_agent {
            self.user_agent = user_agent;
        }
        debug!(path = %path.display(), "config file applied");
    }

    /// Overlay `CITYDIST_*` variables using the given lookup.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), LocationError> {
        if let Some(backend) = var("CITYDIST_BACKEND") {
            self.backend = Some(backend.parse()?);
        }
        if let Some(dataset) = var("CITYDIST_DATASET") {
            self.dataset_path = PathBuf::from(dataset);
        }
        if let Some(endpoint) = var("CITYDIST_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(user_agent) = var("CITYDIST_USER_AGENT") {
            self.user_agent = user_agent;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.backend, None);
        assert_eq!(cfg.dataset_path, PathBuf::from("data/worldcities.csv"));
        assert_eq!(cfg.endpoint, "https://nominatim.openstreetmap.org/search");
        assert!(cfg.user_agent.starts_with("citydist/"));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"backend":"dataset","dataset":"/data/cities.csv"}"#).unwrap();

        let mut cfg = Config::default();
        cfg.apply_file(&path);
        assert_eq!(cfg.backend, Some(Backend::Dataset));
        assert_eq!(cfg.dataset_path, PathBuf::from("/data/cities.csv"));
        assert_eq!(cfg.endpoint, NOMINATIM_ENDPOINT);
    }

    #[test]
    fn test_file_backend_aliases() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        for (alias, expected) in [("csv", Backend::Dataset), ("api", Backend::Nominatim), ("1", Backend::Dataset), ("Mock", Backend::Stub)] {
            fs::write(&path, format!(r#"{{"backend":"{}","endpoint":"http://file.example/search"}}"#, alias)).unwrap();
            let mut cfg = Config::default();
            cfg.apply_file(&path);
            assert_eq!(cfg.backend, Some(expected), "alias {}", alias);
            assert_eq!(cfg.endpoint, "http://file.example/search");
        }
    }

    #[test]
    fn test_file_unknown_backend_is_ignored() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"backend":"carrier-pigeon","dataset":"/data/cities.csv"}"#).unwrap();
        let mut cfg = Config::default();
        cfg.apply_file(&path);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_missing_or_broken_file_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.apply_file(&dir.path().join("absent.json"));
        assert_eq!(cfg, Config::default());

        let broken = dir.path().join("broken.json");
        fs::write(&broken, "{ not json").unwrap();
        cfg.apply_file(&broken);
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_env_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"backend":"dataset","endpoint":"http://file.example/search"}"#).unwrap();

        let mut cfg = Config::default();
        cfg.apply_file(&path);
        cfg.apply_env(env(&[("CITYDIST_BACKEND", "api"), ("CITYDIST_USER_AGENT", "tester/1.0")]))
            .unwrap();
        assert_eq!(cfg.backend, Some(Backend::Nominatim));
        assert_eq!(cfg.endpoint, "http://file.example/search");
        assert_eq!(cfg.user_agent, "tester/1.0");
    }

    #[test]
    fn test_env_invalid_backend() {
        let mut cfg = Config::default();
        let err = cfg.apply_env(env(&[("CITYDIST_BACKEND", "carrier-pigeon")])).unwrap_err();
        assert!(matches!(err, LocationError::UnknownBackend(_)));
    }
}
