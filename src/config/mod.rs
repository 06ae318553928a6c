use crate::error::{HandlerMapError, Result};
use dashmap::DashMap;
use serde::Deserialize;
use std::env;
use std::sync::Arc;
use strum_macros::{Display, EnumString};

/// Comma separated module paths scanned for controllers.
pub const SCAN_ROOTS_KEY: &str = "HANDLERMAP_SCAN_ROOTS";
/// `overwrite` or `reject`.
pub const ON_CONFLICT_KEY: &str = "HANDLERMAP_ON_CONFLICT";

/// Configuration service
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    /// Service seeded from the process environment.
    pub fn from_env() -> Self {
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// What happens when two handlers claim the same (path, method) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum ConflictPolicy {
    /// The handler processed last wins; a warning is logged.
    #[default]
    Overwrite,
    /// Initialization fails with `DuplicateMapping`.
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub scan_roots: Vec<String>,
    pub on_conflict: ConflictPolicy,
}

impl MappingConfig {
    pub fn new(scan_roots: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            scan_roots: scan_roots.into_iter().map(Into::into).collect(),
            on_conflict: ConflictPolicy::default(),
        }
    }

    pub fn on_conflict(mut self, policy: ConflictPolicy) -> Self {
        self.on_conflict = policy;
        self
    }

    pub fn from_config(config: &ConfigService) -> Result<Self> {
        let scan_roots = config
            .get(SCAN_ROOTS_KEY)
            .map(|roots| {
                roots
                    .split(',')
                    .map(str::trim)
                    .filter(|root| !root.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let on_conflict = match config.get(ON_CONFLICT_KEY) {
            Some(value) => value.trim().parse().map_err(|_| {
                HandlerMapError::Config(format!("{} must be overwrite or reject, got {:?}", ON_CONFLICT_KEY, value))
            })?,
            None => ConflictPolicy::default(),
        };

        Ok(Self {
            scan_roots,
            on_conflict,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = MappingConfig::from_config(&ConfigService::default()).unwrap();
        assert!(config.scan_roots.is_empty());
        assert_eq!(config.on_conflict, ConflictPolicy::Overwrite);
    }

    #[test]
    fn test_reads_scan_roots_and_policy() {
        let service = ConfigService::default();
        service.set(SCAN_ROOTS_KEY, "app::web, app::admin ,,");
        service.set(ON_CONFLICT_KEY, "Reject");

        let config = MappingConfig::from_config(&service).unwrap();
        assert_eq!(config.scan_roots, vec!["app::web", "app::admin"]);
        assert_eq!(config.on_conflict, ConflictPolicy::Reject);
    }

    #[test]
    fn test_rejects_unknown_policy() {
        let service = ConfigService::default();
        service.set(ON_CONFLICT_KEY, "merge");
        let err = MappingConfig::from_config(&service).unwrap_err();
        assert!(matches!(err, HandlerMapError::Config(_)));
    }

    #[test]
    fn test_deserialize_from_json() {
        let config: MappingConfig =
            serde_json::from_str(r#"{ "scan_roots": ["app"], "on_conflict": "reject" }"#).unwrap();
        assert_eq!(config, MappingConfig::new(["app"]).on_conflict(ConflictPolicy::Reject));
    }
}
