//! Tracker configuration.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::fmt::{ACCURACY_DECIMALS, COORDINATE_DECIMALS, MAX_DECIMALS};
use crate::sample::{LocationOptions, DEFAULT_MAPS_BASE_URL};

/// Relative path the background worker script is served from.
pub const DEFAULT_WORKER_SCRIPT: &str = "./sw.js";

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrackerConfig {
    /// Used for both the one-shot request and the continuous subscription.
    #[cfg_attr(feature = "serde", serde(default))]
    pub location: LocationOptions,
    #[cfg_attr(feature = "serde", serde(default = "default_maps_base_url"))]
    pub maps_base_url: String,
    #[cfg_attr(feature = "serde", serde(default = "default_worker_script"))]
    pub worker_script: String,
    #[cfg_attr(feature = "serde", serde(default = "default_coordinate_decimals"))]
    pub coordinate_decimals: usize,
    #[cfg_attr(feature = "serde", serde(default = "default_accuracy_decimals"))]
    pub accuracy_decimals: usize,
}

fn default_maps_base_url() -> String {
    DEFAULT_MAPS_BASE_URL.to_string()
}

fn default_worker_script() -> String {
    DEFAULT_WORKER_SCRIPT.to_string()
}

fn default_coordinate_decimals() -> usize {
    COORDINATE_DECIMALS
}

fn default_accuracy_decimals() -> usize {
    ACCURACY_DECIMALS
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            location: LocationOptions::default(),
            maps_base_url: default_maps_base_url(),
            worker_script: default_worker_script(),
            coordinate_decimals: default_coordinate_decimals(),
            accuracy_decimals: default_accuracy_decimals(),
        }
    }
}

impl TrackerConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.maps_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("maps_base_url must not be empty"));
        }
        if self.worker_script.trim().is_empty() {
            return Err(ConfigError::Invalid("worker_script must not be empty"));
        }
        if self.coordinate_decimals > MAX_DECIMALS || self.accuracy_decimals > MAX_DECIMALS {
            return Err(ConfigError::Invalid("decimals must be <= 9"));
        }
        Ok(())
    }

    /// Parse a JSON override. Missing fields keep their defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: TrackerConfig = serde_json::from_str(raw)?;
        cfg.validate()?;
        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let cfg = TrackerConfig::default();
        assert_eq!(cfg.worker_script, "./sw.js");
        assert_eq!(cfg.maps_base_url, "https://www.google.com/maps");
        assert_eq!(cfg.coordinate_decimals, 6);
        assert_eq!(cfg.accuracy_decimals, 2);
        assert!(cfg.validate().is_ok());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg = TrackerConfig::from_json(r#"{ "location": { "timeout_ms": 5000 } }"#).unwrap();
        assert_eq!(cfg.location.timeout_ms, 5000);
        assert!(cfg.location.high_accuracy_preferred);
        assert_eq!(cfg.location.max_cached_age_ms, 0);
        assert_eq!(cfg.worker_script, DEFAULT_WORKER_SCRIPT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn rejects_bad_json_and_bad_values() {
        assert!(matches!(
            TrackerConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            TrackerConfig::from_json(r#"{ "worker_script": " " }"#),
            Err(ConfigError::Invalid(_))
        ));
    }
}
