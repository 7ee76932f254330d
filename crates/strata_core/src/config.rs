//! # Arena Configuration
//!
//! Sizing and failure policy for an arena. Loaded once at startup, either
//! built in code or read from a TOML file:
//!
//! ```toml
//! region_capacity = 400
//! on_alloc_failure = "panic"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ArenaError, ArenaResult};

/// Minimum region capacity used when none is configured (8 KiB).
pub const DEFAULT_REGION_CAPACITY: usize = 8 * 1024;

/// What an arena does when the region allocator cannot provide a region.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocFailurePolicy {
    /// Return [`ArenaError::OutOfMemory`] to the caller.
    #[default]
    ReturnError,
    /// Panic at the failing call site.
    Panic,
}

/// Configuration of a single arena.
///
/// The zero value (`ArenaConfig::default()`) is always valid: it means
/// "default region capacity, report failures as errors".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ArenaConfig {
    /// Minimum capacity of newly created regions in bytes. Zero selects
    /// [`DEFAULT_REGION_CAPACITY`].
    pub region_capacity: usize,
    /// Behaviour when a region cannot be acquired.
    pub on_alloc_failure: AllocFailurePolicy,
}

impl ArenaConfig {
    /// Creates a configuration with the given minimum region capacity.
    #[inline]
    #[must_use]
    pub const fn with_region_capacity(region_capacity: usize) -> Self {
        Self {
            region_capacity,
            on_alloc_failure: AllocFailurePolicy::ReturnError,
        }
    }

    /// Returns a copy of this configuration with a different failure policy.
    #[inline]
    #[must_use]
    pub const fn on_alloc_failure(mut self, policy: AllocFailurePolicy) -> Self {
        self.on_alloc_failure = policy;
        self
    }

    /// The minimum capacity new regions are created with.
    #[inline]
    #[must_use]
    pub const fn min_region_capacity(&self) -> usize {
        if self.region_capacity == 0 {
            DEFAULT_REGION_CAPACITY
        } else {
            self.region_capacity
        }
    }

    /// Parses a configuration from TOML text.
    ///
    /// Missing keys take their default values.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the text is not valid TOML or
    /// contains unknown keys or values.
    pub fn from_toml_str(text: &str) -> ArenaResult<Self> {
        toml::from_str(text).map_err(|e| ArenaError::InvalidConfig(e.to_string()))
    }

    /// Reads and parses a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if the file cannot be read or
    /// does not parse.
    pub fn from_toml_file(path: impl AsRef<Path>) -> ArenaResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ArenaError::InvalidConfig(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Serializes the configuration to TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ArenaError::InvalidConfig`] if serialization fails.
    pub fn to_toml_string(&self) -> ArenaResult<String> {
        toml::to_string(self).map_err(|e| ArenaError::InvalidConfig(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_capacity_uses_default() {
        assert_eq!(ArenaConfig::default().min_region_capacity(), DEFAULT_REGION_CAPACITY);
        assert_eq!(ArenaConfig::with_region_capacity(400).min_region_capacity(), 400);
    }

    #[test]
    fn test_parse_full_config() {
        let config = ArenaConfig::from_toml_str(
            "region_capacity = 400\non_alloc_failure = \"panic\"\n",
        )
        .unwrap();
        assert_eq!(config.region_capacity, 400);
        assert_eq!(config.on_alloc_failure, AllocFailurePolicy::Panic);
    }

    #[test]
    fn test_parse_empty_config_is_default() {
        let config = ArenaConfig::from_toml_str("").unwrap();
        assert_eq!(config, ArenaConfig::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let err = ArenaConfig::from_toml_str("region_size = 10\n").unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig(_)));
    }

    #[test]
    fn test_parse_rejects_unknown_policy() {
        let err = ArenaConfig::from_toml_str("on_alloc_failure = \"retry\"\n").unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = ArenaConfig::with_region_capacity(1024).on_alloc_failure(AllocFailurePolicy::Panic);
        let text = config.to_toml_string().unwrap();
        assert_eq!(ArenaConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("strata_config_does_not_exist.toml");
        let err = ArenaConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, ArenaError::InvalidConfig(_)));
    }
}
