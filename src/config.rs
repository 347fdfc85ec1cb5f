// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Clock configuration.
//!
//! ```toml
//! clock_mode = "twenty_four_hour"
//! tick_interval_ms = 864
//!
//! [location]
//! latitude = 40.4168
//! longitude = -3.7038
//! ```
//!
//! Every key is optional. Without a `[location]` table the clock starts in
//! civil-only mode until a location arrives.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::clock_time::ClockMode;
use crate::delta::GeoCoordinate;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// 12- or 24-hour rendering of hh:mm values.
    #[serde(default)]
    pub clock_mode: ClockMode,

    /// Engine tick period in milliseconds. One metric unit by default.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Fixed location, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<LocationConfig>,
}

/// A fixed observer position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub latitude: f64,
    pub longitude: f64,
}

const fn default_tick_interval_ms() -> u64 {
    864
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            clock_mode: ClockMode::default(),
            tick_interval_ms: default_tick_interval_ms(),
            location: None,
        }
    }
}

impl ClockConfig {
    /// Load and validate a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or a value is out of range.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] for a zero tick interval or a
    /// coordinate outside ±90° / ±180°.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        self.location()?;
        Ok(())
    }

    /// The configured location, validated.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the coordinate is out of range.
    pub fn location(&self) -> Result<Option<GeoCoordinate>, ConfigError> {
        self.location
            .map(|loc| {
                GeoCoordinate::new(loc.latitude, loc.longitude)
                    .map_err(|e| ConfigError::Validation(e.to_string()))
            })
            .transpose()
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading the configuration file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Value out of range.
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = ClockConfig::from_toml("").unwrap();
        assert_eq!(config, ClockConfig::default());
        assert_eq!(config.clock_mode, ClockMode::TwelveHour);
        assert_eq!(config.tick_interval(), Duration::from_millis(864));
        assert_eq!(config.location().unwrap(), None);
    }

    #[test]
    fn parses_full_config() {
        let config = ClockConfig::from_toml(
            r#"
            clock_mode = "twenty_four_hour"
            tick_interval_ms = 1000

            [location]
            latitude = 40.4168
            longitude = -3.7038
            "#,
        )
        .unwrap();
        assert_eq!(config.clock_mode, ClockMode::TwentyFourHour);
        assert_eq!(config.tick_interval_ms, 1_000);
        let loc = config.location().unwrap().unwrap();
        assert!((loc.longitude().value() + 3.7038).abs() < 1e-12);
    }

    #[test]
    fn rejects_bad_values() {
        let err = ClockConfig::from_toml("tick_interval_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let err = ClockConfig::from_toml("[location]\nlatitude = 95.0\nlongitude = 0.0")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)), "{err}");

        let err = ClockConfig::from_toml("clock_mode = \"sundial\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn toml_round_trip() {
        let config = ClockConfig {
            clock_mode: ClockMode::TwentyFourHour,
            tick_interval_ms: 500,
            location: Some(LocationConfig {
                latitude: 78.2,
                longitude: 15.6,
            }),
        };
        let text = config.to_toml().unwrap();
        assert_eq!(ClockConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = ClockConfig::from_file(Path::new("/nonexistent/soltime.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
