#![forbid(unsafe_code)]

//! Tunable sheet parameters as data.
//!
//! [`SheetConfig`] groups the spring timing and gesture thresholds so hosts
//! can adjust feel without recompiling. With the `config` feature it loads
//! from TOML or JSON:
//!
//! ```toml
//! [spring]
//! damping_ratio = 0.7
//! initial_velocity = 10.0
//! duration_ms = 800
//!
//! [gesture]
//! drag_threshold = 4.0
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the values the controller uses when no config is
//! supplied, so `SheetConfig::default()` changes nothing.

use std::time::Duration;

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use dragsheet_core::animation::SpringTiming;
use dragsheet_core::gesture::GestureConfig;

use crate::error::ConfigError;

/// Top-level sheet configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SheetConfig {
    /// Settle animation timing.
    pub spring: SpringPolicy,

    /// Pan recognition thresholds.
    pub gesture: GesturePolicy,
}

/// Settle spring parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct SpringPolicy {
    /// Damping ratio; below 1.0 the sheet bounces slightly at the stop.
    pub damping_ratio: f64,
    /// Initial velocity in travel distances per second.
    pub initial_velocity: f64,
    /// Settle duration in milliseconds.
    pub duration_ms: u64,
}

impl Default for SpringPolicy {
    fn default() -> Self {
        let timing = SpringTiming::default();
        Self {
            damping_ratio: timing.damping_ratio,
            initial_velocity: timing.initial_velocity,
            duration_ms: timing.duration.as_millis() as u64,
        }
    }
}

/// Pan recognizer parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct GesturePolicy {
    /// Movement (points) before a press becomes a pan.
    pub drag_threshold: f64,
}

impl Default for GesturePolicy {
    fn default() -> Self {
        Self {
            drag_threshold: GestureConfig::default().drag_threshold,
        }
    }
}

impl SheetConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config")]
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Validate all parameters.
    ///
    /// Returns a list of problems; empty means valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.spring.damping_ratio.is_finite() && self.spring.damping_ratio > 0.0) {
            errors.push(format!(
                "spring.damping_ratio must be > 0, got {}",
                self.spring.damping_ratio
            ));
        }

        if !self.spring.initial_velocity.is_finite() {
            errors.push(format!(
                "spring.initial_velocity must be finite, got {}",
                self.spring.initial_velocity
            ));
        }

        if self.spring.duration_ms == 0 {
            errors.push("spring.duration_ms must be > 0".into());
        }

        if !(self.gesture.drag_threshold.is_finite() && self.gesture.drag_threshold >= 0.0) {
            errors.push(format!(
                "gesture.drag_threshold must be >= 0, got {}",
                self.gesture.drag_threshold
            ));
        }

        errors
    }

    /// `self` if valid, otherwise every problem found.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Invalid(errors))
        }
    }

    /// Build the settle [`SpringTiming`].
    #[must_use]
    pub fn to_spring_timing(&self) -> SpringTiming {
        SpringTiming {
            damping_ratio: self.spring.damping_ratio,
            initial_velocity: self.spring.initial_velocity,
            duration: Duration::from_millis(self.spring.duration_ms),
        }
    }

    /// Build the recognizer [`GestureConfig`].
    #[must_use]
    pub fn to_gesture_config(&self) -> GestureConfig {
        GestureConfig {
            drag_threshold: self.gesture.drag_threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_runtime_defaults() {
        let config = SheetConfig::default();
        assert_eq!(config.to_spring_timing(), SpringTiming::default());
        assert_eq!(config.to_gesture_config(), GestureConfig::default());
        assert!(config.validate().is_empty());
    }

    #[test]
    fn validate_reports_every_problem() {
        let config = SheetConfig {
            spring: SpringPolicy {
                damping_ratio: 0.0,
                initial_velocity: f64::NAN,
                duration_ms: 0,
            },
            gesture: GesturePolicy {
                drag_threshold: -1.0,
            },
        };
        let errors = config.validate();
        assert_eq!(errors.len(), 4, "{errors:?}");
        assert!(errors[0].starts_with("spring.damping_ratio"));
        assert!(errors[3].starts_with("gesture.drag_threshold"));
    }

    #[test]
    fn validated_wraps_errors() {
        let config = SheetConfig {
            spring: SpringPolicy {
                duration_ms: 0,
                ..SpringPolicy::default()
            },
            ..SheetConfig::default()
        };
        let err = config.validated().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(ref e) if e.len() == 1));
    }

    #[cfg(feature = "config")]
    mod loading {
        use super::*;

        #[test]
        fn partial_toml_keeps_defaults() {
            let config = SheetConfig::from_toml_str(
                r#"
                [spring]
                duration_ms = 450
                "#,
            )
            .expect("valid toml");
            assert_eq!(config.spring.duration_ms, 450);
            assert_eq!(config.spring.damping_ratio, 0.7);
            assert_eq!(config.gesture, GesturePolicy::default());
        }

        #[test]
        fn toml_round_trip() {
            let config = SheetConfig {
                gesture: GesturePolicy {
                    drag_threshold: 10.0,
                },
                ..SheetConfig::default()
            };
            let text = config.to_toml_string().expect("serialize");
            assert_eq!(SheetConfig::from_toml_str(&text).expect("parse"), config);
        }

        #[test]
        fn json_is_validated() {
            let err = SheetConfig::from_json_str(r#"{"spring": {"damping_ratio": -1.0}}"#)
                .unwrap_err();
            assert!(matches!(err, ConfigError::Invalid(_)));
        }

        #[test]
        fn malformed_toml_is_a_parse_error() {
            let err = SheetConfig::from_toml_str("[spring\nduration_ms = ").unwrap_err();
            assert!(matches!(err, ConfigError::Toml(_)));
        }

        #[test]
        fn toml_file_loads() {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("sheet.toml");
            std::fs::write(&path, "[gesture]\ndrag_threshold = 2.5\n").expect("write");
            let config = SheetConfig::from_toml_file(&path).expect("load");
            assert_eq!(config.gesture.drag_threshold, 2.5);
        }

        #[test]
        fn missing_file_is_io_error() {
            let err = SheetConfig::from_json_file("/nonexistent/dragsheet.json").unwrap_err();
            assert!(matches!(err, ConfigError::Io(_)));
        }
    }
}
