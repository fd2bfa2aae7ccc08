#![forbid(unsafe_code)]

//! Error types.
//!
//! The drag logic itself is total; the only failures are configuration
//! problems and a host that hands over unusable container bounds.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SheetError>;

#[derive(Debug, Error)]
pub enum SheetError {
    /// Container bounds are empty or not finite. Usually means the host
    /// window did not exist yet when the sheet was built.
    #[error("invalid container bounds: {width}x{height}")]
    InvalidContainer { width: f64, height: f64 },

    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),
}
