//! Configuration loading traits and types.
//!
//! This module provides a standardized way to load TOML configuration files
//! (hardware descriptions, bench settings) and the error type shared by
//! every configuration path, including the string-keyed hardware
//! parameters handed over by the control framework.
//!
//! # Usage
//!
//! ```rust,no_run
//! use robot24_common::config::{ConfigError, ConfigLoader};
//! use robot24_common::hal::types::HardwareInfo;
//! use std::path::Path;
//!
//! fn main() -> Result<(), ConfigError> {
//!     let info = HardwareInfo::load(Path::new("robot24.toml"))?;
//!     println!("Hardware: {} ({} joints)", info.name, info.joints.len());
//!     Ok(())
//! }
//! ```

use std::path::Path;
use thiserror::Error;

/// Error type for configuration loading operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Configuration file not found at specified path.
    #[error("Configuration file not found")]
    FileNotFound,

    /// TOML parsing failed.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A required hardware parameter is absent.
    #[error("Missing required hardware parameter '{0}'")]
    MissingParameter(String),

    /// A hardware parameter is present but cannot be used.
    #[error("Invalid value '{value}' for hardware parameter '{key}': {reason}")]
    InvalidParameter {
        /// Parameter key
        key: String,
        /// Raw value as supplied
        value: String,
        /// Why the value was rejected
        reason: String,
    },
}

/// Trait for loading configuration from TOML files.
///
/// # Contract
///
/// - Returns `ConfigError::FileNotFound` if the file does not exist
/// - Returns `ConfigError::ParseError` if TOML syntax is invalid or the
///   content does not match the target type
pub trait ConfigLoader: Sized + serde::de::DeserializeOwned {
    /// Load configuration from a TOML file.
    fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::FileNotFound
            } else {
                ConfigError::ParseError(e.to_string())
            }
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

// Blanket implementation for all types that implement DeserializeOwned.
impl<T: serde::de::DeserializeOwned> ConfigLoader for T {}
