//! Typed hardware parameters.
//!
//! The control framework hands the hardware interface a string-keyed
//! parameter map. `HardwareParams` is the validated, typed view of it.

use crate::config::ConfigError;
use crate::hal::consts::{PARAM_START_DURATION_SEC, PARAM_STOP_DURATION_SEC};
use std::collections::HashMap;
use std::time::Duration;

/// Validated hardware parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HardwareParams {
    /// How long activation blocks before the hardware is considered ready.
    pub start_duration: Duration,
    /// How long deactivation blocks before the hardware is considered stopped.
    pub stop_duration: Duration,
}

impl HardwareParams {
    /// Build typed parameters from the raw parameter map.
    ///
    /// Both `hw_start_duration_sec` and `hw_stop_duration_sec` are required.
    ///
    /// # Errors
    /// - `ConfigError::MissingParameter` if a key is absent
    /// - `ConfigError::InvalidParameter` if a value is not a finite,
    ///   non-negative number of seconds
    pub fn from_parameters(params: &HashMap<String, String>) -> Result<Self, ConfigError> {
        Ok(Self {
            start_duration: seconds_param(params, PARAM_START_DURATION_SEC)?,
            stop_duration: seconds_param(params, PARAM_STOP_DURATION_SEC)?,
        })
    }
}

fn seconds_param(params: &HashMap<String, String>, key: &str) -> Result<Duration, ConfigError> {
    let raw = params
        .get(key)
        .ok_or_else(|| ConfigError::MissingParameter(key.to_string()))?;

    let invalid = |reason: String| ConfigError::InvalidParameter {
        key: key.to_string(),
        value: raw.clone(),
        reason,
    };

    let secs: f64 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if !secs.is_finite() {
        return Err(invalid("must be finite".to_string()));
    }
    if secs < 0.0 {
        return Err(invalid("must not be negative".to_string()));
    }

    Duration::try_from_secs_f64(secs).map_err(|e| invalid(e.to_string()))
}
