//! Joint declaration and lifecycle types.
//!
//! This module defines the data handed to the hardware interface by the
//! control framework:
//! - `HardwareInfo` - Hardware description (parameters + joints)
//! - `JointInfo` / `InterfaceInfo` - Per-joint interface declarations
//! - `InterfaceKind` - Position / velocity interface kinds
//! - `LifecyclePhase` / `Transition` - Lifecycle states and requests

use crate::config::ConfigError;
use crate::hal::config::HardwareParams;
use crate::hal::consts::{HW_IF_POSITION, HW_IF_VELOCITY, MIRRORED_WHEEL_PATTERN, WHEEL_PATTERN};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;

/// Kind of a joint interface understood by the hardware interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterfaceKind {
    /// Joint position
    Position,
    /// Joint velocity
    Velocity,
}

impl InterfaceKind {
    /// Standard interface name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Position => HW_IF_POSITION,
            Self::Velocity => HW_IF_VELOCITY,
        }
    }

    /// Parse a declared interface name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            HW_IF_POSITION => Some(Self::Position),
            HW_IF_VELOCITY => Some(Self::Velocity),
            _ => None,
        }
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an interface is written by the controller or read by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceDirection {
    /// Written by the controller
    Command,
    /// Read by the controller
    State,
}

impl fmt::Display for InterfaceDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command => f.write_str("command"),
            Self::State => f.write_str("state"),
        }
    }
}

/// Position of an interface in a joint's declaration list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceSlot {
    /// First declared interface
    First,
    /// Second declared interface
    Second,
}

impl fmt::Display for InterfaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("first"),
            Self::Second => f.write_str("second"),
        }
    }
}

/// One declared command or state interface.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterfaceInfo {
    /// Interface name (e.g. "position", "velocity")
    pub name: String,
}

impl InterfaceInfo {
    /// Create an interface declaration from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Declared kind, if it is one the hardware interface understands.
    pub fn kind(&self) -> Option<InterfaceKind> {
        InterfaceKind::from_name(&self.name)
    }
}

/// Declaration of one joint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JointInfo {
    /// Joint name
    pub name: String,

    /// Declared command interfaces, in order.
    #[serde(default)]
    pub command_interfaces: Vec<InterfaceInfo>,

    /// Declared state interfaces, in order.
    #[serde(default)]
    pub state_interfaces: Vec<InterfaceInfo>,
}

impl JointInfo {
    /// Create a joint declaration from interface names.
    pub fn new(name: impl Into<String>, commands: &[&str], states: &[&str]) -> Self {
        Self {
            name: name.into(),
            command_interfaces: commands.iter().copied().map(InterfaceInfo::new).collect(),
            state_interfaces: states.iter().copied().map(InterfaceInfo::new).collect(),
        }
    }

    /// Joint follows the drivetrain naming convention.
    pub fn is_wheel(&self) -> bool {
        self.name.contains(WHEEL_PATTERN)
    }

    /// Joint is a wheel mounted in the opposing orientation.
    pub fn is_mirrored(&self) -> bool {
        self.name.contains(MIRRORED_WHEEL_PATTERN)
    }
}

/// Hardware description supplied once at initialization.
///
/// # TOML Example
///
/// ```toml
/// name = "Robot24"
///
/// [hardware_parameters]
/// hw_start_duration_sec = 2.0
/// hw_stop_duration_sec = 3.0
///
/// [[joints]]
/// name = "left_wheel_joint"
/// command_interfaces = [{ name = "velocity" }]
/// state_interfaces = [{ name = "position" }, { name = "velocity" }]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HardwareInfo {
    /// Hardware component name
    #[serde(default)]
    pub name: String,

    /// Raw string-keyed hardware parameters.
    /// Scalar TOML values are accepted and kept in their textual form.
    #[serde(default, deserialize_with = "deserialize_parameters")]
    pub hardware_parameters: HashMap<String, String>,

    /// Joint declarations, in framework order.
    #[serde(default)]
    pub joints: Vec<JointInfo>,
}

impl HardwareInfo {
    /// Convert the raw parameters into typed hardware parameters.
    pub fn params(&self) -> Result<HardwareParams, ConfigError> {
        HardwareParams::from_parameters(&self.hardware_parameters)
    }
}

fn deserialize_parameters<'de, D>(deserializer: D) -> Result<HashMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = HashMap::<String, toml::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(key, value)| match value {
            toml::Value::String(s) => Ok((key, s)),
            toml::Value::Integer(i) => Ok((key, i.to_string())),
            toml::Value::Float(f) => Ok((key, f.to_string())),
            toml::Value::Boolean(b) => Ok((key, b.to_string())),
            other => Err(D::Error::custom(format!(
                "hardware parameter '{}' must be a scalar, found {}",
                key,
                other.type_str()
            ))),
        })
        .collect()
}

/// Lifecycle phase of the hardware interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LifecyclePhase {
    /// Constructed, not yet initialized
    #[default]
    Unconfigured,
    /// Initialized, not driving hardware
    Inactive,
    /// Cyclic read/write permitted
    Active,
    /// Terminal
    Finalized,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Unconfigured => "unconfigured",
            Self::Inactive => "inactive",
            Self::Active => "active",
            Self::Finalized => "finalized",
        };
        f.write_str(name)
    }
}

/// Lifecycle transition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Unconfigured → Inactive
    Init,
    /// Inactive → Active
    Activate,
    /// Active → Inactive
    Deactivate,
    /// Any non-terminal phase → Finalized
    Shutdown,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Activate => "activate",
            Self::Deactivate => "deactivate",
            Self::Shutdown => "shutdown",
        };
        f.write_str(name)
    }
}
