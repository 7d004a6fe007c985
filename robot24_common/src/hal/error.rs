//! Hardware interface error types.

use crate::config::ConfigError;
use crate::hal::device::DeviceError;
use crate::hal::types::{InterfaceDirection, InterfaceKind, InterfaceSlot, LifecyclePhase, Transition};
use thiserror::Error;

/// Error types for hardware interface operations.
///
/// Configuration and topology errors are raised during `init` and are
/// terminal for the component. Device errors are raised per cycle and
/// leave the component running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HwError {
    /// Hardware parameters missing or unusable
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Wrong number of command or state interfaces on a joint
    #[error("Joint '{joint}' has {found} {direction} interfaces. {expected} expected.")]
    InterfaceCount {
        /// Offending joint
        joint: String,
        /// Command or state side
        direction: InterfaceDirection,
        /// Required count
        expected: usize,
        /// Declared count
        found: usize,
    },

    /// Wrong interface kind for the joint's role
    #[error("Joint '{joint}' has '{found}' as {slot} {direction} interface. '{expected}' expected.")]
    InterfaceKind {
        /// Offending joint
        joint: String,
        /// Command or state side
        direction: InterfaceDirection,
        /// Which declared interface
        slot: InterfaceSlot,
        /// Required kind
        expected: InterfaceKind,
        /// Declared interface name
        found: String,
    },

    /// Two joints share a name
    #[error("Duplicate joint name: {0}")]
    DuplicateJoint(String),

    /// The device failed to execute a command
    #[error("Joint '{joint}' failed to actuate: {cause}")]
    Actuation {
        /// Joint being driven
        joint: String,
        /// Device-reported failure
        cause: DeviceError,
    },

    /// No device handle is available for a joint
    #[error("Joint '{joint}' is unreachable on the device{}", .cause.as_ref().map(|c| format!(": {c}")).unwrap_or_default())]
    DeviceUnreachable {
        /// Joint being resolved
        joint: String,
        /// Device-reported failure, if the lookup itself failed
        cause: Option<DeviceError>,
    },

    /// Lifecycle transition not allowed from the current phase
    #[error("Cannot {transition} from {from} phase")]
    InvalidTransition {
        /// Phase at the time of the request
        from: LifecyclePhase,
        /// Requested transition
        transition: Transition,
    },

    /// Interface descriptor does not belong to this component
    #[error("Unknown interface: {0}")]
    UnknownInterface(String),
}
