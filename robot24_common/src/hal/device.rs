//! Device abstraction traits and error types.
//!
//! This module defines:
//! - `Robot` trait - The physical robot, resolving joints by name
//! - `JointHandle` trait - One actuated joint
//! - `DeviceError` enum - Failures reported by a device backend
//!
//! The actuator driver behind these traits is opaque to the hardware
//! interface. Backends (real hardware, simulation) implement them.

use thiserror::Error;

/// Error types reported by a device backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DeviceError {
    /// No joint with this name exists on the device
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    /// The device refused the command
    #[error("Command rejected: {0}")]
    Rejected(String),

    /// Communication with the device failed
    #[error("Device communication error: {0}")]
    Communication(String),
}

/// The physical robot.
///
/// # Lifecycle
///
/// The hardware interface resolves one handle per declared joint when it
/// is activated and keeps them until it is finalized. Handles are indexed
/// in the same order as the joint declarations.
pub trait Robot: Send {
    /// Backend identifier (e.g., "simulation").
    fn name(&self) -> &str;

    /// Resolve the handle of a named joint.
    ///
    /// # Errors
    /// Return `DeviceError::UnknownJoint` if the device has no such joint.
    fn joint(&self, name: &str) -> Result<Box<dyn JointHandle>, DeviceError>;
}

/// One actuated joint on the device.
pub trait JointHandle: Send {
    /// Joint name as known to the device.
    fn name(&self) -> &str;

    /// Drive the joint with `value` for `duration_ticks` device ticks.
    ///
    /// The meaning of `value` (velocity or position target) follows the
    /// joint's command interface.
    fn actuate(&mut self, value: f64, duration_ticks: u8) -> Result<(), DeviceError>;
}
