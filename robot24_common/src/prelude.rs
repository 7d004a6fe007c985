//! Prelude module for common re-exports.
//!
//! ```rust
//! use robot24_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader};
pub use crate::hal::config::HardwareParams;

// ─── Declarations ───────────────────────────────────────────────────
pub use crate::hal::types::{
    HardwareInfo, InterfaceDirection, InterfaceInfo, InterfaceKind, InterfaceSlot, JointInfo,
    LifecyclePhase, Transition,
};

// ─── Device ─────────────────────────────────────────────────────────
pub use crate::hal::device::{DeviceError, JointHandle, Robot};

// ─── Errors ─────────────────────────────────────────────────────────
pub use crate::hal::error::HwError;
