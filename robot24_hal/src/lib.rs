//! # Robot24 HAL Library
//!
//! System hardware interface bridging a joint-based robot control framework
//! to the Robot24 actuator API.
//!
//! # Module Structure
//!
//! - [`system`] - `SystemHardware` lifecycle (init / activate / deactivate / shutdown)
//! - [`validation`] - Joint topology validation
//! - [`interfaces`] - Joint interface table and exported interfaces
//! - [`translator`] - Per-cycle read/write against the device
//! - [`pacing`] - Startup/shutdown pacing
//! - [`devices`] - Device backends (simulation)
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         robot24_hal                              │
//! │  ┌─────────────┐    ┌──────────────────┐    ┌─────────────────┐  │
//! │  │  Control    │◄──►│  SystemHardware  │───►│  Validation     │  │
//! │  │  framework  │    │  (lifecycle)     │    │  (init only)    │  │
//! │  └─────────────┘    └────────┬─────────┘    └─────────────────┘  │
//! │        ▲                     │ read / write                      │
//! │        │                     ▼                                   │
//! │  ┌─────┴────────────┐  ┌────────────┐     ┌────────────────────┐ │
//! │  │ JointInterface   │◄─┤ Translator ├────►│ Robot / JointHandle│ │
//! │  │ Table            │  └────────────┘     │ (trait objects)    │ │
//! │  └──────────────────┘                     └────────────────────┘ │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

#![deny(warnings)]
#![deny(missing_docs)]

pub mod devices;
pub mod interfaces;
pub mod pacing;
pub mod system;
pub mod translator;
pub mod validation;

// Re-export key types for convenience
pub use crate::interfaces::{CommandInterface, JointInterfaceTable, StateInterface};
pub use crate::pacing::{Pacer, ThreadPacer};
pub use crate::system::SystemHardware;
pub use crate::validation::{JointRole, JointSpec};
