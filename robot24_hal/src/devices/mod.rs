//! Device backends implementing the `Robot` trait.
//!
//! - [`simulation`] - Software robot for development and testing
//!
//! Real actuator drivers live outside this crate and implement
//! `robot24_common::hal::device::Robot` directly.

pub mod simulation;

pub use simulation::{Actuation, SimulatedRobot};
