//! Hardware interface definitions.
//!
//! This module contains constants, declarations, typed parameters, the
//! device abstraction traits and the error taxonomy shared by the
//! hardware interface and its device backends.

pub mod config;
pub mod consts;
pub mod device;
pub mod error;
pub mod types;
