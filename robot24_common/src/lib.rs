//! Robot24 Common Library
//!
//! Shared definitions for the Robot24 hardware interface crates.
//!
//! # Module Structure
//!
//! - [`config`] - Configuration loading traits and errors
//! - [`hal`] - Joint declarations, hardware parameters, device traits and errors
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use robot24_common::prelude::*;
//! ```

pub mod config;
pub mod hal;
pub mod prelude;
