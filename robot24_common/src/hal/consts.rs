//! Hardware interface constants.
//!
//! Interface names, joint naming conventions, parameter keys and timing
//! values used by the hardware interface.

use std::time::Duration;

/// Logging target / component name of the hardware interface.
pub const HW_COMPONENT_NAME: &str = "Robot24SystemHardware";

/// Standard name of a position interface.
pub const HW_IF_POSITION: &str = "position";

/// Standard name of a velocity interface.
pub const HW_IF_VELOCITY: &str = "velocity";

/// Joints whose name contains this are velocity-driven drivetrain joints.
pub const WHEEL_PATTERN: &str = "wheel";

/// Wheel joints whose name contains this are mounted mirrored.
pub const MIRRORED_WHEEL_PATTERN: &str = "right_wheel";

/// Hardware parameter: startup pacing duration in seconds.
pub const PARAM_START_DURATION_SEC: &str = "hw_start_duration_sec";

/// Hardware parameter: shutdown pacing duration in seconds.
pub const PARAM_STOP_DURATION_SEC: &str = "hw_stop_duration_sec";

/// Duration (device ticks) passed with every actuation.
pub const ACTUATION_DURATION_TICKS: u8 = 1;

/// Granularity of startup/shutdown pacing.
pub const PACING_STEP: Duration = Duration::from_secs(1);
