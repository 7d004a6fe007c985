//! Startup and shutdown pacing.
//!
//! Activation and deactivation block the calling thread for the configured
//! duration in coarse one-second steps, logging the remaining time before
//! each step. The delay is not cancellable.

use robot24_common::hal::consts::PACING_STEP;
use std::time::Duration;
use tracing::info;

/// Source of the blocking delay used for pacing.
pub trait Pacer: Send {
    /// Block for one pacing step.
    fn pause(&mut self, step: Duration);
}

/// Pacer that sleeps the calling thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn pause(&mut self, step: Duration) {
        std::thread::sleep(step);
    }
}

/// Number of one-second steps needed to cover `total`.
///
/// Fractional seconds round up: 2.5 s takes three steps.
pub fn pacing_steps(total: Duration) -> u64 {
    let step = PACING_STEP.as_nanos();
    total.as_nanos().div_ceil(step) as u64
}

/// Seconds still to wait once `elapsed_steps` steps of `total` have passed.
///
/// A 3 s wait counts down 3.0, 2.0, 1.0.
pub fn seconds_left(total: Duration, elapsed_steps: u64) -> f64 {
    (total.as_secs_f64() - elapsed_steps as f64 * PACING_STEP.as_secs_f64()).max(0.0)
}

/// Block for `total` in one-second steps. Returns the number of steps taken.
pub fn paced_wait(pacer: &mut dyn Pacer, total: Duration) -> u64 {
    let steps = pacing_steps(total);

    for step in 0..steps {
        info!("{:.1} seconds left...", seconds_left(total, step));
        pacer.pause(PACING_STEP);
    }

    steps
}
