//! Simulated robot.
//!
//! `SimulatedRobot` implements the `Robot` trait for a fixed set of named
//! joints without physical hardware. Every actuation is recorded so the
//! bench CLI and tests can observe what the hardware interface sent.
//! Clones share the same recorded state.

use robot24_common::hal::device::{DeviceError, JointHandle, Robot};
use robot24_common::hal::types::HardwareInfo;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

/// One recorded actuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Actuation {
    /// Value sent to the joint
    pub value: f64,
    /// Duration in device ticks
    pub duration_ticks: u8,
}

#[derive(Debug, Default)]
struct SimJoint {
    last: Option<Actuation>,
    count: u64,
    fault: Option<String>,
}

#[derive(Debug, Default)]
struct SimState {
    joints: HashMap<String, SimJoint>,
    lookups: u64,
}

/// Software robot with named joints.
#[derive(Debug, Clone, Default)]
pub struct SimulatedRobot {
    state: Arc<Mutex<SimState>>,
}

impl SimulatedRobot {
    /// Create a robot exposing the given joint names.
    pub fn new<I, S>(joint_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let joints = joint_names
            .into_iter()
            .map(|name| (name.into(), SimJoint::default()))
            .collect::<HashMap<_, _>>();
        info!("Simulated robot created with {} joints", joints.len());
        Self {
            state: Arc::new(Mutex::new(SimState { joints, lookups: 0 })),
        }
    }

    /// Create a robot exposing every joint declared in `info`.
    pub fn from_info(info: &HardwareInfo) -> Self {
        Self::new(info.joints.iter().map(|j| j.name.clone()))
    }

    /// Last actuation received by `joint`.
    pub fn last_actuation(&self, joint: &str) -> Option<Actuation> {
        self.lock().joints.get(joint).and_then(|j| j.last)
    }

    /// Number of actuations received by `joint`.
    pub fn actuation_count(&self, joint: &str) -> u64 {
        self.lock().joints.get(joint).map_or(0, |j| j.count)
    }

    /// Number of handle lookups served so far.
    pub fn lookups(&self) -> u64 {
        self.lock().lookups
    }

    /// Make every further actuation of `joint` fail with `reason`.
    pub fn inject_fault(&self, joint: &str, reason: impl Into<String>) {
        if let Some(j) = self.lock().joints.get_mut(joint) {
            j.fault = Some(reason.into());
        }
    }

    /// Clear a previously injected fault.
    pub fn clear_fault(&self, joint: &str) {
        if let Some(j) = self.lock().joints.get_mut(joint) {
            j.fault = None;
        }
    }

    fn lock(&self) -> MutexGuard<'_, SimState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Robot for SimulatedRobot {
    fn name(&self) -> &str {
        "simulation"
    }

    fn joint(&self, name: &str) -> Result<Box<dyn JointHandle>, DeviceError> {
        let mut state = self.lock();
        state.lookups += 1;
        if !state.joints.contains_key(name) {
            return Err(DeviceError::UnknownJoint(name.to_string()));
        }
        debug!("Simulated joint '{}' resolved", name);
        Ok(Box::new(SimJointHandle {
            name: name.to_string(),
            state: Arc::clone(&self.state),
        }))
    }
}

/// Handle to one simulated joint.
struct SimJointHandle {
    name: String,
    state: Arc<Mutex<SimState>>,
}

impl JointHandle for SimJointHandle {
    fn name(&self) -> &str {
        &self.name
    }

    fn actuate(&mut self, value: f64, duration_ticks: u8) -> Result<(), DeviceError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| DeviceError::Communication("simulation state poisoned".to_string()))?;
        let joint = state
            .joints
            .get_mut(&self.name)
            .ok_or_else(|| DeviceError::UnknownJoint(self.name.clone()))?;

        if let Some(reason) = &joint.fault {
            return Err(DeviceError::Rejected(reason.clone()));
        }

        joint.last = Some(Actuation {
            value,
            duration_ticks,
        });
        joint.count += 1;
        Ok(())
    }
}
