//! System hardware lifecycle.
//!
//! `SystemHardware` is the component the control framework drives. It owns
//! the joint interface table and the device handles and moves through a
//! fixed lifecycle:
//!
//! ```text
//!  Unconfigured ──init──► Inactive ──activate──► Active
//!       │                  ▲    │                  │
//!       │ (init error)     └────┼───deactivate─────┘
//!       ▼                       ▼
//!   Finalized ◄───────────shutdown (from any non-terminal phase)
//! ```
//!
//! While `Active` the framework calls [`SystemHardware::read`] and
//! [`SystemHardware::write`] once per control period. The phase is not
//! re-checked on those calls.

use crate::interfaces::{self, CommandInterface, JointInterfaceTable, StateInterface};
use crate::pacing::{Pacer, ThreadPacer, paced_wait};
use crate::translator;
use crate::validation::{JointSpec, validate_joints};
use robot24_common::hal::config::HardwareParams;
use robot24_common::hal::device::{JointHandle, Robot};
use robot24_common::hal::error::HwError;
use robot24_common::hal::types::{HardwareInfo, InterfaceKind, LifecyclePhase, Transition};
use tracing::{debug, error, info, warn};

/// Robot24 system hardware interface.
pub struct SystemHardware {
    /// Device the joints are resolved on
    robot: Box<dyn Robot>,
    /// Blocking delay used for startup/shutdown pacing
    pacer: Box<dyn Pacer>,
    /// Current lifecycle phase
    phase: LifecyclePhase,
    /// Hardware parameters, set by a successful `init`
    params: Option<HardwareParams>,
    /// Validated joints, in framework order
    joints: Vec<JointSpec>,
    /// State/command storage, index-aligned with `joints`
    table: JointInterfaceTable,
    /// Device handles resolved at activation, index-aligned with `joints`
    handles: Vec<Box<dyn JointHandle>>,
}

impl SystemHardware {
    /// Create an unconfigured hardware interface that paces by sleeping.
    pub fn new(robot: Box<dyn Robot>) -> Self {
        Self::with_pacer(robot, Box::new(ThreadPacer))
    }

    /// Create an unconfigured hardware interface with a custom pacer.
    pub fn with_pacer(robot: Box<dyn Robot>, pacer: Box<dyn Pacer>) -> Self {
        Self {
            robot,
            pacer,
            phase: LifecyclePhase::Unconfigured,
            params: None,
            joints: Vec::new(),
            table: JointInterfaceTable::default(),
            handles: Vec::new(),
        }
    }

    /// Initialize from a hardware description.
    ///
    /// Parses the hardware parameters, validates the joint topology and
    /// allocates the interface table. Nothing is committed unless every
    /// check passes.
    ///
    /// # Errors
    /// `HwError::Config`, `HwError::InterfaceCount`, `HwError::InterfaceKind`
    /// or `HwError::DuplicateJoint`. Any of these finalizes the component.
    /// `HwError::InvalidTransition` if not `Unconfigured`.
    pub fn init(&mut self, info: &HardwareInfo) -> Result<(), HwError> {
        self.expect_phase(&[LifecyclePhase::Unconfigured], Transition::Init)?;
        info!("Initializing '{}' with {} joints...", info.name, info.joints.len());

        let (params, joints) = match configure(info) {
            Ok(configured) => configured,
            Err(e) => {
                error!("{}", e);
                self.phase = LifecyclePhase::Finalized;
                return Err(e);
            }
        };

        if joints.is_empty() {
            warn!("No joints declared; nothing will be driven");
        }
        for joint in &joints {
            debug!("  Joint '{}': {:?}", joint.name, joint.role);
        }

        self.table = JointInterfaceTable::with_joints(joints.len());
        self.joints = joints;
        self.params = Some(params);
        self.phase = LifecyclePhase::Inactive;

        info!(
            "Initialized: start={:.1}s stop={:.1}s",
            params.start_duration.as_secs_f64(),
            params.stop_duration.as_secs_f64()
        );
        Ok(())
    }

    /// Activate the hardware.
    ///
    /// Resolves one device handle per joint, blocks for the startup
    /// duration, then seeds every unset position, velocity and command slot
    /// with `0.0`.
    ///
    /// # Errors
    /// `HwError::DeviceUnreachable` if a joint cannot be resolved; the
    /// component stays `Inactive`. `HwError::InvalidTransition` if not
    /// `Inactive`.
    pub fn activate(&mut self) -> Result<(), HwError> {
        self.expect_phase(&[LifecyclePhase::Inactive], Transition::Activate)?;
        let params = self.require_params(Transition::Activate)?;

        info!("Activating ...please wait...");

        self.handles = self.resolve_handles()?;

        paced_wait(self.pacer.as_mut(), params.start_duration);

        let seeded = self.table.seed_unset();
        if seeded > 0 {
            debug!("Seeded default state for {} joints", seeded);
        }

        self.phase = LifecyclePhase::Active;
        info!("Successfully activated!");
        Ok(())
    }

    /// Deactivate the hardware, blocking for the shutdown duration.
    ///
    /// The interface table is left untouched.
    ///
    /// # Errors
    /// `HwError::InvalidTransition` if not `Active`.
    pub fn deactivate(&mut self) -> Result<(), HwError> {
        self.expect_phase(&[LifecyclePhase::Active], Transition::Deactivate)?;
        let params = self.require_params(Transition::Deactivate)?;

        info!("Deactivating ...please wait...");
        paced_wait(self.pacer.as_mut(), params.stop_duration);

        self.phase = LifecyclePhase::Inactive;
        info!("Successfully deactivated!");
        Ok(())
    }

    /// Finalize the component, deactivating first if it is `Active`.
    ///
    /// Releases device handles and the interface table.
    ///
    /// # Errors
    /// `HwError::InvalidTransition` if already `Finalized`.
    pub fn shutdown(&mut self) -> Result<(), HwError> {
        self.expect_phase(
            &[
                LifecyclePhase::Unconfigured,
                LifecyclePhase::Inactive,
                LifecyclePhase::Active,
            ],
            Transition::Shutdown,
        )?;

        if self.phase == LifecyclePhase::Active {
            self.deactivate()?;
        }

        self.handles.clear();
        self.joints.clear();
        self.table = JointInterfaceTable::default();
        self.phase = LifecyclePhase::Finalized;
        info!("Shut down");
        Ok(())
    }

    /// Read joint state from the device into the table.
    ///
    /// See [`translator::read_states`]: the table is currently not updated.
    pub fn read(&mut self) -> Result<(), HwError> {
        translator::read_states(&self.joints, &self.handles)
    }

    /// Send pending commands to the device.
    pub fn write(&mut self) -> Result<(), HwError> {
        translator::write_commands(&self.joints, &mut self.handles, &mut self.table)
    }

    /// State interfaces exported to the control framework.
    ///
    /// Empty before `init` and after `shutdown`.
    pub fn export_state_interfaces(&self) -> Vec<StateInterface> {
        interfaces::state_interfaces(&self.joints)
    }

    /// Command interfaces exported to the control framework.
    ///
    /// Empty before `init` and after `shutdown`.
    pub fn export_command_interfaces(&self) -> Vec<CommandInterface> {
        interfaces::command_interfaces(&self.joints)
    }

    /// Current value behind a state interface.
    pub fn state(&self, interface: &StateInterface) -> Option<f64> {
        if !self.owns(&interface.joint, interface.index()) {
            return None;
        }
        match interface.kind {
            InterfaceKind::Position => self.table.position(interface.index()),
            InterfaceKind::Velocity => self.table.velocity(interface.index()),
        }
    }

    /// Current value behind a command interface.
    pub fn command(&self, interface: &CommandInterface) -> Option<f64> {
        if !self.owns(&interface.joint, interface.index()) {
            return None;
        }
        self.table.command(interface.index())
    }

    /// Write a command through a command interface.
    ///
    /// # Errors
    /// `HwError::UnknownInterface` if the interface was not exported by this
    /// component in its current configuration.
    pub fn set_command(&mut self, interface: &CommandInterface, value: f64) -> Result<(), HwError> {
        if !self.owns(&interface.joint, interface.index()) || !self.table.set_command(interface.index(), value) {
            return Err(HwError::UnknownInterface(interface.name()));
        }
        Ok(())
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Validated joints, in framework order.
    pub fn joints(&self) -> &[JointSpec] {
        &self.joints
    }

    /// Interface table.
    pub fn table(&self) -> &JointInterfaceTable {
        &self.table
    }

    /// Hardware parameters, once initialized.
    pub fn params(&self) -> Option<&HardwareParams> {
        self.params.as_ref()
    }

    /// Name of the device backend.
    pub fn device_name(&self) -> &str {
        self.robot.name()
    }

    fn owns(&self, joint: &str, index: usize) -> bool {
        self.joints.get(index).is_some_and(|j| j.name == joint)
    }

    fn expect_phase(&self, allowed: &[LifecyclePhase], transition: Transition) -> Result<(), HwError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            warn!("Rejected {} in {} phase", transition, self.phase);
            Err(HwError::InvalidTransition {
                from: self.phase,
                transition,
            })
        }
    }

    fn require_params(&self, transition: Transition) -> Result<HardwareParams, HwError> {
        self.params.ok_or_else(|| HwError::InvalidTransition {
            from: self.phase,
            transition,
        })
    }

    fn resolve_handles(&self) -> Result<Vec<Box<dyn JointHandle>>, HwError> {
        self.joints
            .iter()
            .map(|joint| {
                self.robot.joint(&joint.name).map_err(|cause| {
                    error!("Joint '{}' could not be resolved: {}", joint.name, cause);
                    HwError::DeviceUnreachable {
                        joint: joint.name.clone(),
                        cause: Some(cause),
                    }
                })
            })
            .collect()
    }
}

/// Typed parameters and validated joints, or the first error.
fn configure(info: &HardwareInfo) -> Result<(HardwareParams, Vec<JointSpec>), HwError> {
    let params = info.params()?;
    let joints = validate_joints(&info.joints)?;
    Ok((params, joints))
}
