//! Joint interface table and exported interface descriptors.
//!
//! The table holds one command, position, velocity and legacy state slot per
//! joint, index-aligned with the validated joint list. Its length is fixed
//! when it is allocated at `init` and never changes afterwards.
//!
//! A slot is `None` until something writes it. Activation seeds unset
//! position, velocity and command slots to `0.0`.

use crate::validation::JointSpec;
use robot24_common::hal::types::InterfaceKind;
use std::fmt;

/// Per-joint state and command storage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointInterfaceTable {
    commands: Box<[Option<f64>]>,
    positions: Box<[Option<f64>]>,
    velocities: Box<[Option<f64>]>,
    legacy_states: Box<[Option<f64>]>,
}

impl JointInterfaceTable {
    /// Allocate a table for `joints` joints with every slot unset.
    pub fn with_joints(joints: usize) -> Self {
        let unset = || vec![None; joints].into_boxed_slice();
        Self {
            commands: unset(),
            positions: unset(),
            velocities: unset(),
            legacy_states: unset(),
        }
    }

    /// Number of joints.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// True if the table holds no joints.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Last command written for joint `index`.
    pub fn command(&self, index: usize) -> Option<f64> {
        self.commands.get(index).copied().flatten()
    }

    /// Last position state of joint `index`.
    pub fn position(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied().flatten()
    }

    /// Last velocity state of joint `index`.
    pub fn velocity(&self, index: usize) -> Option<f64> {
        self.velocities.get(index).copied().flatten()
    }

    /// Reserved legacy state slot of joint `index`.
    pub fn legacy_state(&self, index: usize) -> Option<f64> {
        self.legacy_states.get(index).copied().flatten()
    }

    /// Write the command slot. Returns false if `index` is out of range.
    pub fn set_command(&mut self, index: usize, value: f64) -> bool {
        set_slot(&mut self.commands, index, value)
    }

    /// Write the position state slot. Returns false if `index` is out of range.
    pub fn set_position(&mut self, index: usize, value: f64) -> bool {
        set_slot(&mut self.positions, index, value)
    }

    /// Write the velocity state slot. Returns false if `index` is out of range.
    pub fn set_velocity(&mut self, index: usize, value: f64) -> bool {
        set_slot(&mut self.velocities, index, value)
    }

    /// Seed every unset position, velocity and command slot with `0.0`.
    ///
    /// Slots that already hold a value keep it. The legacy slot is not
    /// touched. Returns the number of joints that had at least one slot
    /// seeded.
    pub fn seed_unset(&mut self) -> usize {
        let mut seeded = 0;
        for i in 0..self.len() {
            let mut touched = false;
            for slot in [
                &mut self.positions[i],
                &mut self.velocities[i],
                &mut self.commands[i],
            ] {
                if slot.is_none() {
                    *slot = Some(0.0);
                    touched = true;
                }
            }
            if touched {
                seeded += 1;
            }
        }
        seeded
    }
}

fn set_slot(slots: &mut [Option<f64>], index: usize, value: f64) -> bool {
    match slots.get_mut(index) {
        Some(slot) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}

/// Read-only state interface exported to the control framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateInterface {
    /// Owning joint
    pub joint: String,
    /// Interface kind
    pub kind: InterfaceKind,
    index: usize,
}

impl StateInterface {
    /// Joint index the interface reads from.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Fully qualified name, `<joint>/<interface>`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.joint, self.kind)
    }
}

impl fmt::Display for StateInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.joint, self.kind)
    }
}

/// Read-write command interface exported to the control framework.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandInterface {
    /// Owning joint
    pub joint: String,
    /// Interface kind
    pub kind: InterfaceKind,
    index: usize,
}

impl CommandInterface {
    /// Joint index the interface writes to.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Fully qualified name, `<joint>/<interface>`.
    pub fn name(&self) -> String {
        format!("{}/{}", self.joint, self.kind)
    }
}

impl fmt::Display for CommandInterface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.joint, self.kind)
    }
}

/// Position and velocity state interfaces for every joint, in joint order.
pub fn state_interfaces(joints: &[JointSpec]) -> Vec<StateInterface> {
    joints
        .iter()
        .enumerate()
        .flat_map(|(index, joint)| {
            [InterfaceKind::Position, InterfaceKind::Velocity].map(|kind| StateInterface {
                joint: joint.name.clone(),
                kind,
                index,
            })
        })
        .collect()
}

/// One command interface per joint: velocity for wheels, position otherwise.
pub fn command_interfaces(joints: &[JointSpec]) -> Vec<CommandInterface> {
    joints
        .iter()
        .enumerate()
        .map(|(index, joint)| CommandInterface {
            joint: joint.name.clone(),
            kind: joint.role.command_kind(),
            index,
        })
        .collect()
}
