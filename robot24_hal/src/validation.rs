//! Joint topology validation.
//!
//! The joint contract is heterogeneous by naming convention:
//!
//! | Joint | Command interfaces | State interfaces |
//! |-------|--------------------|------------------|
//! | name contains `wheel` | exactly one, `velocity` | exactly `position`, `velocity` |
//! | any other | exactly one | first is `position` |
//!
//! Rules are checked per joint in declaration order and the first failure
//! is returned. The second state interface of a non-wheel joint is not
//! checked.

use robot24_common::hal::error::HwError;
use robot24_common::hal::types::{InterfaceDirection, InterfaceKind, InterfaceSlot, JointInfo};
use std::collections::HashSet;

/// Role of a joint, derived from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JointRole {
    /// Velocity-driven drivetrain joint.
    Wheel {
        /// Mounted in the opposing orientation; commands are negated.
        mirrored: bool,
    },
    /// Position-driven joint.
    Positional,
}

impl JointRole {
    /// Classify a declared joint by name.
    pub fn of(joint: &JointInfo) -> Self {
        if joint.is_wheel() {
            Self::Wheel {
                mirrored: joint.is_mirrored(),
            }
        } else {
            Self::Positional
        }
    }

    /// Kind of the command interface exported for this role.
    pub const fn command_kind(self) -> InterfaceKind {
        match self {
            Self::Wheel { .. } => InterfaceKind::Velocity,
            Self::Positional => InterfaceKind::Position,
        }
    }

    /// Value to send to the device for a raw controller command.
    #[inline]
    pub fn device_value(self, command: f64) -> f64 {
        match self {
            Self::Wheel { mirrored: true } => -command,
            _ => command,
        }
    }
}

/// A joint that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JointSpec {
    /// Joint name
    pub name: String,
    /// Role derived from the name
    pub role: JointRole,
}

/// Validate every joint declaration, in order.
///
/// # Errors
/// The first `HwError::InterfaceCount`, `HwError::InterfaceKind` or
/// `HwError::DuplicateJoint` found.
pub fn validate_joints(joints: &[JointInfo]) -> Result<Vec<JointSpec>, HwError> {
    let mut names = HashSet::with_capacity(joints.len());
    let mut specs = Vec::with_capacity(joints.len());

    for joint in joints {
        let spec = validate_joint(joint)?;
        if !names.insert(joint.name.as_str()) {
            return Err(HwError::DuplicateJoint(joint.name.clone()));
        }
        specs.push(spec);
    }

    Ok(specs)
}

/// Validate a single joint declaration.
pub fn validate_joint(joint: &JointInfo) -> Result<JointSpec, HwError> {
    let role = JointRole::of(joint);
    let is_wheel = matches!(role, JointRole::Wheel { .. });

    // Robot has exactly one command interface on each joint
    let commands = &joint.command_interfaces;
    if commands.len() != 1 {
        return Err(count_error(joint, InterfaceDirection::Command, 1, commands.len()));
    }

    if is_wheel {
        expect_kind(joint, InterfaceDirection::Command, InterfaceSlot::First, InterfaceKind::Velocity)?;
    }

    let states = &joint.state_interfaces;
    if is_wheel && states.len() != 2 {
        return Err(count_error(joint, InterfaceDirection::State, 2, states.len()));
    }
    if states.is_empty() {
        return Err(count_error(joint, InterfaceDirection::State, 1, 0));
    }

    expect_kind(joint, InterfaceDirection::State, InterfaceSlot::First, InterfaceKind::Position)?;

    if is_wheel {
        expect_kind(joint, InterfaceDirection::State, InterfaceSlot::Second, InterfaceKind::Velocity)?;
    }

    Ok(JointSpec {
        name: joint.name.clone(),
        role,
    })
}

fn count_error(joint: &JointInfo, direction: InterfaceDirection, expected: usize, found: usize) -> HwError {
    HwError::InterfaceCount {
        joint: joint.name.clone(),
        direction,
        expected,
        found,
    }
}

/// Check the kind of an interface known to be declared.
fn expect_kind(
    joint: &JointInfo,
    direction: InterfaceDirection,
    slot: InterfaceSlot,
    expected: InterfaceKind,
) -> Result<(), HwError> {
    let list = match direction {
        InterfaceDirection::Command => &joint.command_interfaces,
        InterfaceDirection::State => &joint.state_interfaces,
    };
    let index = match slot {
        InterfaceSlot::First => 0,
        InterfaceSlot::Second => 1,
    };
    let found = list.get(index).map(|i| i.name.as_str()).unwrap_or_default();

    if InterfaceKind::from_name(found) == Some(expected) {
        Ok(())
    } else {
        Err(HwError::InterfaceKind {
            joint: joint.name.clone(),
            direction,
            slot,
            expected,
            found: found.to_string(),
        })
    }
}
