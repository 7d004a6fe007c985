//! Per-cycle translation between the joint table and the device.
//!
//! `read_states` pulls device state into the table, `write_commands`
//! pushes pending commands out. Joints are processed in declaration order
//! every cycle. `handles[i]` belongs to `joints[i]`.

use crate::interfaces::JointInterfaceTable;
use crate::validation::JointSpec;
use robot24_common::hal::consts::ACTUATION_DURATION_TICKS;
use robot24_common::hal::device::JointHandle;
use robot24_common::hal::error::HwError;
use tracing::{debug, trace, warn};

/// Read joint states from the device.
///
/// NOTE: the device API offers no state feedback, so the table is **not**
/// updated here: position and velocity slots keep their seeded values and
/// the velocity echo written by [`write_commands`]. This only confirms a
/// handle is held for every joint. Wire the device's reported position and
/// velocity in here once the actuator driver exposes them.
///
/// # Errors
/// `HwError::DeviceUnreachable` for the first joint without a handle.
pub fn read_states(joints: &[JointSpec], handles: &[Box<dyn JointHandle>]) -> Result<(), HwError> {
    for (i, joint) in joints.iter().enumerate() {
        let handle = handles.get(i).ok_or_else(|| HwError::DeviceUnreachable {
            joint: joint.name.clone(),
            cause: None,
        })?;
        trace!("Joint: {}, handle '{}' held, no state feedback", joint.name, handle.name());
    }
    Ok(())
}

/// Send every pending command to the device.
///
/// For each joint with a command:
/// 1. Mirrored wheels get the command negated; the command slot itself
///    keeps the controller's raw value.
/// 2. The value sent is echoed into the velocity state slot.
/// 3. The joint is actuated for one tick.
///
/// Joints without a command are skipped. A failing joint does not stop the
/// remaining ones.
///
/// # Errors
/// The first `HwError::DeviceUnreachable` or `HwError::Actuation` of the cycle.
pub fn write_commands(
    joints: &[JointSpec],
    handles: &mut [Box<dyn JointHandle>],
    table: &mut JointInterfaceTable,
) -> Result<(), HwError> {
    let mut first_error = None;

    for (i, joint) in joints.iter().enumerate() {
        let Some(handle) = handles.get_mut(i) else {
            first_error.get_or_insert(HwError::DeviceUnreachable {
                joint: joint.name.clone(),
                cause: None,
            });
            continue;
        };

        let Some(command) = table.command(i) else {
            trace!("Joint: {}, no command pending", joint.name);
            continue;
        };

        let value = joint.role.device_value(command);
        table.set_velocity(i, value);

        // Commands sent to hardware
        debug!(
            "Joint: {}, command {:.5}, position state: {}, velocity state: {:.5}",
            joint.name,
            value,
            fmt_slot(table.position(i)),
            value
        );

        if let Err(cause) = handle.actuate(value, ACTUATION_DURATION_TICKS) {
            warn!("Joint: {}, actuation failed: {}", joint.name, cause);
            first_error.get_or_insert(HwError::Actuation {
                joint: joint.name.clone(),
                cause,
            });
        }
    }

    first_error.map_or(Ok(()), Err)
}

fn fmt_slot(slot: Option<f64>) -> String {
    slot.map_or_else(|| "unset".to_string(), |v| format!("{v:.5}"))
}
