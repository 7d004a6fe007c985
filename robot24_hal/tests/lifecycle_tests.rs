//! SystemHardware lifecycle integration tests.
//!
//! Drives init → activate → read/write → deactivate → shutdown against the
//! simulated robot: topology acceptance, activation seeding and pacing,
//! wheel mirroring, exported interface names and device failure handling.

use robot24_common::prelude::*;
use robot24_hal::devices::SimulatedRobot;
use robot24_hal::{CommandInterface, Pacer, SystemHardware};
use std::fs;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Pacer that records steps instead of sleeping.
#[derive(Clone, Default)]
struct RecordingPacer {
    steps: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingPacer {
    fn count(&self) -> usize {
        self.steps.lock().unwrap().len()
    }
}

impl Pacer for RecordingPacer {
    fn pause(&mut self, step: Duration) {
        self.steps.lock().unwrap().push(step);
    }
}

fn wheel(name: &str) -> JointInfo {
    JointInfo::new(name, &["velocity"], &["position", "velocity"])
}

fn arm(name: &str) -> JointInfo {
    JointInfo::new(name, &["position"], &["position"])
}

fn robot24_info(start: &str, stop: &str, joints: Vec<JointInfo>) -> HardwareInfo {
    HardwareInfo {
        name: "Robot24".to_string(),
        hardware_parameters: [("hw_start_duration_sec", start), ("hw_stop_duration_sec", stop)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        joints,
    }
}

fn drivetrain() -> Vec<JointInfo> {
    vec![
        wheel("left_wheel_joint"),
        wheel("right_wheel_joint"),
        arm("bucket_joint"),
    ]
}

/// Build a hardware interface plus observers for the robot and the pacer.
fn setup(info: &HardwareInfo) -> (SystemHardware, SimulatedRobot, RecordingPacer) {
    let robot = SimulatedRobot::from_info(info);
    let pacer = RecordingPacer::default();
    let hw = SystemHardware::with_pacer(Box::new(robot.clone()), Box::new(pacer.clone()));
    (hw, robot, pacer)
}

fn command_for(hw: &SystemHardware, joint: &str) -> CommandInterface {
    hw.export_command_interfaces()
        .into_iter()
        .find(|c| c.joint == joint)
        .expect("joint should export a command interface")
}

fn active(info: &HardwareInfo) -> (SystemHardware, SimulatedRobot, RecordingPacer) {
    let (mut hw, robot, pacer) = setup(info);
    hw.init(info).expect("init");
    hw.activate().expect("activate");
    (hw, robot, pacer)
}

// ─── Topology ───────────────────────────────────────────────────────

#[test]
fn valid_topology_initializes() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, _, _) = setup(&info);

    hw.init(&info).expect("valid topology should initialize");
    assert_eq!(hw.phase(), LifecyclePhase::Inactive);
    assert_eq!(hw.table().len(), 3);
}

#[test]
fn non_wheel_may_declare_unchecked_second_state() {
    let info = robot24_info(
        "0",
        "0",
        vec![JointInfo::new("bucket_joint", &["position"], &["position", "effort"])],
    );
    let (mut hw, _, _) = setup(&info);
    assert!(hw.init(&info).is_ok());
}

#[test]
fn two_command_interfaces_fail_init() {
    let mut joints = drivetrain();
    joints[2] = JointInfo::new("bucket_joint", &["position", "velocity"], &["position"]);
    let info = robot24_info("0", "0", joints);
    let (mut hw, _, _) = setup(&info);

    assert_eq!(
        hw.init(&info),
        Err(HwError::InterfaceCount {
            joint: "bucket_joint".to_string(),
            direction: InterfaceDirection::Command,
            expected: 1,
            found: 2,
        })
    );
    assert_eq!(hw.phase(), LifecyclePhase::Finalized);
    assert!(matches!(hw.activate(), Err(HwError::InvalidTransition { .. })));
}

#[test]
fn wheel_with_position_command_fails_init() {
    let info = robot24_info(
        "0",
        "0",
        vec![JointInfo::new("left_wheel_joint", &["position"], &["position", "velocity"])],
    );
    let (mut hw, _, _) = setup(&info);

    assert!(matches!(
        hw.init(&info),
        Err(HwError::InterfaceKind { ref joint, expected: InterfaceKind::Velocity, .. }) if joint == "left_wheel_joint"
    ));
}

#[test]
fn wheel_with_single_state_fails_init() {
    let info = robot24_info(
        "0",
        "0",
        vec![JointInfo::new("right_wheel_joint", &["velocity"], &["position"])],
    );
    let (mut hw, _, _) = setup(&info);

    assert!(matches!(
        hw.init(&info),
        Err(HwError::InterfaceCount { expected: 2, found: 1, direction: InterfaceDirection::State, .. })
    ));
}

#[test]
fn missing_duration_parameter_fails_init() {
    let mut info = robot24_info("1", "1", drivetrain());
    info.hardware_parameters.remove("hw_stop_duration_sec");
    let (mut hw, _, _) = setup(&info);

    assert_eq!(
        hw.init(&info),
        Err(HwError::Config(ConfigError::MissingParameter(
            "hw_stop_duration_sec".to_string()
        )))
    );
    assert_eq!(hw.phase(), LifecyclePhase::Finalized);
}

#[test]
fn non_numeric_duration_parameter_fails_init() {
    let info = robot24_info("two", "1", drivetrain());
    let (mut hw, _, _) = setup(&info);

    assert!(matches!(
        hw.init(&info),
        Err(HwError::Config(ConfigError::InvalidParameter { .. }))
    ));
}

// ─── Exported interfaces ────────────────────────────────────────────

#[test]
fn exported_interface_names() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, _, _) = setup(&info);
    assert!(hw.export_state_interfaces().is_empty());

    hw.init(&info).unwrap();

    let states: Vec<String> = hw.export_state_interfaces().iter().map(|s| s.name()).collect();
    assert_eq!(
        states,
        vec![
            "left_wheel_joint/position",
            "left_wheel_joint/velocity",
            "right_wheel_joint/position",
            "right_wheel_joint/velocity",
            "bucket_joint/position",
            "bucket_joint/velocity",
        ]
    );

    let commands: Vec<String> = hw.export_command_interfaces().iter().map(|c| c.name()).collect();
    assert_eq!(
        commands,
        vec![
            "left_wheel_joint/velocity",
            "right_wheel_joint/velocity",
            "bucket_joint/position",
        ]
    );
}

// ─── Activation ─────────────────────────────────────────────────────

#[test]
fn activation_seeds_unset_values() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, _, _) = setup(&info);
    hw.init(&info).unwrap();

    let bucket = command_for(&hw, "bucket_joint");
    hw.set_command(&bucket, 0.4).unwrap();

    hw.activate().unwrap();
    assert_eq!(hw.phase(), LifecyclePhase::Active);

    for state in hw.export_state_interfaces() {
        assert_eq!(hw.state(&state), Some(0.0), "{state} should be seeded");
    }
    assert_eq!(hw.command(&command_for(&hw, "left_wheel_joint")), Some(0.0));
    assert_eq!(hw.command(&command_for(&hw, "right_wheel_joint")), Some(0.0));
    // Already written before activation: left unchanged
    assert_eq!(hw.command(&bucket), Some(0.4));
}

#[test]
fn activation_paces_in_one_second_steps() {
    let info = robot24_info("3", "2.5", drivetrain());
    let (mut hw, _, pacer) = setup(&info);
    hw.init(&info).unwrap();

    hw.activate().unwrap();
    assert_eq!(pacer.count(), 3);

    hw.deactivate().unwrap();
    assert_eq!(pacer.count(), 6);
    assert!(pacer.steps.lock().unwrap().iter().all(|s| *s == Duration::from_secs(1)));
}

#[test]
fn activation_blocks_for_startup_duration() {
    let info = robot24_info("1", "0", vec![arm("bucket_joint")]);
    let mut hw = SystemHardware::new(Box::new(SimulatedRobot::from_info(&info)));
    hw.init(&info).unwrap();

    let start = Instant::now();
    hw.activate().unwrap();
    assert!(start.elapsed() >= Duration::from_secs(1));
}

#[test]
fn handles_resolved_once_per_activation() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, robot, _) = active(&info);
    assert_eq!(robot.lookups(), 3);

    for _ in 0..5 {
        hw.read().unwrap();
        hw.write().unwrap();
    }
    assert_eq!(robot.lookups(), 3);
}

#[test]
fn unresolvable_joint_fails_activation() {
    let info = robot24_info("0", "0", drivetrain());
    let robot = SimulatedRobot::new(["left_wheel_joint", "right_wheel_joint"]);
    let mut hw = SystemHardware::with_pacer(Box::new(robot), Box::new(RecordingPacer::default()));
    hw.init(&info).unwrap();

    assert!(matches!(
        hw.activate(),
        Err(HwError::DeviceUnreachable { ref joint, cause: Some(_) }) if joint == "bucket_joint"
    ));
    assert_eq!(hw.phase(), LifecyclePhase::Inactive);
}

// ─── Cyclic read/write ──────────────────────────────────────────────

#[test]
fn right_wheel_command_is_mirrored() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, robot, _) = active(&info);

    let right = command_for(&hw, "right_wheel_joint");
    hw.set_command(&right, 2.5).unwrap();
    hw.write().unwrap();

    let sent = robot.last_actuation("right_wheel_joint").unwrap();
    assert_eq!(sent.value, -2.5);
    assert_eq!(sent.duration_ticks, 1);

    let velocity = hw
        .export_state_interfaces()
        .into_iter()
        .find(|s| s.joint == "right_wheel_joint" && s.kind == InterfaceKind::Velocity)
        .unwrap();
    assert_eq!(hw.state(&velocity), Some(-2.5));
    assert_eq!(hw.command(&right), Some(2.5));
}

#[test]
fn left_wheel_command_passes_through() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, robot, _) = active(&info);

    let left = command_for(&hw, "left_wheel_joint");
    hw.set_command(&left, 2.5).unwrap();
    hw.write().unwrap();

    assert_eq!(robot.last_actuation("left_wheel_joint").unwrap().value, 2.5);
    assert_eq!(hw.table().velocity(left.index()), Some(2.5));
}

#[test]
fn repeated_writes_send_same_value() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, robot, _) = active(&info);

    let right = command_for(&hw, "right_wheel_joint");
    hw.set_command(&right, 1.25).unwrap();

    hw.write().unwrap();
    let first = robot.last_actuation("right_wheel_joint").unwrap().value;
    hw.write().unwrap();
    let second = robot.last_actuation("right_wheel_joint").unwrap().value;

    assert_eq!(first, -1.25);
    assert_eq!(second, first);
    assert_eq!(robot.actuation_count("right_wheel_joint"), 2);
}

#[test]
fn every_joint_actuated_each_cycle() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, robot, _) = active(&info);

    hw.write().unwrap();

    for joint in ["left_wheel_joint", "right_wheel_joint", "bucket_joint"] {
        assert_eq!(robot.actuation_count(joint), 1, "{joint}");
    }
    assert_eq!(robot.last_actuation("bucket_joint").unwrap().value, 0.0);
}

#[test]
fn read_does_not_change_table() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, _, _) = active(&info);
    let left = command_for(&hw, "left_wheel_joint");
    hw.set_command(&left, 0.7).unwrap();
    hw.write().unwrap();

    let before = hw.table().clone();
    hw.read().unwrap();
    assert_eq!(hw.table(), &before);
}

#[test]
fn actuation_failure_returned_per_cycle() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, robot, _) = active(&info);

    robot.inject_fault("left_wheel_joint", "motor controller offline");
    let err = hw.write().unwrap_err();
    assert!(matches!(err, HwError::Actuation { ref joint, .. } if joint == "left_wheel_joint"));
    // Remaining joints still driven
    assert_eq!(robot.actuation_count("right_wheel_joint"), 1);
    assert_eq!(hw.phase(), LifecyclePhase::Active);

    robot.clear_fault("left_wheel_joint");
    assert!(hw.write().is_ok());
}

#[test]
fn cycles_before_activation_report_unreachable() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, _, _) = setup(&info);
    hw.init(&info).unwrap();

    assert!(matches!(hw.read(), Err(HwError::DeviceUnreachable { .. })));
    assert!(matches!(hw.write(), Err(HwError::DeviceUnreachable { .. })));
}

// ─── Deactivation / shutdown ────────────────────────────────────────

#[test]
fn deactivation_leaves_table_untouched() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, _, _) = active(&info);
    let right = command_for(&hw, "right_wheel_joint");
    hw.set_command(&right, 3.0).unwrap();
    hw.write().unwrap();

    let before = hw.table().clone();
    hw.deactivate().unwrap();
    assert_eq!(hw.phase(), LifecyclePhase::Inactive);
    assert_eq!(hw.table(), &before);

    // Reactivation keeps values already set
    hw.activate().unwrap();
    assert_eq!(hw.command(&right), Some(3.0));
}

#[test]
fn shutdown_from_active_deactivates_first() {
    let info = robot24_info("0", "2", drivetrain());
    let (mut hw, _, pacer) = active(&info);

    hw.shutdown().unwrap();

    assert_eq!(pacer.count(), 2);
    assert_eq!(hw.phase(), LifecyclePhase::Finalized);
    assert!(hw.export_command_interfaces().is_empty());
    assert!(hw.table().is_empty());
}

#[test]
fn stale_interface_rejected_after_shutdown() {
    let info = robot24_info("0", "0", drivetrain());
    let (mut hw, _, _) = active(&info);
    let left = command_for(&hw, "left_wheel_joint");

    hw.shutdown().unwrap();
    assert!(matches!(
        hw.set_command(&left, 1.0),
        Err(HwError::UnknownInterface(_))
    ));
    assert_eq!(hw.command(&left), None);
}

// ─── From file ──────────────────────────────────────────────────────

#[test]
fn full_lifecycle_from_toml_description() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("robot24.toml");
    fs::write(
        &path,
        r#"
name = "Robot24"

[hardware_parameters]
hw_start_duration_sec = 1
hw_stop_duration_sec = 1

[[joints]]
name = "left_wheel_joint"
command_interfaces = [{ name = "velocity" }]
state_interfaces = [{ name = "position" }, { name = "velocity" }]

[[joints]]
name = "right_wheel_joint"
command_interfaces = [{ name = "velocity" }]
state_interfaces = [{ name = "position" }, { name = "velocity" }]
"#,
    )
    .unwrap();

    let info = HardwareInfo::load(&path).unwrap();
    let (mut hw, robot, pacer) = setup(&info);

    hw.init(&info).unwrap();
    hw.activate().unwrap();
    for command in hw.export_command_interfaces() {
        hw.set_command(&command, 0.5).unwrap();
    }
    hw.read().unwrap();
    hw.write().unwrap();
    hw.deactivate().unwrap();
    hw.shutdown().unwrap();

    assert_eq!(robot.last_actuation("left_wheel_joint").unwrap().value, 0.5);
    assert_eq!(robot.last_actuation("right_wheel_joint").unwrap().value, -0.5);
    assert_eq!(pacer.count(), 2);
}
