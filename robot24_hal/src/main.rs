//! # Robot24 HAL Bench Binary
//!
//! Loads a hardware description, validates it and optionally drives the
//! full lifecycle against the simulated robot.
//!
//! # Usage
//!
//! ```bash
//! # Validate a description and list exported interfaces
//! robot24_hal --config config/robot24.toml check
//!
//! # Run 500 cycles at 50 Hz with fixed wheel commands
//! robot24_hal --config config/robot24.toml run --cycles 500 \
//!     --command left_wheel_joint=1.0 --command right_wheel_joint=1.0
//!
//! # Verbose logging (per-joint write traces)
//! robot24_hal --config config/robot24.toml -v run
//! ```

#![deny(warnings)]

use clap::{Parser, Subcommand};
use robot24_common::config::ConfigLoader;
use robot24_common::hal::types::HardwareInfo;
use robot24_hal::devices::SimulatedRobot;
use robot24_hal::system::SystemHardware;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use tracing::{error, info, warn, Level};
use tracing_subscriber::EnvFilter;

/// Robot24 HAL - system hardware interface bench
#[derive(Parser, Debug)]
#[command(name = "robot24_hal")]
#[command(author = "Osprey Robotics")]
#[command(version)]
#[command(about = "Validate and exercise the Robot24 system hardware interface")]
#[command(long_about = None)]
struct Args {
    /// Path to the hardware description (TOML).
    #[arg(short, long, default_value = "robot24.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the description and print the exported interfaces
    Check,

    /// Drive init / activate / read-write cycles / deactivate against the simulated robot
    Run {
        /// Number of cycles to run (0 = until Ctrl-C)
        #[arg(long, default_value_t = 0)]
        cycles: u64,

        /// Control loop rate in Hz
        #[arg(long, default_value_t = 50.0)]
        rate_hz: f64,

        /// Fixed command as JOINT=VALUE (can be specified multiple times)
        #[arg(long = "command", value_name = "JOINT=VALUE", action = clap::ArgAction::Append)]
        commands: Vec<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = run() {
        error!("robot24_hal failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    setup_tracing(&args);

    info!("Robot24 HAL v{} starting...", env!("CARGO_PKG_VERSION"));
    let hw_info = HardwareInfo::load(&args.config)
        .map_err(|e| format!("Failed to load {}: {}", args.config.display(), e))?;

    match args.command {
        Command::Check => check(&hw_info),
        Command::Run {
            cycles,
            rate_hz,
            commands,
        } => run_cycles(&hw_info, cycles, rate_hz, &commands),
    }
}

fn check(hw_info: &HardwareInfo) -> Result<(), Box<dyn std::error::Error>> {
    let mut hw = SystemHardware::new(Box::new(SimulatedRobot::from_info(hw_info)));
    hw.init(hw_info)?;

    println!("{}: {} joints OK", hw_info.name, hw.joints().len());
    for state in hw.export_state_interfaces() {
        println!("  state   {}", state);
    }
    for command in hw.export_command_interfaces() {
        println!("  command {}", command);
    }

    hw.shutdown()?;
    Ok(())
}

fn run_cycles(
    hw_info: &HardwareInfo,
    cycles: u64,
    rate_hz: f64,
    commands: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let period = cycle_period(rate_hz)?;

    let robot = SimulatedRobot::from_info(hw_info);
    let observer = robot.clone();
    let mut hw = SystemHardware::new(Box::new(robot));

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        flag.store(false, Ordering::SeqCst);
    })?;

    info!("Driving '{}' on the {} device", hw_info.name, hw.device_name());
    hw.init(hw_info)?;
    hw.activate()?;

    let exported = hw.export_command_interfaces();
    for spec in commands {
        let (joint, value) = parse_command(spec)?;
        let interface = exported
            .iter()
            .find(|c| c.joint == joint)
            .ok_or_else(|| format!("No command interface for joint '{joint}'"))?;
        hw.set_command(interface, value)?;
        info!("Command {} = {}", interface, value);
    }

    if cycles == 0 {
        info!("Running at {:.1} Hz until Ctrl-C...", rate_hz);
    } else {
        info!("Running {} cycles at {:.1} Hz...", cycles, rate_hz);
    }
    let mut count = 0u64;
    let mut failed = 0u64;
    while running.load(Ordering::SeqCst) && (cycles == 0 || count < cycles) {
        let cycle_start = Instant::now();

        if let Err(e) = hw.read().and_then(|()| hw.write()) {
            failed += 1;
            if failed <= 10 || failed % 1000 == 0 {
                warn!("Cycle {} failed: {}", count, e);
            }
        }
        count += 1;

        let elapsed = cycle_start.elapsed();
        if elapsed < period {
            std::thread::sleep(period - elapsed);
        }
    }

    info!("Stopped after {} cycles ({} failed)", count, failed);
    for joint in hw.joints() {
        let last = observer
            .last_actuation(&joint.name)
            .map_or_else(|| "-".to_string(), |a| format!("{:.5}", a.value));
        info!(
            "  {}: {} actuations, last {}",
            joint.name,
            observer.actuation_count(&joint.name),
            last
        );
    }

    hw.shutdown()?;
    info!("Robot24 HAL shutdown complete");
    Ok(())
}

/// Control loop period for `rate_hz`.
fn cycle_period(rate_hz: f64) -> Result<Duration, String> {
    if !(rate_hz.is_finite() && rate_hz > 0.0) {
        return Err(format!("rate must be a positive number of Hz, got {rate_hz}"));
    }
    Duration::try_from_secs_f64(1.0 / rate_hz)
        .map_err(|e| format!("rate of {rate_hz} Hz gives an unusable cycle period: {e}"))
}

/// Parse `JOINT=VALUE`.
fn parse_command(spec: &str) -> Result<(&str, f64), String> {
    let (joint, value) = spec
        .split_once('=')
        .ok_or_else(|| format!("Expected JOINT=VALUE, got '{spec}'"))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("Invalid command value in '{spec}': {e}"))?;
    Ok((joint.trim(), value))
}

/// Setup tracing subscriber based on CLI arguments.
fn setup_tracing(args: &Args) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_period() {
        assert_eq!(cycle_period(4.0), Ok(Duration::from_millis(250)));
        assert!(cycle_period(0.0).is_err());
        assert!(cycle_period(-5.0).is_err());
        assert!(cycle_period(f64::NAN).is_err());
    }

    #[test]
    fn test_tiny_rate_rejected_instead_of_overflowing() {
        assert!(cycle_period(1e-20).is_err());
    }

    #[test]
    fn test_parse_command() {
        assert_eq!(parse_command("left_wheel_joint=1.5"), Ok(("left_wheel_joint", 1.5)));
        assert_eq!(parse_command(" bucket_joint = -0.25 "), Ok(("bucket_joint", -0.25)));
        assert!(parse_command("bucket_joint").is_err());
        assert!(parse_command("bucket_joint=up").is_err());
    }
}
