//! Output mode abstraction for robot and human output.

use serde::Serialize;
use serde_json::Value;

use crate::cli::Cli;
use crate::config::{DeviceList, DeviceProfile, SkippedDevice};
use crate::device::DeviceIdentifiers;
use crate::error::RpError;

mod human;
mod robot;

pub use human::HumanOutput;
pub use robot::RobotOutput;

/// Resolved settings of one device entry, as shown by `rp check`.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceSummary {
    pub identifiers: DeviceIdentifiers,
    pub is_apple: bool,
    pub ignore: bool,
    pub manipulate_caps_lock_led: bool,
    pub delay_milliseconds_before_open_device: i64,
    pub disable_built_in_keyboard_if_exists: bool,
    pub simple_modifications: usize,
    /// Fn-row rules with a non-empty target.
    pub fn_function_keys_assigned: usize,
}

impl From<&DeviceProfile> for DeviceSummary {
    fn from(device: &DeviceProfile) -> Self {
        Self {
            identifiers: *device.identifiers(),
            is_apple: device.identifiers().is_apple(),
            ignore: device.ignore(),
            manipulate_caps_lock_led: device.manipulate_caps_lock_led(),
            delay_milliseconds_before_open_device: device.delay_milliseconds_before_open_device(),
            disable_built_in_keyboard_if_exists: device.disable_built_in_keyboard_if_exists(),
            simple_modifications: device.simple_modifications().len(),
            fn_function_keys_assigned: device
                .fn_function_keys()
                .iter()
                .filter(|m| !m.is_unassigned())
                .count(),
        }
    }
}

/// Counts for a check run.
#[derive(Debug, Clone, Serialize)]
pub struct CheckSummary {
    pub total: usize,
    pub loaded: usize,
    pub skipped: usize,
}

/// Result of `rp check`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub path: String,
    pub valid: bool,
    pub devices: Vec<DeviceSummary>,
    pub skipped: Vec<SkippedDevice>,
    pub summary: CheckSummary,
}

impl CheckReport {
    #[must_use]
    pub fn new(path: impl Into<String>, devices: &DeviceList, skipped: Vec<SkippedDevice>) -> Self {
        let summary = CheckSummary {
            total: devices.len() + skipped.len(),
            loaded: devices.len(),
            skipped: skipped.len(),
        };
        Self {
            path: path.into(),
            valid: skipped.is_empty(),
            devices: devices.iter().map(DeviceSummary::from).collect(),
            skipped,
            summary,
        }
    }
}

/// Build and toolchain details for `rp version`.
#[derive(Debug, Clone, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub git_sha: &'static str,
    pub git_dirty: &'static str,
    pub build_timestamp: &'static str,
    pub rustc: &'static str,
    pub target: &'static str,
}

/// Output sink selected by the global CLI flags.
pub trait Output {
    /// Report an error (stderr).
    fn error(&self, error: &RpError);

    /// Report skipped entries as warnings (stderr).
    fn skipped(&self, skipped: &[SkippedDevice]);

    /// Show a check report.
    fn check_report(&self, report: &CheckReport);

    /// Print a JSON document (normalized devices, default rules).
    fn document(&self, document: &Value);

    /// Show version information.
    fn version(&self, info: &VersionInfo);
}

/// Pick the output implementation for the parsed CLI.
#[must_use]
pub fn for_cli(cli: &Cli) -> Box<dyn Output> {
    if cli.use_json() {
        Box::new(RobotOutput::new(cli.use_compact_json()))
    } else {
        Box::new(HumanOutput::new(!cli.no_color))
    }
}
