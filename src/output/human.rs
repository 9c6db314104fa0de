//! Human-readable terminal output.

use console::style;
use serde_json::Value;

use crate::config::SkippedDevice;
use crate::error::RpError;

use super::{CheckReport, DeviceSummary, Output, VersionInfo};

/// Styled text output for interactive use.
pub struct HumanOutput;

impl HumanOutput {
    /// Create the output; `color = false` disables styling on both streams.
    #[must_use]
    pub fn new(color: bool) -> Self {
        if !color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }
        Self
    }

    fn flag(value: bool) -> String {
        if value {
            style("yes").green().to_string()
        } else {
            style("no").dim().to_string()
        }
    }

    fn device_block(device: &DeviceSummary) {
        println!(
            "{} {}",
            style("device").bold(),
            style(device.identifiers.description()).cyan()
        );
        if device.is_apple {
            println!("  {:<34} {}", "made by apple", Self::flag(true));
        }
        println!("  {:<34} {}", "ignore", Self::flag(device.ignore));
        println!(
            "  {:<34} {}",
            "manipulate_caps_lock_led",
            Self::flag(device.manipulate_caps_lock_led)
        );
        println!(
            "  {:<34} {} ms",
            "delay before open", device.delay_milliseconds_before_open_device
        );
        println!(
            "  {:<34} {}",
            "disable_built_in_keyboard_if_exists",
            Self::flag(device.disable_built_in_keyboard_if_exists)
        );
        println!(
            "  {:<34} {}",
            "simple_modifications", device.simple_modifications
        );
        println!(
            "  {:<34} {} assigned",
            "fn_function_keys", device.fn_function_keys_assigned
        );
    }
}

impl Output for HumanOutput {
    fn error(&self, error: &RpError) {
        eprintln!("{} {error}", style("error:").red().bold());
        if let Some(hint) = error.suggestion() {
            eprintln!("  {} {hint}", style("hint:").yellow());
        }
    }

    fn skipped(&self, skipped: &[SkippedDevice]) {
        for entry in skipped {
            eprintln!(
                "{} skipped entry {}: {}",
                style("warning:").yellow().bold(),
                entry.index,
                entry.error
            );
        }
    }

    fn check_report(&self, report: &CheckReport) {
        for device in &report.devices {
            Self::device_block(device);
        }
        for entry in &report.skipped {
            println!(
                "{} entry {}: {}",
                style("skipped").yellow().bold(),
                entry.index,
                entry.error
            );
        }

        let verdict = if report.valid {
            style("OK").green().bold()
        } else {
            style("INVALID ENTRIES").red().bold()
        };
        println!(
            "{verdict} {}: {} loaded, {} skipped",
            report.path, report.summary.loaded, report.summary.skipped
        );
    }

    fn document(&self, document: &Value) {
        match serde_json::to_string_pretty(document) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("{} {e}", style("error:").red().bold()),
        }
    }

    fn version(&self, info: &VersionInfo) {
        println!("{} {}", style("rp").bold().cyan(), info.version);
        println!("  commit:  {} (dirty: {})", info.git_sha, info.git_dirty);
        println!("  built:   {}", info.build_timestamp);
        println!("  rustc:   {}", info.rustc);
        println!("  target:  {}", info.target);
    }
}
