//! Robot mode JSON output implementation.

use serde::Serialize;
use tracing::{debug, error, instrument, trace};

use crate::config::SkippedDevice;
use crate::error::RpError;

use super::{CheckReport, Output, VersionInfo};

/// JSON output for scripts: results on stdout, diagnostics on stderr.
pub struct RobotOutput {
    compact: bool,
}

impl RobotOutput {
    #[must_use]
    pub const fn new(compact: bool) -> Self {
        Self { compact }
    }

    fn render<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        let rendered = if self.compact {
            serde_json::to_string(data)
        } else {
            serde_json::to_string_pretty(data)
        };
        match rendered {
            Ok(json) => {
                trace!(json_len = json.len(), "JSON serialized");
                Some(json)
            }
            Err(e) => {
                error!(error = %e, "Failed to serialize output");
                None
            }
        }
    }

    fn output_json<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            println!("{json}");
        }
    }

    fn output_json_stderr<T: Serialize + ?Sized>(&self, data: &T) {
        if let Some(json) = self.render(data) {
            eprintln!("{json}");
        }
    }
}

impl Output for RobotOutput {
    #[instrument(skip(self))]
    fn error(&self, error: &RpError) {
        debug!(error = %error, "Robot: error");
        self.output_json_stderr(&serde_json::json!({
            "error": true,
            "message": error.to_string(),
            "suggestion": error.suggestion(),
            "recoverable": error.is_user_recoverable(),
        }));
    }

    fn skipped(&self, skipped: &[SkippedDevice]) {
        if skipped.is_empty() {
            return;
        }
        debug!(count = skipped.len(), "Robot: skipped");
        self.output_json_stderr(&serde_json::json!({
            "warning": true,
            "skipped": skipped,
        }));
    }

    #[instrument(skip(self, report), fields(path = %report.path))]
    fn check_report(&self, report: &CheckReport) {
        self.output_json(report);
    }

    fn document(&self, document: &serde_json::Value) {
        self.output_json(document);
    }

    fn version(&self, info: &VersionInfo) {
        self.output_json(info);
    }
}
