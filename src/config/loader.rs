//! Reading device profile documents from disk for the CLI.
//!
//! The profile types themselves never touch the filesystem; this module only
//! turns a file into a `serde_json::Value` and decides how to interpret it.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, instrument};

use super::device_profile::DeviceProfile;
use super::devices::{DeviceList, LoadPolicy, SkippedDevice};
use crate::error::{Result, RpError};

/// Read and parse a JSON file, keeping key order.
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The content is not valid JSON
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    info!("Reading profile document");

    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            RpError::ConfigNotFound {
                path: path.display().to_string(),
            }
        } else {
            RpError::Io(e)
        }
    })?;
    debug!(bytes = content.len(), "Read document");

    serde_json::from_str(&content)
        .map_err(|e| RpError::ConfigParse(format!("Invalid JSON in '{}': {e}", path.display())))
}

/// Interpret a document as either one device object or an array of them.
///
/// A single object is loaded as a one-element list; its failure is reported
/// without an index prefix regardless of `policy`.
pub fn load_devices(document: &Value, policy: LoadPolicy) -> Result<(DeviceList, Vec<SkippedDevice>)> {
    match document {
        Value::Array(_) => Ok(DeviceList::from_json(document, policy)?),
        Value::Object(_) => {
            let mut list = DeviceList::new();
            list.push(DeviceProfile::from_json(document)?);
            Ok((list, Vec::new()))
        }
        other => Err(RpError::ConfigParse(format!(
            "Expected a device object or an array of devices, got `{other}`"
        ))),
    }
}
