//! The `devices` array of a profile.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use super::device_profile::{DeviceProfile, KEY_IDENTIFIERS};
use crate::device::DeviceIdentifiers;
use crate::error::{SchemaError, SchemaResult};

/// What to do when one device entry fails to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoadPolicy {
    /// Fail the whole load (default).
    #[default]
    Abort,
    /// Drop the entry and keep going.
    Skip,
}

/// A device entry dropped under [`LoadPolicy::Skip`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedDevice {
    /// Position of the entry in the input array.
    pub index: usize,
    /// Why it was dropped.
    pub error: String,
}

/// Ordered collection of [`DeviceProfile`]s.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceList {
    devices: Vec<DeviceProfile>,
}

impl DeviceList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of device objects.
    ///
    /// Under [`LoadPolicy::Abort`] the first invalid entry fails the load
    /// with its error wrapped as `devices[<index>]`.
    pub fn from_json(json: &Value, policy: LoadPolicy) -> SchemaResult<(Self, Vec<SkippedDevice>)> {
        let entries = json
            .as_array()
            .ok_or_else(|| SchemaError::not_an_array(json))?;

        let mut devices = Vec::with_capacity(entries.len());
        let mut skipped = Vec::new();

        for (index, entry) in entries.iter().enumerate() {
            match DeviceProfile::from_json(entry) {
                Ok(device) => devices.push(device),
                Err(e) => {
                    let e = e.within(format!("devices[{index}]"));
                    match policy {
                        LoadPolicy::Abort => return Err(e),
                        LoadPolicy::Skip => {
                            warn!(index, error = %e, "Skipping invalid device entry");
                            skipped.push(SkippedDevice {
                                index,
                                error: e.to_string(),
                            });
                        }
                    }
                }
            }
        }

        info!(
            loaded = devices.len(),
            skipped = skipped.len(),
            "Loaded device profiles"
        );
        Ok((Self { devices }, skipped))
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.devices.iter().map(DeviceProfile::to_json).collect())
    }

    pub fn find(&self, identifiers: &DeviceIdentifiers) -> Option<&DeviceProfile> {
        self.devices
            .iter()
            .find(|d| d.identifiers() == identifiers)
    }

    pub fn find_mut(&mut self, identifiers: &DeviceIdentifiers) -> Option<&mut DeviceProfile> {
        self.devices
            .iter_mut()
            .find(|d| d.identifiers() == identifiers)
    }

    /// Return the entry for `identifiers`, adding one with default settings if absent.
    pub fn ensure(&mut self, identifiers: &DeviceIdentifiers) -> SchemaResult<&mut DeviceProfile> {
        let position = match self
            .devices
            .iter()
            .position(|d| d.identifiers() == identifiers)
        {
            Some(position) => position,
            None => {
                let device = DeviceProfile::from_json(&seed_document(identifiers))?;
                self.devices.push(device);
                self.devices.len() - 1
            }
        };
        Ok(&mut self.devices[position])
    }

    pub fn push(&mut self, device: DeviceProfile) {
        self.devices.push(device);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DeviceProfile> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

/// The `{"identifiers": ...}` document a fresh entry is built from.
fn seed_document(identifiers: &DeviceIdentifiers) -> Value {
    let mut object = Map::new();
    object.insert(KEY_IDENTIFIERS.to_string(), identifiers.to_json());
    Value::Object(object)
}

impl<'a> IntoIterator for &'a DeviceList {
    type Item = &'a DeviceProfile;
    type IntoIter = std::slice::Iter<'a, DeviceProfile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
