//! Per-device customization profile.
//!
//! A [`DeviceProfile`] is read from one entry of a profile's `devices` array.
//! Recognised keys are extracted into typed fields; every other key stays in
//! the retained document and is written back untouched by
//! [`DeviceProfile::to_json`].
//!
//! # Example JSON
//!
//! ```json
//! {
//!     "identifiers": { "vendor_id": 1452, "product_id": 610, "is_keyboard": true, "is_pointing_device": false },
//!     "ignore": false,
//!     "manipulate_caps_lock_led": true,
//!     "delay_milliseconds_before_open_device": 3000,
//!     "disable_built_in_keyboard_if_exists": false,
//!     "simple_modifications": [
//!         { "from": { "key_code": "caps_lock" }, "to": { "key_code": "left_control" } }
//!     ],
//!     "fn_function_keys": []
//! }
//! ```

use std::time::Duration;

use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use tracing::{debug, instrument, trace, warn};

use super::key_mapping::{KeyMapping, KeyMappingList};
use crate::device::{DeviceIdentifiers, ProductId, VendorId};
use crate::error::{SchemaError, SchemaResult};

pub const KEY_IDENTIFIERS: &str = "identifiers";
pub const KEY_IGNORE: &str = "ignore";
pub const KEY_MANIPULATE_CAPS_LOCK_LED: &str = "manipulate_caps_lock_led";
pub const KEY_DELAY_BEFORE_OPEN: &str = "delay_milliseconds_before_open_device";
pub const KEY_DISABLE_BUILT_IN_KEYBOARD: &str = "disable_built_in_keyboard_if_exists";
pub const KEY_SIMPLE_MODIFICATIONS: &str = "simple_modifications";
pub const KEY_FN_FUNCTION_KEYS: &str = "fn_function_keys";

/// Delay applied before a newly attached device is opened.
pub const DEFAULT_DELAY_MILLISECONDS: i64 = 3000;

/// Customization profile of one physical input device.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceProfile {
    json: Map<String, Value>,
    identifiers: DeviceIdentifiers,
    ignore: bool,
    manipulate_caps_lock_led: bool,
    delay_milliseconds_before_open_device: i64,
    disable_built_in_keyboard_if_exists: bool,
    simple_modifications: KeyMappingList,
    fn_function_keys: KeyMappingList,
}

/// Keys whose presence suppresses an identity-based default.
#[derive(Debug, Default)]
struct Configured {
    ignore: bool,
    manipulate_caps_lock_led: bool,
}

impl DeviceProfile {
    /// Build a profile from one device JSON object.
    ///
    /// The whole object is scanned before identity-based defaults are
    /// resolved, so the result does not depend on key order.
    #[instrument(level = "trace", skip_all)]
    pub fn from_json(json: &Value) -> SchemaResult<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| SchemaError::not_an_object(json))?;

        let mut identifiers = None;
        let mut ignore = false;
        let mut manipulate_caps_lock_led = false;
        let mut delay_milliseconds_before_open_device = DEFAULT_DELAY_MILLISECONDS;
        let mut disable_built_in_keyboard_if_exists = false;
        let mut simple_modifications = KeyMappingList::new();
        let mut fn_function_keys = default_fn_function_keys();
        let mut configured = Configured::default();

        for (key, value) in object {
            trace!(key = %key, "Reading device key");
            match key.as_str() {
                KEY_IDENTIFIERS => {
                    identifiers =
                        Some(DeviceIdentifiers::parse(value).map_err(|e| e.within(key.as_str()))?);
                }
                KEY_IGNORE => {
                    ignore = require_bool(key, value)?;
                    configured.ignore = true;
                }
                KEY_MANIPULATE_CAPS_LOCK_LED => {
                    manipulate_caps_lock_led = require_bool(key, value)?;
                    configured.manipulate_caps_lock_led = true;
                }
                KEY_DELAY_BEFORE_OPEN => {
                    delay_milliseconds_before_open_device = require_milliseconds(key, value)?;
                }
                KEY_DISABLE_BUILT_IN_KEYBOARD => {
                    disable_built_in_keyboard_if_exists = require_bool(key, value)?;
                }
                KEY_SIMPLE_MODIFICATIONS => {
                    simple_modifications
                        .update(value)
                        .map_err(|e| e.within(key.as_str()))?;
                }
                KEY_FN_FUNCTION_KEYS => {
                    fn_function_keys
                        .update(value)
                        .map_err(|e| e.within(key.as_str()))?;
                }
                _ => trace!(key = %key, "Keeping unknown device key"),
            }
        }

        let identifiers = identifiers.ok_or_else(|| SchemaError::missing(KEY_IDENTIFIERS))?;

        if !configured.ignore {
            if let Some(reason) = default_ignore_reason(&identifiers) {
                debug!(identifiers = %identifiers.description(), reason, "Ignoring device by default");
                ignore = true;
            }
        }

        if !configured.manipulate_caps_lock_led
            && identifiers.is_keyboard()
            && identifiers.is_apple()
        {
            debug!(identifiers = %identifiers.description(), "Manipulating caps lock LED by default");
            manipulate_caps_lock_led = true;
        }

        Ok(Self {
            json: object.clone(),
            identifiers,
            ignore,
            manipulate_caps_lock_led,
            delay_milliseconds_before_open_device,
            disable_built_in_keyboard_if_exists,
            simple_modifications,
            fn_function_keys,
        })
    }

    /// Serialize to JSON.
    ///
    /// Starts from the document this profile was read from and overwrites
    /// the recognised keys with current values. Every other key is copied
    /// through unchanged.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = self.json.clone();
        object.insert(KEY_IDENTIFIERS.to_string(), self.identifiers.to_json());
        object.insert(KEY_IGNORE.to_string(), Value::Bool(self.ignore));
        object.insert(
            KEY_MANIPULATE_CAPS_LOCK_LED.to_string(),
            Value::Bool(self.manipulate_caps_lock_led),
        );
        object.insert(
            KEY_DELAY_BEFORE_OPEN.to_string(),
            Value::from(self.delay_milliseconds_before_open_device),
        );
        object.insert(
            KEY_DISABLE_BUILT_IN_KEYBOARD.to_string(),
            Value::Bool(self.disable_built_in_keyboard_if_exists),
        );
        object.insert(
            KEY_SIMPLE_MODIFICATIONS.to_string(),
            self.simple_modifications.to_json(),
        );
        object.insert(
            KEY_FN_FUNCTION_KEYS.to_string(),
            self.fn_function_keys.to_json(),
        );
        Value::Object(object)
    }

    /// The document this profile was read from, unmodified.
    pub const fn raw_json(&self) -> &Map<String, Value> {
        &self.json
    }

    pub const fn identifiers(&self) -> &DeviceIdentifiers {
        &self.identifiers
    }

    pub const fn ignore(&self) -> bool {
        self.ignore
    }

    pub fn set_ignore(&mut self, value: bool) {
        self.ignore = value;
    }

    pub const fn manipulate_caps_lock_led(&self) -> bool {
        self.manipulate_caps_lock_led
    }

    pub fn set_manipulate_caps_lock_led(&mut self, value: bool) {
        self.manipulate_caps_lock_led = value;
    }

    /// Stored delay in milliseconds. May be negative if the document said so.
    pub const fn delay_milliseconds_before_open_device(&self) -> i64 {
        self.delay_milliseconds_before_open_device
    }

    pub fn set_delay_milliseconds_before_open_device(&mut self, value: i64) {
        self.delay_milliseconds_before_open_device = value;
    }

    /// The delay as a [`Duration`], with negative values treated as zero.
    pub fn delay_before_open(&self) -> Duration {
        u64::try_from(self.delay_milliseconds_before_open_device)
            .map_or(Duration::ZERO, Duration::from_millis)
    }

    pub const fn disable_built_in_keyboard_if_exists(&self) -> bool {
        self.disable_built_in_keyboard_if_exists
    }

    pub fn set_disable_built_in_keyboard_if_exists(&mut self, value: bool) {
        self.disable_built_in_keyboard_if_exists = value;
    }

    pub const fn simple_modifications(&self) -> &KeyMappingList {
        &self.simple_modifications
    }

    pub fn simple_modifications_mut(&mut self) -> &mut KeyMappingList {
        &mut self.simple_modifications
    }

    pub fn set_simple_modifications(&mut self, value: KeyMappingList) {
        self.simple_modifications = value;
    }

    pub const fn fn_function_keys(&self) -> &KeyMappingList {
        &self.fn_function_keys
    }

    pub fn fn_function_keys_mut(&mut self) -> &mut KeyMappingList {
        &mut self.fn_function_keys
    }

    pub fn set_fn_function_keys(&mut self, value: KeyMappingList) {
        self.fn_function_keys = value;
    }
}

impl Serialize for DeviceProfile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

impl TryFrom<&Value> for DeviceProfile {
    type Error = SchemaError;

    fn try_from(json: &Value) -> SchemaResult<Self> {
        Self::from_json(json)
    }
}

/// The twelve Fn-row rules `f1`..`f12`, each with an empty target.
#[must_use]
pub fn default_fn_function_keys() -> KeyMappingList {
    (1..=12)
        .map(|i| KeyMapping::unassigned_key_code(&format!("f{i}")))
        .collect()
}

/// Why a device with no explicit `ignore` is ignored, if it is.
fn default_ignore_reason(identifiers: &DeviceIdentifiers) -> Option<&'static str> {
    if identifiers.is_pointing_device() {
        Some("pointing device")
    } else if identifiers.vendor_id() == VendorId::APPLE
        && identifiers.product_id() == ProductId::TOUCH_BAR_2016
    {
        Some("touch bar")
    } else if identifiers.vendor_id() == VendorId::YUBICO {
        Some("security token")
    } else {
        None
    }
}

fn require_bool(key: &str, value: &Value) -> SchemaResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| SchemaError::wrong_type(key, "boolean", value))
}

/// Accept any JSON number, truncating toward zero and saturating at the `i64` range.
#[allow(clippy::cast_possible_truncation)]
fn require_milliseconds(key: &str, value: &Value) -> SchemaResult<i64> {
    let Value::Number(number) = value else {
        return Err(SchemaError::wrong_type(key, "number", value));
    };

    let millis = if let Some(n) = number.as_i64() {
        n
    } else if let Some(n) = number.as_u64() {
        i64::try_from(n).unwrap_or(i64::MAX)
    } else {
        let f = number.as_f64().unwrap_or_default();
        if f.fract() != 0.0 {
            warn!(key = %key, value = f, "Truncating fractional delay");
        }
        f as i64
    };

    if millis < 0 {
        warn!(key = %key, millis, "Negative delay kept as-is");
    }
    Ok(millis)
}
