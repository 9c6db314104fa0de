//! Identity of a physical input device.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use tracing::trace;

use crate::error::{SchemaError, SchemaResult};

/// USB vendor id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct VendorId(pub u32);

/// USB product id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl VendorId {
    /// Apple Inc.
    pub const APPLE: Self = Self(0x05ac);
    /// Apple's Bluetooth SIG company identifier.
    pub const APPLE_BLUETOOTH: Self = Self(0x004c);
    /// Yubico.
    pub const YUBICO: Self = Self(0x1050);
}

impl ProductId {
    /// Touch Bar of the 2016 MacBook Pro.
    pub const TOUCH_BAR_2016: Self = Self(0x8600);
}

impl fmt::Display for VendorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:04x}", self.0)
    }
}

/// Vendor/product ids plus the keyboard and pointing-device classification
/// used to match a configuration entry to hardware.
///
/// JSON form:
///
/// ```json
/// { "vendor_id": 1452, "product_id": 610, "is_keyboard": true, "is_pointing_device": false }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct DeviceIdentifiers {
    vendor_id: VendorId,
    product_id: ProductId,
    is_keyboard: bool,
    is_pointing_device: bool,
}

impl DeviceIdentifiers {
    #[must_use]
    pub const fn new(
        vendor_id: VendorId,
        product_id: ProductId,
        is_keyboard: bool,
        is_pointing_device: bool,
    ) -> Self {
        Self {
            vendor_id,
            product_id,
            is_keyboard,
            is_pointing_device,
        }
    }

    /// Parse identifiers from a JSON object.
    ///
    /// Absent keys keep their zero/false defaults; unknown keys are ignored.
    pub fn parse(json: &Value) -> SchemaResult<Self> {
        let object = json
            .as_object()
            .ok_or_else(|| SchemaError::not_an_object(json))?;

        let mut identifiers = Self::default();
        for (key, value) in object {
            trace!(key = %key, "Reading identifiers key");
            match key.as_str() {
                "vendor_id" => identifiers.vendor_id = VendorId(parse_id(key, value)?),
                "product_id" => identifiers.product_id = ProductId(parse_id(key, value)?),
                "is_keyboard" => identifiers.is_keyboard = parse_bool(key, value)?,
                "is_pointing_device" => identifiers.is_pointing_device = parse_bool(key, value)?,
                _ => {}
            }
        }

        Ok(identifiers)
    }

    /// Serialize to the JSON object form, always emitting all four keys.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "vendor_id": self.vendor_id.0,
            "product_id": self.product_id.0,
            "is_keyboard": self.is_keyboard,
            "is_pointing_device": self.is_pointing_device,
        })
    }

    pub const fn vendor_id(&self) -> VendorId {
        self.vendor_id
    }

    pub const fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub const fn is_keyboard(&self) -> bool {
        self.is_keyboard
    }

    pub const fn is_pointing_device(&self) -> bool {
        self.is_pointing_device
    }

    /// Returns true if the device was made by Apple.
    pub const fn is_apple(&self) -> bool {
        self.vendor_id.0 == VendorId::APPLE.0 || self.vendor_id.0 == VendorId::APPLE_BLUETOOTH.0
    }

    /// Human-readable one-line summary, e.g. `0x05ac:0x0262 keyboard`.
    #[must_use]
    pub fn description(&self) -> String {
        let kind = match (self.is_keyboard, self.is_pointing_device) {
            (true, true) => "keyboard+pointing",
            (true, false) => "keyboard",
            (false, true) => "pointing",
            (false, false) => "other",
        };
        format!("{}:{} {kind}", self.vendor_id, self.product_id)
    }
}

fn parse_id(key: &str, value: &Value) -> SchemaResult<u32> {
    value
        .as_u64()
        .and_then(|id| u32::try_from(id).ok())
        .ok_or_else(|| SchemaError::wrong_type(key, "unsigned 32-bit integer", value))
}

fn parse_bool(key: &str, value: &Value) -> SchemaResult<bool> {
    value
        .as_bool()
        .ok_or_else(|| SchemaError::wrong_type(key, "boolean", value))
}
