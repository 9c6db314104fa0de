//! Device documents and temporary files for tests.

use serde_json::{Value, json};
use tempfile::NamedTempFile;

/// Identifiers object for the given ids and classification.
#[must_use]
pub fn identifiers(vendor_id: u32, product_id: u32, is_keyboard: bool, is_pointing_device: bool) -> Value {
    json!({
        "vendor_id": vendor_id,
        "product_id": product_id,
        "is_keyboard": is_keyboard,
        "is_pointing_device": is_pointing_device,
    })
}

/// Apple internal keyboard.
#[must_use]
pub fn apple_keyboard() -> Value {
    json!({ "identifiers": identifiers(0x05ac, 0x0262, true, false) })
}

/// Third-party (Logitech) keyboard.
#[must_use]
pub fn generic_keyboard() -> Value {
    json!({ "identifiers": identifiers(0x046d, 0xc52b, true, false) })
}

/// Third-party mouse.
#[must_use]
pub fn mouse() -> Value {
    json!({ "identifiers": identifiers(0x046d, 0xc077, false, true) })
}

/// YubiKey presenting itself as a keyboard.
#[must_use]
pub fn security_token() -> Value {
    json!({ "identifiers": identifiers(0x1050, 0x0407, true, false) })
}

/// 2016 MacBook Pro Touch Bar.
#[must_use]
pub fn touch_bar() -> Value {
    json!({ "identifiers": identifiers(0x05ac, 0x8600, true, false) })
}

/// A fully specified device entry with an unknown key.
#[must_use]
pub fn full_device() -> Value {
    json!({
        "identifiers": identifiers(0x05ac, 0x0262, true, false),
        "ignore": false,
        "manipulate_caps_lock_led": false,
        "delay_milliseconds_before_open_device": 1500,
        "disable_built_in_keyboard_if_exists": true,
        "simple_modifications": [
            { "from": { "key_code": "caps_lock" }, "to": { "key_code": "left_control" } },
            { "from": { "key_code": "right_command" }, "to": { "key_code": "f13" } }
        ],
        "fn_function_keys": [
            { "from": { "key_code": "f1" }, "to": { "consumer_key_code": "display_brightness_decrement" } }
        ],
        "future_feature": 42
    })
}

/// Write `value` to a temporary `.json` file.
///
/// # Panics
///
/// Panics if the file cannot be created or written.
#[must_use]
pub fn write_json(value: &Value) -> NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .expect("Failed to create temp file");
    std::fs::write(file.path(), serde_json::to_vec_pretty(value).expect("serialize"))
        .expect("Failed to write temp file");
    file
}

/// Write raw text to a temporary file.
///
/// # Panics
///
/// Panics if the file cannot be created or written.
#[must_use]
pub fn write_text(text: &str) -> NamedTempFile {
    let file = NamedTempFile::new().expect("Failed to create temp file");
    std::fs::write(file.path(), text).expect("Failed to write temp file");
    file
}
