//! Integration tests for the devices array.

use rp::config::{DeviceList, LoadPolicy, load_devices};
use rp::device::DeviceIdentifiers;
use rp::error::{RpError, SchemaError};
use serde_json::json;

use crate::common::fixtures::{apple_keyboard, full_device, mouse, security_token};

#[test]
fn test_load_all_valid() {
    let input = json!([apple_keyboard(), mouse(), security_token()]);
    let (list, skipped) = DeviceList::from_json(&input, LoadPolicy::Abort).unwrap();

    assert_eq!(list.len(), 3);
    assert!(skipped.is_empty());
    let ignored: Vec<_> = list.iter().map(|d| d.ignore()).collect();
    assert_eq!(ignored, [false, true, true]);
}

#[test]
fn test_abort_names_entry() {
    let input = json!([apple_keyboard(), {"identifiers": {"is_keyboard": "yes"}}]);
    let err = DeviceList::from_json(&input, LoadPolicy::Abort).unwrap_err();

    assert_eq!(
        err.to_string(),
        "`devices[1]` error: `identifiers` error: `is_keyboard` must be boolean, but is `\"yes\"`"
    );
}

#[test]
fn test_skip_keeps_valid_entries_in_order() {
    let input = json!([mouse(), [], full_device(), {"identifiers": {}, "ignore": 0}]);
    let (list, skipped) = DeviceList::from_json(&input, LoadPolicy::Skip).unwrap();

    assert_eq!(list.len(), 2);
    assert!(list.iter().next().unwrap().ignore());
    assert!(list.iter().nth(1).unwrap().disable_built_in_keyboard_if_exists());

    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0].index, 1);
    assert!(skipped[0].error.contains("json must be object"));
    assert_eq!(skipped[1].index, 3);
    assert!(skipped[1].error.contains("`ignore` must be boolean"));
}

#[test]
fn test_round_trip_preserves_unknown_keys_per_entry() {
    let input = json!([full_device(), mouse()]);
    let (list, _) = DeviceList::from_json(&input, LoadPolicy::Abort).unwrap();
    let output = list.to_json();

    assert_eq!(output[0]["future_feature"], json!(42));
    assert!(output[1].get("future_feature").is_none());
}

#[test]
fn test_find_by_identifiers() {
    let (list, _) = DeviceList::from_json(&json!([apple_keyboard(), mouse()]), LoadPolicy::Abort)
        .unwrap();
    let wanted = DeviceIdentifiers::parse(&mouse()["identifiers"]).unwrap();

    assert!(list.find(&wanted).unwrap().identifiers().is_pointing_device());
    assert!(list.find(&DeviceIdentifiers::default()).is_none());
}

#[test]
fn test_load_devices_single_object() {
    let (list, skipped) = load_devices(&full_device(), LoadPolicy::Skip).unwrap();
    assert_eq!(list.len(), 1);
    assert!(skipped.is_empty());
}

#[test]
fn test_load_devices_single_invalid_object_is_not_skipped() {
    let err = load_devices(&json!({"ignore": true}), LoadPolicy::Skip).unwrap_err();
    assert!(matches!(err, RpError::Schema(SchemaError::MissingField { .. })));
}
