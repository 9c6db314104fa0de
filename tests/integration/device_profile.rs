//! Integration tests for `DeviceProfile`.

use rp::config::{DeviceProfile, KeyMapping, KeyMappingList, default_fn_function_keys};
use rp::device::{ProductId, VendorId};
use rp::error::SchemaError;
use serde_json::{Value, json};

use crate::common::fixtures::{
    apple_keyboard, full_device, generic_keyboard, identifiers, mouse, security_token, touch_bar,
};
use crate::common::init_test_logging;

fn load(value: &Value) -> DeviceProfile {
    init_test_logging();
    DeviceProfile::from_json(value).unwrap()
}

fn with(mut base: Value, key: &str, value: Value) -> Value {
    base.as_object_mut().unwrap().insert(key.to_string(), value);
    base
}

/// Typed field values, for comparing two profiles regardless of raw documents.
fn typed_fields(profile: &DeviceProfile) -> (Value, bool, bool, i64, bool, Value, Value) {
    (
        profile.identifiers().to_json(),
        profile.ignore(),
        profile.manipulate_caps_lock_led(),
        profile.delay_milliseconds_before_open_device(),
        profile.disable_built_in_keyboard_if_exists(),
        profile.simple_modifications().to_json(),
        profile.fn_function_keys().to_json(),
    )
}

// ===== Round trip =====

#[test]
fn test_round_trip_keeps_typed_fields() {
    for input in [full_device(), apple_keyboard(), mouse(), security_token(), touch_bar()] {
        let first = load(&input);
        let second = load(&first.to_json());
        assert_eq!(typed_fields(&first), typed_fields(&second), "input {input}");
    }
}

#[test]
fn test_round_trip_after_mutation() {
    let mut profile = load(&generic_keyboard());
    profile.set_ignore(true);
    profile.set_manipulate_caps_lock_led(true);
    profile.set_delay_milliseconds_before_open_device(250);
    profile.set_disable_built_in_keyboard_if_exists(true);
    profile
        .simple_modifications_mut()
        .upsert(KeyMapping::key_code("caps_lock", "escape"));

    let reloaded = load(&profile.to_json());
    assert_eq!(typed_fields(&profile), typed_fields(&reloaded));
}

#[test]
fn test_round_trip_after_remapping_existing_source() {
    let mut profile = load(&full_device());
    profile
        .simple_modifications_mut()
        .upsert(KeyMapping::key_code("caps_lock", "escape"));

    let rules = profile.simple_modifications();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules.get(0).unwrap().to()["key_code"], json!("escape"));

    let reloaded = load(&profile.to_json());
    assert_eq!(reloaded.simple_modifications(), profile.simple_modifications());
    assert_eq!(typed_fields(&profile), typed_fields(&reloaded));
}

#[test]
fn test_serialized_form_of_defaults() {
    let output = load(&generic_keyboard()).to_json();

    assert_eq!(output["ignore"], json!(false));
    assert_eq!(output["manipulate_caps_lock_led"], json!(false));
    assert_eq!(output["delay_milliseconds_before_open_device"], json!(3000));
    assert_eq!(output["disable_built_in_keyboard_if_exists"], json!(false));
    assert_eq!(output["simple_modifications"], json!([]));
    assert_eq!(output["fn_function_keys"].as_array().unwrap().len(), 12);
    assert_eq!(
        output["fn_function_keys"][0],
        json!({"from": {"key_code": "f1"}, "to": {}})
    );
}

// ===== Unknown keys =====

#[test]
fn test_unknown_key_preserved() {
    let output = load(&full_device()).to_json();
    assert_eq!(output["future_feature"], json!(42));
}

#[test]
fn test_unknown_nested_value_preserved_after_edit() {
    let extra = json!({"nested": [1, {"deep": null}], "s": "text"});
    let mut profile = load(&with(mouse(), "vendor_extension", extra.clone()));
    profile.set_ignore(false);

    let output = profile.to_json();
    assert_eq!(output["vendor_extension"], extra);
    assert_eq!(output["ignore"], json!(false));
}

// ===== Identity defaults =====

#[test]
fn test_pointing_device_ignored_by_default() {
    assert!(load(&mouse()).ignore());
}

#[test]
fn test_touch_bar_ignored_by_default() {
    let profile = load(&touch_bar());
    assert_eq!(profile.identifiers().vendor_id(), VendorId::APPLE);
    assert_eq!(profile.identifiers().product_id(), ProductId::TOUCH_BAR_2016);
    assert!(profile.ignore());
}

#[test]
fn test_other_apple_product_not_ignored() {
    assert!(!load(&apple_keyboard()).ignore());
}

#[test]
fn test_security_token_ignored_for_any_product() {
    for product_id in [0x0010, 0x0407, 0xffff] {
        let input = json!({"identifiers": identifiers(0x1050, product_id, true, false)});
        assert!(load(&input).ignore(), "product {product_id:#x}");
    }
}

#[test]
fn test_explicit_ignore_wins() {
    assert!(!load(&with(security_token(), "ignore", json!(false))).ignore());
    assert!(!load(&with(mouse(), "ignore", json!(false))).ignore());
    assert!(load(&with(generic_keyboard(), "ignore", json!(true))).ignore());
}

#[test]
fn test_explicit_ignore_before_identifiers() {
    let input = json!({
        "ignore": false,
        "identifiers": identifiers(0x1050, 0x0407, true, false),
    });
    assert!(!load(&input).ignore());
}

#[test]
fn test_caps_lock_led_default() {
    assert!(load(&apple_keyboard()).manipulate_caps_lock_led());
    assert!(!load(&generic_keyboard()).manipulate_caps_lock_led());

    let apple_mouse = json!({"identifiers": identifiers(0x05ac, 0x030d, false, true)});
    assert!(!load(&apple_mouse).manipulate_caps_lock_led());
}

#[test]
fn test_caps_lock_led_explicit_wins() {
    let input = with(apple_keyboard(), "manipulate_caps_lock_led", json!(false));
    assert!(!load(&input).manipulate_caps_lock_led());

    let input = with(generic_keyboard(), "manipulate_caps_lock_led", json!(true));
    assert!(load(&input).manipulate_caps_lock_led());
}

// ===== Fn function keys =====

#[test]
fn test_fn_function_keys_default() {
    let profile = load(&generic_keyboard());
    let keys = profile.fn_function_keys();

    assert_eq!(keys.len(), 12);
    for (i, mapping) in keys.iter().enumerate() {
        assert_eq!(mapping.from_key_code(), Some(format!("f{}", i + 1).as_str()));
        assert!(mapping.is_unassigned());
    }
    assert_eq!(keys, &default_fn_function_keys());
}

#[test]
fn test_fn_function_keys_partial_override() {
    let profile = load(&full_device());
    let keys = profile.fn_function_keys();

    assert_eq!(keys.len(), 12);
    assert_eq!(
        keys.get(0).unwrap().to()["consumer_key_code"],
        json!("display_brightness_decrement")
    );
    assert!(keys.iter().skip(1).all(KeyMapping::is_unassigned));
}

#[test]
fn test_fn_function_keys_extra_entries_append() {
    let input = with(
        generic_keyboard(),
        "fn_function_keys",
        json!([{"from": {"key_code": "f13"}, "to": {"key_code": "f1"}}]),
    );
    let keys = load(&input).fn_function_keys().clone();

    assert_eq!(keys.len(), 13);
    assert_eq!(keys.get(12).unwrap().from_key_code(), Some("f13"));
}

#[test]
fn test_simple_modifications_order() {
    let profile = load(&full_device());
    let sources: Vec<_> = profile
        .simple_modifications()
        .iter()
        .filter_map(KeyMapping::from_key_code)
        .collect();
    assert_eq!(sources, ["caps_lock", "right_command"]);
}

#[test]
fn test_set_rule_lists() {
    let mut profile = load(&generic_keyboard());
    profile.set_fn_function_keys(KeyMappingList::new());
    profile.set_simple_modifications(std::iter::once(KeyMapping::key_code("a", "b")).collect());

    let output = profile.to_json();
    assert_eq!(output["fn_function_keys"], json!([]));
    assert_eq!(output["simple_modifications"][0]["to"]["key_code"], json!("b"));

    // An explicit empty array is a partial override, so the defaults come back.
    assert_eq!(load(&output).fn_function_keys().len(), 12);
}

// ===== Delay =====

#[test]
fn test_delay_fraction_truncated() {
    let input = with(generic_keyboard(), "delay_milliseconds_before_open_device", json!(99.99));
    let profile = load(&input);

    assert_eq!(profile.delay_milliseconds_before_open_device(), 99);
    assert_eq!(profile.to_json()["delay_milliseconds_before_open_device"], json!(99));
}

#[test]
fn test_delay_negative_kept() {
    let input = with(generic_keyboard(), "delay_milliseconds_before_open_device", json!(-5));
    let profile = load(&input);

    assert_eq!(profile.delay_milliseconds_before_open_device(), -5);
    assert!(profile.delay_before_open().is_zero());
}

// ===== Errors =====

#[test]
fn test_ignore_wrong_type() {
    let err = DeviceProfile::from_json(&with(generic_keyboard(), "ignore", json!("yes"))).unwrap_err();

    assert!(matches!(
        &err,
        SchemaError::WrongFieldType { key, expected: "boolean", .. } if key == "ignore"
    ));
    assert_eq!(err.to_string(), "`ignore` must be boolean, but is `\"yes\"`");
}

#[test]
fn test_wrong_types_for_each_field() {
    let cases = [
        ("manipulate_caps_lock_led", json!(1), "boolean"),
        ("disable_built_in_keyboard_if_exists", json!(null), "boolean"),
        ("delay_milliseconds_before_open_device", json!("3000"), "number"),
        ("delay_milliseconds_before_open_device", json!(true), "number"),
    ];

    for (key, value, kind) in cases {
        let err = DeviceProfile::from_json(&with(generic_keyboard(), key, value)).unwrap_err();
        match err {
            SchemaError::WrongFieldType { key: k, expected, .. } => {
                assert_eq!(k, key);
                assert_eq!(expected, kind);
            }
            other => panic!("Expected WrongFieldType for {key}, got {other:?}"),
        }
    }
}

#[test]
fn test_not_an_object() {
    for input in [json!([]), json!([apple_keyboard()]), json!(42), json!("device"), json!(null)] {
        let err = DeviceProfile::from_json(&input).unwrap_err();
        assert!(matches!(err, SchemaError::NotAnObject { .. }), "input {input}");
    }
}

#[test]
fn test_identifiers_error_is_wrapped() {
    let err = DeviceProfile::from_json(&json!({"identifiers": {"vendor_id": "apple"}})).unwrap_err();

    assert_eq!(err.key(), Some("identifiers"));
    assert!(err.to_string().starts_with("`identifiers` error: `vendor_id` must be"));
}

#[test]
fn test_rule_list_errors_are_wrapped() {
    let err = DeviceProfile::from_json(&with(generic_keyboard(), "simple_modifications", json!({})))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "`simple_modifications` error: json must be array, but is `{}`"
    );

    let err = DeviceProfile::from_json(&with(
        generic_keyboard(),
        "fn_function_keys",
        json!([{"from": {"key_code": "f1"}, "to": "mute"}]),
    ))
    .unwrap_err();
    assert_eq!(err.key(), Some("fn_function_keys"));
    assert_eq!(err.root_cause().key(), Some("to"));

    let err = DeviceProfile::from_json(&with(generic_keyboard(), "fn_function_keys", json!([1])))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "`fn_function_keys` error: `[0]` error: json must be object, but is `1`"
    );
}

#[test]
fn test_missing_identifiers() {
    let err = DeviceProfile::from_json(&json!({"ignore": false})).unwrap_err();
    assert!(matches!(err, SchemaError::MissingField { key } if key == "identifiers"));
}

#[test]
fn test_unknown_keys_are_not_validated() {
    let input = with(generic_keyboard(), "ignore_v2", json!("anything"));
    assert!(DeviceProfile::from_json(&input).is_ok());
}
