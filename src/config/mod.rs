//! Device configuration entries of a remapping profile.
//!
//! A profile owns a `devices` array; each entry is a [`DeviceProfile`] with
//! two [`KeyMappingList`] rule lists. Documents are plain `serde_json`
//! values so keys this crate does not understand survive a round trip.

mod device_profile;
mod devices;
mod key_mapping;
mod loader;

pub use device_profile::{
    DEFAULT_DELAY_MILLISECONDS, DeviceProfile, KEY_DELAY_BEFORE_OPEN,
    KEY_DISABLE_BUILT_IN_KEYBOARD, KEY_FN_FUNCTION_KEYS, KEY_IDENTIFIERS, KEY_IGNORE,
    KEY_MANIPULATE_CAPS_LOCK_LED, KEY_SIMPLE_MODIFICATIONS, default_fn_function_keys,
};
pub use devices::{DeviceList, LoadPolicy, SkippedDevice};
pub use key_mapping::{KeyMapping, KeyMappingList};
pub use loader::{load_devices, read_document};
