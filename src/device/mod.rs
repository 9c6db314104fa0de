//! Physical input device identity.
//!
//! Device profiles are matched to hardware through [`DeviceIdentifiers`].
//! Enumerating connected devices is the job of the event-grabbing daemon,
//! not this crate.

mod identifiers;

pub use identifiers::{DeviceIdentifiers, ProductId, VendorId};

