//! Per-device customization profiles for a keyboard remapping system.
//!
//! This library exposes the core functionality of the `rp` CLI for use in
//! tests and by the larger configuration tooling.
//!
//! # Modules
//!
//! - `device`: Device identity (vendor/product ids, classification)
//! - `config`: Device profiles, remap rule lists, and the devices array
//! - `error`: Schema and CLI error types
//! - `output`: Output mode abstraction (robot/human)
//! - `logging`: Tracing subscriber setup
#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod device;
pub mod error;
pub mod logging;
pub mod output;
