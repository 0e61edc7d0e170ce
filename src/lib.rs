//! WLBB - Well Light Berry Bush
//!
//! Agent framework meant to control LEDs located in a 3D environment. This
//! crate provides the configuration layer: loading, saving, merging and
//! validating named parameter sets for agents.

pub mod agent;
pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Result, WlbbError};
