//! Wind instrument firmware library.
//!
//! Turns the two pulse trains of a mechanical anemometer into `$WIMWV`
//! sentences.  Exposes the pure-logic modules for integration testing and
//! bench tooling.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod conditioning;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod nmea;
pub mod pins;

// ESP-IDF-backed modules; host builds get the simulation twins.
pub mod adapters;
pub mod drivers;
pub mod sensors;
