//! Sensor subsystem — the anemometer's two pulse lines.
//!
//! The GPIO ISRs registered in [`crate::drivers::hw_init`] feed
//! [`PULSE_CAPTURE`]; the cycle driver snapshots it from main context.

pub mod pulse;

use crate::config::SensorConfig;
use pulse::PulseCapture;

/// The one capture instance reachable from interrupt context.
/// `static` because ISR callbacks in ESP-IDF cannot capture closures.
pub static PULSE_CAPTURE: PulseCapture = PulseCapture::new(SensorConfig::DEFAULT.debounce_us);
