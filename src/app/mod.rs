//! Application core — the main-context cycle, zero direct I/O.
//!
//! The [`driver`] runs snapshot → conditioning → emission.  All interaction
//! with the board happens through the **port traits** in [`ports`], keeping
//! this layer testable without real peripherals.

pub mod driver;
pub mod ports;
