//! GPIO / peripheral pin assignments for the wind instrument board.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.  The NMEA output uses the console UART (UART0,
//! default pins), so it has no entry here.

// ---------------------------------------------------------------------------
// Anemometer (reed contacts to ground, internal pull-ups)
// ---------------------------------------------------------------------------

/// Rotor contact: one falling edge per revolution.
pub const SPEED_PULSE_GPIO: i32 = 4;
/// Vane contact: one falling edge per revolution at the vane's heading.
pub const DIRECTION_PULSE_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Heartbeat LED (active HIGH)
// ---------------------------------------------------------------------------

/// Toggles once per emitted line.
pub const HEARTBEAT_LED_GPIO: i32 = 2;
