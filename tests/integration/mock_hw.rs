//! Mock hardware for integration tests.
//!
//! A contact pin with a settable level, a hand-advanced clock, and an
//! output port that records every line, so tests can drive
//! capture → driver → sentence without touching real GPIO or UART.

use std::cell::Cell;
use std::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};
use windvane::app::ports::{OutputPort, TimePort};
use windvane::error::OutputError;
use windvane::sensors::pulse::{EdgeVerdict, PulseCapture};

// ── MockPin ───────────────────────────────────────────────────

/// Reed contact.  Low = closed.
pub struct MockPin {
    low: bool,
}

#[allow(dead_code)]
impl MockPin {
    pub fn closed() -> Self {
        Self { low: true }
    }

    pub fn open() -> Self {
        Self { low: false }
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.low)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.low)
    }
}

// ── MockClock ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockClock {
    now_us: Cell<u64>,
}

#[allow(dead_code)]
impl MockClock {
    pub fn set_us(&self, us: u64) {
        self.now_us.set(us);
    }

    pub fn advance_us(&self, us: u64) {
        self.now_us.set(self.now_us.get() + us);
    }
}

impl TimePort for MockClock {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}

// ── RecordingOutput ───────────────────────────────────────────

#[derive(Default)]
pub struct RecordingOutput {
    pub lines: Vec<String>,
}

#[allow(dead_code)]
impl RecordingOutput {
    pub fn last(&self) -> Option<&str> {
        self.lines.last().map(String::as_str)
    }
}

impl OutputPort for RecordingOutput {
    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        self.lines.push(line.to_owned());
        Ok(())
    }
}

// ── Anemometer ────────────────────────────────────────────────

/// Steady rotor: one speed edge every `period_us`, one direction edge
/// `phase_us` after each speed edge.
pub struct Rotor {
    pub period_us: u64,
    pub phase_us: u64,
    next_speed_us: u64,
}

#[allow(dead_code)]
impl Rotor {
    /// First rotation starts at t = 0.
    pub fn new(period_us: u64, phase_us: u64) -> Self {
        Self { period_us, phase_us, next_speed_us: period_us }
    }

    /// Resume turning from `start_us` (e.g. after a calm).
    pub fn starting_at(period_us: u64, phase_us: u64, start_us: u64) -> Self {
        Self { period_us, phase_us, next_speed_us: start_us + period_us }
    }

    /// Fire the direction edge of the current rotation and the speed edge
    /// that closes it.  Returns the speed edge time.
    pub fn turn(&mut self, capture: &PulseCapture) -> (u64, EdgeVerdict) {
        let start = self.next_speed_us - self.period_us;
        capture.on_direction_edge(&mut MockPin::closed(), start + self.phase_us);
        let t = self.next_speed_us;
        let verdict = capture.on_speed_edge(&mut MockPin::closed(), t);
        self.next_speed_us += self.period_us;
        (t, verdict)
    }
}
