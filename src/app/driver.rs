//! Cycle driver — the main-context loop.
//!
//! [`CycleDriver`] owns the conditioning engine and the output ports.
//! Each cycle: snapshot the pulse block, run one conditioning pass, then
//! emit either a rate-limited `$WIMWV` sentence or a diagnostic record.
//!
//! ```text
//!  PulseCapture ──▶ ┌──────────────────────┐ ──▶ OutputPort
//!                   │     CycleDriver      │
//!    TimePort ────▶ │ snapshot · condition │
//!                   └──────────────────────┘
//! ```
//!
//! [`step`](CycleDriver::step) never blocks, so tests drive it directly
//! with a mock clock; [`run`](CycleDriver::run) adds the wait.

use core::time::Duration;

use log::{info, warn};

use crate::conditioning::{ConditioningEngine, CycleReport};
use crate::config::{OutputMode, SensorConfig};
use crate::diagnostics;
use crate::error::OutputError;
use crate::nmea;
use crate::sensors::pulse::PulseCapture;

use super::ports::{OutputPort, TimePort};

/// What one [`CycleDriver::step`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleOutcome {
    pub report: CycleReport,
    /// A line was handed to the output port and accepted.
    pub emitted: bool,
}

pub struct CycleDriver<'a, T: TimePort, O: OutputPort> {
    capture: &'a PulseCapture,
    engine: ConditioningEngine,
    clock: T,
    output: O,
    pulse_timeout_us: u64,
    emit_interval_ms: u64,
    mode: OutputMode,
    last_emit_ms: Option<u64>,
    header_pending: bool,
    cycles: u64,
}

impl<'a, T: TimePort, O: OutputPort> CycleDriver<'a, T, O> {
    /// `config` is assumed valid (see [`SensorConfig::validate`]).
    pub fn new(capture: &'a PulseCapture, config: &SensorConfig, clock: T, output: O) -> Self {
        Self {
            capture,
            engine: ConditioningEngine::new(config),
            clock,
            output,
            pulse_timeout_us: config.pulse_timeout_us,
            emit_interval_ms: u64::from(config.emit_interval_ms),
            mode: config.output_mode,
            last_emit_ms: None,
            header_pending: config.output_mode == OutputMode::Diagnostic,
            cycles: 0,
        }
    }

    pub fn engine(&self) -> &ConditioningEngine {
        &self.engine
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    /// Conditioning passes run so far.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// One conditioning cycle against the current shared state.
    pub fn step(&mut self) -> CycleOutcome {
        let snap = self.capture.snapshot(self.clock.now_us(), self.pulse_timeout_us);
        let report = self.engine.condition(&snap);
        self.cycles += 1;

        let emitted = match self.mode {
            OutputMode::Sentence => self.emit_sentence(&report, self.clock.now_ms()),
            OutputMode::Diagnostic => self.emit_record(&report),
        };

        CycleOutcome { report, emitted }
    }

    /// Longest [`run`](Self::run) waits for a pulse before cycling anyway.
    ///
    /// Capped at the emission interval so calm air still produces
    /// sentences at the configured rate; never zero.
    pub fn wait_duration(&self) -> Duration {
        let wait_us = self
            .pulse_timeout_us
            .min(self.emit_interval_ms.saturating_mul(1_000))
            .max(1);
        Duration::from_micros(wait_us)
    }

    /// Wait for a pulse (or the timeout), run a cycle, forever.
    pub fn run(&mut self) -> ! {
        let wait = self.wait_duration();

        info!("cycle driver running: mode={:?} wait={}ms", self.mode, wait.as_millis());

        loop {
            self.capture.wait_for_pulse(wait);
            self.step();
        }
    }

    // ── Emission ──────────────────────────────────────────────

    fn emit_sentence(&mut self, report: &CycleReport, now_ms: u64) -> bool {
        let due = self
            .last_emit_ms
            .is_none_or(|last| now_ms.saturating_sub(last) >= self.emit_interval_ms);
        if !due {
            return false;
        }
        // A failed write still consumes the slot; the next one retries.
        self.last_emit_ms = Some(now_ms);

        let state = report.state;
        let written = nmea::encode(state.smoothed_direction, state.current_speed)
            .and_then(|line| self.output.write_line(&line));
        self.settle(written)
    }

    fn emit_record(&mut self, report: &CycleReport) -> bool {
        if self.header_pending {
            // Retried next cycle if the port refuses it.
            let written = self.output.write_line(diagnostics::HEADER);
            self.header_pending = !self.settle(written);
        }
        let written = diagnostics::record(report).and_then(|line| self.output.write_line(&line));
        self.settle(written)
    }

    fn settle(&self, written: Result<(), OutputError>) -> bool {
        match written {
            Ok(()) => true,
            Err(e) => {
                warn!("output dropped: {}", e);
                false
            }
        }
    }
}
