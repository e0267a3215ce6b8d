//! Signal conditioning — snapshot in, accepted wind reading out.
//!
//! [`ConditioningEngine`] owns all main-context filter state and runs one
//! pass per cycle:
//!
//! ```text
//!  PulseSnapshot ──▶ calibration ──▶ deviation(speed) ──▶ phase ──▶
//!                    deviation(direction) ──▶ smoother ──▶ FilterState
//! ```
//!
//! Nothing here ever fails: stalls, jumps and stale phase are signal
//! quality conditions reported in the [`CycleReport`], not errors.

pub mod calibration;
pub mod deviation;
pub mod smoother;

use log::debug;

use crate::config::SensorConfig;
use crate::sensors::pulse::PulseSnapshot;
use smoother::DirectionSmoother;

/// Main-context filter memory.  All zero at boot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Last raw speed, accepted or not (hundredths of a knot).
    pub previous_speed: u32,
    /// Last computed raw direction (degrees).
    pub previous_direction: u16,
    /// Filtered direction reported in the sentence (degrees).
    pub smoothed_direction: u16,
    /// Last accepted speed reported in the sentence.
    pub current_speed: u32,
}

/// What happened to this cycle's reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleVerdict {
    /// No rotation period: speed forced to zero, direction untouched.
    Stalled,
    /// Speed jump outside the band tolerance; the reading is ignored.
    SpeedRejected,
    /// Speed accepted, direction edge outside this rotation.
    DirectionStale,
    /// Speed accepted, direction jump outside the band tolerance.
    DirectionRejected,
    /// Speed and direction both accepted.
    Accepted,
}

impl CycleVerdict {
    /// Short tag for diagnostic output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Stalled => "stalled",
            Self::SpeedRejected => "speed_rejected",
            Self::DirectionStale => "dir_stale",
            Self::DirectionRejected => "dir_rejected",
            Self::Accepted => "ok",
        }
    }
}

/// Everything one conditioning pass saw and decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    pub speed_interval_us: u64,
    pub direction_interval_us: u64,
    /// Rotation rate (revolutions per 100 s); zero when stalled.
    pub rate: u32,
    /// Calibrated speed before deviation filtering.
    pub raw_speed: u32,
    /// Heading from phase; `None` when not computed this cycle.
    pub raw_direction: Option<u16>,
    pub verdict: CycleVerdict,
    /// Filter state after the pass.
    pub state: FilterState,
}

impl CycleReport {
    /// The reading was thrown away as implausible.
    pub fn ignore_next_reading(&self) -> bool {
        self.verdict == CycleVerdict::SpeedRejected
    }
}

/// Owns the filter state and the band table.
pub struct ConditioningEngine {
    config: SensorConfig,
    smoother: DirectionSmoother,
    previous_speed: u32,
    previous_direction: u16,
    current_speed: u32,
}

impl ConditioningEngine {
    pub fn new(config: &SensorConfig) -> Self {
        Self {
            config: config.clone(),
            smoother: DirectionSmoother::new(config.filter_gain_permille),
            previous_speed: 0,
            previous_direction: 0,
            current_speed: 0,
        }
    }

    pub fn state(&self) -> FilterState {
        FilterState {
            previous_speed: self.previous_speed,
            previous_direction: self.previous_direction,
            smoothed_direction: self.smoother.value(),
            current_speed: self.current_speed,
        }
    }

    /// Run one conditioning pass over `snap`.
    pub fn condition(&mut self, snap: &PulseSnapshot) -> CycleReport {
        let mut report = CycleReport {
            speed_interval_us: snap.speed_interval_us,
            direction_interval_us: snap.direction_interval_us,
            rate: 0,
            raw_speed: 0,
            raw_direction: None,
            verdict: CycleVerdict::Stalled,
            state: FilterState::default(),
        };

        if snap.is_stalled() {
            // Stalled is not slow: drop the trend so the first pulse after
            // a calm is judged against zero.
            self.previous_speed = 0;
            self.current_speed = 0;
            report.state = self.state();
            return report;
        }

        report.rate = calibration::rotation_rate(snap.speed_interval_us);
        let raw_speed = calibration::speed_from_period(snap.speed_interval_us);
        report.raw_speed = raw_speed;

        let band = *self.config.band_for(raw_speed);
        let speed_ok = deviation::speed_within(&band, self.previous_speed, raw_speed);
        // Trend memory follows the raw reading even when it is rejected, so
        // a genuine step change is accepted on the next cycle.
        self.previous_speed = raw_speed;

        if !speed_ok {
            debug!("speed jump rejected: {} (band limit {})", raw_speed, band.speed_limit);
            report.verdict = CycleVerdict::SpeedRejected;
            report.state = self.state();
            return report;
        }
        self.current_speed = raw_speed;

        let Some(raw_direction) = calibration::direction_from_phase(
            snap.direction_interval_us,
            snap.speed_interval_us,
            self.config.direction_offset_deg,
        ) else {
            debug!(
                "direction phase stale: {}us > {}us",
                snap.direction_interval_us, snap.speed_interval_us
            );
            report.verdict = CycleVerdict::DirectionStale;
            report.state = self.state();
            return report;
        };
        report.raw_direction = Some(raw_direction);

        let direction_ok =
            deviation::direction_within(&band, self.previous_direction, raw_direction);
        self.previous_direction = raw_direction;

        if direction_ok {
            self.smoother.update(raw_direction);
            report.verdict = CycleVerdict::Accepted;
        } else {
            debug!(
                "direction jump rejected: {} (band limit {})",
                raw_direction, band.direction_limit
            );
            report.verdict = CycleVerdict::DirectionRejected;
        }

        report.state = self.state();
        report
    }
}
