//! Instrument configuration parameters
//!
//! Every tunable constant of the wind instrument lives in [`SensorConfig`].
//! The values are fixed at compile time ([`SensorConfig::DEFAULT`]); nothing
//! reconfigures them at runtime.  Speeds are in hundredths of a knot,
//! directions in whole degrees, times in microseconds unless the field name
//! says otherwise.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of deviation bands.
pub const BAND_COUNT: usize = 3;

/// A speed regime with its own deviation tolerances.
///
/// A band covers `[min_speed, next band's min_speed)`; the last band is
/// open-ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    /// Inclusive lower bound (hundredths of a knot).
    pub min_speed: u32,
    /// Largest accepted speed change, exclusive (hundredths of a knot).
    pub speed_limit: u32,
    /// Largest accepted direction change, exclusive (degrees).
    pub direction_limit: u16,
}

/// Which line the cycle driver writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputMode {
    /// Rate-limited `$WIMWV` sentences.
    Sentence,
    /// One raw CSV record per conditioning cycle, for bench calibration.
    Diagnostic,
}

/// Core instrument configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorConfig {
    // --- Pulse capture ---
    /// Minimum time between accepted edges on one line (µs).
    pub debounce_us: u64,
    /// No speed pulse for this long means the rotor is stalled (µs).
    pub pulse_timeout_us: u64,

    // --- Conditioning ---
    /// Installation correction added to the raw direction (degrees).
    pub direction_offset_deg: i16,
    /// Direction smoothing gain in thousandths (1..=1000, 1000 = off).
    pub filter_gain_permille: u16,
    /// Deviation bands, ordered by ascending `min_speed`.
    pub bands: [Band; BAND_COUNT],

    // --- Output ---
    /// Minimum time between two emitted sentences (ms).
    pub emit_interval_ms: u32,
    pub output_mode: OutputMode,
}

impl SensorConfig {
    pub const DEFAULT: Self = Self {
        // Pulse capture
        debounce_us: 10_000,        // 10 ms
        pulse_timeout_us: 1_500_000, // 1.5 s

        // Conditioning
        direction_offset_deg: 0,
        filter_gain_permille: 250, // 0.25
        bands: [
            // [0, 10) kt
            Band {
                min_speed: 0,
                speed_limit: 500,
                direction_limit: 90,
            },
            // [10, 80) kt
            Band {
                min_speed: 1_000,
                speed_limit: 1_000,
                direction_limit: 45,
            },
            // [80, ∞) kt
            Band {
                min_speed: 8_000,
                speed_limit: 2_000,
                direction_limit: 20,
            },
        ],

        // Output
        emit_interval_ms: 1_000, // 1 Hz
        output_mode: OutputMode::Sentence,
    };

    /// Band whose range contains `speed` (hundredths of a knot).
    pub fn band_for(&self, speed: u32) -> &Band {
        self.bands
            .iter()
            .rev()
            .find(|b| speed >= b.min_speed)
            .unwrap_or(&self.bands[0])
    }

    /// Reject values the conditioning pipeline cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.debounce_us == 0 {
            return Err(Error::Config("debounce_us must be non-zero"));
        }
        if self.pulse_timeout_us <= self.debounce_us {
            return Err(Error::Config("pulse_timeout_us must exceed debounce_us"));
        }
        if !(1..=1000).contains(&self.filter_gain_permille) {
            return Err(Error::Config("filter_gain_permille must be in 1..=1000"));
        }
        if self.emit_interval_ms == 0 {
            return Err(Error::Config("emit_interval_ms must be non-zero"));
        }
        if self.bands[0].min_speed != 0 {
            return Err(Error::Config("first band must start at zero"));
        }
        if self.bands.windows(2).any(|w| w[0].min_speed >= w[1].min_speed) {
            return Err(Error::Config("band boundaries must be strictly increasing"));
        }
        for band in &self.bands {
            if band.speed_limit == 0 || band.direction_limit == 0 {
                return Err(Error::Config("band limits must be non-zero"));
            }
            if band.direction_limit > 180 {
                return Err(Error::Config("band direction_limit must be <= 180"));
            }
        }
        Ok(())
    }
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
