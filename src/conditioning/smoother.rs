//! Exponential low-pass filter on a compass heading.
//!
//! Each update moves the output a fixed fraction of the way towards the new
//! reading, always along the shorter arc, so a vane swinging across north
//! does not drag the output the long way round through south.
//!
//! The gain is fixed-point, in thousandths.

/// Direction smoother state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionSmoother {
    gain_permille: i32,
    smoothed: i32,
}

impl DirectionSmoother {
    /// `gain_permille` in 1..=1000; 1000 tracks the input exactly.
    pub fn new(gain_permille: u16) -> Self {
        Self {
            gain_permille: i32::from(gain_permille.clamp(1, 1000)),
            smoothed: 0,
        }
    }

    /// Current output in `[0, 360)`.
    pub fn value(&self) -> u16 {
        self.smoothed as u16
    }

    /// Fold in one raw heading and return the new output.
    pub fn update(&mut self, raw_deg: u16) -> u16 {
        let mut delta = i32::from(raw_deg % 360) - self.smoothed;
        if delta < -180 {
            delta += 360;
        } else if delta > 180 {
            delta -= 360;
        }

        self.smoothed = (self.smoothed + scale_rounded(delta, self.gain_permille)).rem_euclid(360);
        self.value()
    }
}

/// `round(delta · gain / 1000)`, halves away from zero.
fn scale_rounded(delta: i32, gain_permille: i32) -> i32 {
    let scaled = delta * gain_permille;
    if scaled >= 0 {
        (scaled + 500) / 1000
    } else {
        (scaled - 500) / 1000
    }
}
