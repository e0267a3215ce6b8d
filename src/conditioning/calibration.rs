//! Rotor calibration: rotation period → wind speed, phase → direction.
//!
//! The manufacturer publishes the rotor curve as three quadratics in
//! revolutions per second giving mph.  Here the same curves run in integer
//! arithmetic on `r` (revolutions per 100 s) and produce hundredths of a
//! knot.  Coefficients stay in the published units (×10⁴ for the quadratic
//! and linear terms); the divisors fold in R = r/100 and the mph → knot
//! factor 0.868976:
//!
//! ```text
//!   a·R² mph  →  a₄ · r² / 1_150_780   hundredths of a knot
//!   b·R  mph  →  b₄ · r  / 11_508
//!   c    mph  →  c · 86.8976            (pre-rounded)
//! ```

/// Rotation rate numerator: r = RATE_SCALE / period_us.
const RATE_SCALE: u64 = 100_000_000;

/// Segment boundaries on `r`.
pub const LOW_SEGMENT_END: u32 = 323;
pub const MID_SEGMENT_END: u32 = 5_436;

const QUAD_DIVISOR: i64 = 1_150_780;
const LINEAR_DIVISOR: i64 = 11_508;

/// `a₄ r² / QUAD_DIVISOR + b₄ r / LINEAR_DIVISOR + c`
#[derive(Debug, Clone, Copy)]
struct Segment {
    a: i64,
    b: i64,
    c: i64,
}

impl Segment {
    // i128 headroom: r can reach 10⁸ for a pathological 1 µs period.
    fn eval(&self, r: i128) -> i128 {
        i128::from(self.a) * r * r / i128::from(QUAD_DIVISOR)
            + i128::from(self.b) * r / i128::from(LINEAR_DIVISOR)
            + i128::from(self.c)
    }
}

/// −0.1095 R² + 2.9318 R − 0.1412
const LOW: Segment = Segment {
    a: -1_095,
    b: 29_318,
    c: -12,
};
/// 0.0052 R² + 2.1980 R + 1.1091
const MID: Segment = Segment {
    a: 52,
    b: 21_980,
    c: 96,
};
/// 0.1104 R² − 9.5685 R + 329.87
const HIGH: Segment = Segment {
    a: 1_104,
    b: -95_685,
    c: 28_665,
};

/// Rotation rate in revolutions per 100 s.  `period_us` must be non-zero.
pub fn rotation_rate(period_us: u64) -> u32 {
    (RATE_SCALE / period_us).min(u64::from(u32::MAX)) as u32
}

/// Wind speed (hundredths of a knot) for rotation rate `r`.
pub fn speed_from_rate(r: u32) -> u32 {
    let segment = if r < LOW_SEGMENT_END {
        LOW
    } else if r < MID_SEGMENT_END {
        MID
    } else {
        HIGH
    };
    segment.eval(i128::from(r)).clamp(0, i128::from(u32::MAX)) as u32
}

/// Wind speed (hundredths of a knot) for a rotation period.
/// A zero period means "stalled" and reads as zero.
pub fn speed_from_period(period_us: u64) -> u32 {
    if period_us == 0 {
        return 0;
    }
    speed_from_rate(rotation_rate(period_us))
}

/// Vane heading from the direction edge's phase inside the rotation.
///
/// Returns `None` when `direction_interval_us` exceeds the period (the
/// direction edge did not fall inside this rotation) or the period is zero.
pub fn direction_from_phase(
    direction_interval_us: u64,
    speed_interval_us: u64,
    offset_deg: i16,
) -> Option<u16> {
    if speed_interval_us == 0 || direction_interval_us > speed_interval_us {
        return None;
    }
    let phase_deg =
        (u128::from(direction_interval_us) * 360 / u128::from(speed_interval_us)) as i32;
    Some((phase_deg + i32::from(offset_deg)).rem_euclid(360) as u16)
}
