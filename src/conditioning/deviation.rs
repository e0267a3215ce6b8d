//! Banded outlier rejection for speed and direction.
//!
//! A single aliased or bounced reading shows up as a jump no real wind can
//! produce between two rotations.  Each [`Band`] sets how large a jump is
//! still believable in its speed regime.  Comparisons are strict: a change
//! exactly at the limit is rejected.

use crate::config::Band;

/// Speed change from `previous` to `new` is within the band's tolerance.
pub fn speed_within(band: &Band, previous: u32, new: u32) -> bool {
    previous.abs_diff(new) < band.speed_limit
}

/// Direction change is within the band's tolerance, going either way
/// around the compass (355° → 5° is a 10° change).
pub fn direction_within(band: &Band, previous: u16, new: u16) -> bool {
    let delta = previous.abs_diff(new);
    delta < band.direction_limit || delta > 360u16.saturating_sub(band.direction_limit)
}
