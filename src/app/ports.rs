//! Port traits — the boundary between the cycle driver and the board.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CycleDriver (domain)
//! ```
//!
//! The [`CycleDriver`](super::driver::CycleDriver) consumes these through
//! generics, so the conditioning pipeline never touches hardware directly
//! and runs unchanged against the mocks in `tests/integration/`.

use crate::error::OutputError;

// ───────────────────────────────────────────────────────────────
// Time port (driven adapter: clock → domain)
// ───────────────────────────────────────────────────────────────

/// Monotonic time source shared with the pulse interrupt handlers.
///
/// Must be the same clock the ISRs stamp edges with, otherwise stall
/// detection compares unrelated time bases.
pub trait TimePort {
    /// Microseconds since boot.
    fn now_us(&self) -> u64;

    /// Milliseconds since boot.
    fn now_ms(&self) -> u64 {
        self.now_us() / 1_000
    }
}

// ───────────────────────────────────────────────────────────────
// Output port (driven adapter: domain → serial line)
// ───────────────────────────────────────────────────────────────

/// Line-oriented text sink.  Framing (`\r\n`) is the adapter's job.
pub trait OutputPort {
    fn write_line(&mut self, line: &str) -> Result<(), OutputError>;
}

impl<T: TimePort + ?Sized> TimePort for &T {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

impl<T: OutputPort + ?Sized> OutputPort for &mut T {
    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        (**self).write_line(line)
    }
}
