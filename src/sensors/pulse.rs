//! Two-line pulse capture for the anemometer.
//!
//! The rotor closes the speed contact once per revolution; the vane closes
//! the direction contact once per revolution at a fixed angular position.
//! Wind direction is the phase of the direction edge inside the speed
//! period, so both lines are timestamped here and resolved at speed-edge
//! time.
//!
//! ```text
//!  speed    ──┐    ┌────────────┐    ┌──
//!             └────┘            └────┘
//!             |<---- speed_interval -->|
//!  direction ──────────┐    ┌─────────────
//!                      └────┘
//!             |<-dir-->|
//! ```
//!
//! The edge handlers run in interrupt context.  They touch nothing but the
//! [`PulseTiming`] block (one critical-section mutex) and the single-slot
//! new-data [`Signal`].  The main context copies the whole block in one
//! critical section via [`PulseCapture::snapshot`], so it never sees a
//! timestamp and an interval belonging to different pulses.

use core::cell::Cell;
use core::time::Duration;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal::digital::InputPin;

#[cfg(target_os = "espidf")]
use esp_idf_hal::task::block_on;
#[cfg(not(target_os = "espidf"))]
use futures_lite::future::block_on;

/// Timing block shared between the edge handlers and the main context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PulseTiming {
    speed_ts: u64,
    direction_ts: u64,
    speed_interval: u64,
    direction_interval: u64,
}

/// Torn-free copy of the shared timing block, taken in main context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PulseSnapshot {
    /// Last accepted speed edge (µs since boot).
    pub speed_timestamp_us: u64,
    /// Last accepted direction edge (µs since boot).
    pub direction_timestamp_us: u64,
    /// Rotation period; zero when the rotor is stalled or never turned.
    pub speed_interval_us: u64,
    /// Direction edge offset inside the rotation that produced
    /// `speed_interval_us`.  Stale if larger than `speed_interval_us`.
    pub direction_interval_us: u64,
}

impl PulseSnapshot {
    /// No usable rotation period (timeout expired or no pulse yet).
    pub fn is_stalled(&self) -> bool {
        self.speed_interval_us == 0
    }
}

/// Outcome of one edge-handler invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeVerdict {
    Accepted,
    /// Arrived inside the debounce window of the previous accepted edge.
    Debounced,
    /// The line had already bounced back high when the handler ran.
    PinNotLow,
}

/// Why [`PulseCapture::wait_for_pulse`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    Pulse,
    Timeout,
}

/// Edge handlers plus the shared state they feed.
///
/// `const`-constructible so the firmware can hold one in a `static` that
/// the GPIO ISRs reach; tests build their own instances and inject
/// synthetic edges.
pub struct PulseCapture {
    timing: Mutex<CriticalSectionRawMutex, Cell<PulseTiming>>,
    new_data: Signal<CriticalSectionRawMutex, ()>,
    debounce_us: u64,
}

impl PulseCapture {
    pub const fn new(debounce_us: u64) -> Self {
        Self {
            timing: Mutex::new(Cell::new(PulseTiming {
                speed_ts: 0,
                direction_ts: 0,
                speed_interval: 0,
                direction_interval: 0,
            })),
            new_data: Signal::new(),
            debounce_us,
        }
    }

    /// Speed-line falling edge.  Interrupt context: bounded, no logging.
    pub fn on_speed_edge<P: InputPin>(&self, pin: &mut P, now_us: u64) -> EdgeVerdict {
        if !pin.is_low().unwrap_or(false) {
            return EdgeVerdict::PinNotLow;
        }

        let verdict = self.timing.lock(|cell| {
            let mut t = cell.get();
            let elapsed = now_us.saturating_sub(t.speed_ts);
            if elapsed < self.debounce_us {
                return EdgeVerdict::Debounced;
            }
            t.speed_interval = elapsed;
            // Only a direction edge inside the rotation that just ended
            // carries phase information.
            if t.direction_ts >= t.speed_ts {
                t.direction_interval = t.direction_ts - t.speed_ts;
            }
            t.speed_ts = now_us;
            cell.set(t);
            EdgeVerdict::Accepted
        });

        if verdict == EdgeVerdict::Accepted {
            self.new_data.signal(());
        }
        verdict
    }

    /// Direction-line falling edge.  Interrupt context: bounded, no logging.
    pub fn on_direction_edge<P: InputPin>(&self, pin: &mut P, now_us: u64) -> EdgeVerdict {
        if !pin.is_low().unwrap_or(false) {
            return EdgeVerdict::PinNotLow;
        }

        self.timing.lock(|cell| {
            let mut t = cell.get();
            if now_us.saturating_sub(t.direction_ts) < self.debounce_us {
                return EdgeVerdict::Debounced;
            }
            t.direction_ts = now_us;
            cell.set(t);
            EdgeVerdict::Accepted
        })
    }

    /// Copy the shared timing block in one critical section.
    ///
    /// If no speed edge was accepted within `timeout_us` of `now_us` the
    /// returned interval is forced to zero (stalled rotor).
    pub fn snapshot(&self, now_us: u64, timeout_us: u64) -> PulseSnapshot {
        let t = self.timing.lock(Cell::get);

        // saturating: an edge may land between reading the clock and
        // taking the lock, putting speed_ts ahead of now_us.
        let stalled = now_us.saturating_sub(t.speed_ts) > timeout_us;

        PulseSnapshot {
            speed_timestamp_us: t.speed_ts,
            direction_timestamp_us: t.direction_ts,
            speed_interval_us: if stalled { 0 } else { t.speed_interval },
            direction_interval_us: t.direction_interval,
        }
    }

    /// True if a speed edge was accepted since the last wait consumed it.
    pub fn has_new_data(&self) -> bool {
        self.new_data.signaled()
    }

    /// Block the main context until a speed edge is accepted or `timeout`
    /// elapses, whichever comes first.  Consumes the new-data flag.
    pub fn wait_for_pulse(&self, timeout: Duration) -> Wake {
        let pulse = async {
            self.new_data.wait().await;
            Wake::Pulse
        };
        let expiry = async {
            async_io_mini::Timer::after(timeout).await;
            Wake::Timeout
        };
        block_on(futures_lite::future::or(pulse, expiry))
    }
}
