//! ESP32 time adapter.
//!
//! Monotonic microsecond clock for the cycle driver.  The pulse ISRs read
//! the same source, so snapshot stall checks compare like with like.
//!
//! - **`target_os = "espidf"`** — wraps `esp_timer_get_time()` from the
//!   ESP-IDF high-resolution timer (microsecond precision, monotonic).
//! - **`not(target_os = "espidf")`** — uses `std::time::Instant` for
//!   host-side testing and simulation.

use crate::app::ports::TimePort;

/// Time adapter for the ESP32 platform.
pub struct Esp32TimeAdapter {
    #[cfg(not(target_os = "espidf"))]
    start: std::time::Instant,
}

impl Default for Esp32TimeAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Esp32TimeAdapter {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_os = "espidf"))]
            start: std::time::Instant::now(),
        }
    }
}

impl TimePort for Esp32TimeAdapter {
    #[cfg(target_os = "espidf")]
    fn now_us(&self) -> u64 {
        now_us()
    }

    #[cfg(not(target_os = "espidf"))]
    fn now_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }
}

/// Raw boot-relative timestamp, callable from ISR context.
#[cfg(target_os = "espidf")]
pub fn now_us() -> u64 {
    // esp_timer_get_time is non-negative and ISR-safe.
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64
}
