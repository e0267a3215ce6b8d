//! Raw GPIO input usable from interrupt context.
//!
//! `esp_idf_hal::gpio::PinDriver` owns its pin and cannot live in the
//! `static` the ISR reaches, so the edge handlers re-check the line level
//! through this zero-sized wrapper around `gpio_get_level` instead.  It
//! implements embedded-hal's [`InputPin`], which is what
//! [`PulseCapture`](crate::sensors::pulse::PulseCapture) consumes.
//!
//! On the host the simulated contacts always read closed (low).

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, InputPin};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsrPin {
    gpio: i32,
}

impl IsrPin {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio }
    }

    pub fn gpio(&self) -> i32 {
        self.gpio
    }
}

impl ErrorType for IsrPin {
    type Error = Infallible;
}

impl InputPin for IsrPin {
    #[cfg(target_os = "espidf")]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        // SAFETY: gpio_get_level is a register read; safe in ISR context.
        Ok(unsafe { esp_idf_svc::sys::gpio_get_level(self.gpio) } != 0)
    }

    #[cfg(not(target_os = "espidf"))]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(false)
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}
