//! Heartbeat LED.
//!
//! Wraps the line output and toggles the LED after every line that made it
//! out, so a glance at the board shows the instrument is alive and talking.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives the GPIO configured by `hw_init::init_heartbeat_output`.
//! On host/test: tracks state in-memory only.

use crate::app::ports::OutputPort;
use crate::drivers::hw_init;
use crate::error::OutputError;
use crate::pins;

pub struct Heartbeat<O: OutputPort> {
    inner: O,
    lit: bool,
}

impl<O: OutputPort> Heartbeat<O> {
    pub fn new(inner: O) -> Self {
        hw_init::gpio_write(pins::HEARTBEAT_LED_GPIO, false);
        Self { inner, lit: false }
    }

    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<O: OutputPort> OutputPort for Heartbeat<O> {
    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        self.inner.write_line(line)?;
        self.lit = !self.lit;
        hw_init::gpio_write(pins::HEARTBEAT_LED_GPIO, self.lit);
        Ok(())
    }
}
