//! Hardware initialisation, interrupt-side pin access and the heartbeat LED.

pub mod heartbeat;
pub mod hw_init;
pub mod isr_pin;
