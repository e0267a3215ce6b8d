//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter  | Implements | Connects to                    |
//! |----------|------------|--------------------------------|
//! | `serial` | OutputPort | Console UART (stdout) / buffer |
//! | `time`   | TimePort   | ESP32 system timer             |

pub mod serial;
pub mod time;
