//! Unified error types for the wind instrument firmware.
//!
//! Signal-quality anomalies (stalled rotor, implausible jumps, stale phase)
//! are handled by policy inside the conditioning pipeline and never show up
//! here.  What remains is configuration validation, output transport, and
//! peripheral bring-up.  All variants are `Copy` so they pass through the
//! cycle driver without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.  The message names the offending field.
    Config(&'static str),
    /// A sentence or diagnostic line could not be produced or written.
    Output(OutputError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Output(e) => write!(f, "output: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Output errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputError {
    /// Formatted line did not fit the fixed-capacity buffer.
    Overflow,
    /// The serial transport rejected the write.
    WriteFailed,
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow => write!(f, "line buffer overflow"),
            Self::WriteFailed => write!(f, "serial write failed"),
        }
    }
}

impl From<OutputError> for Error {
    fn from(e: OutputError) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
