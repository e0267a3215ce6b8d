//! Line-framed serial output.
//!
//! On the board the console UART is stdout (ESP-IDF routes it through VFS),
//! so [`SerialOutput`] wraps any [`std::io::Write`]: `stdout()` in the
//! firmware, a `Vec<u8>` in tests.  Each line goes out as one write of
//! `line\r\n` followed by a flush, so a sentence is never split across
//! log output.

use std::io::Write;

use crate::app::ports::OutputPort;
use crate::error::OutputError;

const LINE_END: &[u8] = b"\r\n";

pub struct SerialOutput<W: Write> {
    writer: W,
}

impl<W: Write> SerialOutput<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }
}

impl<W: Write> OutputPort for SerialOutput<W> {
    fn write_line(&mut self, line: &str) -> Result<(), OutputError> {
        self.writer
            .write_all(line.as_bytes())
            .and_then(|()| self.writer.write_all(LINE_END))
            .and_then(|()| self.writer.flush())
            .map_err(|_| OutputError::WriteFailed)
    }
}
