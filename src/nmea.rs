//! `$WIMWV` wind sentence encoder.
//!
//! Wire format (one line, framing added by the serial adapter):
//! ```text
//! $WIMWV,<deg>.0,R,<kt>.<tenth>,N,A*<CS>
//!  └──────────── body ────────────┘  └─ XOR of body bytes, 2 hex digits
//! ```
//!
//! Speed arrives in hundredths of a knot and is truncated to tenths.
//! Everything is built into a fixed-capacity [`Sentence`]; nothing here
//! allocates.

use core::fmt::Write;

use crate::error::OutputError;

/// Longest possible sentence is ~33 bytes; leave headroom.
pub const SENTENCE_CAPACITY: usize = 48;

pub type Sentence = heapless::String<SENTENCE_CAPACITY>;

const TALKER_AND_TYPE: &str = "WIMWV";

/// XOR of every byte in `body` (the text strictly between `$` and `*`).
pub fn checksum(body: &str) -> u8 {
    body.bytes().fold(0, |acc, b| acc ^ b)
}

/// Build the relative-wind sentence for `direction_deg` and
/// `speed_hundredths` (hundredths of a knot).
pub fn encode(direction_deg: u16, speed_hundredths: u32) -> Result<Sentence, OutputError> {
    let mut out = Sentence::new();
    out.push('$').map_err(|_| OutputError::Overflow)?;
    write!(
        out,
        "{},{}.0,R,{}.{},N,A",
        TALKER_AND_TYPE,
        direction_deg,
        speed_hundredths / 100,
        (speed_hundredths % 100) / 10
    )
    .map_err(|_| OutputError::Overflow)?;

    // Body is everything after the leading '$'.
    let cs = checksum(&out[1..]);
    write!(out, "*{cs:02X}").map_err(|_| OutputError::Overflow)?;
    Ok(out)
}

/// Check a complete sentence: leading `$`, a `*` followed by exactly two
/// hex digits, and a matching checksum.  Trailing `\r\n` is tolerated.
pub fn verify(sentence: &str) -> bool {
    let line = sentence.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.strip_prefix('$') else {
        return false;
    };
    let Some((body, cs_hex)) = rest.rsplit_once('*') else {
        return false;
    };
    if cs_hex.len() != 2 {
        return false;
    }
    match u8::from_str_radix(cs_hex, 16) {
        Ok(cs) => cs == checksum(body),
        Err(_) => false,
    }
}
