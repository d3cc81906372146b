//! Kenwood CAT text-protocol pieces the emulator needs.
//!
//! The Kenwood CAT protocol uses semicolon-terminated ASCII commands over a
//! serial link: a two-letter prefix, optional parameters, then `;`. The
//! emulator only ever answers one of them, the `IF` (information) query,
//! whose reply starts with the echoed prefix and an 11-digit VFO frequency
//! in hertz followed by fixed-width status fields.
//!
//! # `IF` reply layout
//!
//! ```text
//! IF 00014175000 _____ 0000000000030000000 ;
//! |  |           |     |                   |
//! |  |           |     |                   terminator
//! |  |           |     status fields (RIT/XIT, memory, TX/RX, mode, ...)
//! |  |           5 blank columns
//! |  frequency, 11 digits, zero padded
//! echoed prefix
//! ```
//!
//! The status tail is emitted verbatim from the canned reply; only the
//! frequency field is ever varied.

use bytes::{BufMut, BytesMut};

use rigsim_core::error::{Error, Result};

/// CAT command/response terminator byte.
pub const TERMINATOR: u8 = b';';

/// The only command the emulator recognises.
pub const COMMAND_TOKEN: &[u8] = b"IF;";

/// The canned `IF` reply: VFO on 14.175 MHz, every other field blank or zero.
pub const RESPONSE_TOKEN: &[u8] = b"IF00014175000     0000000000030000000;";

/// Frequency reported by [`RESPONSE_TOKEN`].
pub const DEFAULT_FREQUENCY_HZ: u64 = 14_175_000;

const STATUS_PREFIX: &str = "IF";

/// Everything between the frequency field and the terminator.
const STATUS_TAIL: &str = "     0000000000030000000";

/// Width of the frequency field in an `IF` reply.
const FREQ_DIGITS: usize = 11;

/// Largest frequency that fits in the 11-digit field.
pub const MAX_FREQUENCY_HZ: u64 = 99_999_999_999;

/// Encode a CAT command or reply into raw bytes.
///
/// Concatenates the prefix, parameters, and the terminator `;`.
///
/// ```
/// use rigsim_kenwood::protocol::encode_command;
///
/// assert_eq!(encode_command("IF", ""), b"IF;");
/// assert_eq!(encode_command("FA", "00014175000"), b"FA00014175000;");
/// ```
pub fn encode_command(prefix: &str, params: &str) -> Vec<u8> {
    let capacity = prefix.len() + params.len() + 1;
    let mut buf = BytesMut::with_capacity(capacity);
    buf.put_slice(prefix.as_bytes());
    buf.put_slice(params.as_bytes());
    buf.put_u8(TERMINATOR);
    buf.to_vec()
}

/// Build an `IF` status reply reporting `freq_hz` on the VFO.
///
/// `encode_status_response(DEFAULT_FREQUENCY_HZ)` is byte-identical to
/// [`RESPONSE_TOKEN`].
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if the frequency does not fit in the
/// 11-digit field.
pub fn encode_status_response(freq_hz: u64) -> Result<Vec<u8>> {
    if freq_hz > MAX_FREQUENCY_HZ {
        return Err(Error::InvalidParameter(format!(
            "frequency {freq_hz} Hz does not fit in {FREQ_DIGITS} digits"
        )));
    }
    Ok(encode_command(
        STATUS_PREFIX,
        &format!("{freq_hz:011}{STATUS_TAIL}"),
    ))
}

/// Extract the VFO frequency from an `IF` status reply.
///
/// This is what a client band decoder does with the reply: skip the
/// two-byte prefix and read the next eleven digits.
///
/// # Errors
///
/// Returns [`Error::Protocol`] if the reply is not `;`-terminated, does not
/// start with `IF`, or the frequency field is not eleven ASCII digits.
pub fn parse_status_frequency(response: &[u8]) -> Result<u64> {
    let body = response
        .strip_suffix(&[TERMINATOR])
        .ok_or_else(|| Error::Protocol("IF reply is missing its terminator".into()))?;
    let fields = body.strip_prefix(STATUS_PREFIX.as_bytes()).ok_or_else(|| {
        Error::Protocol(format!(
            "not an IF reply: {:?}",
            String::from_utf8_lossy(response)
        ))
    })?;

    let digits = fields.get(..FREQ_DIGITS).ok_or_else(|| {
        Error::Protocol(format!(
            "IF reply too short for frequency field: {} bytes",
            response.len()
        ))
    })?;
    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(Error::Protocol(format!(
            "invalid frequency digits: {:?}",
            String::from_utf8_lossy(digits)
        )));
    }

    std::str::from_utf8(digits)
        .map_err(|e| Error::Protocol(e.to_string()))?
        .parse::<u64>()
        .map_err(|e| Error::Protocol(format!("invalid frequency digits ({e})")))
}

/// Decode one read window as ASCII text.
///
/// # Errors
///
/// Returns [`Error::Decode`] naming the first byte outside the ASCII range.
pub fn decode_window(window: &[u8]) -> Result<&str> {
    if let Some(pos) = window.iter().position(|b| !b.is_ascii()) {
        return Err(Error::Decode(format!(
            "byte 0x{:02X} at offset {pos} is not ASCII",
            window[pos]
        )));
    }
    std::str::from_utf8(window).map_err(|e| Error::Decode(e.to_string()))
}
