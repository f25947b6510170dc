//! BNO055 UART register protocol implementation
//!
//! Register read:  `AA 01 <reg> <len>` → `BB <len> <data...>` on success,
//! `EE <status>` on failure.
//! Register write: `AA 00 <reg> <len> <data...>` → `EE 01` on success.
//!
//! Euler angles live in six consecutive registers starting at 0x1A
//! (heading, roll, pitch), each a signed 16-bit little-endian value in
//! 1/16-degree units.

use crate::error::{Error, Result};
use crate::types::Orientation;

/// Frame start byte for requests
pub const FRAME_START: u8 = 0xAA;
/// Response header for successful reads
pub const READ_RESPONSE: u8 = 0xBB;
/// Response header for status/acknowledge
pub const STATUS_RESPONSE: u8 = 0xEE;
/// Write acknowledge status
pub const STATUS_WRITE_SUCCESS: u8 = 0x01;

/// Operating mode register
pub const REG_OPR_MODE: u8 = 0x3D;
/// Nine-degrees-of-freedom fusion mode
pub const MODE_NDOF: u8 = 0x0C;
/// First Euler angle register (heading LSB)
pub const REG_EULER: u8 = 0x1A;
/// Euler block length: heading, roll, pitch as i16 each
pub const EULER_LEN: usize = 6;

/// Degrees per LSB of the Euler registers
const EULER_SCALE: f32 = 1.0 / 16.0;

/// Build a register read request frame
pub fn read_request(reg: u8, len: u8) -> [u8; 4] {
    [FRAME_START, 0x01, reg, len]
}

/// Build a single-register write request frame
pub fn write_request(reg: u8, value: u8) -> [u8; 5] {
    [FRAME_START, 0x00, reg, 0x01, value]
}

/// Decode the six-byte Euler block into an orientation.
///
/// The sensor reports heading/roll/pitch in that register order; the
/// rig convention is yaw/pitch/roll.
pub fn parse_euler(data: &[u8; EULER_LEN]) -> Orientation {
    let heading = i16::from_le_bytes([data[0], data[1]]) as f32 * EULER_SCALE;
    let roll = i16::from_le_bytes([data[2], data[3]]) as f32 * EULER_SCALE;
    let pitch = i16::from_le_bytes([data[4], data[5]]) as f32 * EULER_SCALE;
    Orientation::new(heading, pitch, roll)
}

/// Interpret a status response byte from a read request.
///
/// Any status on a read means the register content is unavailable right
/// now (bus over-run, fusion not ready); the caller treats it as an
/// absent reading rather than a failure.
pub fn read_error_description(status: u8) -> &'static str {
    match status {
        0x02 => "read fail",
        0x04 => "register map invalid address",
        0x05 => "register map write disabled",
        0x07 => "bus over-run",
        0x0A => "receive character timeout",
        _ => "unknown status",
    }
}

/// Validate a read-response header byte, returning the payload length
pub fn check_read_header(header: &[u8; 2]) -> Result<usize> {
    if header[0] != READ_RESPONSE {
        return Err(Error::InvalidPacket(format!(
            "Unexpected response header: 0x{:02X}",
            header[0]
        )));
    }
    Ok(header[1] as usize)
}
