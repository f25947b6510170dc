//! RPLidar legacy scan protocol implementation
//!
//! Request format: sync byte (0xA5) + command byte, no payload for the
//! commands used here.
//!
//! Scan response: a 7-byte response descriptor, then an unbounded stream
//! of 5-byte measurement nodes:
//! - Byte 0: quality (6 bits) | inverted start flag | start flag
//! - Byte 1: angle_q6 low 7 bits | check bit (always 1)
//! - Byte 2: angle_q6 high 8 bits (angle_deg = angle_q6 / 64)
//! - Bytes 3-4: distance_q2 little-endian (distance_mm = distance_q2 / 4)

use crate::error::{Error, Result};
use crate::types::PolarSample;

/// Request sync byte
pub const SYNC: u8 = 0xA5;
/// Start standard scan
pub const CMD_SCAN: u8 = 0x20;
/// Stop scanning
pub const CMD_STOP: u8 = 0x25;

/// Response descriptor sync bytes
pub const DESCRIPTOR_SYNC: [u8; 2] = [0xA5, 0x5A];
/// Response descriptor length in bytes
pub const DESCRIPTOR_LEN: usize = 7;
/// Measurement node length in bytes
pub const NODE_LEN: usize = 5;

/// A decoded measurement node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasurementNode {
    /// True when this node begins a new revolution
    pub new_sweep: bool,
    /// The polar sample carried by the node
    pub sample: PolarSample,
}

/// Validate a 7-byte scan response descriptor
pub fn check_descriptor(buf: &[u8; DESCRIPTOR_LEN]) -> Result<()> {
    if buf[0] != DESCRIPTOR_SYNC[0] || buf[1] != DESCRIPTOR_SYNC[1] {
        return Err(Error::InvalidPacket(format!(
            "Bad descriptor sync: {:02X} {:02X}",
            buf[0], buf[1]
        )));
    }
    Ok(())
}

/// Decode a 5-byte measurement node.
///
/// The start flag and its inverse must disagree, and the check bit must
/// be set; anything else means the stream is misaligned and the caller
/// should resynchronize byte-by-byte.
pub fn parse_node(buf: &[u8; NODE_LEN]) -> Result<MeasurementNode> {
    let start = buf[0] & 0x01 != 0;
    let inverted_start = buf[0] & 0x02 != 0;
    if start == inverted_start {
        return Err(Error::InvalidPacket(format!(
            "Start flag mismatch: 0x{:02X}",
            buf[0]
        )));
    }
    if buf[1] & 0x01 == 0 {
        return Err(Error::InvalidPacket(format!(
            "Check bit clear: 0x{:02X}",
            buf[1]
        )));
    }

    let quality = buf[0] >> 2;
    let angle_q6 = ((buf[1] >> 1) as u16) | ((buf[2] as u16) << 7);
    let angle_deg = angle_q6 as f32 / 64.0;
    let distance_q2 = u16::from_le_bytes([buf[3], buf[4]]);
    let distance_mm = distance_q2 as f32 / 4.0;

    Ok(MeasurementNode {
        new_sweep: start,
        sample: PolarSample::new(angle_deg, distance_mm, quality),
    })
}

/// Encode a sample back into a 5-byte node. Quality saturates at the
/// 6 bits the wire format carries.
pub fn encode_node(sample: &PolarSample, new_sweep: bool) -> [u8; NODE_LEN] {
    let start_bits = if new_sweep { 0x01 } else { 0x02 };
    let angle_q6 = (sample.angle_deg * 64.0).round() as u16 & 0x7FFF;
    let distance_q2 = (sample.distance_mm.max(0.0) * 4.0).round() as u16;
    [
        (sample.quality.min(0x3F) << 2) | start_bits,
        (((angle_q6 & 0x7F) as u8) << 1) | 0x01,
        (angle_q6 >> 7) as u8,
        distance_q2 as u8,
        (distance_q2 >> 8) as u8,
    ]
}
