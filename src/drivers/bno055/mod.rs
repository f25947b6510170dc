//! BNO055 inertial orientation sensor driver (UART mode)

mod protocol;

use crate::drivers::OrientationSensor;
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::Orientation;

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How long to wait for a register response
const RESPONSE_TIMEOUT: Duration = Duration::from_millis(100);

/// BNO055 driver reading fused Euler angles over the UART register
/// protocol.
///
/// The sensor is switched into NDOF fusion mode at construction; each
/// `read` issues one register read for the Euler block. A bus-level
/// status response is reported as an absent reading, matching the
/// sensor's behavior while fusion has not converged.
pub struct Bno055Driver {
    transport: Arc<Mutex<Box<dyn Transport>>>,
}

impl Bno055Driver {
    /// Create new BNO055 driver and enter NDOF fusion mode
    pub fn new<T: Transport + 'static>(transport: T) -> Result<Self> {
        let driver = Bno055Driver {
            transport: Arc::new(Mutex::new(Box::new(transport) as Box<dyn Transport>)),
        };

        driver.set_mode(protocol::MODE_NDOF)?;
        log::info!("BNO055: Driver initialized in NDOF mode");
        Ok(driver)
    }

    fn set_mode(&self, mode: u8) -> Result<()> {
        let mut transport = self.transport.lock();
        transport.write(&protocol::write_request(protocol::REG_OPR_MODE, mode))?;
        transport.flush()?;
        drop(transport);

        let mut ack = [0u8; 2];
        self.read_exact(&mut ack)?;
        if ack[0] != protocol::STATUS_RESPONSE || ack[1] != protocol::STATUS_WRITE_SUCCESS {
            return Err(Error::InvalidPacket(format!(
                "Mode write not acknowledged: {:02X} {:02X}",
                ack[0], ack[1]
            )));
        }

        // Mode switches take up to 19ms per the datasheet
        std::thread::sleep(Duration::from_millis(20));
        Ok(())
    }

    /// Read exactly `buf.len()` bytes, bounded by `RESPONSE_TIMEOUT`
    fn read_exact(&self, buf: &mut [u8]) -> Result<()> {
        let mut transport = self.transport.lock();
        let deadline = Instant::now() + RESPONSE_TIMEOUT;
        let mut offset = 0;

        while offset < buf.len() {
            let read = transport.read(&mut buf[offset..])?;
            offset += read;
            if read == 0 {
                if Instant::now() >= deadline {
                    return Err(Error::Timeout);
                }
                std::thread::sleep(Duration::from_millis(2));
            }
        }
        Ok(())
    }
}

impl OrientationSensor for Bno055Driver {
    fn read(&mut self) -> Result<Option<Orientation>> {
        {
            let mut transport = self.transport.lock();
            transport.write(&protocol::read_request(
                protocol::REG_EULER,
                protocol::EULER_LEN as u8,
            ))?;
            transport.flush()?;
        }

        let mut header = [0u8; 2];
        self.read_exact(&mut header)?;

        if header[0] == protocol::STATUS_RESPONSE {
            // Sensor declined the read; no orientation available right now
            log::debug!(
                "BNO055: No reading ({})",
                protocol::read_error_description(header[1])
            );
            return Ok(None);
        }

        let len = protocol::check_read_header(&header)?;
        if len != protocol::EULER_LEN {
            return Err(Error::InvalidPacket(format!(
                "Euler block length {} (expected {})",
                len,
                protocol::EULER_LEN
            )));
        }

        let mut data = [0u8; protocol::EULER_LEN];
        self.read_exact(&mut data)?;
        Ok(Some(protocol::parse_euler(&data)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::MockTransport;
    use approx::assert_relative_eq;

    const MODE_ACK: [u8; 2] = [0xEE, 0x01];

    fn euler_response(yaw: f32, pitch: f32, roll: f32) -> Vec<u8> {
        let mut out = vec![0xBB, 0x06];
        out.extend_from_slice(&((yaw * 16.0) as i16).to_le_bytes());
        out.extend_from_slice(&((roll * 16.0) as i16).to_le_bytes());
        out.extend_from_slice(&((pitch * 16.0) as i16).to_le_bytes());
        out
    }

    #[test]
    fn test_init_enters_ndof_mode() {
        let wire = MockTransport::new();
        wire.inject(&MODE_ACK);

        let _driver = Bno055Driver::new(wire.clone()).unwrap();
        assert_eq!(wire.written(), vec![0xAA, 0x00, 0x3D, 0x01, 0x0C]);
    }

    #[test]
    fn test_read_orientation() {
        let wire = MockTransport::new();
        wire.inject(&MODE_ACK);
        let mut driver = Bno055Driver::new(wire.clone()).unwrap();

        wire.inject(&euler_response(270.0, -5.5, 12.0));
        let o = driver.read().unwrap().expect("orientation");

        assert_relative_eq!(o.yaw_deg, 270.0, epsilon = 0.1);
        assert_relative_eq!(o.pitch_deg, -5.5, epsilon = 0.1);
        assert_relative_eq!(o.roll_deg, 12.0, epsilon = 0.1);
    }

    #[test]
    fn test_bus_error_is_absent_reading() {
        let wire = MockTransport::new();
        wire.inject(&MODE_ACK);
        let mut driver = Bno055Driver::new(wire.clone()).unwrap();

        wire.inject(&[0xEE, 0x07]); // bus over-run
        assert!(driver.read().unwrap().is_none());
    }

    #[test]
    fn test_garbled_response_is_error() {
        let wire = MockTransport::new();
        wire.inject(&MODE_ACK);
        let mut driver = Bno055Driver::new(wire.clone()).unwrap();

        wire.inject(&[0x42, 0x06, 0, 0, 0, 0, 0, 0]);
        assert!(driver.read().is_err());
    }
}
