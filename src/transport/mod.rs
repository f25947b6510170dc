//! Transport layer for device I/O abstraction

use crate::error::Result;

mod mock;
mod serial;

pub use mock::MockTransport;
pub use serial::SerialTransport;

/// Byte transport for sensor communication.
///
/// Drivers are written against this trait so the same protocol code runs
/// over a real UART and over an in-memory mock in tests.
pub trait Transport: Send {
    /// Read data into buffer, returns number of bytes read (0 on timeout)
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Write data from buffer, returns number of bytes written
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Flush any pending writes (blocking until complete)
    fn flush(&mut self) -> Result<()>;

    /// Check how many bytes are available to read
    fn available(&mut self) -> Result<usize> {
        Ok(0)
    }
}
