//! In-memory transport for protocol unit tests

use super::Transport;
use crate::error::Result;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;

/// Mock transport backed by in-memory buffers.
///
/// Clones share the same buffers, so a test can keep one handle for
/// injecting device responses while the driver owns the other.
#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<Buffers>>,
}

#[derive(Default)]
struct Buffers {
    incoming: VecDeque<u8>,
    outgoing: Vec<u8>,
}

impl MockTransport {
    /// Create a new mock transport with empty buffers
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes that the driver will subsequently read
    pub fn inject(&self, data: &[u8]) {
        self.inner.lock().incoming.extend(data);
    }

    /// All bytes the driver has written so far
    pub fn written(&self) -> Vec<u8> {
        self.inner.lock().outgoing.clone()
    }

    /// Discard recorded writes
    pub fn clear_written(&self) {
        self.inner.lock().outgoing.clear();
    }
}

impl Transport for MockTransport {
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut inner = self.inner.lock();
        let n = inner.incoming.len().min(buffer.len());
        for slot in buffer.iter_mut().take(n) {
            // n is bounded by incoming.len(), pop cannot fail
            *slot = inner.incoming.pop_front().unwrap_or(0);
        }
        Ok(n)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.inner.lock().outgoing.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn available(&mut self) -> Result<usize> {
        Ok(self.inner.lock().incoming.len())
    }
}
