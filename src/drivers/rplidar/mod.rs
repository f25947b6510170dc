//! RPLidar rotating range scanner driver

mod protocol;

use crate::drivers::RangeScanner;
use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::SweepScan;

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use protocol::{encode_node, MeasurementNode};

/// How long to wait for the scan response descriptor after the start command
const DESCRIPTOR_TIMEOUT: Duration = Duration::from_secs(2);

/// RPLidar driver speaking the legacy scan protocol over UART.
///
/// One `get_scan` call drains whatever bytes the scanner has produced and
/// returns a sweep once the stream crosses a revolution boundary (node
/// with the start flag set).
pub struct RplidarDriver {
    transport: Arc<Mutex<Box<dyn Transport>>>,
    scanning: Arc<Mutex<bool>>,
    /// Unparsed bytes carried over between get_scan calls
    rx_buffer: Vec<u8>,
    /// Samples of the revolution currently in progress
    pending: SweepScan,
    /// Completed sweeps not yet handed to the caller
    ready: Vec<SweepScan>,
}

impl RplidarDriver {
    /// Create new RPLidar driver
    pub fn new<T: Transport + 'static>(transport: T) -> Result<Self> {
        log::info!("RPLidar: Driver initialized");
        Ok(RplidarDriver {
            transport: Arc::new(Mutex::new(Box::new(transport) as Box<dyn Transport>)),
            scanning: Arc::new(Mutex::new(false)),
            rx_buffer: Vec::new(),
            pending: SweepScan::new(),
            ready: Vec::new(),
        })
    }

    fn send_command(&self, cmd: u8) -> Result<()> {
        let mut transport = self.transport.lock();
        transport.write(&[protocol::SYNC, cmd])?;
        transport.flush()?;
        Ok(())
    }

    /// Read the 7-byte scan response descriptor, waiting up to
    /// `DESCRIPTOR_TIMEOUT` for the device to answer.
    fn read_descriptor(&self) -> Result<()> {
        let mut buf = [0u8; protocol::DESCRIPTOR_LEN];
        let mut offset = 0;
        let deadline = Instant::now() + DESCRIPTOR_TIMEOUT;

        let mut transport = self.transport.lock();
        while offset < buf.len() {
            let read = transport.read(&mut buf[offset..])?;
            offset += read;
            if read == 0 {
                if Instant::now() >= deadline {
                    return Err(Error::Timeout);
                }
                std::thread::sleep(Duration::from_millis(5));
            }
        }

        protocol::check_descriptor(&buf)
    }

    /// Pull available bytes off the wire into the reassembly buffer
    fn fill_rx_buffer(&mut self) -> Result<()> {
        let mut transport = self.transport.lock();
        loop {
            let available = transport.available()?;
            if available == 0 {
                return Ok(());
            }
            let start = self.rx_buffer.len();
            self.rx_buffer.resize(start + available, 0);
            let read = transport.read(&mut self.rx_buffer[start..])?;
            self.rx_buffer.truncate(start + read);
            if read == 0 {
                return Ok(());
            }
        }
    }

    /// Decode buffered bytes into measurement nodes, closing sweeps at
    /// revolution boundaries. Misaligned bytes are skipped one at a time
    /// until the stream locks back on.
    fn drain_nodes(&mut self) {
        let mut consumed = 0;
        while self.rx_buffer.len() - consumed >= protocol::NODE_LEN {
            let chunk: [u8; protocol::NODE_LEN] = self.rx_buffer
                [consumed..consumed + protocol::NODE_LEN]
                .try_into()
                .unwrap_or([0; protocol::NODE_LEN]);

            match protocol::parse_node(&chunk) {
                Ok(node) => {
                    consumed += protocol::NODE_LEN;
                    if node.new_sweep && !self.pending.is_empty() {
                        let mut completed = std::mem::take(&mut self.pending);
                        completed.timestamp_ms = Some(now_ms());
                        self.ready.push(completed);
                    }
                    self.pending.push(node.sample);
                }
                Err(_) => {
                    // Resync: drop a single byte and retry
                    consumed += 1;
                }
            }
        }
        self.rx_buffer.drain(..consumed);
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

impl RangeScanner for RplidarDriver {
    fn start(&mut self) -> Result<()> {
        log::info!("RPLidar: Starting scan");
        // Stop any previous session so the descriptor we read belongs
        // to our start request
        self.send_command(protocol::CMD_STOP)?;
        std::thread::sleep(Duration::from_millis(10));

        self.send_command(protocol::CMD_SCAN)?;
        self.read_descriptor()?;

        self.rx_buffer.clear();
        self.pending = SweepScan::new();
        self.ready.clear();
        *self.scanning.lock() = true;
        Ok(())
    }

    fn get_scan(&mut self) -> Result<Option<SweepScan>> {
        if !*self.scanning.lock() {
            return Ok(None);
        }

        self.fill_rx_buffer()?;
        self.drain_nodes();

        if self.ready.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.ready.remove(0)))
        }
    }

    fn stop(&mut self) -> Result<()> {
        log::info!("RPLidar: Stopping scan");
        *self.scanning.lock() = false;
        self.send_command(protocol::CMD_STOP)
    }

    fn is_scanning(&self) -> bool {
        *self.scanning.lock()
    }
}
