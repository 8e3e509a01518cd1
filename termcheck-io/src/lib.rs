//! # Termcheck IO
//!
//! The Transport Layer.
//! Owns the byte-oriented channel the exerciser writes into: a serial port
//! for real hardware, or an in-memory recorder for dry runs and tests.

use serialport::{DataBits, FlowControl, SerialPort};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Device node the test terminal is normally attached to.
pub const DEFAULT_PORT: &str = "/dev/ttyUSB0";

/// Line speed of the test terminal.
pub const DEFAULT_BAUD: u32 = 9600;

/// Upper bound on a single blocking write before the port reports `TimedOut`.
const WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Errors from acquiring or enumerating a channel.
#[derive(thiserror::Error, Debug)]
pub enum ChannelError {
    #[error("Failed to open {port}: {source}")]
    Unavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },

    #[error("Unsupported data bits for {port}: {bits}")]
    InvalidDataBits { port: String, bits: u8 },

    #[error("Port scan failed: {0}")]
    Scan(#[source] serialport::Error),
}

/// Configuration for a Serial Connection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialConfig {
    pub port_name: String,
    pub baud_rate: u32,
    pub data_bits: u8,
    pub flow_control: bool,
}

impl Default for SerialConfig {
    /// Fixed test rig settings; parity and stop bits stay at the library defaults.
    fn default() -> Self {
        Self {
            port_name: DEFAULT_PORT.to_string(),
            baud_rate: DEFAULT_BAUD,
            data_bits: 8,
            flow_control: false,
        }
    }
}

impl SerialConfig {
    fn data_bits(&self) -> Result<DataBits, ChannelError> {
        match self.data_bits {
            5 => Ok(DataBits::Five),
            6 => Ok(DataBits::Six),
            7 => Ok(DataBits::Seven),
            8 => Ok(DataBits::Eight),
            bits => Err(ChannelError::InvalidDataBits {
                port: self.port_name.clone(),
                bits,
            }),
        }
    }

    fn flow_control(&self) -> FlowControl {
        if self.flow_control {
            FlowControl::Hardware
        } else {
            FlowControl::None
        }
    }
}

/// An exclusively owned, open serial port.
///
/// The port is closed when the channel is dropped.
pub struct SerialChannel {
    name: String,
    port: Box<dyn SerialPort>,
}

impl std::fmt::Debug for SerialChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerialChannel")
            .field("name", &self.name)
            .field("port", &"Box<dyn SerialPort>")
            .finish()
    }
}

impl SerialChannel {
    /// Open the port described by `config`.
    pub fn open(config: &SerialConfig) -> Result<Self, ChannelError> {
        let port = serialport::new(&config.port_name, config.baud_rate)
            .data_bits(config.data_bits()?)
            .flow_control(config.flow_control())
            .timeout(WRITE_TIMEOUT)
            .open()
            .map_err(|source| ChannelError::Unavailable {
                port: config.port_name.clone(),
                source,
            })?;

        tracing::info!(
            port = %config.port_name,
            baud = config.baud_rate,
            "Serial channel open"
        );

        Ok(Self {
            name: config.port_name.clone(),
            port,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Write for SerialChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.port.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.port.flush()
    }
}

/// Names of the serial ports currently present on this machine.
pub fn scan_ports() -> Result<Vec<String>, ChannelError> {
    let ports = serialport::available_ports().map_err(ChannelError::Scan)?;
    Ok(ports.into_iter().map(|p| p.port_name).collect())
}

// ════════════════════════════════════════════════════════════════════
// In-memory channel
// ════════════════════════════════════════════════════════════════════

#[derive(Debug, Default)]
struct Recording {
    records: Vec<Vec<u8>>,
    flushes: usize,
    fail_after: Option<usize>,
}

/// Channel that keeps every `write` call as its own record.
///
/// Clones share one buffer, so a handle kept by the caller sees what a run
/// wrote through another handle.
#[derive(Debug, Clone, Default)]
pub struct RecordingChannel {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `records` writes, then fail every later one with `BrokenPipe`.
    pub fn failing_after(records: usize) -> Self {
        let channel = Self::default();
        channel.lock().fail_after = Some(records);
        channel
    }

    fn lock(&self) -> MutexGuard<'_, Recording> {
        // A panicked writer leaves the buffer in a usable state.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Every write, in order.
    pub fn records(&self) -> Vec<Vec<u8>> {
        self.lock().records.clone()
    }

    /// All recorded bytes concatenated.
    pub fn bytes(&self) -> Vec<u8> {
        self.lock().records.concat()
    }

    pub fn flushes(&self) -> usize {
        self.lock().flushes
    }

    pub fn clear(&self) {
        let mut rec = self.lock();
        rec.records.clear();
        rec.flushes = 0;
    }
}

impl Write for RecordingChannel {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut rec = self.lock();
        if rec.fail_after.is_some_and(|limit| rec.records.len() >= limit) {
            return Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                "recording channel closed",
            ));
        }
        rec.records.push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock().flushes += 1;
        Ok(())
    }
}
