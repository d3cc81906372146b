//! Serial port transport for the emulated rig.
//!
//! This module provides [`SerialTransport`], which implements the
//! [`Transport`] trait on top of `tokio-serial`. The emulator opens the
//! port a CAT client would normally find the radio on, so from the client's
//! point of view nothing changes except that no radio is attached.
//!
//! Kenwood-style CAT links run 8N1 without flow control; the baud rate must
//! match the client's setting (57600 for the band decoder this emulator was
//! written against).
//!
//! # Example
//!
//! ```no_run
//! use rigsim_transport::{SerialConfig, SerialTransport};
//!
//! # async fn example() -> rigsim_core::Result<()> {
//! let config = SerialConfig {
//!     baud_rate: 57_600,
//!     ..Default::default()
//! };
//! let transport = SerialTransport::open_with_config("/dev/ttyUSB1", config).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use rigsim_core::error::{Error, Result};
use rigsim_core::transport::Transport;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPort, SerialPortBuilderExt, SerialStream};

/// Baud rate used when none is given.
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

/// Serial port configuration.
///
/// Framing is fixed at 8N1 with no flow control; only the baud rate varies.
#[derive(Debug, Clone)]
pub struct SerialConfig {
    /// Baud rate (e.g., 9600, 38400, 57600, 115200)
    pub baud_rate: u32,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

/// Map an I/O error from the port onto the rigsim error taxonomy.
///
/// A vanished device (USB adapter unplugged, pty peer closed) surfaces as
/// [`Error::ConnectionLost`]; everything else stays an [`Error::Io`].
fn map_io_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe
        | std::io::ErrorKind::NotConnected
        | std::io::ErrorKind::UnexpectedEof => Error::ConnectionLost,
        _ => Error::Io(e),
    }
}

/// Serial port transport for the emulated rig.
pub struct SerialTransport {
    /// The underlying serial port stream
    port: Option<SerialStream>,
    /// Port name for logging/debugging
    port_name: String,
}

impl SerialTransport {
    /// Open a serial port with the given baud rate and 8N1 settings.
    ///
    /// # Arguments
    ///
    /// * `port` - Serial port path (e.g., "/dev/ttyUSB1" on Linux, "COM3" on Windows)
    /// * `baud_rate` - Baud rate (e.g., 57600)
    pub async fn open(port: &str, baud_rate: u32) -> Result<Self> {
        let config = SerialConfig {
            baud_rate,
            ..Default::default()
        };
        Self::open_with_config(port, config).await
    }

    /// Open a serial port with full configuration control.
    pub async fn open_with_config(port: &str, config: SerialConfig) -> Result<Self> {
        tracing::debug!(
            port = %port,
            baud_rate = config.baud_rate,
            "Opening serial port (8N1, no flow control)"
        );

        let serial_stream = tokio_serial::new(port, config.baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .stop_bits(tokio_serial::StopBits::One)
            .parity(tokio_serial::Parity::None)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Transport(format!("Failed to open serial port {}: {}", port, e))
            })?;

        tracing::info!(port = %port, baud_rate = config.baud_rate, "Serial port opened successfully");

        Ok(Self::from_stream(serial_stream, port))
    }

    /// Wrap an already-open stream, de-asserting DTR and RTS first.
    ///
    /// A port that cannot drive modem lines (a pty, some USB adapters) is
    /// still returned; the failure is logged at warn.
    pub fn from_stream(mut stream: SerialStream, port: &str) -> Self {
        if let Err(e) = stream.write_data_terminal_ready(false) {
            tracing::warn!(port = %port, error = %e, "Failed to de-assert DTR");
        }
        if let Err(e) = stream.write_request_to_send(false) {
            tracing::warn!(port = %port, error = %e, "Failed to de-assert RTS");
        }

        Self {
            port: Some(stream),
            port_name: port.to_string(),
        }
    }

    /// Get the name of the serial port.
    pub fn port_name(&self) -> &str {
        &self.port_name
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        tracing::trace!(
            port = %self.port_name,
            bytes = data.len(),
            data = ?String::from_utf8_lossy(data),
            "Sending data"
        );

        port.write_all(data).await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to send data");
            map_io_error(e)
        })
    }

    async fn flush(&mut self) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        port.flush().await.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "Failed to flush serial port");
            map_io_error(e)
        })?;

        tracing::trace!(port = %self.port_name, "Output flushed");
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        match tokio::time::timeout(timeout, port.read(buf)).await {
            // A zero-length read on a tty means the other end hung up.
            Ok(Ok(0)) if !buf.is_empty() => {
                tracing::error!(port = %self.port_name, "Serial port reached end of stream");
                Err(Error::ConnectionLost)
            }
            Ok(Ok(n)) => {
                tracing::trace!(
                    port = %self.port_name,
                    bytes = n,
                    data = ?&buf[..n],
                    "Received data"
                );
                Ok(n)
            }
            Ok(Err(e)) => {
                tracing::error!(port = %self.port_name, error = %e, "Failed to receive data");
                Err(map_io_error(e))
            }
            Err(_) => Err(Error::Timeout),
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut port) = self.port.take() {
            tracing::debug!(port = %self.port_name, "Closing serial port");

            if let Err(e) = port.flush().await {
                tracing::warn!(
                    port = %self.port_name,
                    error = %e,
                    "Failed to flush before closing (continuing anyway)"
                );
            }

            tracing::info!(port = %self.port_name, "Serial port closed");
        }

        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}
