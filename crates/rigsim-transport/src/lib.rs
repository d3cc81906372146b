//! Transport implementations for rigsim.
//!
//! This crate provides [`SerialTransport`], the concrete
//! [`Transport`](rigsim_core::Transport) the emulator listens on: a USB
//! virtual COM port, an RS-232 port, or one end of a virtual null-modem pair
//! (e.g. created with `socat`) whose other end the client under test opens.
//!
//! # Example
//!
//! ```no_run
//! use rigsim_transport::SerialTransport;
//! use rigsim_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> rigsim_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyUSB1", 57_600).await?;
//!
//! let mut buf = [0u8; 3];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

pub mod serial;

pub use serial::{SerialConfig, SerialTransport};
