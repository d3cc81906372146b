//! Transport trait for the emulated rig's side of the link.
//!
//! The [`Transport`] trait abstracts over the physical link the emulator
//! listens on. `SerialTransport` in `rigsim-transport` drives a real or
//! virtual serial port; `MockTransport` from `rigsim-test-harness` plays a
//! scripted byte stream so the responder can be tested deterministically.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport.
///
/// Writing and flushing are separate operations: the responder always
/// flushes explicitly after writing a reply so nothing is left to the
/// buffering policy of the underlying device.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Write all of `data` to the transport.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Force any buffered output onto the wire.
    async fn flush(&mut self) -> Result<()>;

    /// Receive bytes into the provided buffer.
    ///
    /// Returns the number of bytes actually read, which may be fewer than
    /// `buf.len()`. Waits up to `timeout` for data to arrive; returns
    /// [`Error::Timeout`](crate::error::Error::Timeout) if nothing arrived
    /// within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport connection.
    ///
    /// After calling `close()`, subsequent calls should return
    /// [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Box<T> {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        (**self).send(data).await
    }

    async fn flush(&mut self) -> Result<()> {
        (**self).flush().await
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        (**self).receive(buf, timeout).await
    }

    async fn close(&mut self) -> Result<()> {
        (**self).close().await
    }

    fn is_connected(&self) -> bool {
        (**self).is_connected()
    }
}
