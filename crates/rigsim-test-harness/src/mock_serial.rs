//! Mock transport for deterministic testing of the emulated rig.
//!
//! [`MockTransport`] implements the [`Transport`] trait by playing back a
//! script of inbound events (byte chunks the client "sends", silences, and
//! injected I/O failures) and recording everything written back in order.
//! That is enough to assert exactly what the responder put on the wire and
//! when it flushed.
//!
//! # Example
//!
//! ```
//! use rigsim_test_harness::MockTransport;
//!
//! let mut mock = MockTransport::new();
//! mock.push_bytes(b"IF;");
//! mock.push_silence();
//! assert_eq!(mock.remaining_inbound(), 2);
//! assert!(mock.wire_log().is_empty());
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use rigsim_core::error::{Error, Result};
use rigsim_core::transport::Transport;

/// One scripted inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// Bytes that become available to `receive()`.
    ///
    /// A chunk larger than the caller's buffer is handed out over several
    /// reads, like bytes waiting in a serial driver's input queue.
    Bytes(Vec<u8>),
    /// Nothing arrives: the next `receive()` waits out its timeout and
    /// returns [`Error::Timeout`].
    Silence,
    /// The next `receive()` fails with an I/O error of this kind.
    Fail(std::io::ErrorKind),
}

/// Something the code under test did to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WireEvent {
    /// Bytes passed to one `send()` call.
    Sent(Vec<u8>),
    /// A `flush()` call.
    Flushed,
}

/// A mock [`Transport`] for testing the responder without hardware.
///
/// Inbound events are consumed in order. Once the script is exhausted,
/// `receive()` behaves like an idle line: it waits for the requested
/// timeout and returns [`Error::Timeout`]. If a drain token was registered
/// with [`cancel_when_drained`](MockTransport::cancel_when_drained) it is
/// cancelled at that point instead, so a run loop stops deterministically.
#[derive(Debug)]
pub struct MockTransport {
    /// Ordered queue of inbound events.
    inbound: VecDeque<Inbound>,
    /// Whether the transport is "connected".
    connected: bool,
    /// Ordered log of sends and flushes.
    wire_log: Vec<WireEvent>,
    /// Cancelled when the inbound script runs dry.
    drain_token: Option<CancellationToken>,
}

impl MockTransport {
    /// Create a new mock transport in the connected state.
    pub fn new() -> Self {
        MockTransport {
            inbound: VecDeque::new(),
            connected: true,
            wire_log: Vec::new(),
            drain_token: None,
        }
    }

    /// Queue bytes for the code under test to read.
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.inbound.push_back(Inbound::Bytes(bytes.to_vec()));
    }

    /// Queue one read timeout.
    pub fn push_silence(&mut self) {
        self.inbound.push_back(Inbound::Silence);
    }

    /// Queue an I/O failure on the next read that reaches it.
    pub fn push_failure(&mut self, kind: std::io::ErrorKind) {
        self.inbound.push_back(Inbound::Fail(kind));
    }

    /// Cancel `token` once every scripted inbound event has been consumed.
    pub fn cancel_when_drained(&mut self, token: CancellationToken) {
        self.drain_token = Some(token);
    }

    /// Ordered log of every send and flush.
    pub fn wire_log(&self) -> &[WireEvent] {
        &self.wire_log
    }

    /// The payloads of all `send()` calls, in order.
    pub fn sent_data(&self) -> Vec<&[u8]> {
        self.wire_log
            .iter()
            .filter_map(|event| match event {
                WireEvent::Sent(bytes) => Some(bytes.as_slice()),
                WireEvent::Flushed => None,
            })
            .collect()
    }

    /// Number of `flush()` calls seen so far.
    pub fn flush_count(&self) -> usize {
        self.wire_log
            .iter()
            .filter(|event| matches!(event, WireEvent::Flushed))
            .count()
    }

    /// Number of scripted inbound events not yet consumed.
    pub fn remaining_inbound(&self) -> usize {
        self.inbound.len()
    }

    /// Set the connected state of the mock transport.
    ///
    /// When set to `false`, subsequent calls return [`Error::NotConnected`].
    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    async fn idle(&mut self, timeout: Duration) -> Result<usize> {
        if let Some(token) = &self.drain_token {
            token.cancel();
            return Err(Error::Timeout);
        }
        tokio::time::sleep(timeout).await;
        Err(Error::Timeout)
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.wire_log.push(WireEvent::Sent(data.to_vec()));
        Ok(())
    }

    async fn flush(&mut self) -> Result<()> {
        if !self.connected {
            return Err(Error::NotConnected);
        }
        self.wire_log.push(WireEvent::Flushed);
        Ok(())
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        if !self.connected {
            return Err(Error::NotConnected);
        }

        loop {
            match self.inbound.pop_front() {
                Some(Inbound::Bytes(bytes)) => {
                    if bytes.is_empty() {
                        continue;
                    }
                    let n = bytes.len().min(buf.len());
                    buf[..n].copy_from_slice(&bytes[..n]);
                    if n < bytes.len() {
                        // Leave the rest queued for the next read.
                        self.inbound.push_front(Inbound::Bytes(bytes[n..].to_vec()));
                    }
                    return Ok(n);
                }
                Some(Inbound::Silence) => {
                    tokio::time::sleep(timeout).await;
                    return Err(Error::Timeout);
                }
                Some(Inbound::Fail(kind)) => {
                    return Err(Error::Io(std::io::Error::new(kind, "injected failure")));
                }
                None => return self.idle(timeout).await,
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}
