//! The emulated-radio responder loop.
//!
//! One [`Responder`] owns the transport exclusively and runs a strict
//! read / compare / reply sequence:
//!
//! 1. Read a window of `expected_command.len()` bytes (3 for `IF;`), waiting
//!    until the window is full or the read timeout elapses. A short or empty
//!    window on timeout is normal.
//! 2. Decode the window as ASCII.
//! 3. If it equals the expected command, write the reply and flush.
//! 4. Otherwise drop it. Windows are never combined, so two non-matching
//!    windows cannot add up to a match.
//!
//! Windows are taken back to back from the byte stream with no
//! realignment: bytes beyond the current window stay queued in the
//! transport and start the next one.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, trace, warn};

use rigsim_core::error::{Error, Result};
use rigsim_core::transport::Transport;

use crate::protocol::{self, COMMAND_TOKEN, RESPONSE_TOKEN};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// What to do when a window contains bytes that are not ASCII.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodePolicy {
    /// Stop the run loop and return the [`Error::Decode`].
    #[default]
    Fatal,
    /// Log the bad window, count it, and keep listening.
    Skip,
}

/// Configuration for a [`Responder`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponderConfig {
    /// Serial device the emulator listens on.
    pub device_path: String,
    /// Baud rate of the serial device.
    pub baud_rate: u32,
    /// How long one window read may wait for its bytes.
    pub read_timeout: Duration,
    /// The command to answer. Its length sets the window size.
    pub expected_command: Vec<u8>,
    /// The bytes written back for each matching window.
    pub response: Vec<u8>,
    /// Handling of undecodable windows.
    pub decode_policy: DecodePolicy,
}

impl Default for ResponderConfig {
    fn default() -> Self {
        ResponderConfig {
            device_path: "/dev/ttyUSB1".to_string(),
            baud_rate: 57_600,
            read_timeout: Duration::from_secs(1),
            expected_command: COMMAND_TOKEN.to_vec(),
            response: RESPONSE_TOKEN.to_vec(),
            decode_policy: DecodePolicy::Fatal,
        }
    }
}

/// Result of one successful responder iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The window matched and the reply was written and flushed.
    Responded,
    /// The window held `len` bytes that did not match; nothing was written.
    Ignored { len: usize },
    /// The read timed out with no bytes at all.
    Idle,
}

/// Counters kept across iterations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponderStats {
    /// Windows read, including empty ones.
    pub windows: u64,
    /// Replies sent.
    pub responses: u64,
    /// Non-empty windows that did not match.
    pub ignored: u64,
    /// Reads that timed out with no bytes.
    pub idle: u64,
    /// Windows that failed to decode as ASCII.
    pub decode_errors: u64,
}

/// Emulated radio answering a single CAT query over a [`Transport`].
pub struct Responder<T> {
    transport: T,
    config: ResponderConfig,
    stats: ResponderStats,
    window: Vec<u8>,
}

// ---------------------------------------------------------------------------
// Responder
// ---------------------------------------------------------------------------

impl<T: Transport> Responder<T> {
    /// Create a responder that owns `transport`.
    ///
    /// Prefer [`ResponderBuilder`](crate::builder::ResponderBuilder), which
    /// validates the configuration first.
    pub fn new(transport: T, config: ResponderConfig) -> Self {
        let window = vec![0u8; config.expected_command.len()];
        Responder {
            transport,
            config,
            stats: ResponderStats::default(),
            window,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &ResponderConfig {
        &self.config
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> ResponderStats {
        self.stats
    }

    /// Borrow the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Give the transport back, e.g. to close it.
    pub fn into_transport(self) -> T {
        self.transport
    }

    /// Run exactly one read / compare / reply iteration.
    ///
    /// # Errors
    ///
    /// [`Error::Decode`] if the window is not ASCII (the reply is not sent),
    /// or the transport's error if reading, writing or flushing failed.
    pub async fn step(&mut self) -> Result<StepOutcome> {
        let len = self.read_window().await?;
        self.handle_window(len).await
    }

    /// Answer matching windows until `cancel` fires or a fatal error occurs.
    ///
    /// Cancellation is only observed while waiting for bytes; once a window
    /// has matched, the reply is written and flushed before the token is
    /// checked again. Returns the final counters on cancellation.
    ///
    /// # Errors
    ///
    /// Any transport error, and [`Error::Decode`] unless the decode policy is
    /// [`DecodePolicy::Skip`].
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<ResponderStats> {
        info!(
            command = %String::from_utf8_lossy(&self.config.expected_command),
            response_len = self.config.response.len(),
            timeout_ms = self.config.read_timeout.as_millis(),
            "responder waiting for commands"
        );

        loop {
            let len = tokio::select! {
                biased;

                _ = cancel.cancelled() => {
                    debug!("responder cancelled");
                    break;
                }

                read = self.read_window() => match read {
                    Ok(len) => len,
                    Err(e) => {
                        error!(error = %e, "channel read failed, stopping");
                        return Err(e);
                    }
                },
            };

            match self.handle_window(len).await {
                Ok(_) => {}
                Err(Error::Decode(msg)) if self.config.decode_policy == DecodePolicy::Skip => {
                    warn!(error = %msg, "skipping undecodable window");
                }
                Err(e) => {
                    error!(error = %e, channel = e.is_io(), "responder stopping");
                    return Err(e);
                }
            }
        }

        info!(
            windows = self.stats.windows,
            responses = self.stats.responses,
            ignored = self.stats.ignored,
            idle = self.stats.idle,
            decode_errors = self.stats.decode_errors,
            "responder stopped"
        );
        Ok(self.stats)
    }

    /// Fill the window buffer, stopping early when the read timeout expires.
    ///
    /// Returns how many bytes of the window were filled.
    async fn read_window(&mut self) -> Result<usize> {
        let deadline = tokio::time::Instant::now() + self.config.read_timeout;
        let mut filled = 0;

        while filled < self.window.len() {
            let now = tokio::time::Instant::now();
            if now >= deadline {
                break;
            }

            match self
                .transport
                .receive(&mut self.window[filled..], deadline - now)
                .await
            {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(Error::Timeout) => break,
                Err(e) => return Err(e),
            }
        }

        Ok(filled)
    }

    /// Decide what to do with the first `len` bytes of the window.
    async fn handle_window(&mut self, len: usize) -> Result<StepOutcome> {
        self.stats.windows += 1;

        if len == 0 {
            self.stats.idle += 1;
            trace!("read timed out with no data");
            return Ok(StepOutcome::Idle);
        }

        let text = match protocol::decode_window(&self.window[..len]) {
            Ok(text) => text,
            Err(e) => {
                self.stats.decode_errors += 1;
                return Err(e);
            }
        };

        if text.as_bytes() != self.config.expected_command.as_slice() {
            self.stats.ignored += 1;
            debug!(window = %text, len, "ignoring non-matching window");
            return Ok(StepOutcome::Ignored { len });
        }

        self.transport.send(&self.config.response).await?;
        self.transport.flush().await?;
        self.stats.responses += 1;
        debug!(
            bytes = self.config.response.len(),
            responses = self.stats.responses,
            "answered command"
        );
        Ok(StepOutcome::Responded)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
