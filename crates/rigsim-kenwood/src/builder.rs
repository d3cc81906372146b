//! ResponderBuilder -- fluent builder for constructing [`Responder`] instances.
//!
//! Separates configuration from construction so that callers can set up the
//! serial port, timeout, and the reply to emulate before the port is opened.
//! Every setting defaults to the reference emulator: `/dev/ttyUSB1` at 57600
//! baud, one second read timeout, answering `IF;` with the 14.175 MHz status
//! reply.
//!
//! # Example
//!
//! ```no_run
//! use rigsim_core::Band;
//! use rigsim_kenwood::builder::ResponderBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> rigsim_core::Result<()> {
//! let responder = ResponderBuilder::new()
//!     .serial_port("/dev/ttyUSB1")
//!     .baud_rate(57_600)
//!     .band(Band::Band40m)
//!     .read_timeout(Duration::from_millis(500))
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use rigsim_core::error::{Error, Result};
use rigsim_core::transport::Transport;
use rigsim_core::Band;
use rigsim_transport::{SerialConfig, SerialTransport};

use crate::protocol::{self, COMMAND_TOKEN, DEFAULT_FREQUENCY_HZ};
use crate::responder::{DecodePolicy, Responder, ResponderConfig};

/// Where the reply bytes come from.
#[derive(Debug, Clone)]
enum Reply {
    /// An `IF` status reply reporting this frequency.
    Frequency(u64),
    /// Caller-supplied bytes, sent verbatim.
    Raw(Vec<u8>),
}

/// Fluent builder for [`Responder`].
#[derive(Debug, Clone)]
pub struct ResponderBuilder {
    serial_port: String,
    baud_rate: u32,
    read_timeout: Duration,
    expected_command: Vec<u8>,
    reply: Reply,
    decode_policy: DecodePolicy,
}

impl ResponderBuilder {
    /// Create a builder with the reference defaults.
    pub fn new() -> Self {
        let defaults = ResponderConfig::default();
        ResponderBuilder {
            serial_port: defaults.device_path,
            baud_rate: defaults.baud_rate,
            read_timeout: defaults.read_timeout,
            expected_command: COMMAND_TOKEN.to_vec(),
            reply: Reply::Frequency(DEFAULT_FREQUENCY_HZ),
            decode_policy: defaults.decode_policy,
        }
    }

    /// Set the serial port path (e.g. `/dev/ttyUSB1` or `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = port.to_string();
        self
    }

    /// Set the baud rate (default: 57600).
    pub fn baud_rate(mut self, baud: u32) -> Self {
        self.baud_rate = baud;
        self
    }

    /// Set how long one window read waits for its bytes (default: 1s).
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Report `freq_hz` in the `IF` status reply.
    pub fn frequency(mut self, freq_hz: u64) -> Self {
        self.reply = Reply::Frequency(freq_hz);
        self
    }

    /// Report the default frequency of `band` in the `IF` status reply.
    pub fn band(self, band: Band) -> Self {
        self.frequency(band.default_freq())
    }

    /// Send these bytes verbatim instead of a generated status reply.
    pub fn response(mut self, bytes: &[u8]) -> Self {
        self.reply = Reply::Raw(bytes.to_vec());
        self
    }

    /// Answer this command instead of `IF;`.
    ///
    /// The command's length sets the read window size.
    pub fn expected_command(mut self, command: &[u8]) -> Self {
        self.expected_command = command.to_vec();
        self
    }

    /// Set how undecodable windows are handled (default: fatal).
    pub fn decode_policy(mut self, policy: DecodePolicy) -> Self {
        self.decode_policy = policy;
        self
    }

    /// Validate the settings and produce the responder configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for an empty command or reply, a
    /// zero read timeout or baud rate, or a frequency that does not fit the
    /// `IF` reply.
    pub fn config(&self) -> Result<ResponderConfig> {
        if self.expected_command.is_empty() {
            return Err(Error::InvalidParameter(
                "expected command must not be empty".into(),
            ));
        }
        if self.read_timeout.is_zero() {
            return Err(Error::InvalidParameter(
                "read timeout must be greater than zero".into(),
            ));
        }
        if self.baud_rate == 0 {
            return Err(Error::InvalidParameter(
                "baud rate must be greater than zero".into(),
            ));
        }

        let response = match &self.reply {
            Reply::Frequency(freq_hz) => protocol::encode_status_response(*freq_hz)?,
            Reply::Raw(bytes) if bytes.is_empty() => {
                return Err(Error::InvalidParameter("response must not be empty".into()));
            }
            Reply::Raw(bytes) => bytes.clone(),
        };

        Ok(ResponderConfig {
            device_path: self.serial_port.clone(),
            baud_rate: self.baud_rate,
            read_timeout: self.read_timeout,
            expected_command: self.expected_command.clone(),
            response,
            decode_policy: self.decode_policy,
        })
    }

    /// Open the serial port and construct the responder.
    ///
    /// # Errors
    ///
    /// Configuration errors from [`config`](Self::config), or
    /// [`Error::Transport`] if the port cannot be opened.
    pub async fn build(self) -> Result<Responder<SerialTransport>> {
        let config = self.config()?;
        let serial = SerialConfig {
            baud_rate: config.baud_rate,
            ..Default::default()
        };
        let transport = SerialTransport::open_with_config(&config.device_path, serial).await?;
        Ok(Responder::new(transport, config))
    }

    /// Construct the responder on a caller-provided transport.
    ///
    /// Used by tests with a `MockTransport`, or to listen on something other
    /// than a serial port. The serial port path and baud rate are kept in the
    /// configuration for logging only.
    pub fn build_with_transport<T: Transport>(self, transport: T) -> Result<Responder<T>> {
        let config = self.config()?;
        Ok(Responder::new(transport, config))
    }
}

impl Default for ResponderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::RESPONSE_TOKEN;
    use crate::responder::StepOutcome;
    use rigsim_test_harness::MockTransport;

    #[test]
    fn defaults_match_reference_config() {
        let config = ResponderBuilder::new().config().unwrap();
        assert_eq!(config, ResponderConfig::default());
        assert_eq!(config.response, RESPONSE_TOKEN);
    }

    #[test]
    fn overrides_are_applied() {
        let config = ResponderBuilder::new()
            .serial_port("/dev/pts/7")
            .baud_rate(115_200)
            .read_timeout(Duration::from_millis(250))
            .decode_policy(DecodePolicy::Skip)
            .config()
            .unwrap();
        assert_eq!(config.device_path, "/dev/pts/7");
        assert_eq!(config.baud_rate, 115_200);
        assert_eq!(config.read_timeout, Duration::from_millis(250));
        assert_eq!(config.decode_policy, DecodePolicy::Skip);
    }

    #[test]
    fn frequency_builds_status_reply() {
        let config = ResponderBuilder::new().frequency(7_150_000).config().unwrap();
        assert_eq!(
            protocol::parse_status_frequency(&config.response).unwrap(),
            7_150_000
        );
    }

    #[test]
    fn band_uses_its_default_frequency() {
        let config = ResponderBuilder::new().band(Band::Band10m).config().unwrap();
        assert_eq!(
            protocol::parse_status_frequency(&config.response).unwrap(),
            Band::Band10m.default_freq()
        );
    }

    #[test]
    fn last_reply_setting_wins() {
        let config = ResponderBuilder::new()
            .response(b"IF;")
            .frequency(21_300_000)
            .config()
            .unwrap();
        assert_eq!(
            protocol::parse_status_frequency(&config.response).unwrap(),
            21_300_000
        );

        let config = ResponderBuilder::new()
            .frequency(21_300_000)
            .response(b"?;")
            .config()
            .unwrap();
        assert_eq!(config.response, b"?;");
    }

    #[test]
    fn invalid_settings_are_rejected() {
        let cases = [
            ResponderBuilder::new().expected_command(b""),
            ResponderBuilder::new().response(b""),
            ResponderBuilder::new().read_timeout(Duration::ZERO),
            ResponderBuilder::new().baud_rate(0),
            ResponderBuilder::new().frequency(100_000_000_000),
        ];
        for builder in cases {
            assert!(
                matches!(builder.config(), Err(Error::InvalidParameter(_))),
                "{builder:?} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn build_with_transport_answers_configured_reply() {
        let mut mock = MockTransport::new();
        mock.push_bytes(b"IF;");
        let mut responder = ResponderBuilder::new()
            .band(Band::Band40m)
            .build_with_transport(mock)
            .unwrap();

        assert_eq!(responder.step().await.unwrap(), StepOutcome::Responded);
        let sent = responder.transport().sent_data();
        assert_eq!(
            protocol::parse_status_frequency(sent[0]).unwrap(),
            7_150_000
        );
    }

    #[tokio::test]
    async fn build_fails_for_missing_port() {
        let result = ResponderBuilder::new()
            .serial_port("/dev/rigsim-does-not-exist")
            .build()
            .await;
        assert!(matches!(result, Err(Error::Transport(_))));
    }
}
