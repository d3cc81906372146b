//! Error types for rigsim.
//!
//! All fallible operations across the workspace return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer and protocol-layer
//! failures are both captured here so the responder loop can decide which
//! ones end the run.

/// The error type for all rigsim operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A transport-level error (serial port could not be opened, etc.).
    #[error("transport error: {0}")]
    Transport(String),

    /// A protocol-level error (malformed status reply, unexpected frame).
    #[error("protocol error: {0}")]
    Protocol(String),

    /// Bytes read from the channel were not valid ASCII.
    ///
    /// The responder treats this as fatal unless configured to skip.
    #[error("decode error: {0}")]
    Decode(String),

    /// Timed out waiting for bytes on the channel.
    #[error("timeout waiting for data")]
    Timeout,

    /// An invalid parameter was passed to a builder or encoder.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The channel has not been opened or was already closed.
    #[error("not connected")]
    NotConnected,

    /// The channel went away unexpectedly (device unplugged).
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns `true` for failures of the channel itself, as opposed to
    /// bad data travelling over it.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::NotConnected | Error::ConnectionLost | Error::Io(_)
        )
    }
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("port busy".into());
        assert_eq!(e.to_string(), "transport error: port busy");
    }

    #[test]
    fn error_display_protocol() {
        let e = Error::Protocol("short IF reply".into());
        assert_eq!(e.to_string(), "protocol error: short IF reply");
    }

    #[test]
    fn error_display_decode() {
        let e = Error::Decode("byte 0xFF at offset 1".into());
        assert_eq!(e.to_string(), "decode error: byte 0xFF at offset 1");
    }

    #[test]
    fn error_display_timeout() {
        assert_eq!(Error::Timeout.to_string(), "timeout waiting for data");
    }

    #[test]
    fn error_display_invalid_parameter() {
        let e = Error::InvalidParameter("frequency out of range".into());
        assert_eq!(e.to_string(), "invalid parameter: frequency out of range");
    }

    #[test]
    fn error_display_connection_states() {
        assert_eq!(Error::NotConnected.to_string(), "not connected");
        assert_eq!(Error::ConnectionLost.to_string(), "connection lost");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn io_classification() {
        assert!(Error::ConnectionLost.is_io());
        assert!(Error::NotConnected.is_io());
        assert!(Error::Transport("gone".into()).is_io());
        assert!(Error::Io(std::io::Error::other("x")).is_io());

        assert!(!Error::Decode("bad".into()).is_io());
        assert!(!Error::Timeout.is_io());
        assert!(!Error::Protocol("bad".into()).is_io());
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
