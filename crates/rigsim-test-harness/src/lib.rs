//! rigsim-test-harness: Test utilities and mock transports for rigsim.
//!
//! This crate provides [`MockTransport`], a scripted stand-in for the serial
//! port that lets the responder be driven byte-for-byte without a real or
//! virtual device attached.

pub mod mock_serial;

pub use mock_serial::{Inbound, MockTransport, WireEvent};
