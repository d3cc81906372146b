//! Emulated Kenwood-style CAT transceiver for rigsim.
//!
//! This crate answers the Kenwood `IF;` information query with a canned
//! status reply, so client-side CAT code (band decoders, antenna switches,
//! loggers) can be exercised with no radio attached. It provides:
//!
//! - **Protocol** ([`protocol`]) -- the command and reply tokens, `IF` reply
//!   encoding for any frequency, and ASCII window decoding.
//! - **Responder** ([`responder`]) -- the read / compare / reply loop with
//!   explicit per-iteration results and cancellation.
//! - **Builder** ([`builder`]) -- fluent construction with the reference
//!   defaults (57600 baud, 1 s timeout, 14.175 MHz).
//!
//! # Example
//!
//! ```
//! use rigsim_kenwood::protocol::{encode_status_response, parse_status_frequency, RESPONSE_TOKEN};
//!
//! let reply = encode_status_response(14_175_000).unwrap();
//! assert_eq!(reply, RESPONSE_TOKEN);
//! assert_eq!(parse_status_frequency(&reply).unwrap(), 14_175_000);
//! ```

pub mod builder;
pub mod protocol;
pub mod responder;

// Re-export the primary types for ergonomic `use rigsim_kenwood::*`.
pub use builder::ResponderBuilder;
pub use responder::{DecodePolicy, Responder, ResponderConfig, ResponderStats, StepOutcome};
