//! rigsim-core: Core traits, types, and error definitions for rigsim.
//!
//! This crate defines the pieces shared by every part of the emulator: the
//! error type, the byte-level [`Transport`] the responder talks through, and
//! amateur band lookup used to pick the emulated frequency.
//!
//! # Key types
//!
//! - [`Transport`] -- byte-level communication channel
//! - [`Band`] / [`BandRange`] -- band presets for the emulated VFO
//! - [`Error`] / [`Result`] -- error handling

pub mod band;
pub mod error;
pub mod transport;

// Re-export key types at crate root for ergonomic `use rigsim_core::*`.
pub use band::{Band, BandRange, ParseBandError};
pub use error::{Error, Result};
pub use transport::Transport;
