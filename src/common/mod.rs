//! # Common Components
//!
//! Shared utilities used by the library and the `stego` binary.
//!
//! ## Modules
//!
//! - [`config`]: Configuration parsing utilities
//! - [`error`]: Error type returned by the encoder, decoder and pool

pub mod config;
pub mod error;

pub use error::{Result, StegoError};
