//! # Tile Stego
//!
//! Hides a message in a pool of RGB PNG images by writing each byte into a two-row,
//! eight-column tile: the red channel of each upper pixel differs from the pixel below it by
//! one bit of the byte. The message is followed by a zero byte so the decoder knows where
//! to stop.
//!
//! - [`processing`]: the pixel-level codec over in-memory grids
//! - [`pool`]: directories of PNG carriers and encoded outputs
//! - [`common`]: configuration and errors

pub mod common;
pub mod pool;
pub mod processing;
pub mod utils;

pub use common::{Result, StegoError};
pub use pool::ImagePool;
pub use processing::Spacing;
