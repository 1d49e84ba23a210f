//! # Pixel Steganography
//!
//! Hides a zero-terminated byte stream in RGB pixel grids, one byte per two-row tile.
//!
//! - [`tiles`]: where the tiles of an image are
//! - [`codec`]: how one byte is written to and read from a tile
//! - [`steganography`]: how a whole stream is spread over an ordered pool of grids

pub mod codec;
pub mod steganography;
pub mod tiles;

// Re-export main types for convenience
pub use codec::{decode_byte, encode_byte};
pub use steganography::{
    embed, extract, plan, Allocation, ByteStream, Extracted, StreamDecoder, StreamEncoder,
};
pub use tiles::{tile_count, tiles, Spacing, Tile, Tiles};
