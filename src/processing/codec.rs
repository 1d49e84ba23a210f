//! # Byte Codec
//!
//! One byte per tile, most significant bit first, one bit per column. For each column the
//! lower (reference) pixel is copied onto the upper pixel and the bit is added to the upper
//! red channel, so the red difference between the pair is the bit and the green and blue
//! channels match.

use image::RgbImage;

use super::tiles::{Tile, TILE_WIDTH};

const RED: usize = 0;

/// Writes `value` into `tile`. The tile must lie inside `grid`.
pub fn encode_byte(grid: &mut RgbImage, tile: Tile, value: u8) {
    for i in 0..TILE_WIDTH {
        let x = tile.col + i;
        let bit = (value >> (TILE_WIDTH - 1 - i)) & 1;

        let reference = grid.get_pixel_mut(x, tile.row + 1);
        // Leave room for the +1 on the upper pixel.
        if reference[RED] == u8::MAX {
            reference[RED] = u8::MAX - 1;
        }

        let mut carrier = *reference;
        carrier[RED] += bit;
        grid.put_pixel(x, tile.row, carrier);
    }
}

/// Reads the byte stored in `tile`.
///
/// Only meaningful for tiles written by [`encode_byte`] with the same geometry.
pub fn decode_byte(grid: &RgbImage, tile: Tile) -> u8 {
    (0..TILE_WIDTH).fold(0u8, |byte, i| {
        let x = tile.col + i;
        let upper = grid.get_pixel(x, tile.row)[RED];
        let lower = grid.get_pixel(x, tile.row + 1)[RED];
        (byte << 1) | (upper.wrapping_sub(lower) & 1)
    })
}
