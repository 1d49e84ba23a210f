//! # Tile Planner
//!
//! A tile is a two-row, eight-column block of pixels that carries exactly one byte.
//! Tiles start on a fixed grid derived from the image size and the [`Spacing`]:
//!
//! - rows `0, 2s, 4s, ...` while `row < height - 1`
//! - columns `0, 8s, 16s, ...` while `col < width - 7`
//!
//! The product is walked row-major. Encoder and decoder rely on this order being identical,
//! so it must never depend on anything other than `(height, width, spacing)`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::error::{Result, StegoError};

/// Rows covered by one tile.
pub const TILE_HEIGHT: u32 = 2;
/// Columns covered by one tile, one per bit.
pub const TILE_WIDTH: u32 = 8;

/// Stride multiplier between tiles along both axes.
///
/// Must match between an encode run and the decode run reading its output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Spacing(u32);

impl Spacing {
    pub const DEFAULT: Spacing = Spacing(5);

    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(StegoError::InvalidSpacing);
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    fn row_stride(self) -> u32 {
        TILE_HEIGHT.saturating_mul(self.0)
    }

    fn col_stride(self) -> u32 {
        TILE_WIDTH.saturating_mul(self.0)
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u32> for Spacing {
    type Error = StegoError;

    fn try_from(value: u32) -> Result<Self> {
        Spacing::new(value)
    }
}

impl From<Spacing> for u32 {
    fn from(spacing: Spacing) -> u32 {
        spacing.0
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-left pixel of a tile. `row + 1` is the reference row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub row: u32,
    pub col: u32,
}

/// Row-major iterator over the tiles of one image.
#[derive(Debug, Clone)]
pub struct Tiles {
    row_stride: u32,
    col_stride: u32,
    cols: usize,
    next: usize,
    len: usize,
}

impl Iterator for Tiles {
    type Item = Tile;

    fn next(&mut self) -> Option<Tile> {
        if self.next >= self.len {
            return None;
        }

        let index = self.next;
        self.next += 1;

        // Both products are bounded by the image size, so they fit in u32.
        Some(Tile {
            row: (index / self.cols) as u32 * self.row_stride,
            col: (index % self.cols) as u32 * self.col_stride,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Tiles {}

fn starts(extent: u32, span: u32, stride: u32) -> usize {
    if extent < span {
        return 0;
    }
    (extent - (span - 1)).div_ceil(stride) as usize
}

/// Enumerates the tiles of a `height` x `width` image.
///
/// Images shorter than two rows or narrower than eight columns yield nothing.
pub fn tiles(height: u32, width: u32, spacing: Spacing) -> Tiles {
    let rows = starts(height, TILE_HEIGHT, spacing.row_stride());
    let cols = starts(width, TILE_WIDTH, spacing.col_stride());

    Tiles {
        row_stride: spacing.row_stride(),
        col_stride: spacing.col_stride(),
        cols,
        next: 0,
        len: rows * cols,
    }
}

/// Number of bytes a `height` x `width` image can carry.
pub fn tile_count(height: u32, width: u32, spacing: Spacing) -> usize {
    tiles(height, width, spacing).len()
}
