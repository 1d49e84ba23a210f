//! # Stream Orchestration
//!
//! Turns a message into a zero-terminated byte stream and spreads it over an ordered pool of
//! pixel grids, one byte per tile, filling each grid's tiles in order before moving to the
//! next one.
//!
//! ## Encoding
//! 1. Build a [`ByteStream`]: message bytes followed by a single `0`
//! 2. [`plan`] the stream against the per-image tile capacities. This is where
//!    [`StegoError::CapacityExceeded`] surfaces, before any grid is touched
//! 3. Feed the planned grids to a [`StreamEncoder`] in order
//!
//! ## Decoding
//! A [`StreamDecoder`] walks the grids in the same order and stops at the first zero byte.
//! If none is found the bytes read so far are returned with `terminated == false`.
//!
//! ## Characters
//! Text messages are restricted to code points `1..=255`, one byte per character, and are
//! decoded back by mapping each byte to the character with that code point.

use image::RgbImage;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::codec::{decode_byte, encode_byte};
use super::tiles::{tile_count, tiles, Spacing};
use crate::common::error::{Result, StegoError};

/// Terminator marking the end of the stream.
pub const TERMINATOR: u8 = 0;

/// Message bytes followed by exactly one [`TERMINATOR`].
#[allow(clippy::len_without_is_empty)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteStream {
    bytes: Vec<u8>,
}

impl ByteStream {
    /// Builds a stream from text, one byte per character.
    pub fn from_message(message: &str) -> Result<Self> {
        let mut bytes = Vec::with_capacity(message.len() + 1);

        for (offset, character) in message.chars().enumerate() {
            let byte = u8::try_from(u32::from(character))
                .map_err(|_| StegoError::UnsupportedCharacter { character, offset })?;
            if byte == TERMINATOR {
                return Err(StegoError::EmbeddedTerminator { offset });
            }
            bytes.push(byte);
        }

        bytes.push(TERMINATOR);
        Ok(Self { bytes })
    }

    /// Builds a stream from raw bytes, none of which may be zero.
    pub fn from_payload(payload: &[u8]) -> Result<Self> {
        if let Some(offset) = payload.iter().position(|&b| b == TERMINATOR) {
            return Err(StegoError::EmbeddedTerminator { offset });
        }

        let mut bytes = Vec::with_capacity(payload.len() + 1);
        bytes.extend_from_slice(payload);
        bytes.push(TERMINATOR);
        Ok(Self { bytes })
    }

    /// Length including the terminator.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Length of the message without the terminator.
    pub fn payload_len(&self) -> usize {
        self.bytes.len() - 1
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Bytes assigned to one image of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Position of the image in the pool.
    pub image: usize,
    /// Number of tiles that will be written, starting at the first.
    pub bytes: usize,
}

/// Splits `stream_len` bytes over images with the given tile capacities.
///
/// Images that receive nothing are left out, so the result lists exactly the images that
/// will be written.
pub fn plan(capacities: &[usize], stream_len: usize) -> Result<Vec<Allocation>> {
    let available: usize = capacities.iter().sum();
    if available < stream_len {
        return Err(StegoError::CapacityExceeded {
            required: stream_len,
            available,
        });
    }

    let mut remaining = stream_len;
    let mut allocations = Vec::new();

    for (image, &capacity) in capacities.iter().enumerate() {
        if remaining == 0 {
            break;
        }

        let bytes = remaining.min(capacity);
        if bytes == 0 {
            continue;
        }

        debug!("Image #{} gets {} of {} tiles", image, bytes, capacity);
        allocations.push(Allocation { image, bytes });
        remaining -= bytes;
    }

    Ok(allocations)
}

/// Capacity of a single grid.
pub fn grid_capacity(grid: &RgbImage, spacing: Spacing) -> usize {
    tile_count(grid.height(), grid.width(), spacing)
}

/// Writes the unencoded remainder of a stream into successive grids.
#[derive(Debug)]
pub struct StreamEncoder<'a> {
    remaining: &'a [u8],
    spacing: Spacing,
}

impl<'a> StreamEncoder<'a> {
    pub fn new(stream: &'a ByteStream, spacing: Spacing) -> Self {
        Self {
            remaining: stream.as_bytes(),
            spacing,
        }
    }

    /// Fills the tiles of `grid` in order. Returns how many bytes were written.
    pub fn embed_into(&mut self, grid: &mut RgbImage) -> usize {
        let layout = tiles(grid.height(), grid.width(), self.spacing);
        let count = layout.len().min(self.remaining.len());

        for (tile, &byte) in layout.zip(&self.remaining[..count]) {
            encode_byte(grid, tile, byte);
        }

        self.remaining = &self.remaining[count..];
        count
    }

    pub fn remaining(&self) -> usize {
        self.remaining.len()
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }
}

/// Bytes recovered from a pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub payload: Vec<u8>,
    /// False when the pool ran out before a terminator was read.
    pub terminated: bool,
}

impl Extracted {
    /// Maps each byte to the character with the same code point.
    pub fn to_text(&self) -> String {
        self.payload.iter().map(|&b| char::from(b)).collect()
    }
}

/// Reads bytes from successive grids until the terminator.
#[derive(Debug)]
pub struct StreamDecoder {
    spacing: Spacing,
    extracted: Extracted,
}

impl StreamDecoder {
    pub fn new(spacing: Spacing) -> Self {
        Self {
            spacing,
            extracted: Extracted::default(),
        }
    }

    /// Decodes the tiles of `grid` in order. Returns true once the terminator has been seen;
    /// grids fed after that are ignored.
    pub fn feed(&mut self, grid: &RgbImage) -> bool {
        if self.extracted.terminated {
            return true;
        }

        for tile in tiles(grid.height(), grid.width(), self.spacing) {
            let byte = decode_byte(grid, tile);
            if byte == TERMINATOR {
                self.extracted.terminated = true;
                return true;
            }
            self.extracted.payload.push(byte);
        }

        false
    }

    pub fn is_terminated(&self) -> bool {
        self.extracted.terminated
    }

    pub fn finish(self) -> Extracted {
        if !self.extracted.terminated {
            warn!(
                "No terminator found; returning {} bytes read before the pool ran out",
                self.extracted.payload.len()
            );
        }
        self.extracted
    }
}

/// Encodes `stream` into `grids`, checking capacity before any grid is changed.
pub fn embed(
    grids: &mut [RgbImage],
    stream: &ByteStream,
    spacing: Spacing,
) -> Result<Vec<Allocation>> {
    let capacities: Vec<usize> = grids.iter().map(|g| grid_capacity(g, spacing)).collect();
    let allocations = plan(&capacities, stream.len())?;

    let mut encoder = StreamEncoder::new(stream, spacing);
    for allocation in &allocations {
        encoder.embed_into(&mut grids[allocation.image]);
    }

    Ok(allocations)
}

/// Decodes a stream from `grids` in order.
pub fn extract(grids: &[RgbImage], spacing: Spacing) -> Extracted {
    let mut decoder = StreamDecoder::new(spacing);
    for grid in grids {
        if decoder.feed(grid) {
            break;
        }
    }
    decoder.finish()
}
