//! # Error Types
//!
//! Every failure the encoder and decoder can report. Capacity and format problems are
//! detected before any output file is touched.
//!
//! Decoding images produced with a different spacing or different dimensions is not an
//! error here: nothing in the pixel data records the geometry, so such a run simply
//! returns garbage bytes.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while planning, encoding or decoding a byte stream.
#[derive(Debug, Error)]
pub enum StegoError {
    /// The byte stream (message plus terminator) does not fit in the pool.
    #[error("message needs {required} bytes but the image pool only holds {available}")]
    CapacityExceeded { required: usize, available: usize },

    /// A carrier image is not 8-bit RGB.
    #[error("{} is {found}, expected 8-bit RGB", .path.display())]
    UnsupportedImageFormat { path: PathBuf, found: String },

    /// A message character has no single-byte representation.
    #[error("character {character:?} at offset {offset} does not fit in one byte")]
    UnsupportedCharacter { character: char, offset: usize },

    /// A zero byte inside the message would end decoding early.
    #[error("message contains a zero byte at offset {offset}")]
    EmbeddedTerminator { offset: usize },

    /// Clearing the output directory would delete the carriers.
    #[error("output directory {} is the input directory", .dir.display())]
    OutputOverlapsInput { dir: PathBuf },

    #[error("spacing must be a positive integer")]
    InvalidSpacing,

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, StegoError>;
