//! # Image Pool
//!
//! Runs the stream codec over directories of PNG files.
//!
//! The input directory holds the carrier images, used in file name order. An encode run
//! writes `image_0.png`, `image_1.png`, ... into the output directory, one per carrier that
//! received at least one byte. A decode run reads those files back in numeric order.
//!
//! Images are handled one at a time: each is loaded, fully encoded or decoded, written and
//! dropped before the next is opened. Capacity and colour type are checked from the PNG
//! headers before the output directory is cleared, so a rejected run leaves previous output
//! in place.

pub mod report;
pub mod store;

use log::{debug, info};
use std::io;
use std::path::PathBuf;

use crate::common::config::StegoConfig;
use crate::common::error::{Result, StegoError};
use crate::processing::steganography::{plan, ByteStream, Extracted, StreamDecoder, StreamEncoder};
use crate::processing::{tile_count, Spacing};

pub use report::{EncodeReport, ImageRecord};
pub use store::PoolEntry;

#[derive(Debug, Clone)]
pub struct ImagePool {
    input_dir: PathBuf,
    output_dir: PathBuf,
    spacing: Spacing,
}

impl ImagePool {
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        spacing: Spacing,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            spacing,
        }
    }

    pub fn from_config(config: &StegoConfig) -> Self {
        Self::new(
            config.pool.input_dir.clone(),
            config.pool.output_dir.clone(),
            config.encoding.spacing,
        )
    }

    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Header information for every carrier, in file name order.
    pub fn survey(&self) -> Result<Vec<PoolEntry>> {
        store::list_pngs(&self.input_dir)?
            .iter()
            .map(|path| store::probe(path))
            .collect()
    }

    fn entry_capacity(&self, entry: &PoolEntry) -> usize {
        tile_count(entry.height, entry.width, self.spacing)
    }

    /// Total number of bytes, terminator included, the pool can carry.
    pub fn capacity(&self) -> Result<usize> {
        let entries = self.survey()?;
        Ok(entries.iter().map(|e| self.entry_capacity(e)).sum())
    }

    /// Longest message that fits together with its terminator.
    pub fn max_message_len(&self) -> Result<usize> {
        Ok(self.capacity()?.saturating_sub(1))
    }

    /// Rejects an output directory that resolves to the input directory, since clearing it
    /// would delete the carriers. A missing output directory cannot overlap.
    fn ensure_output_separate(&self) -> Result<()> {
        let output = match self.output_dir.canonicalize() {
            Ok(path) => path,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        if output == self.input_dir.canonicalize()? {
            return Err(StegoError::OutputOverlapsInput { dir: output });
        }
        Ok(())
    }

    /// Encodes a text message, one byte per character.
    pub fn encode(&self, message: &str) -> Result<EncodeReport> {
        self.encode_stream(&ByteStream::from_message(message)?)
    }

    /// Encodes raw bytes. Zero bytes are rejected since zero terminates the stream.
    pub fn encode_payload(&self, payload: &[u8]) -> Result<EncodeReport> {
        self.encode_stream(&ByteStream::from_payload(payload)?)
    }

    fn encode_stream(&self, stream: &ByteStream) -> Result<EncodeReport> {
        let entries = self.survey()?;
        let capacities: Vec<usize> = entries.iter().map(|e| self.entry_capacity(e)).collect();
        let allocations = plan(&capacities, stream.len())?;

        for allocation in &allocations {
            entries[allocation.image].ensure_rgb8()?;
        }
        self.ensure_output_separate()?;

        let cleared = store::clear_pngs(&self.output_dir)?;
        if cleared > 0 {
            debug!("Removed {} stale images from {}", cleared, self.output_dir.display());
        }

        let mut report = EncodeReport {
            spacing: self.spacing.get(),
            message_bytes: stream.payload_len(),
            stream_bytes: stream.len(),
            pool_capacity: capacities.iter().sum(),
            images: Vec::with_capacity(allocations.len()),
        };

        let mut encoder = StreamEncoder::new(stream, self.spacing);
        for (index, allocation) in allocations.iter().enumerate() {
            let entry = &entries[allocation.image];
            let mut grid = store::load_rgb(&entry.path)?;
            let written = encoder.embed_into(&mut grid);

            let output = self.output_dir.join(store::output_name(index));
            store::save_rgb(&grid, &output)?;
            info!(
                "Encoded {} bytes from {} into {}",
                written,
                entry.path.display(),
                output.display()
            );

            report.images.push(ImageRecord {
                source: entry.path.clone(),
                output,
                tile_capacity: capacities[allocation.image],
                bytes_encoded: written,
            });
        }

        info!(
            "Encoded {} bytes into {} of {} images ({:.1}% of pool capacity)",
            report.stream_bytes,
            report.images.len(),
            entries.len(),
            report.utilization()
        );

        Ok(report)
    }

    /// Decodes the message from the output directory, one character per byte.
    pub fn decode(&self) -> Result<String> {
        Ok(self.decode_payload()?.to_text())
    }

    /// Decodes the raw bytes from the output directory.
    ///
    /// Reading stops at the terminator. Without one, everything read is returned with
    /// `terminated == false`.
    pub fn decode_payload(&self) -> Result<Extracted> {
        let mut decoder = StreamDecoder::new(self.spacing);

        for path in store::list_outputs(&self.output_dir)? {
            let grid = store::load_rgb(&path)?;
            debug!("Decoding {}", path.display());
            if decoder.feed(&grid) {
                break;
            }
        }

        Ok(decoder.finish())
    }
}
