//! PNG files on disk: listing, header probing, loading and saving pixel grids.

use image::codecs::png::PngDecoder;
use image::{ColorType, DynamicImage, ImageDecoder, ImageFormat, RgbImage};
use log::debug;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::common::error::{Result, StegoError};

const OUTPUT_PREFIX: &str = "image_";

/// Dimensions and colour type of a carrier image, read from its header only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolEntry {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub color: ColorType,
}

impl PoolEntry {
    pub fn is_rgb8(&self) -> bool {
        self.color == ColorType::Rgb8
    }

    pub fn ensure_rgb8(&self) -> Result<()> {
        if self.is_rgb8() {
            Ok(())
        } else {
            Err(unsupported(&self.path, self.color))
        }
    }
}

fn unsupported(path: &Path, color: ColorType) -> StegoError {
    StegoError::UnsupportedImageFormat {
        path: path.to_path_buf(),
        found: format!("{:?}", color),
    }
}

fn is_png(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("png"))
}

/// PNG files in `dir`, sorted by file name.
pub fn list_pngs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_png(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Reads the PNG header of `path` without decoding pixel data.
pub fn probe(path: &Path) -> Result<PoolEntry> {
    let decoder = PngDecoder::new(BufReader::new(File::open(path)?))?;
    let (width, height) = decoder.dimensions();
    let entry = PoolEntry {
        path: path.to_path_buf(),
        width,
        height,
        color: decoder.color_type(),
    };
    debug!(
        "{}: {}x{} {:?}",
        path.display(),
        entry.width,
        entry.height,
        entry.color
    );
    Ok(entry)
}

/// Decodes `path` into an 8-bit RGB grid, rejecting every other colour type.
pub fn load_rgb(path: &Path) -> Result<RgbImage> {
    match image::open(path)? {
        DynamicImage::ImageRgb8(grid) => Ok(grid),
        other => Err(unsupported(path, other.color())),
    }
}

pub fn save_rgb(grid: &RgbImage, path: &Path) -> Result<()> {
    grid.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}

/// Creates `dir` if needed and deletes the PNG files already in it.
pub fn clear_pngs(dir: &Path) -> Result<usize> {
    fs::create_dir_all(dir)?;
    let stale = list_pngs(dir)?;
    for path in &stale {
        fs::remove_file(path)?;
    }
    Ok(stale.len())
}

/// File name of the `index`-th written image.
pub fn output_name(index: usize) -> String {
    format!("{}{}.png", OUTPUT_PREFIX, index)
}

fn output_index(path: &Path) -> Option<usize> {
    if !is_png(path) {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix(OUTPUT_PREFIX)?
        .parse()
        .ok()
}

/// Encoded images in `dir`, ordered by their numeric suffix. A missing directory is empty.
pub fn list_outputs(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut indexed = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if let Some(index) = output_index(&path) {
            indexed.push((index, path));
        }
    }
    indexed.sort_by_key(|(index, _)| *index);
    Ok(indexed.into_iter().map(|(_, path)| path).collect())
}
