use image::{Rgb, RgbImage, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use tile_stego::pool::store;
use tile_stego::{ImagePool, Spacing, StegoError};

struct Workspace {
    _dir: TempDir,
    input: PathBuf,
    output: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("pool");
        let output = dir.path().join("encoded");
        fs::create_dir(&input).unwrap();
        Self {
            _dir: dir,
            input,
            output,
        }
    }

    fn add_rgb(&self, name: &str, width: u32, height: u32, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        let grid = RgbImage::from_fn(width, height, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]));
        grid.save(self.input.join(name)).unwrap();
    }

    fn pool(&self, spacing: u32) -> ImagePool {
        ImagePool::new(&self.input, &self.output, Spacing::new(spacing).unwrap())
    }

    fn outputs(&self) -> Vec<String> {
        store::list_outputs(&self.output)
            .unwrap()
            .iter()
            .map(|p| file_name(p))
            .collect()
    }
}

fn file_name(path: &Path) -> String {
    path.file_name().unwrap().to_string_lossy().into_owned()
}

// spacing 1: an 8x10 image has 5 tiles
fn two_small_images() -> Workspace {
    let ws = Workspace::new();
    ws.add_rgb("a.png", 8, 10, 1);
    ws.add_rgb("b.png", 8, 10, 2);
    ws
}

#[test]
fn test_capacity_is_sum_of_images() {
    let ws = Workspace::new();
    ws.add_rgb("a.png", 8, 10, 1);
    ws.add_rgb("b.png", 17, 5, 2);
    ws.add_rgb("tiny.png", 7, 50, 3);
    fs::write(ws.input.join("readme.txt"), "not an image").unwrap();

    let pool = ws.pool(1);
    assert_eq!(pool.survey().unwrap().len(), 3);
    assert_eq!(pool.capacity().unwrap(), 5 + 4);
    assert_eq!(pool.max_message_len().unwrap(), 8);
}

#[test]
fn test_message_spanning_two_images() {
    let ws = two_small_images();
    let pool = ws.pool(1);

    let report = pool.encode("ninechars").unwrap();
    assert_eq!(report.stream_bytes, 10);
    assert_eq!(report.images.len(), 2);
    assert_eq!(ws.outputs(), ["image_0.png", "image_1.png"]);

    assert_eq!(pool.decode().unwrap(), "ninechars");
}

#[test]
fn test_short_message_writes_first_image_only() {
    let ws = two_small_images();
    let pool = ws.pool(1);

    let report = pool.encode("four").unwrap();
    assert_eq!(report.images.len(), 1);
    assert_eq!(report.images[0].bytes_encoded, 5);
    assert_eq!(file_name(&report.images[0].source), "a.png");
    assert_eq!(ws.outputs(), ["image_0.png"]);

    assert_eq!(pool.decode().unwrap(), "four");
}

#[test]
fn test_output_matches_source_dimensions() {
    let ws = Workspace::new();
    ws.add_rgb("photo.png", 123, 77, 9);
    let pool = ws.pool(5);

    pool.encode("hello").unwrap();
    let encoded = store::load_rgb(&ws.output.join("image_0.png")).unwrap();
    assert_eq!(encoded.dimensions(), (123, 77));
}

#[test]
fn test_capacity_exceeded_leaves_output_untouched() {
    let ws = two_small_images();
    let pool = ws.pool(1);
    pool.encode("keep").unwrap();
    let before = fs::read(ws.output.join("image_0.png")).unwrap();

    let err = pool.encode("tencharsxx").unwrap_err();
    assert!(matches!(
        err,
        StegoError::CapacityExceeded { required: 11, available: 10 }
    ));
    assert_eq!(fs::read(ws.output.join("image_0.png")).unwrap(), before);
    assert_eq!(pool.decode().unwrap(), "keep");
}

#[test]
fn test_non_rgb_image_rejected_before_writing() {
    let ws = Workspace::new();
    RgbaImage::new(8, 10).save(ws.input.join("a.png")).unwrap();
    ws.add_rgb("b.png", 8, 10, 2);
    let pool = ws.pool(1);

    let err = pool.encode("hi").unwrap_err();
    assert!(matches!(err, StegoError::UnsupportedImageFormat { .. }));
    assert!(!ws.output.exists());
}

#[test]
fn test_unused_non_rgb_image_is_ignored() {
    let ws = two_small_images();
    RgbaImage::new(8, 10).save(ws.input.join("c.png")).unwrap();
    let pool = ws.pool(1);

    pool.encode("abc").unwrap();
    assert_eq!(pool.decode().unwrap(), "abc");
}

#[test]
fn test_fresh_run_clears_stale_outputs() {
    let ws = two_small_images();
    let pool = ws.pool(1);

    pool.encode("ninechars").unwrap();
    assert_eq!(ws.outputs().len(), 2);

    pool.encode("ab").unwrap();
    assert_eq!(ws.outputs(), ["image_0.png"]);
    assert_eq!(pool.decode().unwrap(), "ab");
}

#[test]
fn test_decode_stops_at_terminator() {
    let ws = two_small_images();
    let pool = ws.pool(1);
    pool.encode("abc").unwrap();

    // a leftover image after the terminator must not be read
    let mut rng = StdRng::seed_from_u64(99);
    let noise = RgbImage::from_fn(8, 10, |_, _| Rgb([rng.gen(), rng.gen(), rng.gen()]));
    noise.save(ws.output.join("image_1.png")).unwrap();

    let extracted = pool.decode_payload().unwrap();
    assert!(extracted.terminated);
    assert_eq!(extracted.payload, b"abc");
}

#[test]
fn test_decode_without_output_is_empty() {
    let ws = Workspace::new();
    let extracted = ws.pool(5).decode_payload().unwrap();
    assert!(!extracted.terminated);
    assert!(extracted.payload.is_empty());
}

#[test]
fn test_binary_payload_round_trip() {
    let ws = Workspace::new();
    ws.add_rgb("cover.png", 64, 64, 5);
    let pool = ws.pool(1);

    let payload: Vec<u8> = (1..=255).collect();
    assert_eq!(pool.capacity().unwrap(), 32 * 8);
    pool.encode_payload(&payload).unwrap();

    let extracted = pool.decode_payload().unwrap();
    assert!(extracted.terminated);
    assert_eq!(extracted.payload, payload);
}

#[test]
fn test_latin1_text_round_trip() {
    let ws = Workspace::new();
    ws.add_rgb("cover.png", 100, 100, 6);
    let pool = ws.pool(1);

    pool.encode("café ÿ").unwrap();
    assert_eq!(pool.decode().unwrap(), "café ÿ");
}

#[test]
fn test_empty_message_writes_terminator() {
    let ws = two_small_images();
    let pool = ws.pool(1);

    let report = pool.encode("").unwrap();
    assert_eq!(report.stream_bytes, 1);
    assert_eq!(ws.outputs(), ["image_0.png"]);

    let extracted = pool.decode_payload().unwrap();
    assert!(extracted.terminated);
    assert!(extracted.payload.is_empty());
}

#[test]
fn test_mismatched_spacing_does_not_recover_message() {
    let ws = Workspace::new();
    ws.add_rgb("cover.png", 200, 200, 7);

    ws.pool(1).encode("a secret").unwrap();
    assert_ne!(ws.pool(2).decode().unwrap(), "a secret");
}

#[test]
fn test_output_dir_equal_to_input_rejected() {
    let ws = two_small_images();
    let pool = ImagePool::new(&ws.input, &ws.input, Spacing::new(1).unwrap());

    let err = pool.encode("hi").unwrap_err();
    assert!(matches!(err, StegoError::OutputOverlapsInput { .. }));
    assert!(ws.input.join("a.png").exists());
    assert!(ws.input.join("b.png").exists());
}

#[test]
fn test_output_dir_aliasing_input_rejected() {
    let ws = two_small_images();
    // same directory reached through a different spelling
    let alias = ws.input.join("..").join("pool");
    let pool = ImagePool::new(&ws.input, alias, Spacing::new(1).unwrap());

    assert!(matches!(
        pool.encode("hi"),
        Err(StegoError::OutputOverlapsInput { .. })
    ));
    assert_eq!(store::list_pngs(&ws.input).unwrap().len(), 2);
    assert_eq!(pool.capacity().unwrap(), 10);
}
