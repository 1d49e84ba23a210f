use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One image written by an encode run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub source: PathBuf,
    pub output: PathBuf,
    pub tile_capacity: usize,
    pub bytes_encoded: usize,
}

/// Summary of an encode run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeReport {
    pub spacing: u32,
    /// Message length without the terminator
    pub message_bytes: usize,
    /// Message length with the terminator
    pub stream_bytes: usize,
    /// Tiles available across the whole pool
    pub pool_capacity: usize,
    pub images: Vec<ImageRecord>,
}

impl EncodeReport {
    pub fn bytes_encoded(&self) -> usize {
        self.images.iter().map(|i| i.bytes_encoded).sum()
    }

    /// Share of the pool used by this run, in percent.
    pub fn utilization(&self) -> f64 {
        if self.pool_capacity == 0 {
            return 0.0;
        }
        (self.stream_bytes as f64 / self.pool_capacity as f64) * 100.0
    }

    pub fn export_to_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let output = serde_json::json!({
            "report": self,
            "utilization_percent": self.utilization(),
        });

        let json_string = serde_json::to_string_pretty(&output)?;
        let mut file = File::create(path)?;
        file.write_all(json_string.as_bytes())?;

        Ok(())
    }
}
