//! # Configuration
//!
//! Settings shared by every subcommand, loaded from an optional TOML file.
//!
//! ## Example TOML
//!
//! ```toml
//! [pool]
//! input_dir = "pool"
//! output_dir = "encoded"
//!
//! [encoding]
//! spacing = 5
//! ```
//!
//! Every key is optional. The spacing used to decode must be the one used to encode.

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::processing::Spacing;

/// Load a TOML configuration file and deserialize it into the specified type.
///
/// # Example
/// ```ignore
/// let config: StegoConfig = load_config("config/stego.toml")?;
/// ```
pub fn load_config<T>(path: impl AsRef<Path>) -> Result<T>
where
    T: DeserializeOwned,
{
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StegoConfig {
    pub pool: PoolConfig,
    pub encoding: EncodingConfig,
}

/// Where carrier images are read from and encoded images are written to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolConfig {
    /// Directory holding the carrier PNGs, used in file name order
    pub input_dir: PathBuf,
    /// Directory receiving `image_<n>.png`; its PNGs are deleted before each encode
    pub output_dir: PathBuf,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("pool"),
            output_dir: PathBuf::from("encoded"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodingConfig {
    pub spacing: Spacing,
}

impl StegoConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path)
    }
}
