//! # Stego Binary Entry Point
//!
//! ## Usage
//!
//! ```bash
//! cargo run --bin stego -- maxlen
//! cargo run --bin stego -- encode "secret message here"
//! cargo run --bin stego -- decode
//! ```
//!
//! Settings come from `--config` (TOML) when given, then from the command-line overrides.
//! Decoding must use the same spacing as the encode run that produced the images.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use tile_stego::common::config::StegoConfig;
use tile_stego::utils::logging::init_logger;
use tile_stego::{ImagePool, Spacing};

/// Command-line arguments for the stego binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a configuration file (TOML format)
    ///
    /// Example: config/stego.toml
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Tile spacing, overrides the configuration
    #[arg(short, long, global = true)]
    spacing: Option<u32>,

    /// Directory holding the carrier PNGs
    #[arg(long, global = true)]
    input_dir: Option<PathBuf>,

    /// Directory receiving the encoded PNGs
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// Log debug details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the longest message the pool can hold
    Maxlen,

    /// Hide a message in the pool, writing the encoded images
    #[command(alias = "e")]
    Encode {
        message: String,

        /// Write a JSON summary of the run to this path
        #[arg(long)]
        report: Option<PathBuf>,
    },

    /// Print the message hidden in the encoded images
    #[command(alias = "d")]
    Decode,
}

fn resolve_config(args: &Args) -> anyhow::Result<StegoConfig> {
    let mut config = match &args.config {
        Some(path) => StegoConfig::from_file(path)?,
        None => StegoConfig::default(),
    };

    if let Some(spacing) = args.spacing {
        config.encoding.spacing = Spacing::new(spacing)?;
    }
    if let Some(dir) = &args.input_dir {
        config.pool.input_dir = dir.clone();
    }
    if let Some(dir) = &args.output_dir {
        config.pool.output_dir = dir.clone();
    }

    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let config = resolve_config(&args)?;
    let pool = ImagePool::from_config(&config);

    match args.command {
        Command::Maxlen => {
            println!(
                "Maximum message length for spacing={}: {} characters",
                pool.spacing(),
                pool.max_message_len()?
            );
        }
        Command::Encode { message, report } => {
            let summary = pool.encode(&message)?;
            if let Some(path) = report {
                summary.export_to_json(&path)?;
                println!("Report exported to: {}", path.display());
            }
        }
        Command::Decode => {
            println!("{}", pool.decode()?);
        }
    }

    Ok(())
}
