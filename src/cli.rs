use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::extract::{
    ExtractOptions, DEFAULT_CONVERGE, DEFAULT_K, DEFAULT_MAX_ITER, DEFAULT_SAMPLE_SIZE,
    DEFAULT_SEED,
};

/// Print the dominant colors of an image as hex codes.
#[derive(Parser, Debug)]
#[command(name = "dominant-colors", version, about)]
pub struct Args {
    /// Path to the input image
    pub image: PathBuf,

    /// Number of colors to report
    #[arg(default_value_t = DEFAULT_K)]
    pub colors: usize,

    /// How colors are grouped
    #[arg(short, long, value_enum, default_value_t = Method::Clustering)]
    pub method: Method,

    /// Seed for k-means initialization
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Maximum k-means iterations per run
    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    pub max_iter: usize,

    /// Number of k-means restarts; the tightest clustering is kept
    #[arg(long, default_value_t = 1)]
    pub runs: usize,

    /// Working resolution (side length) for frequency counting
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: u32,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Method {
    /// K-means over every pixel of the full-resolution image
    Clustering,
    /// Exact color counts on a downsampled copy
    Frequency,
}

impl Args {
    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            k: self.colors,
            method: self.method,
            seed: self.seed,
            max_iter: self.max_iter,
            converge: DEFAULT_CONVERGE,
            runs: self.runs,
            sample_size: self.sample_size,
        }
    }

    /// Log filter implied by `-v` flags, used when `RUST_LOG` is unset.
    pub fn log_level(&self) -> log::LevelFilter {
        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        }
    }
}
