use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use dominant_colors::cli::Args;
use dominant_colors::extract_with_options;
use dominant_colors::report::write_extraction;

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .parse_default_env()
        .init();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    // Extraction failures are reported and swallowed; only I/O on stdout
    // itself makes the process exit non-zero.
    let written = match extract_with_options(&args.image, &args.options()) {
        Ok(extraction) => write_extraction(&mut out, &extraction),
        Err(err) => {
            error!("{err}");
            writeln!(out, "Error: {err}")
        }
    };
    written.context("failed to write to stdout")?;

    Ok(())
}
