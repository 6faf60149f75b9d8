//! Dominant-color extraction from raster images.
//!
//! Two methods are available through [`Method`]: k-means clustering over the
//! full-resolution image, and exact color counting on a downsampled copy.

pub mod cli;
pub mod color;
pub mod error;
pub mod pipeline;
pub mod report;

pub use cli::Method;
pub use color::Color;
pub use error::{ExtractError, Result};
pub use pipeline::extract::{
    extract_dominant_colors, extract_from_image, extract_with_options, DominantColor,
    ExtractOptions, Extraction,
};
