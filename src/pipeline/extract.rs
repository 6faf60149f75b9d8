use std::path::Path;

use image::RgbImage;
use log::{debug, info};

use crate::cli::Method;
use crate::color::Color;
use crate::error::{ExtractError, Result};
use crate::pipeline::cluster::{cluster_pixels, ClusterParams};
use crate::pipeline::frequency::top_colors;
use crate::pipeline::load::{downsample, load_rgb};

pub const DEFAULT_K: usize = 5;
pub const DEFAULT_SAMPLE_SIZE: u32 = 100;
pub const DEFAULT_MAX_ITER: usize = 100;
pub const DEFAULT_CONVERGE: f32 = 0.0025;
pub const DEFAULT_SEED: u64 = 42;

/// A dominant color with its weight in the image.
#[derive(Debug, Clone, PartialEq)]
pub struct DominantColor {
    pub color: Color,
    /// Pixels matching this color (frequency) or assigned to this cluster.
    pub count: u64,
    /// `count` as a share of the pixels examined, in percent.
    pub percentage: f64,
}

/// The outcome of one extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub method: Method,
    /// Pixels examined: the full image for clustering, the working
    /// resolution for frequency counting.
    pub total_pixels: u64,
    /// Sorted by `count`, most prominent first.
    pub colors: Vec<DominantColor>,
}

/// Everything that controls an extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractOptions {
    pub k: usize,
    pub method: Method,
    /// Base seed for k-means++ initialization.
    pub seed: u64,
    pub max_iter: usize,
    pub converge: f32,
    /// Independent k-means restarts; the lowest-variance one wins.
    pub runs: usize,
    /// Side length of the frequency method's working resolution.
    pub sample_size: u32,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            method: Method::Clustering,
            seed: DEFAULT_SEED,
            max_iter: DEFAULT_MAX_ITER,
            converge: DEFAULT_CONVERGE,
            runs: 1,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl ExtractOptions {
    pub fn new(k: usize, method: Method) -> Self {
        Self {
            k,
            method,
            ..Self::default()
        }
    }

    fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(ExtractError::invalid("k", self.k, "must be at least 1"));
        }
        if self.method == Method::Frequency && self.sample_size == 0 {
            return Err(ExtractError::invalid(
                "sample_size",
                self.sample_size,
                "must be at least 1",
            ));
        }
        Ok(())
    }

    fn cluster_params(&self) -> ClusterParams {
        ClusterParams {
            k: self.k,
            max_iter: self.max_iter,
            converge: self.converge,
            runs: self.runs,
            seed: self.seed,
        }
    }
}

/// Find the `k` most prominent colors of the image at `image_path`.
pub fn extract_dominant_colors(image_path: &Path, k: usize, method: Method) -> Result<Extraction> {
    extract_with_options(image_path, &ExtractOptions::new(k, method))
}

/// Like [`extract_dominant_colors`], with every tunable exposed.
///
/// Parameters are checked before the file is touched, so a bad `k` is
/// reported even when the path is also wrong.
pub fn extract_with_options(image_path: &Path, options: &ExtractOptions) -> Result<Extraction> {
    options.validate()?;
    let img = load_rgb(image_path)?;
    let extraction = extract_from_image(&img, options)?;
    info!(
        "{}: {} colors from {} pixels ({:?})",
        image_path.display(),
        extraction.colors.len(),
        extraction.total_pixels,
        extraction.method
    );
    Ok(extraction)
}

/// Run the selected method on an already-decoded image.
pub fn extract_from_image(img: &RgbImage, options: &ExtractOptions) -> Result<Extraction> {
    options.validate()?;

    match options.method {
        Method::Clustering => {
            let pixels: Vec<Color> = img.pixels().map(|p| Color::from(p.0)).collect();
            let total = pixels.len() as u64;
            debug!(
                "clustering {total} pixels into {} clusters (max_iter {}, runs {}, seed {})",
                options.k, options.max_iter, options.runs, options.seed
            );
            let clusters = cluster_pixels(&pixels, &options.cluster_params())?;
            let colors = clusters
                .into_iter()
                .map(|c| weigh(c.color, c.count, total))
                .collect();
            Ok(Extraction {
                method: Method::Clustering,
                total_pixels: total,
                colors,
            })
        }
        Method::Frequency => {
            let sample = downsample(img, options.sample_size);
            let total = u64::from(sample.width()) * u64::from(sample.height());
            debug!(
                "counting {total} pixels at {}x{}",
                sample.width(),
                sample.height()
            );
            let buckets = top_colors(sample.pixels().map(|p| Color::from(p.0)), options.k)?;
            let colors = buckets
                .into_iter()
                .map(|b| weigh(b.color, b.count, total))
                .collect();
            Ok(Extraction {
                method: Method::Frequency,
                total_pixels: total,
                colors,
            })
        }
    }
}

fn weigh(color: Color, count: u64, total: u64) -> DominantColor {
    let percentage = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    };
    DominantColor {
        color,
        count,
        percentage,
    }
}
