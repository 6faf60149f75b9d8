use std::collections::HashMap;

use kmeans_colors::{get_kmeans_hamerly, Kmeans};
use log::debug;
use palette::Srgb;

use crate::color::Color;
use crate::error::{ExtractError, Result};

/// Cluster labels are stored as bytes by `kmeans_colors`.
pub const MAX_CLUSTERS: usize = 256;

/// Tuning for one clustering pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterParams {
    pub k: usize,
    pub max_iter: usize,
    pub converge: f32,
    pub runs: usize,
    pub seed: u64,
}

/// One k-means cluster: its representative color and member count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    pub color: Color,
    pub count: u64,
    /// Scan-order index of the first pixel assigned to this cluster.
    pub first_member: Option<usize>,
}

/// Partition `pixels` into exactly `params.k` clusters by RGB proximity.
///
/// Uses Hamerly's algorithm with K-means++ initialization. The returned
/// centroids are the means of their members' original 8-bit values,
/// truncated toward zero. Clusters are sorted by member count descending,
/// ties resolved by first member in scan order, empty clusters last.
pub fn cluster_pixels(pixels: &[Color], params: &ClusterParams) -> Result<Vec<Cluster>> {
    validate(pixels, params)?;

    let mut clusters = match exact_partition(pixels, params.k) {
        Some(clusters) => {
            debug!(
                "{} distinct colors for k={}, skipping k-means",
                clusters.iter().filter(|c| c.count > 0).count(),
                params.k
            );
            clusters
        }
        None => run_kmeans(pixels, params)?,
    };

    clusters.sort_by(|a, b| {
        b.count.cmp(&a.count).then_with(|| {
            let a_first = a.first_member.unwrap_or(usize::MAX);
            let b_first = b.first_member.unwrap_or(usize::MAX);
            a_first.cmp(&b_first)
        })
    });
    Ok(clusters)
}

fn validate(pixels: &[Color], params: &ClusterParams) -> Result<()> {
    if params.k == 0 {
        return Err(ExtractError::invalid("k", params.k, "must be at least 1"));
    }
    if params.k > MAX_CLUSTERS {
        return Err(ExtractError::invalid(
            "k",
            params.k,
            "clustering supports at most 256 clusters",
        ));
    }
    if params.max_iter == 0 {
        return Err(ExtractError::invalid(
            "max_iter",
            params.max_iter,
            "must be at least 1",
        ));
    }
    if params.runs == 0 {
        return Err(ExtractError::invalid("runs", params.runs, "must be at least 1"));
    }
    if !(params.converge.is_finite() && params.converge >= 0.0) {
        return Err(ExtractError::invalid(
            "converge",
            params.converge,
            "must be a non-negative number",
        ));
    }
    if pixels.is_empty() {
        return Err(ExtractError::clustering("image has no pixels"));
    }
    if params.k > pixels.len() {
        return Err(ExtractError::clustering(format!(
            "cannot form {} clusters from {} pixels",
            params.k,
            pixels.len()
        )));
    }
    Ok(())
}

/// When the image has no more distinct colors than clusters requested, each
/// distinct color is its own zero-variance cluster. Surplus clusters sit on
/// top of existing colors with no members, mirroring how k-means degenerates.
fn exact_partition(pixels: &[Color], k: usize) -> Option<Vec<Cluster>> {
    let mut slots: HashMap<Color, usize> = HashMap::with_capacity(k + 1);
    let mut clusters: Vec<Cluster> = Vec::with_capacity(k);

    for (i, &px) in pixels.iter().enumerate() {
        let next = clusters.len();
        let slot = *slots.entry(px).or_insert(next);
        if slot == next {
            if next == k {
                return None;
            }
            clusters.push(Cluster {
                color: px,
                count: 0,
                first_member: Some(i),
            });
        }
        clusters[slot].count += 1;
    }

    let distinct = clusters.len();
    for i in distinct..k {
        clusters.push(Cluster {
            color: clusters[i % distinct].color,
            count: 0,
            first_member: None,
        });
    }
    Some(clusters)
}

fn run_kmeans(pixels: &[Color], params: &ClusterParams) -> Result<Vec<Cluster>> {
    let buf: Vec<Srgb<f32>> = pixels.iter().map(|c| c.to_srgb_f32()).collect();

    let best: Kmeans<Srgb<f32>> = (0..params.runs)
        .map(|run| {
            let seed = params.seed.wrapping_add(run as u64);
            let result = get_kmeans_hamerly(
                params.k,
                params.max_iter,
                params.converge,
                false,
                &buf,
                seed,
            );
            debug!("k-means run {run} (seed {seed}): score {}", result.score);
            result
        })
        .min_by(|a, b| a.score.total_cmp(&b.score))
        .ok_or_else(|| ExtractError::clustering("no k-means runs were performed"))?;

    if best.centroids.len() != params.k || best.indices.len() != pixels.len() {
        return Err(ExtractError::clustering(format!(
            "k-means returned {} centroids and {} labels, expected {} and {}",
            best.centroids.len(),
            best.indices.len(),
            params.k,
            pixels.len()
        )));
    }

    let mut sums = vec![[0f64; 3]; params.k];
    let mut counts = vec![0u64; params.k];
    let mut firsts: Vec<Option<usize>> = vec![None; params.k];

    for (i, (&label, px)) in best.indices.iter().zip(pixels).enumerate() {
        let idx = label as usize;
        if idx >= params.k {
            return Err(ExtractError::clustering(format!(
                "pixel {i} assigned to nonexistent cluster {idx}"
            )));
        }
        sums[idx][0] += f64::from(px.r);
        sums[idx][1] += f64::from(px.g);
        sums[idx][2] += f64::from(px.b);
        counts[idx] += 1;
        firsts[idx].get_or_insert(i);
    }

    best.centroids
        .iter()
        .enumerate()
        .map(|(idx, centroid)| {
            let count = counts[idx];
            let color = if count > 0 {
                let n = count as f64;
                let [r, g, b] = sums[idx];
                Color::from_centroid(r / n, g / n, b / n)
            } else {
                let (r, g, b) = centroid.into_components();
                if !(r.is_finite() && g.is_finite() && b.is_finite()) {
                    return Err(ExtractError::clustering(format!(
                        "cluster {idx} has a degenerate centroid"
                    )));
                }
                Color::from(*centroid)
            };
            Ok(Cluster {
                color,
                count,
                first_member: firsts[idx],
            })
        })
        .collect()
}
