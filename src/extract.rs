use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::FilterType;
use kmeans_colors::get_kmeans_hamerly;
use palette::{IntoColor, Lab, Srgb};
use tracing::debug;

use crate::color::Color;

/// A dominant color pulled from an image, with the fraction of pixels that
/// landed in its cluster.
#[derive(Debug, Clone)]
pub struct Swatch {
    pub color: Color,
    pub weight: f32,
}

const MAX_DIM: u32 = 256;
const MAX_ITER: usize = 20;
const CONVERGE: f32 = 5.0;
const MERGE_THRESHOLD: f32 = 25.0; // ΔE² < 25 means ΔE < 5
const KMEANS_SEED: u64 = 42;

/// Clusters to request from K-means. Higher than any palette size the CLI
/// accepts, so truncation happens after merging, not before.
const CLUSTER_COUNT: usize = 16;

/// Load an image, resize to fit within 256x256 (preserving aspect ratio),
/// and convert all pixels to CIELAB space.
pub fn load_pixels(path: &Path) -> Result<Vec<Lab>> {
    let img = image::open(path).with_context(|| {
        if !path.exists() {
            format!("file not found: {}", path.display())
        } else {
            format!(
                "unsupported or corrupt image: {}. Supported formats: PNG, JPEG, WebP, BMP, TIFF, GIF",
                path.display()
            )
        }
    })?;

    let img = if img.width() > MAX_DIM || img.height() > MAX_DIM {
        img.resize(MAX_DIM, MAX_DIM, FilterType::Lanczos3)
    } else {
        img
    };
    let rgb_img = img.to_rgb8();
    debug!(
        width = rgb_img.width(),
        height = rgb_img.height(),
        "prepared image for clustering"
    );

    let pixels: Vec<Lab> = rgb_img
        .pixels()
        .map(|p| {
            let srgb: Srgb<f32> = Srgb::new(p[0], p[1], p[2]).into_format();
            srgb.into_color()
        })
        .collect();

    Ok(pixels)
}

/// Extract up to `count` dominant colors from LAB pixels.
///
/// Runs K-means (Hamerly's algorithm, K-means++ init, fixed seed), drops
/// empty clusters, merges centroids closer than ΔE 5, sorts by pixel share
/// descending, and truncates to `count`. Deterministic for a given input.
pub fn extract_palette(pixels: &[Lab], count: usize) -> Vec<Swatch> {
    let result = get_kmeans_hamerly(CLUSTER_COUNT, MAX_ITER, CONVERGE, false, pixels, KMEANS_SEED);

    let total = pixels.len() as f32;

    let mut counts = vec![0u32; CLUSTER_COUNT];
    for &idx in &result.indices {
        counts[idx as usize] += 1;
    }

    let mut swatches: Vec<Swatch> = result
        .centroids
        .iter()
        .enumerate()
        .filter(|(i, _)| counts[*i] > 0)
        .map(|(i, lab)| Swatch {
            color: Color::from_lab(*lab),
            weight: counts[i] as f32 / total,
        })
        .collect();

    merge_similar(&mut swatches);

    swatches.sort_by(|a, b| b.weight.partial_cmp(&a.weight).unwrap());
    swatches.truncate(count);
    debug!(count = swatches.len(), "extracted dominant colors");

    swatches
}

/// Merge swatches that are too similar (ΔE < 5 in LAB space).
/// Keeps the first swatch and accumulates the weight.
fn merge_similar(swatches: &mut Vec<Swatch>) {
    let mut i = 0;
    while i < swatches.len() {
        let mut j = i + 1;
        while j < swatches.len() {
            let lab_i = swatches[i].color.to_lab();
            let lab_j = swatches[j].color.to_lab();
            let delta_e_sq = (lab_i.l - lab_j.l).powi(2)
                + (lab_i.a - lab_j.a).powi(2)
                + (lab_i.b - lab_j.b).powi(2);
            if delta_e_sq < MERGE_THRESHOLD {
                swatches[i].weight += swatches[j].weight;
                swatches.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
}
