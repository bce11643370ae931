//! Pixel-filter engine
//!
//! Pure transforms over RGBA pixel data, one output image per input image
//! with identical dimensions:
//! - Grayscale: unweighted channel mean
//! - Edges: Sobel-style gradient magnitude, binarized
//! - Threshold: intensity binarization
//!
//! The filters operate on decoded [`RgbaImage`] buffers; decoding happens in
//! [`crate::image_loader`] so a bad upload fails before any transform runs.

use crate::constants::filters::{EDGE_MAGNITUDE_THRESHOLD, GRADIENT_WEIGHTS, INTENSITY_THRESHOLD};
use crate::error::{Result, ShelfError};
use image::RgbaImage;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Filter selector, matching the wire names the backend accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Grayscale,
    Edges,
    Threshold,
}

impl FilterKind {
    /// Wire name of the filter (`grayscale`, `edges`, `threshold`)
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Edges => "edges",
            FilterKind::Threshold => "threshold",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterKind {
    type Err = ShelfError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "grayscale" => Ok(FilterKind::Grayscale),
            "edges" => Ok(FilterKind::Edges),
            "threshold" => Ok(FilterKind::Threshold),
            other => Err(ShelfError::validation(format!(
                "Unknown filter '{other}' (expected grayscale, edges, or threshold)"
            ))),
        }
    }
}

/// Apply the selected filter, producing a new image of the same dimensions
pub fn apply_filter(image: &RgbaImage, kind: FilterKind) -> RgbaImage {
    debug!(
        filter = kind.as_str(),
        width = image.width(),
        height = image.height(),
        "applying filter"
    );
    match kind {
        FilterKind::Grayscale => grayscale(image),
        FilterKind::Edges => edges(image),
        FilterKind::Threshold => threshold(image),
    }
}

/// Unweighted mean of a pixel's color channels, rounded to the nearest step
fn luma(pixel: &image::Rgba<u8>) -> u8 {
    let mean = (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / 3.0;
    mean.round() as u8
}

/// Replace R, G, B with their unweighted mean; alpha unchanged
fn grayscale(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let v = luma(pixel);
        pixel[0] = v;
        pixel[1] = v;
        pixel[2] = v;
    }
    out
}

/// Map each pixel to white if its grayscale mean exceeds the intensity
/// threshold, black otherwise; alpha unchanged
fn threshold(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        let mean = (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / 3.0;
        let v = if mean > INTENSITY_THRESHOLD { 255 } else { 0 };
        pixel[0] = v;
        pixel[1] = v;
        pixel[2] = v;
    }
    out
}

/// Binary edge map from Sobel-style gradient magnitudes
///
/// Gradients are computed over a grayscale plane built with the same mean
/// rule as [`FilterKind::Grayscale`]. The 1-pixel border is left as the
/// original pixels rather than computed with a padded neighborhood.
fn edges(image: &RgbaImage) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = image.clone();
    if width < 3 || height < 3 {
        return out;
    }

    // Grayscale plane, one value per pixel.
    let gray: Vec<f32> = image.pixels().map(|p| luma(p) as f32).collect();
    let at = |x: u32, y: u32| gray[(y * width + x) as usize];
    let [w0, w1, w2] = GRADIENT_WEIGHTS;

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            // Left column negative, right column positive.
            let gx = -w0 * at(x - 1, y - 1) - w1 * at(x - 1, y) - w2 * at(x - 1, y + 1)
                + w0 * at(x + 1, y - 1)
                + w1 * at(x + 1, y)
                + w2 * at(x + 1, y + 1);

            // Top row negative, bottom row positive.
            let gy = -w0 * at(x - 1, y - 1) - w1 * at(x, y - 1) - w2 * at(x + 1, y - 1)
                + w0 * at(x - 1, y + 1)
                + w1 * at(x, y + 1)
                + w2 * at(x + 1, y + 1);

            let magnitude = (gx * gx + gy * gy).sqrt();
            let v = if magnitude > EDGE_MAGNITUDE_THRESHOLD {
                255
            } else {
                0
            };

            let pixel = out.get_pixel_mut(x, y);
            pixel[0] = v;
            pixel[1] = v;
            pixel[2] = v;
        }
    }
    out
}
