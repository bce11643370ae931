//! Locally simulated detection
//!
//! Stand-in for the real vision backend: random bounding boxes, shapes, and
//! property scores drawn from the same ranges the demo used. Randomness is
//! injected through the generator so tests can seed runs deterministically.

use crate::constants::simulation::*;
use crate::detection::objects::{draw_box, BoundingBox, DetectedObject, ShapeTag};
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

/// Synthetic detector over an injectable random source
pub struct SyntheticDetector<R: Rng> {
    rng: R,
}

impl SyntheticDetector<StdRng> {
    /// Detector with a fixed seed, for reproducible runs and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Detector seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }
}

impl<R: Rng> SyntheticDetector<R> {
    /// Detector over an arbitrary random source
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Simulate object counting: random green boxes over a copy of the image
    ///
    /// Returns the annotated image and the simulated count (5 to 14).
    pub fn count_objects(&mut self, image: &RgbaImage) -> (RgbaImage, u32) {
        let count = self.rng.gen_range(COUNT_MIN..=COUNT_MAX);
        debug!(count, "simulating object count");

        let mut annotated = image.clone();
        let color = Rgba(COUNT_BOX_COLOR);
        for _ in 0..count {
            let bbox = self.random_box(image, COUNT_MARGIN, COUNT_BOX_MIN, COUNT_BOX_MAX);
            draw_box(&mut annotated, &bbox, color);
        }
        (annotated, count)
    }

    /// Simulate property detection: 3 to 7 products with random shapes and
    /// normalized roundness/fragility/sharpness scores
    ///
    /// Returns the annotated image and the object list; the previous list is
    /// expected to be replaced wholesale by the caller.
    pub fn detect_properties(&mut self, image: &RgbaImage) -> (RgbaImage, Vec<DetectedObject>) {
        let count = self.rng.gen_range(PROPERTY_MIN..=PROPERTY_MAX);
        debug!(count, "simulating property detection");

        let mut annotated = image.clone();
        let mut objects = Vec::with_capacity(count as usize);
        for i in 0..count {
            let bbox = self.random_box(image, PROPERTY_MARGIN, PROPERTY_BOX_MIN, PROPERTY_BOX_MAX);
            let object = DetectedObject {
                id: i + 1,
                label: format!("Product {}", i + 1),
                shape: self.random_shape(),
                bbox,
                roundness: self.rng.gen::<f32>(),
                fragility: self.rng.gen::<f32>(),
                sharpness: self.rng.gen::<f32>(),
            };
            draw_box(&mut annotated, &bbox, object.overlay_color());
            objects.push(object);
        }
        (annotated, objects)
    }

    fn random_shape(&mut self) -> ShapeTag {
        match self.rng.gen_range(0..3) {
            0 => ShapeTag::Circle,
            1 => ShapeTag::Square,
            _ => ShapeTag::Triangle,
        }
    }

    /// Random box with its origin kept a margin away from the right/bottom
    /// edges; degenerate spans on tiny images collapse to origin zero.
    fn random_box(&mut self, image: &RgbaImage, margin: f32, min: f32, max: f32) -> BoundingBox {
        let span_x = (image.width() as f32 - margin).max(1.0);
        let span_y = (image.height() as f32 - margin).max(1.0);
        BoundingBox {
            x: self.rng.gen_range(0.0..span_x),
            y: self.rng.gen_range(0.0..span_y),
            width: self.rng.gen_range(min..max),
            height: self.rng.gen_range(min..max),
        }
    }
}
