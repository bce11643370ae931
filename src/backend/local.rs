//! In-process simulation backend
//!
//! Implements the same contract as the remote service without leaving the
//! process: pixel filters run through the local engine, detections come from
//! the synthetic detector, and the CSV workflow synthesizes placeholder
//! tiles for the top-priority items.

use crate::backend::{AnalysisBackend, CountOutcome, GenerateOutcome, ProcessOutcome};
use crate::detection::SyntheticDetector;
use crate::error::Result;
use crate::filters::{apply_filter, FilterKind};
use crate::image_loader;
use crate::table::CsvTable;
use crate::upload::{CsvUpload, ImageUpload};
use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;

/// Edge length of the generated placeholder tiles
const TILE_SIZE: u32 = 150;

/// Backend that simulates every workflow locally
pub struct LocalBackend {
    detector: SyntheticDetector<StdRng>,
}

impl LocalBackend {
    /// Simulation with a fixed seed, for reproducible runs and tests
    pub fn seeded(seed: u64) -> Self {
        Self {
            detector: SyntheticDetector::seeded(seed),
        }
    }

    /// Simulation seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            detector: SyntheticDetector::from_entropy(),
        }
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl AnalysisBackend for LocalBackend {
    fn process_image(&mut self, upload: &ImageUpload, kind: FilterKind) -> Result<ProcessOutcome> {
        let image = upload.decode()?;
        let processed = apply_filter(&image, kind);
        Ok(ProcessOutcome {
            processed_image: Some(image_loader::to_data_url(&processed)?),
        })
    }

    fn count_objects(&mut self, upload: &ImageUpload) -> Result<CountOutcome> {
        let image = upload.decode()?;
        let (annotated, count) = self.detector.count_objects(&image);
        Ok(CountOutcome {
            processed_image: Some(image_loader::to_data_url(&annotated)?),
            object_count: Some(count),
        })
    }

    fn generate_images(&mut self, upload: &CsvUpload) -> Result<GenerateOutcome> {
        let table = CsvTable::parse(&upload.text())?;
        let top_items: Vec<String> = table
            .rows()
            .iter()
            .take(upload.top_n as usize)
            .map(|row| row.first().cloned().unwrap_or_default())
            .collect();

        let mut generated_images = Vec::with_capacity(top_items.len());
        for (i, _) in top_items.iter().enumerate() {
            generated_images.push(image_loader::to_data_url(&placeholder_tile(i))?);
        }
        Ok(GenerateOutcome {
            generated_images,
            top_items,
        })
    }
}

/// Solid-color tile standing in for a generated product image
///
/// Colors cycle deterministically with the item index so repeated runs over
/// the same CSV produce the same preview.
fn placeholder_tile(index: usize) -> RgbaImage {
    let base = (index as u32 * 47) % 256;
    let color = Rgba([
        (base as u8).wrapping_add(80),
        (255 - base as u8).wrapping_sub(40),
        ((base * 3) % 256) as u8,
        255,
    ]);
    RgbaImage::from_pixel(TILE_SIZE, TILE_SIZE, color)
}
