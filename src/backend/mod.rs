//! Analysis backends
//!
//! The demo historically carried two variants of every panel: one fully
//! client-simulated and one calling the remote vision service. Both survive
//! here behind a single strategy trait so panels and tests are written once:
//! [`remote::RemoteBackend`] forwards uploads over HTTP,
//! [`local::LocalBackend`] runs the pixel filters and synthetic detection
//! in-process.

pub mod local;
pub mod remote;

use crate::error::Result;
use crate::filters::FilterKind;
use crate::upload::{CsvUpload, ImageUpload};
use serde::{Deserialize, Serialize};

pub use local::LocalBackend;
pub use remote::RemoteBackend;

/// Result of the pixel-filter workflow
///
/// Doubles as the `/process-image/` response shape; a missing field
/// deserializes to `None` rather than failing the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessOutcome {
    /// Processed image as a data URL or bare base64 payload
    #[serde(default)]
    pub processed_image: Option<String>,
}

/// Result of the object-counting workflow (`/count-objects/` response shape)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountOutcome {
    /// Annotated image with bounding boxes drawn in
    #[serde(default)]
    pub processed_image: Option<String>,
    #[serde(default)]
    pub object_count: Option<u32>,
}

/// Result of the CSV priority workflow (`/generate-images/` response shape)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOutcome {
    /// One generated image per top-priority item
    #[serde(default)]
    pub generated_images: Vec<String>,
    /// Item names aligned with `generated_images`
    #[serde(default)]
    pub top_items: Vec<String>,
}

/// Strategy seam between the remote service and the local simulation
///
/// Each method issues exactly one unit of work and returns synchronously;
/// there is no retry, cancellation, or request coordination. Failures leave
/// whatever the caller displayed before untouched.
pub trait AnalysisBackend {
    /// Apply a pixel filter to an uploaded image
    fn process_image(&mut self, upload: &ImageUpload, kind: FilterKind) -> Result<ProcessOutcome>;

    /// Count objects in an uploaded image, annotating it with boxes
    fn count_objects(&mut self, upload: &ImageUpload) -> Result<CountOutcome>;

    /// Generate images for the top-priority items of an uploaded CSV
    fn generate_images(&mut self, upload: &CsvUpload) -> Result<GenerateOutcome>;
}
