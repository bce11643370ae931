//! # SmartShelf demo core
//!
//! The reusable core of a retail-shelf image-analysis demo:
//! - Validating image and CSV uploads before anything touches the network
//! - A pure pixel-filter engine (grayscale, edge detection, thresholding)
//! - A remote analysis proxy for the external vision service, with a local
//!   simulation behind the same trait
//! - Table pagination and explicit per-panel view state
//!
//! The actual computer-vision and machine-learning work lives in an
//! out-of-process backend reached over plain REST; this crate is the client
//! side of that conversation plus the handful of transforms the demo runs
//! locally.
//!
//! ## Example
//!
//! ```rust,no_run
//! use smartshelf::{preprocess_file, FilterKind};
//! use std::path::Path;
//!
//! let edges = preprocess_file(Path::new("shelf.jpg"), FilterKind::Edges)?;
//! edges.save("edges.png")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use image::RgbaImage;
use std::path::Path;

pub mod backend;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod filters;
pub mod image_loader;
pub mod table;
pub mod upload;
pub mod views;

pub use backend::{AnalysisBackend, LocalBackend, RemoteBackend};
pub use config::BackendConfig;
pub use error::{Result, ShelfError};
pub use filters::{apply_filter, FilterKind};
pub use table::CsvTable;
pub use upload::{CsvUpload, ImageUpload};

/// Load an image file and run the selected filter over it
///
/// Convenience entry point for the local preprocessing path: decode from
/// disk, apply the filter, hand back the transformed pixels.
///
/// # Errors
///
/// Returns `ShelfError::Io` if the file cannot be read and
/// `ShelfError::Decode` if the bytes are not a decodable image; no output
/// is produced in either case.
pub fn preprocess_file(image_path: &Path, kind: FilterKind) -> Result<RgbaImage> {
    let image = image_loader::load_image(image_path)?;
    Ok(apply_filter(&image, kind))
}
