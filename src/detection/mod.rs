//! Detected-object data model and synthetic detection
//!
//! The demo's detections are either produced by the remote backend or
//! simulated locally; either way the result is a list of objects with
//! pixel-space bounding boxes, replaced wholesale on every run.

pub mod objects;
pub mod simulate;

pub use objects::{placement_recommendation, BoundingBox, DetectedObject, ShapeTag};
pub use simulate::SyntheticDetector;
