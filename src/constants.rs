//! Fixed parameters for the demo workflows
//!
//! Filter thresholds and simulation ranges mirror the values the original
//! demo shipped with; they are compile-time constants rather than
//! configuration because the panels never expose them to the user.

/// Pixel-filter engine parameters
pub mod filters {
    /// Gradient magnitude above which an interior pixel counts as an edge
    pub const EDGE_MAGNITUDE_THRESHOLD: f32 = 50.0;

    /// Grayscale mean above which a pixel is mapped to white
    pub const INTENSITY_THRESHOLD: f32 = 128.0;

    /// 3x3 Sobel-style column/row weights, top-to-bottom / left-to-right
    pub const GRADIENT_WEIGHTS: [f32; 3] = [1.0, 2.0, 1.0];
}

/// Tabular view parameters
pub mod pagination {
    /// Data rows shown per table page (header excluded)
    pub const ROWS_PER_PAGE: usize = 10;
}

/// Remote backend endpoints
pub mod endpoints {
    /// Default address of the external vision service
    pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

    /// CSV upload, returns generated images for top-priority items
    pub const GENERATE_IMAGES: &str = "/generate-images/";

    /// Base64 image plus filter kind, returns the processed image
    pub const PROCESS_IMAGE: &str = "/process-image/";

    /// Base64 image, returns an annotated image and an object count
    pub const COUNT_OBJECTS: &str = "/count-objects/";
}

/// Synthetic detection parameters
pub mod simulation {
    /// Object count range for the counting panel (inclusive)
    pub const COUNT_MIN: u32 = 5;
    pub const COUNT_MAX: u32 = 14;

    /// Bounding box edge length range for counted objects, in pixels
    pub const COUNT_BOX_MIN: f32 = 50.0;
    pub const COUNT_BOX_MAX: f32 = 150.0;

    /// Margin kept free of box origins along the right/bottom image edges
    pub const COUNT_MARGIN: f32 = 100.0;

    /// Object count range for the property panel (inclusive)
    pub const PROPERTY_MIN: u32 = 3;
    pub const PROPERTY_MAX: u32 = 7;

    /// Bounding box edge length range for property objects, in pixels
    pub const PROPERTY_BOX_MIN: f32 = 70.0;
    pub const PROPERTY_BOX_MAX: f32 = 150.0;

    /// Margin kept free of box origins for property objects
    pub const PROPERTY_MARGIN: f32 = 150.0;

    /// Overlay color for counted objects (RGBA)
    pub const COUNT_BOX_COLOR: [u8; 4] = [0, 255, 0, 255];

    /// Overlay line thickness in pixels
    pub const BOX_THICKNESS: u32 = 3;

    /// Score above which a product is flagged fragile or sharp
    pub const PLACEMENT_FLAG_THRESHOLD: f32 = 0.7;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_ranges() {
        assert!(simulation::COUNT_MIN < simulation::COUNT_MAX);
        assert!(simulation::PROPERTY_MIN < simulation::PROPERTY_MAX);
        assert!(simulation::COUNT_BOX_MIN < simulation::COUNT_BOX_MAX);
        assert!(simulation::PROPERTY_BOX_MIN < simulation::PROPERTY_BOX_MAX);
    }

    #[test]
    fn test_filter_thresholds() {
        assert!(filters::EDGE_MAGNITUDE_THRESHOLD > 0.0);
        assert!(filters::INTENSITY_THRESHOLD > 0.0 && filters::INTENSITY_THRESHOLD < 255.0);
        assert!(pagination::ROWS_PER_PAGE > 0);
    }
}
