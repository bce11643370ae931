//! Integration tests for the complete demo workflows
//!
//! These tests validate the end-to-end paths a user drives from the panels:
//! - Upload validation before any backend work
//! - Pixel filters over real encoded images
//! - Object counting and property detection through the simulation
//! - CSV parsing, pagination, and top-N image generation
//! - Failure handling that leaves prior results on screen

use image::{Rgba, RgbaImage};
use smartshelf::backend::{CountOutcome, GenerateOutcome, ProcessOutcome};
use smartshelf::detection::{placement_recommendation, SyntheticDetector};
use smartshelf::views::{CounterPanel, PreprocessPanel, PriorityPanel, PropertyPanel};
use smartshelf::{
    image_loader, preprocess_file, AnalysisBackend, CsvUpload, FilterKind, ImageUpload,
    LocalBackend, Result, ShelfError,
};
use std::io::Cursor;

fn encode_png(img: &RgbaImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn shelf_upload(width: u32, height: u32) -> ImageUpload {
    let img = RgbaImage::from_pixel(width, height, Rgba([140, 100, 60, 255]));
    ImageUpload::new("shelf.png", "image/png", encode_png(&img)).unwrap()
}

fn inventory_csv(rows: usize) -> String {
    let mut text = String::from("item,priority\n");
    for i in 1..=rows {
        text.push_str(&format!("product{i},{i}\n"));
    }
    text
}

/// Backend stub that fails every call, recording whether it was reached
struct UnreachableBackend {
    called: bool,
}

impl AnalysisBackend for UnreachableBackend {
    fn process_image(&mut self, _: &ImageUpload, _: FilterKind) -> Result<ProcessOutcome> {
        self.called = true;
        Err(ShelfError::Http {
            endpoint: "/process-image/".into(),
            status: 502,
        })
    }

    fn count_objects(&mut self, _: &ImageUpload) -> Result<CountOutcome> {
        self.called = true;
        Err(ShelfError::Http {
            endpoint: "/count-objects/".into(),
            status: 502,
        })
    }

    fn generate_images(&mut self, _: &CsvUpload) -> Result<GenerateOutcome> {
        self.called = true;
        Err(ShelfError::Http {
            endpoint: "/generate-images/".into(),
            status: 502,
        })
    }
}

// ============================================================================
// Upload Validation Tests
// ============================================================================

#[test]
fn test_non_image_upload_rejected_before_backend() {
    let err = ImageUpload::new("report.pdf", "application/pdf", vec![1, 2, 3]).unwrap_err();
    assert_eq!(err.user_message(), "Please upload an image file");
}

#[test]
fn test_txt_upload_rejected_with_csv_message() {
    let err = CsvUpload::new("data.txt", b"item,priority\nsoap,1\n".to_vec(), 5).unwrap_err();
    assert_eq!(err.user_message(), "Please upload a CSV file");

    let err = CsvUpload::new("data.csv", b"item\nsoap\n".to_vec(), 0).unwrap_err();
    assert_eq!(
        err.user_message(),
        "Please enter a valid number for top priority objects"
    );
}

#[test]
fn test_run_without_any_upload_is_rejected() {
    let mut backend = UnreachableBackend { called: false };
    let mut panel = CounterPanel::new();
    let err = panel.run(&mut backend).unwrap_err();
    assert!(matches!(err, ShelfError::Validation { .. }));
    assert!(!backend.called);
}

// ============================================================================
// Pixel Filter Tests
// ============================================================================

#[test]
fn test_grayscale_filter_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf.png");
    let mut img = RgbaImage::from_pixel(16, 16, Rgba([90, 120, 240, 200]));
    img.put_pixel(3, 3, Rgba([30, 30, 30, 255]));
    img.save(&path).unwrap();

    let out = preprocess_file(&path, FilterKind::Grayscale).unwrap();
    // mean(90, 120, 240) = 150, alpha carried through untouched
    assert_eq!(out.get_pixel(8, 8), &Rgba([150, 150, 150, 200]));
}

#[test]
fn test_threshold_filter_is_binary() {
    let mut img = RgbaImage::from_pixel(8, 8, Rgba([200, 200, 200, 255]));
    img.put_pixel(0, 0, Rgba([10, 10, 10, 255]));

    let out = smartshelf::apply_filter(&img, FilterKind::Threshold);
    for pixel in out.pixels() {
        assert!(pixel[0] == 0 || pixel[0] == 255);
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }
    assert_eq!(out.get_pixel(0, 0)[0], 0);
    assert_eq!(out.get_pixel(4, 4)[0], 255);
}

#[test]
fn test_edges_filter_uniform_image_has_black_interior() {
    let img = RgbaImage::from_pixel(12, 12, Rgba([180, 40, 90, 255]));
    let out = smartshelf::apply_filter(&img, FilterKind::Edges);

    // No gradients anywhere, so every interior pixel is black.
    for y in 1..11 {
        for x in 1..11 {
            assert_eq!(out.get_pixel(x, y), &Rgba([0, 0, 0, 255]));
        }
    }
    // Border pixels keep their original colors.
    assert_eq!(out.get_pixel(0, 0), &Rgba([180, 40, 90, 255]));
    assert_eq!(out.get_pixel(11, 5), &Rgba([180, 40, 90, 255]));
}

#[test]
fn test_preprocess_panel_round_trip() {
    let mut panel = PreprocessPanel::new();
    panel.set_image(shelf_upload(64, 64));
    panel.set_filter(FilterKind::Edges);

    let mut backend = LocalBackend::seeded(3);
    panel.run(&mut backend).unwrap();

    let decoded = image_loader::from_data_url(panel.processed_image().unwrap()).unwrap();
    assert_eq!(decoded.dimensions(), (64, 64));
}

// ============================================================================
// Detection Tests
// ============================================================================

#[test]
fn test_object_count_in_simulated_range() {
    let mut panel = CounterPanel::new();
    panel.set_image(shelf_upload(400, 300));

    let mut backend = LocalBackend::seeded(17);
    panel.run(&mut backend).unwrap();

    let count = panel.object_count().unwrap();
    assert!((5..=14).contains(&count));
    assert!(panel
        .processed_image()
        .unwrap()
        .starts_with("data:image/png;base64,"));
}

#[test]
fn test_property_detection_produces_complete_objects() {
    let mut panel = PropertyPanel::new();
    panel.set_image(shelf_upload(400, 300));

    let mut detector = SyntheticDetector::seeded(21);
    panel.run(&mut detector).unwrap();

    let objects = panel.objects();
    assert!((3..=7).contains(&objects.len()));
    for (i, object) in objects.iter().enumerate() {
        assert_eq!(object.id, i as u32 + 1);
        assert_eq!(object.label, format!("Product {}", i + 1));
        assert!((0.0..=1.0).contains(&object.roundness));
        assert!((0.0..=1.0).contains(&object.fragility));
        assert!((0.0..=1.0).contains(&object.sharpness));
        assert!(!placement_recommendation(object).is_empty());
    }
}

#[test]
fn test_seeded_detection_is_reproducible() {
    let img = RgbaImage::from_pixel(400, 300, Rgba([50, 50, 50, 255]));

    let (_, first) = SyntheticDetector::seeded(99).detect_properties(&img);
    let (_, second) = SyntheticDetector::seeded(99).detect_properties(&img);
    assert_eq!(first, second);
}

// ============================================================================
// Priority Workflow Tests
// ============================================================================

#[test]
fn test_csv_pagination_through_panel() {
    let upload = CsvUpload::new("inventory.csv", inventory_csv(21).into_bytes(), 3).unwrap();
    let mut panel = PriorityPanel::new();
    let mut backend = LocalBackend::seeded(7);
    panel.upload(&upload, &mut backend).unwrap();

    let table = panel.table().unwrap();
    assert_eq!(table.total_pages(), 3);
    assert_eq!(panel.current_page(), 1);
    assert_eq!(panel.page_rows().len(), 10);
    assert_eq!(panel.page_rows()[0][0], "product1");

    panel.next_page();
    panel.next_page();
    assert_eq!(panel.page_rows().len(), 1);
    assert_eq!(panel.page_rows()[0][0], "product21");

    // Paging past the end stays on the last page.
    panel.next_page();
    assert_eq!(panel.current_page(), 3);
}

#[test]
fn test_generated_images_match_top_n() {
    let upload = CsvUpload::new("inventory.csv", inventory_csv(8).into_bytes(), 4).unwrap();
    let mut panel = PriorityPanel::new();
    let mut backend = LocalBackend::seeded(7);
    panel.upload(&upload, &mut backend).unwrap();

    assert_eq!(panel.top_items(), &["product1", "product2", "product3", "product4"]);
    assert_eq!(panel.generated_images().len(), 4);
    for url in panel.generated_images() {
        let tile = image_loader::from_data_url(url).unwrap();
        assert_eq!(tile.dimensions(), (150, 150));
    }
}

// ============================================================================
// Failure Handling Tests
// ============================================================================

#[test]
fn test_backend_failure_keeps_previous_count_on_screen() {
    let mut panel = CounterPanel::new();
    panel.set_image(shelf_upload(320, 240));

    let mut backend = LocalBackend::seeded(41);
    panel.run(&mut backend).unwrap();
    let shown_count = panel.object_count().unwrap();
    let shown_image = panel.processed_image().unwrap().to_string();

    let mut failing = UnreachableBackend { called: false };
    let err = panel.run(&mut failing).unwrap_err();
    assert_eq!(
        err.user_message(),
        "An error occurred while processing the request"
    );
    assert_eq!(panel.object_count(), Some(shown_count));
    assert_eq!(panel.processed_image(), Some(shown_image.as_str()));
}

#[test]
fn test_priority_failure_keeps_table_preview() {
    let upload = CsvUpload::new("inventory.csv", inventory_csv(5).into_bytes(), 2).unwrap();
    let mut panel = PriorityPanel::new();

    let mut failing = UnreachableBackend { called: false };
    let err = panel.upload(&upload, &mut failing).unwrap_err();
    assert!(matches!(err, ShelfError::Http { .. }));

    // The locally parsed preview still renders after the backend failure.
    assert_eq!(panel.table().unwrap().row_count(), 5);
    assert!(panel.generated_images().is_empty());
}
