//! Per-panel view state
//!
//! Each interactive panel owns its state outright: the current upload, the
//! last successful result, and a boolean processing flag that gates
//! duplicate submissions while a request is in flight (a disabled button,
//! not a lock). Any failure leaves the previously displayed result intact;
//! a success replaces it wholesale.

use crate::backend::AnalysisBackend;
use crate::detection::{DetectedObject, SyntheticDetector};
use crate::error::{Result, ShelfError};
use crate::filters::FilterKind;
use crate::table::CsvTable;
use crate::upload::{CsvUpload, ImageUpload};
use rand::Rng;

/// State of the image-preprocessing panel
#[derive(Default)]
pub struct PreprocessPanel {
    source: Option<ImageUpload>,
    filter: Option<FilterKind>,
    processed_image: Option<String>,
    processing: bool,
}

impl PreprocessPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the uploaded image, discarding the previous result
    pub fn set_image(&mut self, upload: ImageUpload) {
        self.source = Some(upload);
        self.processed_image = None;
    }

    /// Currently selected filter, defaulting to grayscale
    pub fn filter(&self) -> FilterKind {
        self.filter.unwrap_or(FilterKind::Grayscale)
    }

    pub fn set_filter(&mut self, kind: FilterKind) {
        self.filter = Some(kind);
    }

    pub fn processed_image(&self) -> Option<&str> {
        self.processed_image.as_deref()
    }

    /// Run the selected filter through the backend
    ///
    /// A no-op while a previous submission is still processing. On failure
    /// the last successful result stays on screen.
    pub fn run(&mut self, backend: &mut dyn AnalysisBackend) -> Result<()> {
        if self.processing {
            return Ok(());
        }
        let upload = self.source.as_ref().ok_or_else(|| {
            ShelfError::validation("Please upload an image file before proceeding")
        })?;

        self.processing = true;
        let result = backend.process_image(upload, self.filter());
        self.processing = false;

        let outcome = result?;
        self.processed_image = outcome.processed_image;
        Ok(())
    }
}

/// State of the object-counting panel
#[derive(Default)]
pub struct CounterPanel {
    source: Option<ImageUpload>,
    processed_image: Option<String>,
    object_count: Option<u32>,
    processing: bool,
}

impl CounterPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the uploaded image, discarding the previous result
    pub fn set_image(&mut self, upload: ImageUpload) {
        self.source = Some(upload);
        self.processed_image = None;
        self.object_count = None;
    }

    pub fn processed_image(&self) -> Option<&str> {
        self.processed_image.as_deref()
    }

    pub fn object_count(&self) -> Option<u32> {
        self.object_count
    }

    /// Count objects through the backend, replacing the displayed result
    /// wholesale on success and keeping it untouched on failure
    pub fn run(&mut self, backend: &mut dyn AnalysisBackend) -> Result<()> {
        if self.processing {
            return Ok(());
        }
        let upload = self.source.as_ref().ok_or_else(|| {
            ShelfError::validation("Please upload an image file before proceeding")
        })?;

        self.processing = true;
        let result = backend.count_objects(upload);
        self.processing = false;

        let outcome = result?;
        self.processed_image = outcome.processed_image;
        self.object_count = outcome.object_count;
        Ok(())
    }
}

/// State of the property-detection panel
///
/// Property detection has no remote endpoint; runs always go through the
/// synthetic detector.
#[derive(Default)]
pub struct PropertyPanel {
    source: Option<ImageUpload>,
    processed_image: Option<String>,
    objects: Vec<DetectedObject>,
    selected: Option<u32>,
    processing: bool,
}

impl PropertyPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the uploaded image, discarding previous detections
    pub fn set_image(&mut self, upload: ImageUpload) {
        self.source = Some(upload);
        self.processed_image = None;
        self.objects.clear();
        self.selected = None;
    }

    pub fn processed_image(&self) -> Option<&str> {
        self.processed_image.as_deref()
    }

    pub fn objects(&self) -> &[DetectedObject] {
        &self.objects
    }

    /// Select a detected product by id
    pub fn select(&mut self, id: u32) -> Option<&DetectedObject> {
        let object = self.objects.iter().find(|o| o.id == id)?;
        self.selected = Some(id);
        Some(object)
    }

    pub fn selected(&self) -> Option<&DetectedObject> {
        let id = self.selected?;
        self.objects.iter().find(|o| o.id == id)
    }

    /// Run synthetic property detection, replacing the object list
    pub fn run<R: Rng>(&mut self, detector: &mut SyntheticDetector<R>) -> Result<()> {
        if self.processing {
            return Ok(());
        }
        let upload = self.source.as_ref().ok_or_else(|| {
            ShelfError::validation("Please upload an image file before proceeding")
        })?;

        self.processing = true;
        let decoded = upload.decode();
        self.processing = false;

        let image = decoded?;
        let (annotated, objects) = detector.detect_properties(&image);
        self.processed_image = Some(crate::image_loader::to_data_url(&annotated)?);
        self.selected = None;
        self.objects = objects;
        Ok(())
    }
}

/// State of the CSV priority panel: table preview plus generated images
#[derive(Default)]
pub struct PriorityPanel {
    table: Option<CsvTable>,
    current_page: usize,
    generated_images: Vec<String>,
    top_items: Vec<String>,
    processing: bool,
}

impl PriorityPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self) -> Option<&CsvTable> {
        self.table.as_ref()
    }

    pub fn generated_images(&self) -> &[String] {
        &self.generated_images
    }

    pub fn top_items(&self) -> &[String] {
        &self.top_items
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Data rows of the current page
    pub fn page_rows(&self) -> &[Vec<String>] {
        match &self.table {
            Some(table) => table.page(self.current_page),
            None => &[],
        }
    }

    pub fn next_page(&mut self) {
        let total = self.table.as_ref().map_or(0, |t| t.total_pages());
        if self.current_page < total {
            self.current_page += 1;
        }
    }

    pub fn prev_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Accept a CSV upload: parse the table preview, reset to page 1, then
    /// request generated images from the backend
    ///
    /// The table preview is shown even when the backend call fails; prior
    /// generated images stay on screen in that case.
    pub fn upload(
        &mut self,
        upload: &CsvUpload,
        backend: &mut dyn AnalysisBackend,
    ) -> Result<()> {
        if self.processing {
            return Ok(());
        }
        self.table = Some(CsvTable::parse(&upload.text())?);
        self.current_page = 1;

        self.processing = true;
        let result = backend.generate_images(upload);
        self.processing = false;

        let outcome = result?;
        self.generated_images = outcome.generated_images;
        self.top_items = outcome.top_items;
        Ok(())
    }
}
