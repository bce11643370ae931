//! Upload validation
//!
//! The two upload components accept a single file each and reject bad input
//! with a user-facing message before anything else happens: the image panel
//! checks the declared MIME type against `image/*`, the CSV panel checks the
//! file name extension and the top-N parameter. A rejected upload leaves the
//! caller's prior state untouched.

use crate::error::{Result, ShelfError};
use crate::image_loader;
use image::RgbaImage;
use tracing::warn;

/// A validated image upload
///
/// Holds the raw encoded bytes exactly as received; decoding to pixels is
/// deferred so the panels can forward the original bytes to the backend.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Validate and accept an uploaded file
    ///
    /// # Errors
    ///
    /// Returns `ShelfError::Validation` if the declared MIME type is not
    /// `image/*`.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<Self> {
        let file_name = file_name.into();
        let mime_type = mime_type.into();
        if !mime_type.starts_with("image/") {
            warn!(%file_name, %mime_type, "rejecting non-image upload");
            return Err(ShelfError::validation("Please upload an image file"));
        }
        Ok(Self {
            file_name,
            mime_type,
            bytes,
        })
    }

    /// Read an image file from disk, deriving the MIME type from the
    /// extension (the CLI stand-in for the browser's declared type)
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload")
            .to_string();
        let mime_type = mime_from_extension(path).unwrap_or("application/octet-stream");
        let bytes = std::fs::read(path)?;
        Self::new(file_name, mime_type, bytes)
    }

    /// Encode the original bytes as a data URL for the backend
    pub fn to_data_url(&self) -> String {
        image_loader::bytes_to_data_url(&self.bytes, &self.mime_type)
    }

    /// Decode the upload into pixel data for local processing
    pub fn decode(&self) -> Result<RgbaImage> {
        image_loader::decode_image(&self.bytes)
    }
}

/// A validated CSV upload with its top-N parameter
#[derive(Debug, Clone)]
pub struct CsvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub top_n: u32,
}

impl CsvUpload {
    /// Validate and accept an uploaded CSV file
    ///
    /// # Errors
    ///
    /// Returns `ShelfError::Validation` if the file name does not end in
    /// `.csv` or `top_n` is zero. Both checks run before any network call.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>, top_n: u32) -> Result<Self> {
        let file_name = file_name.into();
        if !file_name.ends_with(".csv") {
            warn!(%file_name, "rejecting non-CSV upload");
            return Err(ShelfError::validation("Please upload a CSV file"));
        }
        if top_n == 0 {
            return Err(ShelfError::validation(
                "Please enter a valid number for top priority objects",
            ));
        }
        Ok(Self {
            file_name,
            bytes,
            top_n,
        })
    }

    /// Read a CSV file from disk
    pub fn from_file(path: &std::path::Path, top_n: u32) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("upload.csv")
            .to_string();
        let bytes = std::fs::read(path)?;
        Self::new(file_name, bytes, top_n)
    }

    /// The CSV payload as text
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

fn mime_from_extension(path: &std::path::Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "csv" => Some("text/csv"),
        "txt" => Some("text/plain"),
        _ => None,
    }
}
