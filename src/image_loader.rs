//! Image decoding and data-URL interchange
//!
//! The demo moves raster images around as PNG data URLs
//! (`data:image/png;base64,...`), the format the upload component produces
//! and the backend echoes back. This module converts between that wire form,
//! raw encoded bytes, and in-memory RGBA pixel buffers.
//!
//! Decoding failures surface as [`ShelfError::Decode`]; no partial output is
//! ever produced.

use crate::error::{Result, ShelfError};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use image::{ImageFormat, ImageReader, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Decode encoded image bytes (PNG, JPEG, WebP, ...) into an RGBA buffer
///
/// The container format is sniffed from the bytes themselves, so the
/// caller's MIME claim is not trusted for decoding.
///
/// # Errors
///
/// Returns `ShelfError::Decode` if the format cannot be guessed or the
/// bytes fail to decode.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ShelfError::decode("Failed to sniff image format", e))?;

    let img = reader
        .decode()
        .map_err(|e| ShelfError::decode("Failed to decode image bytes", e))?;

    Ok(img.to_rgba8())
}

/// Load an image file from disk into an RGBA buffer
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}

/// Encode an RGBA buffer as a PNG data URL
pub fn to_data_url(image: &RgbaImage) -> Result<String> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| ShelfError::decode("Failed to encode PNG", e))?;
    Ok(format!("data:image/png;base64,{}", BASE64.encode(&buf)))
}

/// Wrap already-encoded image bytes in a data URL without re-encoding
pub fn bytes_to_data_url(bytes: &[u8], mime_type: &str) -> String {
    format!("data:{};base64,{}", mime_type, BASE64.encode(bytes))
}

/// Decode a data URL (or bare base64 payload) into an RGBA buffer
///
/// The backend sometimes returns `data:image/png;base64,...` and sometimes a
/// bare base64 string; both forms are accepted.
pub fn from_data_url(data_url: &str) -> Result<RgbaImage> {
    let payload = match data_url.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => payload,
        _ => data_url,
    };
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| ShelfError::decode("Invalid base64 payload", e))?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn sample_image() -> RgbaImage {
        RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn test_data_url_round_trip() {
        let img = sample_image();
        let url = to_data_url(&img).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));

        let back = from_data_url(&url).unwrap();
        assert_eq!(back.dimensions(), (4, 3));
        assert_eq!(back.get_pixel(0, 0), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_bare_base64_accepted() {
        let img = sample_image();
        let url = to_data_url(&img).unwrap();
        let bare = url.split_once(',').unwrap().1;
        assert!(from_data_url(bare).is_ok());
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(ShelfError::Decode { .. })));
    }

    #[test]
    fn test_load_image_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.png");
        sample_image().save(&path).unwrap();

        let img = load_image(&path).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
    }
}
