//! Detected objects and image overlays

use crate::constants::simulation::{BOX_THICKNESS, PLACEMENT_FLAG_THRESHOLD};
use image::{Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in pixel units
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Coarse shape class assigned to a detected product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeTag {
    Circle,
    Square,
    Triangle,
}

/// One detected product with its synthetic property scores
///
/// The three scores are normalized to [0, 1]; the list they belong to is
/// rebuilt per analysis run and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    pub id: u32,
    pub label: String,
    pub shape: ShapeTag,
    pub bbox: BoundingBox,
    pub roundness: f32,
    pub fragility: f32,
    pub sharpness: f32,
}

impl DetectedObject {
    /// Overlay color derived from the property scores
    ///
    /// Red tracks roundness, green falls with fragility, blue falls with
    /// sharpness, so fragile/sharp products stand out as warm boxes.
    pub fn overlay_color(&self) -> Rgba<u8> {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).floor() as u8;
        Rgba([
            channel(self.roundness),
            channel(1.0 - self.fragility),
            channel(1.0 - self.sharpness),
            255,
        ])
    }
}

/// Shelf placement advice for a detected product
pub fn placement_recommendation(object: &DetectedObject) -> &'static str {
    if object.fragility > PLACEMENT_FLAG_THRESHOLD {
        "This product is fragile and should be placed on middle shelves with adequate spacing."
    } else if object.sharpness > PLACEMENT_FLAG_THRESHOLD {
        "This product has sharp edges and should be placed on higher shelves away from customer reach."
    } else {
        "This product is suitable for standard shelf placement with normal spacing."
    }
}

/// Draw a rectangle outline onto the image, clamped to its bounds
pub fn draw_box(img: &mut RgbaImage, bbox: &BoundingBox, color: Rgba<u8>) {
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let clamp = |v: f32, max: u32| -> u32 { v.max(0.0).min(max.saturating_sub(1) as f32) as u32 };
    let x0 = clamp(bbox.x, w);
    let y0 = clamp(bbox.y, h);
    let x1 = clamp(bbox.x + bbox.width, w);
    let y1 = clamp(bbox.y + bbox.height, h);
    if x0 > x1 || y0 > y1 {
        return;
    }
    for t in 0..BOX_THICKNESS {
        let xx0 = x0 + t;
        let yy0 = y0 + t;
        let xx1 = x1.saturating_sub(t);
        let yy1 = y1.saturating_sub(t);
        if xx0 > xx1 || yy0 > yy1 || xx0 >= w || yy0 >= h {
            continue;
        }
        for x in xx0..=xx1.min(w - 1) {
            img.put_pixel(x, yy0, color);
            if yy1 < h {
                img.put_pixel(x, yy1, color);
            }
        }
        for y in yy0..=yy1.min(h - 1) {
            img.put_pixel(xx0, y, color);
            if xx1 < w {
                img.put_pixel(xx1, y, color);
            }
        }
    }
}
