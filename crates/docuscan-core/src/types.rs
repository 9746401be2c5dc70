// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the DocuScan capture pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pixel coordinate in the source frame's coordinate space.
///
/// Immutable value type; coordinates may be fractional (the text-geometry
/// strategy scales normalized boxes into pixel space).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// The four corners of an estimated document quadrilateral, always listed in
/// the fixed order top-left, top-right, bottom-left, bottom-right.
///
/// Although stored as four independent points, the model only ever represents
/// an axis-aligned rectangle: both detection strategies derive the corners
/// from a min/max extent box, so `top_right.x >= top_left.x` and
/// `bottom_left.y >= top_left.y` always hold. Construction goes through
/// [`DocumentBounds::axis_aligned`], which normalizes swapped extents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DocumentBounds {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl DocumentBounds {
    /// Build axis-aligned bounds from two opposite extents.
    ///
    /// Extents are normalized so that a caller passing swapped min/max values
    /// still gets a non-negative-size rectangle.
    pub fn axis_aligned(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        let (x0, x1) = if min_x <= max_x { (min_x, max_x) } else { (max_x, min_x) };
        let (y0, y1) = if min_y <= max_y { (min_y, max_y) } else { (max_y, min_y) };
        Self {
            top_left: Point::new(x0, y0),
            top_right: Point::new(x1, y0),
            bottom_left: Point::new(x0, y1),
            bottom_right: Point::new(x1, y1),
        }
    }

    /// Width of the bounded region in pixels.
    pub fn width(&self) -> f32 {
        self.top_right.x - self.top_left.x
    }

    /// Height of the bounded region in pixels.
    pub fn height(&self) -> f32 {
        self.bottom_left.y - self.top_left.y
    }

    /// Area of the bounded region in square pixels.
    pub fn area(&self) -> f32 {
        self.width() * self.height()
    }
}

/// One detected line of text in normalized `[0, 1]` coordinates, supplied by
/// an OCR collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextLineBox {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl TextLineBox {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (`left + width`) in normalized coordinates.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`) in normalized coordinates.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Which strategy produced a set of bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoundsSource {
    /// Union of OCR text-line geometry from a remote collaborator.
    TextGeometry,
    /// Local contrast-based edge scan.
    EdgeScan,
}

impl std::fmt::Display for BoundsSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TextGeometry => f.write_str("text-geometry"),
            Self::EdgeScan => f.write_str("edge-scan"),
        }
    }
}

/// A successful boundary detection, tagged with the strategy that made it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub bounds: DocumentBounds,
    pub source: BoundsSource,
}

/// Lifecycle states of the capture orchestrator. Not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureState {
    /// No live feed.
    Idle,
    /// Feed active, polling for a document.
    Detecting,
    /// Candidate found in automatic mode; counting down to capture.
    CountingDown,
    /// Final image produced; polling suspended until retake.
    Captured,
}

/// Whether capture fires automatically after a stable detection or only on
/// explicit user request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureMode {
    Automatic,
    Manual,
}

/// Standard paper sizes for PDF output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::Letter => (216, 279),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

/// Metadata stored alongside an archived document record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    /// Size of the uploaded JPEG in bytes.
    pub image_bytes: u64,
    /// Size of the uploaded PDF in bytes.
    pub pdf_bytes: u64,
    /// Pixel dimensions of the archived image.
    pub width: u32,
    pub height: u32,
    /// Width / height of the archived image.
    pub aspect_ratio: f32,
}

/// A persisted record of one archived document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub filename: String,
    pub jpg_url: String,
    pub pdf_url: String,
    /// Size of the archived JPEG in bytes.
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
    pub metadata: RecordMetadata,
}
