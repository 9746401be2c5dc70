// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docuscan-detect — Document boundary detection and cropping.
//
// Given a raw camera frame (an `image::RgbaImage`), this crate produces the
// four corner points bounding the document and a cropped output image.
// Two interchangeable estimation strategies are provided: a local
// contrast-based edge scan over the pixels, and a text-geometry union over
// OCR line boxes supplied by an external collaborator. Frames are owned by
// the caller; the crate only reads them, except the cropper which allocates
// a fresh output raster.

pub mod contrast;
pub mod crop;
pub mod edge_scan;
pub mod sampler;
pub mod text_geometry;

pub use contrast::ContrastGate;
pub use crop::crop_to_bounds;
pub use edge_scan::EdgeScanEstimator;
pub use sampler::FrameSampler;
pub use text_geometry::TextGeometryEstimator;
