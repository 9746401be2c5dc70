// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docuscan-capture — Capture orchestration for DocuScan.
//
// Drives a polling loop over a live frame source, runs the boundary
// estimation fallback chain (remote text geometry first, local edge scan
// second), and tracks the stable-detection → countdown → auto-capture state
// machine. Collaborators (frame source, OCR, overlay) plug in via the traits
// in `traits`.

pub mod orchestrator;
pub mod overlay;
pub mod traits;

#[cfg(feature = "ocr")]
pub mod ocr;

pub use orchestrator::{CaptureOrchestrator, CapturedFrame};
pub use overlay::draw_bounds;
pub use traits::{BoundsOverlay, FrameSource, NullOverlay, TextDetector};

#[cfg(feature = "ocr")]
pub use ocr::OcrTextDetector;
