// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Collaborator traits for the capture orchestrator.
//
// The surrounding application supplies these: a live frame source (camera),
// an OCR service returning text-line geometry, and a display surface for the
// bounds overlay. The orchestrator only depends on the trait contracts.

use image::RgbaImage;

use docuscan_core::error::Result;
use docuscan_core::types::{Detection, TextLineBox};

/// A live video feed that yields raster frames on demand.
///
/// Feed acquisition failure (camera missing, permission denied) surfaces
/// through `start`; the orchestrator propagates it without retrying.
pub trait FrameSource {
    /// Open the feed. Called on the `Idle -> Detecting` transition.
    fn start(&mut self) -> Result<()>;

    /// Grab the current frame. Only called while the feed is started.
    fn frame(&mut self) -> Result<RgbaImage>;

    /// Stop the underlying feed. Called on teardown; must be idempotent.
    fn stop(&mut self);
}

/// Remote OCR collaborator returning per-line text geometry.
///
/// Boxes are normalized to `[0, 1]`. An `Err` means the service itself is
/// unavailable (network/service fault) and makes the orchestrator fall back
/// to the local edge-scan strategy within the same cycle. A successful call
/// with few or no lines is NOT an error — that is "no document found".
pub trait TextDetector {
    fn detect_lines(
        &self,
        frame: &RgbaImage,
    ) -> impl Future<Output = Result<Vec<TextLineBox>>> + Send;
}

/// Display collaborator receiving the current detection every cycle.
///
/// Purely presentational; `None` clears the overlay.
pub trait BoundsOverlay {
    fn show(&mut self, detection: Option<&Detection>);
}

/// Overlay sink that discards everything; for headless use and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullOverlay;

impl BoundsOverlay for NullOverlay {
    fn show(&mut self, _detection: Option<&Detection>) {}
}
