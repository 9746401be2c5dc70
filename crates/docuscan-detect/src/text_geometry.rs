// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text-geometry boundary estimator — derive document bounds from the union
// of OCR text-line boxes supplied by an external collaborator.

use tracing::{debug, instrument};

use docuscan_core::config::TextGeometryConfig;
use docuscan_core::types::{DocumentBounds, TextLineBox};

/// Estimates document bounds from externally supplied text-line geometry.
///
/// The line boxes arrive in normalized `[0, 1]` coordinates; the estimator
/// unions them, pads the union by a fraction of the unit square, clamps, and
/// rescales to pixel space. Fewer than `min_lines` lines is insufficient
/// evidence of a document and yields `None` — a normal outcome, not an
/// error. A failing OCR call never reaches this code; the orchestrator
/// degrades to the edge-scan strategy instead.
pub struct TextGeometryEstimator {
    cfg: TextGeometryConfig,
}

impl TextGeometryEstimator {
    pub fn new(cfg: TextGeometryConfig) -> Self {
        Self { cfg }
    }

    /// Union the line boxes, pad, clamp to the unit square, and scale by the
    /// frame dimensions into pixel-space corners in the fixed order.
    #[instrument(skip_all, fields(lines = lines.len(), frame_width, frame_height))]
    pub fn estimate(
        &self,
        lines: &[TextLineBox],
        frame_width: u32,
        frame_height: u32,
    ) -> Option<DocumentBounds> {
        if lines.len() < self.cfg.min_lines {
            debug!(
                lines = lines.len(),
                min_lines = self.cfg.min_lines,
                "insufficient text lines for a document"
            );
            return None;
        }

        let mut min_left = 1.0f32;
        let mut max_right = 0.0f32;
        let mut min_top = 1.0f32;
        let mut max_bottom = 0.0f32;

        for line in lines {
            min_left = min_left.min(line.left);
            max_right = max_right.max(line.right());
            min_top = min_top.min(line.top);
            max_bottom = max_bottom.max(line.bottom());
        }

        let padding = self.cfg.padding;
        let min_left = (min_left - padding).max(0.0);
        let max_right = (max_right + padding).min(1.0);
        let min_top = (min_top - padding).max(0.0);
        let max_bottom = (max_bottom + padding).min(1.0);

        debug!(min_left, max_right, min_top, max_bottom, "text union box");

        Some(DocumentBounds::axis_aligned(
            min_left * frame_width as f32,
            min_top * frame_height as f32,
            max_right * frame_width as f32,
            max_bottom * frame_height as f32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn estimator() -> TextGeometryEstimator {
        TextGeometryEstimator::new(TextGeometryConfig::default())
    }

    fn three_lines() -> Vec<TextLineBox> {
        vec![
            TextLineBox::new(0.1, 0.1, 0.3, 0.05),
            TextLineBox::new(0.5, 0.2, 0.2, 0.05),
            TextLineBox::new(0.2, 0.6, 0.4, 0.05),
        ]
    }

    #[test]
    fn two_lines_are_insufficient_evidence() {
        let lines = vec![
            TextLineBox::new(0.1, 0.1, 0.3, 0.05),
            TextLineBox::new(0.5, 0.2, 0.2, 0.05),
        ];
        assert!(estimator().estimate(&lines, 1920, 1080).is_none());
    }

    #[test]
    fn empty_lines_are_insufficient_evidence() {
        assert!(estimator().estimate(&[], 1920, 1080).is_none());
    }

    #[test]
    fn three_lines_produce_padded_union() {
        let bounds = estimator()
            .estimate(&three_lines(), 1000, 500)
            .expect("three lines should be accepted");

        // Union: left 0.10, right 0.70, top 0.10, bottom 0.65; pad 0.05.
        assert!((bounds.top_left.x - 0.05 * 1000.0).abs() < 1e-3);
        assert!((bounds.top_left.y - 0.05 * 500.0).abs() < 1e-3);
        assert!((bounds.top_right.x - 0.75 * 1000.0).abs() < 1e-3);
        assert!((bounds.bottom_left.y - 0.70 * 500.0).abs() < 1e-3);
    }

    #[test]
    fn padding_clamps_to_unit_square() {
        let lines = vec![
            TextLineBox::new(0.0, 0.0, 0.5, 0.1),
            TextLineBox::new(0.3, 0.5, 0.7, 0.1),
            TextLineBox::new(0.1, 0.85, 0.5, 0.15),
        ];
        let bounds = estimator()
            .estimate(&lines, 800, 600)
            .expect("should be accepted");

        assert_eq!(bounds.top_left.x, 0.0);
        assert_eq!(bounds.top_left.y, 0.0);
        assert_eq!(bounds.bottom_right.x, 800.0);
        assert_eq!(bounds.bottom_right.y, 600.0);
    }

    #[test]
    fn corner_order_is_fixed() {
        let bounds = estimator()
            .estimate(&three_lines(), 640, 480)
            .expect("should be accepted");
        assert_eq!(bounds.top_left.y, bounds.top_right.y);
        assert_eq!(bounds.bottom_left.y, bounds.bottom_right.y);
        assert_eq!(bounds.top_left.x, bounds.bottom_left.x);
        assert_eq!(bounds.top_right.x, bounds.bottom_right.x);
    }
}
