// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local edge-scan boundary estimator — grid-scan the frame for high local
// contrast, accumulate a tight bounding box from edge hits, pad it, and fall
// back to a fixed centered box when the result is implausible.

use image::RgbaImage;
use tracing::{debug, instrument};

use docuscan_core::config::EdgeScanConfig;
use docuscan_core::types::DocumentBounds;

/// Estimates document bounds from pixel contrast alone.
///
/// Precondition: the caller has already run the [`ContrastGate`]
/// (crate::contrast::ContrastGate) on the frame; the estimator does not
/// re-check it. `estimate` always yields bounds — degenerate scans route to
/// the fixed centered fallback box rather than failing.
pub struct EdgeScanEstimator {
    cfg: EdgeScanConfig,
}

impl EdgeScanEstimator {
    pub fn new(cfg: EdgeScanConfig) -> Self {
        Self { cfg }
    }

    /// Scan the frame on a fine grid, comparing each point's luminance to the
    /// pixels `probe_offset_px` to the right and below. Points where either
    /// absolute difference exceeds `edge_threshold` extend a running bounding
    /// box. The box is padded, clamped to the frame, and sanity-checked
    /// against the plausible area range.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn estimate(&self, frame: &RgbaImage) -> DocumentBounds {
        let sampler = crate::sampler::FrameSampler::new(frame);
        let (width, height) = (sampler.width(), sampler.height());
        let margin = self.cfg.margin_px;
        let probe = self.cfg.probe_offset_px;

        // Inverted sentinel box: stays inverted when no edge hit occurs.
        let mut min_x = width;
        let mut max_x = 0u32;
        let mut min_y = height;
        let mut max_y = 0u32;
        let mut edge_hits = 0u32;

        if width > 2 * margin && height > 2 * margin {
            let mut y = margin;
            while y < height - margin {
                let mut x = margin;
                while x < width - margin {
                    // The margin keeps both probes inside the frame as long
                    // as probe_offset <= margin.
                    let center = sampler.luminance_at(x, y);
                    let right = sampler.luminance_at(x + probe, y);
                    let below = sampler.luminance_at(x, y + probe);

                    if (center - right).abs() > self.cfg.edge_threshold
                        || (center - below).abs() > self.cfg.edge_threshold
                    {
                        min_x = min_x.min(x);
                        max_x = max_x.max(x);
                        min_y = min_y.min(y);
                        max_y = max_y.max(y);
                        edge_hits += 1;
                    }

                    x += self.cfg.step_px;
                }
                y += self.cfg.step_px;
            }
        }

        debug!(edge_hits, "edge scan complete");

        // Zero hits leave the sentinel box inverted (min > max); that must
        // route to the fallback box, never a negative-size rectangle.
        if edge_hits == 0 || min_x > max_x || min_y > max_y {
            debug!("no edge hits; using fallback box");
            return self.fallback_box(width, height);
        }

        // Pad, clamped to the frame.
        let padding = self.cfg.padding_px;
        let min_x = min_x.saturating_sub(padding);
        let max_x = (max_x + padding).min(width);
        let min_y = min_y.saturating_sub(padding);
        let max_y = (max_y + padding).min(height);

        // Plausibility: discard boxes covering too little or too much of the
        // frame and use the fixed centered box instead.
        let area = (max_x - min_x) as f32 * (max_y - min_y) as f32;
        let total_area = width as f32 * height as f32;
        if area < total_area * self.cfg.min_area_ratio
            || area > total_area * self.cfg.max_area_ratio
        {
            debug!(
                area,
                total_area,
                ratio = area / total_area,
                "implausible box; using fallback box"
            );
            return self.fallback_box(width, height);
        }

        debug!(
            min_x,
            min_y,
            max_x,
            max_y,
            ratio = area / total_area,
            "document bounds estimated"
        );

        DocumentBounds::axis_aligned(min_x as f32, min_y as f32, max_x as f32, max_y as f32)
    }

    /// The fixed centered box, inset by `fallback_inset_px` from every edge.
    /// Guards against spurious or degenerate detections.
    fn fallback_box(&self, width: u32, height: u32) -> DocumentBounds {
        let inset = self.cfg.fallback_inset_px as f32;
        DocumentBounds::axis_aligned(
            inset,
            inset,
            (width as f32 - inset).max(inset),
            (height as f32 - inset).max(inset),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn estimator() -> EdgeScanEstimator {
        EdgeScanEstimator::new(EdgeScanConfig::default())
    }

    /// Black 800x600 background with a centered white 400x300 rectangle.
    fn synthetic_document() -> RgbaImage {
        RgbaImage::from_fn(800, 600, |x, y| {
            if (200..600).contains(&x) && (150..450).contains(&y) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        })
    }

    #[test]
    fn uniform_frame_returns_fallback_box_not_inverted() {
        let frame = RgbaImage::from_pixel(800, 600, Rgba([128, 128, 128, 255]));
        let bounds = estimator().estimate(&frame);

        // Fallback box: inset 60 from every edge.
        assert_eq!(bounds.top_left.x, 60.0);
        assert_eq!(bounds.top_left.y, 60.0);
        assert_eq!(bounds.bottom_right.x, 740.0);
        assert_eq!(bounds.bottom_right.y, 540.0);
        assert!(bounds.width() > 0.0);
        assert!(bounds.height() > 0.0);
    }

    #[test]
    fn centered_rectangle_yields_plausible_tight_bounds() {
        let frame = synthetic_document();
        let bounds = estimator().estimate(&frame);

        let total_area = 800.0 * 600.0;
        let ratio = bounds.area() / total_area;
        assert!(ratio > 0.10 && ratio < 0.85, "area ratio {ratio} out of range");

        // The box must surround the rectangle within padding (30px) plus one
        // grid step (5px) of slack on each side.
        let slack = 35.0;
        assert!(bounds.top_left.x >= 200.0 - slack && bounds.top_left.x <= 200.0);
        assert!(bounds.top_left.y >= 150.0 - slack && bounds.top_left.y <= 150.0);
        assert!(bounds.bottom_right.x <= 600.0 + slack && bounds.bottom_right.x >= 600.0);
        assert!(bounds.bottom_right.y <= 450.0 + slack && bounds.bottom_right.y >= 450.0);
    }

    #[test]
    fn estimate_is_idempotent_on_static_frame() {
        let frame = synthetic_document();
        let est = estimator();
        let first = est.estimate(&frame);
        let second = est.estimate(&frame);
        assert_eq!(first, second);
    }

    #[test]
    fn corner_order_invariant_holds() {
        let frame = synthetic_document();
        let bounds = estimator().estimate(&frame);
        assert!(bounds.top_right.x >= bounds.top_left.x);
        assert!(bounds.bottom_left.y >= bounds.top_left.y);
        assert_eq!(bounds.top_left.y, bounds.top_right.y);
        assert_eq!(bounds.top_left.x, bounds.bottom_left.x);
    }

    #[test]
    fn full_frame_texture_falls_back() {
        // Texture everywhere: edge hits across the whole frame produce a box
        // larger than 85% of the frame, which must be discarded.
        let frame = RgbaImage::from_fn(800, 600, |x, y| {
            if (x / 5 + y / 5) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        let bounds = estimator().estimate(&frame);
        assert_eq!(bounds.top_left.x, 60.0);
        assert_eq!(bounds.top_left.y, 60.0);
    }

    #[test]
    fn tiny_frame_uses_fallback_without_panicking() {
        let frame = RgbaImage::from_pixel(16, 12, Rgba([255, 0, 0, 255]));
        let bounds = estimator().estimate(&frame);
        assert!(bounds.width() >= 0.0);
        assert!(bounds.height() >= 0.0);
    }
}
