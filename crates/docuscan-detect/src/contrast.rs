// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contrast gate — cheap pre-check that a frame contains enough local
// luminance variation to justify running full boundary detection.

use image::RgbaImage;
use tracing::{debug, instrument};

use docuscan_core::config::ContrastConfig;

use crate::sampler::FrameSampler;

/// Decides whether a frame plausibly contains a document edge.
///
/// A document against a background produces sharp luminance discontinuities
/// at its border, so a global average of local variance is enough to gate the
/// much finer per-pixel boundary scan and skip blank frames cheaply.
pub struct ContrastGate {
    cfg: ContrastConfig,
}

impl ContrastGate {
    pub fn new(cfg: ContrastConfig) -> Self {
        Self { cfg }
    }

    /// Walk a regular grid over the frame interior and compare each grid
    /// point's luminance against its four axis-neighbors. Returns `true` iff
    /// the mean absolute difference exceeds the configured threshold.
    ///
    /// Frames too small for the grid (no interior samples) gate to `false`.
    #[instrument(skip_all, fields(width = frame.width(), height = frame.height()))]
    pub fn has_sufficient_contrast(&self, frame: &RgbaImage) -> bool {
        let sampler = FrameSampler::new(frame);
        let (width, height) = (sampler.width(), sampler.height());
        let margin = self.cfg.margin_px;
        let offset = self.cfg.neighbor_offset_px;

        if width <= 2 * margin || height <= 2 * margin {
            debug!("frame smaller than contrast grid margin");
            return false;
        }

        let mut total_variance = 0.0f64;
        let mut samples = 0u64;

        let mut y = margin;
        while y < height - margin {
            let mut x = margin;
            while x < width - margin {
                let center = sampler.luminance_at(x, y);

                // Four axis-neighbors at the configured offset. The margin
                // keeps them in bounds as long as offset <= margin.
                let neighbors = [
                    (x + offset, y),
                    (x.wrapping_sub(offset), y),
                    (x, y + offset),
                    (x, y.wrapping_sub(offset)),
                ];

                for (nx, ny) in neighbors {
                    if nx < width && ny < height {
                        let neighbor = sampler.luminance_at(nx, ny);
                        total_variance += (center - neighbor).abs() as f64;
                        samples += 1;
                    }
                }

                x += self.cfg.step_px;
            }
            y += self.cfg.step_px;
        }

        if samples == 0 {
            return false;
        }

        let avg_variance = total_variance / samples as f64;
        debug!(avg_variance, samples, threshold = self.cfg.threshold, "contrast gate evaluated");

        avg_variance > self.cfg.threshold as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn gate() -> ContrastGate {
        ContrastGate::new(ContrastConfig::default())
    }

    #[test]
    fn uniform_frame_has_no_contrast() {
        let frame = RgbaImage::from_pixel(640, 480, Rgba([180, 180, 180, 255]));
        assert!(!gate().has_sufficient_contrast(&frame));
    }

    #[test]
    fn high_contrast_stripes_pass() {
        // Alternating 10px black/white vertical bands.
        let frame = RgbaImage::from_fn(640, 480, |x, _| {
            if (x / 10) % 2 == 0 {
                Rgba([0, 0, 0, 255])
            } else {
                Rgba([255, 255, 255, 255])
            }
        });
        assert!(gate().has_sufficient_contrast(&frame));
    }

    #[test]
    fn tiny_frame_gates_false() {
        let frame = RgbaImage::from_pixel(16, 16, Rgba([0, 0, 0, 255]));
        assert!(!gate().has_sufficient_contrast(&frame));
    }

    #[test]
    fn white_document_on_dark_background_passes() {
        let frame = RgbaImage::from_fn(800, 600, |x, y| {
            if (200..600).contains(&x) && (150..450).contains(&y) {
                Rgba([250, 250, 250, 255])
            } else {
                Rgba([20, 20, 20, 255])
            }
        });
        assert!(gate().has_sufficient_contrast(&frame));
    }
}
