// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-pixel luminance sampling over a raster frame.

use image::RgbaImage;

/// Read-only luminance view over a borrowed frame.
///
/// Luminance is the unweighted mean of the red, green, and blue channels,
/// matching what the detection thresholds were calibrated against — this is
/// deliberately not the perceptual (Rec. 601/709) weighting.
///
/// Callers are responsible for bounds-checking: the scanning strategies
/// pre-filter coordinates to stay inside `[margin, dimension - margin)`, so
/// `luminance_at` assumes in-bounds coordinates.
pub struct FrameSampler<'a> {
    frame: &'a RgbaImage,
}

impl<'a> FrameSampler<'a> {
    pub fn new(frame: &'a RgbaImage) -> Self {
        Self { frame }
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.frame.width()
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.frame.height()
    }

    /// Mean of the R/G/B channels at `(x, y)`, in `[0, 255]`.
    pub fn luminance_at(&self, x: u32, y: u32) -> f32 {
        let image::Rgba([r, g, b, _]) = *self.frame.get_pixel(x, y);
        (r as f32 + g as f32 + b as f32) / 3.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn luminance_is_unweighted_channel_mean() {
        let frame = RgbaImage::from_pixel(4, 4, Rgba([30, 60, 90, 255]));
        let sampler = FrameSampler::new(&frame);
        assert_eq!(sampler.luminance_at(0, 0), 60.0);
        assert_eq!(sampler.luminance_at(3, 3), 60.0);
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let frame = RgbaImage::from_pixel(2, 2, Rgba([120, 120, 120, 0]));
        let sampler = FrameSampler::new(&frame);
        assert_eq!(sampler.luminance_at(1, 1), 120.0);
    }

    #[test]
    fn edge_coordinates_are_readable() {
        let frame = RgbaImage::from_pixel(5, 7, Rgba([255, 255, 255, 255]));
        let sampler = FrameSampler::new(&frame);
        assert_eq!(sampler.luminance_at(4, 6), 255.0);
    }
}
