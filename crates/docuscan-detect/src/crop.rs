// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document cropper — copy the bounded region of a frame onto a fresh white
// raster. Cropping must never be a hard failure path: degenerate bounds
// degrade to returning the full frame.

use image::{Rgba, RgbaImage};
use tracing::{debug, instrument, warn};

use docuscan_core::types::DocumentBounds;

/// Opaque white, the background downstream PDF composition expects even when
/// the crop rectangle partially exceeds the actual document edges.
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Crop `frame` to the axis-aligned extent of `bounds`.
///
/// The output raster is `round(bounds.width()) x round(bounds.height())`,
/// filled opaque white, with the source region copied (not blended) at the
/// origin. Bounds that round to a zero-size rectangle or start outside the
/// frame fall back to returning the full frame unchanged.
#[instrument(skip_all, fields(
    width = frame.width(),
    height = frame.height(),
    crop_w = bounds.width(),
    crop_h = bounds.height(),
))]
pub fn crop_to_bounds(frame: &RgbaImage, bounds: &DocumentBounds) -> RgbaImage {
    let crop_x = bounds.top_left.x.round();
    let crop_y = bounds.top_left.y.round();
    let crop_w = bounds.width().round();
    let crop_h = bounds.height().round();

    if crop_w < 1.0
        || crop_h < 1.0
        || crop_x < 0.0
        || crop_y < 0.0
        || crop_x >= frame.width() as f32
        || crop_y >= frame.height() as f32
    {
        warn!(crop_x, crop_y, crop_w, crop_h, "degenerate crop bounds; returning full frame");
        return frame.clone();
    }

    let crop_x = crop_x as u32;
    let crop_y = crop_y as u32;
    let crop_w = crop_w as u32;
    let crop_h = crop_h as u32;

    let mut output = RgbaImage::from_pixel(crop_w, crop_h, BACKGROUND);

    // Copy the part of the crop rectangle that overlaps the frame; pixels
    // past the frame edge stay white.
    let copy_w = crop_w.min(frame.width() - crop_x);
    let copy_h = crop_h.min(frame.height() - crop_y);
    for y in 0..copy_h {
        for x in 0..copy_w {
            output.put_pixel(x, y, *frame.get_pixel(crop_x + x, crop_y + y));
        }
    }

    debug!(crop_x, crop_y, crop_w, crop_h, "crop complete");
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 255])
        })
    }

    #[test]
    fn output_dimensions_match_rounded_bounds() {
        let frame = gradient_frame(800, 600);
        let bounds = DocumentBounds::axis_aligned(100.4, 50.6, 500.4, 350.6);
        let out = crop_to_bounds(&frame, &bounds);
        assert_eq!(out.width(), 400);
        assert_eq!(out.height(), 300);
    }

    #[test]
    fn copied_pixels_match_source_region() {
        let frame = gradient_frame(800, 600);
        let bounds = DocumentBounds::axis_aligned(100.0, 50.0, 300.0, 250.0);
        let out = crop_to_bounds(&frame, &bounds);
        assert_eq!(out.get_pixel(0, 0), frame.get_pixel(100, 50));
        assert_eq!(out.get_pixel(199, 199), frame.get_pixel(299, 249));
    }

    #[test]
    fn region_past_frame_edge_stays_white() {
        let frame = gradient_frame(200, 200);
        // Crop rectangle extends 50px past the right and bottom edges.
        let bounds = DocumentBounds::axis_aligned(100.0, 100.0, 250.0, 250.0);
        let out = crop_to_bounds(&frame, &bounds);
        assert_eq!(out.width(), 150);
        assert_eq!(out.height(), 150);
        assert_eq!(*out.get_pixel(120, 120), BACKGROUND);
        assert_eq!(out.get_pixel(0, 0), frame.get_pixel(100, 100));
    }

    #[test]
    fn zero_size_bounds_fall_back_to_full_frame() {
        let frame = gradient_frame(320, 240);
        let bounds = DocumentBounds::axis_aligned(60.0, 60.0, 60.0, 60.0);
        let out = crop_to_bounds(&frame, &bounds);
        assert_eq!(out.dimensions(), frame.dimensions());
        assert_eq!(out, frame);
    }

    #[test]
    fn origin_outside_frame_falls_back_to_full_frame() {
        let frame = gradient_frame(320, 240);
        let bounds = DocumentBounds::axis_aligned(400.0, 10.0, 500.0, 100.0);
        let out = crop_to_bounds(&frame, &bounds);
        assert_eq!(out, frame);
    }

    #[test]
    fn copies_verbatim_without_blending() {
        let mut frame = gradient_frame(100, 100);
        // Punch a transparent pixel into the source.
        frame.put_pixel(50, 50, Rgba([0, 0, 0, 0]));
        let bounds = DocumentBounds::axis_aligned(40.0, 40.0, 90.0, 90.0);
        let out = crop_to_bounds(&frame, &bounds);
        // Copy, not blend: the transparent source pixel is copied verbatim.
        assert_eq!(*out.get_pixel(10, 10), Rgba([0, 0, 0, 0]));
    }
}
