// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bounds overlay rasterization — outline, corner markers, and a translucent
// fill drawn over a frame. Presentational only; useful for debug output and
// headless front-ends that composite their own video surface.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use docuscan_core::types::DocumentBounds;

/// Overlay green, matching the capture UI.
const OUTLINE: Rgba<u8> = Rgba([16, 185, 129, 255]);
/// Translucent fill alpha applied over the bounded region.
const FILL_ALPHA: u32 = 26;
/// Radius of the corner dots.
const CORNER_RADIUS: i32 = 6;

/// Draw `bounds` onto `frame` in place: a hollow rectangle outline, a filled
/// dot at each of the four corners, and a semi-transparent fill over the
/// interior.
pub fn draw_bounds(frame: &mut RgbaImage, bounds: &DocumentBounds) {
    let x = bounds.top_left.x.round() as i32;
    let y = bounds.top_left.y.round() as i32;
    let w = bounds.width().round().max(1.0) as u32;
    let h = bounds.height().round().max(1.0) as u32;

    // Translucent fill over the interior.
    let (fw, fh) = frame.dimensions();
    for py in y.max(0)..((y + h as i32).min(fh as i32)) {
        for px in x.max(0)..((x + w as i32).min(fw as i32)) {
            let pixel = frame.get_pixel_mut(px as u32, py as u32);
            let Rgba([r, g, b, a]) = *pixel;
            let blend = |src: u8, tint: u8| -> u8 {
                ((src as u32 * (255 - FILL_ALPHA) + tint as u32 * FILL_ALPHA) / 255) as u8
            };
            *pixel = Rgba([
                blend(r, OUTLINE[0]),
                blend(g, OUTLINE[1]),
                blend(b, OUTLINE[2]),
                a,
            ]);
        }
    }

    // Outline; 3px by drawing three nested rectangles.
    for inset in 0..3i32 {
        let rw = w.saturating_sub(2 * inset as u32);
        let rh = h.saturating_sub(2 * inset as u32);
        if rw == 0 || rh == 0 {
            break;
        }
        draw_hollow_rect_mut(
            frame,
            Rect::at(x + inset, y + inset).of_size(rw, rh),
            OUTLINE,
        );
    }

    // Corner markers.
    for corner in [
        bounds.top_left,
        bounds.top_right,
        bounds.bottom_left,
        bounds.bottom_right,
    ] {
        draw_filled_circle_mut(
            frame,
            (corner.x.round() as i32, corner.y.round() as i32),
            CORNER_RADIUS,
            OUTLINE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draws_outline_and_corners() {
        let mut frame = RgbaImage::from_pixel(200, 200, Rgba([0, 0, 0, 255]));
        let bounds = DocumentBounds::axis_aligned(50.0, 50.0, 150.0, 150.0);
        draw_bounds(&mut frame, &bounds);

        // Corner dot at the top-left corner.
        assert_eq!(*frame.get_pixel(50, 50), OUTLINE);
        // A pixel well outside the bounds is untouched.
        assert_eq!(*frame.get_pixel(10, 10), Rgba([0, 0, 0, 255]));
        // A pixel in the interior received the translucent tint.
        let interior = *frame.get_pixel(100, 100);
        assert_ne!(interior, Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn bounds_partially_off_frame_do_not_panic() {
        let mut frame = RgbaImage::from_pixel(100, 100, Rgba([40, 40, 40, 255]));
        let bounds = DocumentBounds::axis_aligned(60.0, 60.0, 180.0, 180.0);
        draw_bounds(&mut frame, &bounds);
    }
}
