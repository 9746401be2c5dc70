// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JPEG encoding for archived captures.

use image::RgbaImage;
use tracing::debug;

use docuscan_core::error::{DocuscanError, Result};

/// Encode a frame as JPEG bytes with the given quality (1-100).
///
/// The alpha channel is dropped; captures are composited onto a white
/// background before they reach this point, so alpha carries no information.
pub fn encode_jpeg(image: &RgbaImage, quality: u8) -> Result<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(image.clone()).to_rgb8();

    let mut buffer = Vec::new();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buffer, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| DocuscanError::Image(format!("JPEG encoding failed: {}", err)))?;

    debug!(
        width = image.width(),
        height = image.height(),
        quality,
        bytes = buffer.len(),
        "frame encoded as JPEG"
    );
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([200, 180, 160, 255]))
    }

    #[test]
    fn output_has_jpeg_magic_bytes() {
        let bytes = encode_jpeg(&frame(32, 24), 90).unwrap();
        assert!(bytes.len() > 2);
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn output_decodes_to_same_dimensions() {
        let bytes = encode_jpeg(&frame(64, 48), 95).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 48);
    }
}
