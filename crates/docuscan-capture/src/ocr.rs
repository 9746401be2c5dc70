// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Local OCR-backed text detector for the text-geometry strategy.
//
// Uses the `ocrs` crate, a pure-Rust OCR engine backed by neural network
// models executed via `rten`. Only the detection/line-grouping stages run —
// the pipeline never recognizes characters, it only needs line geometry.
//
// # Feature Gate
//
// This module is only available when the `ocr` feature is enabled:
//
// ```toml
// docuscan-capture = { path = "crates/docuscan-capture", features = ["ocr"] }
// ```
//
// # Model Setup
//
// The engine requires two ONNX model files:
//
// - **Detection model** (`text-detection.rten`) — locates text regions.
// - **Recognition model** (`text-recognition.rten`) — required by the engine
//   constructor even though recognition is never invoked here.
//
// Models can be downloaded from the ocrs-models repository, or obtained
// automatically by running the `ocrs-cli` tool once (they land in
// `$XDG_CACHE_HOME/ocrs`, typically `~/.cache/ocrs`).

use std::path::{Path, PathBuf};

use image::RgbaImage;
use ocrs::{ImageSource, OcrEngine, OcrEngineParams};
use rten::Model;
use rten_imageproc::RotatedRect;
use tracing::{debug, info, instrument};

use docuscan_core::error::{DocuscanError, Result};
use docuscan_core::types::TextLineBox;

use crate::traits::TextDetector;

/// Well-known filenames for the detection and recognition models.
const DETECTION_MODEL_FILENAME: &str = "text-detection.rten";
const RECOGNITION_MODEL_FILENAME: &str = "text-recognition.rten";

/// Default directory for cached OCR model files.
///
/// Follows the XDG Base Directory specification: `$XDG_CACHE_HOME/ocrs`,
/// falling back to `~/.cache/ocrs` when `XDG_CACHE_HOME` is unset.
fn default_model_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        PathBuf::from(xdg).join("ocrs")
    } else if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".cache").join("ocrs")
    } else {
        PathBuf::from("ocrs-models")
    }
}

/// Configuration for constructing an [`OcrTextDetector`].
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Path to the text-detection model file (`.rten`).
    pub detection_model_path: PathBuf,
    /// Path to the text-recognition model file (`.rten`).
    pub recognition_model_path: PathBuf,
}

impl Default for OcrConfig {
    fn default() -> Self {
        let dir = default_model_dir();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }
}

impl OcrConfig {
    /// Create a config with an explicit model directory containing
    /// `text-detection.rten` and `text-recognition.rten`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            detection_model_path: dir.join(DETECTION_MODEL_FILENAME),
            recognition_model_path: dir.join(RECOGNITION_MODEL_FILENAME),
        }
    }

    /// Verify that both model files exist.
    pub fn validate(&self) -> Result<()> {
        for path in [&self.detection_model_path, &self.recognition_model_path] {
            if !path.exists() {
                return Err(DocuscanError::Ocr(format!(
                    "model not found at {}; run `ocrs-cli` once to download models",
                    path.display()
                )));
            }
        }
        Ok(())
    }
}

/// OCR-backed [`TextDetector`] — extracts text-line geometry from frames.
///
/// Model loading is the expensive step; keep the detector around and call
/// [`detect_lines`](TextDetector::detect_lines) per frame. The `ocrs` and
/// `rten` crates must be compiled in release mode; debug builds are
/// extremely slow.
pub struct OcrTextDetector {
    engine: OcrEngine,
}

impl OcrTextDetector {
    /// Create a detector, loading models from the paths given in `config`.
    #[instrument(skip_all, fields(
        detection = %config.detection_model_path.display(),
    ))]
    pub fn new(config: OcrConfig) -> Result<Self> {
        config.validate()?;

        info!("loading OCR detection model");
        let detection_model = Model::load_file(&config.detection_model_path).map_err(|err| {
            DocuscanError::Ocr(format!(
                "failed to load detection model from {}: {}",
                config.detection_model_path.display(),
                err
            ))
        })?;

        info!("loading OCR recognition model");
        let recognition_model =
            Model::load_file(&config.recognition_model_path).map_err(|err| {
                DocuscanError::Ocr(format!(
                    "failed to load recognition model from {}: {}",
                    config.recognition_model_path.display(),
                    err
                ))
            })?;

        let engine = OcrEngine::new(OcrEngineParams {
            detection_model: Some(detection_model),
            recognition_model: Some(recognition_model),
            ..Default::default()
        })
        .map_err(|err| DocuscanError::Ocr(format!("failed to initialise OCR engine: {}", err)))?;

        info!("OCR text detector initialised");
        Ok(Self { engine })
    }

    /// Create a detector using the default model cache directory.
    pub fn with_defaults() -> Result<Self> {
        Self::new(OcrConfig::default())
    }

    fn lines_for_frame(&self, frame: &RgbaImage) -> Result<Vec<TextLineBox>> {
        let rgb: image::RgbImage = image::DynamicImage::ImageRgba8(frame.clone()).to_rgb8();
        let (width, height) = rgb.dimensions();

        let source = ImageSource::from_bytes(rgb.as_raw(), (width, height)).map_err(|err| {
            DocuscanError::Ocr(format!(
                "failed to create image source ({}x{}): {}",
                width, height, err
            ))
        })?;

        let input = self
            .engine
            .prepare_input(source)
            .map_err(|err| DocuscanError::Ocr(format!("OCR preprocessing failed: {}", err)))?;

        // Detect word boxes, then group them into lines. Character
        // recognition is never run.
        let word_rects = self
            .engine
            .detect_words(&input)
            .map_err(|err| DocuscanError::Ocr(format!("word detection failed: {}", err)))?;
        debug!(word_count = word_rects.len(), "words detected");

        let line_rects = self.engine.find_text_lines(&input, &word_rects);

        // Each line is the union of its word rects, normalized by the frame
        // dimensions.
        let mut lines = Vec::with_capacity(line_rects.len());
        for words in &line_rects {
            let Some((min_x, min_y, max_x, max_y)) = union_of_words(words) else {
                continue;
            };

            let left = (min_x / width as f32).clamp(0.0, 1.0);
            let top = (min_y / height as f32).clamp(0.0, 1.0);
            let right = (max_x / width as f32).clamp(0.0, 1.0);
            let bottom = (max_y / height as f32).clamp(0.0, 1.0);

            lines.push(TextLineBox::new(left, top, right - left, bottom - top));
        }

        debug!(line_count = lines.len(), "text lines extracted");
        Ok(lines)
    }
}

impl TextDetector for OcrTextDetector {
    async fn detect_lines(&self, frame: &RgbaImage) -> Result<Vec<TextLineBox>> {
        self.lines_for_frame(frame)
    }
}

/// Axis-aligned union of a line's word boxes, in pixel coordinates.
fn union_of_words(words: &[RotatedRect]) -> Option<(f32, f32, f32, f32)> {
    if words.is_empty() {
        return None;
    }
    let mut min_x = f32::MAX;
    let mut min_y = f32::MAX;
    let mut max_x = f32::MIN;
    let mut max_y = f32::MIN;
    for word in words {
        let rect = word.bounding_rect();
        min_x = min_x.min(rect.left());
        min_y = min_y.min(rect.top());
        max_x = max_x.max(rect.right());
        max_y = max_y.max(rect.bottom());
    }
    Some((min_x, min_y, max_x, max_y))
}

/// Check whether OCR model files exist in the default cache location.
pub fn models_available() -> bool {
    let config = OcrConfig::default();
    config.detection_model_path.exists() && config.recognition_model_path.exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_to_cache_dir() {
        let config = OcrConfig::default();
        let path = config.detection_model_path.to_string_lossy();
        assert!(path.ends_with(DETECTION_MODEL_FILENAME));
        let path = config.recognition_model_path.to_string_lossy();
        assert!(path.ends_with(RECOGNITION_MODEL_FILENAME));
    }

    #[test]
    fn config_from_dir() {
        let config = OcrConfig::from_dir("/tmp/models");
        assert_eq!(
            config.detection_model_path,
            PathBuf::from("/tmp/models/text-detection.rten")
        );
    }

    #[test]
    fn validate_missing_models_fails() {
        let config = OcrConfig::from_dir("/nonexistent/ocr-models");
        assert!(config.validate().is_err());
    }
}
