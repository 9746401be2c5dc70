// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detection and capture configuration. The defaults carry the empirical
// tuning values the pipeline was calibrated with; all of them are knobs,
// not constants.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::{CaptureMode, PaperSize};

/// Tuning for the cheap contrast pre-check that gates full boundary search.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ContrastConfig {
    /// Grid step between sampled pixels.
    pub step_px: u32,
    /// Distance to the four axis-neighbors compared against each grid point.
    pub neighbor_offset_px: u32,
    /// Margin excluded from every frame edge.
    pub margin_px: u32,
    /// Minimum average |center - neighbor| luminance difference.
    ///
    /// Calibrate per capture device: low-resolution sensors (laptop webcams)
    /// need a low value such as the default 3.0; sharp phone cameras can run
    /// considerably higher before blank frames start passing the gate.
    pub threshold: f32,
}

impl Default for ContrastConfig {
    fn default() -> Self {
        Self {
            step_px: 20,
            neighbor_offset_px: 10,
            margin_px: 20,
            threshold: 3.0,
        }
    }
}

/// Tuning for the local edge-scan boundary estimator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EdgeScanConfig {
    /// Grid step for the edge-hit scan.
    pub step_px: u32,
    /// Margin excluded from every frame edge.
    pub margin_px: u32,
    /// Offset of the right/below probe pixels.
    pub probe_offset_px: u32,
    /// Minimum |Δluminance| for a grid point to count as an edge hit.
    pub edge_threshold: f32,
    /// Padding added to the accumulated bounding box on all sides.
    pub padding_px: u32,
    /// Inset of the fixed centered fallback box from every frame edge.
    pub fallback_inset_px: u32,
    /// Boxes smaller than this fraction of the frame area are implausible.
    pub min_area_ratio: f32,
    /// Boxes larger than this fraction of the frame area are implausible.
    pub max_area_ratio: f32,
}

impl Default for EdgeScanConfig {
    fn default() -> Self {
        Self {
            step_px: 5,
            margin_px: 10,
            probe_offset_px: 5,
            edge_threshold: 15.0,
            padding_px: 30,
            fallback_inset_px: 60,
            min_area_ratio: 0.10,
            max_area_ratio: 0.85,
        }
    }
}

/// Tuning for the text-geometry boundary estimator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextGeometryConfig {
    /// Minimum number of text lines required to accept a frame as a document.
    pub min_lines: usize,
    /// Padding added to the union box, as a fraction of the unit square.
    pub padding: f32,
}

impl Default for TextGeometryConfig {
    fn default() -> Self {
        Self {
            min_lines: 3,
            padding: 0.05,
        }
    }
}

/// Groups the per-strategy detection tuning.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DetectionConfig {
    pub contrast: ContrastConfig,
    pub edge_scan: EdgeScanConfig,
    pub text_geometry: TextGeometryConfig,
}

/// Capture orchestrator timing and mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Interval between detection ticks while the feed is active.
    pub detect_interval: Duration,
    /// Number of ticks between a stable detection and auto-capture.
    pub countdown_ticks: u32,
    /// Initial capture mode.
    pub mode: CaptureMode,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            detect_interval: Duration::from_secs(1),
            countdown_ticks: 3,
            mode: CaptureMode::Automatic,
        }
    }
}

/// Output encoding and PDF layout settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct OutputConfig {
    /// JPEG quality for cropped document output (1-100).
    pub jpeg_quality: u8,
    /// JPEG quality for the full-frame fallback capture (1-100).
    pub full_frame_quality: u8,
    /// Paper size for PDF composition.
    pub paper_size: PaperSize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jpeg_quality: 95,
            full_frame_quality: 90,
            paper_size: PaperSize::A4,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub detection: DetectionConfig,
    pub capture: CaptureConfig,
    pub output: OutputConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_calibration() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.detection.contrast.step_px, 20);
        assert_eq!(cfg.detection.edge_scan.step_px, 5);
        assert_eq!(cfg.detection.edge_scan.padding_px, 30);
        assert_eq!(cfg.detection.text_geometry.min_lines, 3);
        assert_eq!(cfg.capture.countdown_ticks, 3);
        assert!(cfg.detection.edge_scan.min_area_ratio < cfg.detection.edge_scan.max_area_ratio);
    }

    #[test]
    fn config_round_trips_through_json() {
        let cfg = AppConfig::default();
        let json = serde_json::to_string(&cfg).expect("serialize");
        let back: AppConfig = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.detection.contrast.threshold, cfg.detection.contrast.threshold);
        assert_eq!(back.capture.countdown_ticks, cfg.capture.countdown_ticks);
    }
}
