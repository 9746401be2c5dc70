// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Capture orchestrator — polling, countdown, and auto-capture state machine.
//
// One logical thread of control with cooperative suspension: detection and
// capture are async (the text-geometry strategy calls out to a remote OCR
// collaborator) but at most one such operation is outstanding at a time,
// enforced by the `is_capturing` busy flag. The periodic `run` loop is an
// interval + shutdown-notify select, so no tick can fire after teardown.

use std::sync::Arc;

use image::RgbaImage;
use tokio::sync::Notify;
use tracing::{debug, info, instrument, warn};

use docuscan_core::config::AppConfig;
use docuscan_core::error::Result;
use docuscan_core::types::{BoundsSource, CaptureMode, CaptureState, Detection};
use docuscan_detect::{ContrastGate, EdgeScanEstimator, TextGeometryEstimator, crop_to_bounds};

use crate::traits::{BoundsOverlay, FrameSource, TextDetector};

/// The final product of a capture cycle.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    /// Cropped document image, or the full frame if the fresh detection at
    /// capture time found nothing.
    pub image: RgbaImage,
    /// The detection the crop was based on, if any.
    pub detection: Option<Detection>,
}

/// Drives the detect → countdown → capture lifecycle over a live feed.
///
/// All mutable state lives in this struct (no ambient globals), so the
/// machine is deterministic under test: call [`tick`](Self::tick) directly,
/// or let [`run`](Self::run) drive it from a timer.
pub struct CaptureOrchestrator<F, T, V> {
    frames: F,
    text: T,
    overlay: V,

    gate: ContrastGate,
    edge_scan: EdgeScanEstimator,
    text_geometry: TextGeometryEstimator,

    countdown_ticks: u32,
    detect_interval: std::time::Duration,

    state: CaptureState,
    mode: CaptureMode,
    countdown: u32,
    /// Mutual-exclusion flag: one detection/capture cycle in flight at most.
    is_capturing: bool,
    current: Option<Detection>,
    captured: Option<CapturedFrame>,
}

impl<F, T, V> CaptureOrchestrator<F, T, V>
where
    F: FrameSource,
    T: TextDetector,
    V: BoundsOverlay,
{
    pub fn new(frames: F, text: T, overlay: V, cfg: AppConfig) -> Self {
        Self {
            frames,
            text,
            overlay,
            gate: ContrastGate::new(cfg.detection.contrast),
            edge_scan: EdgeScanEstimator::new(cfg.detection.edge_scan),
            text_geometry: TextGeometryEstimator::new(cfg.detection.text_geometry),
            countdown_ticks: cfg.capture.countdown_ticks,
            detect_interval: cfg.capture.detect_interval,
            state: CaptureState::Idle,
            mode: cfg.capture.mode,
            countdown: 0,
            is_capturing: false,
            current: None,
            captured: None,
        }
    }

    // -- Accessors ------------------------------------------------------------

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    /// Ticks remaining before auto-capture, zero outside a countdown.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// The most recent detection, for the display overlay.
    pub fn current_detection(&self) -> Option<&Detection> {
        self.current.as_ref()
    }

    pub fn captured(&self) -> Option<&CapturedFrame> {
        self.captured.as_ref()
    }

    /// Remove and return the captured frame, e.g. to hand it to an archiver.
    pub fn take_captured(&mut self) -> Option<CapturedFrame> {
        self.captured.take()
    }

    /// Switch between automatic and manual capture.
    pub fn set_mode(&mut self, mode: CaptureMode) {
        self.mode = mode;
    }

    // -- Lifecycle ------------------------------------------------------------

    /// `Idle -> Detecting`: open the feed. A feed-acquisition failure is the
    /// one error surfaced to the caller without a fallback.
    #[instrument(skip_all)]
    pub fn start(&mut self) -> Result<()> {
        if self.state != CaptureState::Idle {
            debug!(state = ?self.state, "feed already active");
            return Ok(());
        }
        self.frames.start()?;
        self.state = CaptureState::Detecting;
        info!("feed started; detecting");
        Ok(())
    }

    /// One timer tick. In `Detecting` (automatic mode) this is a detection
    /// cycle; in `CountingDown` it advances the countdown and fires the
    /// capture at zero; in `Idle` and `Captured` it is a no-op.
    #[instrument(skip_all, fields(state = ?self.state))]
    pub async fn tick(&mut self) -> Result<()> {
        match self.state {
            CaptureState::Detecting => {
                if self.mode != CaptureMode::Automatic
                    || self.is_capturing
                    || self.captured.is_some()
                {
                    return Ok(());
                }
                self.detection_cycle().await
            }
            CaptureState::CountingDown => {
                self.countdown = self.countdown.saturating_sub(1);
                debug!(countdown = self.countdown, "countdown tick");
                if self.countdown == 0 {
                    self.perform_capture().await?;
                }
                Ok(())
            }
            CaptureState::Idle | CaptureState::Captured => Ok(()),
        }
    }

    /// Manual-mode capture: the countdown/auto-trigger path is bypassed and
    /// the user-initiated capture performs the same fresh-detection + crop
    /// step directly.
    #[instrument(skip_all)]
    pub async fn manual_capture(&mut self) -> Result<()> {
        if self.state != CaptureState::Detecting || self.is_capturing {
            debug!(state = ?self.state, busy = self.is_capturing, "manual capture ignored");
            return Ok(());
        }
        self.is_capturing = true;
        let result = self.perform_capture().await;
        self.is_capturing = false;
        result
    }

    /// Discard the captured image and bounds and return to active polling.
    pub fn retake(&mut self) {
        if self.state != CaptureState::Captured {
            return;
        }
        info!("retake; discarding captured frame");
        self.reset_transient();
        self.state = CaptureState::Detecting;
    }

    /// Same transition as [`retake`](Self::retake), after a successful save.
    pub fn scan_another(&mut self) {
        self.retake();
    }

    /// Terminal teardown: stop the feed and return to `Idle`. Any countdown
    /// in progress is abandoned; `run` observes the state change and exits.
    #[instrument(skip_all)]
    pub fn finish(&mut self) {
        info!("finish; stopping feed");
        self.frames.stop();
        self.reset_transient();
        self.state = CaptureState::Idle;
    }

    fn reset_transient(&mut self) {
        self.captured = None;
        self.current = None;
        self.countdown = 0;
        self.is_capturing = false;
    }

    // -- Detection ------------------------------------------------------------

    /// Run the strategy fallback chain on one frame: remote text geometry
    /// first; if the collaborator call fails, degrade to the gated local
    /// edge scan within the same cycle. `None` is a normal outcome.
    async fn detect(&self, frame: &RgbaImage) -> Option<Detection> {
        match self.text.detect_lines(frame).await {
            Ok(lines) => self
                .text_geometry
                .estimate(&lines, frame.width(), frame.height())
                .map(|bounds| Detection {
                    bounds,
                    source: BoundsSource::TextGeometry,
                }),
            Err(err) => {
                debug!(error = %err, "text detector unavailable; falling back to edge scan");
                if self.gate.has_sufficient_contrast(frame) {
                    Some(Detection {
                        bounds: self.edge_scan.estimate(frame),
                        source: BoundsSource::EdgeScan,
                    })
                } else {
                    None
                }
            }
        }
    }

    /// One detection cycle: grab a frame, estimate, publish to the overlay
    /// (regardless of outcome), and on success begin the countdown.
    async fn detection_cycle(&mut self) -> Result<()> {
        let frame = self.frames.frame()?;
        let detection = self.detect(&frame).await;

        self.overlay.show(detection.as_ref());

        if let Some(found) = detection {
            self.current = Some(found);
            if !self.is_capturing {
                self.is_capturing = true;
                self.countdown = self.countdown_ticks;
                self.state = CaptureState::CountingDown;
                info!(
                    countdown = self.countdown,
                    source = %found.source,
                    "document found; counting down"
                );
            }
        } else {
            self.current = None;
        }
        Ok(())
    }

    /// The capture step: re-run detection on a fresh frame, crop on success,
    /// pass the full frame through on `None`. Crop can never hard-fail, so
    /// the user always ends up with some image.
    async fn perform_capture(&mut self) -> Result<()> {
        let frame = self.frames.frame()?;
        let detection = self.detect(&frame).await;

        let image = match detection.as_ref() {
            Some(found) => {
                debug!(source = %found.source, "cropping to fresh bounds");
                crop_to_bounds(&frame, &found.bounds)
            }
            None => {
                warn!("no bounds at capture time; keeping full frame");
                frame
            }
        };

        self.captured = Some(CapturedFrame { image, detection });
        self.state = CaptureState::Captured;
        self.is_capturing = false;
        self.countdown = 0;
        info!("frame captured");
        Ok(())
    }

    // -- Timer loop -----------------------------------------------------------

    /// Drive the machine from a periodic timer until `shutdown` is notified
    /// or the orchestrator returns to `Idle`.
    ///
    /// The select between the interval and the notify guarantees that no
    /// tick fires after the shutdown signal: a pending interval expiry is
    /// simply dropped, so a stale capture cannot fire after teardown.
    pub async fn run(&mut self, shutdown: Arc<Notify>) -> Result<()> {
        let mut interval = tokio::time::interval(self.detect_interval);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    debug!("shutdown notified; stopping capture loop");
                    self.finish();
                    break;
                }
                _ = interval.tick() => {
                    if self.state == CaptureState::Idle {
                        break;
                    }
                    self.tick().await?;
                }
            }
        }
        Ok(())
    }
}
