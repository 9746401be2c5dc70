// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// DocuScan CLI — scan a document photo into archived JPEG + PDF artifacts.
//
// Runs the local half of the detection pipeline on a still image file:
// contrast gate, edge scan, crop, then archival under the output directory.

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use tracing::{info, warn};

use docuscan_core::config::{AppConfig, DetectionConfig};
use docuscan_core::error::{DocuscanError, Result};
use docuscan_detect::{ContrastGate, EdgeScanEstimator, crop_to_bounds};
use docuscan_store::{DocumentArchiver, DocumentIndex, FsStorage};

const USAGE: &str = "usage: docuscan <input-image> [output-dir]";

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let Some(input) = args.next() else {
        eprintln!("{USAGE}");
        return ExitCode::FAILURE;
    };
    let output_dir = args.next().map_or_else(|| PathBuf::from("scans"), PathBuf::from);

    match run(PathBuf::from(input), output_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("docuscan: {err}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn run(input: PathBuf, output_dir: PathBuf) -> Result<()> {
    let config = AppConfig::default();

    info!(input = %input.display(), "loading image");
    let frame = image::open(&input)
        .map_err(|err| {
            DocuscanError::Image(format!("failed to open {}: {}", input.display(), err))
        })?
        .to_rgba8();

    let DetectionConfig {
        contrast,
        edge_scan,
        ..
    } = config.detection;

    let gate = ContrastGate::new(contrast);
    if !gate.has_sufficient_contrast(&frame) {
        warn!("frame contrast is low; boundary estimate may be unreliable");
    }

    let bounds = EdgeScanEstimator::new(edge_scan).estimate(&frame);
    info!(
        width = bounds.width(),
        height = bounds.height(),
        "document bounds estimated"
    );

    let cropped = crop_to_bounds(&frame, &bounds);

    std::fs::create_dir_all(&output_dir)?;
    let index = DocumentIndex::open(output_dir.join("index.db"))?;
    let archiver = DocumentArchiver::new(FsStorage::new(&output_dir), config.output);

    let filename = format!("scan-{}", Utc::now().format("%Y%m%d-%H%M%S"));
    let record = archiver.archive(&index, &cropped, &filename).await?;

    println!("archived {} ({})", record.filename, record.id);
    println!("  jpg: {}", record.jpg_url);
    println!("  pdf: {}", record.pdf_url);
    Ok(())
}
