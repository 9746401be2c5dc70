// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for DocuScan.
//
// A failed detection is NOT an error — estimators return `Option` and `None`
// means "no document found this cycle". The variants here cover genuine
// faults: collaborator failures, codec errors, and persistence problems.

use thiserror::Error;

/// Top-level error type for all DocuScan operations.
#[derive(Debug, Error)]
pub enum DocuscanError {
    // -- Capture errors --
    #[error("frame feed unavailable: {0}")]
    FrameFeed(String),

    // -- Detection collaborators --
    #[error("OCR text detection failed: {0}")]
    Ocr(String),

    // -- Image / document errors --
    #[error("image processing failed: {0}")]
    Image(String),

    #[error("PDF composition failed: {0}")]
    Pdf(String),

    // -- Storage / persistence --
    #[error("upload failed: {0}")]
    Upload(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DocuscanError>;
