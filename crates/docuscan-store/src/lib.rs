// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Persistence layer for DocuScan.
//
// Turns a captured frame into its archived artifacts — a JPEG for display, a
// single-page PDF for printing — stores both through an [`ObjectStorage`]
// backend, and records the result in the SQLite-backed [`DocumentIndex`].

pub mod archive;
pub mod encode;
pub mod index;
pub mod object_store;
pub mod pdf;

pub use archive::DocumentArchiver;
pub use encode::encode_jpeg;
pub use index::DocumentIndex;
pub use object_store::{FsStorage, ObjectStorage};
pub use pdf::PdfComposer;
