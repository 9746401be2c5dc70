// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end archival of a captured frame.
//
// One call renders both artifacts, stores them, and records the result:
// JPEG + PDF are uploaded concurrently, then a `DocumentRecord` is inserted
// into the index and returned to the caller.

use chrono::Utc;
use image::RgbaImage;
use tracing::{info, instrument};
use uuid::Uuid;

use docuscan_core::config::OutputConfig;
use docuscan_core::error::Result;
use docuscan_core::types::{DocumentRecord, RecordMetadata};

use crate::encode::encode_jpeg;
use crate::index::DocumentIndex;
use crate::object_store::ObjectStorage;
use crate::pdf::PdfComposer;

/// Archives captured frames through an [`ObjectStorage`] backend.
pub struct DocumentArchiver<S: ObjectStorage> {
    storage: S,
    config: OutputConfig,
}

impl<S: ObjectStorage> DocumentArchiver<S> {
    pub fn new(storage: S, config: OutputConfig) -> Self {
        Self { storage, config }
    }

    /// Archive a captured frame under the given base filename.
    ///
    /// Renders the frame as JPEG and as a single-page PDF, stores both
    /// artifacts as `{filename}.jpg` / `{filename}.pdf`, inserts a record
    /// into `index`, and returns it.
    #[instrument(skip(self, index, frame), fields(filename, width = frame.width(), height = frame.height()))]
    pub async fn archive(
        &self,
        index: &DocumentIndex,
        frame: &RgbaImage,
        filename: &str,
    ) -> Result<DocumentRecord> {
        let jpg_bytes = encode_jpeg(frame, self.config.jpeg_quality)?;

        let mut composer = PdfComposer::from_config(&self.config);
        composer.set_title(filename);
        let pdf_bytes = composer.compose(frame)?;

        let jpg_key = format!("{filename}.jpg");
        let pdf_key = format!("{filename}.pdf");

        // Both artifacts upload concurrently.
        let (jpg_result, pdf_result) = tokio::join!(
            self.storage.put(&jpg_key, &jpg_bytes),
            self.storage.put(&pdf_key, &pdf_bytes),
        );
        let jpg_url = jpg_result?;
        let pdf_url = pdf_result?;

        let width = frame.width();
        let height = frame.height();
        let record = DocumentRecord {
            id: Uuid::new_v4(),
            filename: filename.to_string(),
            jpg_url,
            pdf_url,
            file_size: jpg_bytes.len() as u64,
            created_at: Utc::now(),
            metadata: RecordMetadata {
                image_bytes: jpg_bytes.len() as u64,
                pdf_bytes: pdf_bytes.len() as u64,
                width,
                height,
                aspect_ratio: width as f32 / height as f32,
            },
        };

        index.insert(&record)?;

        info!(
            record_id = %record.id,
            jpg_bytes = record.metadata.image_bytes,
            pdf_bytes = record.metadata.pdf_bytes,
            "capture archived"
        );
        Ok(record)
    }
}
