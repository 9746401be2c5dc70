// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SQLite-backed index of archived documents.
//
// The index stores record metadata only, never artifact bytes. The JPEG and
// PDF payloads live in object storage and are referenced by URL.

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use docuscan_core::error::{DocuscanError, Result};
use docuscan_core::types::{DocumentRecord, RecordMetadata};

/// SQLite schema for the documents table.
const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        id TEXT PRIMARY KEY,
        filename TEXT NOT NULL,
        jpg_url TEXT NOT NULL,
        pdf_url TEXT NOT NULL,
        file_size INTEGER NOT NULL,
        created_at TEXT NOT NULL,
        metadata TEXT NOT NULL
    )
"#;

/// Persistent index of archived documents backed by a SQLite database.
///
/// All methods are synchronous because `rusqlite` does not support async
/// natively.  In an async context, wrap calls in `tokio::task::spawn_blocking`.
pub struct DocumentIndex {
    /// The open SQLite connection.
    conn: Connection,
}

impl DocumentIndex {
    /// Open (or create) the index database at the given path.
    ///
    /// Applies WAL journal mode and creates the `documents` table if it does
    /// not exist.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .map_err(|e| DocuscanError::Database(format!("open: {e}")))?;

        // WAL mode survives unclean shutdowns more gracefully and lets a
        // reader browse the archive while a capture is being inserted.
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DocuscanError::Database(format!("WAL pragma: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| DocuscanError::Database(format!("create table: {e}")))?;

        info!("document index opened");
        Ok(Self { conn })
    }

    /// Open an in-memory database (useful for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DocuscanError::Database(format!("open in-memory: {e}")))?;

        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| DocuscanError::Database(format!("create table: {e}")))?;

        debug!("in-memory document index opened");
        Ok(Self { conn })
    }

    /// Insert a new record into the index.
    #[instrument(skip(self, record), fields(record_id = %record.id))]
    pub fn insert(&self, record: &DocumentRecord) -> Result<()> {
        let metadata_json = serde_json::to_string(&record.metadata)
            .map_err(|e| DocuscanError::Database(format!("serialize metadata: {e}")))?;

        self.conn
            .execute(
                "INSERT INTO documents (id, filename, jpg_url, pdf_url, file_size,
                 created_at, metadata)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    record.id.to_string(),
                    record.filename,
                    record.jpg_url,
                    record.pdf_url,
                    record.file_size as i64,
                    record.created_at.to_rfc3339(),
                    metadata_json,
                ],
            )
            .map_err(|e| DocuscanError::Database(format!("insert record: {e}")))?;

        info!(record_id = %record.id, filename = %record.filename, "document recorded");
        Ok(())
    }

    /// Retrieve a single record by its ID.
    ///
    /// Returns `None` if no record exists.
    #[instrument(skip(self), fields(record_id = %id))]
    pub fn get(&self, id: &Uuid) -> Result<Option<DocumentRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, filename, jpg_url, pdf_url, file_size, created_at, metadata
                 FROM documents WHERE id = ?1",
            )
            .map_err(|e| DocuscanError::Database(format!("prepare get: {e}")))?;

        let mut rows = stmt
            .query_map(params![id.to_string()], row_to_record)
            .map_err(|e| DocuscanError::Database(format!("query get: {e}")))?;

        match rows.next() {
            Some(Ok(record)) => Ok(Some(record)),
            Some(Err(e)) => Err(DocuscanError::Database(format!("row parse: {e}"))),
            None => Ok(None),
        }
    }

    /// Retrieve the most recent records, newest first.
    #[instrument(skip(self))]
    pub fn list_recent(&self, limit: usize) -> Result<Vec<DocumentRecord>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, filename, jpg_url, pdf_url, file_size, created_at, metadata
                 FROM documents ORDER BY created_at DESC LIMIT ?1",
            )
            .map_err(|e| DocuscanError::Database(format!("prepare list_recent: {e}")))?;

        let records = stmt
            .query_map(params![limit as i64], row_to_record)
            .map_err(|e| DocuscanError::Database(format!("query list_recent: {e}")))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| DocuscanError::Database(format!("collect rows: {e}")))?;

        debug!(count = records.len(), "recent records retrieved");
        Ok(records)
    }

    /// Total number of archived documents.
    pub fn count(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM documents", [], |row| row.get(0))
            .map_err(|e| DocuscanError::Database(format!("count: {e}")))?;
        Ok(count as u64)
    }
}

/// Convert a database row into a [`DocumentRecord`].
fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<DocumentRecord> {
    let id_str: String = row.get(0)?;
    let filename: String = row.get(1)?;
    let jpg_url: String = row.get(2)?;
    let pdf_url: String = row.get(3)?;
    let file_size: u64 = row.get::<_, i64>(4)? as u64;
    let created_at_str: String = row.get(5)?;
    let metadata_json: String = row.get(6)?;

    // Surface malformed stored values as conversion errors rather than
    // panicking.
    let id = Uuid::parse_str(&id_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    let metadata: RecordMetadata = serde_json::from_str(&metadata_json).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(DocumentRecord {
        id,
        filename,
        jpg_url,
        pdf_url,
        file_size,
        created_at,
        metadata,
    })
}
