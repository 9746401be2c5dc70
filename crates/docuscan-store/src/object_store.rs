// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Object storage backends for archived artifacts.
//
// The archiver only needs "write these bytes under this key, give me back a
// URL", so the seam is a single-method trait. The filesystem backend is the
// default; a remote backend (S3, or any HTTP upload service) slots in behind
// the same trait.

use std::future::Future;
use std::path::{Path, PathBuf};

use tracing::{debug, instrument};

use docuscan_core::error::{DocuscanError, Result};

/// Write-only storage for archived artifacts.
pub trait ObjectStorage {
    /// Store `bytes` under `key`, returning a URL the artifact can be
    /// retrieved from later.
    fn put(&self, key: &str, bytes: &[u8]) -> impl Future<Output = Result<String>> + Send;
}

/// Filesystem-backed [`ObjectStorage`] rooted at a directory.
///
/// Keys map to paths under the root; returned URLs use the `file://` scheme.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Create a backend rooted at `root`. The directory is created lazily on
    /// the first `put`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory artifacts are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ObjectStorage for FsStorage {
    #[instrument(skip(self, bytes), fields(key, bytes_len = bytes.len()))]
    async fn put(&self, key: &str, bytes: &[u8]) -> Result<String> {
        let path = self.root.join(key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|err| {
                DocuscanError::Upload(format!(
                    "failed to create {}: {}",
                    parent.display(),
                    err
                ))
            })?;
        }

        tokio::fs::write(&path, bytes).await.map_err(|err| {
            DocuscanError::Upload(format!("failed to write {}: {}", path.display(), err))
        })?;

        debug!(path = %path.display(), "artifact stored");
        Ok(format!("file://{}", path.display()))
    }
}
