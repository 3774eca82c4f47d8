//! On-disk storage for PDF files.
//!
//! Files live under `<root>/pdf/` and are exposed publicly as
//! `/uploads/pdf/<name>`. Names are reserved with `create_new`, so two
//! requests can never write the same path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::config::{PDF_EXTENSION, PDF_SUBDIR, PUBLIC_STORAGE_PREFIX};
use crate::errors::{AppError, AppResult};

const MAX_NAME_ATTEMPTS: u32 = 8;

/// A file written to storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Generated file name, e.g. `report_20240101_1704067200000000000.pdf`
    pub filename: String,
    /// Path the file is served under
    pub public_path: String,
    /// Absolute or root-relative location on disk
    pub disk_path: PathBuf,
    pub size: u64,
}

/// File storage rooted at a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory served at `/uploads`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the PDFs themselves
    pub fn pdf_dir(&self) -> PathBuf {
        self.root.join(PDF_SUBDIR)
    }

    /// Create the storage directories if missing.
    pub async fn init(&self) -> AppResult<()> {
        fs::create_dir_all(self.pdf_dir()).await.map_err(|e| {
            AppError::storage(format!(
                "Cannot create storage directory {}: {}",
                self.pdf_dir().display(),
                e
            ))
        })
    }

    /// Write `bytes` under a fresh `<prefix>_<date>_<nanos>.pdf` name.
    pub async fn store(&self, prefix: &str, bytes: &[u8]) -> AppResult<StoredFile> {
        self.init().await?;

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let filename = unique_name(prefix, Utc::now(), attempt);
            let disk_path = self.pdf_dir().join(&filename);

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&disk_path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(filename = %filename, "Storage name taken, retrying");
                    continue;
                }
                Err(e) => {
                    return Err(AppError::storage(format!(
                        "Cannot create {}: {}",
                        disk_path.display(),
                        e
                    )))
                }
            };

            if let Err(e) = write_all(&mut file, bytes).await {
                drop(file);
                let _ = fs::remove_file(&disk_path).await;
                return Err(AppError::storage(format!(
                    "Cannot write {}: {}",
                    disk_path.display(),
                    e
                )));
            }

            tracing::debug!(filename = %filename, size = bytes.len(), "Stored file");

            return Ok(StoredFile {
                public_path: format!("{}/{}/{}", PUBLIC_STORAGE_PREFIX, PDF_SUBDIR, filename),
                filename,
                disk_path,
                size: bytes.len() as u64,
            });
        }

        Err(AppError::storage(format!(
            "No free file name for prefix '{}' after {} attempts",
            prefix, MAX_NAME_ATTEMPTS
        )))
    }

    /// Best-effort removal of a stored file.
    pub async fn remove(&self, stored: &StoredFile) {
        if let Err(e) = fs::remove_file(&stored.disk_path).await {
            tracing::warn!(
                path = %stored.disk_path.display(),
                "Failed to remove stored file: {}",
                e
            );
        }
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> std::io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await
}

fn unique_name(prefix: &str, now: DateTime<Utc>, attempt: u32) -> String {
    let nanos = now.timestamp_nanos_opt().unwrap_or_default() + i64::from(attempt);
    format!(
        "{}_{}_{}.{}",
        prefix,
        now.format("%Y%m%d"),
        nanos,
        PDF_EXTENSION
    )
}
