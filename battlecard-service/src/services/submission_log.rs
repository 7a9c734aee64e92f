//! Append-only CSV record of every accepted submission.
//!
//! Writes are best-effort: [`SubmissionLog::append`] never fails from the
//! caller's point of view. There is no locking between concurrent requests.
//! Each record goes out in a single append write. The header is written to a
//! staging file first and hard-linked into place, so the log never exists
//! without its header row.

use crate::models::submission::{Submission, CSV_HEADER};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SubmissionLogError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to create {path}: {source}")]
    CreateFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to append to {path}: {source}")]
    Append {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Sink for submissions. Implementations swallow their own failures.
#[async_trait]
pub trait SubmissionLog: Send + Sync {
    async fn append(&self, submission: &Submission);
}

/// [`SubmissionLog`] backed by a CSV file on local disk.
pub struct CsvSubmissionLog {
    dir: PathBuf,
    path: PathBuf,
}

impl CsvSubmissionLog {
    pub fn new(dir: impl Into<PathBuf>, file_name: impl AsRef<Path>) -> Self {
        let dir = dir.into();
        let path = dir.join(file_name);
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one record, creating the directory and header row on first use.
    pub async fn try_append(&self, submission: &Submission) -> Result<(), SubmissionLogError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| SubmissionLogError::CreateDir {
                path: self.dir.clone(),
                source,
            })?;

        self.ensure_header().await?;

        let append_err = |source| SubmissionLogError::Append {
            path: self.path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .await
            .map_err(append_err)?;
        file.write_all(submission.to_csv_record().as_bytes())
            .await
            .map_err(append_err)?;
        file.flush().await.map_err(append_err)?;

        Ok(())
    }

    async fn ensure_header(&self) -> Result<(), SubmissionLogError> {
        if fs::try_exists(&self.path).await.unwrap_or(false) {
            return Ok(());
        }

        let create_err = |source| SubmissionLogError::CreateFile {
            path: self.path.clone(),
            source,
        };

        let staging = self
            .dir
            .join(format!(".submissions-header-{}.tmp", Uuid::new_v4()));
        fs::write(&staging, format!("{}\n", CSV_HEADER))
            .await
            .map_err(create_err)?;

        // hard_link fails with AlreadyExists instead of replacing the target
        let linked = fs::hard_link(&staging, &self.path).await;

        if let Err(e) = fs::remove_file(&staging).await {
            tracing::warn!(path = %staging.display(), error = %e, "Failed to remove staging file");
        }

        match linked {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "Created submission log");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(e) => Err(create_err(e)),
        }
    }
}

#[async_trait]
impl SubmissionLog for CsvSubmissionLog {
    async fn append(&self, submission: &Submission) {
        match self.try_append(submission).await {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Submission recorded"),
            Err(e) => tracing::error!(error = %e, "Failed to record submission"),
        }
    }
}
