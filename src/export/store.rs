//! Persisted export files
//!
//! Files live in a single uploads directory as `data-<fileId>-collected.csv`.
//! File ids are random UUIDs; writers to the same id are serialized with a
//! per-id async mutex so appends never interleave.

use crate::export::format::format_rows;
use crate::report::CrawlReport;
use crate::{ExportError, ExportResult};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Outcome of a write to an export file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// True when the file did not exist before this write
    pub created: bool,

    /// Data rows written (header excluded)
    pub rows: usize,
}

/// Directory-backed store of export files
#[derive(Debug)]
pub struct ExportStore {
    dir: PathBuf,
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl ExportStore {
    /// Creates a store rooted at `dir` (created lazily on first write)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The uploads directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Generates a fresh opaque file id
    pub fn new_file_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Validates a caller-supplied file id and returns its canonical form
    ///
    /// Only UUIDs are accepted, which also keeps ids from escaping the
    /// uploads directory.
    pub fn parse_file_id(raw: &str) -> ExportResult<String> {
        Uuid::parse_str(raw.trim())
            .map(|id| id.to_string())
            .map_err(|_| ExportError::InvalidFileId(raw.to_string()))
    }

    /// File name for an id
    pub fn file_name(file_id: &str) -> String {
        format!("data-{}-collected.csv", file_id)
    }

    /// Full path for an id
    pub fn path_for(&self, file_id: &str) -> PathBuf {
        self.dir.join(Self::file_name(file_id))
    }

    fn lock_for(&self, file_id: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        locks.entry(file_id.to_string()).or_default().clone()
    }

    /// Gives back a lock taken with [`Self::lock_for`]
    ///
    /// The entry is removed once no other caller holds or waits on it.
    fn release_lock(&self, file_id: &str, lock: Arc<tokio::sync::Mutex<()>>) {
        drop(lock);

        let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
        if locks
            .get(file_id)
            .is_some_and(|held| Arc::strong_count(held) == 1)
        {
            locks.remove(file_id);
        }
    }

    /// Writes `reports` to the file for `file_id`, creating it if absent
    ///
    /// A newly created file starts with the header row; an existing file
    /// only receives data rows. A missing file is not an error; any other
    /// I/O failure aborts this write.
    pub async fn append_reports(
        &self,
        file_id: &str,
        reports: &[CrawlReport],
    ) -> ExportResult<WriteOutcome> {
        let lock = self.lock_for(file_id);
        let outcome = {
            let _guard = lock.lock().await;
            self.write_reports(file_id, reports).await
        };
        self.release_lock(file_id, lock);
        outcome
    }

    async fn write_reports(
        &self,
        file_id: &str,
        reports: &[CrawlReport],
    ) -> ExportResult<WriteOutcome> {
        fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(file_id);

        let (mut file, created) = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => (file, true),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                let file = OpenOptions::new().append(true).open(&path).await?;
                (file, false)
            }
            Err(e) => return Err(e.into()),
        };

        let bytes = format_rows(reports, created)?;
        file.write_all(&bytes).await?;
        file.flush().await?;

        let rows = reports.iter().map(CrawlReport::row_count).sum();
        tracing::info!(
            "{} {} with {} rows",
            if created { "Created" } else { "Appended to" },
            path.display(),
            rows
        );

        Ok(WriteOutcome { created, rows })
    }

    /// Reads the whole export file for `file_id`
    pub async fn read(&self, file_id: &str) -> ExportResult<Vec<u8>> {
        let lock = self.lock_for(file_id);
        let result = {
            let _guard = lock.lock().await;
            fs::read(self.path_for(file_id)).await
        };
        self.release_lock(file_id, lock);

        match result {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(ExportError::NotFound(file_id.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes every file in the uploads directory
    ///
    /// Individual failures are logged and skipped. A missing directory counts
    /// as already clean. Returns the number of files removed.
    pub async fn sweep(&self) -> ExportResult<usize> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            match entry.file_type().await {
                Ok(kind) if kind.is_file() => {}
                _ => continue,
            }

            match fs::remove_file(&path).await {
                Ok(()) => {
                    tracing::debug!("Deleted {}", path.display());
                    removed += 1;
                }
                Err(e) => tracing::error!("Failed to delete {}: {}", path.display(), e),
            }
        }

        // drop locks left behind by cancelled requests
        self.locks
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .retain(|_, lock| Arc::strong_count(lock) > 1);

        Ok(removed)
    }
}
