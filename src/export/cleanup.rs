//! Scheduled sweep of the uploads directory using tokio-cron-scheduler.
//!
//! ```text
//! Scheduler (cleanup-schedule, daily by default)
//!     │
//!     └─► ExportStore::sweep()  → every file in uploads/ deleted
//! ```

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::export::ExportStore;

/// Starts the uploads sweep on `schedule` (six-field cron expression)
pub async fn start_cleanup_scheduler(
    store: Arc<ExportStore>,
    schedule: &str,
) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let sweep_job = Job::new_async(schedule, move |_uuid, _lock| {
        let store = store.clone();
        Box::pin(async move {
            run_sweep(&store).await;
        })
    })?;

    scheduler.add(sweep_job).await?;
    scheduler.start().await?;

    tracing::info!("Uploads sweep scheduled ({})", schedule);
    Ok(scheduler)
}

/// Runs one sweep and logs the outcome
pub async fn run_sweep(store: &ExportStore) {
    tracing::info!("Sweeping {}", store.dir().display());

    match store.sweep().await {
        Ok(removed) => tracing::info!("Sweep complete: {} files deleted", removed),
        Err(e) => tracing::error!("Uploads sweep failed: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_run_sweep_clears_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("data-x-collected.csv"), "url\n").unwrap();
        let store = ExportStore::new(dir.path());

        run_sweep(&store).await;

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_scheduler_rejects_bad_expression() {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(ExportStore::new(dir.path()));
        assert!(start_cleanup_scheduler(store, "not a cron").await.is_err());
    }
}
