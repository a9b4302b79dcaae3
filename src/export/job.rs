//! Sequential export of the collection to a GitHub repository.
//!
//! The job walks a snapshot of the collection in display order, one upload
//! at a time. Sequential execution bounds rate-limit exposure and keeps
//! the progress log monotonic. A cancellation flag is honored between
//! items, never mid-upload; files already pushed stay pushed.
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use tokio::sync::RwLock;

use crate::error::{AppError, AppResult};
use crate::gallery::entry::ImageEntry;
use crate::github::client::GitHubClient;
use crate::utils::naming::export_file_name;

/// Visible log lines kept, most recent first.
const LOG_CAP: usize = 5;

/// Where an export goes. The token lives only as long as this value.
#[derive(Debug, Clone)]
pub struct ExportTarget {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub folder: String,
}

impl ExportTarget {
    /// Build a target from form-style inputs, rejecting them before any
    /// network call is made.
    pub fn from_form(token: &str, repo: &str, folder: &str) -> AppResult<Self> {
        if token.trim().is_empty() {
            return Err(AppError::Validation(
                "Personal Access Token is required.".to_string(),
            ));
        }
        let mut parts = repo.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty() => {
                Ok(ExportTarget {
                    token: token.to_string(),
                    owner: owner.to_string(),
                    repo: name.to_string(),
                    folder: folder.to_string(),
                })
            }
            _ => Err(AppError::Validation(
                "Repository must be in 'username/repo' format.".to_string(),
            )),
        }
    }
}

/// Progress snapshot served to the UI while a job runs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportStatus {
    pub running: bool,
    pub done: bool,
    pub cancelled: bool,
    pub progress: u8,
    pub total: usize,
    pub uploaded: usize,
    pub failed: usize,
    pub logs: Vec<String>,
}

/// Shared handle between the running job and its observers. The cancel
/// flag is atomic so it can be set without awaiting the status lock.
#[derive(Default)]
pub struct ExportHandle {
    status: RwLock<ExportStatus>,
    cancel: AtomicBool,
}

impl ExportHandle {
    pub fn new() -> Self {
        ExportHandle::default()
    }

    /// Claim the handle for a new run. Returns `false` while a previous
    /// run is still going.
    pub async fn begin(&self, total: usize) -> bool {
        let mut status = self.status.write().await;
        if status.running {
            return false;
        }
        *status = ExportStatus {
            running: true,
            total,
            ..ExportStatus::default()
        };
        self.cancel.store(false, Ordering::SeqCst);
        true
    }

    /// Request cancellation; the job notices between items.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> ExportStatus {
        self.status.read().await.clone()
    }

    async fn log(&self, line: String) {
        let mut status = self.status.write().await;
        status.logs.insert(0, line);
        status.logs.truncate(LOG_CAP);
    }

    async fn item_done(&self, success: bool, progress: u8) {
        let mut status = self.status.write().await;
        if success {
            status.uploaded += 1;
        } else {
            status.failed += 1;
        }
        status.progress = progress;
    }

    async fn finish(&self, cancelled: bool) -> (usize, usize) {
        let mut status = self.status.write().await;
        status.running = false;
        status.done = true;
        status.cancelled = cancelled;
        (status.uploaded, status.failed)
    }
}

/// Outcome of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub uploaded: usize,
    pub failed: usize,
    pub cancelled: bool,
}

/// Run the export over a snapshot of entries, in their display order.
///
/// Per-item failures are counted and logged; they never abort the rest of
/// the batch. The caller must have claimed `handle` via [`ExportHandle::begin`].
pub async fn run_export(
    client: GitHubClient,
    handle: &ExportHandle,
    target: ExportTarget,
    entries: Vec<ImageEntry>,
) -> ExportReport {
    let total = entries.len();
    let mut cancelled = false;

    for (i, entry) in entries.iter().enumerate() {
        if handle.is_cancelled() {
            cancelled = true;
            handle
                .log(format!("Cancelled after {} of {} images.", i, total))
                .await;
            break;
        }

        handle
            .log(format!("Processing {}/{}: {}...", i + 1, total, entry.title))
            .await;

        let ok = match upload_entry(&client, &target, entry).await {
            Ok(file_name) => {
                tracing::info!("Uploaded {} as {}", entry.title, file_name);
                true
            }
            Err(e) => {
                tracing::error!("Export of '{}' failed: {}", entry.title, e);
                handle.log(format!("Failed: {} - {}", entry.title, e)).await;
                false
            }
        };

        let progress = (((i + 1) as f64 / total as f64) * 100.0).round() as u8;
        handle.item_done(ok, progress).await;
    }

    let (uploaded, failed) = handle.finish(cancelled).await;
    if !cancelled {
        handle
            .log(format!("DONE! Uploaded: {}, Failed: {}", uploaded, failed))
            .await;
    }
    ExportReport { uploaded, failed, cancelled }
}

/// Resolve an entry's payload (resident or fetched), derive the destination
/// filename, and PUT it.
async fn upload_entry(
    client: &GitHubClient,
    target: &ExportTarget,
    entry: &ImageEntry,
) -> AppResult<String> {
    let content = match &entry.base64_data {
        Some(data) => data.clone(),
        None => client.fetch_as_base64(&entry.url).await?,
    };

    let file_name = export_file_name(&entry.title, &entry.id, entry.mime_type.as_deref());
    client
        .upload_file(
            &target.token,
            &target.owner,
            &target.repo,
            &target.folder,
            &file_name,
            &content,
        )
        .await?;
    Ok(file_name)
}
