//! Async front end that runs the blocking engine off the runtime threads.

use std::io;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use filecommander_core::{FileEntry, FsError};

use crate::copy::copy;
use crate::delete::delete_all;
use crate::drives::list_drives;
use crate::listing::list_entries;
use crate::move_op::move_items;
use crate::operation::FileOperation;
use crate::outcome::OperationComplete;

/// Stateless executor for listings and file operations.
///
/// Every call runs on tokio's blocking pool and holds nothing between calls.
#[derive(Debug, Default, Clone, Copy)]
pub struct OperationExecutor;

impl OperationExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self
    }

    /// List a directory.
    pub async fn list(&self, path: PathBuf) -> Result<Vec<FileEntry>, FsError> {
        run_blocking(move || list_entries(&path)).await
    }

    /// Enumerate fixed and removable drives.
    pub async fn drives(&self) -> Result<Vec<String>, FsError> {
        run_blocking(|| Ok(list_drives())).await
    }

    /// Execute a copy operation.
    pub async fn copy(
        &self,
        sources: Vec<PathBuf>,
        destination: PathBuf,
        cancel: CancellationToken,
    ) -> Result<OperationComplete, FsError> {
        self.execute(FileOperation::copy(sources, destination), cancel)
            .await
    }

    /// Execute a move operation.
    pub async fn move_to(
        &self,
        sources: Vec<PathBuf>,
        destination: PathBuf,
        cancel: CancellationToken,
    ) -> Result<OperationComplete, FsError> {
        self.execute(FileOperation::move_to(sources, destination), cancel)
            .await
    }

    /// Execute a delete operation.
    pub async fn delete(
        &self,
        targets: Vec<PathBuf>,
        cancel: CancellationToken,
    ) -> Result<OperationComplete, FsError> {
        self.execute(FileOperation::delete(targets), cancel).await
    }

    /// Execute any file operation.
    pub async fn execute(
        &self,
        operation: FileOperation,
        cancel: CancellationToken,
    ) -> Result<OperationComplete, FsError> {
        let operation_type = operation.operation_type();
        let count = operation.sources().len();

        let result = run_blocking(move || match operation {
            FileOperation::Copy {
                sources,
                destination,
            } => copy(&sources, &destination, &cancel),
            FileOperation::Move {
                sources,
                destination,
            } => move_items(&sources, &destination, &cancel),
            FileOperation::Delete { targets } => delete_all(&targets, &cancel),
        })
        .await;

        match &result {
            Ok(outcome) => info!(operation = %operation_type, "{}", outcome.summary()),
            Err(e) => warn!(
                operation = %operation_type,
                sources = count,
                kind = %e.kind(),
                failed_source = ?e.failed_source(),
                "{e}"
            ),
        }

        result
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, FsError>
where
    F: FnOnce() -> Result<T, FsError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| FsError::Io {
            path: PathBuf::new(),
            source: io::Error::other(format!("Task failed: {e}")),
        })?
}
