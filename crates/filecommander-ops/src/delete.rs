//! Bulk delete.

use std::fs;
use std::path::PathBuf;

use tokio_util::sync::CancellationToken;

use filecommander_core::FsError;

use crate::operation::{run_batch, SourceKind};
use crate::outcome::{OperationComplete, OperationType};

/// Delete each source. Directories are removed with their whole subtree;
/// a link to a directory removes only the link.
pub fn delete_all(
    sources: &[PathBuf],
    cancel: &CancellationToken,
) -> Result<OperationComplete, FsError> {
    run_batch(OperationType::Delete, sources, cancel, |source, kind| match kind {
        SourceKind::Directory => fs::remove_dir_all(source).map_err(|e| FsError::io(source, e)),
        SourceKind::File => fs::remove_file(source).map_err(|e| FsError::io(source, e)),
        SourceKind::Missing => Ok(()),
    })
}
