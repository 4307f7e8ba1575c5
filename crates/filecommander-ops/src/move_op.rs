//! Bulk move.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::debug;

use filecommander_core::FsError;

use crate::copy::copy_file;
use crate::operation::{ensure_not_within, run_batch, target_path, validate_destination, SourceKind};
use crate::outcome::{OperationComplete, OperationType};

/// Move each source into `destination`.
///
/// A directory is moved with a single rename, so it must stay on the same
/// volume; crossing volumes fails with [`FsError::CrossDevice`]. A file that
/// crosses volumes is copied and then removed. Existing targets are never
/// replaced.
pub fn move_items(
    sources: &[PathBuf],
    destination: &Path,
    cancel: &CancellationToken,
) -> Result<OperationComplete, FsError> {
    let destination = validate_destination(destination)?;

    run_batch(OperationType::Move, sources, cancel, |source, kind| {
        let target = target_path(source, &destination)?;
        match kind {
            SourceKind::Directory => {
                ensure_not_within(source, &destination)?;
                move_directory(source, &target)
            }
            SourceKind::File => move_file(source, &target),
            SourceKind::Missing => Ok(()),
        }
    })
}

fn move_directory(source: &Path, target: &Path) -> Result<(), FsError> {
    ensure_vacant(target)?;

    fs::rename(source, target).map_err(|e| {
        if e.kind() == io::ErrorKind::CrossesDevices {
            FsError::CrossDevice {
                source_path: source.to_path_buf(),
                destination: target.to_path_buf(),
            }
        } else {
            FsError::io(source, e)
        }
    })?;

    debug!("moved directory to {}", target.display());
    Ok(())
}

fn move_file(source: &Path, target: &Path) -> Result<(), FsError> {
    ensure_vacant(target)?;

    match fs::rename(source, target) {
        Ok(()) => {
            debug!("moved file to {}", target.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            let bytes = copy_file(source, target)?;
            fs::remove_file(source).map_err(|e| FsError::io(source, e))?;
            debug!(bytes, "moved file across volumes to {}", target.display());
            Ok(())
        }
        Err(e) => Err(FsError::io(source, e)),
    }
}

/// `rename` silently replaces files on some platforms, so check first.
fn ensure_vacant(target: &Path) -> Result<(), FsError> {
    match fs::symlink_metadata(target) {
        Ok(_) => Err(FsError::AlreadyExists {
            path: target.to_path_buf(),
        }),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(FsError::io(target, e)),
    }
}
