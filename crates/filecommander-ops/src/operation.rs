//! File operation types and the shared batch loop.

use std::fs;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use filecommander_core::FsError;

use crate::outcome::{OperationComplete, OperationType};

/// A file operation to be executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileOperation {
    /// Copy files/directories into a destination directory.
    Copy {
        sources: Vec<PathBuf>,
        destination: PathBuf,
    },
    /// Move files/directories into a destination directory.
    Move {
        sources: Vec<PathBuf>,
        destination: PathBuf,
    },
    /// Delete files/directories.
    Delete { targets: Vec<PathBuf> },
}

impl FileOperation {
    /// Create a copy operation.
    pub fn copy(sources: Vec<PathBuf>, destination: PathBuf) -> Self {
        Self::Copy {
            sources,
            destination,
        }
    }

    /// Create a move operation.
    pub fn move_to(sources: Vec<PathBuf>, destination: PathBuf) -> Self {
        Self::Move {
            sources,
            destination,
        }
    }

    /// Create a delete operation.
    pub fn delete(targets: Vec<PathBuf>) -> Self {
        Self::Delete { targets }
    }

    /// The kind of this operation.
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::Copy { .. } => OperationType::Copy,
            Self::Move { .. } => OperationType::Move,
            Self::Delete { .. } => OperationType::Delete,
        }
    }

    /// The source paths of this operation.
    pub fn sources(&self) -> &[PathBuf] {
        match self {
            Self::Copy { sources, .. } | Self::Move { sources, .. } => sources,
            Self::Delete { targets } => targets,
        }
    }
}

/// What a source path is at the moment it is acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Directory,
    File,
    /// Neither; the item vanished or was never there.
    Missing,
}

impl SourceKind {
    /// Probe a path, following symbolic links. Any probe failure is `Missing`.
    pub fn probe(path: &Path) -> Self {
        match fs::metadata(path) {
            Ok(metadata) if metadata.is_dir() => SourceKind::Directory,
            Ok(_) => SourceKind::File,
            Err(_) => SourceKind::Missing,
        }
    }
}

/// True if the path is empty or only whitespace.
pub(crate) fn is_blank(path: &Path) -> bool {
    path.as_os_str().to_string_lossy().trim().is_empty()
}

/// Absolute form of `path` with `.` and `..` folded away lexically.
///
/// Links are not resolved, so `link/..` is the directory holding `link`.
pub(crate) fn absolute_normalized(path: &Path) -> Result<PathBuf, FsError> {
    let absolute = std::path::absolute(path).map_err(|e| FsError::io(path, e))?;

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    Ok(normalized)
}

/// Check a copy/move destination and return its absolute form.
pub(crate) fn validate_destination(destination: &Path) -> Result<PathBuf, FsError> {
    if is_blank(destination) {
        return Err(FsError::invalid("Destination is required"));
    }

    let absolute = absolute_normalized(destination)?;
    if !absolute.is_dir() {
        return Err(FsError::NotFound { path: absolute });
    }

    Ok(absolute)
}

/// `<destination>/<base name of source>`.
pub(crate) fn target_path(source: &Path, destination: &Path) -> Result<PathBuf, FsError> {
    let name = source.file_name().ok_or_else(|| {
        FsError::invalid(format!("Source has no file name: {}", source.display()))
    })?;
    Ok(destination.join(name))
}

/// Reject a destination inside the source directory's own subtree.
pub(crate) fn ensure_not_within(source: &Path, destination: &Path) -> Result<(), FsError> {
    let source_real = source.canonicalize().map_err(|e| FsError::io(source, e))?;
    let destination_real = destination
        .canonicalize()
        .map_err(|e| FsError::io(destination, e))?;

    if destination_real.starts_with(&source_real) {
        return Err(FsError::invalid(format!(
            "Cannot place {} inside itself",
            source.display()
        )));
    }
    Ok(())
}

/// Run `action` for each source in order.
///
/// Cancellation is checked before each source. Missing sources are counted
/// as skipped. The first error stops the loop and names the failing source.
pub(crate) fn run_batch<F>(
    operation_type: OperationType,
    sources: &[PathBuf],
    cancel: &CancellationToken,
    mut action: F,
) -> Result<OperationComplete, FsError>
where
    F: FnMut(&Path, SourceKind) -> Result<(), FsError>,
{
    let mut outcome = OperationComplete::new(operation_type);

    for source in sources {
        if cancel.is_cancelled() {
            debug!(
                operation = %operation_type,
                completed = outcome.total(),
                "cancelled before {}",
                source.display()
            );
            return Err(FsError::Cancelled);
        }

        let kind = SourceKind::probe(source);
        if kind == SourceKind::Missing {
            debug!(operation = %operation_type, "skipping missing {}", source.display());
            outcome.skipped += 1;
            continue;
        }

        debug!(operation = %operation_type, ?kind, "processing {}", source.display());
        action(source, kind).map_err(|e| e.for_source(source))?;
        outcome.succeeded += 1;
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe() {
        let temp = tempfile::TempDir::new().unwrap();
        let file = temp.path().join("a.txt");
        fs::write(&file, "a").unwrap();

        assert_eq!(SourceKind::probe(temp.path()), SourceKind::Directory);
        assert_eq!(SourceKind::probe(&file), SourceKind::File);
        assert_eq!(SourceKind::probe(&temp.path().join("nope")), SourceKind::Missing);
        assert_eq!(SourceKind::probe(Path::new("")), SourceKind::Missing);
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_normalized() {
        let path = absolute_normalized(Path::new("/a/b/../c/./d")).unwrap();
        assert_eq!(path, PathBuf::from("/a/c/d"));

        let path = absolute_normalized(Path::new("/../x")).unwrap();
        assert_eq!(path, PathBuf::from("/x"));

        let path = absolute_normalized(Path::new("rel/..")).unwrap();
        assert_eq!(path, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_target_path() {
        let target = target_path(Path::new("/src/photos/"), Path::new("/dest")).unwrap();
        assert_eq!(target, PathBuf::from("/dest/photos"));

        assert!(target_path(Path::new("/"), Path::new("/dest")).is_err());
        assert!(target_path(Path::new(".."), Path::new("/dest")).is_err());
    }

    #[test]
    fn test_validate_destination() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(validate_destination(temp.path()).is_ok());
        assert!(matches!(
            validate_destination(Path::new("  ")),
            Err(FsError::InvalidArgument { .. })
        ));
        assert!(matches!(
            validate_destination(&temp.path().join("missing")),
            Err(FsError::NotFound { .. })
        ));
    }

    #[test]
    fn test_ensure_not_within() {
        let temp = tempfile::TempDir::new().unwrap();
        let outer = temp.path().join("outer");
        let inner = outer.join("inner");
        fs::create_dir_all(&inner).unwrap();

        assert!(ensure_not_within(&outer, &inner).is_err());
        assert!(ensure_not_within(&outer, &outer).is_err());
        assert!(ensure_not_within(&inner, temp.path()).is_ok());
    }

    #[test]
    fn test_cancel_between_sources() {
        let temp = tempfile::TempDir::new().unwrap();
        let dest = temp.path().join("dest");
        fs::create_dir(&dest).unwrap();

        let sources: Vec<PathBuf> = (1..=3)
            .map(|i| {
                let path = temp.path().join(format!("{i}.txt"));
                fs::write(&path, i.to_string()).unwrap();
                path
            })
            .collect();

        // Cancel while the first source is being handled.
        let cancel = CancellationToken::new();
        let result = run_batch(OperationType::Copy, &sources, &cancel, |source, _| {
            crate::copy::copy_file(source, &target_path(source, &dest)?)?;
            cancel.cancel();
            Ok(())
        });

        assert!(matches!(result, Err(FsError::Cancelled)));
        assert!(dest.join("1.txt").exists());
        assert!(!dest.join("2.txt").exists());
        assert!(!dest.join("3.txt").exists());
    }

    #[test]
    fn test_missing_sources_are_skipped() {
        let temp = tempfile::TempDir::new().unwrap();
        let present = temp.path().join("here.txt");
        fs::write(&present, "x").unwrap();
        let sources = vec![temp.path().join("gone.txt"), present];

        let mut seen = Vec::new();
        let outcome = run_batch(
            OperationType::Delete,
            &sources,
            &CancellationToken::new(),
            |source, kind| {
                seen.push((source.to_path_buf(), kind));
                Ok(())
            },
        )
        .unwrap();

        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(seen, vec![(sources[1].clone(), SourceKind::File)]);
    }

    #[test]
    fn test_failure_names_source_and_stops() {
        let sources = vec![PathBuf::from("."), PathBuf::from("..")];
        let mut calls = 0;
        let err = run_batch(
            OperationType::Move,
            &sources,
            &CancellationToken::new(),
            |_, _| {
                calls += 1;
                Err(FsError::invalid("boom"))
            },
        )
        .unwrap_err();

        assert_eq!(calls, 1);
        assert_eq!(err.failed_source(), Some(Path::new(".")));
    }

    #[test]
    fn test_file_operation_accessors() {
        let op = FileOperation::delete(vec![PathBuf::from("/a"), PathBuf::from("/b")]);
        assert_eq!(op.operation_type(), OperationType::Delete);
        assert_eq!(op.sources().len(), 2);
    }
}
