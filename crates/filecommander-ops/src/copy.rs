//! Bulk copy with no-overwrite semantics.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use filecommander_core::FsError;

use crate::operation::{ensure_not_within, run_batch, target_path, validate_destination, SourceKind};
use crate::outcome::{OperationComplete, OperationType};
use crate::walk::DirChildren;

/// Copy each source into `destination`.
///
/// Directories are copied recursively into `<destination>/<name>`, which is
/// merged into if it already exists. No file is ever overwritten: an existing
/// target file fails the whole call.
pub fn copy(
    sources: &[PathBuf],
    destination: &Path,
    cancel: &CancellationToken,
) -> Result<OperationComplete, FsError> {
    let destination = validate_destination(destination)?;

    run_batch(OperationType::Copy, sources, cancel, |source, kind| {
        let target = target_path(source, &destination)?;
        match kind {
            SourceKind::Directory => {
                ensure_not_within(source, &destination)?;
                let bytes = copy_dir_recursive(source, &target)?;
                debug!(bytes, "copied directory to {}", target.display());
            }
            SourceKind::File => {
                let bytes = copy_file(source, &target)?;
                debug!(bytes, "copied file to {}", target.display());
            }
            SourceKind::Missing => {}
        }
        Ok(())
    })
}

/// Copy one file without overwriting.
///
/// A target that already exists is left untouched. A target this call
/// created is removed again if writing it fails.
pub(crate) fn copy_file(source: &Path, target: &Path) -> Result<u64, FsError> {
    let mut reader = File::open(source).map_err(|e| FsError::io(source, e))?;
    let permissions = reader
        .metadata()
        .map_err(|e| FsError::io(source, e))?
        .permissions();

    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(target)
        .map_err(|e| FsError::io(target, e))?;

    let written = io::copy(&mut reader, &mut writer).and_then(|bytes| {
        writer.set_permissions(permissions)?;
        Ok(bytes)
    });

    match written {
        Ok(bytes) => Ok(bytes),
        Err(e) => {
            drop(writer);
            let _ = fs::remove_file(target);
            Err(FsError::io(target, e))
        }
    }
}

/// Copy a directory tree: files of each level first, then its subdirectories.
fn copy_dir_recursive(source: &Path, target: &Path) -> Result<u64, FsError> {
    fs::create_dir_all(target).map_err(|e| FsError::io(target, e))?;

    let children = DirChildren::read(source)?;
    let mut total_bytes = 0u64;

    for file in &children.files {
        trace!("copy {}", file.path.display());
        total_bytes += copy_file(&file.path, &target.join(&file.name))?;
    }

    for dir in &children.dirs {
        total_bytes += copy_dir_recursive(&dir.path, &target.join(&dir.name))?;
    }

    Ok(total_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_file_no_overwrite() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("a.txt");
        let target = temp.path().join("b.txt");
        fs::write(&source, "new").unwrap();
        fs::write(&target, "old").unwrap();

        let err = copy_file(&source, &target).unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");
    }

    #[test]
    fn test_copy_file_counts_bytes() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("a.bin");
        fs::write(&source, vec![7u8; 4096]).unwrap();

        let bytes = copy_file(&source, &temp.path().join("b.bin")).unwrap();
        assert_eq!(bytes, 4096);
    }

    #[test]
    fn test_copy_dir_merges_into_existing() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir_all(source.join("nested")).unwrap();
        fs::write(source.join("one.txt"), "1").unwrap();
        fs::write(source.join("nested/two.txt"), "2").unwrap();

        let target = temp.path().join("dst");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("keep.txt"), "k").unwrap();

        let bytes = copy_dir_recursive(&source, &target).unwrap();
        assert_eq!(bytes, 2);
        assert!(target.join("keep.txt").exists());
        assert_eq!(fs::read_to_string(target.join("nested/two.txt")).unwrap(), "2");
    }

    #[test]
    fn test_files_copied_before_subdirectories() {
        let temp = tempfile::TempDir::new().unwrap();
        let source = temp.path().join("src");
        fs::create_dir_all(source.join("a_sub")).unwrap();
        fs::write(source.join("a_sub/inner.txt"), "inner").unwrap();
        fs::write(source.join("z_top.txt"), "top").unwrap();

        // A collision inside the subdirectory fails the copy only after the
        // top-level file has already been copied.
        let target = temp.path().join("dst");
        fs::create_dir_all(target.join("a_sub")).unwrap();
        fs::write(target.join("a_sub/inner.txt"), "existing").unwrap();

        let err = copy_dir_recursive(&source, &target).unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }));
        assert!(target.join("z_top.txt").exists());
        assert_eq!(
            fs::read_to_string(target.join("a_sub/inner.txt")).unwrap(),
            "existing"
        );
    }
}
