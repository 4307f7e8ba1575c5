//! One-level directory reads shared by listing and recursive copy.

use std::ffi::OsString;
use std::fs::{self, Metadata};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use filecommander_core::FsError;

/// An immediate child of a directory.
#[derive(Debug)]
pub(crate) struct DirChild {
    pub name: OsString,
    pub path: PathBuf,
    /// Metadata of the link target, or of the link itself when dangling.
    pub metadata: Metadata,
}

/// Immediate children of a directory, split into directories and files,
/// each sorted by name.
#[derive(Debug, Default)]
pub(crate) struct DirChildren {
    pub dirs: Vec<DirChild>,
    pub files: Vec<DirChild>,
}

impl DirChildren {
    /// Read the children of `dir`.
    ///
    /// Children that disappear between the directory read and their stat
    /// are left out.
    pub fn read(dir: &Path) -> Result<Self, FsError> {
        let mut children = DirChildren::default();

        let entries = fs::read_dir(dir).map_err(|e| FsError::io(dir, e))?;
        for entry in entries {
            let entry = entry.map_err(|e| FsError::io(dir, e))?;
            let path = entry.path();

            let Some(metadata) = stat(&path)? else {
                debug!("entry vanished during read: {}", path.display());
                continue;
            };

            let child = DirChild {
                name: entry.file_name(),
                path,
                metadata,
            };
            if child.metadata.is_dir() {
                children.dirs.push(child);
            } else {
                children.files.push(child);
            }
        }

        children.dirs.sort_by(|a, b| a.name.cmp(&b.name));
        children.files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(children)
    }
}

/// Follow links; fall back to the link itself when its target is gone.
/// `None` means the path itself no longer exists.
fn stat(path: &Path) -> Result<Option<Metadata>, FsError> {
    match fs::metadata(path) {
        Ok(metadata) => Ok(Some(metadata)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => match fs::symlink_metadata(path) {
            Ok(metadata) => Ok(Some(metadata)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FsError::io(path, e)),
        },
        Err(e) => Err(FsError::io(path, e)),
    }
}
