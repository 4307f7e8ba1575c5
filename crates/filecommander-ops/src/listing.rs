//! Directory listing.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use filecommander_core::{FileEntry, FsError};

use crate::operation::{absolute_normalized, is_blank};
use crate::walk::{DirChild, DirChildren};

/// List the immediate children of a directory.
///
/// Directories come first, then files. Each group is ordered by name,
/// case-insensitively, with the exact name breaking ties.
pub fn list_entries(path: impl AsRef<Path>) -> Result<Vec<FileEntry>, FsError> {
    let path = path.as_ref();
    if is_blank(path) {
        return Err(FsError::invalid("Path is required"));
    }

    let dir = absolute_normalized(path)?;
    if !dir.is_dir() {
        return Err(FsError::NotFound { path: dir });
    }

    let children = DirChildren::read(&dir)?;
    let mut entries: Vec<FileEntry> = children
        .dirs
        .iter()
        .map(directory_entry)
        .chain(children.files.iter().map(file_entry))
        .collect();

    sort_entries(&mut entries);
    Ok(entries)
}

/// Directories first, then case-insensitive name order.
fn sort_entries(entries: &mut [FileEntry]) {
    entries.sort_by_cached_key(|e| (!e.is_directory, e.name.to_lowercase(), e.name.clone()));
}

fn directory_entry(child: &DirChild) -> FileEntry {
    FileEntry::new_directory(
        child.name.to_string_lossy().as_ref(),
        &child.path,
        modified(child),
    )
}

fn file_entry(child: &DirChild) -> FileEntry {
    FileEntry::new_file(
        child.name.to_string_lossy().as_ref(),
        &child.path,
        child.metadata.len(),
        modified(child),
    )
}

fn modified(child: &DirChild) -> SystemTime {
    child.metadata.modified().unwrap_or(UNIX_EPOCH)
}
