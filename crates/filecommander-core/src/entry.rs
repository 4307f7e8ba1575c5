//! Directory listing entry types.

use std::path::PathBuf;
use std::time::SystemTime;

use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, IntoStaticStr};

use crate::classify::{classify, extension_of, format_size};

/// Category of a listing entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EntryType {
    Text,
    Image,
    Audio,
    Video,
    Binary,
    Directory,
    /// Anything without a recognized extension.
    File,
}

impl EntryType {
    /// Check if this is the directory type.
    pub fn is_dir(&self) -> bool {
        matches!(self, EntryType::Directory)
    }
}

/// Icon key the panel UI renders for an entry.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
    IntoStaticStr,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum IconKey {
    Folder,
    FileText,
    FileImage,
    FileAudio,
    FileVideo,
    FileBinary,
    File,
}

impl IconKey {
    /// Icon for an entry type. The mapping depends on nothing but the type.
    pub fn for_type(entry_type: EntryType) -> Self {
        match entry_type {
            EntryType::Text => IconKey::FileText,
            EntryType::Image => IconKey::FileImage,
            EntryType::Audio => IconKey::FileAudio,
            EntryType::Video => IconKey::FileVideo,
            EntryType::Binary => IconKey::FileBinary,
            EntryType::Directory => IconKey::Folder,
            EntryType::File => IconKey::File,
        }
    }
}

/// A single child of a listed directory.
///
/// Entries are snapshots: nothing guarantees the path still exists by the
/// time a caller acts on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// Base name (not full path).
    pub name: CompactString,

    /// Absolute, platform-native path. Unique within one listing.
    pub full_path: PathBuf,

    /// Whether this entry is a directory.
    pub is_directory: bool,

    /// Size in bytes, `None` for directories.
    pub size_bytes: Option<u64>,

    /// Human-readable size, empty for directories.
    pub formatted_size: String,

    /// Last write time.
    pub last_modified: DateTime<Local>,

    /// Category derived from the extension.
    #[serde(rename = "type")]
    pub entry_type: EntryType,

    /// Icon derived from `entry_type`.
    pub icon_key: IconKey,
}

impl FileEntry {
    /// Create a file entry, classifying it by the extension of `name`.
    pub fn new_file(
        name: impl Into<CompactString>,
        full_path: impl Into<PathBuf>,
        size: u64,
        modified: SystemTime,
    ) -> Self {
        let name = name.into();
        let entry_type = classify(extension_of(&name));

        Self {
            full_path: full_path.into(),
            is_directory: false,
            size_bytes: Some(size),
            formatted_size: format_size(i64::try_from(size).unwrap_or(i64::MAX)),
            last_modified: DateTime::<Local>::from(modified),
            entry_type,
            icon_key: IconKey::for_type(entry_type),
            name,
        }
    }

    /// Create a directory entry. Directory sizes are never computed.
    pub fn new_directory(
        name: impl Into<CompactString>,
        full_path: impl Into<PathBuf>,
        modified: SystemTime,
    ) -> Self {
        Self {
            name: name.into(),
            full_path: full_path.into(),
            is_directory: true,
            size_bytes: None,
            formatted_size: String::new(),
            last_modified: DateTime::<Local>::from(modified),
            entry_type: EntryType::Directory,
            icon_key: IconKey::Folder,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_icon_for_every_type() {
        assert_eq!(IconKey::for_type(EntryType::Text), IconKey::FileText);
        assert_eq!(IconKey::for_type(EntryType::Image), IconKey::FileImage);
        assert_eq!(IconKey::for_type(EntryType::Audio), IconKey::FileAudio);
        assert_eq!(IconKey::for_type(EntryType::Video), IconKey::FileVideo);
        assert_eq!(IconKey::for_type(EntryType::Binary), IconKey::FileBinary);
        assert_eq!(IconKey::for_type(EntryType::Directory), IconKey::Folder);
        assert_eq!(IconKey::for_type(EntryType::File), IconKey::File);
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(IconKey::FileText.to_string(), "file-text");
        assert_eq!(IconKey::Folder.as_ref(), "folder");
        assert_eq!(EntryType::Directory.to_string(), "directory");
        assert_eq!(EntryType::from_str("video").unwrap(), EntryType::Video);
        assert_eq!(IconKey::from_str("file-binary").unwrap(), IconKey::FileBinary);
    }

    #[test]
    fn test_file_entry_creation() {
        let entry = FileEntry::new_file("Photo.JPG", "/tmp/Photo.JPG", 2048, SystemTime::now());
        assert!(!entry.is_directory);
        assert_eq!(entry.size_bytes, Some(2048));
        assert_eq!(entry.formatted_size, "2 КБ");
        assert_eq!(entry.entry_type, EntryType::Image);
        assert_eq!(entry.icon_key, IconKey::FileImage);
    }

    #[test]
    fn test_directory_entry_creation() {
        let entry = FileEntry::new_directory("music.mp3", "/tmp/music.mp3", SystemTime::now());
        assert!(entry.is_directory);
        assert!(entry.entry_type.is_dir());
        assert_eq!(entry.size_bytes, None);
        assert!(entry.formatted_size.is_empty());
        assert_eq!(entry.icon_key, IconKey::Folder);
    }
}
