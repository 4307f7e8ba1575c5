//! Error types for listing and file operations.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::Display;
use thiserror::Error;

/// Errors that can occur while listing or operating on files.
#[derive(Debug, Error)]
pub enum FsError {
    /// Malformed caller input.
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Referenced path does not exist.
    #[error("Path not found: {path}")]
    NotFound { path: PathBuf },

    /// The target of a no-overwrite copy or move already exists.
    #[error("Already exists: {path}")]
    AlreadyExists { path: PathBuf },

    /// Permission denied for a path.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    /// A directory move would cross storage volumes.
    #[error("Cannot move {source_path} to {destination}: different volumes")]
    CrossDevice {
        source_path: PathBuf,
        destination: PathBuf,
    },

    /// Operation was cancelled before all sources were processed.
    #[error("Operation cancelled")]
    Cancelled,

    /// Generic I/O error.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Processing one source of a batch failed.
    #[error("Failed on {source_path}: {source}")]
    Item {
        source_path: PathBuf,
        #[source]
        source: Box<FsError>,
    },
}

impl FsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied { path },
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Create an invalid argument error.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Attach the failing batch source to this error.
    pub fn for_source(self, source_path: impl Into<PathBuf>) -> Self {
        match self {
            // Validation and cancellation are not tied to one item.
            Self::Cancelled | Self::Item { .. } => self,
            other => Self::Item {
                source_path: source_path.into(),
                source: Box::new(other),
            },
        }
    }

    /// The error category, looking through [`FsError::Item`].
    ///
    /// `NotFound` is reserved for missing listing and destination
    /// directories; inside an item it reports as `Io`.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::Cancelled => ErrorKind::Cancelled,
            Self::PermissionDenied { .. } | Self::CrossDevice { .. } | Self::Io { .. } => {
                ErrorKind::Io
            }
            // A path vanishing mid-batch is an I/O failure.
            Self::Item { source, .. } => match source.kind() {
                ErrorKind::NotFound => ErrorKind::Io,
                kind => kind,
            },
        }
    }

    /// The batch source that failed, if the error came from one.
    pub fn failed_source(&self) -> Option<&Path> {
        match self {
            Self::Item { source_path, .. } => Some(source_path),
            _ => None,
        }
    }
}

/// Coarse error category surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Cancelled,
    Io,
}
