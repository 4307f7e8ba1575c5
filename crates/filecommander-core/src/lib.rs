//! Core types and traits for filecommander.
//!
//! This crate provides the data structures shared by the operation engine,
//! the HTTP gateway and the CLI: listing entries, metadata classification,
//! the error taxonomy, and server configuration.

mod classify;
mod config;
mod entry;
mod error;

pub use classify::{classify, extension_of, format_size, SIZE_UNITS};
pub use config::{ConfigError, ServerConfig, ServerConfigBuilder};
pub use entry::{EntryType, FileEntry, IconKey};
pub use error::{ErrorKind, FsError};
