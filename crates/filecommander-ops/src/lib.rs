//! File operations engine for filecommander.
//!
//! This crate lists directories and runs bulk copy, move and delete
//! operations. The engine functions are blocking and stateless; the
//! [`OperationExecutor`] runs them on tokio's blocking pool.
//!
//! Batches are processed one source at a time, in input order. A
//! [`CancellationToken`] is checked before each source, and the first
//! failure stops the batch without rolling back earlier sources.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::PathBuf;
//!
//! use filecommander_ops::{copy, list_entries, CancellationToken};
//!
//! let cancel = CancellationToken::new();
//! let sources = vec![PathBuf::from("/home/user/report.md")];
//! let outcome = copy(&sources, "/mnt/backup".as_ref(), &cancel).unwrap();
//! println!("{}", outcome.summary());
//!
//! for entry in list_entries("/mnt/backup").unwrap() {
//!     println!("{} {}", entry.name, entry.formatted_size);
//! }
//! ```

mod copy;
mod delete;
mod drives;
mod executor;
mod listing;
mod move_op;
mod operation;
mod outcome;
mod walk;

pub use copy::copy;
pub use delete::delete_all;
pub use drives::{is_local_media, list_drives};
pub use executor::OperationExecutor;
pub use listing::list_entries;
pub use move_op::move_items;
pub use operation::{FileOperation, SourceKind};
pub use outcome::{OperationComplete, OperationType};

// Re-export types callers need alongside the engine
pub use filecommander_core::{EntryType, ErrorKind, FileEntry, FsError, IconKey};
pub use tokio_util::sync::CancellationToken;
