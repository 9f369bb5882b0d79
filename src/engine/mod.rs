//! Core file-lock engine: share modes, single-file lock lifecycle, and
//! batch operations over the collection. Everything here is portable and
//! UI-free; the presentation layer drives it through explicit values and
//! the [`batch::BatchPrompt`] escalation trait.

pub mod batch;
pub mod collection;
pub mod item;
pub mod native;
pub mod share;

use std::error::Error;
use std::fmt;
use std::io;

/// Failure reported by a single lock-engine operation.
///
/// Variants map one-to-one to the error kinds the batch layer escalates:
/// a missing file at construction time, an open refused by the OS, and a
/// close that failed during an explicit release.
#[derive(Debug)]
pub enum LockError {
    /// The path did not resolve to an existing file when the reference was
    /// constructed.
    NotFound { path: String },
    /// The OS refused to open the file with the requested share mode:
    /// held exclusively elsewhere, deleted since it was added, or
    /// insufficient permission.
    Access { path: String, source: io::Error },
    /// Closing the handle failed during an explicit release.
    Release { path: String, source: io::Error },
}

impl LockError {
    /// Path of the file the operation targeted.
    pub fn path(&self) -> &str {
        match self {
            LockError::NotFound { path }
            | LockError::Access { path, .. }
            | LockError::Release { path, .. } => path,
        }
    }

    /// Raw OS error code, where the failure came from the OS.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            LockError::NotFound { .. } => None,
            LockError::Access { source, .. } | LockError::Release { source, .. } => {
                source.raw_os_error()
            }
        }
    }
}

impl fmt::Display for LockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LockError::NotFound { path } => {
                write!(f, "The file '{path}' was not found.")
            }
            LockError::Access { path, source } => {
                write!(f, "Cannot lock '{path}': {source}")
            }
            LockError::Release { path, source } => {
                write!(f, "Cannot release '{path}': {source}")
            }
        }
    }
}

impl Error for LockError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LockError::NotFound { .. } => None,
            LockError::Access { source, .. } | LockError::Release { source, .. } => Some(source),
        }
    }
}
