//! A single file reference and its lock lifecycle.

use std::fs::File;
use std::path::{Path, PathBuf};

use super::native;
use super::share::ShareMode;
use super::LockError;

/// One file on disk and its lock state. Owns at most one open handle at a
/// time; the handle being present is exactly what "locked" means.
#[derive(Debug)]
pub struct FileItem {
    full_path: PathBuf,
    file_name: String,
    directory: String,
    handle: Option<File>,
}

impl FileItem {
    /// Creates a reference to an existing file.
    ///
    /// Fails with [`LockError::NotFound`] when the path does not resolve to a
    /// file right now (directories count as not found, matching the display
    /// list's file-only contract). No handle is opened; locking is always an
    /// explicit, separate step.
    pub fn new(path: &str) -> Result<Self, LockError> {
        let is_file = std::fs::metadata(path)
            .map(|m| m.is_file())
            .unwrap_or(false);
        if !is_file {
            return Err(LockError::NotFound {
                path: path.to_string(),
            });
        }

        let full_path =
            std::path::absolute(path).unwrap_or_else(|_| PathBuf::from(path));
        let file_name = full_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let directory = full_path
            .parent()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(FileItem {
            full_path,
            file_name,
            directory,
            handle: None,
        })
    }

    /// Base name, captured at construction.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Containing directory, captured at construction.
    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    pub fn is_locked(&self) -> bool {
        self.handle.is_some()
    }

    /// Opens a share-restricted handle on the file.
    ///
    /// Already locked is a no-op success: the handle is not reopened and the
    /// share mode stays whatever the first lock used. Otherwise the file is
    /// opened for read access with `share` and the handle retained.
    pub fn lock(&mut self, share: ShareMode) -> Result<(), LockError> {
        if self.handle.is_some() {
            return Ok(());
        }

        let file = native::open_shared(&self.full_path, share).map_err(|source| {
            LockError::Access {
                path: self.full_path.to_string_lossy().into_owned(),
                source,
            }
        })?;
        self.handle = Some(file);
        Ok(())
    }

    /// Explicit, user-facing release. Not locked is a no-op success.
    ///
    /// A close failure is surfaced, but the handle is considered gone either
    /// way: a failed close cannot be retried.
    pub fn release(&mut self) -> Result<(), LockError> {
        match self.handle.take() {
            None => Ok(()),
            Some(file) => native::close_checked(file).map_err(|source| LockError::Release {
                path: self.full_path.to_string_lossy().into_owned(),
                source,
            }),
        }
    }

    /// Best-effort release for cleanup paths. Never signals failure.
    pub fn release_quiet(&mut self) {
        let _ = self.release();
    }
}

impl Drop for FileItem {
    fn drop(&mut self) {
        self.release_quiet();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn fixture(dir: &tempfile::TempDir, name: &str) -> String {
        let path = dir.path().join(name);
        fs::write(&path, b"payload").unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn missing_path_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.txt");
        let err = FileItem::new(&path.to_string_lossy()).unwrap_err();
        assert!(matches!(err, LockError::NotFound { .. }));
        assert_eq!(err.path(), path.to_string_lossy());
    }

    #[test]
    fn directory_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileItem::new(&dir.path().to_string_lossy()).unwrap_err();
        assert!(matches!(err, LockError::NotFound { .. }));
    }

    #[test]
    fn captures_name_and_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "doc.txt");
        let item = FileItem::new(&path).unwrap();
        assert_eq!(item.file_name(), "doc.txt");
        assert!(!item.directory().is_empty());
        assert!(!item.is_locked());
    }

    #[test]
    fn lock_is_idempotent_and_keeps_first_mode() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "a.txt");
        let mut item = FileItem::new(&path).unwrap();

        item.lock(ShareMode::NONE).unwrap();
        assert!(item.is_locked());
        // Second lock with a different mode: success, nothing reopened.
        item.lock(ShareMode::ALL).unwrap();
        assert!(item.is_locked());
    }

    #[test]
    fn release_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "b.txt");
        let mut item = FileItem::new(&path).unwrap();

        item.release().unwrap();
        assert!(!item.is_locked());

        item.lock(ShareMode::NONE).unwrap();
        item.release().unwrap();
        assert!(!item.is_locked());
        item.release().unwrap();
    }

    #[test]
    fn lock_after_delete_reports_access_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "gone.txt");
        let mut item = FileItem::new(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let err = item.lock(ShareMode::NONE).unwrap_err();
        assert!(matches!(err, LockError::Access { .. }));
        assert!(!item.is_locked());
    }

    #[cfg(windows)]
    #[test]
    fn deny_all_blocks_other_readers() {
        let dir = tempfile::tempdir().unwrap();
        let path = fixture(&dir, "guarded.txt");
        let mut item = FileItem::new(&path).unwrap();
        item.lock(ShareMode::NONE).unwrap();

        assert!(fs::File::open(&path).is_err());
        item.release().unwrap();
        assert!(fs::File::open(&path).is_ok());
    }
}
