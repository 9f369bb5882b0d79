//! Low-level open/close primitives behind the lock.
//!
//! On Windows the share mode is passed straight through to `CreateFileW` via
//! `OpenOptions::share_mode`, which is what makes the lock mandatory: the
//! kernel refuses incompatible opens from other processes while the handle
//! lives. On other platforms the open is a plain read handle (no mandatory
//! share semantics exist there), which keeps the engine buildable and testable
//! everywhere.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

use super::share::ShareMode;

/// Opens `path` for read access with the given share permissions.
#[cfg(windows)]
pub fn open_shared(path: &Path, share: ShareMode) -> io::Result<File> {
    use std::os::windows::fs::OpenOptionsExt;

    OpenOptions::new()
        .read(true)
        .share_mode(share.bits())
        .open(path)
}

#[cfg(not(windows))]
pub fn open_shared(path: &Path, _share: ShareMode) -> io::Result<File> {
    OpenOptions::new().read(true).open(path)
}

/// Closes a handle and reports the failure, unlike a plain drop which
/// swallows it. Used by the explicit, user-facing release path.
#[cfg(windows)]
pub fn close_checked(file: File) -> io::Result<()> {
    use std::os::windows::io::IntoRawHandle;
    use windows_sys::Win32::Foundation::{CloseHandle, HANDLE};

    let handle = file.into_raw_handle();
    // CloseHandle returns BOOL; 0 means failure.
    if unsafe { CloseHandle(handle as HANDLE) } == 0 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

#[cfg(not(windows))]
pub fn close_checked(file: File) -> io::Result<()> {
    drop(file);
    Ok(())
}
