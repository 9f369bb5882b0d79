//! Share-mode computation for locked handles.
//!
//! A `ShareMode` is the set of access types *other* processes are still allowed
//! while we hold a handle on the file. The values match the Win32
//! `FILE_SHARE_*` flags so they can be passed straight into the open call.

/// Other processes may open the file for reading.
pub const SHARE_READ: u32 = 0x0000_0001;
/// Other processes may open the file for writing.
pub const SHARE_WRITE: u32 = 0x0000_0002;
/// Other processes may delete or rename the file.
pub const SHARE_DELETE: u32 = 0x0000_0004;

/// Set of access types permitted to other processes while a lock is held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShareMode(u32);

impl ShareMode {
    /// Share nothing: other processes can neither read, write nor delete.
    pub const NONE: ShareMode = ShareMode(0);
    /// Share everything: read, write and delete all remain permitted.
    pub const ALL: ShareMode = ShareMode(SHARE_READ | SHARE_WRITE | SHARE_DELETE);

    /// Builds the permitted set from the three deny flags.
    ///
    /// A checked "deny" checkbox means that access type is withheld from other
    /// processes, so a flag is included here only when its deny flag is false.
    pub fn from_deny(deny_read: bool, deny_write: bool, deny_delete: bool) -> Self {
        let mut bits = 0;
        if !deny_read {
            bits |= SHARE_READ;
        }
        if !deny_write {
            bits |= SHARE_WRITE;
        }
        if !deny_delete {
            bits |= SHARE_DELETE;
        }
        ShareMode(bits)
    }

    /// Raw `FILE_SHARE_*` bits for the open call.
    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn permits_read(self) -> bool {
        self.0 & SHARE_READ != 0
    }

    pub fn permits_write(self) -> bool {
        self.0 & SHARE_WRITE != 0
    }

    pub fn permits_delete(self) -> bool {
        self.0 & SHARE_DELETE != 0
    }
}

impl Default for ShareMode {
    /// Deny all: the lock default.
    fn default() -> Self {
        ShareMode::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deny_all_shares_nothing() {
        let mode = ShareMode::from_deny(true, true, true);
        assert_eq!(mode, ShareMode::NONE);
        assert_eq!(mode.bits(), 0);
    }

    #[test]
    fn deny_none_shares_everything() {
        let mode = ShareMode::from_deny(false, false, false);
        assert_eq!(mode, ShareMode::ALL);
        assert!(mode.permits_read());
        assert!(mode.permits_write());
        assert!(mode.permits_delete());
    }

    #[test]
    fn deny_flags_map_to_complement() {
        let mode = ShareMode::from_deny(true, false, true);
        assert!(!mode.permits_read());
        assert!(mode.permits_write());
        assert!(!mode.permits_delete());
        assert_eq!(mode.bits(), SHARE_WRITE);
    }

    #[test]
    fn default_is_deny_all() {
        assert_eq!(ShareMode::default(), ShareMode::NONE);
    }
}
