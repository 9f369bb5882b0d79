use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::engine::share::ShareMode;
use crate::utils::{fill_wide_field, from_wide};

const CONFIG_MAGIC: u32 = 0x4C4B5253; // "LKRS"
const CONFIG_VERSION: u32 = 1;

// NOTE: We use #[repr(C)] to ensure predictable memory layout for binary dumping.
// WARNING: Changing fields later will invalidate existing config files.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct AppConfig {
    pub magic: u32,
    pub version: u32,
    pub window_width: i32,
    pub window_height: i32,
    pub window_x: i32,
    pub window_y: i32,
    /// Default states for the three deny checkboxes. The checkboxes are
    /// seeded from these at startup; locks always read the live controls.
    pub deny_read: bool,
    pub deny_write: bool,
    pub deny_delete: bool,
    /// Default state for the "lock immediately on add" checkbox.
    pub lock_immediately: bool,
    pub log_enabled: bool,
    pub log_level_mask: u8,
    /// Icon source for locked rows: library path + icon index inside it.
    pub icon_index: i32,
    pub icon_library: [u16; 260],
}

impl Default for AppConfig {
    fn default() -> Self {
        let mut icon_library = [0u16; 260];
        fill_wide_field(&mut icon_library, "shell32.dll");
        Self {
            magic: CONFIG_MAGIC,
            version: CONFIG_VERSION,
            window_width: 640,
            window_height: 480,
            window_x: -1, // -1 indicates let Windows decide (CW_USEDEFAULT)
            window_y: -1,
            deny_read: true,
            deny_write: true,
            deny_delete: true,
            lock_immediately: false,
            log_enabled: true,
            log_level_mask: 7, // Error | Warn | Info (1 | 2 | 4)
            icon_index: 47,    // padlock in shell32.dll
            icon_library,
        }
    }
}

impl AppConfig {
    fn get_path() -> PathBuf {
        let mut path = std::env::current_exe().unwrap_or_default();
        path.set_file_name("lockrs.dat");
        path
    }

    pub fn load() -> Self {
        Self::load_from(&Self::get_path())
    }

    pub fn save(&self) {
        self.save_to(&Self::get_path());
    }

    fn load_from(path: &Path) -> Self {
        if let Ok(mut file) = File::open(path) {
            let mut buffer = [0u8; std::mem::size_of::<AppConfig>()];
            if file.read_exact(&mut buffer).is_ok() {
                unsafe {
                    let config: AppConfig = std::mem::transmute(buffer);
                    if config.magic == CONFIG_MAGIC && config.version == CONFIG_VERSION {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    fn save_to(&self, path: &Path) {
        if let Ok(mut file) = File::create(path) {
            unsafe {
                let bytes: &[u8] = std::slice::from_raw_parts(
                    self as *const _ as *const u8,
                    std::mem::size_of::<AppConfig>(),
                );
                let _ = file.write_all(bytes);
            }
        }
    }

    /// Share mode built from the stored default deny flags.
    pub fn default_share(&self) -> ShareMode {
        ShareMode::from_deny(self.deny_read, self.deny_write, self.deny_delete)
    }

    pub fn icon_library_str(&self) -> String {
        from_wide(&self.icon_library)
    }

    pub fn set_icon_library(&mut self, library: &str) {
        fill_wide_field(&mut self.icon_library, library);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_deny_everything() {
        let config = AppConfig::default();
        assert_eq!(config.default_share(), ShareMode::NONE);
        assert_eq!(config.icon_library_str(), "shell32.dll");
    }

    #[test]
    fn dump_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockrs.dat");

        let mut config = AppConfig::default();
        config.deny_write = false;
        config.lock_immediately = true;
        config.window_width = 800;
        config.set_icon_library("imageres.dll");
        config.save_to(&path);

        let loaded = AppConfig::load_from(&path);
        assert!(!loaded.deny_write);
        assert!(loaded.lock_immediately);
        assert_eq!(loaded.window_width, 800);
        assert_eq!(loaded.icon_library_str(), "imageres.dll");
    }

    #[test]
    fn bad_magic_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockrs.dat");
        std::fs::write(&path, vec![0u8; std::mem::size_of::<AppConfig>()]).unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.magic, CONFIG_MAGIC);
        assert!(loaded.deny_read);
    }

    #[test]
    fn short_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lockrs.dat");
        std::fs::write(&path, b"tiny").unwrap();

        let loaded = AppConfig::load_from(&path);
        assert_eq!(loaded.version, CONFIG_VERSION);
    }
}
