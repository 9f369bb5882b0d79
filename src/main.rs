/* --- src/main.rs --- */
#![cfg_attr(all(windows, not(test)), windows_subsystem = "windows")]

mod config;
mod engine;
mod logger;
mod utils;

#[cfg(windows)]
mod ui;

/// Files handed over on the command line, to be added on startup.
#[derive(Debug, Clone, Default)]
pub struct StartupItems {
    pub paths: Vec<String>,
    /// `--lock`: lock the given paths right away, whatever the saved
    /// "lock immediately" default says.
    pub lock: bool,
}

fn parse_startup<I: Iterator<Item = String>>(args: I) -> StartupItems {
    let mut items = StartupItems::default();
    for arg in args {
        match arg.as_str() {
            "--lock" => items.lock = true,
            _ => items.paths.push(arg),
        }
    }
    items
}

#[cfg(windows)]
pub fn get_startup_paths() -> &'static StartupItems {
    use std::sync::OnceLock;
    static STARTUP: OnceLock<StartupItems> = OnceLock::new();
    STARTUP.get_or_init(|| parse_startup(std::env::args().skip(1)))
}

#[cfg(windows)]
fn main() {
    use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, GetMessageW, MessageBoxW, TranslateMessage, MB_ICONERROR, MB_OK, MSG,
    };

    unsafe {
        let instance = GetModuleHandleW(std::ptr::null());
        match ui::window::create_main_window(instance) {
            Ok(_) => {
                let mut msg: MSG = std::mem::zeroed();
                while GetMessageW(&mut msg, std::ptr::null_mut(), 0, 0) > 0 {
                    TranslateMessage(&msg);
                    DispatchMessageW(&msg);
                }
            }
            Err(error) => {
                MessageBoxW(
                    std::ptr::null_mut(),
                    utils::to_wstring(&error).as_ptr(),
                    crate::w!("LockRS").as_ptr(),
                    MB_OK | MB_ICONERROR,
                );
                std::process::exit(1);
            }
        }
    }
}

#[cfg(not(windows))]
fn main() {
    let items = parse_startup(std::env::args().skip(1));
    eprintln!(
        "lockrs holds files open with restrictive share modes, which needs Windows. \
         Nothing to do with {} path(s).",
        items.paths.len()
    );
    std::process::exit(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_and_lock_flag_are_split() {
        let args = ["--lock", r"C:\a.txt", r"C:\b.txt"].map(String::from);
        let items = parse_startup(args.into_iter());
        assert!(items.lock);
        assert_eq!(items.paths, vec![r"C:\a.txt", r"C:\b.txt"]);
    }

    #[test]
    fn plain_paths_do_not_force_locking() {
        let items = parse_startup([r"C:\a.txt".to_string()].into_iter());
        assert!(!items.lock);
        assert_eq!(items.paths.len(), 1);
    }

    #[test]
    fn empty_args_yield_no_work() {
        let items = parse_startup(std::iter::empty());
        assert!(items.paths.is_empty());
        assert!(!items.lock);
    }
}
