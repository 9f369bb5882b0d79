/* --- src/ui/prompt.rs --- */
#![allow(unsafe_op_in_unsafe_fn)]

use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::Graphics::Gdi::InvalidateRect;
use windows_sys::Win32::UI::WindowsAndMessaging::{
    MessageBoxW, SendMessageW, IDNO, IDYES, MB_ICONERROR, MB_YESNOCANCEL,
};

use crate::engine::batch::{BatchPrompt, PromptChoice};
use crate::engine::LockError;
use crate::log_error;
use crate::utils::to_wstring;
use crate::w;

// Not exported by the imported feature set; value is stable Win32.
const WM_SETREDRAW: u32 = 0x000B;

/// Escalation channel backed by a modal Yes/No/Cancel message box, with
/// redraw suppression on the file list while a batch runs.
pub struct MessageBoxPrompt {
    owner: HWND,
    list: HWND,
}

impl MessageBoxPrompt {
    pub fn new(owner: HWND, list: HWND) -> Self {
        MessageBoxPrompt { owner, list }
    }
}

impl BatchPrompt for MessageBoxPrompt {
    fn begin_update(&mut self) {
        unsafe {
            SendMessageW(self.list, WM_SETREDRAW, 0, 0);
        }
    }

    fn end_update(&mut self) {
        unsafe {
            SendMessageW(self.list, WM_SETREDRAW, 1, 0);
            InvalidateRect(self.list, std::ptr::null(), 1);
        }
    }

    fn on_failure(&mut self, error: &LockError) -> PromptChoice {
        log_error!("{error}");
        let message = to_wstring(&format!(
            "{error}\r\n\r\nDo you want to ignore the error after this?"
        ));
        let answer = unsafe {
            MessageBoxW(
                self.owner,
                message.as_ptr(),
                w!("LockRS").as_ptr(),
                MB_YESNOCANCEL | MB_ICONERROR,
            )
        };
        match answer {
            IDYES => PromptChoice::Ignore,
            IDNO => PromptChoice::Skip,
            _ => PromptChoice::Cancel,
        }
    }
}
