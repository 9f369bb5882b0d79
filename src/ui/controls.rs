/* --- src/ui/controls.rs --- */
#![allow(unsafe_op_in_unsafe_fn)]

use std::ffi::c_void;

use windows_sys::Win32::Foundation::{HINSTANCE, HWND};
use windows_sys::Win32::Graphics::Gdi::{GetStockObject, DEFAULT_GUI_FONT};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, SendMessageW, BS_AUTOCHECKBOX, BS_PUSHBUTTON, WM_SETFONT, WS_BORDER,
    WS_CHILD, WS_TABSTOP, WS_VISIBLE,
};
use windows_sys::Win32::UI::Controls::{LVS_REPORT, LVS_SHOWSELALWAYS};

use crate::utils::to_wstring;
use crate::w;

// Control IDs
pub const IDC_FILE_LIST: i32 = 1001;
pub const IDC_BTN_ADD: i32 = 1002;
pub const IDC_BTN_REMOVE: i32 = 1003;
pub const IDC_BTN_LOCK: i32 = 1004;
pub const IDC_BTN_RELEASE: i32 = 1005;
pub const IDC_BTN_CLEAR: i32 = 1006;
pub const IDC_CHK_READ: i32 = 1007;
pub const IDC_CHK_WRITE: i32 = 1008;
pub const IDC_CHK_DELETE: i32 = 1009;
pub const IDC_CHK_IMMEDIATE: i32 = 1010;
pub const IDC_STATUS_LABEL: i32 = 1011;

// The list is owner-data (virtual): row text is pulled from the collection
// on demand, so the list never stores a second copy of the model.
pub const LVS_OWNERDATA: u32 = 0x1000;

/// Apply the default GUI font so controls don't render in the legacy
/// bitmap font.
pub unsafe fn apply_default_font(hwnd: HWND) {
    let font = GetStockObject(DEFAULT_GUI_FONT);
    SendMessageW(hwnd, WM_SETFONT, font as usize, 1);
}

unsafe fn create_control(
    parent: HWND,
    instance: HINSTANCE,
    class: &[u16],
    text: &str,
    style: u32,
    rect: (i32, i32, i32, i32),
    id: i32,
) -> HWND {
    let wide_text = to_wstring(text);
    let hwnd = CreateWindowExW(
        0,
        class.as_ptr(),
        wide_text.as_ptr(),
        style,
        rect.0,
        rect.1,
        rect.2,
        rect.3,
        parent,
        id as usize as *mut c_void,
        instance,
        std::ptr::null(),
    );
    if !hwnd.is_null() {
        apply_default_font(hwnd);
    }
    hwnd
}

pub unsafe fn create_button(
    parent: HWND,
    instance: HINSTANCE,
    text: &str,
    rect: (i32, i32, i32, i32),
    id: i32,
) -> HWND {
    create_control(
        parent,
        instance,
        w!("BUTTON"),
        text,
        WS_CHILD | WS_VISIBLE | WS_TABSTOP | BS_PUSHBUTTON as u32,
        rect,
        id,
    )
}

pub unsafe fn create_checkbox(
    parent: HWND,
    instance: HINSTANCE,
    text: &str,
    rect: (i32, i32, i32, i32),
    id: i32,
) -> HWND {
    create_control(
        parent,
        instance,
        w!("BUTTON"),
        text,
        WS_CHILD | WS_VISIBLE | WS_TABSTOP | BS_AUTOCHECKBOX as u32,
        rect,
        id,
    )
}

pub unsafe fn create_label(
    parent: HWND,
    instance: HINSTANCE,
    text: &str,
    rect: (i32, i32, i32, i32),
    id: i32,
) -> HWND {
    create_control(
        parent,
        instance,
        w!("STATIC"),
        text,
        WS_CHILD | WS_VISIBLE,
        rect,
        id,
    )
}

pub unsafe fn create_listview(
    parent: HWND,
    instance: HINSTANCE,
    rect: (i32, i32, i32, i32),
    id: i32,
) -> HWND {
    create_control(
        parent,
        instance,
        w!("SysListView32"),
        "",
        WS_CHILD | WS_VISIBLE | WS_BORDER | WS_TABSTOP | LVS_REPORT | LVS_SHOWSELALWAYS
            | LVS_OWNERDATA,
        rect,
        id,
    )
}
