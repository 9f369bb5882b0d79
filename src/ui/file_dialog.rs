/* --- src/ui/file_dialog.rs --- */
#![allow(unsafe_op_in_unsafe_fn)]

use windows_sys::Win32::Foundation::HWND;
use windows_sys::Win32::UI::Controls::Dialogs::{
    GetOpenFileNameW, OFN_ALLOWMULTISELECT, OFN_EXPLORER, OFN_FILEMUSTEXIST, OFN_HIDEREADONLY,
    OFN_PATHMUSTEXIST, OPENFILENAMEW,
};

use crate::w;

/// Pick one or more existing files with the native open dialog.
/// Returns an empty vector when the user cancels.
pub unsafe fn pick_files(owner: HWND) -> Vec<String> {
    // Explorer multi-select returns "dir\0name\0name\0\0"; budget for many names.
    let mut buffer = vec![0u16; 32 * 1024];

    let mut ofn: OPENFILENAMEW = std::mem::zeroed();
    ofn.lStructSize = std::mem::size_of::<OPENFILENAMEW>() as u32;
    ofn.hwndOwner = owner;
    ofn.lpstrFilter = w!("All Files\0*.*\0").as_ptr();
    ofn.lpstrFile = buffer.as_mut_ptr();
    ofn.nMaxFile = buffer.len() as u32;
    ofn.Flags = OFN_EXPLORER
        | OFN_ALLOWMULTISELECT
        | OFN_FILEMUSTEXIST
        | OFN_PATHMUSTEXIST
        | OFN_HIDEREADONLY;

    if GetOpenFileNameW(&mut ofn) == 0 {
        return Vec::new();
    }
    parse_multi_select(&buffer)
}

/// Splits the dialog's null-separated result buffer. One segment is a single
/// full path; several mean directory followed by bare file names.
fn parse_multi_select(buffer: &[u16]) -> Vec<String> {
    let mut segments: Vec<String> = Vec::new();
    let mut start = 0;
    for (i, &c) in buffer.iter().enumerate() {
        if c == 0 {
            if i == start {
                break; // double null: end of list
            }
            segments.push(String::from_utf16_lossy(&buffer[start..i]));
            start = i + 1;
        }
    }

    match segments.len() {
        0 | 1 => segments,
        _ => {
            let dir = segments[0].trim_end_matches('\\').to_string();
            segments[1..]
                .iter()
                .map(|name| format!("{dir}\\{name}"))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::to_wstring;

    fn packed(segments: &[&str]) -> Vec<u16> {
        let mut buffer = Vec::new();
        for segment in segments {
            buffer.extend(to_wstring(segment));
        }
        buffer.push(0);
        buffer
    }

    #[test]
    fn single_selection_is_one_full_path() {
        let buffer = packed(&["C:\\data\\report.txt"]);
        assert_eq!(parse_multi_select(&buffer), vec!["C:\\data\\report.txt"]);
    }

    #[test]
    fn multi_selection_joins_directory_and_names() {
        let buffer = packed(&["C:\\data", "a.txt", "b.txt"]);
        assert_eq!(
            parse_multi_select(&buffer),
            vec!["C:\\data\\a.txt", "C:\\data\\b.txt"]
        );
    }

    #[test]
    fn empty_buffer_yields_nothing() {
        assert!(parse_multi_select(&[0, 0]).is_empty());
    }
}
