/* --- src/ui/icons.rs --- */
#![allow(unsafe_op_in_unsafe_fn)]

use windows_sys::Win32::UI::Controls::{
    ImageList_Create, ImageList_Destroy, ImageList_ReplaceIcon, HIMAGELIST, ILC_COLOR32, ILC_MASK,
};
use windows_sys::Win32::UI::Shell::ExtractIconExW;
use windows_sys::Win32::UI::WindowsAndMessaging::{DestroyIcon, HICON};

use crate::config::AppConfig;
use crate::log_warn;
use crate::utils::to_wstring;

/// Builds the 16x16 image list holding the lock icon for locked rows.
///
/// The icon source (library + index) comes from configuration. This is an
/// optional feature: on any failure we log once and return `None`, and the
/// list simply renders without icons.
pub unsafe fn create_lock_image_list(config: &AppConfig) -> Option<HIMAGELIST> {
    let library = config.icon_library_str();
    let wide_library = to_wstring(&library);

    let mut small: HICON = std::ptr::null_mut();
    let extracted = ExtractIconExW(
        wide_library.as_ptr(),
        config.icon_index,
        std::ptr::null_mut(),
        &mut small,
        1,
    );
    if extracted == 0 || small.is_null() {
        log_warn!(
            "no lock icon at '{}' index {}, list will render without icons",
            library,
            config.icon_index
        );
        return None;
    }

    let image_list = ImageList_Create(16, 16, ILC_COLOR32 | ILC_MASK, 1, 1);
    if image_list.is_null() {
        DestroyIcon(small);
        return None;
    }

    // ImageList_AddIcon is a macro over ReplaceIcon with index -1.
    let index = ImageList_ReplaceIcon(image_list, -1, small);
    DestroyIcon(small);
    if index < 0 {
        ImageList_Destroy(image_list);
        return None;
    }
    Some(image_list)
}
