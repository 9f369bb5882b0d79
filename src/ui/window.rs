/* --- src/ui/window.rs --- */
#![allow(unsafe_op_in_unsafe_fn)]

use std::sync::mpsc::{channel, Receiver};

use windows_sys::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows_sys::Win32::Graphics::Gdi::{COLOR_WINDOW, HBRUSH};
use windows_sys::Win32::System::LibraryLoader::GetModuleHandleW;
use windows_sys::Win32::UI::Controls::{
    InitCommonControlsEx, ICC_LISTVIEW_CLASSES, INITCOMMONCONTROLSEX, LVCFMT_LEFT, LVCF_FMT,
    LVCF_TEXT, LVCF_WIDTH, LVCOLUMNW, LVIF_IMAGE, LVIF_TEXT, LVM_GETNEXTITEM, LVM_INSERTCOLUMNW,
    LVM_SETEXTENDEDLISTVIEWSTYLE, LVM_SETIMAGELIST, LVM_SETITEMCOUNT, LVNI_SELECTED,
    LVN_GETDISPINFOW, LVSIL_SMALL, LVS_EX_FULLROWSELECT, NMHDR, NMLVDISPINFOW,
};
use windows_sys::Win32::UI::Shell::{DragAcceptFiles, DragFinish, DragQueryFileW, HDROP};
use windows_sys::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, GetWindowLongPtrW, GetWindowRect, LoadCursorW, MessageBoxW,
    MoveWindow, PostQuitMessage, RegisterClassW, SendMessageW, SetTimer, SetWindowLongPtrW,
    SetWindowTextW, ShowWindow, BM_GETCHECK, BM_SETCHECK, CS_HREDRAW, CS_VREDRAW, CW_USEDEFAULT,
    GWLP_USERDATA, IDC_ARROW, MB_ICONERROR, MB_OK, SW_SHOW, WM_COMMAND, WM_CREATE, WM_DESTROY,
    WM_DROPFILES, WM_NOTIFY, WM_SIZE, WM_TIMER, WNDCLASSW, WS_OVERLAPPEDWINDOW, WS_VISIBLE,
};

use crate::config::AppConfig;
use crate::engine::collection::FileCollection;
use crate::engine::share::ShareMode;
use crate::logger::{init_logger, set_log_level, LogEntry};
use crate::ui::controls::{
    create_button, create_checkbox, create_label, create_listview, IDC_BTN_ADD, IDC_BTN_CLEAR,
    IDC_BTN_LOCK, IDC_BTN_RELEASE, IDC_BTN_REMOVE, IDC_CHK_DELETE, IDC_CHK_IMMEDIATE,
    IDC_CHK_READ, IDC_CHK_WRITE, IDC_FILE_LIST, IDC_STATUS_LABEL,
};
use crate::ui::file_dialog::pick_files;
use crate::ui::icons::create_lock_image_list;
use crate::ui::prompt::MessageBoxPrompt;
use crate::utils::to_wstring;
use crate::{log_info, w};

const WINDOW_CLASS_NAME: &str = "LockRS_Class";
const LOG_TIMER_ID: usize = 1;

struct Controls {
    list: HWND,
    status: HWND,
    chk_read: HWND,
    chk_write: HWND,
    chk_delete: HWND,
    chk_immediate: HWND,
}

/// Per-window state stored behind GWLP_USERDATA.
struct AppState {
    files: FileCollection,
    config: AppConfig,
    controls: Controls,
    log_rx: Receiver<LogEntry>,
    has_lock_icon: bool,
}

pub unsafe fn create_main_window(instance: HINSTANCE) -> Result<HWND, String> {
    let iccex = INITCOMMONCONTROLSEX {
        dwSize: std::mem::size_of::<INITCOMMONCONTROLSEX>() as u32,
        dwICC: ICC_LISTVIEW_CLASSES,
    };
    InitCommonControlsEx(&iccex);

    let class_name = to_wstring(WINDOW_CLASS_NAME);
    let mut wc: WNDCLASSW = std::mem::zeroed();
    wc.style = CS_HREDRAW | CS_VREDRAW;
    wc.lpfnWndProc = Some(wnd_proc);
    wc.hInstance = instance;
    wc.hCursor = LoadCursorW(std::ptr::null_mut(), IDC_ARROW);
    wc.hbrBackground = (COLOR_WINDOW + 1) as usize as HBRUSH;
    wc.lpszClassName = class_name.as_ptr();

    if RegisterClassW(&wc) == 0 {
        return Err("window class registration failed".to_string());
    }

    // Geometry comes from the saved config; WM_CREATE loads the rest.
    let config = AppConfig::load();
    let (x, y) = if config.window_x < 0 || config.window_y < 0 {
        (CW_USEDEFAULT, CW_USEDEFAULT)
    } else {
        (config.window_x, config.window_y)
    };
    let width = if config.window_width > 0 { config.window_width } else { 640 };
    let height = if config.window_height > 0 { config.window_height } else { 480 };

    let hwnd = CreateWindowExW(
        0,
        class_name.as_ptr(),
        w!("LockRS").as_ptr(),
        WS_OVERLAPPEDWINDOW | WS_VISIBLE,
        x,
        y,
        width,
        height,
        std::ptr::null_mut(),
        std::ptr::null_mut(),
        instance,
        std::ptr::null(),
    );
    if hwnd.is_null() {
        return Err("main window creation failed".to_string());
    }

    ShowWindow(hwnd, SW_SHOW);
    Ok(hwnd)
}

unsafe fn get_state<'a>(hwnd: HWND) -> Option<&'a mut AppState> {
    let ptr = GetWindowLongPtrW(hwnd, GWLP_USERDATA) as *mut AppState;
    ptr.as_mut()
}

unsafe fn is_checked(hwnd: HWND) -> bool {
    SendMessageW(hwnd, BM_GETCHECK, 0, 0) == 1 // BST_CHECKED = 1
}

unsafe fn set_checked(hwnd: HWND, checked: bool) {
    SendMessageW(hwnd, BM_SETCHECK, checked as usize, 0);
}

/// Deny checkboxes are read live at the moment a lock is performed; the
/// engine only ever sees the resulting explicit ShareMode value.
unsafe fn read_share(controls: &Controls) -> ShareMode {
    ShareMode::from_deny(
        is_checked(controls.chk_read),
        is_checked(controls.chk_write),
        is_checked(controls.chk_delete),
    )
}

unsafe fn insert_column(list: HWND, index: i32, title: &str, width: i32) {
    let mut text = to_wstring(title);
    let mut column: LVCOLUMNW = std::mem::zeroed();
    column.mask = LVCF_TEXT | LVCF_WIDTH | LVCF_FMT;
    column.fmt = LVCFMT_LEFT;
    column.cx = width;
    column.pszText = text.as_mut_ptr();
    SendMessageW(
        list,
        LVM_INSERTCOLUMNW,
        index as usize,
        &column as *const _ as isize,
    );
}

unsafe fn sync_item_count(state: &AppState) {
    SendMessageW(
        state.controls.list,
        LVM_SETITEMCOUNT,
        state.files.len(),
        0,
    );
}

unsafe fn selected_indices(list: HWND) -> Vec<usize> {
    let mut indices = Vec::new();
    let mut current: isize = -1;
    loop {
        current = SendMessageW(
            list,
            LVM_GETNEXTITEM,
            current as usize,
            LVNI_SELECTED as isize,
        );
        if current < 0 {
            break;
        }
        indices.push(current as usize);
    }
    indices
}

unsafe fn on_create(hwnd: HWND) {
    let instance = GetModuleHandleW(std::ptr::null()) as HINSTANCE;
    let config = AppConfig::load();

    if config.log_enabled {
        set_log_level(config.log_level_mask);
    } else {
        set_log_level(0);
    }
    let (tx, rx) = channel();
    init_logger(tx);

    create_button(hwnd, instance, "Add...", (10, 10, 80, 26), IDC_BTN_ADD);
    create_button(hwnd, instance, "Remove", (95, 10, 80, 26), IDC_BTN_REMOVE);
    create_button(hwnd, instance, "Lock", (180, 10, 80, 26), IDC_BTN_LOCK);
    create_button(hwnd, instance, "Release", (265, 10, 80, 26), IDC_BTN_RELEASE);
    create_button(hwnd, instance, "Clear", (350, 10, 80, 26), IDC_BTN_CLEAR);

    let chk_read = create_checkbox(hwnd, instance, "Deny read", (10, 44, 100, 22), IDC_CHK_READ);
    let chk_write =
        create_checkbox(hwnd, instance, "Deny write", (115, 44, 100, 22), IDC_CHK_WRITE);
    let chk_delete =
        create_checkbox(hwnd, instance, "Deny delete", (220, 44, 110, 22), IDC_CHK_DELETE);
    let chk_immediate = create_checkbox(
        hwnd,
        instance,
        "Lock immediately",
        (340, 44, 140, 22),
        IDC_CHK_IMMEDIATE,
    );

    let list = create_listview(hwnd, instance, (10, 78, 600, 320), IDC_FILE_LIST);
    insert_column(list, 0, "Name", 240);
    insert_column(list, 1, "Path", 340);
    SendMessageW(
        list,
        LVM_SETEXTENDEDLISTVIEWSTYLE,
        LVS_EX_FULLROWSELECT as usize,
        LVS_EX_FULLROWSELECT as isize,
    );

    let status = create_label(hwnd, instance, "Ready", (10, 404, 600, 20), IDC_STATUS_LABEL);

    // Optional lock icon; the list owns the image list once attached.
    let image_list = create_lock_image_list(&config);
    let has_lock_icon = match image_list {
        Some(himl) => {
            SendMessageW(list, LVM_SETIMAGELIST, LVSIL_SMALL as usize, himl as isize);
            true
        }
        None => {
            MessageBoxW(
                hwnd,
                to_wstring(&format!(
                    "Could not load the lock icon from '{}'. Rows will show no icon.",
                    config.icon_library_str()
                ))
                .as_ptr(),
                w!("LockRS").as_ptr(),
                MB_OK | MB_ICONERROR,
            );
            false
        }
    };

    set_checked(chk_read, config.deny_read);
    set_checked(chk_write, config.deny_write);
    set_checked(chk_delete, config.deny_delete);
    set_checked(chk_immediate, config.lock_immediately);

    DragAcceptFiles(hwnd, 1);
    SetTimer(hwnd, LOG_TIMER_ID, 250, None);

    let state = Box::new(AppState {
        files: FileCollection::new(),
        config,
        controls: Controls {
            list,
            status,
            chk_read,
            chk_write,
            chk_delete,
            chk_immediate,
        },
        log_rx: rx,
        has_lock_icon,
    });
    SetWindowLongPtrW(hwnd, GWLP_USERDATA, Box::into_raw(state) as isize);

    // Paths handed over on the command line.
    let startup = crate::get_startup_paths();
    if !startup.paths.is_empty() {
        if let Some(state) = get_state(hwnd) {
            if startup.lock {
                set_checked(state.controls.chk_immediate, true);
            }
            ingest_paths(hwnd, state, startup.paths.clone());
        }
    }
    log_info!("ready");
}

/// Shared add path for dialog picks, drag-and-drop and CLI arguments.
unsafe fn ingest_paths(hwnd: HWND, state: &mut AppState, paths: Vec<String>) {
    if paths.is_empty() {
        return;
    }
    let immediate = if is_checked(state.controls.chk_immediate) {
        Some(read_share(&state.controls))
    } else {
        None
    };
    let mut prompt = MessageBoxPrompt::new(hwnd, state.controls.list);
    state.files.add_paths(paths, immediate, &mut prompt);
    sync_item_count(state);
}

unsafe fn on_command(hwnd: HWND, state: &mut AppState, id: i32) {
    match id {
        IDC_BTN_ADD => {
            let paths = pick_files(hwnd);
            ingest_paths(hwnd, state, paths);
        }
        IDC_BTN_REMOVE => {
            let indices = selected_indices(state.controls.list);
            state.files.remove_selected(&indices);
            sync_item_count(state);
        }
        IDC_BTN_LOCK => {
            let indices = selected_indices(state.controls.list);
            let share = read_share(&state.controls);
            let mut prompt = MessageBoxPrompt::new(hwnd, state.controls.list);
            state.files.lock_selected(&indices, share, &mut prompt);
        }
        IDC_BTN_RELEASE => {
            let indices = selected_indices(state.controls.list);
            let mut prompt = MessageBoxPrompt::new(hwnd, state.controls.list);
            state.files.release_selected(&indices, &mut prompt);
        }
        IDC_BTN_CLEAR => {
            state.files.clear();
            sync_item_count(state);
        }
        _ => {}
    }
}

/// Virtual list callback: text and icon come straight from the collection.
unsafe fn on_get_disp_info(state: &AppState, lparam: LPARAM) {
    let info = &mut *(lparam as *mut NMLVDISPINFOW);
    let row = info.item.iItem;
    if row < 0 {
        return;
    }
    let Some(item) = state.files.get(row as usize) else {
        return;
    };

    if info.item.mask & LVIF_TEXT != 0 && !info.item.pszText.is_null() && info.item.cchTextMax > 0 {
        let text = match info.item.iSubItem {
            0 => item.file_name(),
            _ => item.directory(),
        };
        let capacity = info.item.cchTextMax as usize;
        let mut written = 0;
        for unit in text.encode_utf16().take(capacity - 1) {
            *info.item.pszText.add(written) = unit;
            written += 1;
        }
        *info.item.pszText.add(written) = 0;
    }

    if info.item.mask & LVIF_IMAGE != 0 {
        info.item.iImage = if state.has_lock_icon && item.is_locked() {
            0
        } else {
            -1
        };
    }
}

unsafe fn on_drop_files(hwnd: HWND, state: &mut AppState, hdrop: HDROP) {
    let count = DragQueryFileW(hdrop, 0xFFFFFFFF, std::ptr::null_mut(), 0);
    let mut paths = Vec::new();
    let mut buffer = [0u16; 1024];

    for i in 0..count {
        let len = DragQueryFileW(hdrop, i, buffer.as_mut_ptr(), 1024);
        if len > 0 {
            paths.push(String::from_utf16_lossy(&buffer[..len as usize]));
        }
    }
    DragFinish(hdrop);
    ingest_paths(hwnd, state, paths);
}

unsafe fn on_timer(state: &mut AppState) {
    while let Ok(entry) = state.log_rx.try_recv() {
        let line = format!("[{}] {}", entry.level.as_str(), entry.message);
        SetWindowTextW(state.controls.status, to_wstring(&line).as_ptr());
    }
}

unsafe fn on_size(state: &AppState, lparam: LPARAM) {
    let width = (lparam & 0xFFFF) as i32;
    let height = ((lparam >> 16) & 0xFFFF) as i32;
    MoveWindow(
        state.controls.list,
        10,
        78,
        (width - 20).max(0),
        (height - 78 - 34).max(0),
        1,
    );
    MoveWindow(
        state.controls.status,
        10,
        (height - 26).max(0),
        (width - 20).max(0),
        20,
        1,
    );
}

unsafe fn on_destroy(hwnd: HWND) {
    let ptr = SetWindowLongPtrW(hwnd, GWLP_USERDATA, 0) as *mut AppState;
    if !ptr.is_null() {
        let mut state = Box::from_raw(ptr);

        let mut rect: RECT = std::mem::zeroed();
        if GetWindowRect(hwnd, &mut rect) != 0 {
            state.config.window_x = rect.left;
            state.config.window_y = rect.top;
            state.config.window_width = rect.right - rect.left;
            state.config.window_height = rect.bottom - rect.top;
        }
        state.config.deny_read = is_checked(state.controls.chk_read);
        state.config.deny_write = is_checked(state.controls.chk_write);
        state.config.deny_delete = is_checked(state.controls.chk_delete);
        state.config.lock_immediately = is_checked(state.controls.chk_immediate);
        state.config.save();
        // Dropping the state drops the collection, releasing every handle.
    }
    PostQuitMessage(0);
}

pub unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_CREATE => {
            on_create(hwnd);
            0
        }
        WM_COMMAND => {
            let id = (wparam & 0xFFFF) as i32;
            if let Some(state) = get_state(hwnd) {
                on_command(hwnd, state, id);
            }
            0
        }
        WM_NOTIFY => {
            let hdr = &*(lparam as *const NMHDR);
            if hdr.idFrom == IDC_FILE_LIST as usize && hdr.code == LVN_GETDISPINFOW {
                if let Some(state) = get_state(hwnd) {
                    on_get_disp_info(state, lparam);
                }
                return 0;
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }
        WM_DROPFILES => {
            if let Some(state) = get_state(hwnd) {
                on_drop_files(hwnd, state, wparam as HDROP);
            }
            0
        }
        WM_TIMER => {
            if wparam == LOG_TIMER_ID {
                if let Some(state) = get_state(hwnd) {
                    on_timer(state);
                }
            }
            0
        }
        WM_SIZE => {
            if let Some(state) = get_state(hwnd) {
                on_size(state, lparam);
            }
            0
        }
        WM_DESTROY => {
            on_destroy(hwnd);
            0
        }
        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
