//! Win32 presentation layer: main window, controls, dialogs and the
//! MessageBox-backed escalation prompt. Everything here is a thin shell over
//! the engine; no lock logic lives in this module tree.

pub mod controls;
pub mod file_dialog;
pub mod icons;
pub mod prompt;
pub mod window;
