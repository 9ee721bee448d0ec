//! localshortcut - window-scoped keyboard accelerators
//!
//! Binds accelerators such as `CmdOrCtrl+Shift+K` to callbacks for a single
//! window or for every window of an application, without OS-level global
//! hotkeys. The windowing host forwards key events and window lifecycle
//! notifications; see [`shortcut::WindowHost`].

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod shared;
pub mod shortcut;
pub mod tracing;

// Re-export commonly used types
pub use config::ShortcutConfig;
pub use shortcut::{
    Callback, KeyChord, RawKeyEvent, ScopeKey, ShortcutError, ShortcutManager, WindowHost,
    WindowKey,
};
