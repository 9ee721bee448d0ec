//! Per-thread default manager for hosts that want a single shared registry
//!
//! Managers are ordinary values and can be built as often as needed; this
//! module only stores one of them for code that cannot thread a handle
//! through.

use std::cell::RefCell;

use crate::shortcut::ShortcutManager;

thread_local! {
    static DEFAULT: RefCell<Option<ShortcutManager>> = const { RefCell::new(None) };
}

/// Make `manager` the default for this thread, returning the previous one
pub fn install(manager: ShortcutManager) -> Option<ShortcutManager> {
    DEFAULT.with(|cell| cell.borrow_mut().replace(manager))
}

/// Remove and return the default manager
pub fn uninstall() -> Option<ShortcutManager> {
    DEFAULT.with(|cell| cell.borrow_mut().take())
}

/// Handle to the default manager, if one is installed
pub fn default_manager() -> Option<ShortcutManager> {
    DEFAULT.with(|cell| cell.borrow().clone())
}

/// Run `f` against the default manager
///
/// The manager is cloned out first, so `f` may itself install or uninstall.
pub fn with_default<R>(f: impl FnOnce(&ShortcutManager) -> R) -> Option<R> {
    default_manager().map(|manager| f(&manager))
}
