//! The windowing host the shortcut manager plugs into

use super::scope::WindowKey;

/// Window lifecycle and input plumbing provided by the embedding application
///
/// The manager calls `attach` once when the first scope starts listening to
/// a window and `detach` once when the last one stops. While a window is
/// attached, the host forwards its key events to
/// [`ShortcutManager::handle_event`](super::ShortcutManager::handle_event).
/// Window creation and closing are reported back through
/// [`window_created`](super::ShortcutManager::window_created) and
/// [`window_closed`](super::ShortcutManager::window_closed).
pub trait WindowHost {
    /// Windows currently open, in a stable order
    fn open_windows(&self) -> Vec<WindowKey>;

    /// Whether the window has already been destroyed
    fn is_destroyed(&self, window: WindowKey) -> bool;

    /// Start forwarding input events for `window`
    fn attach(&self, _window: WindowKey) {}

    /// Stop forwarding input events for `window`
    fn detach(&self, _window: WindowKey) {}
}
