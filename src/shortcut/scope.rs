//! Scopes: the binding collection for one window or for the whole application

use std::collections::BTreeSet;
use std::fmt;

use super::binding::{Binding, Callback};
use super::chord::{KeyChord, Platform};

/// Stable, non-owning identifier of a host window
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowKey(u64);

impl WindowKey {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// Target of a registry operation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScopeKey {
    /// Input from any window, current or future
    Global,
    Window(WindowKey),
}

impl From<WindowKey> for ScopeKey {
    fn from(window: WindowKey) -> Self {
        ScopeKey::Window(window)
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKey::Global => write!(f, "global"),
            ScopeKey::Window(window) => write!(f, "{}", window),
        }
    }
}

/// The input listener a scope holds while it is active
///
/// Tracks the windows whose input it receives. The global listener also
/// follows newly created windows.
#[derive(Debug, Default)]
pub(crate) struct Listener {
    windows: BTreeSet<WindowKey>,
    follows_new_windows: bool,
}

impl Listener {
    pub(crate) fn for_window(window: WindowKey) -> Self {
        Self {
            windows: BTreeSet::from([window]),
            follows_new_windows: false,
        }
    }

    pub(crate) fn global(open_windows: impl IntoIterator<Item = WindowKey>) -> Self {
        Self {
            windows: open_windows.into_iter().collect(),
            follows_new_windows: true,
        }
    }

    pub(crate) fn follows_new_windows(&self) -> bool {
        self.follows_new_windows
    }

    pub(crate) fn is_attached(&self, window: WindowKey) -> bool {
        self.windows.contains(&window)
    }

    /// Returns true if the window was not attached before
    pub(crate) fn attach(&mut self, window: WindowKey) -> bool {
        self.windows.insert(window)
    }

    /// Returns true if the window was attached
    pub(crate) fn detach_window(&mut self, window: WindowKey) -> bool {
        self.windows.remove(&window)
    }

    pub(crate) fn windows(&self) -> impl Iterator<Item = WindowKey> + '_ {
        self.windows.iter().copied()
    }

    /// Detach from everything, returning the windows that were attached
    pub(crate) fn detach(self) -> Vec<WindowKey> {
        self.windows.into_iter().collect()
    }
}

/// An active scope: bindings in registration order plus its listener
#[derive(Debug)]
pub(crate) struct Scope {
    bindings: Vec<Binding>,
    listener: Listener,
}

impl Scope {
    pub(crate) fn new(listener: Listener) -> Self {
        Self {
            bindings: Vec::new(),
            listener,
        }
    }

    pub(crate) fn push(&mut self, binding: Binding) {
        self.bindings.push(binding);
    }

    /// Remove matching bindings, returning how many were removed
    pub(crate) fn remove_matching(
        &mut self,
        chord: &KeyChord,
        callback: Option<&Callback>,
        platform: Platform,
    ) -> usize {
        let before = self.bindings.len();
        self.bindings
            .retain(|binding| !binding.selected_by(chord, callback, platform));
        before - self.bindings.len()
    }

    pub(crate) fn set_enabled(&mut self, enabled: bool) {
        for binding in &mut self.bindings {
            binding.enabled = enabled;
        }
    }

    pub(crate) fn has_chord(&self, chord: &KeyChord, platform: Platform) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.chord.equivalent(chord, platform))
    }

    /// Copy of the current bindings for dispatch
    pub(crate) fn snapshot(&self) -> Vec<Binding> {
        self.bindings.clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.bindings.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn listener(&self) -> &Listener {
        &self.listener
    }

    pub(crate) fn listener_mut(&mut self) -> &mut Listener {
        &mut self.listener
    }

    /// Tear the scope down, returning the windows its listener was attached to
    pub(crate) fn into_detached(self) -> Vec<WindowKey> {
        self.listener.detach()
    }
}
