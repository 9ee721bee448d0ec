//! Binding struct pairing a chord with the callback it triggers

use std::fmt;
use std::rc::Rc;

use super::chord::{KeyChord, Platform};

/// Shared handle to a shortcut callback
///
/// Identity is pointer identity: clones of one `Callback` are the same
/// callback, two `Callback::new` calls with equal closures are not.
#[derive(Clone)]
pub struct Callback(Rc<dyn Fn()>);

impl Callback {
    pub fn new(f: impl Fn() + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self) {
        (self.0)()
    }

    pub fn same(&self, other: &Callback) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Callback {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for Callback {}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:p})", Rc::as_ptr(&self.0) as *const ())
    }
}

/// A single binding inside a scope
#[derive(Debug, Clone)]
pub struct Binding {
    pub chord: KeyChord,
    pub callback: Callback,
    pub enabled: bool,
}

impl Binding {
    /// New bindings start enabled
    pub fn new(chord: KeyChord, callback: Callback) -> Self {
        Self {
            chord,
            callback,
            enabled: true,
        }
    }

    /// Check if this binding fires for the given chord
    pub fn fires_on(&self, chord: &KeyChord, platform: Platform) -> bool {
        self.enabled && self.chord.equivalent(chord, platform)
    }

    /// Check if this binding is selected by an unregister filter
    pub fn selected_by(
        &self,
        chord: &KeyChord,
        callback: Option<&Callback>,
        platform: Platform,
    ) -> bool {
        self.chord.equivalent(chord, platform) && callback.map_or(true, |cb| self.callback.same(cb))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::accelerator::parse_accelerator;
    use std::cell::Cell;

    #[test]
    fn test_callback_identity() {
        let a = Callback::new(|| {});
        let b = Callback::new(|| {});
        assert_eq!(a, a.clone());
        assert_ne!(a, b);
    }

    #[test]
    fn test_callback_call() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let cb = Callback::new(move || counter.set(counter.get() + 1));
        cb.call();
        cb.clone().call();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn test_disabled_binding_does_not_fire() {
        let chord = parse_accelerator("Ctrl+S").chord;
        let mut binding = Binding::new(chord.clone(), Callback::new(|| {}));
        assert!(binding.fires_on(&chord, Platform::Linux));

        binding.enabled = false;
        assert!(!binding.fires_on(&chord, Platform::Linux));
    }

    #[test]
    fn test_selected_by_callback_filter() {
        let chord = parse_accelerator("Ctrl+S").chord;
        let cb = Callback::new(|| {});
        let other = Callback::new(|| {});
        let binding = Binding::new(chord.clone(), cb.clone());

        assert!(binding.selected_by(&chord, None, Platform::Linux));
        assert!(binding.selected_by(&chord, Some(&cb), Platform::Linux));
        assert!(!binding.selected_by(&chord, Some(&other), Platform::Linux));
    }
}
