//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};
use std::rc::Rc;

use localshortcut::shortcut::{Modifiers, RawKeyEvent};
use localshortcut::{Callback, ShortcutManager, WindowHost, WindowKey};

/// In-memory window host that records attach/detach calls
#[derive(Default)]
pub struct FakeHost {
    next_id: Cell<u64>,
    open: RefCell<BTreeSet<WindowKey>>,
    destroyed: RefCell<BTreeSet<WindowKey>>,
    attached: RefCell<BTreeSet<WindowKey>>,
    attach_calls: RefCell<HashMap<WindowKey, usize>>,
    detach_calls: RefCell<HashMap<WindowKey, usize>>,
}

impl FakeHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Open a window without telling any manager about it
    pub fn open(&self) -> WindowKey {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let window = WindowKey::new(id);
        self.open.borrow_mut().insert(window);
        window
    }

    /// Mark a window destroyed without telling any manager about it
    pub fn destroy(&self, window: WindowKey) {
        self.open.borrow_mut().remove(&window);
        self.destroyed.borrow_mut().insert(window);
    }

    pub fn is_attached(&self, window: WindowKey) -> bool {
        self.attached.borrow().contains(&window)
    }

    pub fn attach_calls(&self, window: WindowKey) -> usize {
        self.attach_calls.borrow().get(&window).copied().unwrap_or(0)
    }

    pub fn detach_calls(&self, window: WindowKey) -> usize {
        self.detach_calls.borrow().get(&window).copied().unwrap_or(0)
    }
}

impl WindowHost for FakeHost {
    fn open_windows(&self) -> Vec<WindowKey> {
        self.open.borrow().iter().copied().collect()
    }

    fn is_destroyed(&self, window: WindowKey) -> bool {
        self.destroyed.borrow().contains(&window)
    }

    fn attach(&self, window: WindowKey) {
        self.attached.borrow_mut().insert(window);
        *self.attach_calls.borrow_mut().entry(window).or_insert(0) += 1;
    }

    fn detach(&self, window: WindowKey) {
        self.attached.borrow_mut().remove(&window);
        *self.detach_calls.borrow_mut().entry(window).or_insert(0) += 1;
    }
}

/// A host and a manager wired to it
pub fn setup() -> (Rc<FakeHost>, ShortcutManager) {
    let host = FakeHost::new();
    let manager = ShortcutManager::new(host.clone());
    (host, manager)
}

/// Open a window on the host and notify the manager
pub fn open_window(host: &FakeHost, manager: &ShortcutManager) -> WindowKey {
    let window = host.open();
    manager.window_created(window);
    window
}

/// Destroy a window on the host and notify the manager
pub fn close_window(host: &FakeHost, manager: &ShortcutManager, window: WindowKey) {
    host.destroy(window);
    manager.window_closed(window);
}

/// Callback that counts its invocations
pub fn counter() -> (Rc<Cell<u32>>, Callback) {
    let hits = Rc::new(Cell::new(0));
    let inner = Rc::clone(&hits);
    (hits, Callback::new(move || inner.set(inner.get() + 1)))
}

/// Callback that appends `name` to a shared log
pub fn logger(log: &Rc<RefCell<Vec<&'static str>>>, name: &'static str) -> Callback {
    let log = Rc::clone(log);
    Callback::new(move || log.borrow_mut().push(name))
}

/// keyDown for a letter with the given modifiers
pub fn key_down(letter: char, mods: Modifiers) -> RawKeyEvent {
    let upper = letter.to_ascii_uppercase();
    RawKeyEvent::key_down(format!("Key{}", upper), letter.to_string()).with_modifiers(mods)
}

/// keyUp for a letter with the given modifiers
pub fn key_up(letter: char, mods: Modifiers) -> RawKeyEvent {
    let upper = letter.to_ascii_uppercase();
    RawKeyEvent::key_up(format!("Key{}", upper), letter.to_string()).with_modifiers(mods)
}
