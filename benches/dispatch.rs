//! Benchmarks for accelerator parsing and key event dispatch
//!
//! Run with: cargo bench dispatch

use std::rc::Rc;

use localshortcut::shortcut::{normalize, parse_accelerator, Modifiers, RawKeyEvent};
use localshortcut::{Callback, ScopeKey, ShortcutManager, WindowHost, WindowKey};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

struct BenchHost {
    windows: Vec<WindowKey>,
}

impl WindowHost for BenchHost {
    fn open_windows(&self) -> Vec<WindowKey> {
        self.windows.clone()
    }

    fn is_destroyed(&self, window: WindowKey) -> bool {
        !self.windows.contains(&window)
    }
}

const WINDOW: WindowKey = WindowKey::new(1);

/// Manager with `count` distinct bindings in the window scope and a few globals
fn populated_manager(count: usize) -> ShortcutManager {
    let manager = ShortcutManager::new(Rc::new(BenchHost {
        windows: vec![WINDOW],
    }));
    let noop = Callback::new(|| {});

    let letters = "abcdefghijklmnopqrstuvwxyz";
    let prefixes = ["Ctrl", "Alt", "Ctrl+Shift", "Ctrl+Alt", "Meta", "Alt+Shift"];
    for i in 0..count {
        let letter = &letters[i % 26..i % 26 + 1];
        let prefix = prefixes[(i / 26) % prefixes.len()];
        let _ = manager.register(WINDOW, format!("{}+{}", prefix, letter), &noop);
    }
    for key in ["F1", "F2", "F3"] {
        let _ = manager.register(ScopeKey::Global, key, &noop);
    }
    manager
}

// ============================================================================
// Accelerator parsing
// ============================================================================

#[divan::bench(args = ["K", "Ctrl+K", "CmdOrCtrl+Shift+Alt+F12", "Ctrl+Bogus"])]
fn parse(accelerator: &str) {
    divan::black_box(parse_accelerator(divan::black_box(accelerator)));
}

#[divan::bench]
fn normalize_event() {
    let event = RawKeyEvent::key_down("KeyK", "k").with_modifiers(Modifiers::CTRL);
    divan::black_box(normalize(divan::black_box(&event)));
}

// ============================================================================
// Dispatch
// ============================================================================

#[divan::bench(args = [10, 100, 150])]
fn dispatch_hit(bencher: divan::Bencher, bindings: usize) {
    let manager = populated_manager(bindings);
    let event = RawKeyEvent::key_down("KeyA", "a").with_modifiers(Modifiers::CTRL);

    bencher.bench_local(|| divan::black_box(manager.handle_event(WINDOW, &event)));
}

#[divan::bench(args = [10, 100, 150])]
fn dispatch_miss(bencher: divan::Bencher, bindings: usize) {
    let manager = populated_manager(bindings);
    let event = RawKeyEvent::key_down("KeyZ", "z").with_modifiers(Modifiers::META | Modifiers::SHIFT);

    bencher.bench_local(|| divan::black_box(manager.handle_event(WINDOW, &event)));
}

#[divan::bench]
fn dispatch_key_up(bencher: divan::Bencher) {
    let manager = populated_manager(100);
    let event = RawKeyEvent::key_up("KeyA", "a").with_modifiers(Modifiers::CTRL);

    bencher.bench_local(|| divan::black_box(manager.handle_event(WINDOW, &event)));
}

#[divan::bench(args = [10, 100])]
fn is_registered(bencher: divan::Bencher, bindings: usize) {
    let manager = populated_manager(bindings);

    bencher.bench_local(|| divan::black_box(manager.is_registered(WINDOW, "Ctrl+Shift+Z")));
}

// ============================================================================
// Registration churn
// ============================================================================

#[divan::bench]
fn register_unregister(bencher: divan::Bencher) {
    let manager = populated_manager(0);
    let noop = Callback::new(|| {});

    bencher.bench_local(|| {
        let _ = manager.register(WINDOW, "Ctrl+K", &noop);
        manager.unregister(WINDOW, "Ctrl+K", Some(&noop));
    });
}
