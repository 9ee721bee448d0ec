//! Scope registry, lifecycle management and event dispatch

use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use thiserror::Error;

use super::accelerator::{parse_accelerator, Accelerators};
use super::binding::{Binding, Callback};
use super::chord::{KeyChord, Platform};
use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::event::{normalize, RawKeyEvent};
use super::host::WindowHost;
use super::scope::{Listener, Scope, ScopeKey, WindowKey};
use crate::config::ShortcutConfig;

/// Errors returned to callers of the registry
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShortcutError {
    #[error("cannot register shortcuts on destroyed {0}")]
    WindowDestroyed(WindowKey),
}

/// Host hook to run once the registry borrow is released
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HostOp {
    Attach(WindowKey),
    Detach(WindowKey),
}

/// Side-table of active scopes, keyed by window identity
///
/// Also reference-counts window attachments so the host sees one `attach`
/// per window no matter how many scopes listen to it.
#[derive(Debug, Default)]
struct Registry {
    global: Option<Scope>,
    windows: HashMap<WindowKey, Scope>,
    attachments: HashMap<WindowKey, usize>,
}

impl Registry {
    fn scope(&self, key: ScopeKey) -> Option<&Scope> {
        match key {
            ScopeKey::Global => self.global.as_ref(),
            ScopeKey::Window(window) => self.windows.get(&window),
        }
    }

    fn scope_mut(&mut self, key: ScopeKey) -> Option<&mut Scope> {
        match key {
            ScopeKey::Global => self.global.as_mut(),
            ScopeKey::Window(window) => self.windows.get_mut(&window),
        }
    }

    fn retain(&mut self, window: WindowKey, ops: &mut Vec<HostOp>) {
        let count = self.attachments.entry(window).or_insert(0);
        *count += 1;
        if *count == 1 {
            ops.push(HostOp::Attach(window));
        }
    }

    fn release(&mut self, window: WindowKey, ops: &mut Vec<HostOp>) {
        let Some(count) = self.attachments.get_mut(&window) else {
            return;
        };
        *count -= 1;
        if *count == 0 {
            self.attachments.remove(&window);
            ops.push(HostOp::Detach(window));
        }
    }

    /// Activate a scope, attaching its listener to `targets`
    fn activate(&mut self, key: ScopeKey, targets: Vec<WindowKey>, ops: &mut Vec<HostOp>) {
        let listener = match key {
            ScopeKey::Global => Listener::global(targets.iter().copied()),
            ScopeKey::Window(window) => Listener::for_window(window),
        };
        for window in listener.windows().collect::<Vec<_>>() {
            self.retain(window, ops);
        }

        let scope = Scope::new(listener);
        match key {
            ScopeKey::Global => self.global = Some(scope),
            ScopeKey::Window(window) => {
                self.windows.insert(window, scope);
            }
        }
        tracing::debug!(scope = %key, "scope activated");
    }

    /// Remove a scope and detach its listener; no-op for an absent scope
    fn deactivate(&mut self, key: ScopeKey, ops: &mut Vec<HostOp>) -> bool {
        let scope = match key {
            ScopeKey::Global => self.global.take(),
            ScopeKey::Window(window) => self.windows.remove(&window),
        };
        let Some(scope) = scope else {
            return false;
        };
        for window in scope.into_detached() {
            self.release(window, ops);
        }
        tracing::debug!(scope = %key, "scope torn down");
        true
    }
}

struct Inner {
    host: Rc<dyn WindowHost>,
    sink: Rc<dyn DiagnosticSink>,
    config: ShortcutConfig,
    platform: Platform,
    registry: RefCell<Registry>,
}

/// Registry of window-scoped and global shortcuts
///
/// A cheap, clonable handle: clones share the same registry, so callbacks
/// can capture a clone and call back into it while being dispatched. No
/// internal borrow is held while callbacks or host hooks run.
#[derive(Clone)]
pub struct ShortcutManager {
    inner: Rc<Inner>,
}

/// Builder for [`ShortcutManager`]
pub struct ShortcutManagerBuilder {
    host: Rc<dyn WindowHost>,
    sink: Rc<dyn DiagnosticSink>,
    config: ShortcutConfig,
}

impl ShortcutManagerBuilder {
    pub fn config(mut self, config: ShortcutConfig) -> Self {
        self.config = config;
        self
    }

    pub fn sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn build(self) -> ShortcutManager {
        let platform = self.config.platform();
        ShortcutManager {
            inner: Rc::new(Inner {
                host: self.host,
                sink: self.sink,
                config: self.config,
                platform,
                registry: RefCell::new(Registry::default()),
            }),
        }
    }
}

impl ShortcutManager {
    /// Manager with default configuration, logging diagnostics via `tracing`
    pub fn new(host: Rc<dyn WindowHost>) -> Self {
        Self::builder(host).build()
    }

    pub fn builder(host: Rc<dyn WindowHost>) -> ShortcutManagerBuilder {
        ShortcutManagerBuilder {
            host,
            sink: Rc::new(TracingSink),
            config: ShortcutConfig::default(),
        }
    }

    pub fn platform(&self) -> Platform {
        self.inner.platform
    }

    pub fn config(&self) -> &ShortcutConfig {
        &self.inner.config
    }

    /// Bind each accelerator to `callback` in `scope`
    ///
    /// The scope is created on its first binding, attaching its listener.
    /// Registering the same accelerator and callback twice yields two
    /// bindings that both fire.
    pub fn register(
        &self,
        scope: impl Into<ScopeKey>,
        accelerators: impl Into<Accelerators>,
        callback: &Callback,
    ) -> Result<(), ShortcutError> {
        let scope = scope.into();
        if let ScopeKey::Window(window) = scope {
            if self.inner.host.is_destroyed(window) {
                return Err(ShortcutError::WindowDestroyed(window));
            }
        }

        for accelerator in accelerators.into().iter() {
            let chord = self.parse(accelerator);
            let targets = if self.has_scope(scope) {
                Vec::new()
            } else {
                self.listener_targets(scope)
            };

            let mut ops = Vec::new();
            {
                let mut registry = self.inner.registry.borrow_mut();
                if registry.scope(scope).is_none() {
                    registry.activate(scope, targets, &mut ops);
                }
                if let Some(active) = registry.scope_mut(scope) {
                    tracing::debug!(scope = %scope, chord = %chord, "registering shortcut");
                    active.push(Binding::new(chord, callback.clone()));
                }
            }
            self.apply(ops);
        }
        Ok(())
    }

    /// Remove bindings whose chord matches, optionally only those for `callback`
    ///
    /// The scope is torn down once it has no bindings left. Targeting a
    /// destroyed window does nothing.
    pub fn unregister(
        &self,
        scope: impl Into<ScopeKey>,
        accelerators: impl Into<Accelerators>,
        callback: Option<&Callback>,
    ) {
        let scope = scope.into();
        if let ScopeKey::Window(window) = scope {
            if self.inner.host.is_destroyed(window) {
                tracing::trace!(scope = %scope, "unregister on destroyed window ignored");
                return;
            }
        }

        for accelerator in accelerators.into().iter() {
            let chord = self.parse(accelerator);

            let mut ops = Vec::new();
            {
                let mut registry = self.inner.registry.borrow_mut();
                let Some(active) = registry.scope_mut(scope) else {
                    continue;
                };
                let removed = active.remove_matching(&chord, callback, self.inner.platform);
                tracing::debug!(scope = %scope, chord = %chord, removed, "unregistered shortcut");
                if active.is_empty() {
                    registry.deactivate(scope, &mut ops);
                }
            }
            self.apply(ops);
        }
    }

    /// Remove every binding of `scope` and tear it down
    pub fn unregister_all(&self, scope: impl Into<ScopeKey>) {
        let scope = scope.into();
        let mut ops = Vec::new();
        self.inner
            .registry
            .borrow_mut()
            .deactivate(scope, &mut ops);
        self.apply(ops);
    }

    /// Re-enable every binding of `scope`
    pub fn enable_all(&self, scope: impl Into<ScopeKey>) {
        self.set_enabled(scope.into(), true);
    }

    /// Disable every binding of `scope`; bindings and listeners stay in place
    pub fn disable_all(&self, scope: impl Into<ScopeKey>) {
        self.set_enabled(scope.into(), false);
    }

    fn set_enabled(&self, scope: ScopeKey, enabled: bool) {
        let mut registry = self.inner.registry.borrow_mut();
        if let Some(active) = registry.scope_mut(scope) {
            active.set_enabled(enabled);
            tracing::debug!(scope = %scope, enabled, "toggled bindings");
        }
    }

    /// Whether any binding in `scope` matches the accelerator
    pub fn is_registered(&self, scope: impl Into<ScopeKey>, accelerator: &str) -> bool {
        let chord = self.parse(accelerator);
        self.inner
            .registry
            .borrow()
            .scope(scope.into())
            .is_some_and(|active| active.has_chord(&chord, self.inner.platform))
    }

    /// Host notification: a window was opened
    ///
    /// An active global scope starts listening to it.
    pub fn window_created(&self, window: WindowKey) {
        let mut ops = Vec::new();
        {
            let mut registry = self.inner.registry.borrow_mut();
            let attached = match registry.global.as_mut() {
                Some(global) if global.listener().follows_new_windows() => {
                    global.listener_mut().attach(window)
                }
                _ => false,
            };
            if attached {
                registry.retain(window, &mut ops);
                tracing::debug!(window = %window, "global shortcuts attached to new window");
            }
        }
        self.apply(ops);
    }

    /// Host notification: a window was closed
    ///
    /// Tears down the window's scope and detaches the global listener from it.
    pub fn window_closed(&self, window: WindowKey) {
        let mut ops = Vec::new();
        {
            let mut registry = self.inner.registry.borrow_mut();
            registry.deactivate(ScopeKey::Window(window), &mut ops);
            let detached = registry
                .global
                .as_mut()
                .is_some_and(|global| global.listener_mut().detach_window(window));
            if detached {
                registry.release(window, &mut ops);
            }
        }
        self.apply(ops);
    }

    /// Dispatch a raw event received from `window`
    ///
    /// Key-up events are dropped. Bindings are snapshotted before any
    /// callback runs: the window's scope first, then the global scope if
    /// it listens to this window. Returns the number of callbacks invoked.
    pub fn handle_event(&self, window: WindowKey, event: &RawKeyEvent) -> usize {
        if event.is_key_up() {
            return 0;
        }
        let Some(chord) = normalize(event) else {
            tracing::trace!(window = %window, "ignoring event without key");
            return 0;
        };

        let snapshot = self.snapshot_for(window);
        let mut invoked = 0;
        for binding in snapshot
            .iter()
            .filter(|binding| binding.fires_on(&chord, self.inner.platform))
        {
            invoke(binding);
            invoked += 1;
        }

        tracing::trace!(window = %window, chord = %chord, invoked, "dispatched key event");
        invoked
    }

    fn snapshot_for(&self, window: WindowKey) -> Vec<Binding> {
        let registry = self.inner.registry.borrow();
        let mut snapshot = registry
            .windows
            .get(&window)
            .map(Scope::snapshot)
            .unwrap_or_default();
        if let Some(global) = &registry.global {
            if global.listener().is_attached(window) {
                snapshot.extend(global.snapshot());
            }
        }
        snapshot
    }

    /// Whether `scope` is active
    pub fn has_scope(&self, scope: impl Into<ScopeKey>) -> bool {
        self.inner.registry.borrow().scope(scope.into()).is_some()
    }

    /// Number of active scopes, global included
    pub fn scope_count(&self) -> usize {
        let registry = self.inner.registry.borrow();
        registry.windows.len() + usize::from(registry.global.is_some())
    }

    /// Number of bindings in `scope` (0 when absent)
    pub fn binding_count(&self, scope: impl Into<ScopeKey>) -> usize {
        self.inner
            .registry
            .borrow()
            .scope(scope.into())
            .map_or(0, Scope::len)
    }

    /// Windows the scope's listener is attached to
    pub fn attached_windows(&self, scope: impl Into<ScopeKey>) -> Vec<WindowKey> {
        self.inner
            .registry
            .borrow()
            .scope(scope.into())
            .map(|active| active.listener().windows().collect())
            .unwrap_or_default()
    }

    /// Parse an accelerator, reporting it to the sink if malformed
    fn parse(&self, accelerator: &str) -> KeyChord {
        let parsed = parse_accelerator(accelerator);
        if let Some(error) = parsed.error {
            if self.inner.config.report_invalid_accelerators {
                let diagnostic =
                    Diagnostic::capture(accelerator, error, self.inner.config.capture_backtraces);
                self.inner.sink.report(&diagnostic);
            }
        }
        parsed.chord
    }

    fn listener_targets(&self, scope: ScopeKey) -> Vec<WindowKey> {
        match scope {
            ScopeKey::Global => self
                .inner
                .host
                .open_windows()
                .into_iter()
                .filter(|window| !self.inner.host.is_destroyed(*window))
                .collect(),
            ScopeKey::Window(window) => vec![window],
        }
    }

    fn apply(&self, ops: Vec<HostOp>) {
        for op in ops {
            match op {
                HostOp::Attach(window) => self.inner.host.attach(window),
                HostOp::Detach(window) => self.inner.host.detach(window),
            }
        }
    }
}

/// Run one callback, containing any panic it raises
fn invoke(binding: &Binding) {
    let result = panic::catch_unwind(AssertUnwindSafe(|| binding.callback.call()));
    if let Err(payload) = result {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        tracing::error!(chord = %binding.chord, "shortcut callback panicked: {}", message);
    }
}
