//! Demo host: opens winit windows and wires them to a ShortcutManager
//!
//! Built-in bindings:
//! - `CmdOrCtrl+N` (global) opens another window
//! - `CmdOrCtrl+W` (per window) closes that window
//! - `CmdOrCtrl+D` (per window) toggles the global bindings

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

use anyhow::Result;
use clap::Parser;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::ModifiersState;
use winit::window::{Window, WindowId};

use localshortcut::cli::{BindScope, CliArgs};
use localshortcut::shortcut::raw_event_from_winit;
use localshortcut::{Callback, ScopeKey, ShortcutConfig, ShortcutManager, WindowHost, WindowKey};

/// Window table shared between the app and the shortcut manager
#[derive(Default)]
struct DemoHost {
    windows: RefCell<BTreeMap<WindowKey, Window>>,
    forwarding: RefCell<BTreeSet<WindowKey>>,
}

impl DemoHost {
    fn is_forwarding(&self, window: WindowKey) -> bool {
        self.forwarding.borrow().contains(&window)
    }

    fn is_empty(&self) -> bool {
        self.windows.borrow().is_empty()
    }
}

impl WindowHost for DemoHost {
    fn open_windows(&self) -> Vec<WindowKey> {
        self.windows.borrow().keys().copied().collect()
    }

    fn is_destroyed(&self, window: WindowKey) -> bool {
        !self.windows.borrow().contains_key(&window)
    }

    fn attach(&self, window: WindowKey) {
        tracing::debug!(window = %window, "forwarding input");
        self.forwarding.borrow_mut().insert(window);
    }

    fn detach(&self, window: WindowKey) {
        tracing::debug!(window = %window, "no longer forwarding input");
        self.forwarding.borrow_mut().remove(&window);
    }
}

/// Work requested by callbacks that needs the event loop
#[derive(Debug, Clone, Copy)]
enum DemoAction {
    OpenWindow,
    CloseWindow(WindowKey),
}

struct DemoApp {
    args: CliArgs,
    host: Rc<DemoHost>,
    manager: ShortcutManager,
    pending: Rc<RefCell<Vec<DemoAction>>>,
    modifiers: ModifiersState,
    opened: usize,
    started: bool,
}

impl DemoApp {
    fn new(args: CliArgs, config: ShortcutConfig) -> Self {
        let host = Rc::new(DemoHost::default());
        let manager = ShortcutManager::builder(host.clone()).config(config).build();
        Self {
            args,
            host,
            manager,
            pending: Rc::new(RefCell::new(Vec::new())),
            modifiers: ModifiersState::empty(),
            opened: 0,
            started: false,
        }
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Option<WindowKey> {
        self.opened += 1;
        let attributes = Window::default_attributes()
            .with_title(format!("localshortcut demo #{}", self.opened))
            .with_inner_size(LogicalSize::new(480.0, 320.0));

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(e) => {
                tracing::error!("Failed to create window: {}", e);
                return None;
            }
        };

        let key = WindowKey::from(window.id());
        self.host.windows.borrow_mut().insert(key, window);
        self.manager.window_created(key);
        self.bind_window_defaults(key);
        tracing::info!(window = %key, "opened window #{}", self.opened);
        Some(key)
    }

    fn close_window(&mut self, key: WindowKey) {
        if self.host.windows.borrow_mut().remove(&key).is_some() {
            self.manager.window_closed(key);
            tracing::info!(window = %key, "closed window");
        }
    }

    fn bind_window_defaults(&self, key: WindowKey) {
        let pending = Rc::clone(&self.pending);
        let close = Callback::new(move || pending.borrow_mut().push(DemoAction::CloseWindow(key)));

        let manager = self.manager.clone();
        let globals_enabled = Cell::new(true);
        let toggle = Callback::new(move || {
            let enabled = !globals_enabled.get();
            globals_enabled.set(enabled);
            if enabled {
                manager.enable_all(ScopeKey::Global);
            } else {
                manager.disable_all(ScopeKey::Global);
            }
            tracing::info!(enabled, "toggled global shortcuts");
        });

        for (accelerator, callback) in [("CmdOrCtrl+W", close), ("CmdOrCtrl+D", toggle)] {
            if let Err(e) = self.manager.register(key, accelerator, &callback) {
                tracing::warn!("{}", e);
            }
        }
    }

    fn bind_startup(&self, startup_windows: &[WindowKey]) {
        let pending = Rc::clone(&self.pending);
        let open = Callback::new(move || pending.borrow_mut().push(DemoAction::OpenWindow));
        if let Err(e) = self.manager.register(ScopeKey::Global, "CmdOrCtrl+N", &open) {
            tracing::warn!("{}", e);
        }

        for bind in &self.args.bindings {
            let scope = match bind.scope {
                BindScope::Global => ScopeKey::Global,
                BindScope::Window(n) => match startup_windows.get(n - 1) {
                    Some(key) => ScopeKey::Window(*key),
                    None => {
                        tracing::warn!("--bind {}: no window #{}", bind, n);
                        continue;
                    }
                },
            };

            let label = bind.to_string();
            let callback = Callback::new(move || tracing::info!("shortcut fired: {}", label));
            if let Err(e) = self.manager.register(scope, bind.accelerator.as_str(), &callback) {
                tracing::warn!("--bind {}: {}", bind, e);
            }
        }
    }

    fn run_pending(&mut self, event_loop: &ActiveEventLoop) {
        let actions: Vec<DemoAction> = self.pending.borrow_mut().drain(..).collect();
        for action in actions {
            match action {
                DemoAction::OpenWindow => {
                    self.open_window(event_loop);
                }
                DemoAction::CloseWindow(key) => self.close_window(key),
            }
        }
    }
}

impl ApplicationHandler for DemoApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.started {
            return;
        }
        self.started = true;

        let startup_windows: Vec<WindowKey> = (0..self.args.windows.max(1))
            .filter_map(|_| self.open_window(event_loop))
            .collect();
        self.bind_startup(&startup_windows);

        if self.host.is_empty() {
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let key = WindowKey::from(window_id);
        match event {
            WindowEvent::ModifiersChanged(mods) => self.modifiers = mods.state(),
            WindowEvent::KeyboardInput { event, .. } => {
                if self.host.is_forwarding(key) {
                    let raw = raw_event_from_winit(&event, self.modifiers);
                    self.manager.handle_event(key, &raw);
                }
            }
            WindowEvent::CloseRequested => self.close_window(key),
            _ => {}
        }

        self.run_pending(event_loop);
        if self.host.is_empty() {
            event_loop.exit();
        }
    }
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    localshortcut::tracing::init(&args.log_level);

    let config = match &args.config {
        Some(path) => ShortcutConfig::load(path)?,
        None => ShortcutConfig::load_default(),
    };
    tracing::debug!(?config, "starting demo");

    let event_loop = EventLoop::new()?;
    let mut app = DemoApp::new(args, config);
    event_loop.run_app(&mut app)?;
    Ok(())
}
