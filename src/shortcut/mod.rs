//! Scoped keyboard shortcut system
//!
//! This module binds accelerators to callbacks, either for one window or for
//! every window of the application:
//! - Parses accelerator strings such as `CmdOrCtrl+Shift+K`
//! - Normalizes raw key events from the host into chords
//! - Matches chords with platform modifier aliasing (Cmd/Super/Meta, Alt/Option)
//! - Manages scope lifecycles, attaching and detaching input listeners
//!
//! # Architecture
//!
//! ```text
//! RawKeyEvent → normalize() → KeyChord → ShortcutManager::handle_event() → callbacks
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let manager = ShortcutManager::new(host);
//! let save = Callback::new(|| println!("save"));
//! manager.register(window, "CmdOrCtrl+S", &save)?;
//! manager.register(ScopeKey::Global, ["F1", "Ctrl+H"], &help)?;
//!
//! // From the host's input handler
//! manager.handle_event(window, &raw_event);
//! ```

mod accelerator;
mod binding;
mod chord;
mod diagnostics;
mod event;
mod host;
mod manager;
mod scope;
mod winit_adapter;

pub use accelerator::{
    parse_accelerator, validate_accelerator, AcceleratorError, Accelerators, ParsedAccelerator,
};
pub use binding::{Binding, Callback};
pub use chord::{KeyChord, Modifiers, Platform};
pub use diagnostics::{Diagnostic, DiagnosticSink, RecordedDiagnostic, RecordingSink, TracingSink};
pub use event::{normalize, EventKind, RawKeyEvent};
pub use host::WindowHost;
pub use manager::{ShortcutError, ShortcutManager, ShortcutManagerBuilder};
pub use scope::{ScopeKey, WindowKey};
pub use winit_adapter::{raw_event_from_parts, raw_event_from_winit};
