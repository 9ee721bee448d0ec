//! Adapter to convert winit keyboard input into raw shortcut events

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{Key, ModifiersState, NamedKey, PhysicalKey};
use winit::window::WindowId;

use super::event::{EventKind, RawKeyEvent};
use super::scope::WindowKey;

impl From<WindowId> for WindowKey {
    fn from(id: WindowId) -> Self {
        WindowKey::new(u64::from(id))
    }
}

/// Convert a winit key event to a raw event, reporting every modifier
pub fn raw_event_from_winit(event: &KeyEvent, modifiers: ModifiersState) -> RawKeyEvent {
    raw_event_from_parts(
        event.state,
        &event.logical_key,
        event.physical_key,
        modifiers,
    )
}

/// Convert the pieces of a winit key event to a raw event
///
/// winit's `KeyCode` and `NamedKey` variants follow the W3C names, so their
/// `Debug` form is used as the code and label.
pub fn raw_event_from_parts(
    state: ElementState,
    logical_key: &Key,
    physical_key: PhysicalKey,
    modifiers: ModifiersState,
) -> RawKeyEvent {
    let kind = match state {
        ElementState::Pressed => EventKind::KeyDown,
        ElementState::Released => EventKind::KeyUp,
    };

    let code = match physical_key {
        PhysicalKey::Code(code) => format!("{:?}", code),
        PhysicalKey::Unidentified(_) => String::new(),
    };

    let key = match logical_key {
        Key::Character(s) => s.to_string(),
        Key::Named(NamedKey::Space) => " ".to_string(),
        Key::Named(named) => format!("{:?}", named),
        Key::Unidentified(_) | Key::Dead(_) => String::new(),
    };

    RawKeyEvent {
        kind,
        code,
        key,
        alt: Some(modifiers.alt_key()),
        shift: Some(modifiers.shift_key()),
        meta: Some(modifiers.super_key()),
        control: Some(modifiers.control_key()),
    }
}
