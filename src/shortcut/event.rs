//! Raw input events from the host and their normalization into chords

use serde::{Deserialize, Serialize};

use super::chord::{KeyChord, Modifiers};

/// Kind of a raw input event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "keyDown")]
    KeyDown,
    #[serde(rename = "keyUp")]
    KeyUp,
    /// Anything else the host forwards (e.g. `char`, `rawKeyDown`)
    #[serde(other)]
    Other,
}

/// A keyboard event as delivered by the windowing host
///
/// Modifier fields are optional: a host that does not report a modifier
/// leaves it `None`, and the resulting chord records it as unreported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawKeyEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    /// Physical key (W3C `KeyboardEvent.code`, e.g. `KeyK`)
    #[serde(default)]
    pub code: String,
    /// Logical key (W3C `KeyboardEvent.key`, e.g. `k` or `ArrowUp`)
    #[serde(default)]
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<bool>,
}

impl RawKeyEvent {
    pub fn new(kind: EventKind, code: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            kind,
            code: code.into(),
            key: key.into(),
            alt: None,
            shift: None,
            meta: None,
            control: None,
        }
    }

    pub fn key_down(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(EventKind::KeyDown, code, key)
    }

    pub fn key_up(code: impl Into<String>, key: impl Into<String>) -> Self {
        Self::new(EventKind::KeyUp, code, key)
    }

    /// Report all four modifier fields from a modifier set
    pub fn with_modifiers(mut self, mods: Modifiers) -> Self {
        self.alt = Some(mods.alt());
        self.shift = Some(mods.shift());
        self.meta = Some(mods.meta());
        self.control = Some(mods.ctrl());
        self
    }

    pub fn with_alt(mut self, pressed: bool) -> Self {
        self.alt = Some(pressed);
        self
    }

    pub fn with_shift(mut self, pressed: bool) -> Self {
        self.shift = Some(pressed);
        self
    }

    pub fn with_meta(mut self, pressed: bool) -> Self {
        self.meta = Some(pressed);
        self
    }

    pub fn with_control(mut self, pressed: bool) -> Self {
        self.control = Some(pressed);
        self
    }

    /// Decode an event from the JSON shape used by web-based hosts
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn is_key_up(&self) -> bool {
        self.kind == EventKind::KeyUp
    }
}

/// Normalize a raw event into a chord
///
/// Only modifier fields present on the event are recorded as reported.
/// Returns `None` when the event carries neither a code nor a key label.
pub fn normalize(event: &RawKeyEvent) -> Option<KeyChord> {
    let flag = |field: Option<bool>, modifier: Modifiers| match field {
        Some(true) => (modifier, modifier),
        Some(false) => (Modifiers::NONE, modifier),
        None => (Modifiers::NONE, Modifiers::NONE),
    };

    let mut mods = Modifiers::NONE;
    let mut reported = Modifiers::NONE;
    for (field, modifier) in [
        (event.alt, Modifiers::ALT),
        (event.shift, Modifiers::SHIFT),
        (event.meta, Modifiers::META),
        (event.control, Modifiers::CTRL),
    ] {
        let (pressed, present) = flag(field, modifier);
        mods |= pressed;
        reported |= present;
    }

    KeyChord::new(Some(&event.code), Some(&event.key), mods, reported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcut::accelerator::parse_accelerator;
    use crate::shortcut::chord::Platform;

    #[test]
    fn test_normalize_reports_only_present_fields() {
        let event = RawKeyEvent::key_down("KeyK", "k").with_control(true);
        let chord = normalize(&event).expect("chord");

        assert_eq!(chord.modifiers(), Modifiers::CTRL);
        assert_eq!(chord.reported(), Modifiers::CTRL);
        assert_eq!(chord.code(), Some("KeyK"));
        assert_eq!(chord.label(), Some("k"));
    }

    #[test]
    fn test_normalize_false_modifier_is_reported() {
        let event = RawKeyEvent::key_down("KeyK", "k")
            .with_control(true)
            .with_shift(false);
        let chord = normalize(&event).expect("chord");

        assert!(!chord.modifiers().shift());
        assert!(chord.reported().shift());
        assert!(!chord.reported().alt());
    }

    #[test]
    fn test_normalize_empty_event() {
        let event = RawKeyEvent::key_down("", "");
        assert!(normalize(&event).is_none());
    }

    #[test]
    fn test_uppercase_label_matches_accelerator() {
        let event = RawKeyEvent::key_down("", "K").with_modifiers(Modifiers::CTRL);
        let chord = normalize(&event).expect("chord");
        let bound = parse_accelerator("Ctrl+K").chord;
        assert!(chord.equivalent(&bound, Platform::Linux));
    }

    #[test]
    fn test_shifted_digit_matches_by_code() {
        let event = RawKeyEvent::key_down("Digit1", "!").with_modifiers(Modifiers::SHIFT);
        let chord = normalize(&event).expect("chord");
        let bound = parse_accelerator("Shift+1").chord;
        assert!(chord.equivalent(&bound, Platform::Linux));
    }

    #[test]
    fn test_from_json() {
        let event = RawKeyEvent::from_json(
            r#"{"type":"keyDown","code":"KeyZ","key":"z","control":true,"shift":false}"#,
        )
        .expect("valid json");

        assert_eq!(event.kind, EventKind::KeyDown);
        assert_eq!(event.control, Some(true));
        assert_eq!(event.shift, Some(false));
        assert_eq!(event.alt, None);
    }

    #[test]
    fn test_unknown_event_type() {
        let event = RawKeyEvent::from_json(r#"{"type":"char","key":"a"}"#).expect("valid json");
        assert_eq!(event.kind, EventKind::Other);
        assert!(event.code.is_empty());
    }
}
