//! Accelerator string parsing
//!
//! Turns strings like `"CmdOrCtrl+Shift+K"` into a [`KeyChord`]. Parsing is
//! best-effort: a malformed accelerator still yields a chord, together with
//! the [`AcceleratorError`] describing what was wrong with it.

use thiserror::Error;

use super::chord::{KeyChord, Modifiers};

/// Separator between accelerator tokens
const SEPARATOR: char = '+';

/// Reasons an accelerator string does not match the grammar
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AcceleratorError {
    #[error("accelerator is empty")]
    Empty,
    #[error("accelerator '{0}' has no key, only modifiers")]
    MissingKey(String),
    #[error("accelerator '{0}' names more than one key")]
    MultipleKeys(String),
    #[error("accelerator '{accelerator}' contains an empty token")]
    EmptyToken { accelerator: String },
    #[error("unknown key '{token}' in accelerator '{accelerator}'")]
    UnknownKey { token: String, accelerator: String },
}

/// Outcome of a best-effort parse
#[derive(Debug, Clone)]
pub struct ParsedAccelerator {
    pub chord: KeyChord,
    /// First grammar violation found, if any
    pub error: Option<AcceleratorError>,
}

impl ParsedAccelerator {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Strict view: the chord only if the accelerator was well-formed
    pub fn into_result(self) -> Result<KeyChord, AcceleratorError> {
        match self.error {
            None => Ok(self.chord),
            Some(err) => Err(err),
        }
    }
}

/// Parse an accelerator, always producing a chord
///
/// Recovery rules for malformed input:
/// - unknown key tokens become a logical label
/// - when several keys are named, the last one wins
/// - with no key at all, the last modifier is treated as the key
/// - an empty accelerator yields the `Unidentified` key
pub fn parse_accelerator(accelerator: &str) -> ParsedAccelerator {
    if accelerator.trim().is_empty() {
        return ParsedAccelerator {
            chord: KeyChord::unidentified(Modifiers::NONE),
            error: Some(AcceleratorError::Empty),
        };
    }

    let mut error = None;
    let mut mods = Modifiers::NONE;
    let mut last_modifier = None;
    let mut key: Option<KeySpec> = None;

    for part in accelerator.split(SEPARATOR) {
        let token = part.trim().to_lowercase();
        if token.is_empty() {
            error.get_or_insert(AcceleratorError::EmptyToken {
                accelerator: accelerator.to_string(),
            });
            continue;
        }

        if let Some((modifier, name)) = parse_modifier(&token) {
            mods |= modifier;
            last_modifier = Some(name);
            continue;
        }

        let spec = parse_key(&token).unwrap_or_else(|| {
            error.get_or_insert(AcceleratorError::UnknownKey {
                token: part.trim().to_string(),
                accelerator: accelerator.to_string(),
            });
            KeySpec {
                code: None,
                label: Some(token.clone()),
            }
        });

        if key.is_some() {
            error.get_or_insert(AcceleratorError::MultipleKeys(accelerator.to_string()));
        }
        key = Some(spec);
    }

    let chord = match key {
        Some(spec) => KeyChord::new(spec.code.as_deref(), spec.label.as_deref(), mods, mods),
        None => {
            error.get_or_insert(AcceleratorError::MissingKey(accelerator.to_string()));
            match last_modifier {
                Some(name) => KeyChord::labeled(name, mods),
                None => Some(KeyChord::unidentified(mods)),
            }
        }
    };

    ParsedAccelerator {
        chord: chord.unwrap_or_else(|| KeyChord::unidentified(mods)),
        error,
    }
}

/// One or more accelerator strings, applied in order by registry operations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accelerators(Vec<String>);

impl Accelerators {
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Collect the string elements of a dynamic sequence, skipping the rest
    pub fn from_values<'a>(values: impl IntoIterator<Item = &'a serde_yaml::Value>) -> Self {
        Self(
            values
                .into_iter()
                .filter_map(|value| match value.as_str() {
                    Some(s) => Some(s.to_string()),
                    None => {
                        tracing::trace!(?value, "skipping non-string accelerator");
                        None
                    }
                })
                .collect(),
        )
    }
}

impl From<&str> for Accelerators {
    fn from(accelerator: &str) -> Self {
        Self(vec![accelerator.to_string()])
    }
}

impl From<String> for Accelerators {
    fn from(accelerator: String) -> Self {
        Self(vec![accelerator])
    }
}

impl From<&String> for Accelerators {
    fn from(accelerator: &String) -> Self {
        Self(vec![accelerator.clone()])
    }
}

impl From<&[&str]> for Accelerators {
    fn from(accelerators: &[&str]) -> Self {
        Self(accelerators.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Accelerators {
    fn from(accelerators: [&str; N]) -> Self {
        Self(accelerators.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<&str>> for Accelerators {
    fn from(accelerators: Vec<&str>) -> Self {
        Self(accelerators.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Accelerators {
    fn from(accelerators: Vec<String>) -> Self {
        Self(accelerators)
    }
}

/// A YAML string is one accelerator; a sequence contributes its string
/// elements; anything else contributes nothing.
impl From<&serde_yaml::Value> for Accelerators {
    fn from(value: &serde_yaml::Value) -> Self {
        match value {
            serde_yaml::Value::String(s) => Self::from(s),
            serde_yaml::Value::Sequence(items) => Self::from_values(items),
            other => {
                tracing::trace!(value = ?other, "accelerator value is neither string nor sequence");
                Self::default()
            }
        }
    }
}

/// Check an accelerator against the grammar without keeping the chord
pub fn validate_accelerator(accelerator: &str) -> Result<(), AcceleratorError> {
    parse_accelerator(accelerator).into_result().map(|_| ())
}

/// Modifier alias table, returning the modifier and the W3C key label of the
/// modifier key itself
fn parse_modifier(token: &str) -> Option<(Modifiers, &'static str)> {
    match token {
        "ctrl" | "control" => Some((Modifiers::CTRL, "control")),
        "alt" | "option" | "altgr" => Some((Modifiers::ALT, "alt")),
        "shift" => Some((Modifiers::SHIFT, "shift")),
        "meta" | "cmd" | "command" | "super" => Some((Modifiers::META, "meta")),
        "cmdorctrl" | "commandorcontrol" => Some((Modifiers::CMD_OR_CTRL, "control")),
        _ => None,
    }
}

/// Physical code and logical label a key token stands for
#[derive(Debug, Clone, PartialEq, Eq)]
struct KeySpec {
    code: Option<String>,
    label: Option<String>,
}

impl KeySpec {
    fn named(code: &str, label: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            label: Some(label.to_string()),
        }
    }

    fn code_only(code: &str) -> Self {
        Self {
            code: Some(code.to_string()),
            label: None,
        }
    }

    fn label_only(label: &str) -> Self {
        Self {
            code: None,
            label: Some(label.to_string()),
        }
    }
}

/// Parse a (lowercased) terminal key token
fn parse_key(token: &str) -> Option<KeySpec> {
    let mut chars = token.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return parse_char_key(c);
    }

    if let Some(spec) = parse_function_key(token) {
        return Some(spec);
    }

    let spec = match token {
        "plus" => KeySpec::label_only("+"),
        "space" => KeySpec::named("Space", " "),
        "tab" => KeySpec::named("Tab", "tab"),
        "backspace" => KeySpec::named("Backspace", "backspace"),
        "delete" => KeySpec::named("Delete", "delete"),
        "insert" => KeySpec::named("Insert", "insert"),
        "return" | "enter" => KeySpec::named("Enter", "enter"),
        "escape" | "esc" => KeySpec::named("Escape", "escape"),

        "up" => KeySpec::named("ArrowUp", "arrowup"),
        "down" => KeySpec::named("ArrowDown", "arrowdown"),
        "left" => KeySpec::named("ArrowLeft", "arrowleft"),
        "right" => KeySpec::named("ArrowRight", "arrowright"),

        "home" => KeySpec::named("Home", "home"),
        "end" => KeySpec::named("End", "end"),
        "pageup" => KeySpec::named("PageUp", "pageup"),
        "pagedown" => KeySpec::named("PageDown", "pagedown"),

        "capslock" => KeySpec::named("CapsLock", "capslock"),
        "numlock" => KeySpec::named("NumLock", "numlock"),
        "scrolllock" => KeySpec::named("ScrollLock", "scrolllock"),
        "printscreen" => KeySpec::named("PrintScreen", "printscreen"),

        "volumeup" => KeySpec::named("AudioVolumeUp", "audiovolumeup"),
        "volumedown" => KeySpec::named("AudioVolumeDown", "audiovolumedown"),
        "volumemute" => KeySpec::named("AudioVolumeMute", "audiovolumemute"),
        "medianexttrack" => KeySpec::named("MediaTrackNext", "mediatracknext"),
        "mediaprevioustrack" => KeySpec::named("MediaTrackPrevious", "mediatrackprevious"),
        "mediastop" => KeySpec::named("MediaStop", "mediastop"),
        "mediaplaypause" => KeySpec::named("MediaPlayPause", "mediaplaypause"),

        // Numpad keys only match physically; their labels collide with the
        // main row digits
        "num0" => KeySpec::code_only("Numpad0"),
        "num1" => KeySpec::code_only("Numpad1"),
        "num2" => KeySpec::code_only("Numpad2"),
        "num3" => KeySpec::code_only("Numpad3"),
        "num4" => KeySpec::code_only("Numpad4"),
        "num5" => KeySpec::code_only("Numpad5"),
        "num6" => KeySpec::code_only("Numpad6"),
        "num7" => KeySpec::code_only("Numpad7"),
        "num8" => KeySpec::code_only("Numpad8"),
        "num9" => KeySpec::code_only("Numpad9"),
        "numdec" => KeySpec::code_only("NumpadDecimal"),
        "numadd" => KeySpec::code_only("NumpadAdd"),
        "numsub" => KeySpec::code_only("NumpadSubtract"),
        "nummult" => KeySpec::code_only("NumpadMultiply"),
        "numdiv" => KeySpec::code_only("NumpadDivide"),

        _ => return None,
    };
    Some(spec)
}

/// F1-F24
fn parse_function_key(token: &str) -> Option<KeySpec> {
    let n: u8 = token.strip_prefix('f')?.parse().ok()?;
    if !(1..=24).contains(&n) {
        return None;
    }
    Some(KeySpec::named(&format!("F{}", n), token))
}

/// Single-character key, with its US-layout physical code where one exists
fn parse_char_key(c: char) -> Option<KeySpec> {
    if c.is_whitespace() || c.is_control() {
        return None;
    }

    let code = match c {
        'a'..='z' => Some(format!("Key{}", c.to_ascii_uppercase())),
        '0'..='9' => Some(format!("Digit{}", c)),
        '-' => Some("Minus".to_string()),
        '=' => Some("Equal".to_string()),
        '[' => Some("BracketLeft".to_string()),
        ']' => Some("BracketRight".to_string()),
        '\\' => Some("Backslash".to_string()),
        ';' => Some("Semicolon".to_string()),
        '\'' => Some("Quote".to_string()),
        ',' => Some("Comma".to_string()),
        '.' => Some("Period".to_string()),
        '/' => Some("Slash".to_string()),
        '`' => Some("Backquote".to_string()),
        _ => None,
    };

    Some(KeySpec {
        code,
        label: Some(c.to_string()),
    })
}
