//! Core types for chord matching: Modifiers, Platform, KeyChord

use std::fmt;

use serde::{Deserialize, Serialize};

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0_0001);
    pub const SHIFT: Modifiers = Modifiers(0b0_0010);
    pub const ALT: Modifiers = Modifiers(0b0_0100);
    pub const META: Modifiers = Modifiers(0b0_1000); // Cmd on macOS, Super/Win elsewhere
    /// `CmdOrCtrl`: resolved against a [`Platform`] at comparison time
    pub const CMD_OR_CTRL: Modifiers = Modifiers(0b1_0000);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= Self::CTRL.0;
        }
        if shift {
            bits |= Self::SHIFT.0;
        }
        if alt {
            bits |= Self::ALT.0;
        }
        if meta {
            bits |= Self::META.0;
        }
        Modifiers(bits)
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & Self::CTRL.0 != 0
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & Self::SHIFT.0 != 0
    }

    /// Check if alt/option is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & Self::ALT.0 != 0
    }

    /// Check if meta (cmd/super/win) is held
    #[inline]
    pub const fn meta(self) -> bool {
        self.0 & Self::META.0 != 0
    }

    #[inline]
    pub const fn cmd_or_ctrl(self) -> bool {
        self.0 & Self::CMD_OR_CTRL.0 != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Check if this contains all modifiers in other
    #[inline]
    pub const fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Fold `CmdOrCtrl` into the concrete modifier used on `platform`
    pub const fn resolve(self, platform: Platform) -> Modifiers {
        if !self.cmd_or_ctrl() {
            return self;
        }
        let base = Modifiers(self.0 & !Self::CMD_OR_CTRL.0);
        base.union(platform.command_modifier())
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.cmd_or_ctrl() {
            parts.push("CmdOrCtrl");
        }
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.alt() {
            parts.push("Alt");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.meta() {
            parts.push("Meta");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// Platform whose modifier conventions drive chord equivalence
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    MacOS,
    Windows,
    Linux,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }

    /// The modifier `CmdOrCtrl` stands for (Cmd on macOS, Ctrl elsewhere)
    pub const fn command_modifier(self) -> Modifiers {
        match self {
            Platform::MacOS => Modifiers::META,
            Platform::Windows | Platform::Linux => Modifiers::CTRL,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Self::current()
    }
}

/// Canonical key combination used for all matching
///
/// The main key is carried as a physical `code` (W3C `KeyboardEvent.code`,
/// e.g. `KeyK`) and/or a logical `label` (W3C `KeyboardEvent.key`, stored
/// lowercase). At least one of the two is always present and non-empty.
///
/// `reported` records which modifier fields the source actually carried.
/// Chords built from accelerators report exactly the modifiers they name.
///
/// Compare chords with [`KeyChord::equivalent`]. The relation is reflexive
/// and symmetric but not transitive (a chord can share its code with one
/// chord and its label with another), so `KeyChord` is `PartialEq` only.
#[derive(Clone, Debug)]
pub struct KeyChord {
    code: Option<String>,
    label: Option<String>,
    mods: Modifiers,
    reported: Modifiers,
}

impl KeyChord {
    /// Build a chord, or `None` when neither a code nor a label is given
    pub fn new(
        code: Option<&str>,
        label: Option<&str>,
        mods: Modifiers,
        reported: Modifiers,
    ) -> Option<Self> {
        let code = code.filter(|c| !c.is_empty()).map(str::to_string);
        let label = label.filter(|l| !l.is_empty()).map(str::to_lowercase);
        if code.is_none() && label.is_none() {
            return None;
        }
        Some(Self {
            code,
            label,
            mods,
            reported: reported.union(mods),
        })
    }

    /// Chord for a logical label with the given modifiers, all reported
    pub fn labeled(label: &str, mods: Modifiers) -> Option<Self> {
        Self::new(None, Some(label), mods, mods)
    }

    /// The W3C `Unidentified` key, for accelerators that name no key
    pub fn unidentified(mods: Modifiers) -> Self {
        Self {
            code: None,
            label: Some("unidentified".to_string()),
            mods,
            reported: mods,
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn modifiers(&self) -> Modifiers {
        self.mods
    }

    /// Modifier fields present on the source of this chord
    pub fn reported(&self) -> Modifiers {
        self.reported
    }

    /// Whether both chords denote the same key, by label or by physical code
    pub fn same_key(&self, other: &KeyChord) -> bool {
        let labels = matches!(
            (&self.label, &other.label),
            (Some(a), Some(b)) if a == b
        );
        let codes = matches!(
            (&self.code, &other.code),
            (Some(a), Some(b)) if a.eq_ignore_ascii_case(b)
        );
        labels || codes
    }

    /// Chord equivalence with platform modifier aliasing
    ///
    /// An unreported modifier compares as not pressed.
    pub fn equivalent(&self, other: &KeyChord, platform: Platform) -> bool {
        self.same_key(other) && self.mods.resolve(platform) == other.mods.resolve(platform)
    }
}

impl PartialEq for KeyChord {
    fn eq(&self, other: &Self) -> bool {
        self.equivalent(other, Platform::current())
    }
}

impl fmt::Display for KeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+", self.mods)?;
        }
        match (&self.label, &self.code) {
            (Some(label), _) if label == " " => write!(f, "Space"),
            (Some(label), _) if label == "+" => write!(f, "Plus"),
            (Some(label), _) if label.chars().count() == 1 => write!(f, "{}", label.to_uppercase()),
            (_, Some(code)) => write!(f, "{}", code),
            (Some(label), None) => write!(f, "{}", label),
            (None, None) => Ok(()),
        }
    }
}
