//! Perception modes and the input mapping that switches between them.

use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::PerceptionField;

/// Number of selectable mode slots.
pub const NUM_SLOTS: usize = 10;

/// Identifier of a perception shape set.
///
/// Valid modes are 0 to 9. Mode 0 is the default every unknown mode falls
/// back to.
#[derive(
    Copy,
    Clone,
    Default,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Debug,
    Display,
    Serialize,
    Deserialize,
)]
#[serde(try_from = "u8", into = "u8")]
pub struct Mode(u8);

impl Mode {
    pub const DEFAULT: Mode = Mode(0);

    pub fn new(n: u8) -> Option<Mode> {
        ((n as usize) < NUM_SLOTS).then_some(Mode(n))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Mode {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Mode::new(value).ok_or_else(|| format!("invalid mode {value}"))
    }
}

impl From<Mode> for u8 {
    fn from(value: Mode) -> Self {
        value.0
    }
}

/// Translate a key name into a mode slot.
///
/// Both the number row (`"3"`) and the numpad (`"Num3"`) map to the same
/// slot.
pub fn slot_for_key(name: &str) -> Option<usize> {
    let digit = name.strip_prefix("Num").unwrap_or(name);
    match digit.as_bytes() {
        [c @ b'0'..=b'9'] => Some((c - b'0') as usize),
        _ => None,
    }
}

/// Maps mode slot input to perception field mode changes.
#[derive(Clone, Debug)]
pub struct ModeSelector {
    bindings: [Mode; NUM_SLOTS],
}

impl Default for ModeSelector {
    fn default() -> Self {
        let mut bindings = [Mode::DEFAULT; NUM_SLOTS];
        for (i, b) in bindings.iter_mut().enumerate() {
            *b = Mode(i as u8);
        }
        ModeSelector { bindings }
    }
}

impl ModeSelector {
    /// Rebind a slot to a different mode.
    pub fn bind(&mut self, slot: usize, mode: Mode) {
        if let Some(b) = self.bindings.get_mut(slot) {
            *b = mode;
        }
    }

    pub fn binding(&self, slot: usize) -> Option<Mode> {
        self.bindings.get(slot).copied()
    }

    /// Switch the field to a mode.
    ///
    /// Does nothing and returns false when the mode resolves to the one that
    /// is already active.
    pub fn select(&self, field: &mut PerceptionField, mode: Mode) -> bool {
        let mode = field.resolve(mode);
        if mode == field.mode() {
            return false;
        }
        field.set_mode(mode);
        true
    }

    /// Activate the mode bound to a slot.
    pub fn press(&self, field: &mut PerceptionField, slot: usize) -> bool {
        match self.binding(slot) {
            Some(mode) => self.select(field, mode),
            None => false,
        }
    }

    /// Handle a frame's worth of slot key states.
    ///
    /// When several slots are down at once the highest one wins.
    pub fn handle_slots(
        &self,
        field: &mut PerceptionField,
        pressed: [bool; NUM_SLOTS],
    ) -> bool {
        match pressed.iter().rposition(|&p| p) {
            Some(slot) => self.press(field, slot),
            None => false,
        }
    }

    /// Handle a named key press, ignores keys that aren't mode slots.
    pub fn handle_key(&self, field: &mut PerceptionField, key: &str) -> bool {
        match slot_for_key(key) {
            Some(slot) => self.press(field, slot),
            None => false,
        }
    }

    /// Step to the next configured mode, wrapping around at the end.
    pub fn next(&self, field: &mut PerceptionField) -> bool {
        let current = field.mode();
        let modes: Vec<Mode> = field.config().modes.keys().copied().collect();
        let Some(&first) = modes.first() else {
            return false;
        };
        let target =
            modes.iter().copied().find(|&m| m > current).unwrap_or(first);
        self.select(field, target)
    }

    /// Step to the previous configured mode, wrapping around at the start.
    pub fn previous(&self, field: &mut PerceptionField) -> bool {
        let current = field.mode();
        let modes: Vec<Mode> = field.config().modes.keys().copied().collect();
        let Some(&last) = modes.last() else {
            return false;
        };
        let target = modes
            .iter()
            .rev()
            .copied()
            .find(|&m| m < current)
            .unwrap_or(last);
        self.select(field, target)
    }
}
