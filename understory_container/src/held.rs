// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Held-input tracking: which keys and mouse buttons are currently down.
//!
//! ## Usage
//!
//! A [`HeldInputs`] is kept by the container itself and by every element node.
//! Press dispatch records an input with [`HeldInputs::press_key`] /
//! [`HeldInputs::press_button`]; release dispatch clears it with the matching
//! `release_*` call, whose return value says whether the input was recorded.
//! That return value is what pairs each press hook with exactly one release hook.
//!
//! ```
//! use understory_container::held::HeldInputs;
//! use understory_container::{KeyCode, MouseButton};
//!
//! let mut held = HeldInputs::new();
//! held.press_key(KeyCode(32));
//! held.press_button(MouseButton::Primary);
//! assert!(held.is_key_held(KeyCode(32)));
//! assert!(held.release_key(KeyCode(32)));
//! // Second release finds nothing to pair with.
//! assert!(!held.release_key(KeyCode(32)));
//! assert!(held.release_button(MouseButton::Primary));
//! ```

use hashbrown::HashSet;

use crate::types::{KeyCode, MouseButton, MouseButtons};

/// Set of keys and mouse buttons currently held.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeldInputs {
    keys: HashSet<KeyCode>,
    buttons: MouseButtons,
}

impl HeldInputs {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `code` as held. Returns true if it was not held before.
    pub fn press_key(&mut self, code: KeyCode) -> bool {
        self.keys.insert(code)
    }

    /// Clear `code`. Returns true if it had been recorded as held.
    pub fn release_key(&mut self, code: KeyCode) -> bool {
        self.keys.remove(&code)
    }

    /// Record `button` as held. Returns true if it was not held before.
    pub fn press_button(&mut self, button: MouseButton) -> bool {
        let was = self.buttons.has(button);
        self.buttons.insert(button.into());
        !was
    }

    /// Clear `button`. Returns true if it had been recorded as held.
    pub fn release_button(&mut self, button: MouseButton) -> bool {
        let was = self.buttons.has(button);
        self.buttons.remove(button.into());
        was
    }

    /// Keys currently held.
    pub fn keys(&self) -> &HashSet<KeyCode> {
        &self.keys
    }

    /// Mouse buttons currently held.
    pub fn buttons(&self) -> MouseButtons {
        self.buttons
    }

    /// Returns true if `code` is held.
    pub fn is_key_held(&self, code: KeyCode) -> bool {
        self.keys.contains(&code)
    }

    /// Returns true if `button` is held.
    pub fn is_button_held(&self, button: MouseButton) -> bool {
        self.buttons.has(button)
    }

    /// Returns true if nothing is held.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.buttons.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_idempotent() {
        let mut h = HeldInputs::new();
        assert!(h.press_button(MouseButton::Secondary));
        assert!(!h.press_button(MouseButton::Secondary));
        assert!(h.press_key(KeyCode(65)));
        assert!(!h.press_key(KeyCode(65)));
        assert_eq!(h.keys().len(), 1);
        assert_eq!(h.buttons(), MouseButtons::SECONDARY);
    }

    #[test]
    fn release_reports_prior_state() {
        let mut h = HeldInputs::new();
        assert!(!h.release_button(MouseButton::Primary));
        h.press_button(MouseButton::Primary);
        h.press_button(MouseButton::Auxiliary);
        assert!(h.release_button(MouseButton::Primary));
        assert!(!h.is_button_held(MouseButton::Primary));
        assert!(h.is_button_held(MouseButton::Auxiliary));
        assert!(!h.is_empty());
        assert!(h.release_button(MouseButton::Auxiliary));
        assert!(h.is_empty());
    }

    #[test]
    fn keys_and_buttons_are_independent() {
        let mut h = HeldInputs::new();
        h.press_key(KeyCode(1));
        assert!(!h.release_button(MouseButton::Primary));
        assert!(h.is_key_held(KeyCode(1)));
        assert!(h.release_key(KeyCode(1)));
        assert!(h.is_empty());
    }
}
