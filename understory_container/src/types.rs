// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: identifiers, input codes, events, and the propagation signal.
//!
//! ## Overview
//!
//! These types describe what flows into a [`Container`](crate::Container) and what its
//! hooks hand back. Concrete windowing layers translate their native events into
//! [`MouseEvent`] and [`KeyEvent`] before forwarding them.

use core::sync::atomic::{AtomicU32, Ordering};

use kurbo::Point;

/// Identifier for an element registered with a [`Container`](crate::Container).
///
/// A small, copyable handle consisting of the owning container, a slot index
/// and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On [`take`](crate::Container::take), the slot is freed; any existing `ElementId` for it is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `ElementId`.
///
/// Stale ids never alias a different live element because the generation must
/// match, and ids minted by one container are never valid in another.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId {
    pub(crate) owner: ContainerId,
    pub(crate) slot: u32,
    pub(crate) generation: u32,
}

impl ElementId {
    pub(crate) const fn new(owner: ContainerId, slot: u32, generation: u32) -> Self {
        Self {
            owner,
            slot,
            generation,
        }
    }

    pub(crate) const fn idx(self) -> usize {
        self.slot as usize
    }

    /// Container that minted this id.
    pub const fn owner(self) -> ContainerId {
        self.owner
    }
}

/// Identity of a container, unique for the lifetime of the process.
///
/// This is the value an element reports as its parent. It is a plain key,
/// never an owning reference.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ContainerId(u32);

static NEXT_CONTAINER: AtomicU32 = AtomicU32::new(1);

impl ContainerId {
    pub(crate) fn next() -> Self {
        Self(NEXT_CONTAINER.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw numeric value, for logging.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A physical mouse button.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MouseButton {
    /// Usually the left button.
    Primary,
    /// Usually the right button.
    Secondary,
    /// Usually the middle button or wheel press.
    Auxiliary,
    /// The "back" side button.
    Back,
    /// The "forward" side button.
    Forward,
}

bitflags::bitflags! {
    /// A set of [`MouseButton`]s, used to record which buttons are held.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct MouseButtons: u8 {
        /// [`MouseButton::Primary`].
        const PRIMARY   = 0b0000_0001;
        /// [`MouseButton::Secondary`].
        const SECONDARY = 0b0000_0010;
        /// [`MouseButton::Auxiliary`].
        const AUXILIARY = 0b0000_0100;
        /// [`MouseButton::Back`].
        const BACK      = 0b0000_1000;
        /// [`MouseButton::Forward`].
        const FORWARD   = 0b0001_0000;
    }
}

impl From<MouseButton> for MouseButtons {
    fn from(button: MouseButton) -> Self {
        match button {
            MouseButton::Primary => Self::PRIMARY,
            MouseButton::Secondary => Self::SECONDARY,
            MouseButton::Auxiliary => Self::AUXILIARY,
            MouseButton::Back => Self::BACK,
            MouseButton::Forward => Self::FORWARD,
        }
    }
}

impl MouseButtons {
    /// Returns true if `button` is a member of this set.
    pub fn has(self, button: MouseButton) -> bool {
        self.contains(button.into())
    }
}

/// A platform key code.
///
/// Values are opaque to the container; only equality matters.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u32);

/// A mouse press or release at a position in container space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MouseEvent {
    /// Button that changed state.
    pub button: MouseButton,
    /// Pointer position in container coordinates.
    pub position: Point,
}

impl MouseEvent {
    /// Create an event for `button` at `(x, y)`.
    pub fn new(button: MouseButton, x: f64, y: f64) -> Self {
        Self {
            button,
            position: Point::new(x, y),
        }
    }

    /// Horizontal pointer position.
    pub fn x(&self) -> f64 {
        self.position.x
    }

    /// Vertical pointer position.
    pub fn y(&self) -> f64 {
        self.position.y
    }
}

/// A key press or release.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyEvent {
    /// Key that changed state.
    pub code: KeyCode,
}

impl KeyEvent {
    /// Create an event for `code`.
    pub const fn new(code: KeyCode) -> Self {
        Self { code }
    }
}

/// Signal returned from press hooks, controlling delivery to lower layers.
///
/// Only press dispatches honor this. Release dispatches always visit every
/// element, and the signal resets at the start of each press dispatch.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Propagation {
    /// Keep delivering to lower layers.
    #[default]
    Continue,
    /// Skip every element below this one for the rest of this dispatch.
    SuppressLower,
}

impl Propagation {
    /// Returns true for [`Propagation::SuppressLower`].
    pub fn is_suppress(self) -> bool {
        matches!(self, Self::SuppressLower)
    }
}
