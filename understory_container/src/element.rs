// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Elements: layered, interactive units owned by a container.
//!
//! ## Overview
//!
//! An element has two halves:
//!
//! - Behavior, an [`Element`] implementation whose hooks all default to no-ops.
//! - Bookkeeping, an [`ElementNode`] that wraps the behavior with its fixed
//!   layer, optional [`Hitbox`], parent container, and held-input state.
//!
//! Nodes are built detached. The container sets the parent and records held
//! input during dispatch; application code only reads those.
//!
//! ## Layers
//!
//! Lower layers draw first, higher layers receive input first. Equal layers
//! keep the order in which they were attached.

use alloc::boxed::Box;

use hashbrown::HashSet;

use crate::cx::Cx;
use crate::held::HeldInputs;
use crate::hitbox::Hitbox;
use crate::types::{ContainerId, KeyCode, KeyEvent, MouseButton, MouseButtons, MouseEvent, Propagation};

/// Hooks for an element's drawing and input behavior.
///
/// `S` is the rendering surface passed to [`draw`](Element::draw); the
/// container treats it as opaque.
///
/// Every hook receives a [`Cx`] through which the element can request
/// additions or removals of siblings. Those requests take effect at the
/// container's next sync point, never during the traversal that issued them.
#[allow(unused_variables, reason = "default hooks ignore their inputs")]
pub trait Element<S: ?Sized> {
    /// Paint this element.
    fn draw(&mut self, surface: &mut S, cx: &mut Cx<'_, S>) {}

    /// A mouse button went down and this element was not suppressed.
    fn mouse_pressed(&mut self, event: &MouseEvent, cx: &mut Cx<'_, S>) -> Propagation {
        Propagation::Continue
    }

    /// A mouse button this element saw go down was released.
    fn mouse_released(&mut self, event: &MouseEvent, cx: &mut Cx<'_, S>) {}

    /// A key went down and this element was not suppressed.
    fn key_pressed(&mut self, event: &KeyEvent, cx: &mut Cx<'_, S>) -> Propagation {
        Propagation::Continue
    }

    /// A key this element saw go down was released.
    fn key_released(&mut self, event: &KeyEvent, cx: &mut Cx<'_, S>) {}
}

/// A unit element with no behavior, useful as a pure hitbox carrier.
impl<S: ?Sized> Element<S> for () {}

/// An element together with its container-maintained state.
pub struct ElementNode<S: ?Sized> {
    layer: i32,
    pub(crate) parent: Option<ContainerId>,
    pub(crate) hitbox: Option<Box<dyn Hitbox>>,
    pub(crate) held: HeldInputs,
    pub(crate) hitbox_buttons: MouseButtons,
    // Vacant only while one of its own hooks is running.
    pub(crate) element: Option<Box<dyn Element<S>>>,
}

impl<S: ?Sized> ElementNode<S> {
    /// Build a detached node on `layer`.
    pub fn new(layer: i32, element: impl Element<S> + 'static) -> Self {
        Self::from_box(layer, Box::new(element))
    }

    /// Build a detached node on `layer` from an already boxed element.
    pub fn from_box(layer: i32, element: Box<dyn Element<S>>) -> Self {
        Self {
            layer,
            parent: None,
            hitbox: None,
            held: HeldInputs::new(),
            hitbox_buttons: MouseButtons::empty(),
            element: Some(element),
        }
    }

    /// Attach a hitbox while building.
    pub fn with_hitbox(mut self, hitbox: impl Hitbox + 'static) -> Self {
        self.hitbox = Some(Box::new(hitbox));
        self
    }

    /// Layer of this element. Fixed for its lifetime.
    pub fn layer(&self) -> i32 {
        self.layer
    }

    /// Container this element is attached to, if any.
    pub fn parent(&self) -> Option<ContainerId> {
        self.parent
    }

    /// Returns true if attached to a container.
    pub fn is_attached(&self) -> bool {
        self.parent.is_some()
    }

    /// The hitbox, if any.
    pub fn hitbox(&self) -> Option<&dyn Hitbox> {
        self.hitbox.as_deref()
    }

    /// Mutable access to the hitbox, if any.
    pub fn hitbox_mut(&mut self) -> Option<&mut (dyn Hitbox + 'static)> {
        self.hitbox.as_deref_mut()
    }

    /// Replace (or clear) the hitbox, returning the previous one.
    ///
    /// A button already recorded against the old hitbox still releases
    /// through whichever hitbox is installed at release time.
    pub fn set_hitbox(&mut self, hitbox: Option<Box<dyn Hitbox>>) -> Option<Box<dyn Hitbox>> {
        core::mem::replace(&mut self.hitbox, hitbox)
    }

    /// Keys this element has seen pressed and not yet released.
    pub fn held_keys(&self) -> &HashSet<KeyCode> {
        self.held.keys()
    }

    /// Mouse buttons this element has seen pressed and not yet released.
    pub fn held_buttons(&self) -> MouseButtons {
        self.held.buttons()
    }

    /// Mouse buttons that clicked this element's hitbox and are not yet released.
    pub fn hitbox_buttons(&self) -> MouseButtons {
        self.hitbox_buttons
    }

    /// Returns true if `code` is held from this element's point of view.
    pub fn is_key_held(&self, code: KeyCode) -> bool {
        self.held.is_key_held(code)
    }

    /// Returns true if `button` is held from this element's point of view.
    pub fn is_mouse_button_held(&self, button: MouseButton) -> bool {
        self.held.is_button_held(button)
    }

    /// Returns true if `button` clicked this element's hitbox and is still down.
    pub fn is_hitbox_held(&self, button: MouseButton) -> bool {
        self.hitbox_buttons.has(button)
    }
}

impl<S: ?Sized> core::fmt::Debug for ElementNode<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ElementNode")
            .field("layer", &self.layer)
            .field("parent", &self.parent)
            .field("has_hitbox", &self.hitbox.is_some())
            .field("held", &self.held)
            .field("hitbox_buttons", &self.hitbox_buttons)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;

    #[test]
    fn new_node_is_detached_and_idle() {
        let node: ElementNode<()> = ElementNode::new(3, ());
        assert_eq!(node.layer(), 3);
        assert!(!node.is_attached());
        assert!(node.hitbox().is_none());
        assert!(node.held_keys().is_empty());
        assert!(node.held_buttons().is_empty());
        assert!(node.hitbox_buttons().is_empty());
    }

    #[test]
    fn hitbox_can_be_replaced_and_cleared() {
        let mut node: ElementNode<()> =
            ElementNode::new(0, ()).with_hitbox(Rect::new(0.0, 0.0, 1.0, 1.0));
        let ev = MouseEvent::new(MouseButton::Primary, 0.5, 0.5);
        assert!(node.hitbox().is_some_and(|h| h.activated(&ev)));

        let old = node.set_hitbox(Some(Box::new(Rect::new(5.0, 5.0, 6.0, 6.0))));
        assert!(old.is_some());
        assert!(node.hitbox().is_some_and(|h| !h.activated(&ev)));

        let old = node.set_hitbox(None);
        assert!(old.is_some());
        assert!(node.hitbox().is_none());
    }
}
