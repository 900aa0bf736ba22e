// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container implementation.
//!
//! ## Overview
//!
//! Owns elements, applies queued structural changes at sync points, and runs
//! the draw and input dispatch traversals.
//!
//! ## Sync points
//!
//! Queued additions are applied first, then queued removals, each in FIFO
//! order. A sync happens immediately before and immediately after the element
//! loop of [`Container::draw`] and of each `dispatch_*` entry point, so a
//! traversal never observes a half-applied change.
//!
//! ## Traversal order
//!
//! - Draw: ascending layer (back to front).
//! - Input: descending layer (front to back).
//! - Equal layers keep attachment order, reversed for input.
//!
//! ## Press dispatch
//!
//! - The container's own hook runs first and always runs.
//! - A hook returning [`Propagation::SuppressLower`] (or calling
//!   [`Cx::deny_components`]) skips every element after it for this dispatch.
//! - The first visited element whose hitbox is activated wins the hit; no other
//!   hitbox is queried for this dispatch.
//! - Every visited element records the input as held and gets its press hook.
//!
//! ## Release dispatch
//!
//! Visits every element. Hooks fire only where the released input was
//! recorded during an earlier press, independently for the hitbox and for the
//! element, and regardless of where the pointer is now.

use alloc::boxed::Box;

use hashbrown::HashSet;

use crate::cx::Cx;
use crate::element::{Element, ElementNode};
use crate::error::{AttachError, DetachError};
use crate::held::HeldInputs;
use crate::hitbox::Hitbox;
use crate::store::Store;
use crate::types::{
    ContainerId, ElementId, KeyCode, KeyEvent, MouseButton, MouseButtons, MouseEvent, Propagation,
};

/// Hooks a container runs for itself before visiting its elements.
///
/// Useful for backgrounds and for input handling that is not tied to any
/// element. The unit type implements every hook as a no-op.
#[allow(unused_variables, reason = "default hooks ignore their inputs")]
pub trait ContainerHooks<S: ?Sized> {
    /// Paint beneath every element.
    fn draw(&mut self, surface: &mut S, cx: &mut Cx<'_, S>) {}

    /// A mouse button went down. Returning `SuppressLower` skips all elements.
    fn mouse_pressed(&mut self, event: &MouseEvent, cx: &mut Cx<'_, S>) -> Propagation {
        Propagation::Continue
    }

    /// A mouse button was released.
    fn mouse_released(&mut self, event: &MouseEvent, cx: &mut Cx<'_, S>) {}

    /// A key went down. Returning `SuppressLower` skips all elements.
    fn key_pressed(&mut self, event: &KeyEvent, cx: &mut Cx<'_, S>) -> Propagation {
        Propagation::Continue
    }

    /// A key was released.
    fn key_released(&mut self, event: &KeyEvent, cx: &mut Cx<'_, S>) {}
}

impl<S: ?Sized> ContainerHooks<S> for () {}

/// Layered element container and dispatch engine.
///
/// ## Usage
///
/// - Build element nodes with [`ElementNode::new`], register and queue them
///   with [`Container::spawn`] (or [`Container::insert`] then
///   [`Container::add_element`]).
/// - Call [`Container::draw`] once per frame and forward input to the
///   `dispatch_*` methods.
/// - Detach with [`Container::remove_element`]; once detached, reclaim the
///   node with [`Container::take`] or attach it again.
///
/// `S` is the opaque rendering surface; `H` supplies the container's own hooks.
pub struct Container<S: ?Sized, H = ()> {
    store: Store<S>,
    held: HeldInputs,
    hooks: H,
}

impl<S: ?Sized, H> core::fmt::Debug for Container<S, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Container")
            .field("store", &self.store)
            .field("held", &self.held)
            .finish_non_exhaustive()
    }
}

impl<S: ?Sized> Container<S> {
    /// Create an empty container with no hooks of its own.
    pub fn new() -> Self {
        Self::with_hooks(())
    }
}

impl<S: ?Sized> Default for Container<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized, H> Container<S, H> {
    /// Create an empty container running `hooks` for itself.
    pub fn with_hooks(hooks: H) -> Self {
        Self {
            store: Store::new(ContainerId::next()),
            held: HeldInputs::new(),
            hooks,
        }
    }

    /// Identity of this container, as reported by attached elements' parent.
    pub fn id(&self) -> ContainerId {
        self.store.owner()
    }

    /// The container's own hooks.
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutable access to the container's own hooks.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Register a detached element. It is not drawn or dispatched to until attached.
    pub fn insert(&mut self, node: ElementNode<S>) -> ElementId {
        self.store.insert(node)
    }

    /// Queue `id` for attachment at the next sync point.
    ///
    /// Fails if the element already has a parent or is already queued.
    /// Validity is checked here only, not again at the sync point.
    pub fn add_element(&mut self, id: ElementId) -> Result<(), AttachError> {
        self.store.request_add(id)
    }

    /// Register `node` and queue it for attachment.
    pub fn spawn(&mut self, node: ElementNode<S>) -> ElementId {
        let id = self.store.insert(node);
        // A freshly inserted element is neither attached nor queued.
        let _ = self.store.request_add(id);
        id
    }

    /// Queue `id` for detachment at the next sync point.
    ///
    /// Fails unless the element is in the committed collection; an element
    /// still queued for attachment counts as absent. Requesting the same
    /// removal twice before a sync point is allowed and detaches once.
    pub fn remove_element(&mut self, id: ElementId) -> Result<(), DetachError> {
        self.store.request_remove(id)
    }

    /// Hand a detached element back to the caller, freeing its id.
    ///
    /// Returns `None` if `id` is stale, attached, or queued for attachment.
    pub fn take(&mut self, id: ElementId) -> Option<ElementNode<S>> {
        self.store.take(id)
    }

    /// Replace (or clear) the hitbox of `id`. Returns false if `id` is stale.
    pub fn set_hitbox(&mut self, id: ElementId, hitbox: Option<Box<dyn Hitbox>>) -> bool {
        match self.store.node_mut(id) {
            Some(node) => {
                node.set_hitbox(hitbox);
                true
            }
            None => false,
        }
    }

    /// Read an element registered with this container.
    pub fn element(&self, id: ElementId) -> Option<&ElementNode<S>> {
        self.store.node(id)
    }

    /// Mutable access to an element registered with this container.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementNode<S>> {
        self.store.node_mut(id)
    }

    /// Returns true if `id` is in the committed collection.
    pub fn is_attached(&self, id: ElementId) -> bool {
        self.store.node(id).is_some_and(ElementNode::is_attached)
    }

    /// Attached elements in draw order (ascending layer).
    pub fn elements(&self) -> impl DoubleEndedIterator<Item = ElementId> + '_ {
        self.store.order().iter().map(|e| e.id)
    }

    /// Number of attached elements.
    pub fn len(&self) -> usize {
        self.store.order().len()
    }

    /// Returns true if no element is attached.
    pub fn is_empty(&self) -> bool {
        self.store.order().is_empty()
    }

    /// Returns true if additions or removals are waiting for a sync point.
    pub fn has_pending(&self) -> bool {
        self.store.has_pending()
    }

    /// Apply queued additions and removals now.
    ///
    /// Every draw and dispatch already syncs before and after its traversal;
    /// call this to settle the collection outside of those, e.g. before
    /// inspecting it in a test.
    pub fn sync(&mut self) {
        let _ = self.store.sync();
    }

    /// Keys held at the container level.
    pub fn held_keys(&self) -> &HashSet<KeyCode> {
        self.held.keys()
    }

    /// Mouse buttons held at the container level.
    pub fn held_buttons(&self) -> MouseButtons {
        self.held.buttons()
    }

    /// Returns true if `code` is held at the container level.
    pub fn is_key_held(&self, code: KeyCode) -> bool {
        self.held.is_key_held(code)
    }

    /// Returns true if `button` is held at the container level.
    pub fn is_mouse_button_held(&self, button: MouseButton) -> bool {
        self.held.is_button_held(button)
    }

    /// Run one element hook with the element temporarily lifted out of its
    /// slot, so the hook can reach the rest of the container through `Cx`.
    ///
    /// Returns the hook's result and whether it called `deny_components`.
    fn run_element<R>(
        &mut self,
        id: ElementId,
        f: impl FnOnce(&mut dyn Element<S>, &mut Cx<'_, S>) -> R,
    ) -> Option<(R, bool)> {
        let mut element = self.store.node_mut(id)?.element.take()?;
        let mut cx = Cx::new(&mut self.store, &self.held, Some(id));
        let out = f(element.as_mut(), &mut cx);
        let denied = cx.suppressed();
        if let Some(node) = self.store.node_mut(id) {
            node.element = Some(element);
        }
        Some((out, denied))
    }
}

impl<S: ?Sized, H: ContainerHooks<S>> Container<S, H> {
    fn run_hooks<R>(&mut self, f: impl FnOnce(&mut H, &mut Cx<'_, S>) -> R) -> (R, bool) {
        let mut cx = Cx::new(&mut self.store, &self.held, None);
        let out = f(&mut self.hooks, &mut cx);
        (out, cx.suppressed())
    }

    /// Draw the container's own layer, then every element back to front.
    pub fn draw(&mut self, surface: &mut S) {
        self.sync();
        let _ = self.run_hooks(|hooks, cx| hooks.draw(surface, cx));
        for i in 0..self.store.order().len() {
            let id = self.store.order()[i].id;
            let _ = self.run_element(id, |element, cx| element.draw(surface, cx));
        }
        self.sync();
    }

    /// Deliver a mouse press front to back, resolving at most one hitbox.
    pub fn dispatch_mouse_press(&mut self, event: &MouseEvent) {
        self.sync();
        self.held.press_button(event.button);
        let (flow, denied) = self.run_hooks(|hooks, cx| hooks.mouse_pressed(event, cx));
        let mut suppressed = flow.is_suppress() || denied;
        let mut hit: Option<ElementId> = None;

        for i in (0..self.store.order().len()).rev() {
            if suppressed {
                break;
            }
            let id = self.store.order()[i].id;
            let Some(node) = self.store.node_mut(id) else {
                continue;
            };
            if hit.is_none()
                && let Some(hitbox) = node.hitbox.as_mut()
                && hitbox.activated(event)
            {
                hitbox.when_clicked(event);
                node.hitbox_buttons.insert(event.button.into());
                hit = Some(id);
            }
            node.held.press_button(event.button);
            if let Some((flow, denied)) =
                self.run_element(id, |element, cx| element.mouse_pressed(event, cx))
            {
                suppressed = flow.is_suppress() || denied;
                if suppressed {
                    log::trace!(
                        "container {}: {id:?} suppressed lower layers for {:?} press",
                        self.id(),
                        event.button
                    );
                }
            }
        }
        log::trace!(
            "container {}: {:?} press at {:?} hit {hit:?}",
            self.id(),
            event.button,
            event.position
        );
        self.sync();
    }

    /// Deliver a mouse release to every element that recorded the button.
    pub fn dispatch_mouse_release(&mut self, event: &MouseEvent) {
        self.sync();
        self.held.release_button(event.button);
        let _ = self.run_hooks(|hooks, cx| hooks.mouse_released(event, cx));

        let button: MouseButtons = event.button.into();
        for i in (0..self.store.order().len()).rev() {
            let id = self.store.order()[i].id;
            let Some(node) = self.store.node_mut(id) else {
                continue;
            };
            if node.hitbox_buttons.contains(button) {
                node.hitbox_buttons.remove(button);
                if let Some(hitbox) = node.hitbox.as_mut() {
                    hitbox.when_released(event);
                }
            }
            if node.held.release_button(event.button) {
                let _ = self.run_element(id, |element, cx| element.mouse_released(event, cx));
            }
        }
        self.sync();
    }

    /// Deliver a key press front to back.
    pub fn dispatch_key_press(&mut self, event: &KeyEvent) {
        self.sync();
        self.held.press_key(event.code);
        let (flow, denied) = self.run_hooks(|hooks, cx| hooks.key_pressed(event, cx));
        let mut suppressed = flow.is_suppress() || denied;

        for i in (0..self.store.order().len()).rev() {
            if suppressed {
                break;
            }
            let id = self.store.order()[i].id;
            let Some((flow, denied)) =
                self.run_element(id, |element, cx| element.key_pressed(event, cx))
            else {
                continue;
            };
            // Keys are recorded after the hook has seen the press.
            if let Some(node) = self.store.node_mut(id) {
                node.held.press_key(event.code);
            }
            suppressed = flow.is_suppress() || denied;
        }
        self.sync();
    }

    /// Deliver a key release to every element that recorded the key.
    pub fn dispatch_key_release(&mut self, event: &KeyEvent) {
        self.sync();
        self.held.release_key(event.code);
        let _ = self.run_hooks(|hooks, cx| hooks.key_released(event, cx));

        for i in (0..self.store.order().len()).rev() {
            let id = self.store.order()[i].id;
            let released = self
                .store
                .node_mut(id)
                .is_some_and(|node| node.held.release_key(event.code));
            if released {
                let _ = self.run_element(id, |element, cx| element.key_released(event, cx));
            }
        }
        self.sync();
    }
}
