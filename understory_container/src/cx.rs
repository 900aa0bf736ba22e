// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hook context: what an element or container hook may see and request.
//!
//! ## Overview
//!
//! A [`Cx`] is created for each hook call. Structural requests made through it
//! (attach, detach) are queued and take effect at the container's next sync
//! point, so a hook can add or remove siblings, or itself, without disturbing
//! the traversal that is calling it.
//!
//! Read access covers any element of the container and the container's own
//! held-input state. The element whose hook is running can still be read
//! (layer, held state, hitbox) through [`Cx::element`].

use alloc::boxed::Box;

use hashbrown::HashSet;

use crate::element::ElementNode;
use crate::error::{AttachError, DetachError};
use crate::held::HeldInputs;
use crate::hitbox::Hitbox;
use crate::store::Store;
use crate::types::{ContainerId, ElementId, KeyCode, MouseButton, MouseButtons};

/// Context handed to every [`Element`](crate::Element) and
/// [`ContainerHooks`](crate::ContainerHooks) call.
pub struct Cx<'a, S: ?Sized> {
    store: &'a mut Store<S>,
    held: &'a HeldInputs,
    current: Option<ElementId>,
    suppress: bool,
}

impl<S: ?Sized> core::fmt::Debug for Cx<'_, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cx")
            .field("container", &self.store.owner())
            .field("current", &self.current)
            .field("suppress", &self.suppress)
            .finish_non_exhaustive()
    }
}

impl<'a, S: ?Sized> Cx<'a, S> {
    pub(crate) fn new(
        store: &'a mut Store<S>,
        held: &'a HeldInputs,
        current: Option<ElementId>,
    ) -> Self {
        Self {
            store,
            held,
            current,
            suppress: false,
        }
    }

    pub(crate) fn suppressed(&self) -> bool {
        self.suppress
    }

    /// The container running this hook.
    pub fn container_id(&self) -> ContainerId {
        self.store.owner()
    }

    /// The element whose hook is running, or `None` inside a container hook.
    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    /// Read an element of this container.
    pub fn element(&self, id: ElementId) -> Option<&ElementNode<S>> {
        self.store.node(id)
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

    /// Register a detached element with this container.
    pub fn insert(&mut self, node: ElementNode<S>) -> ElementId {
        self.store.insert(node)
    }

    /// Queue `id` for attachment at the next sync point.
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
    pub fn remove_element(&mut self, id: ElementId) -> Result<(), DetachError> {
        self.store.request_remove(id)
    }

    /// Queue the current element for detachment.
    ///
    /// Inside a container hook there is no current element and this reports
    /// [`DetachError::NotAttached`].
    pub fn remove_self(&mut self) -> Result<(), DetachError> {
        match self.current {
            Some(id) => self.store.request_remove(id),
            None => Err(DetachError::NotAttached),
        }
    }

    /// Replace (or clear) the hitbox of `id`. Returns false if `id` is stale.
    ///
    /// Takes effect immediately; within a press dispatch, elements not yet
    /// visited are tested against their current hitbox.
    pub fn set_hitbox(&mut self, id: ElementId, hitbox: Option<Box<dyn Hitbox>>) -> bool {
        match self.store.node_mut(id) {
            Some(node) => {
                node.set_hitbox(hitbox);
                true
            }
            None => false,
        }
    }

    /// Legacy "stop propagation": skip all lower layers for the rest of this press dispatch.
    ///
    /// Equivalent to returning [`Propagation::SuppressLower`](crate::Propagation::SuppressLower)
    /// from the press hook. Has no effect outside press hooks.
    pub fn deny_components(&mut self) {
        self.suppress = true;
    }
}
