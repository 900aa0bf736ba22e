// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Panels: top-level screens and a switcher that shows one at a time.
//!
//! ## Overview
//!
//! A [`Panel`] is anything a host can draw and feed input to. Every
//! [`Container`] is a panel. [`MultiPanel`] keeps several named panels and
//! forwards to the one on display; it is itself a panel, so switchers nest.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use thiserror::Error;
use understory_container::{Container, ContainerHooks, ContainerId, KeyEvent, MouseEvent};

/// Something a host can draw and route input to.
pub trait Panel<S: ?Sized> {
    /// Draw one frame.
    fn draw(&mut self, surface: &mut S);
    /// Forward a mouse press.
    fn mouse_pressed(&mut self, event: &MouseEvent);
    /// Forward a mouse release.
    fn mouse_released(&mut self, event: &MouseEvent);
    /// Forward a key press.
    fn key_pressed(&mut self, event: &KeyEvent);
    /// Forward a key release.
    fn key_released(&mut self, event: &KeyEvent);
    /// Returns true if the container `id` is this panel or lives inside it.
    fn hosts(&self, id: ContainerId) -> bool;
}

impl<S: ?Sized, H: ContainerHooks<S>> Panel<S> for Container<S, H> {
    fn draw(&mut self, surface: &mut S) {
        Self::draw(self, surface);
    }

    fn mouse_pressed(&mut self, event: &MouseEvent) {
        self.dispatch_mouse_press(event);
    }

    fn mouse_released(&mut self, event: &MouseEvent) {
        self.dispatch_mouse_release(event);
    }

    fn key_pressed(&mut self, event: &KeyEvent) {
        self.dispatch_key_press(event);
    }

    fn key_released(&mut self, event: &KeyEvent) {
        self.dispatch_key_release(event);
    }

    fn hosts(&self, id: ContainerId) -> bool {
        self.id() == id
    }
}

/// Errors from [`MultiPanel`].
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PanelError {
    /// No panel is registered under this id.
    #[error("no panel named {0:?}")]
    Unknown(String),
}

/// Named panels, exactly one of which is on display once any exist.
pub struct MultiPanel<S: ?Sized> {
    panels: HashMap<String, Box<dyn Panel<S>>>,
    // Insertion order, for listing.
    ids: Vec<String>,
    current: Option<String>,
}

impl<S: ?Sized> core::fmt::Debug for MultiPanel<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MultiPanel")
            .field("ids", &self.ids)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl<S: ?Sized> Default for MultiPanel<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: ?Sized> MultiPanel<S> {
    /// Create an empty switcher.
    pub fn new() -> Self {
        Self {
            panels: HashMap::new(),
            ids: Vec::new(),
            current: None,
        }
    }

    /// Register `panel` under `id`.
    ///
    /// The first panel ever added goes on display. Adding under an existing
    /// id replaces that panel in place (keeping it on display if it was) and
    /// returns the previous one.
    pub fn add(
        &mut self,
        id: impl Into<String>,
        panel: impl Panel<S> + 'static,
    ) -> Option<Box<dyn Panel<S>>> {
        self.add_boxed(id, Box::new(panel))
    }

    /// Like [`MultiPanel::add`], for an already boxed panel.
    pub fn add_boxed(
        &mut self,
        id: impl Into<String>,
        panel: Box<dyn Panel<S>>,
    ) -> Option<Box<dyn Panel<S>>> {
        let id = id.into();
        let previous = self.panels.insert(id.clone(), panel);
        if previous.is_none() {
            self.ids.push(id.clone());
        }
        if self.current.is_none() {
            self.current = Some(id);
        }
        previous
    }

    /// Put the panel named `id` on display.
    pub fn display(&mut self, id: &str) -> Result<(), PanelError> {
        if !self.panels.contains_key(id) {
            log::debug!("multi panel: display({id:?}) ignored, unknown panel");
            return Err(PanelError::Unknown(id.into()));
        }
        self.current = Some(id.into());
        Ok(())
    }

    /// Id of the panel on display.
    pub fn current_id(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The panel on display.
    pub fn current(&self) -> Option<&dyn Panel<S>> {
        let id = self.current.as_deref()?;
        self.panels.get(id).map(|p| &**p)
    }

    /// Mutable access to the panel on display.
    pub fn current_mut(&mut self) -> Option<&mut (dyn Panel<S> + 'static)> {
        let id = self.current.as_deref()?;
        self.panels.get_mut(id).map(|p| &mut **p)
    }

    /// The panel named `id`.
    pub fn panel(&self, id: &str) -> Option<&dyn Panel<S>> {
        self.panels.get(id).map(|p| &**p)
    }

    /// Mutable access to the panel named `id`.
    pub fn panel_mut(&mut self, id: &str) -> Option<&mut (dyn Panel<S> + 'static)> {
        self.panels.get_mut(id).map(|p| &mut **p)
    }

    /// Panel ids in the order they were first added.
    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.ids.iter().map(String::as_str)
    }

    /// Number of panels.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Returns true if no panel was added.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Id of the panel that is, or contains, the container `id`.
    pub fn locate(&self, id: ContainerId) -> Option<&str> {
        self.ids()
            .find(|name| self.panels.get(*name).is_some_and(|p| p.hosts(id)))
    }
}

impl<S: ?Sized> Panel<S> for MultiPanel<S> {
    fn draw(&mut self, surface: &mut S) {
        if let Some(panel) = self.current_mut() {
            panel.draw(surface);
        }
    }

    fn mouse_pressed(&mut self, event: &MouseEvent) {
        if let Some(panel) = self.current_mut() {
            panel.mouse_pressed(event);
        }
    }

    fn mouse_released(&mut self, event: &MouseEvent) {
        if let Some(panel) = self.current_mut() {
            panel.mouse_released(event);
        }
    }

    fn key_pressed(&mut self, event: &KeyEvent) {
        if let Some(panel) = self.current_mut() {
            panel.key_pressed(event);
        }
    }

    fn key_released(&mut self, event: &KeyEvent) {
        if let Some(panel) = self.current_mut() {
            panel.key_released(event);
        }
    }

    fn hosts(&self, id: ContainerId) -> bool {
        self.locate(id).is_some()
    }
}
