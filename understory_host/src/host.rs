// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The top-level driver: one displayed panel, one frame pacer.

use alloc::boxed::Box;
use alloc::string::String;
use core::time::Duration;

use understory_container::{ContainerId, KeyEvent, MouseEvent};

use crate::pacer::{DEFAULT_FPS, FramePacer};
use crate::panels::{MultiPanel, Panel, PanelError};

/// Owns the panels of an application and paces their drawing.
///
/// A windowing layer forwards its input events here and calls
/// [`Host::tick`] from its event loop with the current monotonic time.
pub struct Host<S: ?Sized> {
    panels: MultiPanel<S>,
    pacer: FramePacer,
}

impl<S: ?Sized> core::fmt::Debug for Host<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Host")
            .field("panels", &self.panels)
            .field("pacer", &self.pacer)
            .finish()
    }
}

impl<S: ?Sized> Host<S> {
    /// Create a host with no panels, pacing at 60 fps from `now`.
    pub fn new(now: Duration) -> Self {
        Self::with_fps(DEFAULT_FPS, now)
    }

    /// Create a host with no panels, pacing at `fps` from `now`.
    pub fn with_fps(fps: u32, now: Duration) -> Self {
        let mut pacer = FramePacer::new(fps);
        pacer.set_active(true, now);
        Self {
            panels: MultiPanel::new(),
            pacer,
        }
    }

    /// Register a top-level panel. The first one added is displayed.
    pub fn add_panel(
        &mut self,
        id: impl Into<String>,
        panel: impl Panel<S> + 'static,
    ) -> Option<Box<dyn Panel<S>>> {
        self.panels.add(id, panel)
    }

    /// Switch the displayed panel.
    pub fn display(&mut self, id: &str) -> Result<(), PanelError> {
        self.panels.display(id)
    }

    /// The panel switcher.
    pub fn panels(&self) -> &MultiPanel<S> {
        &self.panels
    }

    /// Mutable access to the panel switcher.
    pub fn panels_mut(&mut self) -> &mut MultiPanel<S> {
        &mut self.panels
    }

    /// The frame pacer.
    pub fn pacer(&self) -> &FramePacer {
        &self.pacer
    }

    /// Mutable access to the frame pacer, e.g. to pause or change the rate.
    pub fn pacer_mut(&mut self) -> &mut FramePacer {
        &mut self.pacer
    }

    /// Advance the clock to `now`.
    ///
    /// If any frames became due, draws the displayed panel once and returns
    /// how many were due. Returns 0 without drawing otherwise.
    pub fn tick(&mut self, now: Duration, surface: &mut S) -> u64 {
        let due = self.pacer.frames_due(now);
        if due > 0 {
            self.panels.draw(surface);
        }
        due
    }

    /// Draw the displayed panel now, outside the pacer's schedule.
    pub fn redraw(&mut self, surface: &mut S) {
        self.panels.draw(surface);
    }

    /// Forward a mouse press to the displayed panel.
    pub fn mouse_pressed(&mut self, event: &MouseEvent) {
        self.panels.mouse_pressed(event);
    }

    /// Forward a mouse release to the displayed panel.
    pub fn mouse_released(&mut self, event: &MouseEvent) {
        self.panels.mouse_released(event);
    }

    /// Forward a key press to the displayed panel.
    pub fn key_pressed(&mut self, event: &KeyEvent) {
        self.panels.key_pressed(event);
    }

    /// Forward a key release to the displayed panel.
    pub fn key_released(&mut self, event: &KeyEvent) {
        self.panels.key_released(event);
    }

    /// Name of the top-level panel hosting the container `id`, if any.
    pub fn locate(&self, id: ContainerId) -> Option<&str> {
        self.panels.locate(id)
    }
}
