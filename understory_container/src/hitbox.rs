// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hitboxes: the "did this press land on me?" capability an element may hold.
//!
//! ## Overview
//!
//! During a mouse press the container walks elements front to back and asks
//! each element's [`Hitbox`] whether it was [activated](Hitbox::activated).
//! The first hitbox that answers `true` wins: it receives
//! [`when_clicked`](Hitbox::when_clicked), and no further hitbox is queried for
//! that dispatch. When the same button is later released, the winner receives
//! exactly one [`when_released`](Hitbox::when_released), wherever the pointer
//! has moved in the meantime.
//!
//! The container never assumes any geometry. Kurbo's [`Rect`], [`Circle`] and
//! [`RoundedRect`] implement [`Hitbox`] by point containment, and
//! [`ShapeHitbox`] wraps any [`Shape`] with click and release callbacks.
//!
//! ```
//! use kurbo::Rect;
//! use understory_container::hitbox::Hitbox;
//! use understory_container::{MouseButton, MouseEvent};
//!
//! let square = Rect::new(0.0, 0.0, 10.0, 10.0);
//! assert!(square.activated(&MouseEvent::new(MouseButton::Primary, 7.0, 7.0)));
//! assert!(!square.activated(&MouseEvent::new(MouseButton::Primary, 12.0, 7.0)));
//! ```

use alloc::boxed::Box;

use kurbo::{Circle, Rect, RoundedRect, Shape};

use crate::types::MouseEvent;

/// Hit-test capability attached to an element.
pub trait Hitbox {
    /// Returns true if `event` falls inside this hitbox.
    ///
    /// Only queried during press dispatch, and only until one hitbox wins.
    fn activated(&self, event: &MouseEvent) -> bool;

    /// Called once when a press resolves to this hitbox.
    fn when_clicked(&mut self, _event: &MouseEvent) {}

    /// Called once when the button that clicked this hitbox is released.
    fn when_released(&mut self, _event: &MouseEvent) {}
}

impl Hitbox for Rect {
    fn activated(&self, event: &MouseEvent) -> bool {
        self.contains(event.position)
    }
}

impl Hitbox for Circle {
    fn activated(&self, event: &MouseEvent) -> bool {
        Shape::contains(self, event.position)
    }
}

impl Hitbox for RoundedRect {
    fn activated(&self, event: &MouseEvent) -> bool {
        Shape::contains(self, event.position)
    }
}

type Callback = Box<dyn FnMut(&MouseEvent)>;

/// A hitbox over any Kurbo [`Shape`], with optional click and release callbacks.
///
/// ```
/// use core::cell::Cell;
/// use std::rc::Rc;
/// use kurbo::Circle;
/// use understory_container::hitbox::{Hitbox, ShapeHitbox};
/// use understory_container::{MouseButton, MouseEvent};
///
/// let clicks = Rc::new(Cell::new(0));
/// let seen = clicks.clone();
/// let mut knob = ShapeHitbox::new(Circle::new((50.0, 50.0), 8.0))
///     .on_click(move |_| seen.set(seen.get() + 1));
///
/// let ev = MouseEvent::new(MouseButton::Primary, 52.0, 49.0);
/// assert!(knob.activated(&ev));
/// knob.when_clicked(&ev);
/// assert_eq!(clicks.get(), 1);
/// ```
pub struct ShapeHitbox<T> {
    shape: T,
    on_click: Option<Callback>,
    on_release: Option<Callback>,
}

impl<T: Shape> ShapeHitbox<T> {
    /// Wrap `shape` with no callbacks.
    pub fn new(shape: T) -> Self {
        Self {
            shape,
            on_click: None,
            on_release: None,
        }
    }

    /// Set the callback run by [`Hitbox::when_clicked`].
    pub fn on_click(mut self, f: impl FnMut(&MouseEvent) + 'static) -> Self {
        self.on_click = Some(Box::new(f));
        self
    }

    /// Set the callback run by [`Hitbox::when_released`].
    pub fn on_release(mut self, f: impl FnMut(&MouseEvent) + 'static) -> Self {
        self.on_release = Some(Box::new(f));
        self
    }

    /// The wrapped shape.
    pub fn shape(&self) -> &T {
        &self.shape
    }

    /// Replace the wrapped shape, keeping callbacks. Useful for moving elements.
    pub fn set_shape(&mut self, shape: T) {
        self.shape = shape;
    }
}

impl<T: Shape> Hitbox for ShapeHitbox<T> {
    fn activated(&self, event: &MouseEvent) -> bool {
        self.shape.contains(event.position)
    }

    fn when_clicked(&mut self, event: &MouseEvent) {
        if let Some(f) = self.on_click.as_mut() {
            f(event);
        }
    }

    fn when_released(&mut self, event: &MouseEvent) {
        if let Some(f) = self.on_release.as_mut() {
            f(event);
        }
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for ShapeHitbox<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ShapeHitbox")
            .field("shape", &self.shape)
            .field("on_click", &self.on_click.is_some())
            .field("on_release", &self.on_release.is_some())
            .finish()
    }
}
