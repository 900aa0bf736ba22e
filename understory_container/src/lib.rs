// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Container: layered elements with deferred mutation and ordered dispatch.
//!
//! A [`Container`] owns a set of elements, each on a fixed integer layer, and
//! drives them through drawing and input delivery.
//!
//! - Drawing visits elements in ascending layer order (back to front).
//! - Mouse and keyboard input visit them in descending layer order (front to back).
//! - Elements attached on the same layer keep their attachment order.
//!
//! ## Deferred mutation
//!
//! Adding or removing an element never changes the collection immediately.
//! Requests are queued and applied at a sync point, immediately before and
//! after each draw or dispatch traversal. Hooks may therefore add or remove
//! siblings (or themselves) through their [`Cx`] while the traversal is running.
//!
//! ## Hitboxes
//!
//! An element may carry a [`Hitbox`]. On a mouse press, the first element in
//! input order whose hitbox is activated wins the hit and receives
//! [`Hitbox::when_clicked`]; no lower hitbox is queried. The matching release
//! calls [`Hitbox::when_released`] wherever the pointer is by then.
//!
//! ## Press/release pairing
//!
//! Each element records which keys and buttons it saw go down. A release is
//! delivered only to elements that recorded the matching press, so release
//! hooks always pair with an earlier press hook.
//!
//! ## Suppression
//!
//! A press hook returning [`Propagation::SuppressLower`] skips every element
//! after it for that dispatch. Releases are never suppressed; elements that
//! missed the press simply have nothing to release.
//!
//! ## API overview
//!
//! - [`Container`]: element ownership, sync points, draw and dispatch.
//! - [`ContainerHooks`]: the container's own hooks, run before any element.
//! - [`Element`]: element behavior; every hook defaults to a no-op.
//! - [`ElementNode`]: behavior plus layer, hitbox, parent, and held-input state.
//! - [`Cx`]: what a hook may see and request.
//! - [`ElementId`] / [`ContainerId`]: handles.
//!
//! # Example
//!
//! ```rust
//! use understory_container::{
//!     Container, Cx, Element, ElementNode, MouseButton, MouseEvent,
//! };
//! use kurbo::Rect;
//!
//! struct Swatch(&'static str);
//!
//! impl Element<Vec<&'static str>> for Swatch {
//!     fn draw(&mut self, surface: &mut Vec<&'static str>, _cx: &mut Cx<'_, Vec<&'static str>>) {
//!         surface.push(self.0);
//!     }
//! }
//!
//! let mut container: Container<Vec<&'static str>> = Container::new();
//! let a = container
//!     .spawn(ElementNode::new(1, Swatch("a")).with_hitbox(Rect::new(0.0, 0.0, 10.0, 10.0)));
//! let b = container
//!     .spawn(ElementNode::new(5, Swatch("b")).with_hitbox(Rect::new(5.0, 5.0, 15.0, 15.0)));
//!
//! let mut frame = Vec::new();
//! container.draw(&mut frame);
//! assert_eq!(frame, ["a", "b"]);
//!
//! // Both hitboxes contain (7, 7); the higher layer wins.
//! container.dispatch_mouse_press(&MouseEvent::new(MouseButton::Primary, 7.0, 7.0));
//! assert!(container.element(b).unwrap().is_hitbox_held(MouseButton::Primary));
//! assert!(!container.element(a).unwrap().is_hitbox_held(MouseButton::Primary));
//!
//! container.dispatch_mouse_release(&MouseEvent::new(MouseButton::Primary, 7.0, 7.0));
//! assert!(container.element(b).unwrap().hitbox_buttons().is_empty());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod container;
pub mod cx;
pub mod element;
pub mod error;
pub mod held;
pub mod hitbox;
pub mod types;

mod store;

pub use container::{Container, ContainerHooks};
pub use cx::Cx;
pub use element::{Element, ElementNode};
pub use error::{AttachError, DetachError};
pub use hitbox::Hitbox;
pub use types::{
    ContainerId, ElementId, KeyCode, KeyEvent, MouseButton, MouseButtons, MouseEvent, Propagation,
};
