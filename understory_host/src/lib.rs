// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory Host: the outer loop around Understory containers.
//!
//! - [`FramePacer`]: turns a caller-supplied monotonic clock into a count of
//!   due frames at a fixed rate.
//! - [`Panel`]: anything that can be drawn and fed input. Every
//!   [`Container`](understory_container::Container) is one.
//! - [`MultiPanel`]: named panels with exactly one on display.
//! - [`Host`]: a `MultiPanel` plus a `FramePacer`; draws on due frames and
//!   forwards input to the displayed panel.
//!
//! Nothing here reads a clock or opens a window. A windowing layer supplies
//! time and translated input events, and passes its surface to [`Host::tick`].
//!
//! # Example
//!
//! ```rust
//! use core::time::Duration;
//! use understory_container::{Container, Cx, Element, ElementNode};
//! use understory_host::Host;
//!
//! struct Title;
//!
//! impl Element<String> for Title {
//!     fn draw(&mut self, surface: &mut String, _cx: &mut Cx<'_, String>) {
//!         surface.push_str("title;");
//!     }
//! }
//!
//! let mut menu: Container<String> = Container::new();
//! menu.spawn(ElementNode::new(0, Title));
//!
//! let mut host = Host::new(Duration::ZERO);
//! host.add_panel("menu", menu);
//!
//! let mut surface = String::new();
//! assert_eq!(host.tick(Duration::from_millis(5), &mut surface), 0);
//! assert_eq!(host.tick(Duration::from_millis(20), &mut surface), 1);
//! assert_eq!(surface, "title;");
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod host;
pub mod pacer;
pub mod panels;

pub use host::Host;
pub use pacer::{DEFAULT_FPS, FramePacer};
pub use panels::{MultiPanel, Panel, PanelError};
