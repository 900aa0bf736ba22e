// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared pieces for the Understory demos.
//!
//! The demos have no window. [`Canvas`] records draw calls as text so each
//! frame can be printed, and [`Button`] is a small element that logs what
//! happens to it.
//!
//! Run the demos with, e.g.:
//! - `cargo run -p understory_demos --example container_basics`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use understory_container::hitbox::ShapeHitbox;
use understory_container::{Cx, Element, ElementNode, KeyEvent, MouseEvent, Propagation};

/// Send container and host logs to stderr.
pub fn init_logging(level: LevelFilter) {
    // A second init in the same process is harmless; keep the first logger.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}

/// A text surface: each draw call appends one line.
#[derive(Debug, Default)]
pub struct Canvas {
    lines: Vec<String>,
}

impl Canvas {
    /// Create an empty canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a filled rectangle.
    pub fn fill(&mut self, label: &str, rect: Rect) {
        self.lines.push(format!(
            "fill {label:<8} ({:>5.1}, {:>5.1}) .. ({:>5.1}, {:>5.1})",
            rect.x0, rect.y0, rect.x1, rect.y1
        ));
    }

    /// Record free-form text.
    pub fn text(&mut self, text: &str) {
        self.lines.push(format!("text {text}"));
    }

    /// Print and clear the recorded frame.
    pub fn present(&mut self, title: &str) {
        println!("-- {title} --");
        for line in self.lines.drain(..) {
            println!("  {line}");
        }
    }

    /// Lines recorded since the last present.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Shared list of events, printed by the demos after each step.
pub type Journal = Rc<RefCell<Vec<String>>>;

/// Create an empty journal.
pub fn journal() -> Journal {
    Rc::new(RefCell::new(Vec::new()))
}

/// Print and clear a journal.
pub fn flush(journal: &Journal, title: &str) {
    println!("== {title} ==");
    for line in journal.borrow_mut().drain(..) {
        println!("  {line}");
    }
}

/// A rectangular button that journals its hooks and hitbox callbacks.
#[derive(Debug)]
pub struct Button {
    label: &'static str,
    rect: Rect,
    journal: Journal,
    suppress: bool,
}

impl Button {
    /// Build a detached node for a button on `layer`, with a matching hitbox.
    pub fn node(
        label: &'static str,
        layer: i32,
        rect: Rect,
        journal: &Journal,
    ) -> ElementNode<Canvas> {
        Self::build(label, layer, rect, journal, false)
    }

    /// Like [`Button::node`], but the button hides presses from lower layers.
    pub fn opaque_node(
        label: &'static str,
        layer: i32,
        rect: Rect,
        journal: &Journal,
    ) -> ElementNode<Canvas> {
        Self::build(label, layer, rect, journal, true)
    }

    fn build(
        label: &'static str,
        layer: i32,
        rect: Rect,
        journal: &Journal,
        suppress: bool,
    ) -> ElementNode<Canvas> {
        let clicked = journal.clone();
        let released = journal.clone();
        let hitbox = ShapeHitbox::new(rect)
            .on_click(move |ev| {
                log::info!("{label}: hitbox clicked by {:?}", ev.button);
                clicked
                    .borrow_mut()
                    .push(format!("{label}: hitbox clicked at ({}, {})", ev.x(), ev.y()));
            })
            .on_release(move |ev| {
                log::info!("{label}: hitbox released by {:?}", ev.button);
                released
                    .borrow_mut()
                    .push(format!("{label}: hitbox released at ({}, {})", ev.x(), ev.y()));
            });
        ElementNode::new(
            layer,
            Self {
                label,
                rect,
                journal: journal.clone(),
                suppress,
            },
        )
        .with_hitbox(hitbox)
    }

    fn note(&self, what: String) {
        self.journal.borrow_mut().push(format!("{}: {what}", self.label));
    }
}

impl Element<Canvas> for Button {
    fn draw(&mut self, surface: &mut Canvas, _cx: &mut Cx<'_, Canvas>) {
        surface.fill(self.label, self.rect);
    }

    fn mouse_pressed(&mut self, event: &MouseEvent, _cx: &mut Cx<'_, Canvas>) -> Propagation {
        self.note(format!("{:?} pressed", event.button));
        if self.suppress {
            Propagation::SuppressLower
        } else {
            Propagation::Continue
        }
    }

    fn mouse_released(&mut self, event: &MouseEvent, _cx: &mut Cx<'_, Canvas>) {
        self.note(format!("{:?} released", event.button));
    }

    fn key_pressed(&mut self, event: &KeyEvent, _cx: &mut Cx<'_, Canvas>) -> Propagation {
        self.note(format!("key {} pressed", event.code.0));
        Propagation::Continue
    }

    fn key_released(&mut self, event: &KeyEvent, _cx: &mut Cx<'_, Canvas>) {
        self.note(format!("key {} released", event.code.0));
    }
}
