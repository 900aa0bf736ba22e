// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred mutation.
//!
//! A launcher opens a popup from inside its own press hook. The popup is not
//! visited by the press that created it; it joins at the sync point after the
//! dispatch. The popup closes itself when released and the next press
//! reattaches the same element.
//!
//! Run:
//! - `cargo run -p understory_demos --example container_mutation`

use kurbo::Rect;
use simplelog::LevelFilter;
use understory_container::{
    Container, Cx, Element, ElementId, ElementNode, MouseButton, MouseEvent, Propagation,
};
use understory_demos::{Canvas, Journal, flush, init_logging, journal};

struct Launcher {
    journal: Journal,
    popup: Option<ElementId>,
}

impl Element<Canvas> for Launcher {
    fn draw(&mut self, surface: &mut Canvas, _cx: &mut Cx<'_, Canvas>) {
        surface.fill("launcher", Rect::new(0.0, 0.0, 40.0, 20.0));
    }

    fn mouse_pressed(&mut self, _event: &MouseEvent, cx: &mut Cx<'_, Canvas>) -> Propagation {
        match self.popup {
            Some(id) if cx.element(id).is_some_and(ElementNode::is_attached) => {}
            Some(id) => {
                let reopened = cx.add_element(id);
                self.journal
                    .borrow_mut()
                    .push(format!("launcher: reopening popup: {reopened:?}"));
            }
            None => {
                let id = cx.spawn(ElementNode::new(
                    10,
                    Popup {
                        journal: self.journal.clone(),
                    },
                ));
                self.journal
                    .borrow_mut()
                    .push(format!("launcher: queued popup {id:?}"));
                self.popup = Some(id);
            }
        }
        Propagation::Continue
    }
}

struct Popup {
    journal: Journal,
}

impl Element<Canvas> for Popup {
    fn draw(&mut self, surface: &mut Canvas, _cx: &mut Cx<'_, Canvas>) {
        surface.fill("popup", Rect::new(10.0, 10.0, 90.0, 60.0));
    }

    fn mouse_pressed(&mut self, _event: &MouseEvent, _cx: &mut Cx<'_, Canvas>) -> Propagation {
        self.journal.borrow_mut().push("popup: pressed".into());
        Propagation::Continue
    }

    fn mouse_released(&mut self, _event: &MouseEvent, cx: &mut Cx<'_, Canvas>) {
        let closed = cx.remove_self();
        log::info!("popup {:?} closing itself", cx.current());
        self.journal
            .borrow_mut()
            .push(format!("popup: released, closing: {closed:?}"));
    }
}

fn main() {
    init_logging(LevelFilter::Trace);
    let log = journal();

    let mut container: Container<Canvas> = Container::new();
    container.spawn(ElementNode::new(
        0,
        Launcher {
            journal: log.clone(),
            popup: None,
        },
    ));
    let click = MouseEvent::new(MouseButton::Primary, 5.0, 5.0);
    let mut canvas = Canvas::new();

    container.dispatch_mouse_press(&click);
    flush(&log, "first press");
    println!("attached after dispatch: {}", container.len());
    container.dispatch_mouse_release(&click);
    flush(&log, "first release: popup never saw the press");

    container.draw(&mut canvas);
    canvas.present("popup open");

    container.dispatch_mouse_press(&click);
    container.dispatch_mouse_release(&click);
    flush(&log, "second click");

    container.draw(&mut canvas);
    canvas.present("popup closed");

    // The closed popup stays registered and is reattached, not rebuilt.
    container.dispatch_mouse_press(&click);
    flush(&log, "third press");
    container.draw(&mut canvas);
    canvas.present("popup reopened");
}
