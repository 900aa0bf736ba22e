// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container basics.
//!
//! Two overlapping buttons on different layers. Drawing goes back to front,
//! the press resolves to the upper hitbox only, and the release pairs with it
//! even though the pointer has moved away.
//!
//! Run:
//! - `cargo run -p understory_demos --example container_basics`

use kurbo::Rect;
use simplelog::LevelFilter;
use understory_container::{Container, KeyCode, KeyEvent, MouseButton, MouseEvent};
use understory_demos::{Button, Canvas, flush, init_logging, journal};

fn main() {
    init_logging(LevelFilter::Trace);
    let log = journal();

    let mut container: Container<Canvas> = Container::new();
    container.spawn(Button::node("a", 1, Rect::new(0.0, 0.0, 10.0, 10.0), &log));
    container.spawn(Button::node("b", 5, Rect::new(5.0, 5.0, 15.0, 15.0), &log));
    container.spawn(Button::opaque_node(
        "modal",
        9,
        Rect::new(100.0, 100.0, 140.0, 120.0),
        &log,
    ));

    let mut canvas = Canvas::new();
    container.draw(&mut canvas);
    assert_eq!(canvas.lines().len(), 3, "one fill per attached button");
    log::info!("frame 1 recorded {} draw calls", canvas.lines().len());
    canvas.present("frame 1 (back to front)");

    // Press inside both a and b; the modal sits on top and hides the press.
    container.dispatch_mouse_press(&MouseEvent::new(MouseButton::Primary, 7.0, 7.0));
    flush(&log, "press at (7, 7) with an opaque modal on top");
    container.dispatch_mouse_release(&MouseEvent::new(MouseButton::Primary, 7.0, 7.0));
    flush(&log, "release: only the modal saw the press");

    let modal = container
        .elements()
        .next_back()
        .expect("modal is the topmost element");
    container.remove_element(modal).expect("modal is attached");
    log::info!("queued removal of the modal {modal:?}");

    container.dispatch_mouse_press(&MouseEvent::new(MouseButton::Primary, 7.0, 7.0));
    flush(&log, "press at (7, 7): b wins the hit, a still sees the press");
    container.dispatch_mouse_release(&MouseEvent::new(MouseButton::Primary, 300.0, 300.0));
    flush(&log, "release far away: pairs with the earlier press");

    container.dispatch_key_press(&KeyEvent::new(KeyCode(32)));
    container.dispatch_key_release(&KeyEvent::new(KeyCode(32)));
    flush(&log, "space");

    container.draw(&mut canvas);
    assert_eq!(canvas.lines().len(), 2, "the modal is gone");
    canvas.present("frame 2");
}
