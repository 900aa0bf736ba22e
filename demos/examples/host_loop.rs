// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host loop.
//!
//! A simulated event loop drives a [`Host`] with two panels. The clock jumps
//! irregularly; each tick draws at most once however many frames were due.
//! A key switches the displayed panel, and input only reaches that panel.
//!
//! Run:
//! - `cargo run -p understory_demos --example host_loop`

use core::time::Duration;

use kurbo::Rect;
use simplelog::LevelFilter;
use understory_container::{
    Container, ContainerHooks, Cx, KeyCode, KeyEvent, MouseButton, MouseEvent,
};
use understory_demos::{Button, Canvas, flush, init_logging, journal};
use understory_host::Host;

const TAB: KeyCode = KeyCode(9);

/// Paints a titled background under each screen.
struct Backdrop(&'static str);

impl ContainerHooks<Canvas> for Backdrop {
    fn draw(&mut self, surface: &mut Canvas, _cx: &mut Cx<'_, Canvas>) {
        surface.text(self.0);
    }
}

fn main() {
    init_logging(LevelFilter::Debug);
    let log = journal();

    let mut menu = Container::with_hooks(Backdrop("menu"));
    menu.spawn(Button::node("start", 1, Rect::new(10.0, 10.0, 90.0, 30.0), &log));
    let mut game = Container::with_hooks(Backdrop("game"));
    let board = game.id();
    game.spawn(Button::node("tile", 1, Rect::new(0.0, 0.0, 50.0, 50.0), &log));

    let mut host = Host::with_fps(30, Duration::ZERO);
    host.add_panel("menu", menu);
    host.add_panel("game", game);
    println!("board container lives in panel {:?}", host.locate(board));

    let mut canvas = Canvas::new();
    let script: [(u64, Option<&str>); 6] = [
        (20, None),
        (40, Some("click")),
        (140, None),
        (150, Some("tab")),
        (200, Some("click")),
        (205, None),
    ];
    for (at, action) in script {
        let now = Duration::from_millis(at);
        match action {
            Some("click") => {
                let ev = MouseEvent::new(MouseButton::Primary, 20.0, 20.0);
                host.mouse_pressed(&ev);
                host.mouse_released(&ev);
            }
            Some("tab") => {
                host.key_pressed(&KeyEvent::new(TAB));
                let next = match host.panels().current_id() {
                    Some("menu") => "game",
                    _ => "menu",
                };
                host.display(next).expect("both panels are registered");
                log::info!("switched to panel {next}");
                host.key_released(&KeyEvent::new(TAB));
            }
            _ => {}
        }
        let due = host.tick(now, &mut canvas);
        flush(&log, &format!("t={at}ms, {due} frame(s) due"));
        if due > 0 {
            canvas.present(host.panels().current_id().unwrap_or("-"));
        }
    }
}
