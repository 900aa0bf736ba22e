// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use understory_container::{
    Container, Cx, Element, ElementNode, KeyCode, KeyEvent, MouseButton, MouseEvent,
};

/// Counts draw calls so the draw loop has observable work.
struct Tile;

impl Element<u64> for Tile {
    fn draw(&mut self, surface: &mut u64, _cx: &mut Cx<'_, u64>) {
        *surface += 1;
    }
}

/// `n * n` tiles of size `cell` on a grid, one layer per row.
fn grid(n: usize, cell: f64) -> Container<u64> {
    let mut c = Container::new();
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            c.spawn(
                ElementNode::new(y as i32, Tile)
                    .with_hitbox(Rect::new(x0, y0, x0 + cell, y0 + cell)),
            );
        }
    }
    c.sync();
    c
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_draw");
    for &n in &[10_usize, 32, 100] {
        let mut container = grid(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_{n}x{n}"), |b| {
            b.iter(|| {
                let mut drawn = 0_u64;
                container.draw(&mut drawn);
                black_box(drawn)
            });
        });
    }
    group.finish();
}

fn bench_mouse(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_mouse");
    for &n in &[10_usize, 32, 100] {
        let mut container = grid(n, 10.0);
        let extent = n as f64 * 10.0;
        group.throughput(Throughput::Elements((n * n) as u64));

        // The hit is in the top row, so nearly every hitbox is queried first.
        let low = MouseEvent::new(MouseButton::Primary, 5.0, 5.0);
        group.bench_function(format!("press_release_low_hit_{n}x{n}"), |b| {
            b.iter(|| {
                container.dispatch_mouse_press(black_box(&low));
                container.dispatch_mouse_release(black_box(&low));
            });
        });

        let high = MouseEvent::new(MouseButton::Primary, extent - 5.0, extent - 5.0);
        group.bench_function(format!("press_release_high_hit_{n}x{n}"), |b| {
            b.iter(|| {
                container.dispatch_mouse_press(black_box(&high));
                container.dispatch_mouse_release(black_box(&high));
            });
        });

        let miss = MouseEvent::new(MouseButton::Secondary, -1.0, -1.0);
        group.bench_function(format!("press_release_miss_{n}x{n}"), |b| {
            b.iter(|| {
                container.dispatch_mouse_press(black_box(&miss));
                container.dispatch_mouse_release(black_box(&miss));
            });
        });
    }
    group.finish();
}

fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_keys");
    let mut container = grid(32, 10.0);
    let key = KeyEvent::new(KeyCode(32));
    group.bench_function("press_release_32x32", |b| {
        b.iter(|| {
            container.dispatch_key_press(black_box(&key));
            container.dispatch_key_release(black_box(&key));
        });
    });
    group.finish();
}

fn bench_churn(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_churn");
    for &n in &[32_usize, 100] {
        group.bench_function(format!("detach_reattach_row_{n}x{n}"), |b| {
            b.iter_batched(
                || {
                    let container = grid(n, 10.0);
                    let row: Vec<_> = container.elements().skip(n * (n / 2)).take(n).collect();
                    (container, row)
                },
                |(mut container, row)| {
                    for &id in &row {
                        let _ = container.remove_element(id);
                    }
                    container.sync();
                    for &id in &row {
                        let _ = container.add_element(id);
                    }
                    container.sync();
                    black_box(container.len())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_draw, bench_mouse, bench_keys, bench_churn);
criterion_main!(benches);
