// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use glam::Vec2;
use input::*;

#[test]
fn pointer_cell_starts_empty() {
    let cell = PointerCell::new();
    assert_eq!(cell.get(), None);
}

#[test]
fn pointer_cell_keeps_last_write() {
    let cell = PointerCell::new();
    let writer = cell.clone();
    writer.set(10.0, 20.0);
    writer.set(30.0, 40.0);
    assert_eq!(cell.get(), Some(Vec2::new(30.0, 40.0)));
    assert_eq!(writer.get(), cell.get());
}

#[test]
fn pointer_cell_ignores_non_finite() {
    let cell = PointerCell::new();
    cell.set(5.0, 5.0);
    cell.set(f32::NAN, 1.0);
    cell.set(1.0, f32::INFINITY);
    assert_eq!(cell.get(), Some(Vec2::new(5.0, 5.0)));
}

#[test]
fn client_to_canvas_identity_for_full_viewport_canvas() {
    let p = client_to_canvas_px(
        Vec2::new(123.0, 456.0),
        (0.0, 0.0, 1280.0, 720.0),
        Vec2::new(1280.0, 720.0),
    );
    assert_eq!(p, Vec2::new(123.0, 456.0));
}

#[test]
fn client_to_canvas_scales_and_offsets() {
    // Canvas drawn at 400x300 CSS px from (100, 50) with an 800x600 store.
    let p = client_to_canvas_px(
        Vec2::new(300.0, 200.0),
        (100.0, 50.0, 400.0, 300.0),
        Vec2::new(800.0, 600.0),
    );
    assert_eq!(p, Vec2::new(400.0, 300.0));
}

#[test]
fn client_to_canvas_degenerate_rect() {
    let p = client_to_canvas_px(
        Vec2::new(15.0, 25.0),
        (5.0, 5.0, 0.0, 0.0),
        Vec2::new(800.0, 600.0),
    );
    assert_eq!(p, Vec2::new(10.0, 20.0));
}
