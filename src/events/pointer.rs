use super::EventListener;
use crate::input::{self, PointerCell};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer over the whole window. Only wired on fine-pointer
/// devices; the canvas itself never receives pointer events.
pub fn wire_pointermove(
    window: &web::Window,
    canvas: &web::HtmlCanvasElement,
    pointer: PointerCell,
) -> anyhow::Result<EventListener> {
    let canvas = canvas.clone();
    EventListener::new(window, "pointermove", move |ev: web::Event| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let rect = canvas.get_bounding_client_rect();
        let pos = input::client_to_canvas_px(
            Vec2::new(ev.client_x() as f32, ev.client_y() as f32),
            (
                rect.left() as f32,
                rect.top() as f32,
                rect.width() as f32,
                rect.height() as f32,
            ),
            Vec2::new(canvas.width() as f32, canvas.height() as f32),
        );
        pointer.set(pos.x, pos.y);
    })
}
