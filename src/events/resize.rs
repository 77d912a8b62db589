use super::EventListener;
use crate::frame::FrameContext;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Rebuild the field for the new viewport on every window resize.
pub fn wire_resize(
    window: &web::Window,
    frame_ctx: Rc<RefCell<FrameContext>>,
) -> anyhow::Result<EventListener> {
    EventListener::new(window, "resize", move |_ev: web::Event| {
        match frame_ctx.try_borrow_mut() {
            Ok(mut ctx) => ctx.resize_to_viewport(),
            Err(_) => log::warn!("[resize] frame context busy; resize skipped"),
        }
    })
}
