use anyhow::anyhow;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub mod pointer;
pub mod resize;

pub use pointer::wire_pointermove;
pub use resize::wire_resize;

/// A registered DOM listener. Dropping it removes the listener with the same
/// callback it was added with, then frees the closure.
pub struct EventListener {
    target: web::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web::Event)>,
}

impl EventListener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<Self> {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("add {} listener: {:?}", event, e))?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        let cb: &js_sys::Function = self.callback.as_ref().unchecked_ref();
        if let Err(e) = self.target.remove_event_listener_with_callback(self.event, cb) {
            log::warn!("[events] failed to remove {} listener: {:?}", self.event, e);
        }
    }
}
