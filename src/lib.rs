#![cfg(target_arch = "wasm32")]
use crate::core::{FieldConfig, FieldOptions, PointerCapability};
use crate::events::EventListener;
use crate::frame::{FrameContext, FrameLoop};
use crate::input::PointerCell;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod input;
mod render;
mod schedule;

/// Live pieces of a mounted background. Dropping it tears everything down:
/// the pending frame is cancelled first, then both listeners are removed.
struct Mounted {
    frame_loop: Rc<FrameLoop>,
    frame_ctx: Rc<RefCell<FrameContext>>,
    _resize: EventListener,
    _pointer: Option<EventListener>,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.frame_loop.cancel();
        log::info!(
            "[mount] unmounted after {} frames",
            self.frame_loop.frames()
        );
    }
}

fn mount(canvas: web::HtmlCanvasElement, options: &FieldOptions) -> anyhow::Result<Option<Mounted>> {
    let window = dom::window()?;
    let capability = PointerCapability::from_coarse_flag(dom::is_coarse_pointer(&window));
    let mut config = FieldConfig::for_capability(capability);
    config.apply(options);
    config.validate()?;

    let Some(ctx2d) = dom::context_2d(&canvas) else {
        log::warn!("[mount] no 2d context; particle background disabled");
        return Ok(None);
    };
    dom::apply_background_style(&canvas, config.canvas_opacity);

    let tracks_pointer = capability.tracks_pointer();
    let count = config.particle_count();
    let pointer = PointerCell::new();
    let frame_ctx = Rc::new(RefCell::new(FrameContext::new(
        window.clone(),
        canvas.clone(),
        ctx2d,
        config,
        pointer.clone(),
    )));

    let resize = events::wire_resize(&window, frame_ctx.clone())?;
    let pointer_listener = if tracks_pointer {
        Some(events::wire_pointermove(&window, &canvas, pointer)?)
    } else {
        None
    };
    let frame_loop = frame::start_loop(window, frame_ctx.clone());

    log::info!(
        "[mount] {} particles, pointer={:?}",
        count,
        capability
    );
    Ok(Some(Mounted {
        frame_loop,
        frame_ctx,
        _resize: resize,
        _pointer: pointer_listener,
    }))
}

#[allow(deprecated)]
fn parse_options(options: &JsValue) -> anyhow::Result<FieldOptions> {
    if options.is_undefined() || options.is_null() {
        return Ok(FieldOptions::default());
    }
    options
        .into_serde::<FieldOptions>()
        .map_err(|e| anyhow::anyhow!("invalid options: {}", e))
}

#[inline]
fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", e))
}

/// Animated particle background bound to one canvas.
///
/// If the browser cannot provide a 2D context the handle is created anyway
/// but stays unmounted and draws nothing.
#[wasm_bindgen]
pub struct ParticleBackground {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Mount on `#particle-canvas`, creating it under `<body>` if missing.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<ParticleBackground, JsValue> {
        let document = dom::window_document().ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = dom::find_or_create_canvas(&document).map_err(to_js)?;
        Self::with_options(canvas, JsValue::UNDEFINED)
    }

    /// Mount on an existing canvas with default settings.
    #[wasm_bindgen(js_name = mountOn)]
    pub fn mount_on(canvas: web::HtmlCanvasElement) -> Result<ParticleBackground, JsValue> {
        Self::with_options(canvas, JsValue::UNDEFINED)
    }

    /// Mount on `canvas`, overriding defaults with a plain options object,
    /// e.g. `{ fineCount: 80, pointerForce: "repel" }`.
    #[wasm_bindgen(js_name = withOptions)]
    pub fn with_options(
        canvas: web::HtmlCanvasElement,
        options: JsValue,
    ) -> Result<ParticleBackground, JsValue> {
        let options = parse_options(&options).map_err(to_js)?;
        let mounted = mount(canvas, &options).map_err(|e| {
            log::error!("[mount] {:#}", e);
            to_js(e)
        })?;
        Ok(ParticleBackground { mounted })
    }

    /// Stop the animation and remove all listeners. Safe to call repeatedly.
    pub fn unmount(&mut self) {
        self.mounted.take();
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.mounted
            .as_ref()
            .is_some_and(|m| m.frame_loop.is_running())
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .and_then(|m| m.frame_ctx.try_borrow().ok().map(|c| c.particle_count()))
            .unwrap_or(0)
    }
}

thread_local! {
    static AUTO_BACKGROUND: RefCell<Option<ParticleBackground>> = const { RefCell::new(None) };
}

/// Tear down the background mounted automatically at start-up, if any.
#[wasm_bindgen(js_name = stopAutoBackground)]
pub fn stop_auto_background() {
    AUTO_BACKGROUND.with(|slot| {
        slot.borrow_mut().take();
    });
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("particle-field starting");

    // Auto-mount only when the page opted in by providing the canvas.
    let Some(canvas) = dom::window_document().and_then(|d| dom::find_canvas(&d)) else {
        return Ok(());
    };
    match ParticleBackground::mount_on(canvas) {
        Ok(bg) => AUTO_BACKGROUND.with(|slot| *slot.borrow_mut() = Some(bg)),
        Err(e) => log::warn!("auto mount failed: {:?}", e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fresh_canvas() -> web::HtmlCanvasElement {
        let document = dom::window_document().unwrap();
        let canvas: web::HtmlCanvasElement =
            document.create_element("canvas").unwrap().dyn_into().unwrap();
        document.body().unwrap().append_child(&canvas).unwrap();
        canvas
    }

    #[wasm_bindgen_test]
    fn unmount_releases_every_frame_context_holder() {
        let mut bg = ParticleBackground::mount_on(fresh_canvas()).unwrap();
        assert!(bg.mounted());
        assert!(bg.particle_count() > 0);
        let frame_ctx = Rc::downgrade(&bg.mounted.as_ref().unwrap().frame_ctx);

        bg.unmount();

        // The frame closure and the resize handler each held a strong
        // reference; both must be gone.
        assert!(frame_ctx.upgrade().is_none());
        assert!(!bg.mounted());
        assert_eq!(bg.particle_count(), 0);

        let window = dom::window().unwrap();
        for event in ["resize", "pointermove"] {
            window
                .dispatch_event(&web::Event::new(event).unwrap())
                .unwrap();
        }
        bg.unmount();
        assert!(!bg.mounted());
    }

    #[wasm_bindgen_test]
    fn rejected_options_do_not_mount() {
        let options = js_sys::JSON::parse(r#"{ "fineCount": 4000000000 }"#).unwrap();
        assert!(ParticleBackground::with_options(fresh_canvas(), options).is_err());
    }
}
