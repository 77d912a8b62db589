use crate::constants::{CANVAS_ELEMENT_ID, COARSE_POINTER_QUERY};
use anyhow::anyhow;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window() -> anyhow::Result<web::Window> {
    web::window().ok_or_else(|| anyhow!("no window"))
}

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// `innerWidth`/`innerHeight` in CSS pixels, never below 1×1.
pub fn viewport_size(window: &web::Window) -> (u32, u32) {
    let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0).max(1.0) as u32
    };
    (dim(window.inner_width()), dim(window.inner_height()))
}

/// `true` when the primary pointer is coarse (touch). Queried once per mount.
pub fn is_coarse_pointer(window: &web::Window) -> bool {
    window
        .match_media(COARSE_POINTER_QUERY)
        .ok()
        .flatten()
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

/// Match the canvas backing store to the viewport; returns the new size.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement, window: &web::Window) -> (u32, u32) {
    let (w, h) = viewport_size(window);
    canvas.set_width(w);
    canvas.set_height(h);
    (w, h)
}

/// Full-viewport, behind everything, transparent to clicks and touches.
pub fn apply_background_style(canvas: &web::HtmlCanvasElement, opacity: f32) {
    let style = canvas.style();
    let opacity = opacity.to_string();
    for (name, value) in [
        ("position", "fixed"),
        ("inset", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("pointer-events", "none"),
        ("z-index", "0"),
        ("opacity", opacity.as_str()),
    ] {
        if let Err(e) = style.set_property(name, value) {
            log::warn!("[dom] failed to set {}: {:?}", name, e);
        }
    }
}

/// The `#particle-canvas` element if the page has one.
pub fn find_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document
        .get_element_by_id(CANVAS_ELEMENT_ID)
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
}

/// Find `#particle-canvas`, or create it as the first child of `<body>`.
pub fn find_or_create_canvas(document: &web::Document) -> anyhow::Result<web::HtmlCanvasElement> {
    if let Some(canvas) = find_canvas(document) {
        return Ok(canvas);
    }
    let body = document.body().ok_or_else(|| anyhow!("no body"))?;
    let canvas = document
        .create_element("canvas")
        .map_err(|e| anyhow!("{:?}", e))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow!("{:?}", e))?;
    canvas.set_id(CANVAS_ELEMENT_ID);
    _ = canvas.set_attribute("aria-hidden", "true");
    body.prepend_with_node_1(&canvas)
        .map_err(|e| anyhow!("{:?}", e))?;
    log::debug!("[dom] created #{}", CANVAS_ELEMENT_ID);
    Ok(canvas)
}

/// 2D context, or `None` when the browser cannot provide one.
pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|c| c.dyn_into::<web::CanvasRenderingContext2d>().ok())
}
