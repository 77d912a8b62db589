use glam::Vec2;
use std::cell::Cell;
use std::rc::Rc;

/// Last observed pointer position in canvas pixels.
///
/// Single slot, overwritten by the pointer-move handler and read once per
/// frame. `None` until the first move arrives.
#[derive(Clone, Default)]
pub struct PointerCell {
    slot: Rc<Cell<Option<Vec2>>>,
}

impl PointerCell {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn set(&self, x: f32, y: f32) {
        if x.is_finite() && y.is_finite() {
            self.slot.set(Some(Vec2::new(x, y)));
        }
    }

    #[inline]
    pub fn get(&self) -> Option<Vec2> {
        self.slot.get()
    }
}

/// Map client (CSS pixel) coordinates to canvas backing-store pixels.
///
/// `rect` is `(left, top, width, height)` of the canvas element; a degenerate
/// rect maps to the unscaled client offset.
#[inline]
pub fn client_to_canvas_px(
    client: Vec2,
    rect: (f32, f32, f32, f32),
    canvas_px: Vec2,
) -> Vec2 {
    let (left, top, w, h) = rect;
    let local = client - Vec2::new(left, top);
    if w > 0.0 && h > 0.0 {
        Vec2::new(local.x / w * canvas_px.x, local.y / h * canvas_px.y)
    } else {
        local
    }
}
