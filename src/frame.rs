use crate::constants::{FRAME_STATS_INTERVAL, MAX_LINKS_LIMIT, MAX_PARTICLE_COUNT};
use crate::core::{DrawList, FieldConfig, ParticleField};
use crate::dom;
use crate::input::PointerCell;
use crate::render::CanvasPainter;
use crate::schedule::{AnimationLoop, FrameId, FrameScheduler};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one animation frame touches. Owned by the mounted background.
pub struct FrameContext {
    pub window: web::Window,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: PointerCell,
    field: ParticleField,
    painter: CanvasPainter,
    draw: DrawList,
    rng: StdRng,
    stats: FrameStats,
}

impl FrameContext {
    pub fn new(
        window: web::Window,
        canvas: web::HtmlCanvasElement,
        ctx2d: web::CanvasRenderingContext2d,
        config: FieldConfig,
        pointer: PointerCell,
    ) -> Self {
        let mut rng = StdRng::from_entropy();
        let (w, h) = dom::sync_canvas_to_viewport(&canvas, &window);
        let painter = CanvasPainter::new(ctx2d, config.color);
        let capacity = config
            .particle_count()
            .min(MAX_PARTICLE_COUNT)
            .saturating_mul(config.max_links.min(MAX_LINKS_LIMIT).saturating_add(1))
            .saturating_add(1);
        let field = ParticleField::new(config, w as f32, h as f32, &mut rng);
        Self {
            window,
            canvas,
            pointer,
            field,
            painter,
            draw: DrawList::with_capacity(capacity),
            rng,
            stats: FrameStats::new(),
        }
    }

    /// Advance the field one frame and paint the result.
    pub fn frame(&mut self) {
        self.field.advance(self.pointer.get(), &mut self.rng, &mut self.draw);
        self.painter.paint(&self.draw);
        self.stats.tick();
    }

    pub fn resize_to_viewport(&mut self) {
        let (w, h) = dom::sync_canvas_to_viewport(&self.canvas, &self.window);
        self.field.resize(w as f32, h as f32, &mut self.rng);
        log::debug!("[frame] resized to {}x{}", w, h);
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.field.len()
    }
}

/// Average frame interval, logged at debug level.
struct FrameStats {
    since: Instant,
    frames: u32,
}

impl FrameStats {
    fn new() -> Self {
        Self {
            since: Instant::now(),
            frames: 0,
        }
    }

    fn tick(&mut self) {
        self.frames += 1;
        if self.frames < FRAME_STATS_INTERVAL {
            return;
        }
        let elapsed = self.since.elapsed();
        log::debug!(
            "[frame] avg {:.2} ms over {} frames",
            elapsed.as_secs_f64() * 1000.0 / self.frames as f64,
            self.frames
        );
        self.since = Instant::now();
        self.frames = 0;
    }
}

type Tick = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame`-backed scheduler. The tick closure lives here and
/// is dropped on release, after which no further frames can be requested.
pub struct RafScheduler {
    window: web::Window,
    tick: Tick,
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&self) -> Option<FrameId> {
        let tick = self.tick.borrow();
        let cb = tick.as_ref()?;
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(|e| log::error!("requestAnimationFrame failed: {:?}", e))
            .ok()
    }

    fn cancel_frame(&self, id: FrameId) {
        if let Err(e) = self.window.cancel_animation_frame(id) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }

    fn release(&self) {
        self.tick.borrow_mut().take();
    }
}

pub type FrameLoop = AnimationLoop<RafScheduler>;

/// Start the frame loop. The returned handle is the only strong reference to
/// the loop; dropping or cancelling it stops the animation.
pub fn start_loop(window: web::Window, frame_ctx: Rc<RefCell<FrameContext>>) -> Rc<FrameLoop> {
    let tick: Tick = Rc::new(RefCell::new(None));
    let frame_loop = Rc::new(AnimationLoop::new(RafScheduler {
        window,
        tick: tick.clone(),
    }));
    let loop_weak = Rc::downgrade(&frame_loop);
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let Some(frame_loop) = loop_weak.upgrade() else {
            return;
        };
        frame_loop.on_frame(|| match frame_ctx.try_borrow_mut() {
            Ok(mut ctx) => ctx.frame(),
            Err(_) => log::warn!("[frame] context busy; frame skipped"),
        });
    }) as Box<dyn FnMut()>));
    frame_loop.start();
    frame_loop
}
