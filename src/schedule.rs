use std::cell::Cell;

/// Token identifying a pending frame request (the value returned by
/// `requestAnimationFrame`).
pub type FrameId = i32;

/// Host primitive that runs a pre-wired callback on the next display refresh.
pub trait FrameScheduler {
    /// Request one callback; `None` when the host refused the request.
    fn request_frame(&self) -> Option<FrameId>;
    fn cancel_frame(&self, id: FrameId);
    /// Release anything the scheduler holds for its callback. Called once the
    /// loop is cancelled.
    fn release(&self) {}
}

/// Self-rescheduling frame loop with an explicit cancel.
///
/// The scheduler's callback must call [`AnimationLoop::on_frame`]; each call
/// runs the body once and requests the next frame, until [`cancel`] is
/// called.
///
/// [`cancel`]: AnimationLoop::cancel
pub struct AnimationLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Cell<Option<FrameId>>,
    running: Cell<bool>,
    frames: Cell<u64>,
}

impl<S: FrameScheduler> AnimationLoop<S> {
    pub fn new(scheduler: S) -> Self {
        Self {
            scheduler,
            pending: Cell::new(None),
            running: Cell::new(false),
            frames: Cell::new(0),
        }
    }

    pub fn start(&self) {
        if self.running.replace(true) {
            return;
        }
        self.schedule_next();
    }

    /// Entry point for the scheduler callback.
    pub fn on_frame(&self, body: impl FnOnce()) {
        self.pending.set(None);
        if !self.running.get() {
            return;
        }
        body();
        self.frames.set(self.frames.get() + 1);
        // body may have cancelled the loop
        if self.running.get() {
            self.schedule_next();
        }
    }

    pub fn cancel(&self) {
        if !self.running.replace(false) {
            return;
        }
        if let Some(id) = self.pending.take() {
            self.scheduler.cancel_frame(id);
        }
        self.scheduler.release();
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running.get()
    }

    #[inline]
    pub fn pending(&self) -> Option<FrameId> {
        self.pending.get()
    }

    /// Frames whose body has run since start.
    #[inline]
    pub fn frames(&self) -> u64 {
        self.frames.get()
    }

    fn schedule_next(&self) {
        let id = self.scheduler.request_frame();
        if id.is_none() {
            log::warn!("[loop] frame request refused; animation stopped");
            self.running.set(false);
        }
        self.pending.set(id);
    }
}

impl<S: FrameScheduler> Drop for AnimationLoop<S> {
    fn drop(&mut self) {
        self.cancel();
    }
}
