//! The effect strategy trait and the mounted-instance lifecycle.
//!
//! Every visual variant is a strategy over the same engine: build initial
//! state in `init`, advance physics in `step`, repaint in `draw`. The
//! [`EffectInstance`] owns everything a mounted effect needs — surface,
//! cancellation token, pointer subscription, seeded RNG — and guarantees
//! that `stop()` detaches all of it synchronously.

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use glam::Vec2;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::motion::{MotionPreference, Speed};
use crate::pointer::{PointerReader, PointerTracker};
use crate::schedule::{CancelToken, FrameFlow, FrameHandle, FrameScheduler, FrameTick};
use crate::surface::Surface;

/// Everything a step sees for one frame. The pointer is read-only; clicks
/// are the ones queued since the previous frame.
pub struct StepCtx<'a> {
    pub elapsed_ms: u64,
    pub delta_ms: u64,
    pub size: Vec2,
    pub pointer: Option<Vec2>,
    pub clicks: &'a [Vec2],
    pub rng: &'a mut StdRng,
    pub speed: Speed,
}

impl StepCtx<'_> {
    /// Delta time in seconds with the global speed factor applied, the value
    /// most steps actually want.
    pub fn dt(&self) -> f32 {
        self.delta_ms as f32 / 1000.0 * self.speed.factor()
    }
}

/// Per-variant capability set over the shared engine.
pub trait Effect {
    /// Build the initial particle/shape state for the given surface size.
    fn init(&mut self, size: Vec2, rng: &mut StdRng);

    /// Advance simulated physics by one frame.
    fn step(&mut self, ctx: &mut StepCtx);

    /// Repaint: clear or fade the previous frame, then draw each live
    /// particle/shape with its current attributes.
    fn draw(&self, surface: &mut Surface);
}

struct Inner {
    surface: Surface,
    effect: Box<dyn Effect>,
    rng: StdRng,
    reader: Option<PointerReader>,
    speed: Speed,
    initialized: bool,
    frames_stepped: u64,
}

impl Inner {
    fn frame(&mut self, tick: FrameTick) {
        // No usable drawing surface: render nothing, silently.
        if self.surface.is_empty() {
            return;
        }
        let size = self.surface.size();
        if !self.initialized {
            self.effect.init(size, &mut self.rng);
            self.initialized = true;
        }

        let (pointer, clicks) = match &self.reader {
            Some(r) => (r.position(), r.clicks()),
            None => (None, Vec::new()),
        };

        let mut ctx = StepCtx {
            elapsed_ms: tick.elapsed_ms,
            delta_ms: tick.delta_ms,
            size,
            pointer,
            clicks: &clicks,
            rng: &mut self.rng,
            speed: self.speed,
        };
        self.effect.step(&mut ctx);
        self.effect.draw(&mut self.surface);
        self.frames_stepped += 1;
    }
}

/// One mounted effect and its owned resources.
pub struct EffectInstance {
    inner: Rc<RefCell<Inner>>,
    token: CancelToken,
    handle: Option<FrameHandle>,
    motion: MotionPreference,
    started: bool,
}

impl EffectInstance {
    pub fn new(
        effect: Box<dyn Effect>,
        width: u16,
        height: u16,
        seed: u64,
        speed: Speed,
        motion: MotionPreference,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                surface: Surface::new(width, height),
                effect,
                rng: StdRng::seed_from_u64(seed),
                reader: None,
                speed,
                initialized: false,
                frames_stepped: 0,
            })),
            token: CancelToken::new(),
            handle: None,
            motion,
            started: false,
        }
    }

    /// Subscribe to the pointer, build the initial state, perform the
    /// initial static paint, and begin the per-frame chain — unless reduced
    /// motion is active, in which case nothing is scheduled. Idempotent.
    pub fn start(&mut self, scheduler: &mut FrameScheduler, tracker: &PointerTracker) {
        if self.started || self.token.is_cancelled() {
            return;
        }
        self.started = true;
        debug!("mounting effect instance");

        {
            let mut inner = self.inner.borrow_mut();
            inner.reader = Some(tracker.subscribe());
            if !inner.surface.is_empty() {
                let size = inner.surface.size();
                let Inner {
                    effect,
                    rng,
                    surface,
                    initialized,
                    ..
                } = &mut *inner;
                effect.init(size, rng);
                *initialized = true;
                effect.draw(surface);
            }
        }

        if self.motion.is_reduced() {
            return;
        }

        let inner = Rc::clone(&self.inner);
        self.handle = Some(scheduler.request_frame(&self.token, move |tick| {
            inner.borrow_mut().frame(tick);
            FrameFlow::Continue
        }));
    }

    /// Cancel the pending frame callback and release the pointer
    /// subscription, synchronously. Idempotent; after this, pending-frame
    /// firings touch nothing that belonged to this instance.
    pub fn stop(&mut self, scheduler: &mut FrameScheduler) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            scheduler.cancel_frame(handle);
        }
        if self.inner.borrow_mut().reader.take().is_some() {
            debug!("unmounted effect instance");
        }
    }

    /// Update the surface to the new viewport dimensions. Particle positions
    /// are not rescaled; post-resize drift is accepted behavior.
    ///
    /// Resize clears surface content. With a frame chain running the next
    /// frame repaints it; with none (reduced motion), the static paint is
    /// redone here so the instance never degrades to a blank surface.
    pub fn resize(&mut self, width: u16, height: u16) {
        let mut inner = self.inner.borrow_mut();
        inner.surface.resize(width, height);

        let needs_static_paint = self.started && self.handle.is_none() && !self.token.is_cancelled();
        if needs_static_paint && !inner.surface.is_empty() {
            let size = inner.surface.size();
            let Inner {
                effect,
                rng,
                surface,
                initialized,
                ..
            } = &mut *inner;
            if !*initialized {
                effect.init(size, rng);
                *initialized = true;
            }
            effect.draw(surface);
        }
    }

    pub fn set_speed(&mut self, speed: Speed) {
        self.inner.borrow_mut().speed = speed;
    }

    pub fn surface(&self) -> Ref<'_, Surface> {
        Ref::map(self.inner.borrow(), |i| &i.surface)
    }

    pub fn frames_stepped(&self) -> u64 {
        self.inner.borrow().frames_stepped
    }
}

impl Drop for EffectInstance {
    fn drop(&mut self) {
        // The token alone suffices if the instance is dropped without an
        // explicit stop(): the scheduler drops the entry on the next drain
        // without firing it.
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Probe effect that counts lifecycle calls and paints one cell.
    #[derive(Default)]
    struct Probe {
        steps: Rc<RefCell<u32>>,
        draws: Rc<RefCell<u32>>,
    }

    impl Effect for Probe {
        fn init(&mut self, _size: Vec2, _rng: &mut StdRng) {}

        fn step(&mut self, _ctx: &mut StepCtx) {
            *self.steps.borrow_mut() += 1;
        }

        fn draw(&self, surface: &mut Surface) {
            *self.draws.borrow_mut() += 1;
            surface.add(0.0, 0.0, crate::color::Rgb::WHITE, 1.0);
        }
    }

    fn tick(n: u64) -> FrameTick {
        FrameTick {
            elapsed_ms: n * 16,
            delta_ms: 16,
        }
    }

    fn mounted(
        motion: MotionPreference,
    ) -> (
        EffectInstance,
        FrameScheduler,
        PointerTracker,
        Rc<RefCell<u32>>,
        Rc<RefCell<u32>>,
    ) {
        let probe = Probe::default();
        let steps = Rc::clone(&probe.steps);
        let draws = Rc::clone(&probe.draws);
        let mut instance =
            EffectInstance::new(Box::new(probe), 20, 10, 1, Speed::Normal, motion);
        let mut scheduler = FrameScheduler::new();
        let tracker = PointerTracker::new();
        instance.start(&mut scheduler, &tracker);
        (instance, scheduler, tracker, steps, draws)
    }

    #[test]
    fn start_paints_once_and_schedules() {
        let (instance, mut scheduler, tracker, steps, draws) =
            mounted(MotionPreference::Full);
        assert_eq!(*draws.borrow(), 1); // initial static paint
        assert_eq!(tracker.subscriber_count(), 1);
        assert_eq!(scheduler.pending_count(), 1);

        scheduler.run_frame(tick(0));
        assert_eq!(*steps.borrow(), 1);
        assert_eq!(*draws.borrow(), 2);
        assert_eq!(instance.frames_stepped(), 1);
    }

    #[test]
    fn reduced_motion_schedules_no_frames() {
        let (instance, mut scheduler, _tracker, steps, draws) =
            mounted(MotionPreference::Reduced);
        assert_eq!(scheduler.pending_count(), 0);
        for n in 0..50 {
            scheduler.run_frame(tick(n));
        }
        assert_eq!(*steps.borrow(), 0);
        assert_eq!(*draws.borrow(), 1); // the initial static paint only
        assert_eq!(instance.frames_stepped(), 0);
    }

    #[test]
    fn stop_is_synchronous_and_idempotent() {
        let (mut instance, mut scheduler, tracker, steps, draws) =
            mounted(MotionPreference::Full);
        scheduler.run_frame(tick(0));

        instance.stop(&mut scheduler);
        instance.stop(&mut scheduler);
        assert_eq!(scheduler.pending_count(), 0);
        assert_eq!(tracker.subscriber_count(), 0);

        let steps_at_stop = *steps.borrow();
        let draws_at_stop = *draws.borrow();
        for n in 1..100 {
            scheduler.run_frame(tick(n));
        }
        assert_eq!(*steps.borrow(), steps_at_stop);
        assert_eq!(*draws.borrow(), draws_at_stop);
    }

    #[test]
    fn drop_without_stop_kills_the_chain() {
        let (instance, mut scheduler, _tracker, steps, _draws) =
            mounted(MotionPreference::Full);
        scheduler.run_frame(tick(0));
        drop(instance);
        scheduler.run_frame(tick(1));
        scheduler.run_frame(tick(2));
        assert_eq!(*steps.borrow(), 1);
        assert_eq!(scheduler.pending_count(), 0);
    }

    #[test]
    fn start_after_stop_stays_stopped() {
        let (mut instance, mut scheduler, tracker, steps, _draws) =
            mounted(MotionPreference::Full);
        instance.stop(&mut scheduler);
        instance.start(&mut scheduler, &tracker);
        scheduler.run_frame(tick(0));
        assert_eq!(*steps.borrow(), 0);
    }

    #[test]
    fn reduced_motion_resize_repaints_statically() {
        let (mut instance, mut scheduler, _tracker, steps, draws) =
            mounted(MotionPreference::Reduced);
        assert_eq!(*draws.borrow(), 1);

        instance.resize(30, 12);
        assert_eq!(*draws.borrow(), 2);
        assert!(instance.surface().total_luminance() > 0.0);

        // Still no animation frames, only static paints.
        for n in 0..10 {
            scheduler.run_frame(tick(n));
        }
        assert_eq!(*steps.borrow(), 0);
        assert_eq!(instance.frames_stepped(), 0);
    }

    #[test]
    fn resize_after_stop_does_not_repaint() {
        let (mut instance, mut scheduler, _tracker, _steps, draws) =
            mounted(MotionPreference::Reduced);
        instance.stop(&mut scheduler);
        let painted = *draws.borrow();
        instance.resize(40, 20);
        assert_eq!(*draws.borrow(), painted);
    }

    #[test]
    fn zero_area_surface_never_steps() {
        let probe = Probe::default();
        let steps = Rc::clone(&probe.steps);
        let mut instance = EffectInstance::new(
            Box::new(probe),
            0,
            0,
            1,
            Speed::Normal,
            MotionPreference::Full,
        );
        let mut scheduler = FrameScheduler::new();
        let tracker = PointerTracker::new();
        instance.start(&mut scheduler, &tracker);
        scheduler.run_frame(tick(0));
        assert_eq!(*steps.borrow(), 0);
    }

    #[test]
    fn resize_updates_reported_dimensions() {
        let (mut instance, _scheduler, _tracker, _steps, _draws) =
            mounted(MotionPreference::Full);
        instance.resize(123, 45);
        assert_eq!(instance.surface().width(), 123);
        assert_eq!(instance.surface().height(), 45);
    }
}
