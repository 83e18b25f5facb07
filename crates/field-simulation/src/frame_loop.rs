//! Self-rescheduling animation loop
//!
//! Every handled frame asks the scheduler for the next one, so the loop keeps going for as
//! long as the host keeps delivering frames. A `CancelHandle` stops it: once cancelled the
//! loop neither draws nor reschedules, and a new loop has to be started.

use crate::ParticleField;
use field_core::Canvas;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Something that can deliver a frame callback later (e.g. `Window::request_redraw`)
pub trait FrameScheduler {
    fn request_frame(&self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Cancelled,
}

/// Shared stop flag for an `AnimationLoop`
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    cancelled: Arc<AtomicBool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct AnimationLoop {
    cancel: CancelHandle,
    frames: u64,
}

impl AnimationLoop {
    /// Start a loop by scheduling its first frame
    pub fn start<S: FrameScheduler + ?Sized>(scheduler: &S) -> Self {
        scheduler.request_frame();
        log::debug!("Animation loop started");
        Self {
            cancel: CancelHandle::default(),
            frames: 0,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn state(&self) -> LoopState {
        if self.cancel.is_cancelled() {
            LoopState::Cancelled
        } else {
            LoopState::Running
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == LoopState::Running
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Handle one scheduled frame: render the field and resubmit.
    ///
    /// Returns the loop state after the frame. A cancelled loop leaves the canvas and the
    /// field untouched.
    pub fn on_frame<C, S>(
        &mut self,
        field: &mut ParticleField,
        canvas: &mut C,
        scheduler: &S,
    ) -> LoopState
    where
        C: Canvas + ?Sized,
        S: FrameScheduler + ?Sized,
    {
        if self.cancel.is_cancelled() {
            return LoopState::Cancelled;
        }

        field.frame(canvas);
        self.frames += 1;
        log::trace!(
            "frame {} ({} particles)",
            self.frames,
            field.particles().len()
        );

        scheduler.request_frame();
        LoopState::Running
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldParams;
    use field_core::RecordingCanvas;
    use std::cell::Cell;

    #[derive(Default)]
    struct CountingScheduler {
        requests: Cell<u32>,
    }

    impl FrameScheduler for CountingScheduler {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }

    /// Drive the loop like a host event loop would: one frame per pending request
    fn pump(
        animation: &mut AnimationLoop,
        field: &mut ParticleField,
        canvas: &mut RecordingCanvas,
        scheduler: &CountingScheduler,
        max_frames: u32,
    ) -> u32 {
        let mut delivered = 0;
        while scheduler.requests.get() > 0 && delivered < max_frames {
            scheduler.requests.set(scheduler.requests.get() - 1);
            animation.on_frame(field, canvas, scheduler);
            delivered += 1;
        }
        delivered
    }

    #[test]
    fn test_start_schedules_first_frame() {
        let scheduler = CountingScheduler::default();
        let animation = AnimationLoop::start(&scheduler);
        assert_eq!(scheduler.requests.get(), 1);
        assert!(animation.is_running());
    }

    #[test]
    fn test_loop_resubmits_until_cancelled() {
        let scheduler = CountingScheduler::default();
        let mut field = ParticleField::with_seed(400.0, 400.0, FieldParams::default(), 1);
        let mut canvas = RecordingCanvas::new(400.0, 400.0);
        let mut animation = AnimationLoop::start(&scheduler);

        let delivered = pump(&mut animation, &mut field, &mut canvas, &scheduler, 25);
        assert_eq!(delivered, 25);
        assert_eq!(animation.frames(), 25);
        assert_eq!(scheduler.requests.get(), 1);

        animation.cancel_handle().cancel();
        let delivered = pump(&mut animation, &mut field, &mut canvas, &scheduler, 25);
        assert_eq!(delivered, 1);
        assert_eq!(scheduler.requests.get(), 0);
        assert_eq!(animation.frames(), 25);
        assert_eq!(animation.state(), LoopState::Cancelled);
    }

    #[test]
    fn test_cancelled_frame_draws_nothing() {
        let scheduler = CountingScheduler::default();
        let mut field = ParticleField::with_seed(400.0, 400.0, FieldParams::default(), 2);
        let before = field.particles().to_vec();
        let mut canvas = RecordingCanvas::new(400.0, 400.0);

        let mut animation = AnimationLoop::start(&scheduler);
        let handle = animation.cancel_handle();
        handle.cancel();

        let state = animation.on_frame(&mut field, &mut canvas, &scheduler);
        assert_eq!(state, LoopState::Cancelled);
        assert!(canvas.commands.is_empty());
        assert_eq!(before, field.particles());
    }
}
