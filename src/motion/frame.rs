//! Per-frame animation loop.
//!
//! A [`FrameLoop`] tick asks the host for the next tick first, then advances
//! the scene and renders it. Hosts plug in through two small traits:
//! [`FrameScheduler`] (winit `request_redraw`, browser
//! `requestAnimationFrame`) and [`FrameRenderer`] (the GPU renderer, or a
//! recorder in tests).

use glam::Vec3;

use crate::options::MotionOptions;
use crate::scene::SceneState;

/// Host facility that invokes the frame loop again on the next display
/// refresh.
pub trait FrameScheduler {
    /// Request exactly one more frame tick.
    fn request_frame(&mut self);
}

/// Draws the current scene state.
pub trait FrameRenderer {
    /// Error returned by a failed draw.
    type Error;

    /// Render one frame of `state`.
    ///
    /// # Errors
    ///
    /// Implementation-defined; the frame loop passes it straight through.
    fn render(&mut self, state: &SceneState) -> Result<(), Self::Error>;
}

/// Advance the torus and moon by one frame increment.
pub fn advance_frame(state: &mut SceneState, motion: &MotionOptions) {
    state.torus.spin(Vec3::from_array(motion.torus_frame_spin));
    state.moon.spin(Vec3::from_array(motion.moon_frame_spin));
}

/// Self-rescheduling frame loop. Counts the ticks it has run.
#[derive(Debug, Default, Clone)]
pub struct FrameLoop {
    frames: u64,
}

impl FrameLoop {
    /// A loop that has not ticked yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ticks run so far.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one tick: reschedule, advance, render.
    ///
    /// The reschedule only takes effect on the next refresh, so the render
    /// issued here always shows this tick's mutation.
    ///
    /// # Errors
    ///
    /// Returns whatever the renderer returns. The next tick is already
    /// scheduled at that point; the host decides whether to keep going.
    pub fn tick<S, R>(
        &mut self,
        state: &mut SceneState,
        motion: &MotionOptions,
        scheduler: &mut S,
        renderer: &mut R,
    ) -> Result<(), R::Error>
    where
        S: FrameScheduler + ?Sized,
        R: FrameRenderer + ?Sized,
    {
        scheduler.request_frame();
        self.frames += 1;
        advance_frame(state, motion);
        renderer.render(state)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;

    use super::*;
    use crate::options::Options;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Call {
        Schedule,
        Render { torus_x: f32 },
    }

    type CallLog = Rc<RefCell<Vec<Call>>>;

    struct Scheduler(CallLog);

    impl FrameScheduler for Scheduler {
        fn request_frame(&mut self) {
            self.0.borrow_mut().push(Call::Schedule);
        }
    }

    struct Renderer {
        log: CallLog,
        fail: bool,
    }

    impl FrameRenderer for Renderer {
        type Error = &'static str;

        fn render(&mut self, state: &SceneState) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Call::Render {
                torus_x: state.torus.rotation.x,
            });
            if self.fail {
                Err("context lost")
            } else {
                Ok(())
            }
        }
    }

    fn host(fail: bool) -> (CallLog, Scheduler, Renderer) {
        let log = CallLog::default();
        let scheduler = Scheduler(Rc::clone(&log));
        let renderer = Renderer {
            log: Rc::clone(&log),
            fail,
        };
        (log, scheduler, renderer)
    }

    fn state() -> SceneState {
        let mut rng = rand::rngs::StdRng::seed_from_u64(5);
        SceneState::new(&Options::default(), 1.0, &mut rng)
    }

    #[test]
    fn n_frames_accumulate_linearly() {
        let motion = MotionOptions::default();
        let mut s = state();
        let mut frame_loop = FrameLoop::new();
        let (_, mut scheduler, mut renderer) = host(false);

        let n = 120;
        for _ in 0..n {
            frame_loop
                .tick(&mut s, &motion, &mut scheduler, &mut renderer)
                .unwrap();
        }

        let n_f = n as f32;
        assert!((s.torus.rotation.x - 0.01 * n_f).abs() < 1e-4);
        assert!((s.torus.rotation.y - 0.005 * n_f).abs() < 1e-4);
        assert!((s.torus.rotation.z - 0.01 * n_f).abs() < 1e-4);
        assert!((s.moon.rotation.x - 0.005 * n_f).abs() < 1e-4);
        assert_eq!(s.moon.rotation.y, 0.0);
        assert_eq!(s.avatar.rotation, Vec3::ZERO);
        assert_eq!(frame_loop.frames(), n);
    }

    #[test]
    fn one_schedule_then_one_render_per_tick() {
        let motion = MotionOptions::default();
        let mut s = state();
        let mut frame_loop = FrameLoop::new();
        let (log, mut scheduler, mut renderer) = host(false);

        for _ in 0..3 {
            frame_loop
                .tick(&mut s, &motion, &mut scheduler, &mut renderer)
                .unwrap();
        }

        let kinds: Vec<bool> = log
            .borrow()
            .iter()
            .map(|c| matches!(c, Call::Schedule))
            .collect();
        assert_eq!(kinds, vec![true, false, true, false, true, false]);
    }

    #[test]
    fn render_sees_this_ticks_mutation() {
        let motion = MotionOptions::default();
        let mut s = state();
        let (log, mut scheduler, mut renderer) = host(false);
        FrameLoop::new()
            .tick(&mut s, &motion, &mut scheduler, &mut renderer)
            .unwrap();
        assert_eq!(
            log.borrow().as_slice(),
            &[Call::Schedule, Call::Render { torus_x: 0.01 }]
        );
    }

    #[test]
    fn render_failure_propagates_after_rescheduling() {
        let motion = MotionOptions::default();
        let mut s = state();
        let (log, mut scheduler, mut renderer) = host(true);
        let result =
            FrameLoop::new().tick(&mut s, &motion, &mut scheduler, &mut renderer);
        assert_eq!(result, Err("context lost"));
        assert_eq!(log.borrow().len(), 2);
        assert_eq!(log.borrow()[0], Call::Schedule);
    }
}
