#![forbid(unsafe_code)]

//! Scripted pointer gestures.
//!
//! A [`GestureScript`] is a list of pointer steps with virtual delays. On
//! replay the controller is ticked at a fixed frame period while waiting, so
//! sampler intervals and animations advance exactly as they would under a
//! real frame loop.
//!
//! ```ignore
//! let events = GestureScript::new()
//!     .down(0.0)
//!     .move_to(-100.0, Duration::from_millis(40))
//!     .up(Duration::ZERO)
//!     .replay(&mut controller, &mut clock);
//! ```

use roto_core::{AnimationPort, ItemLayout, MotionController, MotionEvent};
use web_time::Duration;

use crate::clock::VirtualClock;
use crate::trace::TraceRecorder;

/// Default frame period: a 60 Hz display.
pub const DEFAULT_FRAME: Duration = Duration::from_millis(16);

/// Upper bound on frames spent waiting for a motion to settle.
const SETTLE_FRAME_LIMIT: usize = 10_000;

/// One scripted step. `after` is the delay before the step is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureStep {
    Down { coord: f64 },
    Move { coord: f64, after: Duration },
    Pause { after: Duration },
    Up { after: Duration },
}

/// Builder for a pointer gesture along the controller's axis.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureScript {
    steps: Vec<GestureStep>,
    frame: Duration,
}

impl Default for GestureScript {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureScript {
    #[must_use]
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            frame: DEFAULT_FRAME,
        }
    }

    /// Tick period used while waiting. Zero is clamped to 1ms.
    #[must_use]
    pub fn with_frame(mut self, frame: Duration) -> Self {
        self.frame = frame.max(Duration::from_millis(1));
        self
    }

    #[must_use]
    pub fn down(mut self, coord: f64) -> Self {
        self.steps.push(GestureStep::Down { coord });
        self
    }

    #[must_use]
    pub fn move_to(mut self, coord: f64, after: Duration) -> Self {
        self.steps.push(GestureStep::Move { coord, after });
        self
    }

    #[must_use]
    pub fn pause(mut self, after: Duration) -> Self {
        self.steps.push(GestureStep::Pause { after });
        self
    }

    #[must_use]
    pub fn up(mut self, after: Duration) -> Self {
        self.steps.push(GestureStep::Up { after });
        self
    }

    #[must_use]
    pub fn steps(&self) -> &[GestureStep] {
        &self.steps
    }

    /// Replay, let the resulting motion settle, and return every event.
    pub fn replay<L: ItemLayout, A: AnimationPort>(
        &self,
        controller: &mut MotionController<L, A>,
        clock: &mut VirtualClock,
    ) -> Vec<MotionEvent> {
        let mut recorder = TraceRecorder::new();
        self.replay_traced(controller, clock, &mut recorder);
        recorder.events()
    }

    /// Replay into `recorder`, then settle.
    pub fn replay_traced<L: ItemLayout, A: AnimationPort>(
        &self,
        controller: &mut MotionController<L, A>,
        clock: &mut VirtualClock,
        recorder: &mut TraceRecorder,
    ) {
        let axis = controller.config().direction;
        for step in &self.steps {
            match *step {
                GestureStep::Down { coord } => {
                    controller.pointer_down(axis.point_at(coord), clock.now());
                }
                GestureStep::Move { coord, after } => {
                    run_for(controller, clock, after, self.frame, recorder);
                    controller.pointer_move(axis.point_at(coord), clock.now());
                }
                GestureStep::Pause { after } => {
                    run_for(controller, clock, after, self.frame, recorder);
                }
                GestureStep::Up { after } => {
                    run_for(controller, clock, after, self.frame, recorder);
                    controller.pointer_up(clock.now());
                }
            }
            recorder.observe(controller, clock);
        }
        settle(controller, clock, self.frame, recorder);
    }
}

/// Tick every `frame` for `duration`; the last tick lands exactly at the end.
pub fn run_for<L: ItemLayout, A: AnimationPort>(
    controller: &mut MotionController<L, A>,
    clock: &mut VirtualClock,
    duration: Duration,
    frame: Duration,
    recorder: &mut TraceRecorder,
) {
    let mut remaining = duration;
    while !remaining.is_zero() {
        let step = remaining.min(frame);
        remaining -= step;
        let now = clock.advance(step);
        controller.tick(now);
        recorder.observe(controller, clock);
    }
}

/// Tick until no animation is in flight. Returns frames spent.
pub fn settle<L: ItemLayout, A: AnimationPort>(
    controller: &mut MotionController<L, A>,
    clock: &mut VirtualClock,
    frame: Duration,
    recorder: &mut TraceRecorder,
) -> usize {
    let mut frames = 0;
    while controller.state().is_animated() && frames < SETTLE_FRAME_LIMIT {
        let now = clock.advance(frame);
        controller.tick(now);
        recorder.observe(controller, clock);
        frames += 1;
    }
    if controller.state().is_animated() {
        tracing::warn!(
            message = "harness.settle_timeout",
            frames,
            state = controller.state().name()
        );
    }
    frames
}
