#![forbid(unsafe_code)]

//! Animation port: the renderer-facing sink for eased transitions.
//!
//! The controller never interpolates offsets itself. It asks an
//! [`AnimationPort`] to move to a target over a duration along a
//! [`CubicBezier`], reads the presented offset back at any time, and learns
//! about completion from [`AnimationPort::advance`].
//!
//! Two backends are provided, selected at construction:
//!
//! | Backend | Presented offset | Completion |
//! |---------|------------------|------------|
//! | [`TransitionAnimator`] | eased curve at the last observed instant | once the duration has elapsed |
//! | [`SteppedAnimator`] | value of the last whole frame step | on the final frame step |
//!
//! # Invariants
//!
//! 1. At most one animation is active per port.
//! 2. Every id returned by `animate_to` is reported exactly once, either by
//!    `advance` or as `Cancelled::pending`.
//! 3. `set_offset` presents the new offset immediately; an animation it
//!    interrupts is reported as finished by the next `advance`.
//!
//! # Failure Modes
//!
//! - A zero duration completes on the next `advance`, whatever its instant.
//! - Non-finite targets are presented as-is; the controller clamps before
//!   requesting.

mod stepped;
mod transition;

pub use stepped::SteppedAnimator;
pub use transition::TransitionAnimator;

use web_time::{Duration, Instant};

use crate::easing::{CubicBezier, EasingKind};

/// Identity of one requested animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(pub u64);

/// An eased move to `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationRequest {
    pub target: f64,
    pub duration: Duration,
    pub easing: CubicBezier,
    pub kind: EasingKind,
}

/// Outcome of [`AnimationPort::cancel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cancelled {
    /// Offset presented at the moment of cancellation.
    pub offset: f64,
    /// Animation whose completion had not been reported yet.
    pub pending: Option<AnimationId>,
}

/// Sink for offset changes, implemented by the embedding renderer.
pub trait AnimationPort {
    /// Offset currently presented, including mid-animation.
    fn current_offset(&self) -> f64;

    /// Present `offset` immediately, without animation.
    fn set_offset(&mut self, offset: f64);

    /// Start an eased move, replacing any active one.
    fn animate_to(&mut self, request: AnimationRequest, now: Instant) -> AnimationId;

    /// Stop at the presented offset and hand back the pending completion.
    fn cancel(&mut self) -> Cancelled;

    /// Advance to `now`; returns the id of an animation that finished.
    fn advance(&mut self, now: Instant) -> Option<AnimationId>;

    /// Whether an animation is in flight.
    fn is_animating(&self) -> bool;

    /// Stop (or resume) delivering clicks to the strip's children.
    fn suppress_child_interaction(&mut self, _suppressed: bool) {}
}

impl<T: AnimationPort + ?Sized> AnimationPort for &mut T {
    fn current_offset(&self) -> f64 {
        (**self).current_offset()
    }

    fn set_offset(&mut self, offset: f64) {
        (**self).set_offset(offset);
    }

    fn animate_to(&mut self, request: AnimationRequest, now: Instant) -> AnimationId {
        (**self).animate_to(request, now)
    }

    fn cancel(&mut self) -> Cancelled {
        (**self).cancel()
    }

    fn advance(&mut self, now: Instant) -> Option<AnimationId> {
        (**self).advance(now)
    }

    fn is_animating(&self) -> bool {
        (**self).is_animating()
    }

    fn suppress_child_interaction(&mut self, suppressed: bool) {
        (**self).suppress_child_interaction(suppressed);
    }
}

/// One eased segment, shared by both backends.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tween {
    id: AnimationId,
    from: f64,
    to: f64,
    start: Instant,
    duration: Duration,
    easing: CubicBezier,
}

impl Tween {
    /// Offset after `elapsed`; `None` once finished.
    fn sample(&self, elapsed: Duration) -> Option<f64> {
        if elapsed >= self.duration {
            return None;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        Some(self.from + (self.to - self.from) * self.easing.transform(t))
    }
}

/// Monotonic id source.
#[derive(Debug, Clone, Default)]
struct IdSource {
    next: u64,
}

impl IdSource {
    fn take(&mut self) -> AnimationId {
        self.next += 1;
        AnimationId(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tween(duration_ms: u64) -> Tween {
        Tween {
            id: AnimationId(1),
            from: 0.0,
            to: -100.0,
            start: Instant::now(),
            duration: Duration::from_millis(duration_ms),
            easing: CubicBezier::LINEAR,
        }
    }

    #[test]
    fn tween_interpolates_until_duration() {
        let t = tween(100);
        assert_eq!(t.sample(Duration::ZERO), Some(0.0));
        let mid = t.sample(Duration::from_millis(50)).expect("running");
        assert!((mid + 50.0).abs() < 1e-3, "mid={mid}");
        assert_eq!(t.sample(Duration::from_millis(100)), None);
    }

    #[test]
    fn zero_duration_tween_is_finished() {
        assert_eq!(tween(0).sample(Duration::ZERO), None);
    }

    #[test]
    fn ids_are_unique() {
        let mut ids = IdSource::default();
        let a = ids.take();
        let b = ids.take();
        assert_ne!(a, b);
        assert!(b > a);
    }
}
