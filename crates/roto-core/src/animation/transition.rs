#![forbid(unsafe_code)]

//! Declarative transition backend.
//!
//! Behaves like a style transition: the target is committed as soon as the
//! animation is requested, the presented value follows the eased curve as
//! time is observed, and completion is a single event once the duration has
//! elapsed.

use web_time::Instant;

use super::{AnimationId, AnimationPort, AnimationRequest, Cancelled, IdSource, Tween};

/// Time-evaluated transition port.
#[derive(Debug, Clone, Default)]
pub struct TransitionAnimator {
    presented: f64,
    committed: f64,
    active: Option<Tween>,
    /// Interrupted by `set_offset`, reported on the next `advance`.
    finished: Option<AnimationId>,
    ids: IdSource,
    suppressed: bool,
}

impl TransitionAnimator {
    /// A port presenting `offset`.
    #[must_use]
    pub fn new(offset: f64) -> Self {
        Self {
            presented: offset,
            committed: offset,
            ..Self::default()
        }
    }

    /// Value declared by the most recent request (the transition's end state).
    #[must_use]
    pub fn committed_offset(&self) -> f64 {
        self.committed
    }

    /// Whether child interaction is currently suppressed.
    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

impl AnimationPort for TransitionAnimator {
    fn current_offset(&self) -> f64 {
        self.presented
    }

    fn set_offset(&mut self, offset: f64) {
        if let Some(tween) = self.active.take() {
            self.finished = Some(tween.id);
        }
        self.presented = offset;
        self.committed = offset;
    }

    fn animate_to(&mut self, request: AnimationRequest, now: Instant) -> AnimationId {
        if let Some(tween) = self.active.take() {
            self.finished.get_or_insert(tween.id);
        }
        let id = self.ids.take();
        self.committed = request.target;
        self.active = Some(Tween {
            id,
            from: self.presented,
            to: request.target,
            start: now,
            duration: request.duration,
            easing: request.easing,
        });
        id
    }

    fn cancel(&mut self) -> Cancelled {
        let pending = self
            .active
            .take()
            .map(|tween| tween.id)
            .or_else(|| self.finished.take());
        self.committed = self.presented;
        Cancelled {
            offset: self.presented,
            pending,
        }
    }

    fn advance(&mut self, now: Instant) -> Option<AnimationId> {
        if let Some(id) = self.finished.take() {
            return Some(id);
        }
        let tween = self.active?;
        match tween.sample(now.saturating_duration_since(tween.start)) {
            Some(value) => {
                self.presented = value;
                None
            }
            None => {
                self.presented = tween.to;
                self.active = None;
                Some(tween.id)
            }
        }
    }

    fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    fn suppress_child_interaction(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::{CubicBezier, EasingKind};
    use web_time::Duration;

    fn request(target: f64, ms: u64) -> AnimationRequest {
        AnimationRequest {
            target,
            duration: Duration::from_millis(ms),
            easing: CubicBezier::LINEAR,
            kind: EasingKind::Shift,
        }
    }

    #[test]
    fn commits_target_immediately_and_presents_over_time() {
        let t = Instant::now();
        let mut port = TransitionAnimator::new(0.0);
        let id = port.animate_to(request(-200.0, 100), t);
        assert_eq!(port.committed_offset(), -200.0);
        assert_eq!(port.current_offset(), 0.0);
        assert!(port.is_animating());

        assert_eq!(port.advance(t + Duration::from_millis(25)), None);
        assert!((port.current_offset() + 50.0).abs() < 1e-3);

        assert_eq!(port.advance(t + Duration::from_millis(100)), Some(id));
        assert_eq!(port.current_offset(), -200.0);
        assert!(!port.is_animating());
        assert_eq!(port.advance(t + Duration::from_millis(200)), None);
    }

    #[test]
    fn cancel_reports_presented_offset_and_pending_id() {
        let t = Instant::now();
        let mut port = TransitionAnimator::new(0.0);
        let id = port.animate_to(request(-100.0, 100), t);
        port.advance(t + Duration::from_millis(50));
        let c = port.cancel();
        assert_eq!(c.pending, Some(id));
        assert!((c.offset + 50.0).abs() < 1e-3);
        assert_eq!(port.committed_offset(), c.offset);
        assert_eq!(port.cancel().pending, None, "reported once");
    }

    #[test]
    fn set_offset_interrupts_and_reports_on_advance() {
        let t = Instant::now();
        let mut port = TransitionAnimator::new(0.0);
        let id = port.animate_to(request(-100.0, 100), t);
        port.set_offset(12.0);
        assert_eq!(port.current_offset(), 12.0);
        assert_eq!(port.advance(t), Some(id));
        assert_eq!(port.advance(t), None);
    }

    #[test]
    fn replaced_animation_is_still_reported() {
        let t = Instant::now();
        let mut port = TransitionAnimator::new(0.0);
        let first = port.animate_to(request(-100.0, 100), t);
        let second = port.animate_to(request(-300.0, 100), t);
        assert_eq!(port.advance(t), Some(first));
        assert_eq!(port.advance(t + Duration::from_millis(100)), Some(second));
    }

    #[test]
    fn zero_duration_completes_on_next_advance() {
        let t = Instant::now();
        let mut port = TransitionAnimator::new(0.0);
        let id = port.animate_to(request(-40.0, 0), t);
        assert_eq!(port.advance(t), Some(id));
        assert_eq!(port.current_offset(), -40.0);
    }

    #[test]
    fn suppression_flag_round_trips() {
        let mut port = TransitionAnimator::new(0.0);
        port.suppress_child_interaction(true);
        assert!(port.is_suppressed());
        port.suppress_child_interaction(false);
        assert!(!port.is_suppressed());
    }
}
