#![forbid(unsafe_code)]

//! Frame-stepped animation backend.
//!
//! Emulates a renderer that can only present whole frames: the presented
//! offset is re-evaluated at fixed frame steps and held between them. The
//! final frame presents the exact target and reports completion.

use web_time::{Duration, Instant};

use super::{AnimationId, AnimationPort, AnimationRequest, Cancelled, IdSource, Tween};

/// Default step between presented frames.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(13);

/// Frame-quantized animation port.
#[derive(Debug, Clone)]
pub struct SteppedAnimator {
    presented: f64,
    frame_interval: Duration,
    active: Option<Tween>,
    finished: Option<AnimationId>,
    frames_presented: u64,
    ids: IdSource,
    suppressed: bool,
}

impl Default for SteppedAnimator {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl SteppedAnimator {
    /// A port presenting `offset`, stepping every [`DEFAULT_FRAME_INTERVAL`].
    #[must_use]
    pub fn new(offset: f64) -> Self {
        Self {
            presented: offset,
            frame_interval: DEFAULT_FRAME_INTERVAL,
            active: None,
            finished: None,
            frames_presented: 0,
            ids: IdSource::default(),
            suppressed: false,
        }
    }

    /// Use a different frame step. Zero is clamped to 1ms.
    #[must_use]
    pub fn with_frame_interval(mut self, frame_interval: Duration) -> Self {
        self.frame_interval = frame_interval.max(Duration::from_millis(1));
        self
    }

    #[must_use]
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// Frames presented by the active animation so far.
    #[must_use]
    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    #[must_use]
    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

impl AnimationPort for SteppedAnimator {
    fn current_offset(&self) -> f64 {
        self.presented
    }

    fn set_offset(&mut self, offset: f64) {
        if let Some(tween) = self.active.take() {
            self.finished = Some(tween.id);
        }
        self.presented = offset;
    }

    fn animate_to(&mut self, request: AnimationRequest, now: Instant) -> AnimationId {
        if let Some(tween) = self.active.take() {
            self.finished.get_or_insert(tween.id);
        }
        let id = self.ids.take();
        self.frames_presented = 0;
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
        let elapsed = now.saturating_duration_since(tween.start);
        let frames = elapsed.as_nanos() / self.frame_interval.as_nanos();
        let frames = u32::try_from(frames).unwrap_or(u32::MAX);
        let stepped = self.frame_interval.saturating_mul(frames);
        self.frames_presented = u64::from(frames);
        match tween.sample(stepped) {
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

    fn request(target: f64, ms: u64) -> AnimationRequest {
        AnimationRequest {
            target,
            duration: Duration::from_millis(ms),
            easing: CubicBezier::LINEAR,
            kind: EasingKind::Drift,
        }
    }

    #[test]
    fn holds_value_between_frames() {
        let t = Instant::now();
        let mut port = SteppedAnimator::new(0.0).with_frame_interval(Duration::from_millis(10));
        port.animate_to(request(-100.0, 100), t);

        assert_eq!(port.advance(t + Duration::from_millis(9)), None);
        assert_eq!(port.current_offset(), 0.0);

        assert_eq!(port.advance(t + Duration::from_millis(25)), None);
        assert!((port.current_offset() + 20.0).abs() < 1e-3);
        assert_eq!(port.frames_presented(), 2);

        assert_eq!(port.advance(t + Duration::from_millis(29)), None);
        assert!((port.current_offset() + 20.0).abs() < 1e-3);
    }

    #[test]
    fn completes_on_final_frame() {
        let t = Instant::now();
        let mut port = SteppedAnimator::new(0.0).with_frame_interval(Duration::from_millis(10));
        let id = port.animate_to(request(-100.0, 95), t);
        // 95ms is mid-frame: the last frame lands at 100ms.
        assert_eq!(port.advance(t + Duration::from_millis(96)), None);
        assert_eq!(port.advance(t + Duration::from_millis(100)), Some(id));
        assert_eq!(port.current_offset(), -100.0);
        assert!(!port.is_animating());
    }

    #[test]
    fn default_frame_interval() {
        assert_eq!(SteppedAnimator::default().frame_interval(), DEFAULT_FRAME_INTERVAL);
        assert_eq!(
            SteppedAnimator::new(0.0)
                .with_frame_interval(Duration::ZERO)
                .frame_interval(),
            Duration::from_millis(1)
        );
    }

    #[test]
    fn cancel_stops_at_last_presented_frame() {
        let t = Instant::now();
        let mut port = SteppedAnimator::new(0.0).with_frame_interval(Duration::from_millis(10));
        let id = port.animate_to(request(-100.0, 100), t);
        port.advance(t + Duration::from_millis(34));
        let c = port.cancel();
        assert_eq!(c.pending, Some(id));
        assert!((c.offset + 30.0).abs() < 1e-3);
        assert!(!port.is_animating());
    }

    #[test]
    fn set_offset_interrupts() {
        let t = Instant::now();
        let mut port = SteppedAnimator::new(0.0);
        let id = port.animate_to(request(-100.0, 100), t);
        port.set_offset(-5.0);
        assert_eq!(port.current_offset(), -5.0);
        assert_eq!(port.advance(t), Some(id));
    }
}
