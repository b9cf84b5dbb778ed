#![forbid(unsafe_code)]

//! Flick velocity from the most recent sampling interval.
//!
//! [`VelocitySampler`] watches a moving 1-D pointer coordinate. A repeating
//! timer of period `interval` closes the running interval each time it
//! fires, so only the *last* interval before release is ever inspected: a
//! slow drag that ends with a quick flick reads as a flick.
//!
//! The timer is a deadline rather than a thread. Every call that carries a
//! timestamp (`set_current_coordinate`, `tick`, `stop`) first fires any
//! periods that have elapsed, then applies its own update.
//!
//! # Invariants
//!
//! 1. The timer is armed only between `start()` and `stop()`.
//! 2. `pointer_speed().speed >= 0`.
//! 3. `pointer_speed().direction` is `None` only when both the last interval
//!    and the whole gesture have zero displacement.
//!
//! # Failure Modes
//!
//! - A gap of several periods without movement closes an empty interval, so
//!   the speed reads zero while the direction still falls back to the
//!   whole-gesture displacement.

use web_time::{Duration, Instant};

use crate::axis::Direction;

/// Speed (coordinate units per millisecond) and direction of the last interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSpeed {
    pub speed: f64,
    pub direction: Option<Direction>,
}

impl PointerSpeed {
    /// No movement at all.
    pub const STILL: Self = Self {
        speed: 0.0,
        direction: None,
    };
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Chunk {
    start: f64,
    end: f64,
}

/// Periodic sampler of a moving coordinate.
#[derive(Debug, Clone)]
pub struct VelocitySampler {
    interval: Duration,
    current: f64,
    interval_start: f64,
    initial: f64,
    chunk: Chunk,
    /// Next timer deadline; `Some` while running.
    deadline: Option<Instant>,
}

impl VelocitySampler {
    /// Create a stopped sampler. A zero interval is clamped to 1ms.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            current: 0.0,
            interval_start: 0.0,
            initial: 0.0,
            chunk: Chunk::default(),
            deadline: None,
        }
    }

    /// Arm the timer, anchoring both the interval start and the gesture
    /// start at the current coordinate.
    pub fn start(&mut self, now: Instant) {
        self.initial = self.current;
        self.interval_start = self.current;
        self.chunk = Chunk {
            start: self.current,
            end: self.current,
        };
        self.deadline = Some(now + self.interval);
    }

    /// Disarm the timer; the open interval is folded into the last chunk.
    pub fn stop(&mut self, now: Instant) {
        self.tick(now);
        self.deadline = None;
        self.chunk.end = self.current;
    }

    /// Whether the timer is armed.
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Record the latest pointer coordinate.
    pub fn set_current_coordinate(&mut self, coordinate: f64, now: Instant) {
        self.tick(now);
        self.current = coordinate;
    }

    /// Latest recorded coordinate.
    #[must_use]
    pub fn current_coordinate(&self) -> f64 {
        self.current
    }

    /// Fire every timer period that elapsed up to `now`.
    pub fn tick(&mut self, now: Instant) {
        let Some(deadline) = self.deadline else {
            return;
        };
        if now < deadline {
            return;
        }
        let periods = 1 + (now.duration_since(deadline).as_nanos() / self.interval.as_nanos());
        if periods == 1 {
            self.chunk = Chunk {
                start: self.interval_start,
                end: self.current,
            };
        } else {
            // Every period after the first closed with no movement.
            self.chunk = Chunk {
                start: self.current,
                end: self.current,
            };
        }
        self.interval_start = self.current;
        let step = u32::try_from(periods).unwrap_or(u32::MAX);
        self.deadline = Some(deadline + self.interval * step);
    }

    /// Speed and direction of the most recent interval.
    #[must_use]
    pub fn pointer_speed(&self) -> PointerSpeed {
        let translation = self.chunk.end - self.chunk.start;
        let speed = translation.abs() / (self.interval.as_secs_f64() * 1000.0);
        let heading = if translation == 0.0 {
            self.chunk.end - self.initial
        } else {
            translation
        };
        PointerSpeed {
            speed,
            direction: Direction::from_delta(heading),
        }
    }

    /// Sampling period.
    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}
