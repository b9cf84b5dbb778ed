#![forbid(unsafe_code)]

//! The motion state machine.
//!
//! [`MotionController`] owns the bounds and the state of one strip. Pointer
//! input moves the strip directly while tracking; release hands over to a
//! momentum drift or an elastic bounce; buttons and gotos issue eased shifts.
//! Every motion ends back in [`MotionState::Ready`] with one change
//! notification.
//!
//! ```text
//!            pointer_down            pointer_up (in bounds)
//!   Ready ───────────────▶ Tracking ─────────────────────▶ Drifting ──┐
//!     ▲                        │ pointer_up (elastic zone)             │
//!     │                        └─────────────────────────▶ Bouncing ──┤
//!     │    shift / goto                                                │
//!     ├─────────────────────▶ Shifting ───────────────────────────────┤
//!     └──────────────────────── animation complete ◀──────────────────┘
//! ```
//!
//! Offsets are logical: the rest position is `0` and the strip scrolls
//! toward its content end as the offset decreases. The [`AnimationPort`]
//! receives rendered offsets (`logical + start_offset`).
//!
//! # Invariants
//!
//! 1. `bounds.min <= bounds.max == 0`.
//! 2. Every offset the controller animates to lies in `[min, max]`; only
//!    tracking presents offsets outside it (the elastic zone).
//! 3. Exactly one [`MotionEvent::Changed`] per settled motion, whether the
//!    motion completed or was interrupted.
//! 4. [`MotionEvent::Reachability`] is emitted only when it changes.
//! 5. A new command never starts while an animation's completion is still
//!    pending: the port is first advanced to the command's instant, so a
//!    finished animation completes normally and a running one is cancelled
//!    at its true position.
//!
//! # Failure Modes
//!
//! - Commands on an inert controller (content fits the viewport, or no
//!   items) are ignored.
//! - Out-of-range indices, foreign item references and non-finite offsets
//!   are ignored.
//! - A re-entrant shift while shifting is ignored, not queued.

use web_time::Instant;

use crate::animation::{AnimationId, AnimationPort, AnimationRequest, Cancelled};
use crate::axis::{Direction, Point};
use crate::config::{ButtonAction, MotionConfig};
use crate::easing::EasingKind;
use crate::error::Result;
use crate::event::{MotionEvent, Reachability};
use crate::layout::ItemLayout;
#[cfg(feature = "tracing")]
use crate::logging::messages;
use crate::sampler::{PointerSpeed, VelocitySampler};
use crate::snap::SnapResolver;
use crate::target::GotoTarget;

// ---------------------------------------------------------------------------
// State and bounds
// ---------------------------------------------------------------------------

/// What the strip is doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MotionState {
    /// At rest.
    #[default]
    Ready,
    /// Following the pointer.
    Tracking,
    /// Eased move requested by a shift, step or goto.
    Shifting,
    /// Momentum after release.
    Drifting,
    /// Returning from the elastic zone to a hard limit.
    Bouncing,
}

impl MotionState {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Tracking => "tracking",
            Self::Shifting => "shifting",
            Self::Drifting => "drifting",
            Self::Bouncing => "bouncing",
        }
    }

    /// Whether an animation may be in flight.
    #[must_use]
    pub const fn is_animated(self) -> bool {
        matches!(self, Self::Shifting | Self::Drifting | Self::Bouncing)
    }
}

/// Hard limits of the logical offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// Both limits at the rest position.
    pub const COLLAPSED: Self = Self { min: 0.0, max: 0.0 };

    /// Whether there is no room to move.
    #[inline]
    #[must_use]
    pub fn is_collapsed(&self) -> bool {
        self.min >= self.max
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.min && offset <= self.max
    }

    /// Clamp into `[min, max]`.
    #[inline]
    #[must_use]
    pub fn clamp(&self, offset: f64) -> f64 {
        offset.max(self.min).min(self.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::COLLAPSED
    }
}

/// One pointer gesture, from down to up.
#[derive(Debug, Clone, Copy)]
struct Gesture {
    /// Pointer coordinate at pointer-down.
    origin: f64,
    /// Logical offset at pointer-down.
    tracking_offset: f64,
    moved: bool,
}

// ---------------------------------------------------------------------------
// Controller
// ---------------------------------------------------------------------------

/// Inertial, snap-aware motion controller for one strip.
///
/// Owns its [`ItemLayout`] and [`AnimationPort`]; both stay reachable
/// through accessors so the embedder can render and re-measure.
#[derive(Debug)]
pub struct MotionController<L, A> {
    config: MotionConfig,
    layout: L,
    port: A,
    bounds: Bounds,
    state: MotionState,
    sampler: VelocitySampler,
    snap: SnapResolver,
    gesture: Option<Gesture>,
    animation: Option<AnimationId>,
    change_primed: bool,
    scrolling_enabled: bool,
    suppressing: bool,
    reachability: Option<Reachability>,
    events: Vec<MotionEvent>,
}

impl<L: ItemLayout, A: AnimationPort> MotionController<L, A> {
    /// Build a controller, moving the port to the rest position.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field of `config`.
    pub fn new(config: MotionConfig, mut layout: L, mut port: A) -> Result<Self> {
        config.validate()?;
        layout.remeasure();
        port.set_offset(config.start_offset);
        let mut controller = Self {
            sampler: VelocitySampler::new(config.timer_interval),
            snap: SnapResolver::new(),
            config,
            layout,
            port,
            bounds: Bounds::COLLAPSED,
            state: MotionState::Ready,
            gesture: None,
            animation: None,
            change_primed: false,
            scrolling_enabled: true,
            suppressing: false,
            reachability: None,
            events: Vec::new(),
        };
        controller.apply_bounds();
        let offset = controller.offset();
        controller.update_reachability(offset);
        Ok(controller)
    }

    // --- accessors ---------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn state(&self) -> MotionState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Current logical offset, read back from the port.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.port.current_offset() - self.config.start_offset
    }

    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Mutable layout access. Call [`remeasure`](Self::remeasure) after
    /// changing the geometry.
    pub fn layout_mut(&mut self) -> &mut L {
        &mut self.layout
    }

    #[must_use]
    pub fn port(&self) -> &A {
        &self.port
    }

    /// Mutable port access, for renderers that need to poll it.
    pub fn port_mut(&mut self) -> &mut A {
        &mut self.port
    }

    /// Whether there is nowhere to move.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.bounds.is_collapsed()
    }

    #[must_use]
    pub fn is_scrolling_enabled(&self) -> bool {
        self.scrolling_enabled
    }

    /// Last reachability reported.
    #[must_use]
    pub fn reachability(&self) -> Reachability {
        self.reachability.unwrap_or_default()
    }

    /// Direction used to break ties when a motion carries none.
    #[must_use]
    pub fn last_valid_direction(&self) -> Direction {
        self.snap.last_valid_direction()
    }

    /// Drain the queued notifications, oldest first.
    pub fn take_events(&mut self) -> Vec<MotionEvent> {
        std::mem::take(&mut self.events)
    }

    // --- time --------------------------------------------------------------

    /// Advance timers and the port to `now`. Call once per frame.
    pub fn tick(&mut self, now: Instant) {
        self.sampler.tick(now);
        while let Some(id) = self.port.advance(now) {
            if self.animation == Some(id) {
                self.animation = None;
                self.complete_motion(self.offset(), true);
            }
        }
    }

    // --- pointer -----------------------------------------------------------

    /// Start tracking. Any animation still in flight at `now` is stopped
    /// where it is and completed first.
    pub fn pointer_down(&mut self, point: Point, now: Instant) {
        self.tick(now);
        let coordinate = self.config.direction.pick(point);
        // A tap that stops a drift must not reach the children.
        let release = self.state != MotionState::Drifting;
        self.flush(release);
        self.gesture = Some(Gesture {
            origin: coordinate,
            tracking_offset: self.offset(),
            moved: false,
        });
        self.sampler.set_current_coordinate(coordinate, now);
        self.sampler.start(now);
        self.transition(MotionState::Tracking);
    }

    /// Follow the pointer, damping any overshoot past the bounds.
    pub fn pointer_move(&mut self, point: Point, now: Instant) {
        if !self.scrolling_enabled {
            self.ignored("pointer_move", "disabled");
            return;
        }
        let coordinate = self.config.direction.pick(point);
        let Some(gesture) = self.gesture.as_mut() else {
            self.ignored("pointer_move", "no gesture");
            return;
        };
        let first_move = !gesture.moved;
        gesture.moved = true;
        let raw = gesture.tracking_offset + (coordinate - gesture.origin);

        self.sampler.set_current_coordinate(coordinate, now);
        if first_move && !self.suppressing {
            self.suppressing = true;
            self.port.suppress_child_interaction(true);
        }
        let shown = self.elastic(raw);
        self.port.set_offset(shown + self.config.start_offset);
    }

    /// End the gesture: bounce back from the elastic zone, or drift.
    pub fn pointer_up(&mut self, now: Instant) {
        if self.gesture.take().is_none() {
            self.ignored("pointer_up", "no gesture");
            return;
        }
        self.sampler.stop(now);
        let offset = self.offset();
        if offset > self.bounds.max {
            self.begin(MotionState::Bouncing, self.bounds.max, EasingKind::Bounce, now);
        } else if offset < self.bounds.min {
            self.begin(MotionState::Bouncing, self.bounds.min, EasingKind::Bounce, now);
        } else {
            self.drift(offset, now);
        }
    }

    // --- navigation --------------------------------------------------------

    /// Page by one viewport toward `dir`, landing on an item boundary.
    pub fn shift(&mut self, dir: Direction, now: Instant) {
        self.tick(now);
        if matches!(self.state, MotionState::Shifting | MotionState::Tracking) {
            self.ignored("shift", self.state.name());
            return;
        }
        if self.is_inert() {
            self.ignored("shift", "inert");
            return;
        }
        self.snap.observe(Some(dir));
        let offset = self.offset();
        let page = self.layout.viewport_extent() - self.config.start_offset;
        let page_target = offset + page * dir.sign();
        let snapped = self
            .snap
            .snapped_offset(&self.layout, page_target, Some(dir), false);
        // An unsnapped minimum can sit inside the last item; clamp both ends.
        let target = self.bounds.clamp(snapped);
        self.begin(MotionState::Shifting, target, EasingKind::Shift, now);
    }

    /// Move to the adjacent item boundary toward `dir`.
    pub fn step(&mut self, dir: Direction, now: Instant) {
        self.goto(GotoTarget::from(dir), now);
    }

    /// Navigate to an item, a literal offset, or the adjacent boundary.
    pub fn goto(&mut self, target: impl Into<GotoTarget>, now: Instant) {
        self.tick(now);
        if self.state == MotionState::Tracking {
            self.ignored("goto", "tracking");
            return;
        }
        if self.is_inert() {
            self.ignored("goto", "inert");
            return;
        }
        let Some(offset) = self.resolve(target.into()) else {
            self.ignored("goto", "unresolved target");
            return;
        };
        let target = self.bounds.clamp(offset);
        self.begin(MotionState::Shifting, target, EasingKind::Shift, now);
    }

    /// [`goto`](Self::goto) with a string target (`prev`, `next`, `-240px`).
    /// Malformed strings are ignored.
    pub fn goto_str(&mut self, target: &str, now: Instant) {
        match target.parse::<GotoTarget>() {
            Ok(target) => self.goto(target, now),
            Err(_err) => self.ignored("goto", "malformed target"),
        }
    }

    /// The previous-button action.
    pub fn press_prev(&mut self, now: Instant) {
        self.press(Direction::Prev, now);
    }

    /// The next-button action.
    pub fn press_next(&mut self, now: Instant) {
        self.press(Direction::Next, now);
    }

    fn press(&mut self, dir: Direction, now: Instant) {
        match self.config.button_action {
            ButtonAction::Shift => self.shift(dir, now),
            ButtonAction::Step => self.step(dir, now),
        }
    }

    // --- content -----------------------------------------------------------

    /// Enable or disable dragging. Disabling returns the strip to its rest
    /// position.
    pub fn set_scrolling_enabled(&mut self, enabled: bool, now: Instant) {
        self.tick(now);
        if !enabled {
            if self.gesture.take().is_some() {
                self.sampler.stop(now);
            }
            self.begin(MotionState::Shifting, self.bounds.max, EasingKind::Shift, now);
        }
        self.scrolling_enabled = enabled;
    }

    /// Re-read the layout, recompute bounds and pull the strip back inside
    /// them.
    pub fn remeasure(&mut self, now: Instant) {
        self.tick(now);
        self.flush(true);
        if self.gesture.take().is_some() {
            self.sampler.stop(now);
            self.release_children();
        }
        self.sampler = VelocitySampler::new(self.config.timer_interval);
        self.snap = SnapResolver::new();
        self.transition(MotionState::Ready);

        self.layout.remeasure();
        self.apply_bounds();

        let offset = self.offset();
        let target = if self.scrolling_enabled {
            self.bounds.clamp(offset)
        } else {
            self.bounds.max
        };
        if target == offset {
            self.update_reachability(self.offset());
        } else {
            self.begin(MotionState::Shifting, target, EasingKind::Shift, now);
        }
    }

    // --- internals ---------------------------------------------------------

    fn resolve(&self, target: GotoTarget) -> Option<f64> {
        let boundary_of = |index: usize| {
            (index < self.layout.count()).then(|| self.layout.boundary_of(index))
        };
        match target {
            GotoTarget::Index(index) => boundary_of(index),
            GotoTarget::Item(id) => self.layout.index_of(id).and_then(boundary_of),
            GotoTarget::Offset(offset) => offset.is_finite().then_some(offset),
            GotoTarget::Prev => self
                .snap
                .next_boundary(&self.layout, self.offset(), Direction::Prev)
                .map(|b| b.offset),
            GotoTarget::Next => self
                .snap
                .next_boundary(&self.layout, self.offset(), Direction::Next)
                .map(|b| b.offset),
        }
    }

    fn elastic(&self, raw: f64) -> f64 {
        let Bounds { min, max } = self.bounds;
        if raw > max {
            max + (raw - max) / self.config.pull_divisor
        } else if raw < min {
            min + (raw - min) / self.config.pull_divisor
        } else {
            raw
        }
    }

    fn drift(&mut self, offset: f64, now: Instant) {
        let PointerSpeed { speed, direction } = self.sampler.pointer_speed();
        self.snap.observe(direction);
        if speed == 0.0 {
            self.settle_now(MotionState::Drifting);
            return;
        }
        let sign = direction.map_or(0.0, Direction::sign);
        let mut target = self
            .bounds
            .clamp(offset + speed * self.config.drift_factor * sign);
        if self.config.snap && !self.snap.is_snapped(&self.layout, target) {
            let snapped = self
                .snap
                .snapped_offset(&self.layout, target, direction, true);
            target = self.bounds.clamp(snapped);
        }
        self.begin(MotionState::Drifting, target, EasingKind::Drift, now);
    }

    /// Animate to `target`, or settle at once if already there.
    fn begin(&mut self, state: MotionState, target: f64, kind: EasingKind, now: Instant) {
        self.flush(true);
        if target == self.offset() {
            self.settle_now(state);
            return;
        }
        self.transition(state);
        self.change_primed = true;
        let request = AnimationRequest {
            target: target + self.config.start_offset,
            duration: self.config.duration_for(kind),
            easing: self.config.bezier_for(kind),
            kind,
        };
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = messages::ANIMATE,
            kind = kind.name(),
            target,
            duration_ms = request.duration.as_millis() as u64
        );
        self.animation = Some(self.port.animate_to(request, now));
    }

    fn settle_now(&mut self, state: MotionState) {
        self.transition(state);
        self.change_primed = true;
        self.complete_motion(self.offset(), true);
    }

    /// Stop a pending animation at its presented offset and complete it.
    fn flush(&mut self, release: bool) {
        let Some(id) = self.animation.take() else {
            return;
        };
        let Cancelled { offset, pending } = self.port.cancel();
        let offset = offset - self.config.start_offset;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = messages::INTERRUPTED,
            offset,
            reported = pending == Some(id)
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (id, pending);
        self.complete_motion(offset, release);
    }

    fn complete_motion(&mut self, offset: f64, release: bool) {
        if self.change_primed {
            self.change_primed = false;
            if let Some(nearest) =
                self.snap
                    .nearest_boundary(&self.layout, offset, Direction::Prev)
            {
                #[cfg(feature = "tracing")]
                tracing::debug!(message = messages::SETTLED, offset, index = nearest.index);
                self.events.push(MotionEvent::Changed {
                    index: nearest.index,
                });
            }
        }
        self.update_reachability(offset);
        self.transition(MotionState::Ready);
        if release {
            self.release_children();
        }
    }

    fn release_children(&mut self) {
        if self.suppressing {
            self.suppressing = false;
            self.port.suppress_child_interaction(false);
        }
    }

    fn update_reachability(&mut self, offset: f64) {
        let now = Reachability::of(offset, self.bounds.min, self.bounds.max);
        if self.reachability != Some(now) {
            self.reachability = Some(now);
            self.events.push(MotionEvent::Reachability(now));
        }
    }

    fn apply_bounds(&mut self) {
        self.bounds = self.compute_bounds();
        if self.config.auto_disable_when_content_fits {
            self.scrolling_enabled = !self.bounds.is_collapsed();
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = messages::BOUNDS,
            min = self.bounds.min,
            max = self.bounds.max,
            enabled = self.scrolling_enabled
        );
    }

    fn compute_bounds(&self) -> Bounds {
        let max = 0.0;
        let overflow = self.layout.content_extent() - self.layout.viewport_extent();
        if self.layout.count() == 0 || overflow <= 0.0 {
            return Bounds::COLLAPSED;
        }
        let mut min = -(overflow + self.config.end_offset);
        if self.config.snap {
            let nearest = self
                .snap
                .snapped_offset(&self.layout, min, Some(Direction::Next), false);
            // Never stop short of the raw minimum: take the next boundary.
            min = if nearest > min {
                self.snap
                    .snapped_offset(&self.layout, min, Some(Direction::Next), true)
            } else {
                nearest
            };
        }
        Bounds {
            min: min.min(max),
            max,
        }
    }

    fn transition(&mut self, to: MotionState) {
        #[cfg(feature = "tracing")]
        if self.state != to {
            tracing::debug!(
                message = messages::STATE,
                from = self.state.name(),
                to = to.name(),
                offset = self.offset()
            );
        }
        self.state = to;
    }

    #[inline]
    fn ignored(&self, command: &'static str, reason: &'static str) {
        #[cfg(feature = "tracing")]
        tracing::trace!(message = messages::IGNORED, command, reason);
        #[cfg(not(feature = "tracing"))]
        let _ = (command, reason);
    }
}
