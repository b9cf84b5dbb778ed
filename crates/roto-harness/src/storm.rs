#![forbid(unsafe_code)]

//! Seeded command storms.
//!
//! A [`GestureStorm`] turns a seed into a reproducible mix of pointer
//! gestures, navigation commands, toggles and idle time. Pointer streams are
//! always well formed: every `Down` is eventually closed by an `Up`, and
//! moves only appear between the two.
//!
//! # Invariants
//!
//! 1. The same seed, span and item count produce the same commands.
//! 2. Replaying the same commands against identically built controllers
//!    produces byte-identical traces.
//!
//! # JSONL Schema
//!
//! The trace of [`run_storm`] uses the [`TraceLine`](crate::trace::TraceLine)
//! schema; the storm itself is reported through `tracing`:
//!
//! ```text
//! roto.storm{seed=42 count=200}: harness.storm_complete lines=311 checksum="blake3:…"
//! ```

use roto_core::{AnimationPort, Direction, GotoTarget, ItemLayout, MotionController};
use web_time::Duration;

use crate::clock::VirtualClock;
use crate::gesture::{DEFAULT_FRAME, run_for, settle};
use crate::trace::TraceRecorder;

/// Textual targets exercised by [`StormCommand::GotoStr`], malformed ones included.
const TEXT_TARGETS: [&str; 6] = ["prev", "next", "-150px", "40px", "sideways", ""];

// ============================================================================
// Commands
// ============================================================================

/// One input applied to the controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StormCommand {
    Down(f64),
    Move(f64),
    Up,
    Wait(Duration),
    Shift(Direction),
    Step(Direction),
    GotoIndex(usize),
    GotoOffset(f64),
    GotoStr(&'static str),
    SetEnabled(bool),
    Remeasure,
}

impl StormCommand {
    /// Stable name for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Down(_) => "down",
            Self::Move(_) => "move",
            Self::Up => "up",
            Self::Wait(_) => "wait",
            Self::Shift(_) => "shift",
            Self::Step(_) => "step",
            Self::GotoIndex(_) => "goto_index",
            Self::GotoOffset(_) => "goto_offset",
            Self::GotoStr(_) => "goto_str",
            Self::SetEnabled(_) => "set_enabled",
            Self::Remeasure => "remeasure",
        }
    }
}

// ============================================================================
// Generation
// ============================================================================

/// Simple deterministic PRNG (xorshift64).
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    /// Uniform in `0..max`; zero when `max` is zero.
    fn below(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        self.next() % max
    }

    /// Whole number in `-span..=span`.
    fn signed(&mut self, span: u64) -> f64 {
        self.below(2 * span + 1) as f64 - span as f64
    }

    fn direction(&mut self) -> Direction {
        if self.below(2) == 0 {
            Direction::Prev
        } else {
            Direction::Next
        }
    }
}

/// Seeded command generator.
#[derive(Debug, Clone, Copy)]
pub struct GestureStorm {
    seed: u64,
    span: u64,
    items: usize,
}

impl GestureStorm {
    /// A storm with 120px pointer steps over a five item strip.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            span: 120,
            items: 5,
        }
    }

    /// Largest single pointer step.
    #[must_use]
    pub fn with_span(mut self, span: u64) -> Self {
        self.span = span.max(1);
        self
    }

    /// Item count of the target strip; index gotos sometimes go one past it.
    #[must_use]
    pub fn with_items(mut self, items: usize) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// At least `count` commands; one more when a gesture has to be closed.
    #[must_use]
    pub fn generate(&self, count: usize) -> Vec<StormCommand> {
        let mut rng = Rng::new(self.seed);
        let mut commands = Vec::with_capacity(count + 1);
        let mut pointer: Option<f64> = None;

        while commands.len() < count {
            let command = match pointer {
                Some(coord) => match rng.below(10) {
                    0..=5 => {
                        let next = coord + rng.signed(self.span);
                        pointer = Some(next);
                        StormCommand::Move(next)
                    }
                    6 | 7 => StormCommand::Wait(Duration::from_millis(1 + rng.below(80))),
                    _ => {
                        pointer = None;
                        StormCommand::Up
                    }
                },
                None => match rng.below(20) {
                    0..=4 => {
                        let coord = rng.signed(4 * self.span);
                        pointer = Some(coord);
                        StormCommand::Down(coord)
                    }
                    5..=7 => StormCommand::Wait(Duration::from_millis(1 + rng.below(400))),
                    8 | 9 => StormCommand::Shift(rng.direction()),
                    10 | 11 => StormCommand::Step(rng.direction()),
                    12 | 13 => StormCommand::GotoIndex(rng.below(self.items as u64 + 1) as usize),
                    14 => StormCommand::GotoOffset(rng.signed(100 * self.items as u64)),
                    15 | 16 => {
                        let pick = rng.below(TEXT_TARGETS.len() as u64) as usize;
                        StormCommand::GotoStr(TEXT_TARGETS[pick])
                    }
                    17 | 18 => StormCommand::SetEnabled(rng.below(4) != 0),
                    _ => StormCommand::Remeasure,
                },
            };
            commands.push(command);
        }
        if pointer.is_some() {
            commands.push(StormCommand::Up);
        }
        commands
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Apply one command, then let one frame pass.
pub fn apply<L: ItemLayout, A: AnimationPort>(
    controller: &mut MotionController<L, A>,
    clock: &mut VirtualClock,
    command: StormCommand,
    recorder: &mut TraceRecorder,
) {
    let now = clock.now();
    let axis = controller.config().direction;
    match command {
        StormCommand::Down(coord) => controller.pointer_down(axis.point_at(coord), now),
        StormCommand::Move(coord) => controller.pointer_move(axis.point_at(coord), now),
        StormCommand::Up => controller.pointer_up(now),
        StormCommand::Wait(duration) => {
            run_for(controller, clock, duration, DEFAULT_FRAME, recorder);
            return;
        }
        StormCommand::Shift(dir) => controller.shift(dir, now),
        StormCommand::Step(dir) => controller.step(dir, now),
        StormCommand::GotoIndex(index) => controller.goto(index, now),
        StormCommand::GotoOffset(offset) => controller.goto(GotoTarget::Offset(offset), now),
        StormCommand::GotoStr(text) => controller.goto_str(text, now),
        StormCommand::SetEnabled(enabled) => controller.set_scrolling_enabled(enabled, now),
        StormCommand::Remeasure => controller.remeasure(now),
    }
    recorder.observe(controller, clock);
    run_for(controller, clock, DEFAULT_FRAME, DEFAULT_FRAME, recorder);
}

/// Generate `count` commands from `seed`, replay them, then settle.
pub fn run_storm<L: ItemLayout, A: AnimationPort>(
    controller: &mut MotionController<L, A>,
    seed: u64,
    count: usize,
) -> TraceRecorder {
    let span = tracing::info_span!("roto.storm", seed, count);
    let _guard = span.enter();

    let items = controller.layout().count();
    let commands = GestureStorm::new(seed).with_items(items).generate(count);
    let mut clock = VirtualClock::new();
    let mut recorder = TraceRecorder::new();
    recorder.observe(controller, &clock);
    for command in commands {
        tracing::trace!(message = "harness.storm_command", command = command.name());
        apply(controller, &mut clock, command, &mut recorder);
    }
    settle(controller, &mut clock, DEFAULT_FRAME, &mut recorder);
    tracing::info!(
        message = "harness.storm_complete",
        lines = recorder.lines().len() as u64,
        checksum = %recorder.checksum()
    );
    recorder
}
