#![forbid(unsafe_code)]

//! Deterministic replay tooling for `roto-core`.
//!
//! Everything here runs on a [`VirtualClock`], so a gesture or a storm is a
//! pure function of its inputs:
//!
//! - [`GestureScript`]: hand-written pointer gestures, replayed frame by frame.
//! - [`GestureStorm`] / [`run_storm`]: seeded command mixes for fault injection.
//! - [`TraceRecorder`]: JSONL traces with a blake3 checksum for golden comparison.

pub mod clock;
pub mod gesture;
pub mod storm;
pub mod trace;

pub use clock::VirtualClock;
pub use gesture::{GestureScript, GestureStep};
pub use storm::{GestureStorm, StormCommand, run_storm};
pub use trace::{TraceLine, TraceRecorder, parse_jsonl};
