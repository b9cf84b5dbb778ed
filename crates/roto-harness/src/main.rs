#![forbid(unsafe_code)]

//! Storm runner.
//!
//! Builds a uniform strip, runs a seeded storm against it and prints the
//! JSONL trace to stdout and its checksum to stderr.
//!
//! # Running
//!
//! ```sh
//! ROTO_HARNESS_SEED=7 ROTO_HARNESS_BACKEND=stepped cargo run -p roto-harness
//! ```
//!
//! # Environment
//!
//! | Variable | Default |
//! |----------|---------|
//! | `ROTO_HARNESS_SEED` | `42` |
//! | `ROTO_HARNESS_COMMANDS` | `200` |
//! | `ROTO_HARNESS_ITEMS` | `8` |
//! | `ROTO_HARNESS_BACKEND` | `transition` (or `stepped`) |

use std::io::{self, Write};

use roto_core::{
    AnimationPort, MotionConfig, MotionController, SteppedAnimator, StripLayout,
    TransitionAnimator,
};
use roto_harness::run_storm;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(default)
}

fn run<A: AnimationPort>(port: A, items: usize, seed: u64, commands: usize) -> io::Result<()> {
    let layout = StripLayout::uniform(items, 100.0, 300.0);
    let mut controller =
        MotionController::new(MotionConfig::default(), layout, port).map_err(io::Error::other)?;
    let recorder = run_storm(&mut controller, seed, commands);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    recorder.write_jsonl(&mut out)?;
    out.flush()?;
    eprintln!("{}", recorder.checksum());
    Ok(())
}

fn main() -> io::Result<()> {
    let seed = env_or("ROTO_HARNESS_SEED", 42_u64);
    let commands = env_or("ROTO_HARNESS_COMMANDS", 200_usize);
    let items = env_or("ROTO_HARNESS_ITEMS", 8_usize);
    let backend = std::env::var("ROTO_HARNESS_BACKEND")
        .unwrap_or_else(|_| "transition".to_string())
        .to_ascii_lowercase();

    match backend.as_str() {
        "stepped" | "frame" | "frames" => run(SteppedAnimator::new(0.0), items, seed, commands),
        _ => run(TransitionAnimator::new(0.0), items, seed, commands),
    }
}
