#![forbid(unsafe_code)]

//! JSONL traces of controller output.
//!
//! A [`TraceRecorder`] is fed the controller after every input and every
//! frame. It records one line per emitted [`MotionEvent`] and one line per
//! state change, stamped with virtual milliseconds, so that two runs of the
//! same script can be compared byte for byte.
//!
//! # JSONL Schema
//!
//! ```json
//! {"seq":0,"at_ms":0,"state":"tracking","offset":0.0}
//! {"seq":1,"at_ms":1840,"state":"ready","offset":-200.0,"motion":{"event":"changed","index":2}}
//! {"seq":2,"at_ms":1840,"state":"ready","offset":-200.0,"motion":{"event":"reachability","can_go_prev":true,"can_go_next":false}}
//! ```

use std::io::{self, Write};

use roto_core::{AnimationPort, ItemLayout, MotionController, MotionEvent, MotionState};
use serde::{Deserialize, Serialize};

use crate::clock::VirtualClock;

/// One trace record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceLine {
    pub seq: u64,
    pub at_ms: u64,
    pub state: String,
    pub offset: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub motion: Option<MotionEvent>,
}

/// Collects [`TraceLine`]s from a controller.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    lines: Vec<TraceLine>,
    last_state: Option<MotionState>,
}

impl TraceRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the controller's events and note a state change, if any.
    pub fn observe<L: ItemLayout, A: AnimationPort>(
        &mut self,
        controller: &mut MotionController<L, A>,
        clock: &VirtualClock,
    ) {
        let at_ms = clock.elapsed_ms();
        let state = controller.state();
        let offset = controller.offset();
        for event in controller.take_events() {
            self.push(at_ms, state, offset, Some(event));
        }
        if self.last_state != Some(state) {
            self.last_state = Some(state);
            self.push(at_ms, state, offset, None);
        }
    }

    fn push(&mut self, at_ms: u64, state: MotionState, offset: f64, motion: Option<MotionEvent>) {
        self.lines.push(TraceLine {
            seq: self.lines.len() as u64,
            at_ms,
            state: state.name().to_owned(),
            offset,
            motion,
        });
    }

    #[must_use]
    pub fn lines(&self) -> &[TraceLine] {
        &self.lines
    }

    /// Every recorded event, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<MotionEvent> {
        self.lines.iter().filter_map(|line| line.motion).collect()
    }

    /// Indices carried by the recorded change notifications.
    #[must_use]
    pub fn changed_indices(&self) -> Vec<usize> {
        self.lines
            .iter()
            .filter_map(|line| match line.motion {
                Some(MotionEvent::Changed { index }) => Some(index),
                _ => None,
            })
            .collect()
    }

    /// Write one JSON object per line.
    ///
    /// # Errors
    ///
    /// Propagates write failures.
    pub fn write_jsonl<W: Write>(&self, mut out: W) -> io::Result<()> {
        for line in &self.lines {
            serde_json::to_writer(&mut out, line)?;
            out.write_all(b"\n")?;
        }
        Ok(())
    }

    /// The whole trace as a JSONL string.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail, and every field serialises.
        let _ = self.write_jsonl(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// `blake3:<hex>` digest of [`to_jsonl`](Self::to_jsonl).
    #[must_use]
    pub fn checksum(&self) -> String {
        format!("blake3:{}", blake3::hash(self.to_jsonl().as_bytes()).to_hex())
    }
}

/// Parse a JSONL trace, skipping blank lines.
///
/// # Errors
///
/// Returns the first line that is not a valid [`TraceLine`].
pub fn parse_jsonl(input: &str) -> Result<Vec<TraceLine>, serde_json::Error> {
    input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(serde_json::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roto_core::{Direction, MotionConfig, StripLayout, TransitionAnimator};
    use web_time::Duration;

    fn shifted() -> TraceRecorder {
        let mut clock = VirtualClock::new();
        let mut c = MotionController::new(
            MotionConfig::default(),
            StripLayout::uniform(5, 100.0, 300.0),
            TransitionAnimator::new(0.0),
        )
        .expect("valid");
        let mut rec = TraceRecorder::new();
        rec.observe(&mut c, &clock);
        c.shift(Direction::Next, clock.now());
        rec.observe(&mut c, &clock);
        let now = clock.advance(Duration::from_millis(250));
        c.tick(now);
        rec.observe(&mut c, &clock);
        rec
    }

    #[test]
    fn records_events_and_state_changes() {
        let rec = shifted();
        let states: Vec<&str> = rec
            .lines()
            .iter()
            .filter(|l| l.motion.is_none())
            .map(|l| l.state.as_str())
            .collect();
        assert_eq!(states, vec!["ready", "shifting", "ready"]);
        assert_eq!(rec.changed_indices(), vec![2]);
        assert_eq!(rec.lines().last().map(|l| l.at_ms), Some(250));
    }

    #[test]
    fn jsonl_lines_parse_back() {
        let rec = shifted();
        let jsonl = rec.to_jsonl();
        assert_eq!(jsonl.lines().count(), rec.lines().len());
        for line in jsonl.lines() {
            let val: serde_json::Value = serde_json::from_str(line)
                .unwrap_or_else(|e| panic!("Failed to parse JSONL: {e}\n{line}"));
            assert!(val["state"].is_string(), "Missing state field");
        }
        assert_eq!(parse_jsonl(&jsonl).expect("valid"), rec.lines());
    }

    #[test]
    fn checksum_is_stable_across_runs() {
        let a = shifted().checksum();
        let b = shifted().checksum();
        assert!(a.starts_with("blake3:"));
        assert_eq!(a, b);
    }

    #[test]
    fn malformed_line_is_an_error() {
        assert!(parse_jsonl("{\"seq\":0}\n").is_err());
        assert!(parse_jsonl("\n\n").expect("blank").is_empty());
    }
}
