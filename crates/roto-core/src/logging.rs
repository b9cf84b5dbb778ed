#![forbid(unsafe_code)]

//! Structured logging.
//!
//! With the `tracing` feature enabled, the tracing macros are re-exported
//! here and at the crate root. The controller logs under stable message
//! names so subscribers can filter on them:
//!
//! | Message | Level | Fields |
//! |---------|-------|--------|
//! | `motion.state` | debug | `from`, `to`, `offset` |
//! | `motion.animate` | debug | `kind`, `target`, `duration_ms` |
//! | `motion.settled` | debug | `offset`, `index` |
//! | `motion.bounds` | debug | `min`, `max`, `enabled` |
//! | `motion.interrupted` | debug | `offset`, `reported` |
//! | `motion.ignored` | trace | `command`, `reason` |
//!
//! Without the feature nothing is compiled in.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, info_span, trace, trace_span, warn};

/// Message names emitted by the controller.
pub mod messages {
    pub const STATE: &str = "motion.state";
    pub const ANIMATE: &str = "motion.animate";
    pub const SETTLED: &str = "motion.settled";
    pub const BOUNDS: &str = "motion.bounds";
    pub const IGNORED: &str = "motion.ignored";
    pub const INTERRUPTED: &str = "motion.interrupted";
}
