//! Errors at the construction and parsing seams.
//!
//! Runtime commands on the controller never fail; invalid requests degrade to
//! no-ops. Only a malformed configuration or a malformed goto string is
//! reported, and only to the caller that asked for validation or parsing.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A [`MotionConfig`](crate::MotionConfig) value that cannot drive a controller.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("pull divisor must be finite and > 0 (got {0})")]
    PullDivisor(f64),

    #[error("timer interval must be non-zero")]
    ZeroTimerInterval,

    #[error("drift factor must be finite and >= 0 (got {0})")]
    DriftFactor(f64),

    #[error("{name} must be finite (got {value})")]
    NonFinite { name: &'static str, value: f64 },

    #[error("{name} bezier x control points must lie in [0, 1] (got {x1}, {x2})")]
    BezierOutOfRange { name: &'static str, x1: f64, x2: f64 },
}

/// A goto string that is neither `prev`, `next` nor `<integer>px`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseTargetError {
    #[error("empty goto target")]
    Empty,

    #[error("unrecognised goto target: {input}")]
    Unrecognised { input: String },

    #[error("invalid pixel offset: {input}")]
    InvalidOffset { input: String },
}

impl ParseTargetError {
    #[must_use]
    pub fn unrecognised(input: impl Into<String>) -> Self {
        Self::Unrecognised {
            input: input.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_messages_name_the_field() {
        let err = ConfigError::NonFinite {
            name: "start_offset",
            value: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "start_offset must be finite (got inf)");
        assert_eq!(
            ConfigError::ZeroTimerInterval.to_string(),
            "timer interval must be non-zero"
        );
    }

    #[test]
    fn unrecognised_constructor_keeps_input() {
        let err = ParseTargetError::unrecognised("sideways");
        assert_eq!(err.to_string(), "unrecognised goto target: sideways");
    }
}
