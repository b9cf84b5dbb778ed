#![forbid(unsafe_code)]

//! Motion tuning.
//!
//! [`MotionConfig`] carries every recognised option. The defaults give a
//! snappy 200 ms shift, a long 1.8 s drift, a 400 ms bounce and a 1.7 pull
//! divisor. Builders follow the `with_*` convention.
//!
//! With the `serde` feature the config (de)serialises with missing fields
//! defaulted and durations written as integer milliseconds:
//!
//! ```ignore
//! let config: MotionConfig = serde_json::from_str(r#"{ "direction": "v", "drift_duration": 900 }"#)?;
//! ```

use web_time::Duration;

use crate::axis::Axis;
use crate::easing::{CubicBezier, EasingKind};
use crate::error::ConfigError;

/// What the embedder's prev/next buttons do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum ButtonAction {
    /// Page by one viewport extent.
    #[default]
    Shift,
    /// Move to the adjacent item.
    Step,
}

/// Tuning for a [`MotionController`](crate::MotionController).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MotionConfig {
    /// Axis the strip moves along (default: horizontal).
    pub direction: Axis,
    /// Duration of shift/step/goto animations (default: 200ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub shift_duration: Duration,
    /// Curve for shift/step/goto animations (default: 0, 0, 0, 1).
    pub shift_bezier: CubicBezier,
    /// Duration of the momentum drift after release (default: 1800ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub drift_duration: Duration,
    /// Drift distance per unit of release speed, in ms (default: 500).
    pub drift_factor: f64,
    /// Curve for drift (default: 0, 0, 0.3, 1).
    pub drift_bezier: CubicBezier,
    /// Duration of the elastic bounce back to a bound (default: 400ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub bounce_duration: Duration,
    /// Curve for bounce (default: 0, 0.5, 0.5, 1).
    pub bounce_bezier: CubicBezier,
    /// Divisor applied to the part of a drag beyond a bound (default: 1.7).
    pub pull_divisor: f64,
    /// Velocity sampling period (default: 50ms).
    #[cfg_attr(feature = "serde", serde(with = "duration_ms"))]
    pub timer_interval: Duration,
    /// Settle on item boundaries (default: true).
    pub snap: bool,
    /// Rendered offset of the rest position (default: 0).
    pub start_offset: f64,
    /// Extra travel allowed past the content end (default: 0).
    pub end_offset: f64,
    /// Disable scrolling whenever the content fits the viewport (default: true).
    #[cfg_attr(feature = "serde", serde(alias = "auto_disable"))]
    pub auto_disable_when_content_fits: bool,
    /// Behaviour of prev/next buttons (default: shift).
    pub button_action: ButtonAction,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            direction: Axis::Horizontal,
            shift_duration: Duration::from_millis(200),
            shift_bezier: CubicBezier::new(0.0, 0.0, 0.0, 1.0),
            drift_duration: Duration::from_millis(1800),
            drift_factor: 500.0,
            drift_bezier: CubicBezier::new(0.0, 0.0, 0.3, 1.0),
            bounce_duration: Duration::from_millis(400),
            bounce_bezier: CubicBezier::new(0.0, 0.5, 0.5, 1.0),
            pull_divisor: 1.7,
            timer_interval: Duration::from_millis(50),
            snap: true,
            start_offset: 0.0,
            end_offset: 0.0,
            auto_disable_when_content_fits: true,
            button_action: ButtonAction::Shift,
        }
    }
}

impl MotionConfig {
    #[must_use]
    pub fn with_direction(mut self, direction: Axis) -> Self {
        self.direction = direction;
        self
    }

    #[must_use]
    pub fn with_snap(mut self, snap: bool) -> Self {
        self.snap = snap;
        self
    }

    #[must_use]
    pub fn with_pull_divisor(mut self, divisor: f64) -> Self {
        self.pull_divisor = divisor;
        self
    }

    #[must_use]
    pub fn with_drift(mut self, duration: Duration, factor: f64) -> Self {
        self.drift_duration = duration;
        self.drift_factor = factor;
        self
    }

    #[must_use]
    pub fn with_shift_duration(mut self, duration: Duration) -> Self {
        self.shift_duration = duration;
        self
    }

    #[must_use]
    pub fn with_bounce_duration(mut self, duration: Duration) -> Self {
        self.bounce_duration = duration;
        self
    }

    #[must_use]
    pub fn with_timer_interval(mut self, interval: Duration) -> Self {
        self.timer_interval = interval;
        self
    }

    #[must_use]
    pub fn with_offsets(mut self, start: f64, end: f64) -> Self {
        self.start_offset = start;
        self.end_offset = end;
        self
    }

    #[must_use]
    pub fn with_auto_disable(mut self, enabled: bool) -> Self {
        self.auto_disable_when_content_fits = enabled;
        self
    }

    #[must_use]
    pub fn with_button_action(mut self, action: ButtonAction) -> Self {
        self.button_action = action;
        self
    }

    /// Duration configured for an animation kind.
    #[must_use]
    pub fn duration_for(&self, kind: EasingKind) -> Duration {
        match kind {
            EasingKind::Shift => self.shift_duration,
            EasingKind::Drift => self.drift_duration,
            EasingKind::Bounce => self.bounce_duration,
        }
    }

    /// Curve configured for an animation kind.
    #[must_use]
    pub fn bezier_for(&self, kind: EasingKind) -> CubicBezier {
        match kind {
            EasingKind::Shift => self.shift_bezier,
            EasingKind::Drift => self.drift_bezier,
            EasingKind::Bounce => self.bounce_bezier,
        }
    }

    /// Reject values the controller's arithmetic cannot use.
    ///
    /// # Errors
    ///
    /// Returns the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.pull_divisor.is_finite() || self.pull_divisor <= 0.0 {
            return Err(ConfigError::PullDivisor(self.pull_divisor));
        }
        if self.timer_interval.is_zero() {
            return Err(ConfigError::ZeroTimerInterval);
        }
        if !self.drift_factor.is_finite() || self.drift_factor < 0.0 {
            return Err(ConfigError::DriftFactor(self.drift_factor));
        }
        for (name, value) in [
            ("start_offset", self.start_offset),
            ("end_offset", self.end_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { name, value });
            }
        }
        for kind in [EasingKind::Shift, EasingKind::Drift, EasingKind::Bounce] {
            let b = self.bezier_for(kind);
            if !b.is_valid() {
                return Err(ConfigError::BezierOutOfRange {
                    name: kind.name(),
                    x1: b.x1,
                    x2: b.x2,
                });
            }
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use web_time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tuning() {
        let c = MotionConfig::default();
        assert_eq!(c.shift_duration, Duration::from_millis(200));
        assert_eq!(c.drift_duration, Duration::from_millis(1800));
        assert_eq!(c.bounce_duration, Duration::from_millis(400));
        assert_eq!(c.timer_interval, Duration::from_millis(50));
        assert_eq!(c.drift_factor, 500.0);
        assert_eq!(c.pull_divisor, 1.7);
        assert!(c.snap);
        assert!(c.auto_disable_when_content_fits);
        assert_eq!(c.button_action, ButtonAction::Shift);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn kind_lookup() {
        let c = MotionConfig::default();
        assert_eq!(c.duration_for(EasingKind::Bounce), c.bounce_duration);
        assert_eq!(c.bezier_for(EasingKind::Drift), c.drift_bezier);
    }

    #[test]
    fn validate_rejects_bad_pull_divisor() {
        let c = MotionConfig::default().with_pull_divisor(0.0);
        assert_eq!(c.validate(), Err(ConfigError::PullDivisor(0.0)));
        let c = MotionConfig::default().with_pull_divisor(f64::NAN);
        assert!(matches!(c.validate(), Err(ConfigError::PullDivisor(_))));
    }

    #[test]
    fn validate_rejects_zero_timer() {
        let c = MotionConfig::default().with_timer_interval(Duration::ZERO);
        assert_eq!(c.validate(), Err(ConfigError::ZeroTimerInterval));
    }

    #[test]
    fn validate_rejects_negative_drift_factor() {
        let c = MotionConfig::default().with_drift(Duration::from_millis(100), -1.0);
        assert_eq!(c.validate(), Err(ConfigError::DriftFactor(-1.0)));
    }

    #[test]
    fn validate_rejects_non_finite_offsets() {
        let c = MotionConfig::default().with_offsets(0.0, f64::INFINITY);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::NonFinite {
                name: "end_offset",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_bezier_x_out_of_range() {
        let mut c = MotionConfig::default();
        c.bounce_bezier = CubicBezier::new(0.0, 0.0, 1.5, 1.0);
        assert!(matches!(
            c.validate(),
            Err(ConfigError::BezierOutOfRange { name: "bounce", .. })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_partial_json_with_defaults() {
        let c: MotionConfig = serde_json::from_str(
            r#"{ "direction": "v", "drift_duration": 900, "drift_bezier": [0, 0, 0.5, 1], "auto_disable": false }"#,
        )
        .expect("valid config json");
        assert_eq!(c.direction, Axis::Vertical);
        assert_eq!(c.drift_duration, Duration::from_millis(900));
        assert_eq!(c.drift_bezier, CubicBezier::new(0.0, 0.0, 0.5, 1.0));
        assert!(!c.auto_disable_when_content_fits);
        assert_eq!(c.shift_duration, Duration::from_millis(200));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serializes_durations_as_millis() {
        let json = serde_json::to_value(MotionConfig::default()).expect("serializable");
        assert_eq!(json["timer_interval"], 50);
        assert_eq!(json["button_action"], "shift");
        assert_eq!(json["direction"], "horizontal");
    }
}
