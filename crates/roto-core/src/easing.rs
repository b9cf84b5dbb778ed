#![forbid(unsafe_code)]

//! Cubic-bezier easing curves.
//!
//! Drift, bounce and shift animations each follow a fixed parametrised
//! curve rather than a simulated spring. A [`CubicBezier`] is defined by its
//! two inner control points, with the outer points pinned at `(0, 0)` and
//! `(1, 1)`, exactly like a CSS `cubic-bezier()` timing function.
//!
//! # Invariants
//!
//! 1. `transform(t)` returns `0.0` for `t <= 0` and `1.0` for `t >= 1`.
//! 2. For x control points in `[0, 1]` the curve is a function of `t`
//!    (single valued), so the solve for the curve parameter is well defined.
//!
//! # Failure Modes
//!
//! - Newton–Raphson may stall on flat regions of the x curve; a bisection
//!   pass then finds the parameter instead.

/// A cubic-bezier timing curve through `(0,0)`, `(x1,y1)`, `(x2,y2)`, `(1,1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "[f64; 4]", into = "[f64; 4]"))]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl CubicBezier {
    /// Linear timing.
    pub const LINEAR: Self = Self::new(0.0, 0.0, 1.0, 1.0);

    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Whether both x control points lie in `[0, 1]`.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.x1) && (0.0..=1.0).contains(&self.x2)
    }

    /// Map a linear time fraction to eased progress.
    #[must_use]
    pub fn transform(&self, fraction: f64) -> f64 {
        if fraction <= 0.0 || fraction.is_nan() {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }

        let cx = 3.0 * self.x1;
        let bx = 3.0 * (self.x2 - self.x1) - cx;
        let ax = 1.0 - cx - bx;

        let cy = 3.0 * self.y1;
        let by = 3.0 * (self.y2 - self.y1) - cy;
        let ay = 1.0 - cy - by;

        let sample = |a: f64, b: f64, c: f64, t: f64| ((a * t + b) * t + c) * t;
        let derivative = |a: f64, b: f64, c: f64, t: f64| (3.0 * a * t + 2.0 * b) * t + c;

        let mut t = fraction;
        let mut solved = false;
        for _ in 0..8 {
            let x = sample(ax, bx, cx, t) - fraction;
            if x.abs() < 1e-7 {
                solved = true;
                break;
            }
            let dx = derivative(ax, bx, cx, t);
            if dx.abs() < 1e-7 {
                break;
            }
            t = (t - x / dx).clamp(0.0, 1.0);
        }

        if !solved {
            let (mut lo, mut hi) = (0.0, 1.0);
            t = fraction;
            for _ in 0..32 {
                let delta = sample(ax, bx, cx, t) - fraction;
                if delta.abs() < 1e-7 {
                    break;
                }
                if delta > 0.0 {
                    hi = t;
                } else {
                    lo = t;
                }
                t = 0.5 * (lo + hi);
            }
        }

        sample(ay, by, cy, t)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::LINEAR
    }
}

impl From<[f64; 4]> for CubicBezier {
    fn from([x1, y1, x2, y2]: [f64; 4]) -> Self {
        Self::new(x1, y1, x2, y2)
    }
}

impl From<CubicBezier> for [f64; 4] {
    fn from(b: CubicBezier) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// Which configured curve and duration an animation uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EasingKind {
    /// Programmatic navigation: shift, step, goto.
    Shift,
    /// Momentum after release.
    Drift,
    /// Elastic return to a hard bound.
    Bounce,
}

impl EasingKind {
    /// Label used in logs and traces.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Shift => "shift",
            Self::Drift => "drift",
            Self::Bounce => "bounce",
        }
    }
}
