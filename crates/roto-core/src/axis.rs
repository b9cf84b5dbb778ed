#![forbid(unsafe_code)]

//! Orientation of the strip and direction of travel along it.
//!
//! Offsets are signed scalars along a single [`Axis`]. The rest position is
//! `0`; content scrolls toward its end as the offset decreases, so every item
//! boundary is `<= 0`.
//!
//! [`Direction`] names the two ways the strip can travel:
//!
//! | Direction | Offset | Moves toward |
//! |-----------|--------|--------------|
//! | `Prev`    | grows  | content start |
//! | `Next`    | shrinks| content end   |

/// Orientation of a strip. Immutable per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Axis {
    /// Items laid out left to right.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "h"))]
    Horizontal,
    /// Items laid out top to bottom.
    #[cfg_attr(feature = "serde", serde(alias = "v"))]
    Vertical,
}

impl Axis {
    /// Name of the measured dimension.
    #[must_use]
    pub const fn measure_name(self) -> &'static str {
        match self {
            Self::Horizontal => "width",
            Self::Vertical => "height",
        }
    }

    /// Name of the offset coordinate.
    #[must_use]
    pub const fn offset_name(self) -> &'static str {
        match self {
            Self::Horizontal => "left",
            Self::Vertical => "top",
        }
    }

    /// Name of the pointer coordinate read for this axis.
    #[must_use]
    pub const fn coordinate_name(self) -> &'static str {
        match self {
            Self::Horizontal => "x",
            Self::Vertical => "y",
        }
    }

    /// The other axis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Project a pointer position onto this axis.
    #[inline]
    #[must_use]
    pub const fn pick(self, point: Point) -> f64 {
        match self {
            Self::Horizontal => point.x,
            Self::Vertical => point.y,
        }
    }

    /// A point whose coordinate on this axis is `coordinate`.
    #[must_use]
    pub const fn point_at(self, coordinate: f64) -> Point {
        match self {
            Self::Horizontal => Point::new(coordinate, 0.0),
            Self::Vertical => Point::new(0.0, coordinate),
        }
    }
}

/// A pointer position in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Direction of travel along the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Offset increases; content moves back toward its start.
    Prev,
    /// Offset decreases; content moves toward its end.
    Next,
}

impl Direction {
    /// `+1.0` for [`Prev`](Self::Prev), `-1.0` for [`Next`](Self::Next).
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Prev => 1.0,
            Self::Next => -1.0,
        }
    }

    /// Direction of a signed displacement; `None` for zero (or NaN).
    #[must_use]
    pub fn from_delta(delta: f64) -> Option<Self> {
        if delta > 0.0 {
            Some(Self::Prev)
        } else if delta < 0.0 {
            Some(Self::Next)
        } else {
            None
        }
    }

    /// The opposite direction.
    #[must_use]
    pub const fn reverse(self) -> Self {
        match self {
            Self::Prev => Self::Next,
            Self::Next => Self::Prev,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_uses_axis_coordinate() {
        let p = Point::new(12.0, -3.5);
        assert_eq!(Axis::Horizontal.pick(p), 12.0);
        assert_eq!(Axis::Vertical.pick(p), -3.5);
        assert_eq!(Axis::Vertical.pick(Axis::Vertical.point_at(7.0)), 7.0);
        assert_eq!(Axis::Horizontal.point_at(7.0), Point::new(7.0, 0.0));
    }

    #[test]
    fn axis_names() {
        assert_eq!(Axis::Horizontal.measure_name(), "width");
        assert_eq!(Axis::Vertical.offset_name(), "top");
        assert_eq!(Axis::Vertical.coordinate_name(), "y");
        assert_eq!(Axis::Horizontal.opposite(), Axis::Vertical);
    }

    #[test]
    fn direction_from_delta() {
        assert_eq!(Direction::from_delta(4.0), Some(Direction::Prev));
        assert_eq!(Direction::from_delta(-0.5), Some(Direction::Next));
        assert_eq!(Direction::from_delta(0.0), None);
        assert_eq!(Direction::from_delta(f64::NAN), None);
    }

    #[test]
    fn direction_sign_and_reverse() {
        assert_eq!(Direction::Prev.sign(), 1.0);
        assert_eq!(Direction::Next.sign(), -1.0);
        assert_eq!(Direction::Next.reverse(), Direction::Prev);
    }
}
