#![forbid(unsafe_code)]

//! Events produced by the controller for the embedding UI.

/// Whether the strip can still move toward either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reachability {
    /// Offset is below the maximum: content start is not fully revealed.
    pub can_go_prev: bool,
    /// Offset is above the minimum: content end is not fully revealed.
    pub can_go_next: bool,
}

impl Reachability {
    /// Reachability of `offset` within `[min, max]`.
    #[must_use]
    pub fn of(offset: f64, min: f64, max: f64) -> Self {
        Self {
            can_go_prev: offset < max,
            can_go_next: offset > min,
        }
    }
}

/// Notification drained with [`MotionController::take_events`](crate::MotionController::take_events).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "event", rename_all = "snake_case"))]
pub enum MotionEvent {
    /// A motion settled; `index` is the item nearest the leading edge.
    Changed { index: usize },
    /// Edge reachability changed.
    Reachability(Reachability),
}
