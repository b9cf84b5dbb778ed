#![forbid(unsafe_code)]

//! Item-boundary search for snapping.
//!
//! [`SnapResolver`] answers two questions about an offset and a direction of
//! travel:
//!
//! - **nearest**: the boundary the strip has reached but not yet overshot,
//!   looking back against the direction of travel;
//! - **next**: the adjacent boundary in the direction of travel, skipping
//!   items stacked on the same boundary.
//!
//! Searching toward the end ([`Direction::Next`]) scans items start to end;
//! searching toward the start ([`Direction::Prev`]) scans end to start. The
//! per-item extent decides overshoot at item edges, so zero-extent and
//! stacked items resolve deterministically.
//!
//! # Invariants
//!
//! 1. On a boundary shared by a run of stacked items, a `Next` search stops
//!    at the first item of the run and a `Prev` search at the last.
//! 2. For a contiguous layout, snapping an already snapped offset returns it
//!    unchanged.
//! 3. `next_boundary` differs from `nearest_boundary` unless no further item
//!    exists in the direction of travel.
//!
//! # Failure Modes
//!
//! - An empty layout has no boundaries: searches return `None` and
//!   `snapped_offset` returns its input.

use crate::axis::Direction;
use crate::layout::ItemLayout;

/// An item boundary: the item index and the offset at which it is flush
/// with the leading edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    pub index: usize,
    pub offset: f64,
}

/// Boundary search, remembering the last unambiguous direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapResolver {
    last_valid_direction: Direction,
}

impl Default for SnapResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapResolver {
    /// A resolver whose fallback direction is toward the content end.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_valid_direction: Direction::Next,
        }
    }

    /// Direction used when a request carries none.
    #[inline]
    #[must_use]
    pub const fn last_valid_direction(&self) -> Direction {
        self.last_valid_direction
    }

    /// Remember a direction observation; `None` leaves the fallback as is.
    pub fn observe(&mut self, direction: Option<Direction>) {
        if let Some(direction) = direction {
            self.last_valid_direction = direction;
        }
    }

    /// The boundary at or behind `offset` relative to `dir`.
    #[must_use]
    pub fn nearest_boundary<L: ItemLayout + ?Sized>(
        &self,
        layout: &L,
        offset: f64,
        dir: Direction,
    ) -> Option<Boundary> {
        let count = layout.count();
        if count == 0 {
            return None;
        }
        let mut found = Boundary {
            index: 0,
            offset: layout.boundary_of(0),
        };
        match dir {
            Direction::Next => {
                for index in 0..count {
                    let pos = layout.boundary_of(index);
                    found = Boundary { index, offset: pos };
                    if pos <= offset {
                        break;
                    }
                    // Far edge of this item, in content coordinates.
                    if -pos + layout.extent_of(index) > -offset {
                        break;
                    }
                }
            }
            Direction::Prev => {
                for index in (0..count).rev() {
                    let pos = layout.boundary_of(index);
                    found = Boundary { index, offset: pos };
                    if pos >= offset {
                        break;
                    }
                    let prev_edge = match index.checked_sub(1) {
                        Some(prev) => pos + layout.extent_of(prev),
                        None => pos,
                    };
                    if prev_edge > offset {
                        break;
                    }
                }
            }
        }
        Some(found)
    }

    /// The adjacent boundary in the direction of travel, past any stacked
    /// items sharing the nearest boundary.
    #[must_use]
    pub fn next_boundary<L: ItemLayout + ?Sized>(
        &self,
        layout: &L,
        offset: f64,
        dir: Direction,
    ) -> Option<Boundary> {
        let current = self.nearest_boundary(layout, offset, dir)?;
        let count = layout.count();
        let neighbor = |i: usize| match dir {
            Direction::Next => (i + 1 < count).then_some(i + 1),
            Direction::Prev => i.checked_sub(1),
        };
        let mut index = current.index;
        while let Some(n) = neighbor(index) {
            if layout.boundary_of(index) != current.offset {
                break;
            }
            index = n;
        }
        Some(Boundary {
            index,
            offset: layout.boundary_of(index),
        })
    }

    /// Snap `offset`, resolving a missing direction to the last valid one.
    #[must_use]
    pub fn snapped_offset<L: ItemLayout + ?Sized>(
        &self,
        layout: &L,
        offset: f64,
        dir: Option<Direction>,
        want_next: bool,
    ) -> f64 {
        let dir = dir.unwrap_or(self.last_valid_direction);
        let boundary = if want_next {
            self.next_boundary(layout, offset, dir)
        } else {
            self.nearest_boundary(layout, offset, dir)
        };
        boundary.map_or(offset, |b| b.offset)
    }

    /// Whether `offset` already sits on a boundary.
    #[must_use]
    pub fn is_snapped<L: ItemLayout + ?Sized>(&self, layout: &L, offset: f64) -> bool {
        offset == self.snapped_offset(layout, offset, None, false)
    }
}
