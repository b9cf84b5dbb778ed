#![forbid(unsafe_code)]

//! Item geometry along the active axis.
//!
//! [`ItemLayout`] is the read-only view the controller needs of the strip:
//! how many items there are, where each one starts, how large each one is,
//! and how large the content and the viewport are. The embedding renderer
//! owns measurement; the controller only calls [`ItemLayout::remeasure`]
//! when it boots and never caches values across that call.
//!
//! [`StripLayout`] is a concrete layout built from a list of item extents.
//!
//! # Invariants
//!
//! 1. Item positions are non-decreasing; adjacent items may share a position
//!    (zero-extent or stacked items).
//! 2. `boundary_of(i) == -position(i) <= 0`.
//! 3. Extents, content extent and viewport extent are finite and `>= 0`.
//!
//! # Failure Modes
//!
//! - Negative or non-finite extents supplied to [`StripLayout`] are treated
//!   as zero.
//! - An empty layout is valid; the controller built over it stays inert.

use std::fmt;

/// Stable identity of an item, used to navigate to an element reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

/// Geometry of a strip of items along one axis.
pub trait ItemLayout {
    /// Refresh measurements after the content or viewport changed.
    fn remeasure(&mut self) {}

    /// Number of items.
    fn count(&self) -> usize;

    /// Offset at which item `index` sits flush with the leading edge
    /// (`<= 0`). `index` must be `< count()`.
    fn boundary_of(&self, index: usize) -> f64;

    /// Outer size of item `index`, margins included. `index` must be `< count()`.
    fn extent_of(&self, index: usize) -> f64;

    /// Total size of the content.
    fn content_extent(&self) -> f64;

    /// Size of the visible viewport.
    fn viewport_extent(&self) -> f64;

    /// Resolve an item reference; `None` for items not in this strip.
    fn index_of(&self, _id: ItemId) -> Option<usize> {
        None
    }
}

/// A lent layout; the embedder keeps ownership.
impl<T: ItemLayout + ?Sized> ItemLayout for &mut T {
    fn remeasure(&mut self) {
        (**self).remeasure();
    }

    fn count(&self) -> usize {
        (**self).count()
    }

    fn boundary_of(&self, index: usize) -> f64 {
        (**self).boundary_of(index)
    }

    fn extent_of(&self, index: usize) -> f64 {
        (**self).extent_of(index)
    }

    fn content_extent(&self) -> f64 {
        (**self).content_extent()
    }

    fn viewport_extent(&self) -> f64 {
        (**self).viewport_extent()
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        (**self).index_of(id)
    }
}

/// One measured item.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredItem {
    pub id: ItemId,
    pub extent: f64,
}

/// Result of measuring the embedding content.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Measurement {
    pub items: Vec<MeasuredItem>,
    pub viewport_extent: f64,
}

type Measure = Box<dyn FnMut() -> Measurement>;

/// A contiguous strip: each item starts where the previous one ends.
pub struct StripLayout {
    ids: Vec<ItemId>,
    extents: Vec<f64>,
    /// Cumulative start position of each item (>= 0).
    positions: Vec<f64>,
    content_extent: f64,
    viewport_extent: f64,
    measure: Option<Measure>,
}

impl fmt::Debug for StripLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StripLayout")
            .field("count", &self.extents.len())
            .field("content_extent", &self.content_extent)
            .field("viewport_extent", &self.viewport_extent)
            .field("measured", &self.measure.is_some())
            .finish()
    }
}

impl StripLayout {
    /// Build from item extents; ids are the item indices.
    #[must_use]
    pub fn new(extents: impl IntoIterator<Item = f64>, viewport_extent: f64) -> Self {
        let items = extents
            .into_iter()
            .enumerate()
            .map(|(i, extent)| MeasuredItem {
                id: ItemId(i as u64),
                extent,
            })
            .collect();
        Self::from_measurement(Measurement {
            items,
            viewport_extent,
        })
    }

    /// `count` items of the same extent.
    #[must_use]
    pub fn uniform(count: usize, extent: f64, viewport_extent: f64) -> Self {
        Self::new(std::iter::repeat_n(extent, count), viewport_extent)
    }

    /// Build from an explicit measurement.
    #[must_use]
    pub fn from_measurement(measurement: Measurement) -> Self {
        let mut layout = Self {
            ids: Vec::new(),
            extents: Vec::new(),
            positions: Vec::new(),
            content_extent: 0.0,
            viewport_extent: 0.0,
            measure: None,
        };
        layout.apply(measurement);
        layout
    }

    /// Build a layout that re-reads its geometry on every remeasure.
    #[must_use]
    pub fn measured(mut measure: impl FnMut() -> Measurement + 'static) -> Self {
        let mut layout = Self::from_measurement(measure());
        layout.measure = Some(Box::new(measure));
        layout
    }

    /// Replace all item extents (ids become indices). Takes effect immediately.
    pub fn set_extents(&mut self, extents: impl IntoIterator<Item = f64>) {
        let viewport_extent = self.viewport_extent;
        let items = extents
            .into_iter()
            .enumerate()
            .map(|(i, extent)| MeasuredItem {
                id: ItemId(i as u64),
                extent,
            })
            .collect();
        self.apply(Measurement {
            items,
            viewport_extent,
        });
    }

    /// Change the viewport size. Takes effect immediately.
    pub fn set_viewport_extent(&mut self, viewport_extent: f64) {
        self.viewport_extent = sanitize(viewport_extent);
    }

    /// Start position of item `index` measured from the content start.
    #[must_use]
    pub fn position_of(&self, index: usize) -> Option<f64> {
        self.positions.get(index).copied()
    }

    /// Id of item `index`.
    #[must_use]
    pub fn id_of(&self, index: usize) -> Option<ItemId> {
        self.ids.get(index).copied()
    }

    fn apply(&mut self, measurement: Measurement) {
        self.ids.clear();
        self.extents.clear();
        self.positions.clear();
        let mut cursor = 0.0;
        for item in measurement.items {
            let extent = sanitize(item.extent);
            self.ids.push(item.id);
            self.extents.push(extent);
            self.positions.push(cursor);
            cursor += extent;
        }
        self.content_extent = cursor;
        self.viewport_extent = sanitize(measurement.viewport_extent);
    }
}

fn sanitize(v: f64) -> f64 {
    if v.is_finite() && v > 0.0 { v } else { 0.0 }
}

impl ItemLayout for StripLayout {
    fn remeasure(&mut self) {
        if let Some(measure) = self.measure.as_mut() {
            let m = measure();
            self.apply(m);
        }
    }

    fn count(&self) -> usize {
        self.extents.len()
    }

    fn boundary_of(&self, index: usize) -> f64 {
        // Stored positions are >= 0; `0.0 - 0.0` keeps the rest boundary at +0.
        0.0 - self.positions[index]
    }

    fn extent_of(&self, index: usize) -> f64 {
        self.extents[index]
    }

    fn content_extent(&self) -> f64 {
        self.content_extent
    }

    fn viewport_extent(&self) -> f64 {
        self.viewport_extent
    }

    fn index_of(&self, id: ItemId) -> Option<usize> {
        self.ids.iter().position(|&candidate| candidate == id)
    }
}
