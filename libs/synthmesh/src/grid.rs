//! # Parameter Grid
//!
//! Structured three-axis index space shared by point generation, field
//! synthesis and topology building.
//!
//! Axes are ordered outer, middle, inner; the outer axis varies slowest in
//! the flattened point order. [`ParamGrid::flatten`] is the only place the
//! linearization arithmetic lives.

use config::constants::validate_extent;

use crate::error::{SynthError, SynthResult};

/// One axis of the parameter grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Axis {
    /// Number of points along the axis.
    pub extent: usize,
    /// Whether the last index is adjacent to the first (angular wraparound).
    pub periodic: bool,
}

impl Axis {
    /// An axis whose ends do not meet (radial, axial, polar).
    pub const fn open(extent: usize) -> Self {
        Self {
            extent,
            periodic: false,
        }
    }

    /// An axis whose last index wraps to the first (angular).
    pub const fn periodic(extent: usize) -> Self {
        Self {
            extent,
            periodic: true,
        }
    }

    /// Number of cell layers along the axis.
    ///
    /// Open axes form `n - 1` layers from `n` points; periodic axes form `n`
    /// because the last layer closes onto index 0.
    #[inline]
    pub fn cell_extent(&self) -> usize {
        if self.periodic {
            self.extent
        } else {
            self.extent.saturating_sub(1)
        }
    }

    /// Index following `index` along this axis.
    #[inline]
    pub fn successor(&self, index: usize) -> usize {
        if self.periodic {
            (index + 1) % self.extent
        } else {
            index + 1
        }
    }
}

/// Position of a point in the structured index space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub outer: usize,
    pub middle: usize,
    pub inner: usize,
}

impl GridIndex {
    pub const fn new(outer: usize, middle: usize, inner: usize) -> Self {
        Self {
            outer,
            middle,
            inner,
        }
    }
}

/// A validated structured grid of three axes.
///
/// # Example
///
/// ```rust
/// use synthmesh::grid::{Axis, GridIndex, ParamGrid};
///
/// let grid = ParamGrid::new(Axis::open(30), Axis::periodic(24), Axis::open(12)).unwrap();
/// assert_eq!(grid.point_count(), 8640);
/// assert_eq!(grid.cell_count(), 7656);
///
/// let index = GridIndex::new(2, 5, 7);
/// assert_eq!(grid.unflatten(grid.flatten(index)), index);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamGrid {
    outer: Axis,
    middle: Axis,
    inner: Axis,
}

impl ParamGrid {
    /// Builds a grid, rejecting any axis with fewer than two points and any
    /// grid whose point indices do not fit in `u32`.
    pub fn new(outer: Axis, middle: Axis, inner: Axis) -> SynthResult<Self> {
        validate_extent("outer", outer.extent)?;
        validate_extent("middle", middle.extent)?;
        validate_extent("inner", inner.extent)?;
        let addressable = outer
            .extent
            .checked_mul(middle.extent)
            .and_then(|n| n.checked_mul(inner.extent))
            .filter(|&n| n - 1 <= u32::MAX as usize);
        if addressable.is_none() {
            return Err(SynthError::invalid_topology(format!(
                "{} x {} x {} grid exceeds the u32 point index range",
                outer.extent, middle.extent, inner.extent
            )));
        }
        Ok(Self {
            outer,
            middle,
            inner,
        })
    }

    #[inline]
    pub fn outer(&self) -> Axis {
        self.outer
    }

    #[inline]
    pub fn middle(&self) -> Axis {
        self.middle
    }

    #[inline]
    pub fn inner(&self) -> Axis {
        self.inner
    }

    /// Total number of points (product of the three extents).
    #[inline]
    pub fn point_count(&self) -> usize {
        self.outer.extent * self.middle.extent * self.inner.extent
    }

    /// Total number of hexahedra the topology builder emits.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.outer.cell_extent() * self.middle.cell_extent() * self.inner.cell_extent()
    }

    /// Flattened point index of a grid position.
    #[inline]
    pub fn flatten(&self, index: GridIndex) -> usize {
        debug_assert!(index.outer < self.outer.extent);
        debug_assert!(index.middle < self.middle.extent);
        debug_assert!(index.inner < self.inner.extent);
        (index.outer * self.middle.extent + index.middle) * self.inner.extent + index.inner
    }

    /// Inverse of [`ParamGrid::flatten`].
    #[inline]
    pub fn unflatten(&self, flat: usize) -> GridIndex {
        let inner = flat % self.inner.extent;
        let rest = flat / self.inner.extent;
        GridIndex {
            outer: rest / self.middle.extent,
            middle: rest % self.middle.extent,
            inner,
        }
    }

    /// Iterates every grid position in flattened order.
    pub fn indices(&self) -> impl Iterator<Item = GridIndex> + '_ {
        (0..self.point_count()).map(move |flat| self.unflatten(flat))
    }
}

/// Parameter value at `index` on an open axis spanning `[0, 1]` inclusive.
#[inline]
pub(crate) fn open_fraction(index: usize, extent: usize) -> f64 {
    index as f64 / (extent - 1) as f64
}

/// Parameter value at `index` on a periodic axis spanning `[0, 1)`.
#[inline]
pub(crate) fn periodic_fraction(index: usize, extent: usize) -> f64 {
    index as f64 / extent as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;

    fn cylinder_grid() -> ParamGrid {
        ParamGrid::new(Axis::open(30), Axis::periodic(24), Axis::open(12)).unwrap()
    }

    #[test]
    fn test_counts() {
        let grid = cylinder_grid();
        assert_eq!(grid.point_count(), 12 * 24 * 30);
        assert_eq!(grid.cell_count(), 11 * 24 * 29);
    }

    #[test]
    fn test_fully_periodic_counts() {
        let grid = ParamGrid::new(Axis::periodic(24), Axis::periodic(16), Axis::open(6)).unwrap();
        assert_eq!(grid.cell_count(), 24 * 16 * 5);
    }

    #[test]
    fn test_flatten_inner_varies_fastest() {
        let grid = cylinder_grid();
        assert_eq!(grid.flatten(GridIndex::new(0, 0, 0)), 0);
        assert_eq!(grid.flatten(GridIndex::new(0, 0, 1)), 1);
        assert_eq!(grid.flatten(GridIndex::new(0, 1, 0)), 12);
        assert_eq!(grid.flatten(GridIndex::new(1, 0, 0)), 24 * 12);
    }

    #[test]
    fn test_indices_follow_flatten() {
        let grid = ParamGrid::new(Axis::open(3), Axis::periodic(4), Axis::open(5)).unwrap();
        for (flat, index) in grid.indices().enumerate() {
            assert_eq!(grid.flatten(index), flat);
        }
        assert_eq!(grid.indices().count(), grid.point_count());
    }

    #[test]
    fn test_successor_wraps_only_periodic() {
        assert_eq!(Axis::periodic(24).successor(23), 0);
        assert_eq!(Axis::open(24).successor(22), 23);
    }

    #[test]
    fn test_rejects_short_axis() {
        let result = ParamGrid::new(Axis::open(1), Axis::periodic(24), Axis::open(12));
        assert!(matches!(result, Err(SynthError::Config(_))));
    }

    #[test]
    fn test_rejects_grid_beyond_u32_indices() {
        // 70_000 * 70_000 * 2 points cannot be addressed by u32 corners.
        let result = ParamGrid::new(Axis::open(70_000), Axis::periodic(70_000), Axis::open(2));
        assert!(matches!(result, Err(SynthError::InvalidTopology { .. })));

        let largest = ParamGrid::new(Axis::open(65_536), Axis::periodic(65_536), Axis::open(2));
        assert!(largest.is_err());
        let fits = ParamGrid::new(Axis::open(65_536), Axis::periodic(32_768), Axis::open(2));
        assert_eq!(fits.unwrap().point_count(), u32::MAX as usize + 1);
    }

    #[test]
    fn test_fractions() {
        assert_eq!(open_fraction(0, 12), 0.0);
        assert_eq!(open_fraction(11, 12), 1.0);
        assert_eq!(periodic_fraction(6, 24), 0.25);
    }
}
