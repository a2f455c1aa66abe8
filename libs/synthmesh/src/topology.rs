//! # Hexahedral Topology
//!
//! Builds 8-corner cell connectivity over a [`ParamGrid`], closing periodic
//! axes across their seam.

use config::constants::HEX_CORNERS;

use crate::grid::{GridIndex, ParamGrid};

/// A hexahedron referencing eight point indices.
///
/// Corners 0..4 lie on the lower outer-axis layer and 4..8 on the next one.
/// Within a layer the order is `(m, n)`, `(m, n+1)`, `(m', n+1)`, `(m', n)`
/// with `m` the middle index, `m'` its successor and `n` the inner index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexCell(pub [u32; HEX_CORNERS]);

impl HexCell {
    /// Returns the corner indices.
    #[inline]
    pub fn corners(&self) -> &[u32; HEX_CORNERS] {
        &self.0
    }

    /// Returns true if no corner index repeats.
    pub fn has_distinct_corners(&self) -> bool {
        let corners = &self.0;
        (0..HEX_CORNERS).all(|a| (a + 1..HEX_CORNERS).all(|b| corners[a] != corners[b]))
    }
}

/// Emits every hexahedron of the grid.
///
/// Cells are produced outer → middle → inner. An open axis yields a cell at
/// every index but its last; a periodic axis yields one at every index, the
/// last one wrapping to index 0.
///
/// # Example
///
/// ```rust
/// use synthmesh::grid::{Axis, ParamGrid};
/// use synthmesh::topology::build_hexahedra;
///
/// let grid = ParamGrid::new(Axis::open(2), Axis::periodic(4), Axis::open(2)).unwrap();
/// let cells = build_hexahedra(&grid);
/// assert_eq!(cells.len(), 4);
/// // The last angular cell closes the ring back onto middle index 0.
/// assert_eq!(cells[3].corners()[2], 1);
/// ```
pub fn build_hexahedra(grid: &ParamGrid) -> Vec<HexCell> {
    let (outer, middle, inner) = (grid.outer(), grid.middle(), grid.inner());
    let mut cells = Vec::with_capacity(grid.cell_count());

    for a in 0..outer.cell_extent() {
        let a_next = outer.successor(a);
        for m in 0..middle.cell_extent() {
            let m_next = middle.successor(m);
            for n in 0..inner.cell_extent() {
                let n_next = inner.successor(n);
                // ParamGrid::new bounds every flattened index by u32::MAX.
                let id = |o: usize, mi: usize, i: usize| grid.flatten(GridIndex::new(o, mi, i)) as u32;

                cells.push(HexCell([
                    id(a, m, n),
                    id(a, m, n_next),
                    id(a, m_next, n_next),
                    id(a, m_next, n),
                    id(a_next, m, n),
                    id(a_next, m, n_next),
                    id(a_next, m_next, n_next),
                    id(a_next, m_next, n),
                ]));
            }
        }
    }

    log::debug!(
        "built {} hexahedra over {} points",
        cells.len(),
        grid.point_count()
    );
    cells
}
