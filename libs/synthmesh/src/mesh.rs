//! # Hexahedral Mesh
//!
//! Points, hexahedral cells and point fields assembled into one immutable
//! value.

use std::fmt;

use config::constants::HEX_CORNERS;
use glam::DVec3;

use crate::error::{SynthError, SynthResult};
use crate::fields::{FieldKind, FieldSet};
use crate::topology::HexCell;

/// An unstructured hexahedral mesh with per-point fields.
///
/// Cells and fields refer to points by index only. Construction checks that
/// every cell index is in range, every field has one entry per point and the
/// active arrays exist with the right kind; there is no mutating API after
/// that.
///
/// # Example
///
/// ```rust
/// use glam::DVec3;
/// use synthmesh::fields::{FieldArray, FieldSet};
/// use synthmesh::mesh::HexMesh;
/// use synthmesh::topology::HexCell;
///
/// let points: Vec<DVec3> = (0..8)
///     .map(|i| DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, (i >> 2) as f64))
///     .collect();
/// let fields = FieldSet::new(
///     vec![
///         FieldArray::vector("Velocity", vec![DVec3::Z; 8]),
///         FieldArray::scalar("Pressure", vec![1.0; 8]),
///     ],
///     "Pressure",
///     "Velocity",
/// );
/// let mesh = HexMesh::new(points, vec![HexCell([0, 1, 3, 2, 4, 5, 7, 6])], fields).unwrap();
/// assert_eq!(mesh.point_count(), 8);
/// assert_eq!(mesh.cell_count(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HexMesh {
    points: Vec<DVec3>,
    cells: Vec<HexCell>,
    fields: FieldSet,
}

impl HexMesh {
    /// Assembles a mesh, rejecting structurally inconsistent input.
    pub fn new(points: Vec<DVec3>, cells: Vec<HexCell>, fields: FieldSet) -> SynthResult<Self> {
        let point_count = points.len();

        for (index, cell) in cells.iter().enumerate() {
            if let Some(&corner) = cell.corners().iter().find(|&&c| c as usize >= point_count) {
                return Err(SynthError::invalid_topology(format!(
                    "cell {index} references point {corner} but the mesh has {point_count} points"
                )));
            }
        }

        for array in fields.arrays() {
            if array.len() != point_count {
                return Err(SynthError::FieldMismatch {
                    name: array.name.clone(),
                    expected: point_count,
                    actual: array.len(),
                });
            }
        }

        Self::check_active(&fields, fields.active_scalar(), FieldKind::Scalar)?;
        Self::check_active(&fields, fields.active_vector(), FieldKind::Vector)?;

        Ok(Self {
            points,
            cells,
            fields,
        })
    }

    fn check_active(fields: &FieldSet, name: &str, kind: FieldKind) -> SynthResult<()> {
        match fields.get(name) {
            Some(array) if array.kind() == kind => Ok(()),
            Some(_) => Err(SynthError::invalid_topology(format!(
                "active {kind:?} array '{name}' has the wrong component count"
            ))),
            None => Err(SynthError::invalid_topology(format!(
                "active {kind:?} array '{name}' is not present"
            ))),
        }
    }

    /// Returns the number of points.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the number of hexahedra.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns a reference to the points.
    #[inline]
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns a reference to the cells.
    #[inline]
    pub fn cells(&self) -> &[HexCell] {
        &self.cells
    }

    /// Returns the point fields.
    #[inline]
    pub fn fields(&self) -> &FieldSet {
        &self.fields
    }

    /// Computes the axis-aligned bounding box.
    ///
    /// Returns (min, max) corners of the bounding box.
    pub fn bounding_box(&self) -> (DVec3, DVec3) {
        let Some((first, rest)) = self.points.split_first() else {
            return (DVec3::ZERO, DVec3::ZERO);
        };
        rest.iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)))
    }

    /// Flattened connectivity as written to the `connectivity` array.
    pub fn connectivity(&self) -> Vec<i64> {
        self.cells
            .iter()
            .flat_map(|cell| cell.corners().iter().map(|&c| i64::from(c)))
            .collect()
    }

    /// Cumulative end offsets of each cell in [`HexMesh::connectivity`].
    pub fn offsets(&self) -> Vec<i64> {
        (1..=self.cells.len())
            .map(|i| (i * HEX_CORNERS) as i64)
            .collect()
    }

    /// Counts and array names for reporting.
    pub fn summary(&self) -> MeshSummary {
        MeshSummary {
            points: self.point_count(),
            cells: self.cell_count(),
            arrays: self
                .fields
                .arrays()
                .iter()
                .map(|array| (array.name.clone(), array.kind()))
                .collect(),
            active_scalar: self.fields.active_scalar().to_string(),
            active_vector: self.fields.active_vector().to_string(),
        }
    }
}

/// Counts and array listing of a generated mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshSummary {
    pub points: usize,
    pub cells: usize,
    pub arrays: Vec<(String, FieldKind)>,
    pub active_scalar: String,
    pub active_vector: String,
}

impl fmt::Display for MeshSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "points: {}", self.points)?;
        writeln!(f, "cells:  {}", self.cells)?;
        writeln!(f, "arrays:")?;
        for (name, kind) in &self.arrays {
            let label = match kind {
                FieldKind::Scalar => "scalar",
                FieldKind::Vector => "vector",
            };
            let active = if *name == self.active_scalar || *name == self.active_vector {
                " (active)"
            } else {
                ""
            };
            writeln!(f, "  - {name}: {label}{active}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldArray;

    fn unit_cube_points() -> Vec<DVec3> {
        (0..8)
            .map(|i| DVec3::new((i & 1) as f64, ((i >> 1) & 1) as f64, (i >> 2) as f64))
            .collect()
    }

    fn fields(len: usize) -> FieldSet {
        FieldSet::new(
            vec![
                FieldArray::vector("Velocity", vec![DVec3::X; len]),
                FieldArray::scalar("Pressure", vec![0.5; len]),
            ],
            "Pressure",
            "Velocity",
        )
    }

    fn cube_cell() -> HexCell {
        HexCell([0, 1, 3, 2, 4, 5, 7, 6])
    }

    #[test]
    fn test_mesh_new() {
        let mesh = HexMesh::new(unit_cube_points(), vec![cube_cell()], fields(8)).unwrap();
        assert_eq!(mesh.point_count(), 8);
        assert_eq!(mesh.cell_count(), 1);
        assert_eq!(mesh.connectivity(), vec![0, 1, 3, 2, 4, 5, 7, 6]);
        assert_eq!(mesh.offsets(), vec![8]);
    }

    #[test]
    fn test_mesh_rejects_out_of_range_cell() {
        let cell = HexCell([0, 1, 3, 2, 4, 5, 7, 8]);
        let result = HexMesh::new(unit_cube_points(), vec![cell], fields(8));
        assert!(matches!(result, Err(SynthError::InvalidTopology { .. })));
    }

    #[test]
    fn test_mesh_rejects_short_field() {
        let result = HexMesh::new(unit_cube_points(), vec![cube_cell()], fields(7));
        assert!(matches!(
            result,
            Err(SynthError::FieldMismatch {
                expected: 8,
                actual: 7,
                ..
            })
        ));
    }

    #[test]
    fn test_mesh_rejects_wrong_active_kind() {
        let swapped = FieldSet::new(
            vec![
                FieldArray::vector("Velocity", vec![DVec3::X; 8]),
                FieldArray::scalar("Pressure", vec![0.5; 8]),
            ],
            "Velocity",
            "Pressure",
        );
        let result = HexMesh::new(unit_cube_points(), vec![cube_cell()], swapped);
        assert!(matches!(result, Err(SynthError::InvalidTopology { .. })));
    }

    #[test]
    fn test_mesh_bounding_box() {
        let mesh = HexMesh::new(unit_cube_points(), vec![cube_cell()], fields(8)).unwrap();
        let (min, max) = mesh.bounding_box();
        assert_eq!(min, DVec3::ZERO);
        assert_eq!(max, DVec3::ONE);
    }

    #[test]
    fn test_summary_marks_active_arrays() {
        let mesh = HexMesh::new(unit_cube_points(), vec![cube_cell()], fields(8)).unwrap();
        let text = mesh.summary().to_string();
        assert!(text.contains("points: 8"));
        assert!(text.contains("Velocity: vector (active)"));
        assert!(text.contains("Pressure: scalar (active)"));
    }
}
