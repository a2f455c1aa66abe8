//! # Generation Pipeline
//!
//! Drives a [`ShapeGenerator`] through point generation, topology building
//! and field synthesis, in that order, into one [`HexMesh`].

use glam::DVec3;

use crate::error::SynthResult;
use crate::fields::{FieldSample, FieldSet};
use crate::grid::{GridIndex, ParamGrid};
use crate::mesh::HexMesh;
use crate::topology::build_hexahedra;

/// A procedurally generated shape with analytic point fields.
///
/// `point` and `sample` are pure: a point's position depends only on its
/// grid index, and its fields only on its position.
pub trait ShapeGenerator {
    /// Fixed-shape record of every field at one point.
    type Sample: FieldSample;

    /// Stable identifier, used as the output file stem.
    fn name(&self) -> &'static str;

    /// Validated parameter grid with the shape's periodicity flags.
    fn grid(&self) -> SynthResult<ParamGrid>;

    /// Closed-form position of a grid point.
    fn point(&self, index: GridIndex) -> DVec3;

    /// Every field evaluated at `position`, including the degenerate fallback.
    fn sample(&self, position: DVec3) -> Self::Sample;
}

/// Generates the points of `generator` in flattened grid order.
pub fn generate_points<G: ShapeGenerator + ?Sized>(generator: &G, grid: &ParamGrid) -> Vec<DVec3> {
    grid.indices().map(|index| generator.point(index)).collect()
}

/// Evaluates the generator's field record at each point and scatters the
/// results into named arrays.
pub fn synthesize<G: ShapeGenerator + ?Sized>(generator: &G, points: &[DVec3]) -> SynthResult<FieldSet> {
    let samples: Vec<G::Sample> = points.iter().map(|&p| generator.sample(p)).collect();
    FieldSet::from_samples(&samples)
}

/// Builds the complete mesh of a shape.
///
/// # Example
///
/// ```rust
/// use synthmesh::shapes::TwistedCylinder;
/// use synthmesh::synth::generate;
///
/// let mesh = generate(&TwistedCylinder::default()).unwrap();
/// assert_eq!(mesh.point_count(), 12 * 24 * 30);
/// assert_eq!(mesh.cell_count(), 11 * 24 * 29);
/// ```
pub fn generate<G: ShapeGenerator + ?Sized>(generator: &G) -> SynthResult<HexMesh> {
    let grid = generator.grid()?;
    log::debug!(
        "generating {}: extents {}x{}x{}",
        generator.name(),
        grid.outer().extent,
        grid.middle().extent,
        grid.inner().extent
    );

    let points = generate_points(generator, &grid);
    let cells = build_hexahedra(&grid);
    let fields = synthesize(generator, &points)?;

    HexMesh::new(points, cells, fields)
}
