//! # Shapes
//!
//! The four procedural shapes and the [`Shape`] registry used to select
//! them by name.
//!
//! ## Structure
//!
//! - `twisted_cylinder` - torsional deformation and spiral flow
//! - `radial_sphere` - radial expansion and pressure decay
//! - `torus_vortex` - circulating flow in a torus shell
//! - `helical_structure` - helically wound grid with wave-like fields

mod helical_structure;
mod radial_sphere;
mod torus_vortex;
mod twisted_cylinder;

use std::fmt;
use std::str::FromStr;

use config::constants::VTU_EXTENSION;

pub use helical_structure::{HelicalStructure, HelixSample};
pub use radial_sphere::{RadialSphere, SphereSample};
pub use torus_vortex::{TorusSample, TorusVortex};
pub use twisted_cylinder::{CylinderSample, TwistedCylinder};

use crate::error::SynthResult;
use crate::mesh::HexMesh;
use crate::synth::generate;

/// Selector for one of the built-in shapes with default parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    TwistedCylinder,
    RadialSphere,
    TorusVortex,
    HelicalStructure,
}

impl Shape {
    /// Every shape, in output order.
    pub const ALL: [Shape; 4] = [
        Shape::TwistedCylinder,
        Shape::RadialSphere,
        Shape::TorusVortex,
        Shape::HelicalStructure,
    ];

    /// Stable identifier, also the output file stem.
    pub fn name(self) -> &'static str {
        match self {
            Shape::TwistedCylinder => "twisted_cylinder",
            Shape::RadialSphere => "radial_sphere",
            Shape::TorusVortex => "torus_vortex",
            Shape::HelicalStructure => "helical_structure",
        }
    }

    /// Output file name, e.g. `twisted_cylinder.vtu`.
    pub fn file_name(self) -> String {
        format!("{}.{}", self.name(), VTU_EXTENSION)
    }

    /// One-line description for reports.
    pub fn description(self) -> &'static str {
        match self {
            Shape::TwistedCylinder => "Twisted cylinder - torsional deformation and spiral flow",
            Shape::RadialSphere => "Radial sphere - radial expansion and pressure decay",
            Shape::TorusVortex => "Torus vortex - circulating flow in a torus shell",
            Shape::HelicalStructure => "Helical structure - wound grid with helical waves",
        }
    }

    /// Generates the shape with its default parameters.
    pub fn generate(self) -> SynthResult<HexMesh> {
        match self {
            Shape::TwistedCylinder => generate(&TwistedCylinder::default()),
            Shape::RadialSphere => generate(&RadialSphere::default()),
            Shape::TorusVortex => generate(&TorusVortex::default()),
            Shape::HelicalStructure => generate(&HelicalStructure::default()),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown shape name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShape(pub String);

impl fmt::Display for UnknownShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = Shape::ALL.iter().map(|shape| shape.name()).collect();
        write!(f, "unknown shape '{}' (expected one of: {})", self.0, known.join(", "))
    }
}

impl std::error::Error for UnknownShape {}

impl FromStr for Shape {
    type Err = UnknownShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Shape::ALL
            .into_iter()
            .find(|shape| shape.name() == wanted)
            .ok_or_else(|| UnknownShape(s.to_string()))
    }
}
