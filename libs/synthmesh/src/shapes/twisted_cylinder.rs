//! # Twisted Cylinder
//!
//! Solid cylinder under torsion: the twist angle grows with height and with
//! distance from the axis, the flow spirals upward.

use std::f64::consts::{PI, TAU};

use config::constants::{
    validate_extent, validate_positive, AXIS_DEGENERATE_RADIUS, CYLINDER_ANGULAR_EXTENT,
    CYLINDER_AXIAL_EXTENT, CYLINDER_HEIGHT, CYLINDER_RADIAL_EXTENT, CYLINDER_RADIUS,
    CYLINDER_SHEAR_MODULUS,
};
use glam::DVec3;

use crate::error::SynthResult;
use crate::fields::{FieldSample, FieldSpec, FieldValue};
use crate::frame::AxialFrame;
use crate::grid::{open_fraction, periodic_fraction, Axis, GridIndex, ParamGrid};
use crate::synth::ShapeGenerator;

/// Cylinder parameters. Grid axes are (axial, angular, radial).
#[derive(Debug, Clone, PartialEq)]
pub struct TwistedCylinder {
    pub radial_extent: usize,
    pub angular_extent: usize,
    pub axial_extent: usize,
    pub radius: f64,
    /// Height, centered on z = 0.
    pub height: f64,
    pub shear_modulus: f64,
}

impl Default for TwistedCylinder {
    fn default() -> Self {
        Self {
            radial_extent: CYLINDER_RADIAL_EXTENT,
            angular_extent: CYLINDER_ANGULAR_EXTENT,
            axial_extent: CYLINDER_AXIAL_EXTENT,
            radius: CYLINDER_RADIUS,
            height: CYLINDER_HEIGHT,
            shear_modulus: CYLINDER_SHEAR_MODULUS,
        }
    }
}

impl TwistedCylinder {
    /// Twist angle per unit height: half a turn over the full height.
    #[inline]
    pub fn twist_rate(&self) -> f64 {
        PI / self.height
    }
}

/// Fields of the twisted cylinder at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderSample {
    pub displacement: DVec3,
    pub velocity: DVec3,
    pub shear_stress: f64,
    pub von_mises: f64,
}

impl CylinderSample {
    /// Values on the cylinder axis, where the twist has no lever arm.
    pub const ON_AXIS: Self = Self {
        displacement: DVec3::ZERO,
        velocity: DVec3::ZERO,
        shear_stress: 0.0,
        von_mises: 0.0,
    };
}

impl FieldSample for CylinderSample {
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::vector("Twist_Displacement"),
        FieldSpec::vector("Spiral_Velocity"),
        FieldSpec::scalar("Shear_Stress"),
        FieldSpec::scalar("VonMises_Stress"),
    ];
    const ACTIVE_SCALAR: &'static str = "VonMises_Stress";
    const ACTIVE_VECTOR: &'static str = "Twist_Displacement";

    fn value(&self, slot: usize) -> FieldValue {
        match slot {
            0 => FieldValue::Vector(self.displacement),
            1 => FieldValue::Vector(self.velocity),
            2 => FieldValue::Scalar(self.shear_stress),
            _ => FieldValue::Scalar(self.von_mises),
        }
    }
}

impl ShapeGenerator for TwistedCylinder {
    type Sample = CylinderSample;

    fn name(&self) -> &'static str {
        "twisted_cylinder"
    }

    fn grid(&self) -> SynthResult<ParamGrid> {
        validate_positive("cylinder radius", self.radius)?;
        validate_positive("cylinder height", self.height)?;
        ParamGrid::new(
            Axis::open(validate_extent("axial", self.axial_extent)?),
            Axis::periodic(validate_extent("angular", self.angular_extent)?),
            Axis::open(validate_extent("radial", self.radial_extent)?),
        )
    }

    fn point(&self, index: GridIndex) -> DVec3 {
        let z = open_fraction(index.outer, self.axial_extent) * self.height - self.height / 2.0;
        let theta = periodic_fraction(index.middle, self.angular_extent) * TAU;
        let r = open_fraction(index.inner, self.radial_extent) * self.radius;
        DVec3::new(r * theta.cos(), r * theta.sin(), z)
    }

    fn sample(&self, position: DVec3) -> CylinderSample {
        let (r, theta) = match AxialFrame::derive(position, AXIS_DEGENERATE_RADIUS) {
            AxialFrame::Regular {
                radius, azimuth, ..
            } => (radius, azimuth),
            AxialFrame::Degenerate => return CylinderSample::ON_AXIS,
        };
        let DVec3 { x, y, z } = position;
        let twist_rate = self.twist_rate();

        let twisted = theta + twist_rate * z * (r / self.radius);
        let displacement = DVec3::new(r * twisted.cos() - x, r * twisted.sin() - y, 0.0);

        let lift = 1.0 + z / self.height;
        let velocity = DVec3::new(-y * lift, x * lift, r * 0.5);

        let shear_stress = r * twist_rate * self.shear_modulus;

        CylinderSample {
            displacement,
            velocity,
            shear_stress,
            von_mises: shear_stress * 3.0_f64.sqrt(),
        }
    }
}
