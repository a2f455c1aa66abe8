//! # Radial Sphere
//!
//! Solid ball with outward radial deformation and flow, stress decaying
//! linearly and pressure exponentially from the center.

use std::f64::consts::{PI, TAU};

use config::constants::{
    validate_extent, validate_positive, SPHERE_AZIMUTHAL_EXTENT, SPHERE_CENTER_PRESSURE,
    SPHERE_CENTER_STRESS, SPHERE_DEGENERATE_RADIUS, SPHERE_MAX_RADIUS, SPHERE_POLAR_EXTENT,
    SPHERE_RADIAL_EXTENT,
};
use glam::DVec3;

use crate::error::SynthResult;
use crate::fields::{FieldSample, FieldSpec, FieldValue};
use crate::frame::RadialFrame;
use crate::grid::{open_fraction, periodic_fraction, Axis, GridIndex, ParamGrid};
use crate::synth::ShapeGenerator;

/// Sphere parameters. Grid axes are (radial, azimuthal, polar).
#[derive(Debug, Clone, PartialEq)]
pub struct RadialSphere {
    pub radial_extent: usize,
    pub azimuthal_extent: usize,
    pub polar_extent: usize,
    pub max_radius: f64,
    pub center_stress: f64,
    pub center_pressure: f64,
}

impl Default for RadialSphere {
    fn default() -> Self {
        Self {
            radial_extent: SPHERE_RADIAL_EXTENT,
            azimuthal_extent: SPHERE_AZIMUTHAL_EXTENT,
            polar_extent: SPHERE_POLAR_EXTENT,
            max_radius: SPHERE_MAX_RADIUS,
            center_stress: SPHERE_CENTER_STRESS,
            center_pressure: SPHERE_CENTER_PRESSURE,
        }
    }
}

/// Fields of the radial sphere at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereSample {
    pub displacement: DVec3,
    pub velocity: DVec3,
    pub radial_stress: f64,
    pub pressure: f64,
}

impl FieldSample for SphereSample {
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::vector("Radial_Displacement"),
        FieldSpec::vector("Radial_Velocity"),
        FieldSpec::scalar("Radial_Stress"),
        FieldSpec::scalar("Pressure"),
    ];
    const ACTIVE_SCALAR: &'static str = "Pressure";
    const ACTIVE_VECTOR: &'static str = "Radial_Displacement";

    fn value(&self, slot: usize) -> FieldValue {
        match slot {
            0 => FieldValue::Vector(self.displacement),
            1 => FieldValue::Vector(self.velocity),
            2 => FieldValue::Scalar(self.radial_stress),
            _ => FieldValue::Scalar(self.pressure),
        }
    }
}

impl ShapeGenerator for RadialSphere {
    type Sample = SphereSample;

    fn name(&self) -> &'static str {
        "radial_sphere"
    }

    fn grid(&self) -> SynthResult<ParamGrid> {
        validate_positive("sphere radius", self.max_radius)?;
        ParamGrid::new(
            Axis::open(validate_extent("radial", self.radial_extent)?),
            Axis::periodic(validate_extent("azimuthal", self.azimuthal_extent)?),
            Axis::open(validate_extent("polar", self.polar_extent)?),
        )
    }

    fn point(&self, index: GridIndex) -> DVec3 {
        let r = open_fraction(index.outer, self.radial_extent) * self.max_radius;
        let theta = periodic_fraction(index.middle, self.azimuthal_extent) * TAU;
        let phi = open_fraction(index.inner, self.polar_extent) * PI;
        DVec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }

    fn sample(&self, position: DVec3) -> SphereSample {
        let (r, outward) = match RadialFrame::derive(position, SPHERE_DEGENERATE_RADIUS) {
            RadialFrame::Regular { radius, outward } => (radius, outward),
            RadialFrame::Degenerate => {
                return SphereSample {
                    displacement: DVec3::ZERO,
                    velocity: DVec3::ZERO,
                    radial_stress: self.center_stress,
                    pressure: self.center_pressure,
                }
            }
        };
        let fraction = r / self.max_radius;

        SphereSample {
            displacement: outward * (r * 0.2 * (1.0 - fraction)),
            velocity: outward * (2.0 * (1.0 + (PI * fraction).sin())),
            radial_stress: self.center_stress * (self.max_radius - r) / self.max_radius,
            pressure: self.center_pressure * (-2.0 * fraction).exp(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::generate;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_counts() {
        let mesh = generate(&RadialSphere::default()).unwrap();
        assert_eq!(mesh.point_count(), 15 * 24 * 16);
        assert_eq!(mesh.cell_count(), 14 * 24 * 15);
    }

    #[test]
    fn test_sphere_center_fallback() {
        let sample = RadialSphere::default().sample(DVec3::new(0.005, 0.0, 0.0));
        assert_eq!(sample.displacement, DVec3::ZERO);
        assert_eq!(sample.velocity, DVec3::ZERO);
        assert_eq!(sample.radial_stress, 100.0);
        assert_eq!(sample.pressure, 50.0);
    }

    #[test]
    fn test_sphere_surface_values() {
        let sample = RadialSphere::default().sample(DVec3::new(0.0, 0.0, 3.0));
        assert_relative_eq!(sample.displacement.length(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.radial_stress, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.pressure, 50.0 * (-2.0_f64).exp(), max_relative = 1e-12);
        assert_relative_eq!(sample.velocity.z, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_mid_radius_flow_peaks() {
        let sample = RadialSphere::default().sample(DVec3::new(1.5, 0.0, 0.0));
        assert_relative_eq!(sample.velocity.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(sample.displacement.x, 0.15, epsilon = 1e-12);
        assert_relative_eq!(sample.radial_stress, 50.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_fields_point_outward() {
        let sphere = RadialSphere::default();
        let p = DVec3::new(0.6, -1.2, 0.9);
        let sample = sphere.sample(p);
        assert_relative_eq!(sample.velocity.normalize().dot(p.normalize()), 1.0, epsilon = 1e-12);
        assert_relative_eq!(sample.displacement.normalize().dot(p.normalize()), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sphere_points_within_radius() {
        let mesh = generate(&RadialSphere::default()).unwrap();
        for p in mesh.points() {
            assert!(p.length() <= 3.0 + 1e-12);
        }
    }
}
