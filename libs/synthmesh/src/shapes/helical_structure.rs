//! # Helical Structure
//!
//! Cylinder whose angular grid lines wind into a helix, with fields that
//! oscillate along the helical phase.

use std::f64::consts::TAU;

use config::constants::{
    validate_extent, validate_positive, AXIS_DEGENERATE_RADIUS, HELIX_ANGULAR_EXTENT,
    HELIX_AXIAL_EXTENT, HELIX_HEIGHT, HELIX_MAX_RADIUS, HELIX_PITCH, HELIX_RADIAL_EXTENT,
    HELIX_REFERENCE_STRESS, HELIX_REFERENCE_TEMPERATURE, HELIX_TEMPERATURE_AMPLITUDE,
};
use glam::DVec3;

use crate::error::SynthResult;
use crate::fields::{FieldSample, FieldSpec, FieldValue};
use crate::frame::AxialFrame;
use crate::grid::{open_fraction, periodic_fraction, Axis, GridIndex, ParamGrid};
use crate::synth::ShapeGenerator;

/// Helix parameters. Grid axes are (axial, angular, radial).
#[derive(Debug, Clone, PartialEq)]
pub struct HelicalStructure {
    pub radial_extent: usize,
    pub angular_extent: usize,
    pub axial_extent: usize,
    pub max_radius: f64,
    pub height: f64,
    /// Height of one full turn.
    pub pitch: f64,
    pub reference_stress: f64,
    pub reference_temperature: f64,
    pub temperature_amplitude: f64,
}

impl Default for HelicalStructure {
    fn default() -> Self {
        Self {
            radial_extent: HELIX_RADIAL_EXTENT,
            angular_extent: HELIX_ANGULAR_EXTENT,
            axial_extent: HELIX_AXIAL_EXTENT,
            max_radius: HELIX_MAX_RADIUS,
            height: HELIX_HEIGHT,
            pitch: HELIX_PITCH,
            reference_stress: HELIX_REFERENCE_STRESS,
            reference_temperature: HELIX_REFERENCE_TEMPERATURE,
            temperature_amplitude: HELIX_TEMPERATURE_AMPLITUDE,
        }
    }
}

impl HelicalStructure {
    /// Helical winding angle accumulated at height `z`.
    #[inline]
    pub fn winding(&self, z: f64) -> f64 {
        TAU * z / self.pitch
    }
}

/// Fields of the helical structure at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HelixSample {
    pub displacement: DVec3,
    pub velocity: DVec3,
    pub helical_stress: f64,
    pub temperature: f64,
}

impl FieldSample for HelixSample {
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::vector("Helical_Displacement"),
        FieldSpec::vector("Helical_Velocity"),
        FieldSpec::scalar("Helical_Stress"),
        FieldSpec::scalar("Temperature"),
    ];
    const ACTIVE_SCALAR: &'static str = "Temperature";
    const ACTIVE_VECTOR: &'static str = "Helical_Displacement";

    fn value(&self, slot: usize) -> FieldValue {
        match slot {
            0 => FieldValue::Vector(self.displacement),
            1 => FieldValue::Vector(self.velocity),
            2 => FieldValue::Scalar(self.helical_stress),
            _ => FieldValue::Scalar(self.temperature),
        }
    }
}

impl ShapeGenerator for HelicalStructure {
    type Sample = HelixSample;

    fn name(&self) -> &'static str {
        "helical_structure"
    }

    fn grid(&self) -> SynthResult<ParamGrid> {
        validate_positive("helix radius", self.max_radius)?;
        validate_positive("helix height", self.height)?;
        validate_positive("helix pitch", self.pitch)?;
        ParamGrid::new(
            Axis::open(validate_extent("axial", self.axial_extent)?),
            Axis::periodic(validate_extent("angular", self.angular_extent)?),
            Axis::open(validate_extent("radial", self.radial_extent)?),
        )
    }

    fn point(&self, index: GridIndex) -> DVec3 {
        let z = open_fraction(index.outer, self.axial_extent) * self.height - self.height / 2.0;
        let theta = periodic_fraction(index.middle, self.angular_extent) * TAU + self.winding(z);
        let r = open_fraction(index.inner, self.radial_extent) * self.max_radius;
        DVec3::new(r * theta.cos(), r * theta.sin(), z)
    }

    fn sample(&self, position: DVec3) -> HelixSample {
        let (r, theta, outward) = match AxialFrame::derive(position, AXIS_DEGENERATE_RADIUS) {
            AxialFrame::Regular {
                radius,
                azimuth,
                outward,
            } => (radius, azimuth, outward),
            AxialFrame::Degenerate => {
                return HelixSample {
                    displacement: DVec3::ZERO,
                    velocity: DVec3::Z,
                    helical_stress: self.reference_stress,
                    temperature: self.reference_temperature,
                }
            }
        };
        let DVec3 { x, y, z } = position;
        let radius = self.max_radius;
        let phase = theta + self.winding(z);
        let wave = phase.sin();

        let displacement = DVec3::new(
            0.1 * wave * outward.x,
            0.1 * wave * outward.y,
            0.05 * phase.cos(),
        );

        let velocity = DVec3::new(
            -y + 0.2 * z * x / radius,
            x + 0.2 * z * y / radius,
            1.0 + 0.5 * wave,
        );

        let ripple = 1.0 + 0.5 * (4.0 * theta + 2.0 * self.winding(z)).sin();
        let helical_stress = self.reference_stress * ripple * (radius - r) / radius;

        HelixSample {
            displacement,
            velocity,
            helical_stress,
            temperature: self.reference_temperature
                + self.temperature_amplitude * wave * (1.0 - r / radius),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::generate;
    use approx::assert_relative_eq;

    #[test]
    fn test_helix_counts() {
        let mesh = generate(&HelicalStructure::default()).unwrap();
        assert_eq!(mesh.point_count(), 8 * 32 * 40);
        assert_eq!(mesh.cell_count(), 7 * 32 * 39);
    }

    #[test]
    fn test_helix_axis_fallback() {
        let sample = HelicalStructure::default().sample(DVec3::new(0.0, 0.0, 1.3));
        assert_eq!(sample.displacement, DVec3::ZERO);
        assert_eq!(sample.velocity, DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(sample.helical_stress, 100.0);
        assert_eq!(sample.temperature, 300.0);
    }

    #[test]
    fn test_helix_grid_lines_wind() {
        // Consecutive axial layers of one angular line are rotated by the
        // winding of their height difference.
        let helix = HelicalStructure::default();
        let low = helix.point(GridIndex::new(0, 0, 7));
        let p = helix.point(GridIndex::new(1, 0, 7));
        let expected = helix.winding(p.z - low.z) + low.y.atan2(low.x);
        assert_relative_eq!(p.y.atan2(p.x), expected, epsilon = 1e-9);
        assert_relative_eq!(p.x.hypot(p.y), 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_helix_rim_is_stress_free() {
        let sample = HelicalStructure::default().sample(DVec3::new(2.0, 0.0, 0.25));
        assert_relative_eq!(sample.helical_stress, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.temperature, 300.0, epsilon = 1e-12);
    }

    #[test]
    fn test_helix_phase_drives_temperature() {
        // theta = 0, z = 0.5: phase is a quarter turn.
        let sample = HelicalStructure::default().sample(DVec3::new(1.0, 0.0, 0.5));
        assert_relative_eq!(sample.temperature, 350.0, epsilon = 1e-9);
        assert_relative_eq!(sample.velocity.z, 1.5, epsilon = 1e-12);
        assert_relative_eq!(sample.displacement.x, 0.1, epsilon = 1e-12);
        assert_relative_eq!(sample.displacement.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_helix_stress_ripples_with_angle() {
        // theta = pi/8 at z = 0: the fourfold ripple peaks at 1.5.
        let theta = std::f64::consts::PI / 8.0;
        let sample = HelicalStructure::default().sample(DVec3::new(theta.cos(), theta.sin(), 0.0));
        assert_relative_eq!(sample.helical_stress, 100.0 * 1.5 * (2.0 - 1.0) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(sample.temperature, 300.0 + 100.0 * theta.sin() * 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_helix_rejects_zero_pitch() {
        let helix = HelicalStructure {
            pitch: 0.0,
            ..HelicalStructure::default()
        };
        assert!(generate(&helix).is_err());
    }
}
