//! # Torus Vortex
//!
//! Thick torus shell carrying a circulating flow around the z axis, with a
//! secondary swirl around the core circle.

use std::f64::consts::{PI, TAU};

use config::constants::{
    validate_extent, validate_non_negative, validate_positive, validate_range,
    AXIS_DEGENERATE_RADIUS, TORUS_CIRCULATION, TORUS_DENSITY, TORUS_INNER_RADIUS,
    TORUS_LAYER_EXTENT, TORUS_MAJOR_EXTENT, TORUS_MAJOR_RADIUS, TORUS_MINOR_DEGENERATE_RADIUS,
    TORUS_MINOR_EXTENT, TORUS_OUTER_RADIUS,
};
use glam::DVec3;

use crate::error::SynthResult;
use crate::fields::{FieldSample, FieldSpec, FieldValue};
use crate::frame::{AxialFrame, MinorFrame};
use crate::grid::{open_fraction, periodic_fraction, Axis, GridIndex, ParamGrid};
use crate::synth::ShapeGenerator;

/// Torus parameters. Grid axes are (major angle, minor angle, shell layer).
#[derive(Debug, Clone, PartialEq)]
pub struct TorusVortex {
    pub major_extent: usize,
    pub minor_extent: usize,
    pub layer_extent: usize,
    /// Distance from the z axis to the core circle.
    pub major_radius: f64,
    /// Inner and outer minor radius of the shell.
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Primary circulation speed at the inner shell wall.
    pub circulation: f64,
    pub density: f64,
}

impl Default for TorusVortex {
    fn default() -> Self {
        Self {
            major_extent: TORUS_MAJOR_EXTENT,
            minor_extent: TORUS_MINOR_EXTENT,
            layer_extent: TORUS_LAYER_EXTENT,
            major_radius: TORUS_MAJOR_RADIUS,
            inner_radius: TORUS_INNER_RADIUS,
            outer_radius: TORUS_OUTER_RADIUS,
            circulation: TORUS_CIRCULATION,
            density: TORUS_DENSITY,
        }
    }
}

impl TorusVortex {
    /// Radial thickness of the shell.
    #[inline]
    pub fn shell_width(&self) -> f64 {
        self.outer_radius - self.inner_radius
    }
}

/// Fields of the torus vortex at one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TorusSample {
    pub displacement: DVec3,
    pub velocity: DVec3,
    pub vorticity: f64,
    pub dynamic_pressure: f64,
}

impl TorusSample {
    /// Values on the z axis, which only a degenerate torus reaches.
    pub const ON_AXIS: Self = Self {
        displacement: DVec3::ZERO,
        velocity: DVec3::ZERO,
        vorticity: 0.0,
        dynamic_pressure: 0.0,
    };
}

impl FieldSample for TorusSample {
    const LAYOUT: &'static [FieldSpec] = &[
        FieldSpec::vector("Torus_Displacement"),
        FieldSpec::vector("Vortex_Velocity"),
        FieldSpec::scalar("Vorticity"),
        FieldSpec::scalar("Dynamic_Pressure"),
    ];
    const ACTIVE_SCALAR: &'static str = "Dynamic_Pressure";
    const ACTIVE_VECTOR: &'static str = "Torus_Displacement";

    fn value(&self, slot: usize) -> FieldValue {
        match slot {
            0 => FieldValue::Vector(self.displacement),
            1 => FieldValue::Vector(self.velocity),
            2 => FieldValue::Scalar(self.vorticity),
            _ => FieldValue::Scalar(self.dynamic_pressure),
        }
    }
}

impl ShapeGenerator for TorusVortex {
    type Sample = TorusSample;

    fn name(&self) -> &'static str {
        "torus_vortex"
    }

    fn grid(&self) -> SynthResult<ParamGrid> {
        validate_non_negative("torus inner radius", self.inner_radius)?;
        validate_positive("torus outer radius", self.outer_radius)?;
        validate_range("torus shell", self.inner_radius, self.outer_radius)?;
        validate_range("torus major radius", self.outer_radius, self.major_radius)?;
        ParamGrid::new(
            Axis::periodic(validate_extent("major", self.major_extent)?),
            Axis::periodic(validate_extent("minor", self.minor_extent)?),
            Axis::open(validate_extent("layer", self.layer_extent)?),
        )
    }

    fn point(&self, index: GridIndex) -> DVec3 {
        let u = periodic_fraction(index.outer, self.major_extent) * TAU;
        let v = periodic_fraction(index.middle, self.minor_extent) * TAU;
        let rho = self.inner_radius
            + open_fraction(index.inner, self.layer_extent) * self.shell_width();
        let ring = self.major_radius + rho * v.cos();
        DVec3::new(ring * u.cos(), ring * u.sin(), rho * v.sin())
    }

    fn sample(&self, position: DVec3) -> TorusSample {
        let (rho, phi, outward) = match AxialFrame::derive(position, AXIS_DEGENERATE_RADIUS) {
            AxialFrame::Regular {
                radius,
                azimuth,
                outward,
            } => (radius, azimuth, outward),
            AxialFrame::Degenerate => return TorusSample::ON_AXIS,
        };
        let DVec3 { x, y, z } = position;
        let width = self.shell_width();
        let core_distance = MinorFrame::distance(rho, z, self.major_radius);

        let pulsation = 0.1 * (4.0 * phi).sin() * (TAU * z / width).cos();
        let displacement = DVec3::new(
            outward.x * pulsation,
            outward.y * pulsation,
            0.1 * (2.0 * phi).sin() * (PI * core_distance / width).sin(),
        );

        let primary = self.circulation * (self.outer_radius - core_distance) / width;
        let mut velocity = DVec3::new(-primary * y / rho, primary * x / rho, 0.0);
        let mut vorticity = (primary / rho).abs();

        // The secondary swirl needs a direction around the core circle.
        if let MinorFrame::Regular {
            angle, outward_cos, ..
        } = MinorFrame::derive(rho, z, self.major_radius, TORUS_MINOR_DEGENERATE_RADIUS)
        {
            let secondary = (2.0 * phi + angle).sin();
            let drift = 0.2 * (2.0 * phi + angle).cos();
            velocity.x += drift * outward_cos * outward.x;
            velocity.y += drift * outward_cos * outward.y;
            velocity.z = secondary;
            vorticity += secondary.abs();
        }

        TorusSample {
            displacement,
            velocity,
            vorticity,
            dynamic_pressure: 0.5 * self.density * velocity.length_squared(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SynthError;
    use crate::synth::generate;
    use approx::assert_relative_eq;
    use config::constants::ConfigError;

    #[test]
    fn test_torus_counts() {
        // Both angular axes wrap, so only the layer axis loses a cell.
        let mesh = generate(&TorusVortex::default()).unwrap();
        assert_eq!(mesh.point_count(), 24 * 16 * 6);
        assert_eq!(mesh.cell_count(), 24 * 16 * 5);
    }

    #[test]
    fn test_torus_points_stay_in_shell() {
        let torus = TorusVortex::default();
        let mesh = generate(&torus).unwrap();
        for p in mesh.points() {
            let d = MinorFrame::distance(p.x.hypot(p.y), p.z, torus.major_radius);
            assert!(d >= torus.inner_radius - 1e-12);
            assert!(d <= torus.outer_radius + 1e-12);
        }
    }

    #[test]
    fn test_torus_dynamic_pressure_matches_speed() {
        let torus = TorusVortex::default();
        let sample = torus.sample(DVec3::new(4.0, 0.3, 0.5));
        assert_relative_eq!(
            sample.dynamic_pressure,
            0.5 * sample.velocity.length_squared(),
            max_relative = 1e-12
        );
        assert!(sample.vorticity > 0.0);
    }

    #[test]
    fn test_torus_inner_wall_circulation() {
        // Inner wall on the outer equator: peak primary speed, and the
        // secondary swirl only drifts outward.
        let torus = TorusVortex::default();
        let sample = torus.sample(DVec3::new(3.8, 0.0, 0.0));
        assert_relative_eq!(sample.velocity.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(sample.velocity.z, 0.0, epsilon = 1e-12);
        assert_relative_eq!(sample.velocity.x, 0.2, epsilon = 1e-12);
        assert_relative_eq!(sample.vorticity, 3.0 / 3.8, epsilon = 1e-12);
    }

    #[test]
    fn test_torus_core_circle_has_no_secondary_flow() {
        let torus = TorusVortex {
            inner_radius: 0.0,
            ..TorusVortex::default()
        };
        let sample = torus.sample(DVec3::new(0.0, 3.0, 0.0));
        assert_eq!(sample.velocity.z, 0.0);
        // Primary flow only: speed 3 * 1.2 / 1.2 at rho = 3.
        assert_relative_eq!(sample.velocity.length(), 3.0, epsilon = 1e-12);
        assert_relative_eq!(sample.vorticity, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_torus_displacement_pulses_with_major_angle() {
        // phi = pi/8 on the core circle's meridian, z = 0.2: a half period
        // along z (cos = -1) and a quarter wave around the core (sin = 1).
        let torus = TorusVortex::default();
        let phi = PI / 8.0;
        let sample = torus.sample(DVec3::new(3.0 * phi.cos(), 3.0 * phi.sin(), 0.2));
        let pulsation = 0.1 * (4.0 * phi).sin() * -1.0;
        assert_relative_eq!(sample.displacement.x, pulsation * phi.cos(), epsilon = 1e-9);
        assert_relative_eq!(sample.displacement.y, pulsation * phi.sin(), epsilon = 1e-9);
        assert_relative_eq!(
            sample.displacement.z,
            0.1 * (2.0 * phi).sin(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_torus_on_axis_fallback() {
        let sample = TorusVortex::default().sample(DVec3::new(0.0, 0.0, 0.4));
        assert_eq!(sample, TorusSample::ON_AXIS);
    }

    #[test]
    fn test_torus_rejects_inverted_shell() {
        let torus = TorusVortex {
            inner_radius: 1.5,
            outer_radius: 1.2,
            ..TorusVortex::default()
        };
        assert!(generate(&torus).is_err());
    }

    #[test]
    fn test_torus_rejects_negative_inner_radius() {
        let torus = TorusVortex {
            inner_radius: -0.5,
            ..TorusVortex::default()
        };
        assert!(matches!(
            torus.grid(),
            Err(SynthError::Config(ConfigError::NegativeParameter { .. }))
        ));

        let solid = TorusVortex {
            inner_radius: 0.0,
            ..TorusVortex::default()
        };
        assert!(solid.grid().is_ok());
    }
}
