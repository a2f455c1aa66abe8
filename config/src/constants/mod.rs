//! Centralized configuration values shared across the synthetic mesh
//! generator.
//!
//! Each public item in this module documents its purpose and provides a minimal
//! usage example so that downstream crates can remain declarative and avoid
//! scattering literals.

use std::fmt;

// =============================================================================
// GRID CONSTANTS
// =============================================================================

/// Smallest extent accepted on any parameter-grid axis.
///
/// Two points are needed along an axis before a single layer of cells can
/// be formed between them.
///
/// # Examples
/// ```
/// use config::constants::MIN_AXIS_EXTENT;
/// assert_eq!(MIN_AXIS_EXTENT, 2);
/// ```
pub const MIN_AXIS_EXTENT: usize = 2;

/// Number of corner points referenced by one hexahedral cell.
///
/// # Examples
/// ```
/// use config::constants::HEX_CORNERS;
/// assert_eq!(HEX_CORNERS, 8);
/// ```
pub const HEX_CORNERS: usize = 8;

// =============================================================================
// VTK CONSTANTS
// =============================================================================

/// VTK cell type code for a linear hexahedron (`VTK_HEXAHEDRON`).
///
/// # Examples
/// ```
/// use config::constants::VTK_HEXAHEDRON;
/// assert_eq!(VTK_HEXAHEDRON, 12);
/// ```
pub const VTK_HEXAHEDRON: u8 = 12;

/// File extension used for VTK XML unstructured-grid output.
///
/// # Examples
/// ```
/// use config::constants::VTU_EXTENSION;
/// let file = format!("radial_sphere.{VTU_EXTENSION}");
/// assert_eq!(file, "radial_sphere.vtu");
/// ```
pub const VTU_EXTENSION: &str = "vtu";

/// VTK XML file format version written into the `VTKFile` root element.
pub const VTU_FILE_VERSION: &str = "1.0";

// =============================================================================
// DEGENERATE-POINT THRESHOLDS
// =============================================================================

/// Distance from the z axis at or below which cylindrical quantities are
/// treated as undefined (cylinder, helix and torus axis).
///
/// Only an exact zero radius is degenerate for these shapes.
///
/// # Examples
/// ```
/// use config::constants::AXIS_DEGENERATE_RADIUS;
/// let radius: f64 = 0.0;
/// assert!(!(radius > AXIS_DEGENERATE_RADIUS));
/// ```
pub const AXIS_DEGENERATE_RADIUS: f64 = 0.0;

/// Distance from the sphere center at or below which the radial direction
/// is treated as undefined.
///
/// # Examples
/// ```
/// use config::constants::SPHERE_DEGENERATE_RADIUS;
/// assert!(0.005 <= SPHERE_DEGENERATE_RADIUS);
/// ```
pub const SPHERE_DEGENERATE_RADIUS: f64 = 0.01;

/// Distance from the torus core circle at or below which the secondary
/// (minor-circle) circulation is not evaluated.
pub const TORUS_MINOR_DEGENERATE_RADIUS: f64 = 0.01;

// =============================================================================
// TWISTED CYLINDER
// =============================================================================

/// Radial point count of the twisted cylinder.
pub const CYLINDER_RADIAL_EXTENT: usize = 12;

/// Angular point count of the twisted cylinder.
pub const CYLINDER_ANGULAR_EXTENT: usize = 24;

/// Axial point count of the twisted cylinder.
pub const CYLINDER_AXIAL_EXTENT: usize = 30;

/// Outer radius of the twisted cylinder.
pub const CYLINDER_RADIUS: f64 = 2.0;

/// Height of the twisted cylinder, centered on z = 0.
pub const CYLINDER_HEIGHT: f64 = 6.0;

/// Shear modulus converting twist strain into shear stress.
///
/// # Examples
/// ```
/// use config::constants::{CYLINDER_HEIGHT, CYLINDER_RADIUS, CYLINDER_SHEAR_MODULUS};
/// let twist_rate = std::f64::consts::PI / CYLINDER_HEIGHT;
/// let rim_stress = CYLINDER_RADIUS * twist_rate * CYLINDER_SHEAR_MODULUS;
/// assert!(rim_stress > 0.0);
/// ```
pub const CYLINDER_SHEAR_MODULUS: f64 = 50_000.0;

// =============================================================================
// RADIAL SPHERE
// =============================================================================

/// Radial point count of the sphere.
pub const SPHERE_RADIAL_EXTENT: usize = 15;

/// Azimuthal point count of the sphere.
pub const SPHERE_AZIMUTHAL_EXTENT: usize = 24;

/// Polar point count of the sphere.
pub const SPHERE_POLAR_EXTENT: usize = 16;

/// Outer radius of the sphere.
pub const SPHERE_MAX_RADIUS: f64 = 3.0;

/// Radial stress at the sphere center; decays linearly to zero at the rim.
pub const SPHERE_CENTER_STRESS: f64 = 100.0;

/// Pressure at the sphere center; decays exponentially with radius.
pub const SPHERE_CENTER_PRESSURE: f64 = 50.0;

// =============================================================================
// TORUS VORTEX
// =============================================================================

/// Point count around the major circle.
pub const TORUS_MAJOR_EXTENT: usize = 24;

/// Point count around the minor circle.
pub const TORUS_MINOR_EXTENT: usize = 16;

/// Layer count between the inner and outer minor radius.
pub const TORUS_LAYER_EXTENT: usize = 6;

/// Major radius of the torus.
pub const TORUS_MAJOR_RADIUS: f64 = 3.0;

/// Inner bound of the minor radius (the torus is a thick shell).
pub const TORUS_INNER_RADIUS: f64 = 0.8;

/// Outer bound of the minor radius.
pub const TORUS_OUTER_RADIUS: f64 = 1.2;

/// Strength of the primary circulation around the major circle.
pub const TORUS_CIRCULATION: f64 = 3.0;

/// Fluid density used for dynamic pressure.
pub const TORUS_DENSITY: f64 = 1.0;

// =============================================================================
// HELICAL STRUCTURE
// =============================================================================

/// Radial point count of the helix.
pub const HELIX_RADIAL_EXTENT: usize = 8;

/// Angular point count of the helix.
pub const HELIX_ANGULAR_EXTENT: usize = 32;

/// Axial point count of the helix.
pub const HELIX_AXIAL_EXTENT: usize = 40;

/// Outer radius of the helix.
pub const HELIX_MAX_RADIUS: f64 = 2.0;

/// Height of the helix, centered on z = 0.
pub const HELIX_HEIGHT: f64 = 8.0;

/// Axial distance of one full helical turn.
///
/// # Examples
/// ```
/// use config::constants::{HELIX_HEIGHT, HELIX_PITCH};
/// let turns = HELIX_HEIGHT / HELIX_PITCH;
/// assert_eq!(turns, 4.0);
/// ```
pub const HELIX_PITCH: f64 = 2.0;

/// Stress level the helical stress oscillates around at the axis.
pub const HELIX_REFERENCE_STRESS: f64 = 100.0;

/// Background temperature of the helix (kelvin).
pub const HELIX_REFERENCE_TEMPERATURE: f64 = 300.0;

/// Amplitude of the helical temperature wave at the axis (kelvin).
pub const HELIX_TEMPERATURE_AMPLITUDE: f64 = 100.0;

// =============================================================================
// VALIDATION
// =============================================================================

/// Checks that a grid axis extent can form at least one cell layer.
///
/// # Examples
/// ```
/// use config::constants::{validate_extent, ConfigError};
/// assert_eq!(validate_extent("angular", 24), Ok(24));
/// assert_eq!(
///     validate_extent("angular", 1),
///     Err(ConfigError::ExtentTooSmall { axis: "angular", extent: 1 })
/// );
/// ```
pub fn validate_extent(axis: &'static str, extent: usize) -> Result<usize, ConfigError> {
    if extent < MIN_AXIS_EXTENT {
        return Err(ConfigError::ExtentTooSmall { axis, extent });
    }
    Ok(extent)
}

/// Checks that a geometric parameter is strictly positive and finite.
///
/// # Examples
/// ```
/// use config::constants::validate_positive;
/// assert_eq!(validate_positive("radius", 2.0), Ok(2.0));
/// assert!(validate_positive("radius", 0.0).is_err());
/// assert!(validate_positive("radius", f64::NAN).is_err());
/// ```
pub fn validate_positive(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !(value.is_finite() && value > 0.0) {
        return Err(ConfigError::NonPositiveParameter { name, value });
    }
    Ok(value)
}

/// Checks that a parameter is zero or positive and finite.
///
/// # Examples
/// ```
/// use config::constants::validate_non_negative;
/// assert_eq!(validate_non_negative("inner radius", 0.0), Ok(0.0));
/// assert!(validate_non_negative("inner radius", -0.5).is_err());
/// ```
pub fn validate_non_negative(name: &'static str, value: f64) -> Result<f64, ConfigError> {
    if !(value.is_finite() && value >= 0.0) {
        return Err(ConfigError::NegativeParameter { name, value });
    }
    Ok(value)
}

/// Checks that `lower < upper` for a bounded parameter range.
///
/// # Examples
/// ```
/// use config::constants::validate_range;
/// assert!(validate_range("minor radius", 0.8, 1.2).is_ok());
/// assert!(validate_range("minor radius", 1.2, 0.8).is_err());
/// ```
pub fn validate_range(name: &'static str, lower: f64, upper: f64) -> Result<(), ConfigError> {
    if !(lower.is_finite() && upper.is_finite() && lower < upper) {
        return Err(ConfigError::InvalidRange { name, lower, upper });
    }
    Ok(())
}

/// Error returned when invalid configuration values are provided.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Raised when an axis has fewer than [`MIN_AXIS_EXTENT`] points.
    ExtentTooSmall {
        /// Axis label, e.g. `"radial"`.
        axis: &'static str,
        /// Rejected extent.
        extent: usize,
    },
    /// Raised when a length-like parameter is zero, negative or not finite.
    NonPositiveParameter {
        /// Parameter label.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Raised when a parameter that may be zero is negative or not finite.
    NegativeParameter {
        /// Parameter label.
        name: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Raised when a range is empty or inverted.
    InvalidRange {
        /// Range label.
        name: &'static str,
        /// Lower bound as supplied.
        lower: f64,
        /// Upper bound as supplied.
        upper: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ExtentTooSmall { axis, extent } => {
                write!(f, "{axis} extent must be >= {MIN_AXIS_EXTENT}: {extent}")
            }
            ConfigError::NonPositiveParameter { name, value } => {
                write!(f, "{name} must be positive: {value}")
            }
            ConfigError::NegativeParameter { name, value } => {
                write!(f, "{name} must not be negative: {value}")
            }
            ConfigError::InvalidRange { name, lower, upper } => {
                write!(f, "{name} range is empty: {lower}..{upper}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests;
