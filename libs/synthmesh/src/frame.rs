//! # Local Frames
//!
//! Derived polar quantities of a point, or an explicit marker that they are
//! undefined there. Field formulas match on the outcome so the fallback
//! branch for a point on an axis or at a center is never implicit.

use glam::DVec3;

/// Cylindrical quantities of a point relative to the z axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AxialFrame {
    /// The point is farther than the threshold from the axis.
    Regular {
        /// Distance from the z axis.
        radius: f64,
        /// `atan2(y, x)`.
        azimuth: f64,
        /// Unit vector pointing away from the axis in the xy plane.
        outward: DVec3,
    },
    /// The point lies on the axis; azimuth and outward direction are undefined.
    Degenerate,
}

impl AxialFrame {
    /// Derives the frame at `position`, degenerate when the axis distance is
    /// not strictly greater than `min_radius`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use glam::DVec3;
    /// use synthmesh::frame::AxialFrame;
    ///
    /// assert_eq!(AxialFrame::derive(DVec3::new(0.0, 0.0, 1.0), 0.0), AxialFrame::Degenerate);
    /// assert!(matches!(
    ///     AxialFrame::derive(DVec3::new(0.0, 2.0, 0.0), 0.0),
    ///     AxialFrame::Regular { radius, .. } if radius == 2.0
    /// ));
    /// ```
    pub fn derive(position: DVec3, min_radius: f64) -> Self {
        let radius = position.x.hypot(position.y);
        if radius > min_radius {
            Self::Regular {
                radius,
                azimuth: position.y.atan2(position.x),
                outward: DVec3::new(position.x / radius, position.y / radius, 0.0),
            }
        } else {
            Self::Degenerate
        }
    }
}

/// Spherical quantities of a point relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RadialFrame {
    /// The point is farther than the threshold from the origin.
    Regular {
        /// Distance from the origin.
        radius: f64,
        /// Unit vector from the origin through the point.
        outward: DVec3,
    },
    /// The point sits at the center; the radial direction is undefined.
    Degenerate,
}

impl RadialFrame {
    /// Derives the frame at `position`, degenerate when the distance from the
    /// origin is not strictly greater than `min_radius`.
    pub fn derive(position: DVec3, min_radius: f64) -> Self {
        let radius = position.length();
        if radius > min_radius {
            Self::Regular {
                radius,
                outward: position / radius,
            }
        } else {
            Self::Degenerate
        }
    }
}

/// Position of a point within the cross-section of a torus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MinorFrame {
    /// The point is off the core circle.
    Regular {
        /// Distance from the core circle.
        radius: f64,
        /// Angle around the core circle, `atan2(z, rho - major_radius)`.
        angle: f64,
        /// `(rho - major_radius) / radius`, the in-plane outward cosine.
        outward_cos: f64,
    },
    /// The point lies on (or numerically at) the core circle.
    Degenerate,
}

impl MinorFrame {
    /// Derives the cross-section frame for a point at axis distance `rho`
    /// and height `z` around a core circle of `major_radius`.
    pub fn derive(rho: f64, z: f64, major_radius: f64, min_radius: f64) -> Self {
        let offset = rho - major_radius;
        let radius = offset.hypot(z);
        if radius > min_radius {
            Self::Regular {
                radius,
                angle: z.atan2(offset),
                outward_cos: offset / radius,
            }
        } else {
            Self::Degenerate
        }
    }

    /// Distance from the core circle, defined for both outcomes.
    pub fn distance(rho: f64, z: f64, major_radius: f64) -> f64 {
        (rho - major_radius).hypot(z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_axial_regular() {
        match AxialFrame::derive(DVec3::new(0.0, 3.0, -1.0), 0.0) {
            AxialFrame::Regular {
                radius,
                azimuth,
                outward,
            } => {
                assert_relative_eq!(radius, 3.0);
                assert_relative_eq!(azimuth, FRAC_PI_2);
                assert_relative_eq!(outward.y, 1.0);
                assert_eq!(outward.z, 0.0);
            }
            AxialFrame::Degenerate => panic!("expected regular frame"),
        }
    }

    #[test]
    fn test_axial_on_axis_is_degenerate() {
        assert_eq!(
            AxialFrame::derive(DVec3::new(0.0, 0.0, 5.0), 0.0),
            AxialFrame::Degenerate
        );
    }

    #[test]
    fn test_radial_threshold_is_exclusive() {
        assert_eq!(
            RadialFrame::derive(DVec3::new(0.01, 0.0, 0.0), 0.01),
            RadialFrame::Degenerate
        );
        assert!(matches!(
            RadialFrame::derive(DVec3::new(0.0, 0.0, 0.02), 0.01),
            RadialFrame::Regular { .. }
        ));
    }

    #[test]
    fn test_minor_frame_angle() {
        match MinorFrame::derive(3.0, 1.0, 3.0, 0.01) {
            MinorFrame::Regular {
                radius,
                angle,
                outward_cos,
            } => {
                assert_relative_eq!(radius, 1.0);
                assert_relative_eq!(angle, FRAC_PI_2);
                assert_relative_eq!(outward_cos, 0.0);
            }
            MinorFrame::Degenerate => panic!("expected regular frame"),
        }
        assert_eq!(MinorFrame::derive(3.0, 0.0, 3.0, 0.01), MinorFrame::Degenerate);
    }
}
