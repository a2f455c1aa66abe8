//! # Config Crate
//!
//! Centralized configuration constants for the synthetic mesh generator.
//! Shape defaults, degenerate-point thresholds, physical coefficients and
//! VTK format codes are defined here so the generator crates stay free of
//! scattered literals.
//!
//! ## Usage
//!
//! ```rust
//! use config::constants::{validate_extent, CYLINDER_RADIAL_EXTENT, MIN_AXIS_EXTENT};
//!
//! let extent = validate_extent("radial", CYLINDER_RADIAL_EXTENT).unwrap();
//! assert!(extent >= MIN_AXIS_EXTENT);
//! assert!(validate_extent("radial", 1).is_err());
//! ```
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All constants defined once, used everywhere
//! - **No Dependencies**: Plain values and validators only
//! - **Well-Documented**: Every constant has clear documentation

pub mod constants;
