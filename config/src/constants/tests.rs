//! Tests for the centralized configuration constants.

use super::*;

/// Validates the extent check rejects axes that cannot form a cell.
#[test]
fn validate_extent_rejects_short_axes() {
    assert_eq!(validate_extent("radial", 2), Ok(2));
    assert_eq!(
        validate_extent("radial", 0).unwrap_err(),
        ConfigError::ExtentTooSmall {
            axis: "radial",
            extent: 0
        }
    );
}

/// Validates positive parameters and the non-finite guard.
#[test]
fn validate_positive_rejects_zero_negative_and_nan() {
    assert!(validate_positive("height", 6.0).is_ok());
    assert!(validate_positive("height", 0.0).is_err());
    assert!(validate_positive("height", -1.0).is_err());
    assert!(validate_positive("height", f64::INFINITY).is_err());
}

#[test]
fn validate_non_negative_accepts_zero() {
    assert_eq!(validate_non_negative("inner radius", 0.0), Ok(0.0));
    assert_eq!(
        validate_non_negative("inner radius", -0.5).unwrap_err(),
        ConfigError::NegativeParameter {
            name: "inner radius",
            value: -0.5
        }
    );
    assert!(validate_non_negative("inner radius", f64::NAN).is_err());
}

#[test]
fn validate_range_requires_strict_order() {
    assert!(validate_range("minor radius", 0.0, 1.0).is_ok());
    assert!(validate_range("minor radius", 1.0, 1.0).is_err());
}

#[test]
fn error_messages_name_the_offender() {
    let err = validate_extent("polar", 1).unwrap_err();
    assert!(err.to_string().contains("polar"));

    let err = validate_positive("pitch", -2.0).unwrap_err();
    assert!(err.to_string().contains("pitch"));
}
