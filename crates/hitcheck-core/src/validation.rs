//! Parameter validation.
//!
//! Checks run in a fixed order and the first violation wins:
//! presence, then parseability of all three values, then radius
//! positivity, then coordinate range.

use std::collections::HashMap;

use crate::error::ValidationError;
use crate::types::Point3;

/// Lower bound for `x` and `y` (inclusive).
pub const COORDINATE_MIN: f64 = -5.0;

/// Upper bound for `x` and `y` (inclusive).
pub const COORDINATE_MAX: f64 = 5.0;

const REQUIRED: [&str; 3] = ["x", "y", "r"];

/// Validate raw request parameters and produce the point to classify.
pub fn validate(params: &HashMap<String, String>) -> Result<Point3, ValidationError> {
    if !REQUIRED.iter().all(|key| params.contains_key(*key)) {
        return Err(ValidationError::MissingParameter);
    }

    let x = parse_finite(&params["x"])?;
    let y = parse_finite(&params["y"])?;
    let r = parse_finite(&params["r"])?;

    if r <= 0.0 {
        return Err(ValidationError::NonPositiveRadius);
    }

    if !in_range(x) || !in_range(y) {
        return Err(ValidationError::OutOfRange);
    }

    Ok(Point3::new(x, y, r))
}

fn parse_finite(raw: &str) -> Result<f64, ValidationError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or(ValidationError::InvalidNumber)
}

fn in_range(value: f64) -> bool {
    (COORDINATE_MIN..=COORDINATE_MAX).contains(&value)
}
