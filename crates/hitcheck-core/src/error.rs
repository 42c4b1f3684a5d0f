//! Error types for the hit-check pipeline.

use thiserror::Error;

/// Rejections produced by parameter validation.
///
/// The `Display` text is shown to the client verbatim, so it must stay
/// stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// One of `x`, `y`, `r` is absent.
    #[error("Missing required parameters: x, y, r")]
    MissingParameter,

    /// A value does not parse as a finite real number.
    #[error("Invalid number format")]
    InvalidNumber,

    /// `r <= 0`.
    #[error("R must be positive")]
    NonPositiveRadius,

    /// `x` or `y` outside `[-5, 5]`.
    #[error("X and Y must be between -5 and 5")]
    OutOfRange,
}

impl ValidationError {
    /// Stable machine-readable code, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::MissingParameter => "missing_parameter",
            ValidationError::InvalidNumber => "invalid_number",
            ValidationError::NonPositiveRadius => "non_positive_radius",
            ValidationError::OutOfRange => "out_of_range",
        }
    }
}

/// Failures while producing a response document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Structured payload could not be serialized.
    #[error("failed to serialize response: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_messages_are_client_facing() {
        assert_eq!(
            ValidationError::MissingParameter.to_string(),
            "Missing required parameters: x, y, r"
        );
        assert_eq!(ValidationError::InvalidNumber.to_string(), "Invalid number format");
        assert_eq!(ValidationError::NonPositiveRadius.to_string(), "R must be positive");
        assert_eq!(
            ValidationError::OutOfRange.to_string(),
            "X and Y must be between -5 and 5"
        );
    }

    #[test]
    fn validation_kinds_are_distinct() {
        let kinds = [
            ValidationError::MissingParameter.kind(),
            ValidationError::InvalidNumber.kind(),
            ValidationError::NonPositiveRadius.kind(),
            ValidationError::OutOfRange.kind(),
        ];
        for (i, a) in kinds.iter().enumerate() {
            for b in &kinds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ValidationError>();
        assert_send_sync::<RenderError>();
    }
}
