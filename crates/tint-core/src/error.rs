#![forbid(unsafe_code)]

//! Error taxonomy shared by every tint crate.
//!
//! # Design
//!
//! - Validation happens before any value is committed, so a returned error
//!   never leaves a half-built color or tree behind.
//! - Errors carry the offending input so malformed tokens are easy to find
//!   at authoring time.
//! - Retrying is pointless: every operation is a pure function of its inputs.

use thiserror::Error;

/// Result type for tint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced while parsing colors, validating arguments, or computing
/// contrast.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Color text that matches none of the accepted grammars, or whose
    /// components fall outside their ranges.
    #[error("invalid color format: {input:?}")]
    InvalidColorFormat {
        /// The text that failed to parse, verbatim.
        input: String,
    },
    /// A numeric argument (ratio, alpha, percentage) outside its documented
    /// bounds.
    #[error("{name} out of range: {value} (expected {min}..={max})")]
    InvalidArgumentRange {
        /// Argument name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },
    /// A luminance or contrast computation produced NaN or an infinity.
    #[error("invalid operation in {operation}: {detail}")]
    InvalidOperation {
        /// The computation that failed.
        operation: &'static str,
        /// What went wrong.
        detail: String,
    },
}

impl Error {
    /// Build an [`Error::InvalidColorFormat`] for `input`.
    #[must_use]
    pub fn invalid_color(input: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.into(),
        }
    }

    /// Validate that `value` lies in `min..=max`.
    ///
    /// NaN is always rejected.
    pub fn check_range(name: &'static str, value: f64, min: f64, max: f64) -> Result<f64> {
        if value.is_nan() || value < min || value > max {
            return Err(Self::InvalidArgumentRange {
                name,
                value,
                min,
                max,
            });
        }
        Ok(value)
    }

    /// Validate that a computed value is finite.
    pub fn check_finite(operation: &'static str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::InvalidOperation {
                operation,
                detail: format!("result was {value}"),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_color_carries_input() {
        let err = Error::invalid_color("not-a-color");
        assert_eq!(
            err,
            Error::InvalidColorFormat {
                input: "not-a-color".to_string()
            }
        );
        assert!(err.to_string().contains("not-a-color"));
    }

    #[test]
    fn check_range_accepts_bounds() {
        assert_eq!(Error::check_range("ratio", 1.0, 1.0, 21.0), Ok(1.0));
        assert_eq!(Error::check_range("ratio", 21.0, 1.0, 21.0), Ok(21.0));
    }

    #[test]
    fn check_range_rejects_outside_and_nan() {
        assert!(matches!(
            Error::check_range("ratio", 0.5, 1.0, 21.0),
            Err(Error::InvalidArgumentRange { name: "ratio", .. })
        ));
        assert!(Error::check_range("ratio", 21.5, 1.0, 21.0).is_err());
        assert!(Error::check_range("ratio", f64::NAN, 1.0, 21.0).is_err());
    }

    #[test]
    fn check_finite_rejects_nan_and_infinity() {
        assert_eq!(Error::check_finite("contrast", 2.5), Ok(2.5));
        assert!(matches!(
            Error::check_finite("contrast", f64::NAN),
            Err(Error::InvalidOperation {
                operation: "contrast",
                ..
            })
        ));
        assert!(Error::check_finite("contrast", f64::INFINITY).is_err());
    }

    #[test]
    fn range_error_message_names_argument() {
        let err = Error::check_range("alpha", 2.0, 0.0, 1.0).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("alpha"), "{msg}");
        assert!(msg.contains('2'), "{msg}");
    }
}
