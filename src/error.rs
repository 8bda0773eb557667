// src/error.rs
use std::fmt;

/// Custom error types for the fast-pde library
///
/// Every numeric routine in the crate is total over a validated grid, so the
/// only failure is a model or discretization parameter that violates its
/// constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum PdeError {
    /// Invalid parameter values
    InvalidParameter {
        parameter: String,
        value: f64,
        constraint: String,
    },
}

impl fmt::Display for PdeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdeError::InvalidParameter {
                parameter,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid parameter '{}' = {}: {}",
                    parameter, value, constraint
                )
            }
        }
    }
}

impl std::error::Error for PdeError {}

/// Result type alias for fast-pde operations
pub type PdeResult<T> = Result<T, PdeError>;

/// Validation utilities
pub mod validation {
    use super::{PdeError, PdeResult};

    /// Validate that a parameter is strictly positive
    pub fn validate_positive(name: &str, value: f64) -> PdeResult<()> {
        if value <= 0.0 {
            Err(PdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a parameter is non-negative
    pub fn validate_non_negative(name: &str, value: f64) -> PdeResult<()> {
        if value < 0.0 {
            Err(PdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be non-negative (≥ 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a value is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PdeResult<()> {
        if !value.is_finite() {
            Err(PdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a step count of the discretization
    pub fn validate_steps(name: &str, steps: usize) -> PdeResult<()> {
        if steps == 0 {
            Err(PdeError::InvalidParameter {
                parameter: name.to_string(),
                value: 0.0,
                constraint: "must be greater than 0".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a step count against a minimum
    pub fn validate_min_steps(name: &str, steps: usize, min: usize) -> PdeResult<()> {
        if steps < min {
            Err(PdeError::InvalidParameter {
                parameter: name.to_string(),
                value: steps as f64,
                constraint: format!("must be at least {}", min),
            })
        } else {
            Ok(())
        }
    }

    /// Largest exponent `e^x` may take without leaving the finite `f64` range
    pub const MAX_EXPONENT: f64 = 700.0;

    /// Validate that a parameter keeps an exponential factor representable
    ///
    /// `exponent` is the largest magnitude passed to `exp` that `value`
    /// implies.
    pub fn validate_exponent(name: &str, value: f64, exponent: f64) -> PdeResult<()> {
        if !(exponent.abs() <= MAX_EXPONENT) {
            Err(PdeError::InvalidParameter {
                parameter: name.to_string(),
                value,
                constraint: format!(
                    "implies exponent {:.1}, beyond the representable limit {}",
                    exponent, MAX_EXPONENT
                ),
            })
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::validation::*;
    use super::*;

    #[test]
    fn test_validate_positive() {
        assert!(validate_positive("sigma", 0.2).is_ok());
        assert!(validate_positive("sigma", 0.0).is_err());
        assert!(validate_positive("sigma", -0.1).is_err());
    }

    #[test]
    fn test_validate_non_negative() {
        assert!(validate_non_negative("rate", 0.0).is_ok());
        assert!(validate_non_negative("rate", 0.05).is_ok());
        assert!(validate_non_negative("rate", -1e-12).is_err());
    }

    #[test]
    fn test_validate_finite() {
        assert!(validate_finite("value", 1.0).is_ok());
        assert!(validate_finite("value", f64::NAN).is_err());
        assert!(validate_finite("value", f64::INFINITY).is_err());
        assert!(validate_finite("value", f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_steps() {
        assert!(validate_steps("time_steps", 1).is_ok());
        assert!(validate_steps("time_steps", 0).is_err());
        assert!(validate_min_steps("price_steps", 2, 2).is_ok());
        assert!(validate_min_steps("price_steps", 1, 2).is_err());
    }

    #[test]
    fn test_validate_exponent() {
        assert!(validate_exponent("sigma", 0.1, 650.0).is_ok());
        assert!(validate_exponent("sigma", 0.02, 1220.0).is_err());
        assert!(validate_exponent("sigma", 0.02, f64::NAN).is_err());
    }

    #[test]
    fn test_error_display() {
        let error = PdeError::InvalidParameter {
            parameter: "sigma".to_string(),
            value: -0.1,
            constraint: "must be positive".to_string(),
        };

        let display = format!("{}", error);
        assert!(display.contains("sigma"));
        assert!(display.contains("-0.1"));
        assert!(display.contains("positive"));
    }
}
