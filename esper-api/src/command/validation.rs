//! Client-side argument validation
//!
//! Every check here runs while a command is being built, so a rejected
//! argument never reaches the network.

use std::fmt::Display;

/// Validation error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Parameter '{parameter}' value '{value}' is out of range ({min}..={max})")]
    RangeError {
        parameter: String,
        value: String,
        min: String,
        max: String,
    },

    #[error("Parameter '{parameter}' value '{value}' is invalid: {reason}")]
    InvalidValue {
        parameter: String,
        value: String,
        reason: String,
    },

    #[error("Required parameter '{parameter}' is missing")]
    MissingParameter { parameter: String },

    #[error("Parameter '{parameter}' failed validation: {message}")]
    Custom { parameter: String, message: String },
}

impl ValidationError {
    pub fn range_error(parameter: &str, min: impl Display, max: impl Display, value: impl Display) -> Self {
        Self::RangeError {
            parameter: parameter.to_string(),
            value: value.to_string(),
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    pub fn invalid_value(parameter: &str, value: impl Display, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter: parameter.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn missing(parameter: &str) -> Self {
        Self::MissingParameter {
            parameter: parameter.to_string(),
        }
    }

    pub fn custom(parameter: &str, message: impl Into<String>) -> Self {
        Self::Custom {
            parameter: parameter.to_string(),
            message: message.into(),
        }
    }

    /// Name of the offending parameter
    pub fn parameter(&self) -> &str {
        match self {
            Self::RangeError { parameter, .. }
            | Self::InvalidValue { parameter, .. }
            | Self::MissingParameter { parameter }
            | Self::Custom { parameter, .. } => parameter,
        }
    }
}

/// Check `value` against an inclusive range
pub fn ensure_in_range<T>(parameter: &str, value: T, min: T, max: T) -> Result<T, ValidationError>
where
    T: PartialOrd + Display + Copy,
{
    if value < min || value > max {
        return Err(ValidationError::range_error(parameter, min, max, value));
    }
    Ok(value)
}

/// Reject empty or whitespace-only strings
pub fn ensure_not_blank(parameter: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::missing(parameter));
    }
    Ok(())
}
