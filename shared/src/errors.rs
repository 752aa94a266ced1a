//! Error types for the health tracker

use thiserror::Error;

/// Errors raised by the health-metric calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricsError {
    #[error("Invalid input: {field} must be a positive, finite number (got {value})")]
    InvalidInput { field: &'static str, value: f64 },
    #[error("Out of range: {field} of {value} cannot be represented")]
    OutOfRange { field: &'static str, value: f64 },
}

impl MetricsError {
    pub(crate) fn invalid(field: &'static str, value: f64) -> Self {
        MetricsError::InvalidInput { field, value }
    }

    /// Name of the offending input field
    pub fn field(&self) -> &'static str {
        match self {
            MetricsError::InvalidInput { field, .. } | MetricsError::OutOfRange { field, .. } => {
                field
            }
        }
    }
}
