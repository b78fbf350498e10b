//! Error types and result utilities for signal chain operations.
//!
//! Errors are layered: [`SignalError`] is what every public operation returns,
//! with the more specific [`ParameterError`] and [`PlottingError`] nested inside.
//!
//! ```rust
//! use signal_chain::{ParameterError, SignalError, SignalResult};
//!
//! let result: SignalResult<()> = Err(SignalError::Parameter(
//!     ParameterError::invalid_value("filter_order", "must be > 0"),
//! ));
//!
//! match result {
//!     Ok(()) => {}
//!     Err(SignalError::Parameter(err)) => eprintln!("Invalid parameter: {err}"),
//!     Err(other) => eprintln!("Other error: {other}"),
//! }
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Convenience type alias for results that may contain a [`SignalError`].
pub type SignalResult<T> = Result<T, SignalError>;

/// Top-level error type for every stage of the signal chain.
#[derive(Error, Debug)]
pub enum SignalError {
    /// An argument or configuration value was rejected before any processing happened.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// An operation that needs at least one sample was handed an empty signal.
    #[error("Empty signal: {operation} requires at least one sample")]
    EmptySignal {
        /// Name of the operation that rejected the signal.
        operation: &'static str,
    },

    /// Rendering a spectrum failed.
    #[error(transparent)]
    Plotting(#[from] PlottingError),

    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SignalError {
    /// Create an empty-signal error for the named operation.
    pub const fn empty_signal(operation: &'static str) -> Self {
        Self::EmptySignal { operation }
    }
}

/// Errors raised while validating operation parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    /// The value is malformed for the parameter (non-finite, zero order, ...).
    #[error("Invalid value for '{parameter}': {reason}")]
    InvalidValue {
        /// Parameter name.
        parameter: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The value is well formed but lies outside the accepted range.
    #[error("Parameter '{parameter}' = {value} is out of range {range}")]
    OutOfRange {
        /// Parameter name.
        parameter: String,
        /// The offending value.
        value: f64,
        /// Human readable description of the accepted range.
        range: String,
    },
}

impl ParameterError {
    /// Create an [`ParameterError::InvalidValue`] error.
    pub fn invalid_value(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create an [`ParameterError::OutOfRange`] error.
    pub fn out_of_range(parameter: impl Into<String>, value: f64, range: impl Into<String>) -> Self {
        Self::OutOfRange {
            parameter: parameter.into(),
            value,
            range: range.into(),
        }
    }

    /// Name of the parameter this error refers to.
    pub fn parameter(&self) -> &str {
        match self {
            Self::InvalidValue { parameter, .. } | Self::OutOfRange { parameter, .. } => parameter,
        }
    }
}

/// Errors raised by spectrum renderers.
#[derive(Error, Debug)]
pub enum PlottingError {
    /// The rendered output could not be written.
    #[error("Failed to write plot to {}: {source}", .path.display())]
    Write {
        /// Destination that could not be written.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// The spectrum holds nothing to draw.
    #[error("Nothing to plot: {0}")]
    NoData(String),
}

/// Reject NaN and infinities for a named parameter.
pub(crate) fn ensure_finite(parameter: &str, value: f64) -> Result<f64, ParameterError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ParameterError::invalid_value(
            parameter,
            format!("must be finite, got {value}"),
        ))
    }
}

/// Require a finite, strictly positive value.
pub(crate) fn ensure_positive(parameter: &str, value: f64) -> Result<f64, ParameterError> {
    let value = ensure_finite(parameter, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ParameterError::out_of_range(parameter, value, "(0, inf)"))
    }
}
