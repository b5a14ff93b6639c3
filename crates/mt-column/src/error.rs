//! Error types for column design operations.

use thiserror::Error;

/// Errors that can occur while building the McCabe-Thiele construction.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColumnError {
    /// Inputs or intermediate geometry violate the physical assumptions.
    #[error("Domain error: {what}")]
    Domain { what: String },

    /// The staircase did not reach the bottoms composition.
    #[error("Numerical divergence after {stages} stages: {what}")]
    NumericalDivergence { what: String, stages: usize },
}

impl ColumnError {
    pub(crate) fn domain(what: impl Into<String>) -> Self {
        ColumnError::Domain { what: what.into() }
    }
}

pub type ColumnResult<T> = Result<T, ColumnError>;
