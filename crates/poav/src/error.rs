//! Error taxonomy for POAV analysis.
//!
//! Every geometric degeneracy is a distinct variant so a batch driver can
//! decide per site whether to skip, flag, or abort. Nothing in this crate
//! replaces an error with a default number.

use std::fmt;

use crate::PoavKind;

/// Errors surfaced by bond validation, POAV construction, and serialization.
#[derive(Clone, Debug, PartialEq)]
pub enum PoavError {
    /// Input violates a construction precondition (bond count, zero-length bond).
    Precondition { reason: String },
    /// An angle array does not have exactly three admissible values.
    Shape { field: &'static str, reason: String },
    /// Triple product or a hybridization denominator is numerically zero.
    DegenerateGeometry { reason: String },
    /// A quantity was requested before the angle array it depends on was set.
    MissingData { field: &'static str },
    /// An attachment slot received a result of another variant.
    TypeMismatch { expected: PoavKind, found: PoavKind },
}

impl PoavError {
    pub(crate) fn precondition(reason: impl Into<String>) -> Self {
        Self::Precondition {
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Shape {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn degenerate(reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            reason: reason.into(),
        }
    }

    /// True for the errors that describe an ill-defined site rather than bad input.
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }
}

impl fmt::Display for PoavError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Precondition { reason } => write!(f, "precondition violated: {reason}"),
            Self::Shape { field, reason } => write!(f, "bad shape for `{field}`: {reason}"),
            Self::DegenerateGeometry { reason } => write!(f, "degenerate geometry: {reason}"),
            Self::MissingData { field } => write!(f, "`{field}` has not been set"),
            Self::TypeMismatch { expected, found } => {
                write!(f, "expected a `{expected}` instance, got `{found}`")
            }
        }
    }
}

impl std::error::Error for PoavError {}
