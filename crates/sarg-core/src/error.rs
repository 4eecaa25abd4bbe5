use crate::domain::SargType;
use std::fmt;
use thiserror::Error as ThisError;

///
/// SargError
///
/// Programming-invariant violations raised by the sarg algebra.
///
/// These indicate a bug in the calling planner, never a user-data
/// condition: a predicate that merely cannot be expressed as a sarg is
/// reported as "no binding" and routed to the residual filter instead.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum SargError {
    #[error("coordinate {coordinate} is not assignable to domain {domain}")]
    CoordinateType { domain: SargType, coordinate: String },

    #[error("dynamic parameter ?{index} has type {param}, expected {domain}")]
    ParamType {
        index: usize,
        domain: SargType,
        param: SargType,
    },

    #[error("complement expects exactly one child, found {children}")]
    ComplementArity { children: usize },

    #[error("coordinates {left} and {right} cannot be ordered")]
    UnorderedCoordinates { left: String, right: String },
}

impl SargError {
    /// Stable classification for every sarg error.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::CoordinateType { .. }
            | Self::ParamType { .. }
            | Self::ComplementArity { .. }
            | Self::UnorderedCoordinates { .. } => ErrorClass::InvariantViolation,
        }
    }

    /// Render the error prefixed with its class, for diagnostics.
    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}: {self}", self.class())
    }

    pub(crate) fn unordered(left: &impl fmt::Display, right: &impl fmt::Display) -> Self {
        Self::UnorderedCoordinates {
            left: left.to_string(),
            right: right.to_string(),
        }
    }
}

///
/// ErrorClass
/// Internal error taxonomy for sarg classification.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}
