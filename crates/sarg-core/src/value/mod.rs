mod compare;
mod float;


use rust_decimal::{Decimal, prelude::ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use compare::{canonical_cmp, numeric_cmp};
pub use float::{Float64, NonFiniteFloat};

///
/// ValueFamily
///
/// Coarse type family of a literal; drives assignability and the rank
/// used when comparing values of different families.
///

#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ValueFamily {
    Null,
    Bool,
    Numeric,
    Text,
}

///
/// Value
/// literal payload of a predicate coordinate
///
/// Null        → the SQL null value; sorts below every non-null value.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Float64(Float64),
    Text(String),
}

impl Value {
    /// Build a float value, rejecting non-finite input.
    #[must_use]
    pub fn float(v: f64) -> Option<Self> {
        Float64::try_new(v).map(Self::Float64)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub const fn family(&self) -> ValueFamily {
        match self {
            Self::Null => ValueFamily::Null,
            Self::Bool(_) => ValueFamily::Bool,
            Self::Int(_) | Self::Decimal(_) | Self::Float64(_) => ValueFamily::Numeric,
            Self::Text(_) => ValueFamily::Text,
        }
    }

    /// Exact numeric payload (integer or decimal) widened to `Decimal`.
    #[must_use]
    pub fn as_exact_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Int(v) => Some(Decimal::from(*v)),
            Self::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric payload widened to `f64` (lossy for large integers/decimals).
    #[must_use]
    #[expect(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Decimal(v) => v.to_f64(),
            Self::Float64(v) => Some(v.get()),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(true) => write!(f, "TRUE"),
            Self::Bool(false) => write!(f, "FALSE"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Decimal(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "'{}'", v.replace('\'', "''")),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}
