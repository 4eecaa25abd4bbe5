//! Core runtime for Sarg: scalar values and domains, the endpoint/interval
//! algebra, set expressions over interval sequences, and the analyzer that
//! turns predicate trees into range-scan bindings plus a residual filter.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod analyzer;
pub mod config;
pub mod domain;
pub mod endpoint;
pub mod error;
pub mod expr;
pub mod factory;
pub mod fingerprint;
pub mod interval;
pub mod sequence;
pub mod set;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Largest scale an exact-numeric domain may declare.
///
/// Matches the precision ceiling of the decimal backend; larger declared
/// scales are clamped during rounding.
pub const MAX_DECIMAL_SCALE: u32 = 28;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, factories, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        analyzer::{SargAnalysis, SargBinding},
        domain::{SargDomain, SargType},
        endpoint::{BoundType, Coordinate, Endpoint, Strictness},
        expr::{CompareOp, DynamicParam, Expr, VariableRef},
        interval::{Interval, IntervalExpr, NullSemantics},
        sequence::{IntervalSequence, ScanRange},
        set::{SetExpr, SetOperator},
        value::Value,
    };
}
