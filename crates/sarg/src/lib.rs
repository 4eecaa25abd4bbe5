//! ## Crate layout
//! - `core`: the sarg algebra: values, domains, endpoints, intervals,
//!   set expressions, the predicate tree and the analyzer.
//!
//! The `prelude` module mirrors the surface a query planner uses to hand
//! predicates over and read scan ranges back.

pub use sarg_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use crate::core::{
    analyzer::SargAnalyzer, config::SargConfig, error::SargError as Error,
    factory::SargFactory, fingerprint::SargFingerprint,
};

///
/// Planner Prelude
///

pub mod prelude {
    pub use crate::core::prelude::*;
    pub use crate::{SargAnalyzer, SargConfig, SargFactory};
}
