use serde::{Deserialize, Serialize};
use std::ops::Range;

///
/// SargConfig
///
/// Analyzer knobs supplied by the embedding planner.
///
/// simple_mode      → one literal comparison per conjunct, one conjunct
///                    per variable
/// variable_window  → only variables whose ordinal lies in this half-open
///                    window are sargable (inner side of a nested-loop join)
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct SargConfig {
    pub simple_mode: bool,
    pub variable_window: Option<Range<usize>>,
}

impl SargConfig {
    #[must_use]
    pub const fn simple() -> Self {
        Self {
            simple_mode: true,
            variable_window: None,
        }
    }

    #[must_use]
    pub fn with_variable_window(mut self, window: Range<usize>) -> Self {
        self.variable_window = Some(window);
        self
    }

    /// Whether the variable with this ordinal may be bound.
    #[must_use]
    pub fn admits_variable(&self, index: usize) -> bool {
        self.variable_window
            .as_ref()
            .is_none_or(|window| window.contains(&index))
    }
}

///
/// TESTS
///
