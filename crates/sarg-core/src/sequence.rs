use crate::{
    endpoint::{Coordinate, Endpoint},
    error::SargError,
    interval::Interval,
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use std::{fmt, ops::Bound};

///
/// IntervalSequence
///
/// Canonical union of intervals: sorted by (lower, upper), pairwise
/// disjoint and non-touching. Only produced by evaluation.
///
/// An empty sequence matches nothing.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
#[into_iterator(owned, ref)]
pub struct IntervalSequence(Vec<Interval>);

impl IntervalSequence {
    // Caller guarantees the canonical ordering.
    pub(crate) const fn from_intervals(intervals: Vec<Interval>) -> Self {
        Self(intervals)
    }

    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Interval> {
        self.0
    }

    /// Exactly one interval, and it is a point.
    #[must_use]
    pub fn is_point(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.is_point())
    }

    /// Exactly one interval, and it is not a point.
    #[must_use]
    pub fn is_range(&self) -> bool {
        matches!(self.0.as_slice(), [only] if !only.is_point())
    }

    /// Several intervals, every one of them a point (an IN-list).
    #[must_use]
    pub fn is_multi_point(&self) -> bool {
        self.0.len() > 1 && self.0.iter().all(Interval::is_point)
    }

    #[must_use]
    pub fn is_unconstrained(&self) -> bool {
        matches!(self.0.as_slice(), [only] if only.is_unconstrained())
    }

    pub fn contains_value(&self, value: &Value) -> Result<bool, SargError> {
        for interval in &self.0 {
            if interval.contains_value(value)? {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Bound pairs ready for a range scan, one per interval.
    #[must_use]
    pub fn to_scan_ranges(&self) -> Vec<ScanRange> {
        self.0
            .iter()
            .map(|interval| ScanRange {
                lower: scan_bound(interval.lower()),
                upper: scan_bound(interval.upper()),
            })
            .collect()
    }
}

impl fmt::Display for IntervalSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => write!(f, "()"),
            [only] => write!(f, "{only}"),
            many => {
                write!(f, "UNION(")?;
                for interval in many {
                    write!(f, " {interval}")?;
                }
                write!(f, " )")
            }
        }
    }
}

///
/// ScanRange
///
/// One range-scan bound pair. The null coordinate is a real bound: an
/// excluded null lower bound skips null keys.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ScanRange {
    pub lower: Bound<Coordinate>,
    pub upper: Bound<Coordinate>,
}

fn scan_bound(endpoint: &Endpoint) -> Bound<Coordinate> {
    match endpoint.coordinate() {
        None => Bound::Unbounded,
        Some(coordinate) if endpoint.is_closed() => Bound::Included(coordinate.clone()),
        Some(coordinate) => Bound::Excluded(coordinate.clone()),
    }
}
