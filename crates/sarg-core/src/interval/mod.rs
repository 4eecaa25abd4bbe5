
use crate::{
    domain::SargDomain,
    endpoint::{BoundType, Coordinate, Endpoint, EndpointBuilder, Infinity, Strictness},
    error::SargError,
    sequence::IntervalSequence,
    value::Value,
};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

///
/// NullSemantics
///
/// How the null value interacts with a range built from one comparison.
///
/// NullMatchesNothing  → comparisons against null match nothing (SQL default)
/// NullMatchesNull     → an explicit null point matches null (`IS NULL`)
/// NullMatchesAnything → any bound at null widens the range to everything
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum NullSemantics {
    #[default]
    NullMatchesNothing,
    NullMatchesNull,
    NullMatchesAnything,
}

impl NullSemantics {
    #[must_use]
    pub const fn is_default(self) -> bool {
        matches!(self, Self::NullMatchesNothing)
    }
}

impl fmt::Display for NullSemantics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NullMatchesNothing => "NULL_MATCHES_NOTHING",
            Self::NullMatchesNull => "NULL_MATCHES_NULL",
            Self::NullMatchesAnything => "NULL_MATCHES_ANYTHING",
        };
        write!(f, "{label}")
    }
}

///
/// Interval
///
/// Immutable lower/upper pair over one domain.
/// Either `lower <= upper` in endpoint order, or both bounds are open at
/// null (the canonical empty interval).
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Interval {
    domain: SargDomain,
    lower: Endpoint,
    upper: Endpoint,
}

impl Interval {
    pub(crate) const fn new(domain: SargDomain, lower: Endpoint, upper: Endpoint) -> Self {
        Self {
            domain,
            lower,
            upper,
        }
    }

    /// `(-infinity, +infinity)`.
    #[must_use]
    pub const fn unconstrained(domain: SargDomain) -> Self {
        Self::new(
            domain,
            Endpoint::negative_infinity(),
            Endpoint::positive_infinity(),
        )
    }

    /// `(null, null)`.
    #[must_use]
    pub const fn empty(domain: SargDomain) -> Self {
        Self::new(
            domain,
            Endpoint::open_null(BoundType::Lower),
            Endpoint::open_null(BoundType::Upper),
        )
    }

    #[must_use]
    pub const fn domain(&self) -> SargDomain {
        self.domain
    }

    #[must_use]
    pub const fn lower(&self) -> &Endpoint {
        &self.lower
    }

    #[must_use]
    pub const fn upper(&self) -> &Endpoint {
        &self.upper
    }

    /// Both bounds closed at the same coordinate.
    #[must_use]
    pub fn is_point(&self) -> bool {
        if !(self.lower.is_closed() && self.upper.is_closed()) {
            return false;
        }

        match (self.lower.coordinate(), self.upper.coordinate()) {
            (Some(lo), Some(hi)) => lo.try_cmp(hi) == Ok(Ordering::Equal),
            _ => false,
        }
    }

    #[must_use]
    pub const fn is_unconstrained(&self) -> bool {
        !self.lower.is_finite() && !self.upper.is_finite()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.lower.is_open() && self.upper.is_open() && self.lower.is_null() && self.upper.is_null()
    }

    /// Whether every value of `other` is also in this interval.
    pub fn contains(&self, other: &Self) -> Result<bool, SargError> {
        Ok(self.lower.try_cmp(&other.lower)? != Ordering::Greater
            && self.upper.try_cmp(&other.upper)? != Ordering::Less)
    }

    /// Point membership.
    pub fn contains_value(&self, value: &Value) -> Result<bool, SargError> {
        if self.is_empty() {
            return Ok(false);
        }

        Ok(self.lower.locate(value)? != Ordering::Less
            && self.upper.locate(value)? != Ordering::Greater)
    }

    pub(crate) fn with_lower(&self, lower: Endpoint) -> Self {
        Self::new(self.domain, lower, self.upper.clone())
    }

    pub(crate) fn with_upper(&self, upper: Endpoint) -> Self {
        Self::new(self.domain, self.lower.clone(), upper)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.lower.is_closed() { '[' } else { '(' };
        let close = if self.upper.is_closed() { ']' } else { ')' };

        write!(f, "{open}")?;
        write_coordinate(f, &self.lower)?;
        write!(f, ", ")?;
        write_coordinate(f, &self.upper)?;
        write!(f, "{close}")
    }
}

fn write_coordinate(f: &mut fmt::Formatter<'_>, endpoint: &Endpoint) -> fmt::Result {
    match endpoint.coordinate() {
        Some(coordinate) => write!(f, "{coordinate}"),
        None if endpoint.infinitude() < 0 => write!(f, "-infinity"),
        None => write!(f, "+infinity"),
    }
}

///
/// IntervalExpr
///
/// Mutable single-interval leaf of a set expression. The analyzer drives
/// it while binding one comparison; `evaluate` freezes it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IntervalExpr {
    domain: SargDomain,
    null_semantics: NullSemantics,
    lower: EndpointBuilder,
    upper: EndpointBuilder,
}

impl IntervalExpr {
    /// Unconstrained expression with default null semantics.
    #[must_use]
    pub const fn new(domain: SargDomain) -> Self {
        Self {
            domain,
            null_semantics: NullSemantics::NullMatchesNothing,
            lower: EndpointBuilder::new(domain, BoundType::Lower),
            upper: EndpointBuilder::new(domain, BoundType::Upper),
        }
    }

    #[must_use]
    pub const fn domain(&self) -> SargDomain {
        self.domain
    }

    #[must_use]
    pub const fn null_semantics(&self) -> NullSemantics {
        self.null_semantics
    }

    pub const fn set_null_semantics(&mut self, null_semantics: NullSemantics) {
        self.null_semantics = null_semantics;
    }

    #[must_use]
    pub const fn lower(&self) -> &Endpoint {
        self.lower.endpoint()
    }

    #[must_use]
    pub const fn upper(&self) -> &Endpoint {
        self.upper.endpoint()
    }

    /// Both bounds closed at `coordinate`.
    ///
    /// A null point under default semantics switches to NULL_MATCHES_NULL:
    /// an explicit comparison with null means `IS NULL`.
    pub fn set_point(&mut self, coordinate: Coordinate) -> Result<(), SargError> {
        let is_null = coordinate.is_null();

        self.lower
            .set_finite(BoundType::Lower, coordinate.clone(), Strictness::Closed)?;
        self.upper
            .set_finite(BoundType::Upper, coordinate, Strictness::Closed)?;

        if is_null && self.null_semantics.is_default() {
            self.null_semantics = NullSemantics::NullMatchesNull;
        }

        Ok(())
    }

    pub fn set_lower(
        &mut self,
        coordinate: Coordinate,
        strictness: Strictness,
    ) -> Result<(), SargError> {
        self.lower
            .set_finite(BoundType::Lower, coordinate, strictness)
    }

    pub fn set_upper(
        &mut self,
        coordinate: Coordinate,
        strictness: Strictness,
    ) -> Result<(), SargError> {
        self.upper
            .set_finite(BoundType::Upper, coordinate, strictness)
    }

    pub fn unset_lower(&mut self) {
        self.lower.set_infinity(Infinity::Negative);
    }

    pub fn unset_upper(&mut self) {
        self.upper.set_infinity(Infinity::Positive);
    }

    pub fn set_unconstrained(&mut self) {
        self.unset_lower();
        self.unset_upper();
    }

    pub fn set_empty(&mut self) {
        self.lower.copy_from(&Endpoint::open_null(BoundType::Lower));
        self.upper.copy_from(&Endpoint::open_null(BoundType::Upper));
    }

    /// Freeze into a sequence of zero or one interval.
    ///
    /// Bounds whose relative order is only known at execution time (two
    /// different dynamic parameters) are kept as they are.
    #[must_use]
    pub fn evaluate(&self) -> IntervalSequence {
        IntervalSequence::from_intervals(self.evaluate_interval().into_iter().collect())
    }

    pub(crate) fn evaluate_interval(&self) -> Option<Interval> {
        let lower = self.lower.endpoint();
        let upper = self.upper.endpoint();

        // a bound pushed past the opposite infinity
        if lower.bound_type() == BoundType::Upper || upper.bound_type() == BoundType::Lower {
            return None;
        }

        if self.null_semantics.is_default() && (lower.is_null() || upper.is_null()) {
            return None;
        }

        let interval = Interval::new(self.domain, lower.clone(), upper.clone());
        if interval.is_empty() || matches!(lower.try_cmp(upper), Ok(Ordering::Greater)) {
            return None;
        }

        // null matches anything, so a range open to null or to either
        // infinity cannot narrow the column
        if self.null_semantics == NullSemantics::NullMatchesAnything
            && (lower.is_null() || upper.is_null() || !lower.is_finite() || !upper.is_finite())
        {
            return Some(Interval::unconstrained(self.domain));
        }

        Some(exclude_null(interval, self.null_semantics))
    }
}

/// Under default semantics on a nullable domain, a range unbounded below
/// starts just above null.
pub(crate) fn exclude_null(interval: Interval, null_semantics: NullSemantics) -> Interval {
    if null_semantics.is_default() && interval.domain.nullable && !interval.lower.is_finite() {
        interval.with_lower(Endpoint::open_null(BoundType::Lower))
    } else {
        interval
    }
}

impl fmt::Display for IntervalExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interval = Interval::new(
            self.domain,
            self.lower.endpoint().clone(),
            self.upper.endpoint().clone(),
        );
        write!(f, "{interval}")?;

        if !self.null_semantics.is_default() {
            write!(f, " {}", self.null_semantics)?;
        }

        Ok(())
    }
}
