use crate::{
    endpoint::Endpoint,
    error::SargError,
    interval::{Interval, IntervalExpr, exclude_null},
    sequence::IntervalSequence,
    set::union,
};

/// Complement of a single leaf interval.
///
/// An open lower bound at null only excludes null, so it counts as
/// unbounded here. Each half-bounded piece flips the strictness of the
/// bound it was cut from.
pub(super) fn complement_leaf(expr: &IntervalExpr) -> Result<IntervalSequence, SargError> {
    let domain = expr.domain();
    let null_semantics = expr.null_semantics();

    let Some(interval) = expr.evaluate_interval() else {
        return Ok(IntervalSequence::from_intervals(vec![exclude_null(
            Interval::unconstrained(domain),
            null_semantics,
        )]));
    };

    let lower = interval.lower();
    let upper = interval.upper();
    let lower_bounded = lower.is_finite() && !(lower.is_null() && lower.is_open());

    if !lower_bounded && !upper.is_finite() {
        return Ok(IntervalSequence::new());
    }

    let mut pieces = Vec::with_capacity(2);

    // nothing lies below a closed null
    if lower_bounded && !(lower.is_null() && lower.is_closed()) {
        pieces.push(exclude_null(
            Interval::new(domain, Endpoint::negative_infinity(), lower.flipped()),
            null_semantics,
        ));
    }

    if upper.is_finite() {
        pieces.push(exclude_null(
            Interval::new(domain, upper.flipped(), Endpoint::positive_infinity()),
            null_semantics,
        ));
    }

    union::merge(pieces)
}
