use crate::{
    domain::SargType,
    endpoint::{BoundType, Strictness},
    value::Value,
};
use rust_decimal::{Decimal, RoundingStrategy};
use std::cmp::Ordering;

// Rescale an exact-numeric literal to the domain scale (half-up) and derive
// the effective strictness from the rounding direction.
//
//  Input        round    output    effective
//    >5.9        up        >=6      closed
//    >=5.9       up        >=6      closed
//    >6.1        down      >6       open
//    >=6.1       down      >6       open
//    <6.1        down      <=6      closed
//    <=6.1       down      <=6      closed
//    <5.9        up        <6       open
//    <=5.9       up        <6       open
//
// Approximate and non-numeric domains are left untouched.
// NOTE: overflow is not checked here; a value too large for the domain is
// still a valid (if unreachable) coordinate.
pub(super) fn apply(
    ty: SargType,
    bound: BoundType,
    strictness: Strictness,
    value: Value,
) -> (Value, Strictness) {
    let Some(scale) = ty.scale() else {
        return (value, strictness);
    };

    let original = match &value {
        // integers are already exact at scale 0
        Value::Int(_) if scale == 0 => return (value, strictness),
        Value::Int(v) => Decimal::from(*v),
        Value::Decimal(v) => *v,
        _ => return (value, strictness),
    };

    let mut rounded = original.round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(scale);

    // The sign of the compensation is the opposite of the rounding
    // direction: positive means the value was rounded down.
    let strictness = match (original.cmp(&rounded), bound) {
        (Ordering::Equal, _) => strictness,
        (Ordering::Less, BoundType::Lower) | (Ordering::Greater, BoundType::Upper) => {
            Strictness::Closed
        }
        (Ordering::Greater, BoundType::Lower) | (Ordering::Less, BoundType::Upper) => {
            Strictness::Open
        }
    };

    (Value::Decimal(rounded), strictness)
}
