use crate::value::Value;
use rust_decimal::Decimal;
use std::cmp::Ordering;

/// Total canonical comparator used by endpoint ordering and point membership.
///
/// Ordering rules:
/// 1. Family rank (null < bool < numeric < text)
/// 2. Family-specific comparison for same-ranked values
///
/// Numeric values compare by magnitude across Int/Decimal/Float64, so `5`
/// and `5.00` are equal coordinates.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let rank = left.family().cmp(&right.family());
    if rank != Ordering::Equal {
        return rank;
    }

    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => numeric_cmp(left, right).unwrap_or(Ordering::Equal),
    }
}

/// Numeric comparator across the exact and approximate numeric variants.
///
/// Returns `None` when either side is not numeric.
#[must_use]
pub fn numeric_cmp(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Decimal(b)) => Some(Decimal::from(*a).cmp(b)),
        (Value::Decimal(a), Value::Int(b)) => Some(a.cmp(&Decimal::from(*b))),
        (Value::Float64(a), Value::Float64(b)) => Some(a.cmp(b)),
        (Value::Float64(_), _) | (_, Value::Float64(_)) => {
            let a = left.as_f64()?;
            let b = right.as_f64()?;

            Some(a.total_cmp(&b))
        }
        _ => None,
    }
}
