//! Shared fixtures for unit tests.

use crate::{
    domain::{SargDomain, SargType},
    endpoint::Coordinate,
    expr::{Expr, VariableRef},
    interval::IntervalExpr,
    value::Value,
};
use rust_decimal::Decimal;

pub(crate) const INT_NULLABLE: SargDomain = SargDomain::nullable(SargType::Integer);
pub(crate) const INT_NOT_NULL: SargDomain = SargDomain::not_null(SargType::Integer);

pub(crate) fn lit(v: i64) -> Coordinate {
    Coordinate::Literal(Value::Int(v))
}

pub(crate) fn dec(num: i64, scale: u32) -> Coordinate {
    Coordinate::Literal(Value::Decimal(Decimal::new(num, scale)))
}

pub(crate) const fn null() -> Coordinate {
    Coordinate::Literal(Value::Null)
}

pub(crate) fn var(index: usize, name: &str) -> VariableRef {
    VariableRef::new(index, name, INT_NOT_NULL)
}

pub(crate) fn x() -> Expr {
    Expr::variable(var(0, "x"))
}

pub(crate) fn y() -> Expr {
    Expr::variable(var(1, "y"))
}

pub(crate) fn int(v: i64) -> Expr {
    Expr::literal(v)
}

/// Non-null integer interval expression with inclusive bounds.
pub(crate) fn closed(lo: i64, hi: i64) -> IntervalExpr {
    let mut expr = IntervalExpr::new(INT_NOT_NULL);
    expr.set_lower(lit(lo), crate::endpoint::Strictness::Closed)
        .expect("int literal fits int domain");
    expr.set_upper(lit(hi), crate::endpoint::Strictness::Closed)
        .expect("int literal fits int domain");
    expr
}

/// Non-null integer interval expression with arbitrary strictness.
pub(crate) fn interval(
    lo: Option<(i64, bool)>,
    hi: Option<(i64, bool)>,
) -> IntervalExpr {
    interval_in(INT_NOT_NULL, lo, hi)
}

/// Integer interval expression on the given domain.
pub(crate) fn interval_in(
    domain: SargDomain,
    lo: Option<(i64, bool)>,
    hi: Option<(i64, bool)>,
) -> IntervalExpr {
    use crate::endpoint::Strictness;

    let strictness = |closed: bool| {
        if closed {
            Strictness::Closed
        } else {
            Strictness::Open
        }
    };

    let mut expr = IntervalExpr::new(domain);
    if let Some((v, c)) = lo {
        expr.set_lower(lit(v), strictness(c))
            .expect("int literal fits int domain");
    }
    if let Some((v, c)) = hi {
        expr.set_upper(lit(v), strictness(c))
            .expect("int literal fits int domain");
    }
    expr
}
