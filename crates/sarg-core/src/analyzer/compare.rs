use crate::{
    analyzer::{AnalyzeError, Rejection, WalkState, reject},
    domain::SargDomain,
    endpoint::{Coordinate, Strictness},
    expr::{CompareOp, Expr},
    interval::{IntervalExpr, NullSemantics},
    set::SetExpr,
    value::Value,
};

/// Bind one comparison into a leaf (or the complement of one for `<>`).
///
/// Exactly one operand must be the variable and the other a literal or
/// dynamic parameter; `5 < x` is read as `x > 5`.
pub(super) fn bind(
    state: &mut WalkState<'_>,
    op: CompareOp,
    operands: &[Expr],
) -> Result<SetExpr, AnalyzeError> {
    if operands.len() != op.arity() {
        return reject(Rejection::Arity);
    }

    if op == CompareOp::IsNull {
        let [Expr::Variable(variable)] = operands else {
            return reject(Rejection::NoVariable);
        };
        let domain = state.bind(variable)?;

        let mut leaf = IntervalExpr::new(domain);
        leaf.set_null_semantics(NullSemantics::NullMatchesNull);
        leaf.set_point(Coordinate::Literal(Value::Null))?;

        return Ok(SetExpr::leaf(leaf));
    }

    let (variable, operand, op) = match operands {
        [Expr::Variable(variable), operand] => (variable, operand, op),
        [operand, Expr::Variable(variable)] => (variable, operand, op.flip()),
        _ => return reject(Rejection::NoVariable),
    };

    let coordinate = coordinate(operand)?;
    let domain = state.bind(variable)?;
    check_coordinate(state, domain, &coordinate)?;

    let mut leaf = IntervalExpr::new(domain);
    match op {
        CompareOp::Eq => leaf.set_point(coordinate)?,
        CompareOp::Ne => {
            // `<>` is a complement, which simple mode does not build
            if state.config.simple_mode {
                return reject(Rejection::SimpleMode);
            }
            if coordinate.is_null() {
                return reject(Rejection::NullInequality);
            }
            leaf.set_point(coordinate)?;

            return Ok(SetExpr::complement(SetExpr::leaf(leaf)));
        }
        CompareOp::Lt => leaf.set_upper(coordinate, Strictness::Open)?,
        CompareOp::Lte => leaf.set_upper(coordinate, Strictness::Closed)?,
        CompareOp::Gt => leaf.set_lower(coordinate, Strictness::Open)?,
        CompareOp::Gte => leaf.set_lower(coordinate, Strictness::Closed)?,
        CompareOp::IsNull => return reject(Rejection::Arity),
    }

    Ok(SetExpr::leaf(leaf))
}

fn coordinate(operand: &Expr) -> Result<Coordinate, AnalyzeError> {
    match operand {
        Expr::Literal(value) => Ok(Coordinate::Literal(value.clone())),
        Expr::Param(param) => Ok(Coordinate::Param(*param)),
        Expr::Variable(_) => reject(Rejection::MultipleVariables),
        Expr::Opaque(opaque) => reject(Rejection::Opaque(opaque.kind)),
        Expr::Compare { .. } | Expr::And(_) | Expr::Or(_) | Expr::Not(_) => {
            reject(Rejection::CoordinateOperand)
        }
    }
}

// Anything the endpoint builder would refuse is a rejection here, so the
// builder never sees a foreign coordinate from the analyzer.
fn check_coordinate(
    state: &WalkState<'_>,
    domain: SargDomain,
    coordinate: &Coordinate,
) -> Result<(), AnalyzeError> {
    match coordinate {
        Coordinate::Literal(value) if !domain.can_assign_from(value) => {
            reject(Rejection::Unassignable)
        }
        Coordinate::Param(_) if state.config.simple_mode => reject(Rejection::SimpleMode),
        Coordinate::Param(param) if param.domain != domain => {
            reject(Rejection::ParamType)
        }
        Coordinate::Literal(_) | Coordinate::Param(_) => Ok(()),
    }
}
