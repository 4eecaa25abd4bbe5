//! Set algebra over interval sequences.
//!
//! A `SetExpr` is built bottom-up by the analyzer, evaluated once into a
//! canonical `IntervalSequence`, then dropped. Complements are pushed down
//! to the leaves with De Morgan's laws, so only leaf intervals are ever
//! complemented directly.

mod complement;
mod intersection;
mod union;


use crate::{
    domain::SargDomain, endpoint::Coordinate, error::SargError, interval::IntervalExpr,
    sequence::IntervalSequence,
};
use std::fmt;
use tracing::trace;

///
/// SetOperator
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SetOperator {
    Union,
    Intersection,
    Complement,
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Union => "UNION",
            Self::Intersection => "INTERSECTION",
            Self::Complement => "COMPLEMENT",
        };
        write!(f, "{label}")
    }
}

///
/// SetOpExpr
///
/// Operator node. `Complement` must end up with exactly one child; the
/// arity is checked when the node is evaluated.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SetOpExpr {
    domain: SargDomain,
    op: SetOperator,
    children: Vec<SetExpr>,
}

impl SetOpExpr {
    #[must_use]
    pub const fn new(domain: SargDomain, op: SetOperator) -> Self {
        Self {
            domain,
            op,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub const fn op(&self) -> SetOperator {
        self.op
    }

    #[must_use]
    pub fn children(&self) -> &[SetExpr] {
        &self.children
    }

    pub fn add_child(&mut self, child: SetExpr) {
        self.children.push(child);
    }

    fn complement_child(&self) -> Result<&SetExpr, SargError> {
        match self.children.as_slice() {
            [child] => Ok(child),
            children => Err(SargError::ComplementArity {
                children: children.len(),
            }),
        }
    }

    fn evaluate(&self) -> Result<IntervalSequence, SargError> {
        let result = match self.op {
            SetOperator::Union => union::merge_sequences(self.evaluate_children()?),
            SetOperator::Intersection => {
                intersection::intersect_all(self.domain, self.evaluate_children()?)
            }
            SetOperator::Complement => self.complement_child()?.evaluate_complement(),
        }?;

        trace!(
            op = %self.op,
            children = self.children.len(),
            result = %result,
            "evaluated set expression"
        );

        Ok(result)
    }

    // De Morgan: the complement of a union is the intersection of the
    // complements, and the other way round.
    fn evaluate_complement(&self) -> Result<IntervalSequence, SargError> {
        match self.op {
            SetOperator::Union => {
                intersection::intersect_all(self.domain, self.complement_children()?)
            }
            SetOperator::Intersection => union::merge_sequences(self.complement_children()?),
            SetOperator::Complement => self.complement_child()?.evaluate(),
        }
    }

    fn evaluate_children(&self) -> Result<Vec<IntervalSequence>, SargError> {
        self.children.iter().map(SetExpr::evaluate).collect()
    }

    fn complement_children(&self) -> Result<Vec<IntervalSequence>, SargError> {
        self.children
            .iter()
            .map(SetExpr::evaluate_complement)
            .collect()
    }
}

///
/// SetExpr
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SetExpr {
    Leaf(IntervalExpr),
    Set(SetOpExpr),
}

impl SetExpr {
    #[must_use]
    pub const fn leaf(expr: IntervalExpr) -> Self {
        Self::Leaf(expr)
    }

    #[must_use]
    pub fn union(domain: SargDomain, children: Vec<Self>) -> Self {
        Self::Set(SetOpExpr {
            domain,
            op: SetOperator::Union,
            children,
        })
    }

    #[must_use]
    pub fn intersection(domain: SargDomain, children: Vec<Self>) -> Self {
        Self::Set(SetOpExpr {
            domain,
            op: SetOperator::Intersection,
            children,
        })
    }

    #[must_use]
    pub fn complement(child: Self) -> Self {
        Self::Set(SetOpExpr {
            domain: child.domain(),
            op: SetOperator::Complement,
            children: vec![child],
        })
    }

    #[must_use]
    pub const fn domain(&self) -> SargDomain {
        match self {
            Self::Leaf(expr) => expr.domain(),
            Self::Set(set) => set.domain,
        }
    }

    /// Finite coordinates of every leaf, in walk order.
    #[must_use]
    pub fn coordinates(&self) -> Vec<&Coordinate> {
        let mut out = Vec::new();
        self.collect_coordinates(&mut out);

        out
    }

    /// Whether any leaf is bounded by a dynamic parameter.
    #[must_use]
    pub fn has_params(&self) -> bool {
        self.coordinates()
            .into_iter()
            .any(|coordinate| matches!(coordinate, Coordinate::Param(_)))
    }

    fn collect_coordinates<'a>(&'a self, out: &mut Vec<&'a Coordinate>) {
        match self {
            Self::Leaf(expr) => {
                out.extend(expr.lower().coordinate());
                out.extend(expr.upper().coordinate());
            }
            Self::Set(set) => {
                for child in &set.children {
                    child.collect_coordinates(out);
                }
            }
        }
    }

    /// Resolve to a canonical interval sequence.
    pub fn evaluate(&self) -> Result<IntervalSequence, SargError> {
        match self {
            Self::Leaf(expr) => Ok(expr.evaluate()),
            Self::Set(set) => set.evaluate(),
        }
    }

    /// Resolve the complement of this expression.
    pub fn evaluate_complement(&self) -> Result<IntervalSequence, SargError> {
        match self {
            Self::Leaf(expr) => complement::complement_leaf(expr),
            Self::Set(set) => set.evaluate_complement(),
        }
    }
}

impl From<IntervalExpr> for SetExpr {
    fn from(expr: IntervalExpr) -> Self {
        Self::Leaf(expr)
    }
}

impl From<SetOpExpr> for SetExpr {
    fn from(set: SetOpExpr) -> Self {
        Self::Set(set)
    }
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Leaf(expr) => write!(f, "{expr}"),
            Self::Set(set) => {
                write!(f, "{}(", set.op)?;
                for child in &set.children {
                    write!(f, " {child}")?;
                }
                write!(f, " )")
            }
        }
    }
}
