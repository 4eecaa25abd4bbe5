mod conjunction;


use crate::{domain::SargDomain, value::Value};
use std::fmt;

// re-exports
pub use conjunction::conjunctions;

///
/// Predicate expression tree
///
/// Schema-light boolean expression handed to the analyzer by the planner.
/// Only the node kinds the sarg analyzer distinguishes are modelled; every
/// other construct (subqueries, windowed aggregates, correlation variables,
/// field access, arbitrary calls) arrives as an opaque node and is always
/// treated as non-sargable.
///

///
/// CompareOp
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
#[repr(u8)]
pub enum CompareOp {
    Eq = 0x01,
    Ne = 0x02,
    Lt = 0x03,
    Lte = 0x04,
    Gt = 0x05,
    Gte = 0x06,
    IsNull = 0x07,
}

impl CompareOp {
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }

    /// Number of operands the operator takes.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::IsNull => 1,
            Self::Eq | Self::Ne | Self::Lt | Self::Lte | Self::Gt | Self::Gte => 2,
        }
    }

    /// Operator with its operands swapped: `5 < x` is `x > 5`.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::Lt => Self::Gt,
            Self::Lte => Self::Gte,
            Self::Gt => Self::Lt,
            Self::Gte => Self::Lte,
            Self::Eq | Self::Ne | Self::IsNull => self,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "<>",
            Self::Lt => "<",
            Self::Lte => "<=",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::IsNull => "IS NULL",
        }
    }
}

///
/// VariableRef
/// reference to one input column of the scanned relation
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct VariableRef {
    pub index: usize,
    pub name: String,
    pub domain: SargDomain,
}

impl VariableRef {
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>, domain: SargDomain) -> Self {
        Self {
            index,
            name: name.into(),
            domain,
        }
    }

    /// Two references bind the same variable when their ordinals match.
    #[must_use]
    pub const fn same_variable(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl fmt::Display for VariableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            write!(f, "${}", self.index)
        } else {
            write!(f, "{}", self.name)
        }
    }
}

///
/// DynamicParam
/// placeholder whose value is supplied at execution time
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DynamicParam {
    pub index: usize,
    pub domain: SargDomain,
}

impl DynamicParam {
    #[must_use]
    pub const fn new(index: usize, domain: SargDomain) -> Self {
        Self { index, domain }
    }
}

impl fmt::Display for DynamicParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "?{}", self.index)
    }
}

///
/// OpaqueKind
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum OpaqueKind {
    Subquery,
    WindowedAggregate,
    CorrelationVariable,
    FieldAccess,
    Call,
}

///
/// OpaqueExpr
/// any node the analyzer does not look inside
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct OpaqueExpr {
    pub kind: OpaqueKind,
    pub description: String,
}

///
/// Expr
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Expr {
    Variable(VariableRef),
    Literal(Value),
    Param(DynamicParam),
    Compare { op: CompareOp, operands: Vec<Self> },
    And(Vec<Self>),
    Or(Vec<Self>),
    Not(Box<Self>),
    Opaque(OpaqueExpr),
}

impl Expr {
    #[must_use]
    pub const fn variable(var: VariableRef) -> Self {
        Self::Variable(var)
    }

    #[must_use]
    pub fn literal(value: impl Into<Value>) -> Self {
        Self::Literal(value.into())
    }

    #[must_use]
    pub const fn null() -> Self {
        Self::Literal(Value::Null)
    }

    #[must_use]
    pub const fn param(param: DynamicParam) -> Self {
        Self::Param(param)
    }

    #[must_use]
    pub fn compare(op: CompareOp, left: Self, right: Self) -> Self {
        Self::Compare {
            op,
            operands: vec![left, right],
        }
    }

    #[must_use]
    pub fn eq(left: Self, right: Self) -> Self {
        Self::compare(CompareOp::Eq, left, right)
    }

    #[must_use]
    pub fn ne(left: Self, right: Self) -> Self {
        Self::compare(CompareOp::Ne, left, right)
    }

    #[must_use]
    pub fn lt(left: Self, right: Self) -> Self {
        Self::compare(CompareOp::Lt, left, right)
    }

    #[must_use]
    pub fn lte(left: Self, right: Self) -> Self {
        Self::compare(CompareOp::Lte, left, right)
    }

    #[must_use]
    pub fn gt(left: Self, right: Self) -> Self {
        Self::compare(CompareOp::Gt, left, right)
    }

    #[must_use]
    pub fn gte(left: Self, right: Self) -> Self {
        Self::compare(CompareOp::Gte, left, right)
    }

    #[must_use]
    pub fn is_null(operand: Self) -> Self {
        Self::Compare {
            op: CompareOp::IsNull,
            operands: vec![operand],
        }
    }

    #[must_use]
    pub const fn and(children: Vec<Self>) -> Self {
        Self::And(children)
    }

    #[must_use]
    pub const fn or(children: Vec<Self>) -> Self {
        Self::Or(children)
    }

    #[expect(clippy::should_implement_trait)]
    #[must_use]
    pub fn not(inner: Self) -> Self {
        Self::Not(Box::new(inner))
    }

    #[must_use]
    pub fn opaque(kind: OpaqueKind, description: impl Into<String>) -> Self {
        Self::Opaque(OpaqueExpr {
            kind,
            description: description.into(),
        })
    }

    /// Recombine conjuncts with AND.
    ///
    /// No conjuncts yields `None`, one conjunct is returned unchanged.
    #[must_use]
    pub fn and_all(mut conjuncts: Vec<Self>) -> Option<Self> {
        match conjuncts.len() {
            0 => None,
            1 => conjuncts.pop(),
            _ => Some(Self::And(conjuncts)),
        }
    }

    #[must_use]
    pub const fn is_true_literal(&self) -> bool {
        matches!(self, Self::Literal(Value::Bool(true)))
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(var) => write!(f, "{var}"),
            Self::Literal(value) => write!(f, "{value}"),
            Self::Param(param) => write!(f, "{param}"),
            Self::Compare { op, operands } => match (op, operands.as_slice()) {
                (CompareOp::IsNull, [operand]) => write!(f, "{operand} IS NULL"),
                (_, [left, right]) => write!(f, "{left} {} {right}", op.symbol()),
                _ => write_call(f, op.symbol(), operands),
            },
            Self::And(children) => write_call(f, "AND", children),
            Self::Or(children) => write_call(f, "OR", children),
            Self::Not(inner) => write!(f, "NOT({inner})"),
            Self::Opaque(opaque) => write!(f, "{}", opaque.description),
        }
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, name: &str, args: &[Expr]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}
