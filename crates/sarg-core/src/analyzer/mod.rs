//! Predicate analysis: split a WHERE-clause predicate into per-variable
//! set expressions and a residual filter.
//!
//! Each conjunct is walked once. The walk threads its state (the single
//! variable the conjunct may reference) explicitly and returns either a
//! set expression or the reason the conjunct is not sargable. Rejections
//! are the expected path; they never surface as errors.

mod compare;

#[cfg(test)]
mod tests;

use crate::{
    config::SargConfig,
    domain::SargDomain,
    endpoint::Coordinate,
    error::SargError,
    expr::{Expr, OpaqueKind, VariableRef, conjunctions},
    sequence::IntervalSequence,
    set::SetExpr,
};
use std::fmt;
use tracing::debug;

///
/// SargBinding
///
/// One sargable set expression, the variable it ranges over, and the
/// predicate it was built from.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SargBinding {
    pub expr: SetExpr,
    pub variable: VariableRef,
    pub predicate: Expr,
}

impl SargBinding {
    pub fn evaluate(&self) -> Result<IntervalSequence, SargError> {
        self.expr.evaluate()
    }
}

///
/// SargAnalysis
///
/// Result of analyzing a full predicate: at most one binding per
/// variable, in first-seen order, plus the conjuncts left for row-by-row
/// filtering.
///
/// The post-filter is the residual plus every bound conjunct that still
/// holds a dynamic parameter, since those ranges are only fixed at
/// execution time.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SargAnalysis {
    bindings: Vec<SargBinding>,
    residual: Vec<Expr>,
    post_filter: Vec<Expr>,
}

impl SargAnalysis {
    #[must_use]
    pub fn bindings(&self) -> &[SargBinding] {
        &self.bindings
    }

    #[must_use]
    pub fn residual(&self) -> &[Expr] {
        &self.residual
    }

    /// Residual conjuncts recombined with AND, or `None` when nothing is left.
    #[must_use]
    pub fn residual_predicate(&self) -> Option<Expr> {
        Expr::and_all(self.residual.clone())
    }

    #[must_use]
    pub fn post_filter(&self) -> &[Expr] {
        &self.post_filter
    }

    #[must_use]
    pub fn post_filter_predicate(&self) -> Option<Expr> {
        Expr::and_all(self.post_filter.clone())
    }

    /// Original predicates of the given bindings recombined with AND.
    #[must_use]
    pub fn bindings_to_predicate(bindings: &[SargBinding]) -> Option<Expr> {
        Expr::and_all(
            bindings
                .iter()
                .flat_map(|binding| conjunctions(&binding.predicate))
                .collect(),
        )
    }

    #[must_use]
    pub fn into_parts(self) -> (Vec<SargBinding>, Option<Expr>) {
        let residual = Expr::and_all(self.residual);

        (self.bindings, residual)
    }
}

///
/// SargAnalyzer
///

#[derive(Clone, Debug, Default)]
pub struct SargAnalyzer {
    config: SargConfig,
}

impl SargAnalyzer {
    #[must_use]
    pub const fn new(config: SargConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SargConfig {
        &self.config
    }

    /// Analyze one conjunct.
    ///
    /// Returns `Ok(None)` when the conjunct cannot be expressed as a sarg.
    pub fn analyze(&self, conjunct: &Expr) -> Result<Option<SargBinding>, SargError> {
        let mut state = WalkState::new(&self.config);

        let outcome = state
            .walk(conjunct)
            .and_then(|expr| match state.variable.take() {
                Some(variable) => Ok((expr, variable)),
                None => reject(Rejection::NoVariable),
            })
            .and_then(|(expr, variable)| {
                if orderable(expr.coordinates()) {
                    Ok((expr, variable))
                } else {
                    reject(Rejection::UnorderedParams)
                }
            });

        match outcome {
            Ok((expr, variable)) => {
                debug!(variable = %variable, sarg = %expr, "bound conjunct");

                Ok(Some(SargBinding {
                    expr,
                    variable,
                    predicate: conjunct.clone(),
                }))
            }
            Err(AnalyzeError::NotSargable(reason)) => {
                debug!(%reason, predicate = %conjunct, "conjunct is not sargable");

                Ok(None)
            }
            Err(AnalyzeError::Invariant(err)) => Err(err),
        }
    }

    /// Analyze a full predicate.
    ///
    /// The predicate is split into conjuncts, each analyzed on its own.
    /// Bindings on the same variable are intersected; everything else
    /// lands in the residual.
    pub fn analyze_all(&self, predicate: &Expr) -> Result<SargAnalysis, SargError> {
        let mut groups: Vec<(VariableRef, Vec<SargBinding>)> = Vec::new();
        let mut residual = Vec::new();
        let mut post_filter = Vec::new();

        for conjunct in conjunctions(predicate) {
            let Some(binding) = self.analyze(&conjunct)? else {
                post_filter.push(conjunct.clone());
                residual.push(conjunct);
                continue;
            };

            let group = groups
                .iter_mut()
                .find(|(variable, _)| variable.same_variable(&binding.variable));

            let rejected = match group {
                // simple mode binds each variable once
                Some(_) if self.config.simple_mode => Some(binding),
                Some((_, group)) if !joins_group(group.as_slice(), &binding) => Some(binding),
                Some((_, group)) => {
                    if binding.expr.has_params() {
                        post_filter.push(binding.predicate.clone());
                    }
                    group.push(binding);
                    None
                }
                None => {
                    if binding.expr.has_params() {
                        post_filter.push(binding.predicate.clone());
                    }
                    groups.push((binding.variable.clone(), vec![binding]));
                    None
                }
            };

            if let Some(binding) = rejected {
                debug!(predicate = %binding.predicate, "conjunct left for the residual");
                post_filter.push(binding.predicate.clone());
                residual.push(binding.predicate);
            }
        }

        let bindings: Vec<_> = groups
            .into_iter()
            .filter_map(|(variable, group)| merge_group(variable, group))
            .collect();

        debug!(
            bindings = bindings.len(),
            residual = residual.len(),
            post_filter = post_filter.len(),
            "analyzed predicate"
        );

        Ok(SargAnalysis {
            bindings,
            residual,
            post_filter,
        })
    }
}

// A binding joins an existing group only if the merged intersection can
// still order all of its coordinates.
fn joins_group(group: &[SargBinding], binding: &SargBinding) -> bool {
    orderable(
        group
            .iter()
            .flat_map(|member| member.expr.coordinates())
            .chain(binding.expr.coordinates()),
    )
}

// Literals order among themselves and a dynamic parameter only against
// itself. Nulls order against both.
fn orderable<'a>(coordinates: impl IntoIterator<Item = &'a Coordinate>) -> bool {
    let mut coordinates = coordinates.into_iter().filter(|coordinate| !coordinate.is_null());

    let Some(first) = coordinates.next() else {
        return true;
    };

    coordinates.all(|coordinate| coordinate.try_cmp(first).is_ok())
}

// Several bindings on one variable become their intersection.
fn merge_group(variable: VariableRef, mut group: Vec<SargBinding>) -> Option<SargBinding> {
    if group.len() <= 1 {
        return group.pop();
    }

    let (exprs, predicates): (Vec<_>, Vec<_>) = group
        .into_iter()
        .map(|binding| (binding.expr, binding.predicate))
        .unzip();

    Some(SargBinding {
        expr: SetExpr::intersection(variable.domain, exprs),
        predicate: Expr::and_all(predicates)?,
        variable,
    })
}

///
/// Rejection
/// why a conjunct stays in the residual
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Rejection {
    Opaque(OpaqueKind),
    BareOperand,
    NoVariable,
    MultipleVariables,
    CoordinateOperand,
    Arity,
    Unassignable,
    ParamType,
    NullInequality,
    OutsideWindow,
    SimpleMode,
    UnorderedParams,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque(kind) => write!(f, "opaque {kind:?} node"),
            Self::BareOperand => write!(f, "bare operand is not a comparison"),
            Self::NoVariable => write!(f, "no variable operand"),
            Self::MultipleVariables => write!(f, "references more than one variable"),
            Self::CoordinateOperand => write!(f, "comparison operand is not a literal or parameter"),
            Self::Arity => write!(f, "unexpected operand count"),
            Self::Unassignable => write!(f, "literal is not assignable to the variable type"),
            Self::ParamType => write!(f, "parameter type differs from the variable type"),
            Self::NullInequality => write!(f, "inequality against null"),
            Self::OutsideWindow => write!(f, "variable outside the analyzed window"),
            Self::SimpleMode => write!(f, "not a single literal comparison"),
            Self::UnorderedParams => {
                write!(f, "dynamic parameter mixed with other coordinates")
            }
        }
    }
}

///
/// AnalyzeError
///

#[derive(Debug)]
pub(crate) enum AnalyzeError {
    NotSargable(Rejection),
    Invariant(SargError),
}

impl From<SargError> for AnalyzeError {
    fn from(err: SargError) -> Self {
        Self::Invariant(err)
    }
}

const fn reject<T>(reason: Rejection) -> Result<T, AnalyzeError> {
    Err(AnalyzeError::NotSargable(reason))
}

///
/// WalkState
///
/// State threaded through the walk of one conjunct.
///

struct WalkState<'a> {
    config: &'a SargConfig,
    variable: Option<VariableRef>,
}

impl<'a> WalkState<'a> {
    const fn new(config: &'a SargConfig) -> Self {
        Self {
            config,
            variable: None,
        }
    }

    fn walk(&mut self, expr: &Expr) -> Result<SetExpr, AnalyzeError> {
        match expr {
            Expr::Compare { op, operands } => compare::bind(self, *op, operands),
            Expr::And(children) => {
                let children = self.walk_children(children)?;
                Ok(SetExpr::intersection(self.domain()?, children))
            }
            Expr::Or(children) => {
                let children = self.walk_children(children)?;
                Ok(SetExpr::union(self.domain()?, children))
            }
            Expr::Not(inner) => {
                if self.config.simple_mode {
                    return reject(Rejection::SimpleMode);
                }
                Ok(SetExpr::complement(self.walk(inner)?))
            }
            Expr::Opaque(opaque) => reject(Rejection::Opaque(opaque.kind)),
            Expr::Variable(_) | Expr::Literal(_) | Expr::Param(_) => {
                reject(Rejection::BareOperand)
            }
        }
    }

    fn walk_children(&mut self, children: &[Expr]) -> Result<Vec<SetExpr>, AnalyzeError> {
        if self.config.simple_mode {
            return reject(Rejection::SimpleMode);
        }

        children.iter().map(|child| self.walk(child)).collect()
    }

    fn domain(&self) -> Result<SargDomain, AnalyzeError> {
        match &self.variable {
            Some(variable) => Ok(variable.domain),
            None => reject(Rejection::NoVariable),
        }
    }

    /// Record the variable a comparison ranges over.
    ///
    /// Every comparison in a conjunct must reference the same variable.
    fn bind(&mut self, variable: &VariableRef) -> Result<SargDomain, AnalyzeError> {
        if !self.config.admits_variable(variable.index) {
            return reject(Rejection::OutsideWindow);
        }

        match &self.variable {
            Some(bound) if !bound.same_variable(variable) => reject(Rejection::MultipleVariables),
            Some(bound) => Ok(bound.domain),
            None => {
                self.variable = Some(variable.clone());
                Ok(variable.domain)
            }
        }
    }
}
