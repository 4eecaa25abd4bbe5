use crate::expr::Expr;

/// Flatten a predicate into the list of terms that are AND'ed together.
///
/// Nested ANDs are flattened recursively and literal TRUE terms are
/// dropped; every other node is returned as one conjunct, in order.
#[must_use]
pub fn conjunctions(predicate: &Expr) -> Vec<Expr> {
    let mut out = Vec::new();
    collect(predicate, &mut out);
    out
}

fn collect(predicate: &Expr, out: &mut Vec<Expr>) {
    match predicate {
        Expr::And(children) => {
            for child in children {
                collect(child, out);
            }
        }
        other if other.is_true_literal() => {}
        other => out.push(other.clone()),
    }
}
