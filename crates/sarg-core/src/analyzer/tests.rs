use crate::{
    analyzer::{SargAnalysis, SargAnalyzer},
    config::SargConfig,
    domain::{SargDomain, SargType},
    expr::{DynamicParam, Expr, OpaqueKind, VariableRef},
    test_support::{INT_NOT_NULL, INT_NULLABLE, int, var, x, y},
    value::Value,
};
use rust_decimal::Decimal;

// ---- helpers -----------------------------------------------------------

fn analyzer() -> SargAnalyzer {
    SargAnalyzer::default()
}

fn sarg(predicate: &Expr) -> Option<String> {
    analyzer()
        .analyze(predicate)
        .expect("analysis should not fail")
        .map(|binding| binding.evaluate().expect("evaluate").to_string())
}

fn param(index: usize) -> Expr {
    Expr::param(DynamicParam::new(index, INT_NOT_NULL))
}

fn nullable_x() -> Expr {
    Expr::variable(VariableRef::new(0, "x", INT_NULLABLE))
}

// ---- single conjunct ---------------------------------------------------

#[test]
fn equality_binds_a_point() {
    assert_eq!(sarg(&Expr::eq(x(), int(5))).as_deref(), Some("[5, 5]"));
}

#[test]
fn range_comparisons_bind_half_ranges() {
    assert_eq!(sarg(&Expr::lt(x(), int(5))).as_deref(), Some("(-infinity, 5)"));
    assert_eq!(sarg(&Expr::lte(x(), int(5))).as_deref(), Some("(-infinity, 5]"));
    assert_eq!(sarg(&Expr::gt(x(), int(5))).as_deref(), Some("(5, +infinity)"));
    assert_eq!(sarg(&Expr::gte(x(), int(5))).as_deref(), Some("[5, +infinity)"));
}

#[test]
fn literal_first_comparisons_are_reversed() {
    assert_eq!(sarg(&Expr::lt(int(5), x())).as_deref(), Some("(5, +infinity)"));
    assert_eq!(sarg(&Expr::gte(int(5), x())).as_deref(), Some("(-infinity, 5]"));
}

#[test]
fn conjunction_within_one_conjunct_intersects() {
    let predicate = Expr::and(vec![Expr::gt(x(), int(3)), Expr::lt(x(), int(10))]);

    assert_eq!(sarg(&predicate).as_deref(), Some("(3, 10)"));
}

#[test]
fn disjunction_unions() {
    let predicate = Expr::or(vec![Expr::gt(x(), int(3)), Expr::lt(x(), int(1))]);

    assert_eq!(
        sarg(&predicate).as_deref(),
        Some("UNION( (-infinity, 1) (3, +infinity) )")
    );
}

#[test]
fn negation_complements() {
    let predicate = Expr::not(Expr::and(vec![
        Expr::gte(x(), int(0)),
        Expr::lte(x(), int(10)),
    ]));

    assert_eq!(
        sarg(&predicate).as_deref(),
        Some("UNION( (-infinity, 0) (10, +infinity) )")
    );
}

#[test]
fn inequality_is_the_complement_of_a_point() {
    let binding = analyzer()
        .analyze(&Expr::ne(x(), int(5)))
        .expect("analyze")
        .expect("sargable");

    assert_eq!(binding.expr.to_string(), "COMPLEMENT( [5, 5] )");
    assert_eq!(
        binding.evaluate().expect("evaluate").to_string(),
        "UNION( (-infinity, 5) (5, +infinity) )"
    );
}

#[test]
fn is_null_binds_the_null_point() {
    let binding = analyzer()
        .analyze(&Expr::is_null(nullable_x()))
        .expect("analyze")
        .expect("sargable");

    assert_eq!(binding.expr.to_string(), "[null, null] NULL_MATCHES_NULL");
    assert_eq!(binding.evaluate().expect("evaluate").to_string(), "[null, null]");
}

#[test]
fn equality_with_null_reads_as_is_null() {
    assert_eq!(
        sarg(&Expr::eq(nullable_x(), Expr::null())).as_deref(),
        Some("[null, null]")
    );
    assert_eq!(sarg(&Expr::ne(nullable_x(), Expr::null())), None);
}

#[test]
fn nullable_ranges_exclude_null() {
    assert_eq!(
        sarg(&Expr::lt(nullable_x(), int(5))).as_deref(),
        Some("(null, 5)")
    );
}

#[test]
fn decimal_literals_round_against_integer_columns() {
    let gt = Expr::gt(x(), Expr::literal(Decimal::new(59, 1)));
    assert_eq!(sarg(&gt).as_deref(), Some("[6, +infinity)"));

    let lte = Expr::lte(x(), Expr::literal(Decimal::new(59, 1)));
    assert_eq!(sarg(&lte).as_deref(), Some("(-infinity, 6)"));
}

#[test]
fn dynamic_params_bind_when_types_match() {
    let param = Expr::param(DynamicParam::new(0, INT_NOT_NULL));
    assert_eq!(sarg(&Expr::gte(x(), param)).as_deref(), Some("[?0, +infinity)"));

    let text = Expr::param(DynamicParam::new(1, SargDomain::not_null(SargType::Text)));
    assert_eq!(sarg(&Expr::eq(x(), text)), None);
}

// ---- rejections --------------------------------------------------------

#[test]
fn two_variables_are_not_sargable() {
    assert_eq!(sarg(&Expr::gt(x(), y())), None);
}

#[test]
fn mixing_variables_across_a_conjunct_is_not_sargable() {
    let predicate = Expr::or(vec![Expr::eq(x(), int(1)), Expr::eq(y(), int(2))]);

    assert_eq!(sarg(&predicate), None);
}

#[test]
fn two_coordinates_are_not_sargable() {
    assert_eq!(sarg(&Expr::eq(int(1), int(2))), None);
}

#[test]
fn opaque_nodes_are_not_sargable() {
    let subquery = Expr::opaque(OpaqueKind::Subquery, "$SCALAR_QUERY(select 1)");

    assert_eq!(sarg(&Expr::eq(x(), subquery.clone())), None);
    assert_eq!(sarg(&subquery), None);
    assert_eq!(sarg(&Expr::not(subquery)), None);
}

#[test]
fn nested_operands_are_not_sargable() {
    let nested = Expr::eq(x(), Expr::lt(y(), int(1)));

    assert_eq!(sarg(&nested), None);
}

#[test]
fn unassignable_literals_are_not_sargable() {
    assert_eq!(sarg(&Expr::eq(x(), Expr::literal("five"))), None);
    assert_eq!(
        sarg(&Expr::eq(x(), Expr::Literal(Value::float(1.5).expect("finite")))),
        None
    );
}

#[test]
fn params_that_cannot_be_ordered_are_not_sargable() {
    let two_params = Expr::and(vec![Expr::gt(x(), param(0)), Expr::lt(x(), param(1))]);
    assert_eq!(sarg(&two_params), None);

    let param_and_literal = Expr::or(vec![Expr::eq(x(), param(0)), Expr::eq(x(), int(5))]);
    assert_eq!(sarg(&param_and_literal), None);

    // one parameter orders against itself and against null
    let same_param = Expr::and(vec![Expr::gte(x(), param(0)), Expr::lte(x(), param(0))]);
    assert!(sarg(&same_param).is_some());
    let with_null = Expr::or(vec![
        Expr::is_null(nullable_x()),
        Expr::eq(nullable_x(), Expr::param(DynamicParam::new(0, INT_NULLABLE))),
    ]);
    assert!(sarg(&with_null).is_some());
}

#[test]
fn bare_operands_are_not_sargable() {
    assert_eq!(sarg(&x()), None);
    assert_eq!(sarg(&Expr::literal(true)), None);
    assert_eq!(sarg(&Expr::and(Vec::new())), None);
}

// ---- full predicate ----------------------------------------------------

#[test]
fn analyze_all_splits_sargable_conjuncts_from_the_residual() {
    let predicate = Expr::and(vec![
        Expr::gt(x(), int(3)),
        Expr::gt(x(), y()),
        Expr::and(vec![Expr::lt(x(), int(10)), Expr::eq(y(), int(7))]),
    ]);

    let analysis = analyzer().analyze_all(&predicate).expect("analyze_all");
    let bindings = analysis.bindings();

    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[0].variable.name, "x");
    assert_eq!(
        bindings[0].evaluate().expect("evaluate").to_string(),
        "(3, 10)"
    );
    assert_eq!(
        bindings[0].predicate,
        Expr::and(vec![Expr::gt(x(), int(3)), Expr::lt(x(), int(10))])
    );
    assert_eq!(bindings[1].variable.name, "y");
    assert_eq!(bindings[1].evaluate().expect("evaluate").to_string(), "[7, 7]");

    assert_eq!(analysis.residual_predicate(), Some(Expr::gt(x(), y())));
}

#[test]
fn analyze_all_with_nothing_sargable_keeps_everything() {
    let predicate = Expr::and(vec![Expr::gt(x(), y()), Expr::literal(true)]);
    let (bindings, residual) = analyzer()
        .analyze_all(&predicate)
        .expect("analyze_all")
        .into_parts();

    assert!(bindings.is_empty());
    assert_eq!(residual, Some(Expr::gt(x(), y())));
}

#[test]
fn bindings_recombine_into_their_predicate() {
    let predicate = Expr::and(vec![
        Expr::gte(x(), int(1)),
        Expr::lte(x(), int(2)),
        Expr::eq(y(), int(3)),
    ]);
    let analysis = analyzer().analyze_all(&predicate).expect("analyze_all");

    assert_eq!(analysis.residual_predicate(), None);
    assert_eq!(
        SargAnalysis::bindings_to_predicate(analysis.bindings()),
        Some(predicate)
    );
    assert_eq!(SargAnalysis::bindings_to_predicate(&[]), None);
}

#[test]
fn simple_mode_binds_each_variable_once() {
    let predicate = Expr::and(vec![
        Expr::gt(x(), int(3)),
        Expr::lt(x(), int(10)),
        Expr::or(vec![Expr::eq(y(), int(1)), Expr::eq(y(), int(2))]),
        Expr::gte(x(), Expr::param(DynamicParam::new(0, INT_NOT_NULL))),
    ]);

    let analysis = SargAnalyzer::new(SargConfig::simple())
        .analyze_all(&predicate)
        .expect("analyze_all");

    assert_eq!(analysis.bindings().len(), 1);
    assert_eq!(
        analysis.bindings()[0].evaluate().expect("evaluate").to_string(),
        "(3, +infinity)"
    );
    assert_eq!(analysis.residual().len(), 3);
    assert_eq!(analysis.residual()[0], Expr::lt(x(), int(10)));
}

#[test]
fn simple_mode_rejects_inequality() {
    let simple = SargAnalyzer::new(SargConfig::simple());

    let binding = simple
        .analyze(&Expr::ne(x(), int(5)))
        .expect("analysis should not fail");
    assert_eq!(binding, None);

    let binding = simple
        .analyze(&Expr::eq(x(), int(5)))
        .expect("analysis should not fail");
    assert!(binding.is_some());
}

#[test]
fn params_stay_out_of_intersections_they_cannot_order() {
    let predicate = Expr::and(vec![Expr::gt(x(), param(0)), Expr::lt(x(), param(1))]);
    let analysis = analyzer().analyze_all(&predicate).expect("analyze_all");

    assert_eq!(analysis.bindings().len(), 1);
    let binding = &analysis.bindings()[0];
    assert_eq!(binding.predicate, Expr::gt(x(), param(0)));
    assert_eq!(
        binding.evaluate().expect("evaluate").to_string(),
        "(?0, +infinity)"
    );
    assert_eq!(analysis.residual(), &[Expr::lt(x(), param(1))]);

    let mixed = Expr::and(vec![Expr::lt(x(), int(10)), Expr::gte(x(), param(0))]);
    let analysis = analyzer().analyze_all(&mixed).expect("analyze_all");

    assert_eq!(analysis.bindings().len(), 1);
    assert_eq!(
        analysis.bindings()[0].evaluate().expect("evaluate").to_string(),
        "(-infinity, 10)"
    );
    assert_eq!(analysis.residual(), &[Expr::gte(x(), param(0))]);
}

#[test]
fn post_filter_keeps_residual_and_parameter_bindings() {
    let predicate = Expr::and(vec![
        Expr::gte(x(), param(0)),
        Expr::gt(x(), y()),
        Expr::eq(y(), int(7)),
        Expr::lt(x(), param(1)),
    ]);
    let analysis = analyzer().analyze_all(&predicate).expect("analyze_all");

    assert_eq!(analysis.bindings().len(), 2);
    assert_eq!(
        analysis.residual(),
        &[Expr::gt(x(), y()), Expr::lt(x(), param(1))]
    );
    assert_eq!(
        analysis.post_filter(),
        &[
            Expr::gte(x(), param(0)),
            Expr::gt(x(), y()),
            Expr::lt(x(), param(1)),
        ]
    );
    assert_eq!(
        analysis.post_filter_predicate(),
        Some(Expr::and(vec![
            Expr::gte(x(), param(0)),
            Expr::gt(x(), y()),
            Expr::lt(x(), param(1)),
        ]))
    );

    let literals = Expr::and(vec![Expr::gte(x(), int(1)), Expr::lte(x(), int(2))]);
    let analysis = analyzer().analyze_all(&literals).expect("analyze_all");
    assert!(analysis.post_filter().is_empty());
    assert_eq!(analysis.post_filter_predicate(), None);
}

#[test]
fn variable_window_limits_bindable_variables() {
    let predicate = Expr::and(vec![Expr::eq(x(), int(1)), Expr::eq(y(), int(2))]);
    let config = SargConfig::default().with_variable_window(1..2);

    let analysis = SargAnalyzer::new(config)
        .analyze_all(&predicate)
        .expect("analyze_all");

    assert_eq!(analysis.bindings().len(), 1);
    assert!(analysis.bindings()[0].variable.same_variable(&var(1, "y")));
    assert_eq!(analysis.residual(), &[Expr::eq(x(), int(1))]);
}
