use rust_decimal::Decimal;
use sarg::prelude::*;
use std::ops::Bound;

fn price() -> Expr {
    Expr::variable(VariableRef::new(
        0,
        "price",
        SargDomain::nullable(SargType::Decimal { scale: 2 }),
    ))
}

fn qty() -> Expr {
    Expr::variable(VariableRef::new(
        1,
        "qty",
        SargDomain::not_null(SargType::Integer),
    ))
}

#[test]
fn planner_round_trip_produces_scan_ranges() {
    // price > 9.999 AND price <= 20 AND qty <> 0 AND price > qty
    let predicate = Expr::and(vec![
        Expr::gt(price(), Expr::literal(Decimal::new(9999, 3))),
        Expr::lte(price(), Expr::literal(20)),
        Expr::ne(qty(), Expr::literal(0)),
        Expr::gt(price(), qty()),
    ]);

    let analyzer = SargFactory::default().new_analyzer();
    let analysis = analyzer.analyze_all(&predicate).expect("analysis");
    let bindings = analysis.bindings();

    assert_eq!(bindings.len(), 2);

    let price_seq = bindings[0].evaluate().expect("evaluate");
    assert_eq!(price_seq.to_string(), "[10.00, 20.00]");

    let ranges = price_seq.to_scan_ranges();
    assert_eq!(
        ranges[0].lower,
        Bound::Included(Coordinate::Literal(Value::Decimal(Decimal::new(1000, 2))))
    );

    let qty_seq = bindings[1].evaluate().expect("evaluate");
    assert_eq!(qty_seq.to_string(), "UNION( (-infinity, 0) (0, +infinity) )");
    assert_eq!(qty_seq.contains_value(&Value::Int(0)), Ok(false));

    assert_eq!(
        analysis.residual_predicate().map(|p| p.to_string()),
        Some("price > qty".to_string())
    );
    // literal-only bindings need no re-check
    assert_eq!(analysis.post_filter(), analysis.residual());
}

#[test]
fn simple_mode_and_window_route_conjuncts_to_residual() {
    let config = SargConfig::simple().with_variable_window(1..2);
    let analyzer = SargFactory::new(config).new_analyzer();

    let predicate = Expr::and(vec![
        Expr::gt(price(), Expr::literal(1)),
        Expr::gte(qty(), Expr::literal(5)),
        Expr::lt(qty(), Expr::literal(9)),
    ]);

    let (bindings, residual) = analyzer.analyze_all(&predicate).expect("analysis").into_parts();

    assert_eq!(bindings.len(), 1);
    assert_eq!(bindings[0].variable.name, "qty");
    assert_eq!(
        residual,
        Some(Expr::and(vec![
            Expr::gt(price(), Expr::literal(1)),
            Expr::lt(qty(), Expr::literal(9)),
        ]))
    );
}

#[test]
fn version_is_exported() {
    assert!(!sarg::VERSION.is_empty());
}
