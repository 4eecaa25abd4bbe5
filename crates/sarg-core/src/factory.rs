use crate::{
    analyzer::SargAnalyzer,
    config::SargConfig,
    domain::SargDomain,
    interval::IntervalExpr,
    set::{SetOpExpr, SetOperator},
};

///
/// SargFactory
///
/// Entry point for building sarg objects. Holds only read-only
/// configuration, so one factory can be shared by concurrent analyses.
///

#[derive(Clone, Debug, Default)]
pub struct SargFactory {
    config: SargConfig,
}

impl SargFactory {
    #[must_use]
    pub const fn new(config: SargConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &SargConfig {
        &self.config
    }

    #[must_use]
    pub fn new_analyzer(&self) -> SargAnalyzer {
        SargAnalyzer::new(self.config.clone())
    }

    #[must_use]
    pub const fn new_interval_expr(&self, domain: SargDomain) -> IntervalExpr {
        IntervalExpr::new(domain)
    }

    #[must_use]
    pub const fn new_set_expr(&self, domain: SargDomain, op: SetOperator) -> SetOpExpr {
        SetOpExpr::new(domain, op)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        endpoint::Strictness,
        set::SetExpr,
        test_support::{INT_NOT_NULL, lit},
    };

    const fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn factory_is_shareable_across_threads() {
        assert_send_sync::<SargFactory>();
    }

    #[test]
    fn factory_builds_expressions_for_a_domain() {
        let factory = SargFactory::default();

        let mut lower = factory.new_interval_expr(INT_NOT_NULL);
        lower.set_lower(lit(1), Strictness::Closed).expect("int fits");
        let mut upper = factory.new_interval_expr(INT_NOT_NULL);
        upper.set_upper(lit(4), Strictness::Open).expect("int fits");

        let mut set = factory.new_set_expr(INT_NOT_NULL, SetOperator::Intersection);
        set.add_child(lower.into());
        set.add_child(upper.into());

        let seq = SetExpr::from(set).evaluate().expect("evaluate");
        assert_eq!(seq.to_string(), "[1, 4)");
    }

    #[test]
    fn analyzers_inherit_the_factory_config() {
        let factory = SargFactory::new(SargConfig::simple());

        assert!(factory.new_analyzer().config().simple_mode);
    }
}
