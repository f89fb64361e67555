//! Goal engine shared by the preview and dashboard call sites.

use goalpace_shared::EngineConfig;

use super::error::InvalidPlanError;
use super::funnel::FunnelProjector;
use super::normalizer::GoalNormalizer;
use super::progress::ProgressCalculator;
use super::team::TeamAggregator;
use super::types::{
    ActualsSnapshot, FunnelReport, GoalInput, GoalPlan, GoalReport, ProgressReport, TeamSummary,
};

/// Normalizes, computes, projects and aggregates goal figures.
///
/// Stateless apart from policy configuration; every method is a pure
/// function of its arguments.
#[derive(Debug, Clone, Default)]
pub struct GoalEngine {
    normalizer: GoalNormalizer,
    calculator: ProgressCalculator,
    projector: FunnelProjector,
    aggregator: TeamAggregator,
}

impl GoalEngine {
    /// Creates an engine from policy configuration.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            normalizer: GoalNormalizer::new(config.defaults.clone()),
            calculator: ProgressCalculator::new(),
            projector: FunnelProjector::new(config.listings_safety_margin),
            aggregator: TeamAggregator::new(),
        }
    }

    /// Validates and defaults a raw goal.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPlanError`] naming the offending field.
    pub fn normalize(&self, input: &GoalInput) -> Result<GoalPlan, InvalidPlanError> {
        self.normalizer.normalize(input)
    }

    /// Computes income and deal progress.
    #[must_use]
    pub fn compute(&self, plan: &GoalPlan, actuals: &ActualsSnapshot) -> ProgressReport {
        self.calculator.compute(plan, actuals)
    }

    /// Projects the listings funnel, if the plan has a listings goal.
    #[must_use]
    pub fn project(&self, plan: &GoalPlan, actuals: &ActualsSnapshot) -> Option<FunnelReport> {
        self.projector.project(plan, actuals)
    }

    /// Computes progress and the optional funnel together.
    #[must_use]
    pub fn evaluate(&self, plan: &GoalPlan, actuals: &ActualsSnapshot) -> GoalReport {
        GoalReport {
            progress: self.compute(plan, actuals),
            funnel: self.project(plan, actuals),
        }
    }

    /// Rolls up progress reports for a team.
    #[must_use]
    pub fn aggregate(&self, reports: &[ProgressReport]) -> TeamSummary {
        self.aggregator.aggregate(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use goalpace_shared::GoalDefaults;
    use rust_decimal_macros::dec;

    fn input() -> GoalInput {
        GoalInput {
            annual_billing_goal: Some(dec!(120000)),
            average_ticket_target: Some(dec!(200000)),
            listings_goal_annual: Some(20),
            ..GoalInput::default()
        }
    }

    #[test]
    fn test_evaluate_combines_progress_and_funnel() {
        let engine = GoalEngine::default();
        let plan = engine.normalize(&input()).unwrap();
        let report = engine.evaluate(&plan, &ActualsSnapshot::empty());

        assert_eq!(report.progress.estimated_puntas_needed, 20);
        assert_eq!(report.progress.required_prospecting_weekly, dec!(2.5));
        let funnel = report.funnel.unwrap();
        assert_eq!(funnel.required_prelistings_annual, 50);
    }

    #[test]
    fn test_config_drives_defaults_and_margin() {
        let config = EngineConfig {
            defaults: GoalDefaults {
                working_weeks: 50,
                ..GoalDefaults::default()
            },
            listings_safety_margin: dec!(2),
        };
        let engine = GoalEngine::new(&config);
        let plan = engine.normalize(&input()).unwrap();
        let actuals = ActualsSnapshot {
            actual_active_listings_count: 4,
            ..ActualsSnapshot::empty()
        };

        let report = engine.evaluate(&plan, &actuals);

        assert_eq!(plan.working_weeks, 50);
        assert_eq!(report.progress.required_prospecting_weekly, dec!(2.4));
        assert_eq!(report.funnel.unwrap().minimum_listings_required, 8);
    }

    #[test]
    fn test_preview_and_dashboard_agree() {
        let engine = GoalEngine::default();
        let plan = engine.normalize(&input()).unwrap();
        let actuals = ActualsSnapshot {
            actual_gross_income: dec!(40000),
            elapsed_fraction_of_year: dec!(0.25),
            ..ActualsSnapshot::empty()
        };

        assert_eq!(engine.evaluate(&plan, &actuals), engine.evaluate(&plan, &actuals));
    }
}
