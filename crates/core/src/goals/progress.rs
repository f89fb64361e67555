//! Income and deal progress against a goal plan.

use rust_decimal::Decimal;

use super::arith::{ceil_count, percent_of, product, ratio};
use super::types::{ActualsSnapshot, GoalPlan, PaceStatus, ProgressReport};

const MONTHS_PER_YEAR: u32 = 12;

/// Computes [`ProgressReport`]s.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressCalculator;

impl ProgressCalculator {
    /// Creates a new progress calculator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Combines a plan with observed performance.
    ///
    /// Every division is guarded: a zero commission per deal gives zero deals
    /// needed, zero expenses give a viability ratio of 1, a zero goal gives
    /// zero progress.
    #[must_use]
    pub fn compute(&self, plan: &GoalPlan, actuals: &ActualsSnapshot) -> ProgressReport {
        let goal = plan.annual_billing_goal;
        let income = actuals.actual_gross_income;

        let commission_per_deal =
            percent_of(plan.average_ticket_target, plan.average_commission_target);
        let estimated_puntas_needed = ceil_count(ratio(goal, commission_per_deal));

        let required_prospecting_annual =
            product(Decimal::from(estimated_puntas_needed), plan.conversion_rate);
        let required_prospecting_weekly =
            ratio(required_prospecting_annual, Decimal::from(plan.working_weeks));

        let consumed_prospecting =
            product(Decimal::from(actuals.actual_puntas_count), plan.conversion_rate);
        let remaining_prospecting =
            (required_prospecting_annual - consumed_prospecting).max(Decimal::ZERO);

        let net_income_goal = percent_of(goal, plan.split_percentage);
        let annual_expenses = product(
            plan.monthly_living_expenses,
            Decimal::from(MONTHS_PER_YEAR),
        );
        let financial_viability_ratio = if annual_expenses > Decimal::ZERO {
            ratio(net_income_goal, annual_expenses)
        } else {
            Decimal::ONE
        };

        let progress_percentage_raw = product(ratio(income, goal), Decimal::ONE_HUNDRED);
        let progress_percentage = progress_percentage_raw.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED);
        let gap_to_goal = (goal - income).max(Decimal::ZERO);

        let run_rate_projection = if actuals.elapsed_fraction_of_year > Decimal::ZERO {
            ratio(income, actuals.elapsed_fraction_of_year)
        } else {
            income
        };
        let pace = if run_rate_projection >= goal {
            PaceStatus::OnTrack
        } else {
            PaceStatus::Behind
        };

        ProgressReport {
            currency: plan.currency,
            annual_billing_goal: goal,
            actual_gross_income: income,
            actual_puntas_count: actuals.actual_puntas_count,
            commission_per_deal,
            estimated_puntas_needed,
            estimated_total_puntas_target: u64::from(actuals.actual_puntas_count)
                .saturating_add(estimated_puntas_needed),
            required_prospecting_annual,
            required_prospecting_weekly,
            remaining_prospecting,
            net_income_goal,
            financial_viability_ratio,
            progress_percentage,
            progress_percentage_raw,
            gap_to_goal,
            run_rate_projection,
            pace,
        }
    }
}
