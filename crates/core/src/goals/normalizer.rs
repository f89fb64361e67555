//! Goal input validation and defaulting.

use goalpace_shared::GoalDefaults;
use goalpace_shared::types::Currency;
use rust_decimal::Decimal;
use tracing::debug;

use super::error::{InvalidPlanError, PlanField};
use super::types::{DateWindow, GoalInput, GoalPlan};

const PERCENT_RANGE: &str = "[0, 100]";
const CONVERSION_RANGE: &str = "(0, 100]";
const WEEKS_RANGE: &str = "[1, 52]";
const MAX_WORKING_WEEKS: i64 = 52;

/// Turns raw goal input into a canonical [`GoalPlan`].
#[derive(Debug, Clone, Default)]
pub struct GoalNormalizer {
    defaults: GoalDefaults,
}

impl GoalNormalizer {
    /// Creates a normalizer with the given defaults.
    #[must_use]
    pub const fn new(defaults: GoalDefaults) -> Self {
        Self { defaults }
    }

    /// Returns the defaults applied to blank fields.
    #[must_use]
    pub const fn defaults(&self) -> &GoalDefaults {
        &self.defaults
    }

    /// Validates `input` and fills blank fields with defaults.
    ///
    /// Absent money fields count as zero and an absent listings goal means
    /// no listings goal.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPlanError`] naming the first offending field.
    pub fn normalize(&self, input: &GoalInput) -> Result<GoalPlan, InvalidPlanError> {
        let result = self.build(input);
        if let Err(err) = &result {
            debug!(field = %err.field(), error = %err, "Rejected goal plan");
        }
        result
    }

    fn build(&self, input: &GoalInput) -> Result<GoalPlan, InvalidPlanError> {
        let defaults = &self.defaults;

        let annual_billing_goal = non_negative(
            PlanField::AnnualBillingGoal,
            input.annual_billing_goal.unwrap_or_default(),
        )?;
        let monthly_living_expenses = non_negative(
            PlanField::MonthlyLivingExpenses,
            input.monthly_living_expenses.unwrap_or_default(),
        )?;
        let average_ticket_target = non_negative(
            PlanField::AverageTicketTarget,
            input.average_ticket_target.unwrap_or_default(),
        )?;
        let average_commission_target = percentage(
            PlanField::AverageCommissionTarget,
            input
                .average_commission_target
                .unwrap_or(defaults.average_commission_target),
        )?;
        let split_percentage = percentage(
            PlanField::SplitPercentage,
            input.split_percentage.unwrap_or(defaults.split_percentage),
        )?;
        let conversion_rate = non_negative(
            PlanField::ConversionRate,
            input.conversion_rate.unwrap_or(defaults.conversion_rate),
        )?;
        let pl_to_listing_conversion_target = input
            .pl_to_listing_conversion_target
            .unwrap_or(defaults.pl_to_listing_conversion_target);
        if pl_to_listing_conversion_target <= Decimal::ZERO
            || pl_to_listing_conversion_target > Decimal::ONE_HUNDRED
        {
            return Err(InvalidPlanError::OutOfRange {
                field: PlanField::PlToListingConversionTarget,
                range: CONVERSION_RANGE,
                value: pl_to_listing_conversion_target,
            });
        }

        let working_weeks = self.working_weeks(input.working_weeks)?;
        let listings_goal_annual = listings_goal(input.listings_goal_annual)?;
        let currency = self.currency(input.currency.as_deref())?;
        let listings_window =
            window(input.listings_goal_start_date, input.listings_goal_end_date)?;

        Ok(GoalPlan {
            annual_billing_goal,
            monthly_living_expenses,
            average_ticket_target,
            average_commission_target,
            currency,
            split_percentage,
            conversion_rate,
            working_weeks,
            listings_goal_annual,
            pl_to_listing_conversion_target,
            listings_window,
        })
    }

    fn working_weeks(&self, raw: Option<i64>) -> Result<u32, InvalidPlanError> {
        let weeks = raw.unwrap_or_else(|| i64::from(self.defaults.working_weeks));
        if !(1..=MAX_WORKING_WEEKS).contains(&weeks) {
            return Err(InvalidPlanError::OutOfRange {
                field: PlanField::WorkingWeeks,
                range: WEEKS_RANGE,
                value: Decimal::from(weeks),
            });
        }
        u32::try_from(weeks).map_err(|_| InvalidPlanError::OutOfRange {
            field: PlanField::WorkingWeeks,
            range: WEEKS_RANGE,
            value: Decimal::from(weeks),
        })
    }

    fn currency(&self, raw: Option<&str>) -> Result<Currency, InvalidPlanError> {
        match raw {
            None => Ok(self.defaults.currency),
            Some(code) if code.trim().is_empty() => Ok(self.defaults.currency),
            Some(code) => code
                .parse()
                .map_err(|_| InvalidPlanError::UnknownCurrency(code.to_string())),
        }
    }
}

fn non_negative(field: PlanField, value: Decimal) -> Result<Decimal, InvalidPlanError> {
    if value < Decimal::ZERO {
        return Err(InvalidPlanError::Negative { field, value });
    }
    Ok(value)
}

fn percentage(field: PlanField, value: Decimal) -> Result<Decimal, InvalidPlanError> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(InvalidPlanError::OutOfRange {
            field,
            range: PERCENT_RANGE,
            value,
        });
    }
    Ok(value)
}

fn listings_goal(raw: Option<i64>) -> Result<u32, InvalidPlanError> {
    let goal = raw.unwrap_or(0);
    if goal < 0 {
        return Err(InvalidPlanError::Negative {
            field: PlanField::ListingsGoalAnnual,
            value: Decimal::from(goal),
        });
    }
    u32::try_from(goal).map_err(|_| InvalidPlanError::OutOfRange {
        field: PlanField::ListingsGoalAnnual,
        range: "[0, 4294967295]",
        value: Decimal::from(goal),
    })
}

fn window(
    start: Option<chrono::NaiveDate>,
    end: Option<chrono::NaiveDate>,
) -> Result<Option<DateWindow>, InvalidPlanError> {
    match (start, end) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(InvalidPlanError::IncompleteWindow {
            present: PlanField::ListingsGoalStartDate,
            missing: PlanField::ListingsGoalEndDate,
        }),
        (None, Some(_)) => Err(InvalidPlanError::IncompleteWindow {
            present: PlanField::ListingsGoalEndDate,
            missing: PlanField::ListingsGoalStartDate,
        }),
        (Some(start), Some(end)) if end < start => {
            Err(InvalidPlanError::InvertedWindow { start, end })
        }
        (Some(start), Some(end)) => Ok(Some(DateWindow { start, end })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn normalizer() -> GoalNormalizer {
        GoalNormalizer::default()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_blank_input_gets_documented_defaults() {
        let plan = normalizer().normalize(&GoalInput::default()).unwrap();

        assert_eq!(plan.annual_billing_goal, Decimal::ZERO);
        assert_eq!(plan.monthly_living_expenses, Decimal::ZERO);
        assert_eq!(plan.average_ticket_target, Decimal::ZERO);
        assert_eq!(plan.split_percentage, dec!(50));
        assert_eq!(plan.conversion_rate, dec!(6));
        assert_eq!(plan.working_weeks, 48);
        assert_eq!(plan.average_commission_target, dec!(3));
        assert_eq!(plan.currency, Currency::Usd);
        assert_eq!(plan.pl_to_listing_conversion_target, dec!(40));
        assert_eq!(plan.listings_goal_annual, 0);
        assert!(plan.listings_window.is_none());
    }

    #[test]
    fn test_explicit_values_are_kept() {
        let input = GoalInput {
            annual_billing_goal: Some(dec!(120000)),
            average_ticket_target: Some(dec!(200000)),
            split_percentage: Some(dec!(70)),
            working_weeks: Some(52),
            currency: Some("local".to_string()),
            listings_goal_annual: Some(20),
            listings_goal_start_date: Some(date(2026, 1, 1)),
            listings_goal_end_date: Some(date(2026, 4, 2)),
            ..GoalInput::default()
        };

        let plan = normalizer().normalize(&input).unwrap();

        assert_eq!(plan.annual_billing_goal, dec!(120000));
        assert_eq!(plan.split_percentage, dec!(70));
        assert_eq!(plan.working_weeks, 52);
        assert_eq!(plan.currency, Currency::Local);
        assert_eq!(plan.listings_goal_annual, 20);
        assert_eq!(
            plan.listings_window,
            Some(DateWindow {
                start: date(2026, 1, 1),
                end: date(2026, 4, 2),
            })
        );
    }

    #[test]
    fn test_custom_defaults_apply() {
        let defaults = GoalDefaults {
            working_weeks: 40,
            currency: Currency::Local,
            ..GoalDefaults::default()
        };
        let plan = GoalNormalizer::new(defaults)
            .normalize(&GoalInput::default())
            .unwrap();

        assert_eq!(plan.working_weeks, 40);
        assert_eq!(plan.currency, Currency::Local);
    }

    #[rstest]
    #[case(0)]
    #[case(53)]
    fn test_out_of_range_default_weeks_rejected(#[case] working_weeks: u32) {
        let defaults = GoalDefaults {
            working_weeks,
            ..GoalDefaults::default()
        };
        let err = GoalNormalizer::new(defaults)
            .normalize(&GoalInput::default())
            .unwrap_err();

        assert_eq!(err.field(), PlanField::WorkingWeeks);
    }

    #[rstest]
    #[case::negative_goal(
        GoalInput { annual_billing_goal: Some(dec!(-1)), ..GoalInput::default() },
        PlanField::AnnualBillingGoal
    )]
    #[case::negative_expenses(
        GoalInput { monthly_living_expenses: Some(dec!(-0.01)), ..GoalInput::default() },
        PlanField::MonthlyLivingExpenses
    )]
    #[case::negative_ticket(
        GoalInput { average_ticket_target: Some(dec!(-100)), ..GoalInput::default() },
        PlanField::AverageTicketTarget
    )]
    #[case::split_above_100(
        GoalInput { split_percentage: Some(dec!(100.5)), ..GoalInput::default() },
        PlanField::SplitPercentage
    )]
    #[case::split_below_0(
        GoalInput { split_percentage: Some(dec!(-1)), ..GoalInput::default() },
        PlanField::SplitPercentage
    )]
    #[case::commission_above_100(
        GoalInput { average_commission_target: Some(dec!(101)), ..GoalInput::default() },
        PlanField::AverageCommissionTarget
    )]
    #[case::negative_conversion_rate(
        GoalInput { conversion_rate: Some(dec!(-2)), ..GoalInput::default() },
        PlanField::ConversionRate
    )]
    #[case::zero_weeks(
        GoalInput { working_weeks: Some(0), ..GoalInput::default() },
        PlanField::WorkingWeeks
    )]
    #[case::too_many_weeks(
        GoalInput { working_weeks: Some(53), ..GoalInput::default() },
        PlanField::WorkingWeeks
    )]
    #[case::negative_listings(
        GoalInput { listings_goal_annual: Some(-3), ..GoalInput::default() },
        PlanField::ListingsGoalAnnual
    )]
    #[case::zero_pl_conversion(
        GoalInput { pl_to_listing_conversion_target: Some(dec!(0)), ..GoalInput::default() },
        PlanField::PlToListingConversionTarget
    )]
    #[case::pl_conversion_above_100(
        GoalInput { pl_to_listing_conversion_target: Some(dec!(120)), ..GoalInput::default() },
        PlanField::PlToListingConversionTarget
    )]
    #[case::unknown_currency(
        GoalInput { currency: Some("EUR".to_string()), ..GoalInput::default() },
        PlanField::Currency
    )]
    #[case::start_without_end(
        GoalInput { listings_goal_start_date: Some(date(2026, 1, 1)), ..GoalInput::default() },
        PlanField::ListingsGoalEndDate
    )]
    #[case::end_without_start(
        GoalInput { listings_goal_end_date: Some(date(2026, 1, 1)), ..GoalInput::default() },
        PlanField::ListingsGoalStartDate
    )]
    #[case::end_before_start(
        GoalInput {
            listings_goal_start_date: Some(date(2026, 6, 1)),
            listings_goal_end_date: Some(date(2026, 5, 31)),
            ..GoalInput::default()
        },
        PlanField::ListingsGoalEndDate
    )]
    fn test_invalid_input_names_field(#[case] input: GoalInput, #[case] field: PlanField) {
        let err = normalizer().normalize(&input).unwrap_err();
        assert_eq!(err.field(), field);
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(100))]
    fn test_percentage_bounds_are_inclusive(#[case] value: Decimal) {
        let input = GoalInput {
            split_percentage: Some(value),
            average_commission_target: Some(value),
            ..GoalInput::default()
        };
        assert!(normalizer().normalize(&input).is_ok());
    }

    #[test]
    fn test_single_day_window_is_accepted() {
        let input = GoalInput {
            listings_goal_start_date: Some(date(2026, 3, 1)),
            listings_goal_end_date: Some(date(2026, 3, 1)),
            ..GoalInput::default()
        };
        let plan = normalizer().normalize(&input).unwrap();
        assert_eq!(plan.listings_window.map(|w| w.days()), Some(0));
    }

    #[test]
    fn test_blank_currency_uses_default() {
        let input = GoalInput {
            currency: Some("  ".to_string()),
            ..GoalInput::default()
        };
        assert_eq!(normalizer().normalize(&input).unwrap().currency, Currency::Usd);
    }
}
