//! Goal data types.

use chrono::NaiveDate;
use goalpace_shared::types::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::arith;

/// Raw goal definition as typed by an agent or supervisor.
///
/// Every field is optional: a goal being edited is routinely incomplete.
/// [`GoalNormalizer`](super::GoalNormalizer) turns this into a [`GoalPlan`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalInput {
    /// Target gross commission income for the year.
    pub annual_billing_goal: Option<Decimal>,
    /// Monthly living expenses.
    pub monthly_living_expenses: Option<Decimal>,
    /// Average ticket (property price) target.
    pub average_ticket_target: Option<Decimal>,
    /// Average commission, in percent of the ticket.
    pub average_commission_target: Option<Decimal>,
    /// Currency code (`USD` or `LOCAL`).
    pub currency: Option<String>,
    /// Agent's share of gross commission, in percent.
    pub split_percentage: Option<Decimal>,
    /// Prospecting activities consumed per closed deal.
    pub conversion_rate: Option<Decimal>,
    /// Working weeks in the year.
    pub working_weeks: Option<i64>,
    /// Listings to acquire in the year. Zero or absent means no listings goal.
    pub listings_goal_annual: Option<i64>,
    /// Share of prelistings that become listings, in percent.
    pub pl_to_listing_conversion_target: Option<Decimal>,
    /// Start of a custom listings window.
    pub listings_goal_start_date: Option<NaiveDate>,
    /// End of a custom listings window.
    pub listings_goal_end_date: Option<NaiveDate>,
}

/// Custom date window for the listings goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    /// First day of the window.
    pub start: NaiveDate,
    /// Last day of the window. Never precedes `start` in a normalized plan.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Days between start and end, floored at zero.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days().max(0)
    }

    /// Window length in (fractional) weeks.
    #[must_use]
    pub fn weeks(&self) -> Decimal {
        Decimal::from(self.days()) / Decimal::from(7)
    }
}

/// Canonical, validated goal plan for one agent-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    /// Target gross commission income for the year.
    pub annual_billing_goal: Decimal,
    /// Monthly living expenses.
    pub monthly_living_expenses: Decimal,
    /// Average ticket (property price) target.
    pub average_ticket_target: Decimal,
    /// Average commission, in percent of the ticket.
    pub average_commission_target: Decimal,
    /// Plan currency. Every report figure is denominated in it.
    pub currency: Currency,
    /// Agent's share of gross commission, in percent.
    pub split_percentage: Decimal,
    /// Prospecting activities consumed per closed deal.
    pub conversion_rate: Decimal,
    /// Working weeks in the year, 1 to 52.
    pub working_weeks: u32,
    /// Listings to acquire. Zero means no listings goal.
    pub listings_goal_annual: u32,
    /// Share of prelistings that become listings, in percent.
    pub pl_to_listing_conversion_target: Decimal,
    /// Custom listings window, if any.
    pub listings_window: Option<DateWindow>,
}

impl GoalPlan {
    /// Returns true if a listings acquisition goal is configured.
    #[must_use]
    pub const fn has_listings_goal(&self) -> bool {
        self.listings_goal_annual > 0
    }
}

/// Observed performance for one agent-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ActualsSnapshot {
    /// Gross commission income closed so far.
    pub actual_gross_income: Decimal,
    /// Closed deal sides so far.
    pub actual_puntas_count: u32,
    /// Listings currently active.
    pub actual_active_listings_count: u32,
    /// Prospecting meetings logged this week.
    pub weekly_green_meetings_count: u32,
    /// Critical (prelisting) activities logged this week.
    pub weekly_critical_activities_count: u32,
    /// Share of the plan year already elapsed, in (0, 1].
    pub elapsed_fraction_of_year: Decimal,
}

impl ActualsSnapshot {
    /// A snapshot with no activity at the end of the year.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            actual_gross_income: Decimal::ZERO,
            actual_puntas_count: 0,
            actual_active_listings_count: 0,
            weekly_green_meetings_count: 0,
            weekly_critical_activities_count: 0,
            elapsed_fraction_of_year: Decimal::ONE,
        }
    }
}

impl Default for ActualsSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

/// Whether the run-rate projection reaches the annual goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaceStatus {
    /// Run-rate projection meets or exceeds the goal.
    OnTrack,
    /// Run-rate projection falls short of the goal.
    Behind,
}

/// Progress of one agent-year against its plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressReport {
    /// Plan currency.
    pub currency: Currency,
    /// Annual gross commission target.
    pub annual_billing_goal: Decimal,
    /// Gross commission income closed so far.
    pub actual_gross_income: Decimal,
    /// Closed deal sides so far.
    pub actual_puntas_count: u32,
    /// Commission earned per closed deal at target ticket and commission.
    pub commission_per_deal: Decimal,
    /// Deals needed to reach the goal.
    pub estimated_puntas_needed: u64,
    /// Closed deals plus deals needed ("X of Y deals").
    pub estimated_total_puntas_target: u64,
    /// Prospecting activities required over the year.
    pub required_prospecting_annual: Decimal,
    /// Prospecting activities required per working week.
    pub required_prospecting_weekly: Decimal,
    /// Prospecting still required after crediting closed deals.
    pub remaining_prospecting: Decimal,
    /// Agent's net income at the goal after the split.
    pub net_income_goal: Decimal,
    /// Net income goal over annual living expenses (1 when no expenses).
    pub financial_viability_ratio: Decimal,
    /// Progress in percent, clamped to [0, 100] for display.
    pub progress_percentage: Decimal,
    /// Progress in percent, unclamped.
    pub progress_percentage_raw: Decimal,
    /// Income still missing to reach the goal.
    pub gap_to_goal: Decimal,
    /// Income extrapolated linearly to the full year.
    pub run_rate_projection: Decimal,
    /// Pace classification from the run-rate projection.
    pub pace: PaceStatus,
}

impl ProgressReport {
    /// Returns true if the run-rate projection reaches the goal.
    #[must_use]
    pub fn is_on_track(&self) -> bool {
        self.pace == PaceStatus::OnTrack
    }
}

/// Listings goal compared with the minimum listings floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingsGoalStatus {
    /// Goal is below current inventory.
    BelowMinimum,
    /// Goal equals the floor.
    AtMinimum,
    /// Goal exceeds the floor.
    AboveMinimum,
}

/// Listing acquisition funnel requirements.
///
/// Only produced when the plan has a listings goal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelReport {
    /// Listings to acquire.
    pub listings_goal_annual: u32,
    /// Prelisting to listing conversion, in percent.
    pub pl_to_listing_conversion_target: Decimal,
    /// Custom window the weekly rate is spread over, if any.
    pub window: Option<DateWindow>,
    /// Weeks the prelistings are spread over.
    pub weeks_in_window: Decimal,
    /// Prelistings needed to hit the listings goal.
    pub required_prelistings_annual: u64,
    /// Prelistings needed per week in the window.
    pub required_prelistings_weekly: Decimal,
    /// Floor below which the listings goal is insufficient.
    pub minimum_listings_required: u64,
    /// Critical activities logged this week.
    pub weekly_critical_activities_count: u32,
}

impl FunnelReport {
    /// Classifies the listings goal against the minimum floor.
    #[must_use]
    pub fn listings_goal_status(&self) -> ListingsGoalStatus {
        match u64::from(self.listings_goal_annual).cmp(&self.minimum_listings_required) {
            std::cmp::Ordering::Less => ListingsGoalStatus::BelowMinimum,
            std::cmp::Ordering::Equal => ListingsGoalStatus::AtMinimum,
            std::cmp::Ordering::Greater => ListingsGoalStatus::AboveMinimum,
        }
    }

    /// This week's critical activities over the weekly prelisting requirement.
    ///
    /// Zero when nothing is required per week.
    #[must_use]
    pub fn weekly_activity_attainment(&self) -> Decimal {
        arith::ratio(
            Decimal::from(self.weekly_critical_activities_count),
            self.required_prelistings_weekly,
        )
    }
}

/// Progress plus the optional funnel for one agent-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalReport {
    /// Income and deal progress.
    pub progress: ProgressReport,
    /// Listings funnel, absent when no listings goal is set.
    pub funnel: Option<FunnelReport>,
}

/// Roll-up of many agents' progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    /// Number of reports aggregated.
    pub agent_count: u32,
    /// Agents whose run-rate reaches their goal.
    pub agents_on_track: u32,
    /// Sum of annual goals.
    pub total_team_goal: Decimal,
    /// Sum of actual gross income.
    pub total_team_income: Decimal,
    /// Income-weighted progress, in percent.
    pub avg_progress: Decimal,
    /// Sum of prospecting still required.
    pub total_prospecting_needed: Decimal,
    /// Sum of closed deal sides.
    pub total_puntas_closed: u64,
    /// Shared currency, or `None` when empty or mixed.
    pub currency: Option<Currency>,
}

impl TeamSummary {
    /// An all-zero summary.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            agent_count: 0,
            agents_on_track: 0,
            total_team_goal: Decimal::ZERO,
            total_team_income: Decimal::ZERO,
            avg_progress: Decimal::ZERO,
            total_prospecting_needed: Decimal::ZERO,
            total_puntas_closed: 0,
            currency: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_weeks_are_fractional() {
        let window = DateWindow {
            start: date(2026, 1, 1),
            end: date(2026, 1, 11),
        };
        assert_eq!(window.days(), 10);
        assert_eq!(window.weeks().round_dp(4), dec!(1.4286));
    }

    #[test]
    fn test_inverted_window_has_zero_days() {
        let window = DateWindow {
            start: date(2026, 3, 1),
            end: date(2026, 2, 1),
        };
        assert_eq!(window.days(), 0);
        assert_eq!(window.weeks(), Decimal::ZERO);
    }

    #[test]
    fn test_actuals_deserialize_with_defaults() {
        let actuals: ActualsSnapshot =
            serde_json::from_str(r#"{"actualGrossIncome": "1500.50", "actualPuntasCount": 2}"#)
                .unwrap();
        assert_eq!(actuals.actual_gross_income, dec!(1500.50));
        assert_eq!(actuals.actual_puntas_count, 2);
        assert_eq!(actuals.elapsed_fraction_of_year, Decimal::ONE);
    }

    #[test]
    fn test_goal_input_accepts_partial_json() {
        let input: GoalInput = serde_json::from_str(
            r#"{"annualBillingGoal": 120000, "listingsGoalStartDate": "2026-01-01"}"#,
        )
        .unwrap();
        assert_eq!(input.annual_billing_goal, Some(dec!(120000)));
        assert_eq!(input.listings_goal_start_date, Some(date(2026, 1, 1)));
        assert!(input.listings_goal_end_date.is_none());
    }

    #[test]
    fn test_empty_team_summary_is_zero() {
        let summary = TeamSummary::empty();
        assert_eq!(summary.agent_count, 0);
        assert_eq!(summary.avg_progress, Decimal::ZERO);
        assert!(summary.currency.is_none());
    }
}
