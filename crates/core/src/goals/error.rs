//! Goal error types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Goal plan fields that can be rejected during normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanField {
    /// Annual gross commission target.
    AnnualBillingGoal,
    /// Monthly living expenses.
    MonthlyLivingExpenses,
    /// Average ticket (property price) target.
    AverageTicketTarget,
    /// Average commission percentage.
    AverageCommissionTarget,
    /// Plan currency.
    Currency,
    /// Agent's share of gross commission.
    SplitPercentage,
    /// Prospecting activities per closed deal.
    ConversionRate,
    /// Working weeks per year.
    WorkingWeeks,
    /// Annual listings acquisition goal.
    ListingsGoalAnnual,
    /// Prelisting to listing conversion percentage.
    PlToListingConversionTarget,
    /// Start of the custom listings window.
    ListingsGoalStartDate,
    /// End of the custom listings window.
    ListingsGoalEndDate,
}

impl std::fmt::Display for PlanField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::AnnualBillingGoal => "annualBillingGoal",
            Self::MonthlyLivingExpenses => "monthlyLivingExpenses",
            Self::AverageTicketTarget => "averageTicketTarget",
            Self::AverageCommissionTarget => "averageCommissionTarget",
            Self::Currency => "currency",
            Self::SplitPercentage => "splitPercentage",
            Self::ConversionRate => "conversionRate",
            Self::WorkingWeeks => "workingWeeks",
            Self::ListingsGoalAnnual => "listingsGoalAnnual",
            Self::PlToListingConversionTarget => "plToListingConversionTarget",
            Self::ListingsGoalStartDate => "listingsGoalStartDate",
            Self::ListingsGoalEndDate => "listingsGoalEndDate",
        };
        f.write_str(name)
    }
}

/// A structurally invalid goal plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPlanError {
    /// Money or count field is negative.
    #[error("{field} cannot be negative (got {value})")]
    Negative {
        /// Offending field.
        field: PlanField,
        /// Rejected value.
        value: Decimal,
    },

    /// Percentage or count outside its allowed range.
    #[error("{field} must be within {range} (got {value})")]
    OutOfRange {
        /// Offending field.
        field: PlanField,
        /// Human-readable allowed range, e.g. `[0, 100]`.
        range: &'static str,
        /// Rejected value.
        value: Decimal,
    },

    /// Currency code is not supported.
    #[error("currency is not supported: {0}")]
    UnknownCurrency(String),

    /// Only one of the listings window dates was provided.
    #[error("{missing} is required when {present} is set")]
    IncompleteWindow {
        /// The date that was provided.
        present: PlanField,
        /// The date that is missing.
        missing: PlanField,
    },

    /// Listings window ends before it starts.
    #[error("listingsGoalEndDate {end} precedes listingsGoalStartDate {start}")]
    InvertedWindow {
        /// Window start.
        start: NaiveDate,
        /// Window end.
        end: NaiveDate,
    },
}

impl InvalidPlanError {
    /// Returns the field responsible for the rejection.
    #[must_use]
    pub const fn field(&self) -> PlanField {
        match self {
            Self::Negative { field, .. } | Self::OutOfRange { field, .. } => *field,
            Self::UnknownCurrency(_) => PlanField::Currency,
            Self::IncompleteWindow { missing, .. } => *missing,
            Self::InvertedWindow { .. } => PlanField::ListingsGoalEndDate,
        }
    }
}
