//! Listing acquisition funnel projection.

use rust_decimal::Decimal;

use super::arith::{ceil_count, percent_of, product, ratio};
use super::types::{ActualsSnapshot, FunnelReport, GoalPlan};

/// Projects the prelisting activity a listings goal requires.
#[derive(Debug, Clone, Copy)]
pub struct FunnelProjector {
    safety_margin: Decimal,
}

impl FunnelProjector {
    /// Creates a projector with the given minimum-listings safety margin.
    #[must_use]
    pub const fn new(safety_margin: Decimal) -> Self {
        Self { safety_margin }
    }

    /// Returns the multiplier applied to active listings for the floor.
    #[must_use]
    pub const fn safety_margin(&self) -> Decimal {
        self.safety_margin
    }

    /// Returns `None` when the plan has no listings goal, even if a window
    /// is configured.
    #[must_use]
    pub fn project(&self, plan: &GoalPlan, actuals: &ActualsSnapshot) -> Option<FunnelReport> {
        if !plan.has_listings_goal() {
            return None;
        }

        let listings = Decimal::from(plan.listings_goal_annual);
        let conversion = percent_of(Decimal::ONE, plan.pl_to_listing_conversion_target);
        let required_prelistings_annual = ceil_count(ratio(listings, conversion));

        let weeks_in_window = plan
            .listings_window
            .map_or_else(|| Decimal::from(plan.working_weeks), |window| window.weeks());
        let required_prelistings_weekly =
            ratio(Decimal::from(required_prelistings_annual), weeks_in_window);

        let minimum_listings_required = ceil_count(product(
            Decimal::from(actuals.actual_active_listings_count),
            self.safety_margin,
        ));

        Some(FunnelReport {
            listings_goal_annual: plan.listings_goal_annual,
            pl_to_listing_conversion_target: plan.pl_to_listing_conversion_target,
            window: plan.listings_window,
            weeks_in_window,
            required_prelistings_annual,
            required_prelistings_weekly,
            minimum_listings_required,
            weekly_critical_activities_count: actuals.weekly_critical_activities_count,
        })
    }
}

impl Default for FunnelProjector {
    fn default() -> Self {
        Self::new(Decimal::ONE)
    }
}
