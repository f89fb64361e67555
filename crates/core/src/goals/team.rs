//! Team-level roll-up of progress reports.

use rust_decimal::Decimal;
use tracing::warn;

use super::arith::{product, ratio, sum};
use super::types::{ProgressReport, TeamSummary};

/// Folds many [`ProgressReport`]s into a [`TeamSummary`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamAggregator;

impl TeamAggregator {
    /// Creates a new team aggregator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Aggregates `reports`.
    ///
    /// Average progress is weighted by goal size (total income over total
    /// goal), not the mean of individual percentages. An empty slice yields
    /// an all-zero summary. Totals saturate at `Decimal::MAX`.
    #[must_use]
    pub fn aggregate(&self, reports: &[ProgressReport]) -> TeamSummary {
        let Some(first) = reports.first() else {
            return TeamSummary::empty();
        };

        let mut summary = TeamSummary::empty();
        let mut mixed_currency = false;

        for report in reports {
            summary.agent_count = summary.agent_count.saturating_add(1);
            if report.is_on_track() {
                summary.agents_on_track = summary.agents_on_track.saturating_add(1);
            }
            summary.total_team_goal = sum(summary.total_team_goal, report.annual_billing_goal);
            summary.total_team_income = sum(summary.total_team_income, report.actual_gross_income);
            summary.total_prospecting_needed =
                sum(summary.total_prospecting_needed, report.remaining_prospecting);
            summary.total_puntas_closed = summary
                .total_puntas_closed
                .saturating_add(u64::from(report.actual_puntas_count));
            mixed_currency |= report.currency != first.currency;
        }

        summary.avg_progress = product(
            ratio(summary.total_team_income, summary.total_team_goal),
            Decimal::ONE_HUNDRED,
        );

        if mixed_currency {
            warn!(
                agents = summary.agent_count,
                "Team reports use mixed currencies; totals are summed without conversion"
            );
        } else {
            summary.currency = Some(first.currency);
        }

        summary
    }
}
