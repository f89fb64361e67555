//! JSON workbook of agents and an in-memory store backing the goal service.

use std::path::Path;

use chrono::NaiveDate;
use dashmap::DashMap;
use goalpace_core::fiscal::PlanYear;
use goalpace_core::goals::{
    ActualsSnapshot, ActualsSource, CollaboratorError, GoalInput, GoalPlan, GoalPlanStore,
};
use goalpace_shared::types::{AgentId, OrganizationId};
use goalpace_shared::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;

/// A year of goals and actuals for a set of agents.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workbook {
    /// Plan year.
    pub year: i32,
    /// Organization the agents belong to.
    #[serde(default)]
    pub organization_id: Option<OrganizationId>,
    /// Agents in the workbook.
    pub agents: Vec<AgentEntry>,
}

/// One agent's raw goal and actuals.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentEntry {
    /// Agent ID.
    pub agent_id: AgentId,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Raw goal as typed in the goal form.
    pub plan: GoalInput,
    /// Observed performance, if any has been recorded.
    #[serde(default)]
    pub actuals: Option<ActualsSnapshot>,
}

impl Workbook {
    /// Reads a workbook from a JSON file.
    pub fn from_path(path: &Path) -> AppResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| AppError::Input(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    /// Parses a workbook from JSON text.
    pub fn from_json(raw: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// IDs of all agents, in workbook order.
    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.iter().map(|agent| agent.agent_id).collect()
    }

    /// Overrides every snapshot's elapsed fraction with the share of the
    /// plan year elapsed at `as_of`.
    ///
    /// Returns the fraction applied. A date outside the plan year is clamped
    /// to its first or last day.
    pub fn rebase_elapsed(&mut self, as_of: NaiveDate) -> AppResult<Decimal> {
        let plan_year = PlanYear::new(self.year)
            .ok_or_else(|| AppError::Input(format!("unsupported year {}", self.year)))?;
        if !plan_year.contains_date(as_of) {
            warn!(
                year = self.year,
                %as_of,
                "As-of date falls outside the plan year; elapsed fraction is clamped"
            );
        }
        let fraction = plan_year.elapsed_fraction(as_of);
        for agent in &mut self.agents {
            agent
                .actuals
                .get_or_insert_with(ActualsSnapshot::empty)
                .elapsed_fraction_of_year = fraction;
        }
        Ok(fraction)
    }
}

/// In-memory plan store and actuals source.
#[derive(Debug, Default)]
pub struct MemoryStore {
    plans: DashMap<(AgentId, i32), GoalPlan>,
    actuals: DashMap<(AgentId, i32), ActualsSnapshot>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records actuals for an agent-year.
    pub fn put_actuals(&self, agent: AgentId, year: i32, actuals: ActualsSnapshot) {
        self.actuals.insert((agent, year), actuals);
    }
}

impl GoalPlanStore for MemoryStore {
    fn get_plan(&self, agent: AgentId, year: i32) -> Result<Option<GoalPlan>, CollaboratorError> {
        Ok(self.plans.get(&(agent, year)).map(|plan| plan.clone()))
    }

    fn upsert_plan(
        &self,
        agent: AgentId,
        year: i32,
        plan: &GoalPlan,
    ) -> Result<(), CollaboratorError> {
        self.plans.insert((agent, year), plan.clone());
        Ok(())
    }
}

impl ActualsSource for MemoryStore {
    fn actuals_for(
        &self,
        agent: AgentId,
        year: i32,
    ) -> Result<Option<ActualsSnapshot>, CollaboratorError> {
        Ok(self.actuals.get(&(agent, year)).map(|actuals| actuals.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const WORKBOOK: &str = r#"{
        "year": 2026,
        "agents": [
            {
                "agentId": "0190a5b2-6c1e-7d3a-9f00-000000000001",
                "name": "North office",
                "plan": {"annualBillingGoal": 120000, "averageTicketTarget": 200000},
                "actuals": {"actualGrossIncome": 30000, "elapsedFractionOfYear": 0.5}
            },
            {
                "agentId": "0190a5b2-6c1e-7d3a-9f00-000000000002",
                "plan": {"annualBillingGoal": 80000}
            }
        ]
    }"#;

    #[test]
    fn test_parse_workbook() {
        let workbook = Workbook::from_json(WORKBOOK).unwrap();

        assert_eq!(workbook.year, 2026);
        assert_eq!(workbook.agents.len(), 2);
        assert_eq!(workbook.agents[0].name.as_deref(), Some("North office"));
        assert!(workbook.agents[1].actuals.is_none());
        assert_eq!(workbook.agent_ids().len(), 2);
    }

    #[test]
    fn test_malformed_workbook_is_input_error() {
        let err = Workbook::from_json("{\"year\": ").unwrap_err();
        assert!(matches!(err, AppError::Input(_)));
    }

    #[test]
    fn test_rebase_elapsed_fills_missing_actuals() {
        let mut workbook = Workbook::from_json(WORKBOOK).unwrap();
        workbook
            .rebase_elapsed(NaiveDate::from_ymd_opt(2026, 12, 31).unwrap())
            .unwrap();

        for agent in &workbook.agents {
            let actuals = agent.actuals.as_ref().unwrap();
            assert_eq!(actuals.elapsed_fraction_of_year, Decimal::ONE);
        }
        assert_eq!(
            workbook.agents[0].actuals.as_ref().unwrap().actual_gross_income,
            dec!(30000)
        );
    }

    #[test]
    fn test_rebase_elapsed_outside_plan_year_is_clamped() {
        let mut workbook = Workbook::from_json(WORKBOOK).unwrap();

        let after = workbook
            .rebase_elapsed(NaiveDate::from_ymd_opt(2027, 2, 1).unwrap())
            .unwrap();
        assert_eq!(after, Decimal::ONE);

        let before = workbook
            .rebase_elapsed(NaiveDate::from_ymd_opt(2025, 11, 30).unwrap())
            .unwrap();
        assert_eq!(before, Decimal::ONE / Decimal::from(365));
        assert_eq!(
            workbook.agents[1].actuals.as_ref().unwrap().elapsed_fraction_of_year,
            before
        );
    }

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        let agent = AgentId::new();
        let actuals = ActualsSnapshot {
            actual_puntas_count: 4,
            ..ActualsSnapshot::empty()
        };

        store.put_actuals(agent, 2026, actuals.clone());

        assert_eq!(store.actuals_for(agent, 2026).unwrap(), Some(actuals));
        assert_eq!(store.actuals_for(agent, 2025).unwrap(), None);
        assert_eq!(store.get_plan(agent, 2026).unwrap(), None);
    }
}
