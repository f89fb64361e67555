//! Goal service over the plan store and actuals collaborators.
//!
//! This is the imperative shell around [`GoalEngine`]: it fetches plans and
//! actuals for an agent-year and hands them to the engine. Both the preview
//! and the dashboard flow end in the same [`GoalEngine::evaluate`] call.

use std::sync::Arc;

use goalpace_shared::AppError;
use goalpace_shared::types::{AgentId, OrganizationId};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use super::engine::GoalEngine;
use super::error::InvalidPlanError;
use super::types::{ActualsSnapshot, GoalInput, GoalPlan, GoalReport, TeamSummary};

/// Failure reported by a plan store or actuals source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CollaboratorError(pub String);

/// Goal service errors.
#[derive(Debug, Error)]
pub enum GoalServiceError {
    /// The submitted goal is structurally invalid.
    #[error(transparent)]
    InvalidPlan(#[from] InvalidPlanError),

    /// A collaborator failed.
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),
}

impl From<GoalServiceError> for AppError {
    fn from(err: GoalServiceError) -> Self {
        match err {
            GoalServiceError::InvalidPlan(inner) => Self::Validation(inner.to_string()),
            GoalServiceError::Collaborator(inner) => Self::ExternalService(inner.0),
        }
    }
}

/// Persistent goal plans keyed by agent and year.
#[cfg_attr(test, mockall::automock)]
pub trait GoalPlanStore: Send + Sync {
    /// Returns the plan for the agent-year, if one exists.
    fn get_plan(&self, agent: AgentId, year: i32) -> Result<Option<GoalPlan>, CollaboratorError>;

    /// Creates or replaces the plan for the agent-year.
    fn upsert_plan(
        &self,
        agent: AgentId,
        year: i32,
        plan: &GoalPlan,
    ) -> Result<(), CollaboratorError>;
}

/// Source of observed performance, aggregated from billing and CRM records.
#[cfg_attr(test, mockall::automock)]
pub trait ActualsSource: Send + Sync {
    /// Returns the snapshot for the agent-year as of now, if any activity exists.
    fn actuals_for(
        &self,
        agent: AgentId,
        year: i32,
    ) -> Result<Option<ActualsSnapshot>, CollaboratorError>;
}

/// Report for one agent-year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentGoalReport {
    /// Agent the report belongs to.
    pub agent_id: AgentId,
    /// Plan year.
    pub year: i32,
    /// Plan the report was computed from.
    pub plan: GoalPlan,
    /// Actuals the report was computed from.
    pub actuals: ActualsSnapshot,
    /// Computed figures.
    pub report: GoalReport,
}

/// Report for a set of agents sharing a year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamReport {
    /// Plan year.
    pub year: i32,
    /// Organization the agents belong to, if scoped.
    pub organization_id: Option<OrganizationId>,
    /// Individual reports for agents that have a plan.
    pub members: Vec<AgentGoalReport>,
    /// Roll-up of the members' progress.
    pub summary: TeamSummary,
}

/// Goal service.
pub struct GoalService<P: GoalPlanStore, A: ActualsSource> {
    plans: Arc<P>,
    actuals: Arc<A>,
    engine: GoalEngine,
}

impl<P: GoalPlanStore, A: ActualsSource> GoalService<P, A> {
    /// Creates a new goal service.
    pub fn new(plans: Arc<P>, actuals: Arc<A>, engine: GoalEngine) -> Self {
        Self {
            plans,
            actuals,
            engine,
        }
    }

    /// Returns the engine used by this service.
    pub const fn engine(&self) -> &GoalEngine {
        &self.engine
    }

    /// Dashboard view: persisted plan with current actuals.
    ///
    /// Returns `None` when the agent has no plan for the year.
    pub fn dashboard(
        &self,
        agent: AgentId,
        year: i32,
    ) -> Result<Option<AgentGoalReport>, GoalServiceError> {
        let Some(plan) = self.plans.get_plan(agent, year)? else {
            debug!(%agent, year, "No goal plan found");
            return Ok(None);
        };
        let actuals = self.current_actuals(agent, year)?;
        Ok(Some(self.report(agent, year, plan, actuals)))
    }

    /// Preview: a provisional, unsaved goal with the persisted actuals.
    pub fn preview(
        &self,
        agent: AgentId,
        year: i32,
        input: &GoalInput,
    ) -> Result<AgentGoalReport, GoalServiceError> {
        let plan = self.engine.normalize(input)?;
        let actuals = self.current_actuals(agent, year)?;
        Ok(self.report(agent, year, plan, actuals))
    }

    /// Validates and persists a goal.
    pub fn save_plan(
        &self,
        agent: AgentId,
        year: i32,
        input: &GoalInput,
    ) -> Result<GoalPlan, GoalServiceError> {
        let plan = self.engine.normalize(input)?;
        self.plans.upsert_plan(agent, year, &plan)?;
        info!(%agent, year, "Goal plan saved");
        Ok(plan)
    }

    /// Team view over the given agents. Agents without a plan are skipped.
    pub fn team(
        &self,
        agents: &[AgentId],
        year: i32,
        organization_id: Option<OrganizationId>,
    ) -> Result<TeamReport, GoalServiceError> {
        let mut members = Vec::with_capacity(agents.len());
        for agent in agents {
            if let Some(report) = self.dashboard(*agent, year)? {
                members.push(report);
            }
        }

        let progress: Vec<_> = members
            .iter()
            .map(|member| member.report.progress.clone())
            .collect();
        let summary = self.engine.aggregate(&progress);

        debug!(
            year,
            requested = agents.len(),
            with_plan = members.len(),
            "Team goal report built"
        );

        Ok(TeamReport {
            year,
            organization_id,
            members,
            summary,
        })
    }

    fn current_actuals(
        &self,
        agent: AgentId,
        year: i32,
    ) -> Result<ActualsSnapshot, GoalServiceError> {
        Ok(self.actuals.actuals_for(agent, year)?.unwrap_or_else(|| {
            debug!(%agent, year, "No actuals found, using empty snapshot");
            ActualsSnapshot::empty()
        }))
    }

    fn report(
        &self,
        agent: AgentId,
        year: i32,
        plan: GoalPlan,
        actuals: ActualsSnapshot,
    ) -> AgentGoalReport {
        let report = self.engine.evaluate(&plan, &actuals);
        AgentGoalReport {
            agent_id: agent,
            year,
            plan,
            actuals,
            report,
        }
    }
}
