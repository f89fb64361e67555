//! Goal progress and listing funnel calculations.

mod arith;
pub mod engine;
pub mod error;
pub mod funnel;
pub mod normalizer;
pub mod progress;
pub mod service;
pub mod team;
pub mod types;


pub use engine::GoalEngine;
pub use error::{InvalidPlanError, PlanField};
pub use funnel::FunnelProjector;
pub use normalizer::GoalNormalizer;
pub use progress::ProgressCalculator;
pub use service::{
    ActualsSource, AgentGoalReport, CollaboratorError, GoalPlanStore, GoalService,
    GoalServiceError, TeamReport,
};
pub use team::TeamAggregator;
pub use types::{
    ActualsSnapshot, DateWindow, FunnelReport, GoalInput, GoalPlan, GoalReport,
    ListingsGoalStatus, PaceStatus, ProgressReport, TeamSummary,
};
