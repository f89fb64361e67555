//! Goalpace goal simulator
//!
//! Loads a workbook of agent goals and actuals, then prints dashboard,
//! preview or team reports as JSON.

mod workbook;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use goalpace_core::goals::{GoalEngine, GoalInput, GoalService};
use goalpace_shared::types::AgentId;
use goalpace_shared::{AppConfig, AppError};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use workbook::{MemoryStore, Workbook};

/// Goal progress and listing funnel simulator.
#[derive(Debug, Parser)]
#[command(name = "goalsim", version, about)]
struct Cli {
    /// Workbook JSON with agents, raw goals and actuals.
    #[arg(long, short, env = "GOALPACE_WORKBOOK")]
    workbook: PathBuf,

    /// Extra configuration file layered over config/default.
    #[arg(long)]
    config: Option<String>,

    /// Recompute elapsed fraction of the year as of this date (YYYY-MM-DD).
    #[arg(long)]
    as_of: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Dashboard report for one agent's saved goal.
    Agent {
        /// Agent ID.
        agent: AgentId,
    },
    /// Preview an unsaved goal against the agent's actuals.
    Preview {
        /// Agent ID.
        agent: AgentId,
        /// JSON file with the provisional goal.
        #[arg(long)]
        plan: PathBuf,
    },
    /// Team report over every agent in the workbook.
    Team,
}

type Service = GoalService<MemoryStore, MemoryStore>;

fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing on stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "goalpace_core=info,goalsim=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let message = format!("{err:#}");
            let app = into_app_error(err);
            error!(code = app.error_code(), "{message}");
            ExitCode::from(app.exit_code())
        }
    }
}

/// Recovers the [`AppError`] behind a failure; anything else is internal.
fn into_app_error(err: anyhow::Error) -> AppError {
    err.downcast::<AppError>()
        .unwrap_or_else(|other| AppError::Internal(format!("{other:#}")))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load_from(cli.config.as_deref()).map_err(AppError::from)?;
    let engine = GoalEngine::new(&config.engine);

    let mut workbook = Workbook::from_path(&cli.workbook)?;
    if let Some(as_of) = cli.as_of {
        let fraction = workbook.rebase_elapsed(as_of)?;
        info!(%as_of, %fraction, "Elapsed fraction rebased");
    }

    let store = Arc::new(MemoryStore::new());
    let service = GoalService::new(Arc::clone(&store), Arc::clone(&store), engine);
    load(&service, &store, &workbook)?;
    info!(
        year = workbook.year,
        agents = workbook.agents.len(),
        "Workbook loaded"
    );

    match cli.command {
        Command::Agent { agent } => {
            let report = service
                .dashboard(agent, workbook.year)
                .map_err(AppError::from)?
                .ok_or_else(|| AppError::NotFound(format!("goal plan for agent {agent}")))?;
            print_json(&report)
        }
        Command::Preview { agent, plan } => {
            let raw = std::fs::read_to_string(&plan)
                .map_err(|e| AppError::Input(format!("{}: {e}", plan.display())))?;
            let input: GoalInput = serde_json::from_str(&raw).map_err(AppError::from)?;
            let report = service
                .preview(agent, workbook.year, &input)
                .map_err(AppError::from)?;
            print_json(&report)
        }
        Command::Team => {
            let report = service
                .team(&workbook.agent_ids(), workbook.year, workbook.organization_id)
                .map_err(AppError::from)?;
            print_json(&report)
        }
    }
}

/// Saves every workbook goal through the service and records actuals.
fn load(service: &Service, store: &MemoryStore, workbook: &Workbook) -> anyhow::Result<()> {
    for entry in &workbook.agents {
        let label = entry
            .name
            .clone()
            .unwrap_or_else(|| entry.agent_id.to_string());
        service
            .save_plan(entry.agent_id, workbook.year, &entry.plan)
            .map_err(AppError::from)
            .with_context(|| format!("goal for {label}"))?;
        if let Some(actuals) = &entry.actuals {
            store.put_actuals(entry.agent_id, workbook.year, actuals.clone());
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(AppError::from)?;
    println!("{json}");
    Ok(())
}
