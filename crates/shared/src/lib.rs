//! Shared types, errors, and configuration for Goalpace.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes carried by goal plans and reports
//! - Typed IDs for agents and organizations
//! - Application-wide error types
//! - Configuration management (engine policy values)

pub mod config;
pub mod error;
pub mod types;

pub use crate::config::{AppConfig, EngineConfig, GoalDefaults};
pub use crate::error::{AppError, AppResult};
