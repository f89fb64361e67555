//! Goal engine for Goalpace.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Plans and actuals arrive from collaborators behind traits; everything else
//! is deterministic arithmetic over `Decimal`.
//!
//! # Modules
//!
//! - `goals` - Goal normalization, progress, listing funnel and team roll-ups
//! - `fiscal` - Plan year calendar helpers

pub mod fiscal;
pub mod goals;
