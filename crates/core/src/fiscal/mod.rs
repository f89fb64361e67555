//! Plan year calendar handling.

pub mod period;

pub use period::PlanYear;
