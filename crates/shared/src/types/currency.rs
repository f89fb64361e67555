//! Currency of a goal plan.
//!
//! The engine never converts between currencies. Every monetary figure in a
//! report is denominated in the currency of the plan it was computed from.

use serde::{Deserialize, Serialize};

/// Currencies a goal plan can be expressed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US Dollar
    #[default]
    Usd,
    /// The brokerage's local currency.
    Local,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Usd => write!(f, "USD"),
            Self::Local => write!(f, "LOCAL"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "USD" => Ok(Self::Usd),
            "LOCAL" => Ok(Self::Local),
            _ => Err(format!("Unknown currency: {s}")),
        }
    }
}
