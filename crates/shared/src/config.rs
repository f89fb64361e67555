//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::Currency;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Goal engine policy values.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// Goal engine policy configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Defaults applied to goal inputs that leave a field blank.
    #[serde(default)]
    pub defaults: GoalDefaults,
    /// Multiplier applied to active listings to get the minimum listings floor.
    #[serde(default = "default_listings_safety_margin")]
    pub listings_safety_margin: Decimal,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            defaults: GoalDefaults::default(),
            listings_safety_margin: default_listings_safety_margin(),
        }
    }
}

fn default_listings_safety_margin() -> Decimal {
    Decimal::ONE
}

/// Defaults for goal plan fields the agent left blank.
#[derive(Debug, Clone, Deserialize)]
pub struct GoalDefaults {
    /// Agent's share of gross commission, in percent.
    #[serde(default = "default_split_percentage")]
    pub split_percentage: Decimal,
    /// Prospecting activities consumed per closed deal.
    #[serde(default = "default_conversion_rate")]
    pub conversion_rate: Decimal,
    /// Working weeks per year.
    #[serde(default = "default_working_weeks")]
    pub working_weeks: u32,
    /// Average commission per deal, in percent of the ticket.
    #[serde(default = "default_average_commission_target")]
    pub average_commission_target: Decimal,
    /// Plan currency.
    #[serde(default)]
    pub currency: Currency,
    /// Share of prelistings expected to turn into listings, in percent.
    #[serde(default = "default_pl_to_listing_conversion_target")]
    pub pl_to_listing_conversion_target: Decimal,
}

impl Default for GoalDefaults {
    fn default() -> Self {
        Self {
            split_percentage: default_split_percentage(),
            conversion_rate: default_conversion_rate(),
            working_weeks: default_working_weeks(),
            average_commission_target: default_average_commission_target(),
            currency: Currency::default(),
            pl_to_listing_conversion_target: default_pl_to_listing_conversion_target(),
        }
    }
}

fn default_split_percentage() -> Decimal {
    Decimal::from(50)
}

fn default_conversion_rate() -> Decimal {
    Decimal::from(6)
}

fn default_working_weeks() -> u32 {
    48
}

fn default_average_commission_target() -> Decimal {
    Decimal::from(3)
}

fn default_pl_to_listing_conversion_target() -> Decimal {
    Decimal::from(40)
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, layering an explicit file over the defaults.
    ///
    /// Precedence (lowest first): `config/default`, `config/{RUN_MODE}`,
    /// `extra_file`, then `GOALPACE__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `extra_file` is missing or any source is malformed.
    pub fn load_from(extra_file: Option<&str>) -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false));

        if let Some(path) = extra_file {
            builder = builder.add_source(config::File::with_name(path));
        }

        let config = builder
            .add_source(config::Environment::with_prefix("GOALPACE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
