//! Engine configuration

use serde::Deserialize;

/// Tunables for the metrics engine
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// How many clients the top-customers ranking returns
    pub top_customer_limit: usize,
    /// Months one-time revenue is amortized over for the NRR figure
    pub one_time_amortization_months: u32,
    /// Months covered by the rolling MRR trend
    pub mrr_trend_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            top_customer_limit: 5,
            one_time_amortization_months: 12,
            mrr_trend_months: 6,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from `ANALYTICS_*` environment variables,
    /// falling back to defaults for anything unset
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default("top_customer_limit", defaults.top_customer_limit as i64)?
            .set_default(
                "one_time_amortization_months",
                defaults.one_time_amortization_months as i64,
            )?
            .set_default("mrr_trend_months", defaults.mrr_trend_months as i64)?
            .add_source(config::Environment::with_prefix("ANALYTICS"))
            .build()?
            .try_deserialize()
    }
}
