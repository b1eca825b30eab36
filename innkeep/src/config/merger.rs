//! Configuration merging and precedence handling.

use crate::config::loader::ConfigSource;
use crate::config::schema::{Config, DashboardConfig, DatabaseSettings, PricingConfig};

/// Merges configuration layers according to precedence rules.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigMerger, DashboardConfig};
///
/// let low = Config {
///     dashboard: Some(DashboardConfig { default_days: Some(30) }),
///     ..Default::default()
/// };
/// let high = Config {
///     dashboard: Some(DashboardConfig { default_days: Some(7) }),
///     ..Default::default()
/// };
///
/// let mut result = low;
/// ConfigMerger::merge_into(&mut result, &high);
/// assert_eq!(result.dashboard_days(), 7);
/// ```
pub struct ConfigMerger;

impl ConfigMerger {
    /// Merge sources ordered from lowest to highest precedence.
    #[must_use]
    pub fn merge(sources: Vec<ConfigSource>) -> Config {
        let mut result = Config::default();
        for source in sources {
            Self::merge_into(&mut result, &source.config);
        }
        result
    }

    /// Merge `source` into `target`, field by field; `Some` wins.
    pub fn merge_into(target: &mut Config, source: &Config) {
        if source.disable_autoinit.is_some() {
            target.disable_autoinit = source.disable_autoinit;
        }

        if let Some(ref pricing) = source.pricing {
            let merged = target.pricing.get_or_insert_with(PricingConfig::default);
            if pricing.default_tax_rate.is_some() {
                merged.default_tax_rate = pricing.default_tax_rate;
            }
            if pricing.currency.is_some() {
                merged.currency.clone_from(&pricing.currency);
            }
        }

        if let Some(ref database) = source.database {
            let merged = target.database.get_or_insert_with(DatabaseSettings::default);
            if database.busy_timeout_seconds.is_some() {
                merged.busy_timeout_seconds = database.busy_timeout_seconds;
            }
        }

        if let Some(ref dashboard) = source.dashboard {
            let merged = target.dashboard.get_or_insert_with(DashboardConfig::default);
            if dashboard.default_days.is_some() {
                merged.default_days = dashboard.default_days;
            }
        }
    }
}
