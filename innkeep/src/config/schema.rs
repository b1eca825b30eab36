//! Configuration schema definitions.
//!
//! Every field is optional so that layers (file, environment, programmatic)
//! can be merged; the accessors on [`Config`] supply the defaults.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default busy timeout for store write locks.
pub const DEFAULT_BUSY_TIMEOUT_SECONDS: u64 = 5;

/// Default trailing window for dashboard statistics.
pub const DEFAULT_DASHBOARD_DAYS: u32 = 30;

/// Default display currency.
pub const DEFAULT_CURRENCY: &str = "LKR";

/// Complete configuration structure.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, PricingConfig};
/// use rust_decimal::Decimal;
///
/// let config = Config {
///     pricing: Some(PricingConfig {
///         default_tax_rate: Some(Decimal::from(10)),
///         currency: None,
///     }),
///     ..Default::default()
/// };
/// assert_eq!(config.default_tax_rate(), Decimal::from(10));
/// assert_eq!(config.dashboard_days(), 30);
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Pricing defaults.
    pub pricing: Option<PricingConfig>,

    /// Store settings.
    pub database: Option<DatabaseSettings>,

    /// Dashboard settings.
    pub dashboard: Option<DashboardConfig>,

    /// Disable automatic database initialization.
    pub disable_autoinit: Option<bool>,
}

/// Pricing defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PricingConfig {
    /// Tax percent applied when a request carries none.
    pub default_tax_rate: Option<Decimal>,

    /// Currency code shown next to amounts.
    pub currency: Option<String>,
}

/// Store settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseSettings {
    /// Seconds to wait for the write lock before giving up.
    pub busy_timeout_seconds: Option<u64>,
}

/// Dashboard settings.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    /// Days in the trailing series when a request asks for none.
    pub default_days: Option<u32>,
}

impl Config {
    /// Tax percent used when a reservation request carries none.
    #[must_use]
    pub fn default_tax_rate(&self) -> Decimal {
        self.pricing
            .as_ref()
            .and_then(|p| p.default_tax_rate)
            .unwrap_or(Decimal::ZERO)
    }

    /// Display currency.
    #[must_use]
    pub fn currency(&self) -> &str {
        self.pricing
            .as_ref()
            .and_then(|p| p.currency.as_deref())
            .unwrap_or(DEFAULT_CURRENCY)
    }

    /// Busy timeout in seconds.
    #[must_use]
    pub fn busy_timeout_seconds(&self) -> u64 {
        self.database
            .as_ref()
            .and_then(|d| d.busy_timeout_seconds)
            .unwrap_or(DEFAULT_BUSY_TIMEOUT_SECONDS)
    }

    /// Dashboard window in days.
    #[must_use]
    pub fn dashboard_days(&self) -> u32 {
        self.dashboard
            .as_ref()
            .and_then(|d| d.default_days)
            .unwrap_or(DEFAULT_DASHBOARD_DAYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.default_tax_rate(), Decimal::ZERO);
        assert_eq!(config.currency(), "LKR");
        assert_eq!(config.busy_timeout_seconds(), 5);
        assert_eq!(config.dashboard_days(), 30);
    }

    #[test]
    fn test_complete_config() {
        let yaml = r"
pricing:
  default_tax_rate: 12.5
  currency: USD
database:
  busy_timeout_seconds: 10
dashboard:
  default_days: 7
disable_autoinit: true
";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.default_tax_rate(), Decimal::new(125, 1));
        assert_eq!(config.currency(), "USD");
        assert_eq!(config.busy_timeout_seconds(), 10);
        assert_eq!(config.dashboard_days(), 7);
        assert_eq!(config.disable_autoinit, Some(true));
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config: Config = serde_yaml::from_str("pricing:\n  currency: EUR\n").unwrap();
        assert_eq!(config.currency(), "EUR");
        assert_eq!(config.default_tax_rate(), Decimal::ZERO);
    }

    #[test]
    fn test_config_deny_unknown_fields() {
        let result: Result<Config, _> = serde_yaml::from_str("housekeeping:\n  interval: 5\n");
        assert!(result.is_err());

        let nested: Result<Config, _> = serde_yaml::from_str("pricing:\n  vat: 10\n");
        assert!(nested.is_err());
    }
}
