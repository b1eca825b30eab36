//! Environment variable handling for configuration overrides.
//!
//! `INNKEEP_*` variables override values from the configuration file.

use std::env;
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::config::schema::{Config, DashboardConfig, DatabaseSettings, PricingConfig};
use crate::error::{Error, Result};

/// Tax percent override.
pub const DEFAULT_TAX_RATE_ENV: &str = "INNKEEP_DEFAULT_TAX_RATE";
/// Busy timeout override (seconds).
pub const BUSY_TIMEOUT_ENV: &str = "INNKEEP_BUSY_TIMEOUT";
/// Dashboard window override (days).
pub const DASHBOARD_DAYS_ENV: &str = "INNKEEP_DASHBOARD_DAYS";
/// Auto-initialization switch.
pub const DISABLE_AUTOINIT_ENV: &str = "INNKEEP_DISABLE_AUTOINIT";

/// Applies environment variable overrides.
///
/// # Examples
///
/// ```no_run
/// use innkeep::config::{Config, EnvironmentConfig};
///
/// let mut config = Config::default();
/// EnvironmentConfig::apply_overrides(&mut config).unwrap();
/// ```
pub struct EnvironmentConfig;

impl EnvironmentConfig {
    /// Apply every recognised `INNKEEP_*` variable to `config`.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the variable when a value does not
    /// parse.
    pub fn apply_overrides(config: &mut Config) -> Result<()> {
        if let Ok(val) = env::var(DEFAULT_TAX_RATE_ENV) {
            let rate = Decimal::from_str(val.trim()).map_err(|_| Error::Validation {
                field: DEFAULT_TAX_RATE_ENV.into(),
                message: format!("invalid tax rate: '{val}'"),
            })?;
            config
                .pricing
                .get_or_insert_with(PricingConfig::default)
                .default_tax_rate = Some(rate);
        }

        if let Ok(val) = env::var(BUSY_TIMEOUT_ENV) {
            let seconds = val.trim().parse().map_err(|_| Error::Validation {
                field: BUSY_TIMEOUT_ENV.into(),
                message: "Must be a positive integer".into(),
            })?;
            config
                .database
                .get_or_insert_with(DatabaseSettings::default)
                .busy_timeout_seconds = Some(seconds);
        }

        if let Ok(val) = env::var(DASHBOARD_DAYS_ENV) {
            let days = val.trim().parse().map_err(|_| Error::Validation {
                field: DASHBOARD_DAYS_ENV.into(),
                message: "Must be a positive integer".into(),
            })?;
            config
                .dashboard
                .get_or_insert_with(DashboardConfig::default)
                .default_days = Some(days);
        }

        if let Ok(val) = env::var(DISABLE_AUTOINIT_ENV) {
            config.disable_autoinit = Some(Self::parse_bool(DISABLE_AUTOINIT_ENV, &val)?);
        }

        Ok(())
    }

    /// Accepts true/1/yes/on and false/0/no/off, case-insensitively.
    fn parse_bool(field: &str, s: &str) -> Result<bool> {
        match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(Error::Validation {
                field: field.into(),
                message: format!("Invalid boolean value: '{s}'"),
            }),
        }
    }
}
