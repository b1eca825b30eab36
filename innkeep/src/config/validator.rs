//! Configuration validation.

use rust_decimal::Decimal;

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Validates a merged configuration.
///
/// # Examples
///
/// ```
/// use innkeep::config::{Config, ConfigValidator};
///
/// ConfigValidator::validate(&Config::default()).unwrap();
/// ```
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate every section that is present.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a tax rate outside `[0, 100]`, a zero
    /// busy timeout, a zero dashboard window or an empty currency.
    pub fn validate(config: &Config) -> Result<()> {
        if let Some(ref pricing) = config.pricing {
            if let Some(rate) = pricing.default_tax_rate {
                Self::validate_tax_rate("pricing.default_tax_rate", rate)?;
            }
            if let Some(ref currency) = pricing.currency {
                if currency.trim().is_empty() {
                    return Err(Error::Validation {
                        field: "pricing.currency".into(),
                        message: "Cannot be empty or only whitespace".into(),
                    });
                }
            }
        }

        if let Some(ref database) = config.database {
            if database.busy_timeout_seconds == Some(0) {
                return Err(Error::Validation {
                    field: "database.busy_timeout_seconds".into(),
                    message: "Timeout must be greater than 0".into(),
                });
            }
        }

        if let Some(ref dashboard) = config.dashboard {
            if dashboard.default_days == Some(0) {
                return Err(Error::Validation {
                    field: "dashboard.default_days".into(),
                    message: "Must be at least one day".into(),
                });
            }
        }

        Ok(())
    }

    /// Tax percentages must lie in `[0, 100]`.
    ///
    /// # Errors
    ///
    /// Returns a validation error on `field` otherwise.
    pub fn validate_tax_rate(field: &str, rate: Decimal) -> Result<()> {
        if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
            return Err(Error::Validation {
                field: field.into(),
                message: format!("tax rate {rate} must be between 0 and 100"),
            });
        }
        Ok(())
    }
}
