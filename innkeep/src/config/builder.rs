//! Layered configuration assembly.

use std::path::{Path, PathBuf};

use rust_decimal::Decimal;

use crate::config::environment::EnvironmentConfig;
use crate::config::loader::ConfigLoader;
use crate::config::merger::ConfigMerger;
use crate::config::schema::{Config, DashboardConfig, DatabaseSettings, PricingConfig};
use crate::config::validator::ConfigValidator;
use crate::error::Result;

/// Builds a [`Config`] from defaults, the data-directory file, the
/// environment and programmatic overrides, in increasing precedence.
///
/// # Examples
///
/// ```
/// use innkeep::config::ConfigBuilder;
/// use rust_decimal::Decimal;
///
/// let config = ConfigBuilder::new()
///     .skip_files()
///     .skip_env()
///     .with_default_tax_rate(Decimal::from(10))
///     .build()
///     .unwrap();
/// assert_eq!(config.default_tax_rate(), Decimal::from(10));
/// ```
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    data_dir: Option<PathBuf>,
    skip_files: bool,
    skip_env: bool,
    overrides: Config,
}

impl ConfigBuilder {
    /// Creates a builder that reads the default data directory and environment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `config.yaml` from `dir` instead of the default data directory.
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Ignores configuration files.
    #[must_use]
    pub const fn skip_files(mut self) -> Self {
        self.skip_files = true;
        self
    }

    /// Ignores `INNKEEP_*` environment variables.
    #[must_use]
    pub const fn skip_env(mut self) -> Self {
        self.skip_env = true;
        self
    }

    /// Merges a whole configuration as the highest-precedence layer.
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        ConfigMerger::merge_into(&mut self.overrides, &config);
        self
    }

    /// Overrides the default tax percent.
    #[must_use]
    pub fn with_default_tax_rate(mut self, rate: Decimal) -> Self {
        self.overrides
            .pricing
            .get_or_insert_with(PricingConfig::default)
            .default_tax_rate = Some(rate);
        self
    }

    /// Overrides the busy timeout.
    #[must_use]
    pub fn with_busy_timeout(mut self, seconds: u64) -> Self {
        self.overrides
            .database
            .get_or_insert_with(DatabaseSettings::default)
            .busy_timeout_seconds = Some(seconds);
        self
    }

    /// Overrides the dashboard window.
    #[must_use]
    pub fn with_dashboard_days(mut self, days: u32) -> Self {
        self.overrides
            .dashboard
            .get_or_insert_with(DashboardConfig::default)
            .default_days = Some(days);
        self
    }

    /// Assembles and validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be parsed, an environment value is
    /// malformed, or the merged result fails validation.
    pub fn build(self) -> Result<Config> {
        let mut config = Config::default();

        if !self.skip_files {
            if let Some(source) = ConfigLoader::load_user_config(self.data_dir.as_deref())? {
                ConfigMerger::merge_into(&mut config, &source.config);
            }
        }

        if !self.skip_env {
            EnvironmentConfig::apply_overrides(&mut config)?;
        }

        ConfigMerger::merge_into(&mut config, &self.overrides);
        ConfigValidator::validate(&config)?;
        Ok(config)
    }
}
