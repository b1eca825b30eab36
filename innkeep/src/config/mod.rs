//! Configuration system for innkeep.
//!
//! Configuration is merged from several sources with the following
//! precedence (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_*`)
//! 2. Environment variables (`INNKEEP_*`)
//! 3. `config.yaml` in the data directory
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use innkeep::config::ConfigBuilder;
//!
//! let config = ConfigBuilder::new().build().unwrap();
//! println!("default tax: {}%", config.default_tax_rate());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource};
pub use merger::ConfigMerger;
pub use schema::{Config, DashboardConfig, DatabaseSettings, PricingConfig};
pub use validator::ConfigValidator;
