//! Configuration file loading.
//!
//! innkeep reads a single optional file, `config.yaml` in the data
//! directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::Config;
use crate::error::{Error, Result};

/// Name of the configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// A parsed configuration layer and where it came from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `<data_dir>/config.yaml` if it exists.
    ///
    /// Without an explicit `data_dir` the default data directory is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed, or
    /// if the home directory cannot be determined.
    pub fn load_user_config(data_dir: Option<&Path>) -> Result<Option<ConfigSource>> {
        let dir = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => crate::database::default_data_dir()?,
        };
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }

        let config = Self::load_file(&path)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(Some(ConfigSource {
            path,
            precedence: 1,
            config,
        }))
    }

    /// Load and parse a YAML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(&contents).map_err(|e| Error::Validation {
            field: path.display().to_string(),
            message: format!("invalid YAML: {e}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load_file(Path::new("/nonexistent/path/config.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "pricing: [unclosed").unwrap();
        assert!(ConfigLoader::load_file(&path).unwrap_err().is_validation());
    }

    #[test]
    fn test_load_empty_file_is_default() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(ConfigLoader::load_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_user_config_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let source = ConfigLoader::load_user_config(Some(temp_dir.path())).unwrap();
        assert!(source.is_none());
    }

    #[test]
    fn test_user_config_found() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            "dashboard:\n  default_days: 14\n",
        )
        .unwrap();

        let source = ConfigLoader::load_user_config(Some(temp_dir.path()))
            .unwrap()
            .unwrap();
        assert_eq!(source.precedence, 1);
        assert_eq!(source.config.dashboard_days(), 14);
    }
}
