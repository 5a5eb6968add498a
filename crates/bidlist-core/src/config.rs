//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/bidlist/config.toml)
//! 3. Environment variables (BIDLIST_* prefix)
//!
//! Environment variables take precedence over config file values.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::loader::ColumnMapping;

/// Environment variable prefix
const ENV_PREFIX: &str = "BIDLIST";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// CSV file used when no path is given on the command line
    #[serde(default)]
    pub csv_path: Option<PathBuf>,

    /// Field delimiter
    #[serde(default = "default_delimiter")]
    pub delimiter: char,

    /// Column positions for the bid fields
    #[serde(default)]
    pub columns: ColumnMapping,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            csv_path: None,
            delimiter: default_delimiter(),
            columns: ColumnMapping::default(),
        }
    }
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (BIDLIST_CSV_PATH, BIDLIST_DELIMITER)
    /// 2. Config file (~/.config/bidlist/config.toml or BIDLIST_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        // BIDLIST_CSV_PATH
        if let Ok(val) = std::env::var(format!("{}_CSV_PATH", ENV_PREFIX)) {
            self.csv_path = if val.is_empty() {
                None
            } else {
                Some(PathBuf::from(val))
            };
        }

        // BIDLIST_DELIMITER (first character of the value)
        if let Ok(val) = std::env::var(format!("{}_DELIMITER", ENV_PREFIX)) {
            if let Some(ch) = val.chars().next() {
                self.delimiter = ch;
            }
        }
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to_path(&Self::config_file_path())
    }

    /// Save configuration to a specific path
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {:?}", path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with the BIDLIST_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bidlist")
            .join("config.toml")
    }
}

fn default_delimiter() -> char {
    ','
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to serialize tests that touch environment variables
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Guard that locks env access and saves/restores env vars
    struct EnvGuard<'a> {
        _lock: std::sync::MutexGuard<'a, ()>,
        saved: Vec<(String, Option<String>)>,
    }

    impl<'a> EnvGuard<'a> {
        fn new(vars: &[&str]) -> Self {
            let lock = ENV_MUTEX.lock().unwrap();
            let saved = vars
                .iter()
                .map(|&name| (name.to_string(), env::var(name).ok()))
                .collect();
            // Clear all the vars
            for name in vars {
                env::remove_var(name);
            }
            Self { _lock: lock, saved }
        }
    }

    impl Drop for EnvGuard<'_> {
        fn drop(&mut self) {
            for (name, value) in &self.saved {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }

    const ENV_VARS: &[&str] = &["BIDLIST_CSV_PATH", "BIDLIST_DELIMITER", "BIDLIST_CONFIG"];

    #[test]
    fn test_default_config() {
        let _guard = EnvGuard::new(ENV_VARS);

        let config = Config::default();
        assert!(config.csv_path.is_none());
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.columns, ColumnMapping::default());
    }

    #[test]
    fn test_env_override_csv_path() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("BIDLIST_CSV_PATH", "/tmp/sales.csv");
        config.apply_env_overrides();
        assert_eq!(config.csv_path, Some(PathBuf::from("/tmp/sales.csv")));

        // Empty string clears it
        env::set_var("BIDLIST_CSV_PATH", "");
        config.apply_env_overrides();
        assert!(config.csv_path.is_none());
    }

    #[test]
    fn test_env_override_delimiter() {
        let _guard = EnvGuard::new(ENV_VARS);

        let mut config = Config::default();

        env::set_var("BIDLIST_DELIMITER", ";");
        config.apply_env_overrides();
        assert_eq!(config.delimiter, ';');

        // Empty value leaves the delimiter alone
        env::set_var("BIDLIST_DELIMITER", "");
        config.apply_env_overrides();
        assert_eq!(config.delimiter, ';');
    }

    #[test]
    fn test_load_from_str() {
        let _guard = EnvGuard::new(ENV_VARS);

        let toml = r#"
            csv_path = "/data/eBid_Monthly_Sales.csv"
            delimiter = ";"

            [columns]
            title = 0
            id = 1
            amount = 4
            fund = 8
            strip = "$"
        "#;

        let config = Config::load_from_str(toml).unwrap();
        assert_eq!(
            config.csv_path,
            Some(PathBuf::from("/data/eBid_Monthly_Sales.csv"))
        );
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.columns.fund, 8);
    }

    #[test]
    fn test_load_from_str_partial() {
        let _guard = EnvGuard::new(ENV_VARS);

        // Every field is defaulted
        let config = Config::load_from_str("").unwrap();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.columns, ColumnMapping::default());
    }

    #[test]
    fn test_load_from_path_missing_file() {
        let _guard = EnvGuard::new(ENV_VARS);

        let path = PathBuf::from("/nonexistent/config.toml");
        let config = Config::load_from_path(&path).unwrap();
        assert!(config.csv_path.is_none());
        assert_eq!(config.delimiter, ',');
    }

    #[test]
    fn test_save_and_reload() {
        let _guard = EnvGuard::new(ENV_VARS);
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let config = Config {
            csv_path: Some(PathBuf::from("/data/sales.csv")),
            delimiter: ';',
            columns: ColumnMapping {
                title: 2,
                id: 0,
                amount: 3,
                fund: 1,
                strip: '€',
            },
        };

        config.save_to_path(&path).unwrap();
        let loaded = Config::load_from_path(&path).unwrap();

        assert_eq!(loaded.csv_path, config.csv_path);
        assert_eq!(loaded.delimiter, ';');
        assert_eq!(loaded.columns, config.columns);
    }

    #[test]
    fn test_config_file_path_env_override() {
        let _guard = EnvGuard::new(ENV_VARS);

        env::set_var("BIDLIST_CONFIG", "/custom/bidlist.toml");
        assert_eq!(
            Config::config_file_path(),
            PathBuf::from("/custom/bidlist.toml")
        );
    }
}
