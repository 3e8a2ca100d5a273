//! Configuration management module.
//!
//! This module handles loading, saving, and managing application configuration,
//! including the trend service location, the weaver profile, inventory
//! thresholds and the theme.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use crate::store::Weaver;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/looma-tui";

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub trend_service_url: String,
    pub weaver: Weaver,
    pub products_per_site: u32,
    pub low_stock_threshold: f64,
    pub surplus_threshold: f64,
    pub theme_name: String,
    pub seed_demo_data: bool,
    pub log_level: String,
    file_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Debug, Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_trend_service_url")]
    pub trend_service_url: String,
    #[serde(default)]
    pub weaver: Weaver,
    #[serde(default = "default_products_per_site")]
    pub products_per_site: u32,
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: f64,
    #[serde(default = "default_surplus_threshold")]
    pub surplus_threshold: f64,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_seed_demo_data")]
    pub seed_demo_data: bool,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_trend_service_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_products_per_site() -> u32 {
    10
}

fn default_low_stock_threshold() -> f64 {
    100.0
}

fn default_surplus_threshold() -> f64 {
    1000.0
}

fn default_theme_name() -> String {
    "loom".to_string()
}

fn default_seed_demo_data() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance holding the defaults.
    ///
    pub fn new() -> Config {
        Config {
            trend_service_url: default_trend_service_url(),
            weaver: Weaver::default(),
            products_per_site: default_products_per_site(),
            low_stock_threshold: default_low_stock_threshold(),
            surplus_threshold: default_surplus_threshold(),
            theme_name: default_theme_name(),
            seed_demo_data: default_seed_demo_data(),
            log_level: default_log_level(),
            file_path: None,
        }
    }

    /// Load the configuration from the default directory, or from the custom
    /// directory if provided. A missing file is created with the defaults.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        // Try to create dir path if it doesn't exist
        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }

        self.file_path = Some(dir_path.join(Path::new(FILE_NAME)));
        let file_path = self.file_path.clone().ok_or(ConfigError::FilePathNotSet)?;

        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.apply(data);
            self.validate()?;
        } else {
            self.save()?;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path.as_ref().ok_or(ConfigError::FilePathNotSet)?;
        let content = serde_yaml::to_string(&self.spec())
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Log level filter named by `log_level`.
    ///
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        self.log_level
            .parse::<LevelFilter>()
            .map_err(|_| ConfigError::InvalidValue {
                field: "log_level",
                message: format!("'{}' is not a log level", self.log_level),
            })
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.trend_service_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "trend_service_url",
                message: "must not be empty".to_string(),
            });
        }
        if self.weaver.id.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "weaver.id",
                message: "must not be empty".to_string(),
            });
        }
        if !(self.low_stock_threshold >= 0.0 && self.surplus_threshold >= 0.0) {
            return Err(ConfigError::InvalidValue {
                field: "thresholds",
                message: "stock thresholds must not be negative".to_string(),
            });
        }
        self.level_filter()?;
        Ok(())
    }

    fn apply(&mut self, data: FileSpec) {
        self.trend_service_url = data.trend_service_url;
        self.weaver = data.weaver;
        self.products_per_site = data.products_per_site;
        self.low_stock_threshold = data.low_stock_threshold;
        self.surplus_threshold = data.surplus_threshold;
        self.theme_name = data.theme_name;
        self.seed_demo_data = data.seed_demo_data;
        self.log_level = data.log_level;
    }

    fn spec(&self) -> FileSpec {
        FileSpec {
            trend_service_url: self.trend_service_url.clone(),
            weaver: self.weaver.clone(),
            products_per_site: self.products_per_site,
            low_stock_threshold: self.low_stock_threshold,
            surplus_threshold: self.surplus_threshold,
            theme_name: self.theme_name.clone(),
            seed_demo_data: self.seed_demo_data,
            log_level: self.log_level.clone(),
        }
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => {
                let home_path = Path::new(&home);
                let default_config_path = Path::new(DEFAULT_DIRECTORY_PATH);
                Ok(home_path.join(default_config_path))
            }
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("looma-tui-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = scratch_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        let file_path = dir.join(FILE_NAME);
        assert!(file_path.exists());
        assert_eq!(config.file_path(), Some(file_path.as_path()));
        assert_eq!(config.weaver.id, "W003");
        assert_eq!(config.low_stock_threshold, 100.0);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_and_reload() {
        let dir = scratch_dir();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        config.weaver.id = "W042".to_string();
        config.weaver.skills.clear();
        config.surplus_threshold = 2500.0;
        config.seed_demo_data = false;
        config.save().unwrap();

        let mut reloaded = Config::new();
        reloaded.load(dir.to_str()).unwrap();
        assert_eq!(reloaded.weaver.id, "W042");
        assert!(reloaded.weaver.skills.is_empty());
        assert_eq!(reloaded.surplus_threshold, 2500.0);
        assert!(!reloaded.seed_demo_data);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(FILE_NAME),
            "weaver:\n  id: W777\n  name: Meena\n  region:\n    state: Odisha\n    district: Sambalpur\n",
        )
        .unwrap();
        let mut config = Config::new();
        config.load(dir.to_str()).unwrap();
        assert_eq!(config.weaver.id, "W777");
        assert_eq!(config.weaver.region.district, "Sambalpur");
        assert_eq!(config.trend_service_url, "http://127.0.0.1:8000");
        assert_eq!(config.products_per_site, 10);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "log_level: loud\n").unwrap();
        let mut config = Config::new();
        let result = config.load(dir.to_str());
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue {
                field: "log_level",
                ..
            }))
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_blank_weaver_id_is_rejected() {
        let dir = scratch_dir();
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(FILE_NAME), "weaver:\n  id: ' '\n  name: Meena\n").unwrap();
        let mut config = Config::new();
        assert!(matches!(
            config.load(dir.to_str()),
            Err(AppError::Config(ConfigError::InvalidValue {
                field: "weaver.id",
                ..
            }))
        ));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_save_without_path_fails() {
        let config = Config::new();
        assert!(matches!(
            config.save(),
            Err(AppError::Config(ConfigError::FilePathNotSet))
        ));
    }
}
