use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::calculator::VdotCalculator;
use crate::logging::LogConfig;
use crate::table::TableSweep;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Optional TOML file replacing the built-in formula tables
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formulas_file: Option<PathBuf>,

    /// Application metadata
    pub metadata: ConfigMetadata,

    /// Reference table sweep
    #[serde(default)]
    pub table: TableSweep,

    /// Calculator defaults
    #[serde(default)]
    pub defaults: CalculatorDefaults,

    /// Logging settings
    #[serde(default)]
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// Defaults used when the CLI omits an argument
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorDefaults {
    /// Event used by `calculate` when `--event` is not given
    pub event: String,
}

impl Default for CalculatorDefaults {
    fn default() -> Self {
        CalculatorDefaults {
            event: "1600m".to_string(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        let now = Utc::now();

        AppConfig {
            metadata: ConfigMetadata {
                version: "1.0".to_string(),
                created_at: now,
                updated_at: now,
            },
            table: TableSweep::default(),
            defaults: CalculatorDefaults::default(),
            formulas_file: None,
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig = toml::from_str(&content)
            .with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".vdotrs")
            .join("config.toml")
    }

    /// Load `path`, or the default location, falling back to defaults
    ///
    /// An explicitly requested file must exist and parse. A missing default
    /// file is not an error; an unreadable one yields defaults plus a warning
    /// for the caller to report once logging is up.
    pub fn load(path: Option<&Path>) -> Result<(Self, Option<String>)> {
        match path {
            Some(path) => Ok((Self::load_from_file(path)?, None)),
            None => Ok(Self::load_or_default()),
        }
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> (Self, Option<String>) {
        Self::load_or_default_from(&Self::default_config_path())
    }

    /// Load `config_path` if present, otherwise defaults
    pub fn load_or_default_from(config_path: &Path) -> (Self, Option<String>) {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "No config file, using defaults");
            return (Self::default(), None);
        }

        match Self::load_from_file(config_path) {
            Ok(config) => (config, None),
            Err(e) => {
                let warning = format!(
                    "Config file {} is unreadable, using defaults: {:#}",
                    config_path.display(),
                    e
                );
                (Self::default(), Some(warning))
            }
        }
    }

    /// Calculator built from the configured formula file, or the built-in tables
    pub fn calculator(&self) -> Result<VdotCalculator> {
        match &self.formulas_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using custom formula tables");
                VdotCalculator::from_formula_file(path).with_context(|| {
                    format!("Failed to load formula file: {}", path.display())
                })
            }
            None => Ok(VdotCalculator::default()),
        }
    }
}
