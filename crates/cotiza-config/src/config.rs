//! Configuration types and loading for cotiza projects.
//!
//! The main entry point is [`CotizaConfig`]. [`load_config`] layers, lowest
//! priority first: built-in defaults, `.cotiza/config.yaml`,
//! `.cotiza/config.toml`, then `COTIZA_*` environment variables.
//! [`save_config`] writes `config.yaml`.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of environment variables that override configuration keys.
pub const ENV_PREFIX: &str = "COTIZA_";

/// Catalog file name used when `catalog` is not configured.
pub const DEFAULT_CATALOG_FILE: &str = "catalog.yaml";

const CONFIG_YAML: &str = "config.yaml";
const CONFIG_TOML: &str = "config.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration file could not be read or written.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] serde_yaml::Error),

    /// A configuration source held an invalid value.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] figment::Error),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

// ---------------------------------------------------------------------------
// CotizaConfig
// ---------------------------------------------------------------------------

/// Settings of a cotiza project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CotizaConfig {
    /// Emit JSON instead of tables.
    #[serde(default)]
    pub json: bool,

    /// `tracing` filter used when neither `-v` nor `RUST_LOG` is given.
    #[serde(default = "default_log")]
    pub log: String,

    /// Catalog file. Relative paths are resolved against the project
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,
}

impl Default for CotizaConfig {
    fn default() -> Self {
        Self {
            json: false,
            log: default_log(),
            catalog: None,
        }
    }
}

fn default_log() -> String {
    "warn".to_string()
}

impl CotizaConfig {
    /// Path of the catalog file for a project rooted at `project_dir`.
    pub fn catalog_path(&self, project_dir: &Path) -> PathBuf {
        match &self.catalog {
            Some(c) if Path::new(c).is_absolute() => PathBuf::from(c),
            Some(c) => project_dir.join(c),
            None => project_dir.join(DEFAULT_CATALOG_FILE),
        }
    }
}

/// Load configuration for the project at `project_dir` (the `.cotiza/`
/// directory itself).
///
/// Missing or empty files are skipped. Environment overrides are applied
/// even when no file exists.
pub fn load_config(project_dir: &Path) -> Result<CotizaConfig> {
    let mut figment = Figment::from(Serialized::defaults(CotizaConfig::default()));

    let yaml_path = project_dir.join(CONFIG_YAML);
    if yaml_path.exists() {
        let content = std::fs::read_to_string(&yaml_path)?;
        if !content.trim().is_empty() {
            figment = figment.merge(Yaml::string(&content));
        }
    }

    let toml_path = project_dir.join(CONFIG_TOML);
    if toml_path.exists() {
        figment = figment.merge(Toml::file(toml_path));
    }

    load_from(figment)
}

/// Configuration from defaults and environment only, for commands run
/// outside a project.
pub fn load_env_config() -> Result<CotizaConfig> {
    load_from(Figment::from(Serialized::defaults(CotizaConfig::default())))
}

fn load_from(figment: Figment) -> Result<CotizaConfig> {
    let config = figment
        .merge(Env::prefixed(ENV_PREFIX).only(&["json", "log", "catalog"]))
        .extract()?;
    Ok(config)
}

/// Write `config` to `config.yaml` in `project_dir`, creating the
/// directory if needed.
pub fn save_config(project_dir: &Path, config: &CotizaConfig) -> Result<()> {
    std::fs::create_dir_all(project_dir)?;

    let config_path = project_dir.join(CONFIG_YAML);
    let yaml = serde_yaml::to_string(config)?;
    std::fs::write(config_path, yaml)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
