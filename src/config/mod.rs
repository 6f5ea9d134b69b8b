use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{LlmeditError, LlmeditResult};

/// Placeholder credential written by `--init-config`; never valid for use
pub const PLACEHOLDER_API_KEY: &str = "your_api_key_here";

const DEFAULT_PROVIDER: &str = "openai";
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_BACKUP_SUFFIX: &str = ".backup";

/// Config file name inside the config directory
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Config directory under the user's home
const CONFIG_DIR_NAME: &str = ".llm-editor";

/// Template written by `--init-config`
const DEFAULT_CONFIG_TEMPLATE: &str = r#"llm:
  provider: openai
  api_key: "your_api_key_here"
  model: "gpt-4o"

app:
  backup_enabled: true
  backup_suffix: ".backup"
"#;

/// Top-level settings, loaded once per invocation and immutable afterwards
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    /// Model endpoint settings
    #[serde(default)]
    pub llm: LlmSettings,

    /// Application behavior settings
    #[serde(default)]
    pub app: AppSettings,
}

/// The `llm` section of the config file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmSettings {
    /// Provider identifier
    #[serde(default = "default_provider")]
    pub provider: String,

    /// API key for the provider
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,
}

/// The `app` section of the config file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppSettings {
    /// Whether default-mode writes take a backup first
    #[serde(default = "default_backup_enabled")]
    pub backup_enabled: bool,

    /// Suffix appended to the input path to form the backup path
    #[serde(default = "default_backup_suffix")]
    pub backup_suffix: String,
}

fn default_provider() -> String {
    DEFAULT_PROVIDER.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_backup_enabled() -> bool {
    true
}

fn default_backup_suffix() -> String {
    DEFAULT_BACKUP_SUFFIX.to_string()
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            api_key: None,
            model: default_model(),
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            backup_enabled: true,
            backup_suffix: default_backup_suffix(),
        }
    }
}

/// Outcome of writing the default configuration
#[derive(Debug, PartialEq, Eq)]
pub enum InitStatus {
    /// A fresh config file was written at the given path
    Created(PathBuf),
    /// A config file already exists at the given path; it was left untouched
    AlreadyExists(PathBuf),
}

impl Settings {
    /// Load settings from an explicit path, the user-level config, or a
    /// local `config.yaml` fallback, in that order.
    pub fn load(path: Option<&Path>) -> LlmeditResult<Self> {
        let primary = match path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };

        let config_path = if primary.exists() {
            primary
        } else if path.is_none() && Path::new(CONFIG_FILE_NAME).exists() {
            // Local fallback for development and testing
            PathBuf::from(CONFIG_FILE_NAME)
        } else {
            return Err(LlmeditError::config_not_found(primary));
        };

        debug!("Loading configuration from {}", config_path.display());

        let content = fs::read_to_string(&config_path).map_err(|e| {
            LlmeditError::config_invalid(format!(
                "failed to read {}: {}",
                config_path.display(),
                e
            ))
        })?;

        serde_yaml::from_str(&content).map_err(|e| {
            LlmeditError::config_invalid(format!(
                "failed to parse {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Check that the credential is usable.
    pub fn validate(&self) -> LlmeditResult<()> {
        match self.llm.api_key.as_deref() {
            Some(key) if !key.is_empty() && key != PLACEHOLDER_API_KEY => Ok(()),
            _ => Err(LlmeditError::config_invalid(
                "llm.api_key is missing or still set to the placeholder",
            )),
        }
    }
}

/// Default user-level config path, `~/.llm-editor/config.yaml`
pub fn default_config_path() -> PathBuf {
    default_config_dir().join(CONFIG_FILE_NAME)
}

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(CONFIG_DIR_NAME))
}

/// Write the default config template under the user's home directory.
pub fn init_default_config() -> LlmeditResult<InitStatus> {
    write_default_config(&default_config_dir())
}

/// Write the default config template into `config_dir`, refusing to
/// overwrite an existing file.
pub fn write_default_config(config_dir: &Path) -> LlmeditResult<InitStatus> {
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        return Ok(InitStatus::AlreadyExists(config_path));
    }

    fs::create_dir_all(config_dir).map_err(|e| LlmeditError::Write {
        source: e,
        path: config_dir.to_path_buf(),
        restored: false,
    })?;

    fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE).map_err(|e| LlmeditError::Write {
        source: e,
        path: config_path.clone(),
        restored: false,
    })?;

    debug!("Wrote default configuration to {}", config_path.display());
    Ok(InitStatus::Created(config_path))
}
