use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_PATH_ENV: &str = "EGRN_CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "egrn.toml";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Environment {
    #[serde(default = "default_env_type")]
    pub env_type: String,
}

impl Default for Environment {
    fn default() -> Self {
        Self { env_type: default_env_type() }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct EgrnConfig {
    #[serde(default)]
    pub environment: Environment,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    /// The default path had no file; built-in defaults were used.
    Defaults(PathBuf),
}

impl EgrnConfig {
    /// Loads configuration from `explicit`, else `$EGRN_CONFIG_PATH`, else `./egrn.toml`.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let env_path = std::env::var(CONFIG_PATH_ENV).ok();
        Self::load_from(explicit, env_path.as_deref(), Path::new(DEFAULT_CONFIG_PATH))
    }

    /// Loads from the first of `explicit`, a non-blank `env_path` and `fallback`.
    ///
    /// A path the caller named, on the command line or in the environment, must
    /// exist. Only a missing `fallback` resolves to the built-in defaults.
    pub fn load_from(
        explicit: Option<&Path>,
        env_path: Option<&str>,
        fallback: &Path,
    ) -> Result<(Self, ConfigSource)> {
        let path = match resolve_path(explicit, env_path) {
            Some(path) => path,
            None if !fallback.exists() => {
                return Ok((Self::default(), ConfigSource::Defaults(fallback.to_path_buf())));
            }
            None => fallback.to_path_buf(),
        };

        let config_str = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration file '{}'", path.display()))?;
        let config = Self::from_toml_str(&config_str)
            .with_context(|| format!("Failed to parse configuration file '{}'", path.display()))?;
        Ok((config, ConfigSource::File(path)))
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        Ok(toml::from_str(config_str)?)
    }

    pub fn apply_env_overrides(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies `EGRN_LOG_FILTER`, `EGRN_LOG_JSON` and `EGRN_PRETTY_OUTPUT` as
    /// resolved by `lookup`. Unparseable booleans are ignored.
    pub fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(filter) = lookup("EGRN_LOG_FILTER") {
            self.logging.filter = filter;
        }
        if let Some(json) = lookup("EGRN_LOG_JSON").and_then(|v| v.parse::<bool>().ok()) {
            self.logging.json = json;
        }
        if let Some(pretty) = lookup("EGRN_PRETTY_OUTPUT").and_then(|v| v.parse::<bool>().ok()) {
            self.output.pretty = pretty;
        }
        self
    }
}

/// The path the caller asked for, if any.
fn resolve_path(explicit: Option<&Path>, env_path: Option<&str>) -> Option<PathBuf> {
    match (explicit, env_path) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(path)) if !path.trim().is_empty() => Some(PathBuf::from(path)),
        _ => None,
    }
}

fn default_env_type() -> String {
    "default".to_string()
}

fn default_log_filter() -> String {
    "egrn=info,warn".to_string()
}
