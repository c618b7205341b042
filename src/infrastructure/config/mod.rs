use std::path::PathBuf;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

pub const CONFIG_FILE: &str = "exercise-api.toml";
pub const CONFIG_PATH_ENV: &str = "EXERCISE_API_CONFIG";
pub const ENV_PREFIX: &str = "EXERCISE_API_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub dataset_path: PathBuf,
    /// Single ASCII character, or `tab`. Unset means detect from the file.
    #[serde(default)]
    pub delimiter: Option<String>,
    pub log_filter: String,
    #[serde(default)]
    pub workers: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            dataset_path: PathBuf::from("models/exercises_optionA_varied_v3.csv"),
            delimiter: None,
            log_filter: "info".to_string(),
            workers: None,
        }
    }
}

impl AppConfig {
    pub fn delimiter_byte(&self) -> Result<Option<u8>> {
        let Some(raw) = self.delimiter.as_deref() else {
            return Ok(None);
        };
        match raw {
            "tab" | "\\t" | "\t" => Ok(Some(b'\t')),
            _ if raw.len() == 1 && raw.is_ascii() => Ok(Some(raw.as_bytes()[0])),
            _ => Err(AppError::ConfigError(format!(
                "delimiter must be a single ASCII character, got {:?}",
                raw
            ))),
        }
    }
}

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Defaults, then the TOML file, then `EXERCISE_API_*` variables.
    pub fn new() -> Self {
        let config_path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| CONFIG_FILE.to_string());

        Self::from_figment(
            Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file(config_path))
                .merge(Env::prefixed(ENV_PREFIX).ignore(&["config"])),
        )
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self
            .figment
            .extract()
            .map_err(|e| AppError::ConfigError(e.to_string()))?;
        config.delimiter_byte()?;
        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
