//! Server settings
//!
//! Layered from built-in defaults, `config/default`, `config/{env}` and
//! `FINGENIE__*` environment variables, then validated.

use config::{Config, Environment, File};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use fingenie_core::affordability::DEFAULT_EMI_TO_INCOME_RATIO;
use fingenie_core::loans::presets::LoanPreset;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Main application settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub affordability: AffordabilityConfig,

    /// Replaces the built-in loan presets when set
    #[serde(default)]
    pub presets: Option<Vec<LoanPreset>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_json: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityConfig {
    /// Applied when a request omits `emi_to_income_ratio`
    #[serde(default = "default_ratio")]
    pub default_emi_to_income_ratio: Decimal,
}

impl Default for AffordabilityConfig {
    fn default() -> Self {
        Self {
            default_emi_to_income_ratio: default_ratio(),
        }
    }
}

fn default_ratio() -> Decimal {
    DEFAULT_EMI_TO_INCOME_RATIO
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Settings {
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.server.port == 0 {
            return Err(invalid("server.port", "must be non-zero"));
        }

        if !LOG_LEVELS.contains(&self.observability.log_level.as_str()) {
            return Err(invalid(
                "observability.log_level",
                format!(
                    "expected one of {}, got '{}'",
                    LOG_LEVELS.join(", "),
                    self.observability.log_level
                ),
            ));
        }

        let ratio = self.affordability.default_emi_to_income_ratio;
        if ratio <= Decimal::ZERO || ratio > Decimal::ONE {
            return Err(invalid(
                "affordability.default_emi_to_income_ratio",
                format!("must be in (0, 1], got {}", ratio),
            ));
        }

        if let Some(presets) = &self.presets {
            if presets.is_empty() {
                return Err(invalid("presets", "must not be empty when set"));
            }
            for preset in presets {
                preset.validate().map_err(|e| {
                    invalid(format!("presets.{}", preset.name), e.to_string())
                })?;
            }
        }

        Ok(())
    }
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

/// Load settings from files and environment
///
/// Priority (highest to lowest):
/// 1. Environment variables (FINGENIE prefix, `__` separator)
/// 2. config/{env} (if env specified)
/// 3. config/default
pub fn load_settings(env: Option<&str>) -> Result<Settings, SettingsError> {
    let mut builder = Config::builder().add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("FINGENIE")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;

    Ok(settings)
}
