//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use crate::config::schema::{RelayConfig, ServiceKind};
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let config = read_config(path)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Build the effective configuration for one service process.
///
/// Starts from `path` (or defaults), applies environment overrides through
/// `env`, then validates the result.
pub fn resolve_config<F>(
    path: Option<&Path>,
    kind: ServiceKind,
    env: F,
) -> Result<RelayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => read_config(path)?,
        None => RelayConfig::default(),
    };

    apply_env_overrides(&mut config, kind, env);
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply the container-style environment variables.
///
/// | Variable | Field |
/// |---|---|
/// | `HTTP_PORT` | listener of `kind`, bound on all interfaces |
/// | `EXTERNAL_CALL_URL` | `gateway.resolver_url` |
/// | `RESPONSE_TIME` | `gateway.response_delay_ms` |
/// | `WEATHER_API_KEY` | `resolver.weather_api_key` |
/// | `OTEL_SERVICE_NAME` | `telemetry.service_name` |
/// | `OTEL_EXPORTER_OTLP_ENDPOINT` | `telemetry.otlp_endpoint` |
///
/// Empty values are ignored. An unparsable `RESPONSE_TIME` is logged and skipped.
pub fn apply_env_overrides<F>(config: &mut RelayConfig, kind: ServiceKind, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let var = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(port) = var("HTTP_PORT") {
        config.listener_mut(kind).bind_address = format!("0.0.0.0:{}", port.trim());
    }
    if let Some(url) = var("EXTERNAL_CALL_URL") {
        config.gateway.resolver_url = url;
    }
    if let Some(delay) = var("RESPONSE_TIME") {
        match delay.trim().parse() {
            Ok(ms) => config.gateway.response_delay_ms = ms,
            Err(e) => tracing::warn!(value = %delay, error = %e, "Ignoring invalid RESPONSE_TIME"),
        }
    }
    if let Some(key) = var("WEATHER_API_KEY") {
        config.resolver.weather_api_key = key;
    }
    if let Some(name) = var("OTEL_SERVICE_NAME") {
        config.telemetry.service_name = Some(name);
    }
    if let Some(endpoint) = var("OTEL_EXPORTER_OTLP_ENDPOINT") {
        config.telemetry.otlp_endpoint = Some(endpoint);
    }
}

fn read_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    toml::from_str(&content).map_err(ConfigError::Parse)
}
