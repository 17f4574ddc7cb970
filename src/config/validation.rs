//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Bind addresses parse as socket addresses
//! - Outbound URLs parse and use http or https
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::RelayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("telemetry.service_name must not be empty")]
    EmptyServiceName,
}

/// Check `config`, collecting every error.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "gateway.listener.bind_address", &config.gateway.listener.bind_address);
    check_address(&mut errors, "resolver.listener.bind_address", &config.resolver.listener.bind_address);
    check_url(&mut errors, "gateway.resolver_url", &config.gateway.resolver_url);
    check_url(&mut errors, "resolver.address_api_url", &config.resolver.address_api_url);
    check_url(&mut errors, "resolver.weather_api_url", &config.resolver.weather_api_url);
    if let Some(endpoint) = &config.telemetry.otlp_endpoint {
        check_url(&mut errors, "telemetry.otlp_endpoint", endpoint);
    }
    if matches!(&config.telemetry.service_name, Some(name) if name.trim().is_empty()) {
        errors.push(ValidationError::EmptyServiceName);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    let reason = match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => return,
        Ok(url) => format!("unsupported scheme '{}'", url.scheme()),
        Err(e) => e.to_string(),
    };
    errors.push(ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&RelayConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RelayConfig::default();
        config.gateway.listener.bind_address = "localhost".into();
        config.resolver.weather_api_url = "ftp://weather.example".into();
        config.telemetry.otlp_endpoint = Some("collector:4317".into());
        config.telemetry.service_name = Some(" ".into());

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::InvalidAddress {
            field: "gateway.listener.bind_address",
            value: "localhost".into(),
        }));
        assert!(errors.contains(&ValidationError::EmptyServiceName));
        assert!(errors.iter().any(|e| matches!(
            e,
            ValidationError::InvalidUrl { field: "resolver.weather_api_url", .. }
        )));
    }
}
