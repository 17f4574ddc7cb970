//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Which service a process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    Gateway,
    Resolver,
}

impl ServiceKind {
    /// Default `service.name` resource attribute and tracer scope.
    pub fn default_service_name(self) -> &'static str {
        match self {
            ServiceKind::Gateway => "gateway",
            ServiceKind::Resolver => "resolver",
        }
    }
}

/// Root configuration shared by both services.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RelayConfig {
    /// Front-facing gateway settings.
    pub gateway: GatewayConfig,

    /// Downstream resolver settings.
    pub resolver: ResolverConfig,

    /// Logging and span export.
    pub telemetry: TelemetryConfig,
}

impl RelayConfig {
    pub fn listener(&self, kind: ServiceKind) -> &ListenerConfig {
        match kind {
            ServiceKind::Gateway => &self.gateway.listener,
            ServiceKind::Resolver => &self.resolver.listener,
        }
    }

    pub fn listener_mut(&mut self, kind: ServiceKind) -> &mut ListenerConfig {
        match kind {
            ServiceKind::Gateway => &mut self.gateway.listener,
            ServiceKind::Resolver => &mut self.resolver.listener,
        }
    }

    /// Service name for `kind`, falling back to the built-in one.
    pub fn service_name(&self, kind: ServiceKind) -> &str {
        self.telemetry
            .service_name
            .as_deref()
            .unwrap_or(kind.default_service_name())
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

/// Gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub listener: ListenerConfig,

    /// Full URL of the resolver's lookup endpoint.
    pub resolver_url: String,

    /// Artificial delay before each request is handled, in milliseconds.
    pub response_delay_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: "0.0.0.0:8080".to_string(),
            },
            resolver_url: "http://localhost:8081/cep".to_string(),
            response_delay_ms: 0,
        }
    }
}

/// Resolver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResolverConfig {
    pub listener: ListenerConfig,

    /// Base URL of the address API; the code and `/json/` are appended.
    pub address_api_url: String,

    /// Current-weather endpoint; `q` and `key` are added as query parameters.
    pub weather_api_url: String,

    /// API key for the weather endpoint.
    pub weather_api_key: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: "0.0.0.0:8081".to_string(),
            },
            address_api_url: "https://viacep.com.br/ws".to_string(),
            weather_api_url: "https://api.weatherapi.com/v1/current.json".to_string(),
            weather_api_key: String::new(),
        }
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Overrides the per-service default name.
    pub service_name: Option<String>,

    /// OTLP/HTTP traces endpoint. Spans are not exported when unset.
    pub otlp_endpoint: Option<String>,

    /// Log filter used when `RUST_LOG` is not set.
    pub log_filter: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: None,
            otlp_endpoint: None,
            log_filter: "weather_relay=info,tower_http=debug".to_string(),
        }
    }
}
