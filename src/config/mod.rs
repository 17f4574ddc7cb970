//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, defaults for everything missing)
//!     → loader.rs (environment overrides for the selected service)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable for the process lifetime)
//! ```
//!
//! # Design Decisions
//! - One file can describe both services; each process reads its own section
//! - All fields have defaults, so both services start with no file at all
//! - Validation reports every problem at once

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{apply_env_overrides, load_config, resolve_config, ConfigError};
pub use schema::{
    GatewayConfig, ListenerConfig, RelayConfig, ResolverConfig, ServiceKind, TelemetryConfig,
};
pub use validation::{validate_config, ValidationError};
