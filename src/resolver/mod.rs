//! Resolver service.
//!
//! # Data Flow
//! ```text
//! POST /cep {"cep": "..."} + traceparent
//!     → handler.rs (extract parent, root span, validation)
//!     → address.rs (code → locality, own span)
//!     → weather.rs (locality → temperatures, own span)
//!     → handler.rs (JSON result, or {"error": ...})
//! ```
//!
//! # Design Decisions
//! - Collaborators sit behind traits so tests can swap them for fakes
//! - Lookups run strictly in sequence; the first failure ends the request
//! - Missing trace headers start a new trace instead of failing

pub mod address;
pub mod handler;
pub mod weather;

use std::sync::Arc;

use axum::{routing::any, Router};

use crate::config::ResolverConfig;
use crate::observability::Telemetry;

pub use address::{AddressLookup, ViaCepClient};
pub use handler::handle_lookup;
pub use weather::{WeatherApiClient, WeatherLookup};

/// State injected into the resolver handler.
#[derive(Clone)]
pub struct ResolverState {
    pub telemetry: Telemetry,
    pub address: Arc<dyn AddressLookup>,
    pub weather: Arc<dyn WeatherLookup>,
}

impl ResolverState {
    pub fn new(
        telemetry: Telemetry,
        address: Arc<dyn AddressLookup>,
        weather: Arc<dyn WeatherLookup>,
    ) -> Self {
        Self {
            telemetry,
            address,
            weather,
        }
    }

    /// State backed by the real HTTP collaborators.
    pub fn from_config(config: &ResolverConfig, telemetry: Telemetry) -> Self {
        Self::new(
            telemetry,
            Arc::new(ViaCepClient::new(config.address_api_url.clone())),
            Arc::new(WeatherApiClient::new(
                config.weather_api_url.clone(),
                config.weather_api_key.clone(),
            )),
        )
    }
}

/// Build the resolver router.
pub fn router(state: ResolverState) -> Router {
    Router::new()
        .route("/cep", any(handle_lookup))
        .with_state(state)
}
