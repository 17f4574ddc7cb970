//! Gateway service.
//!
//! # Data Flow
//! ```text
//! POST /cep {"cep": "..."}
//!     → handler.rs (root span, method + body validation)
//!     → client.rs (round-trip span, traceparent injected, POST to resolver)
//!     → handler.rs (pretty-print resolver JSON, or relay its error as text)
//! ```
//!
//! # Design Decisions
//! - Invalid input never leaves the process
//! - Errors are plain text; successful bodies are two-space indented JSON
//! - No retries and no outbound timeout

pub mod client;
pub mod handler;

use std::time::Duration;

use axum::{routing::any, Router};

use crate::config::GatewayConfig;
use crate::observability::Telemetry;

pub use client::{ResolverClient, ResolverReply};
pub use handler::handle_lookup;

/// State injected into the gateway handler.
#[derive(Clone)]
pub struct GatewayState {
    pub telemetry: Telemetry,
    pub resolver: ResolverClient,
    pub response_delay: Duration,
}

impl GatewayState {
    pub fn new(config: &GatewayConfig, telemetry: Telemetry) -> Self {
        Self {
            telemetry,
            resolver: ResolverClient::new(config.resolver_url.clone()),
            response_delay: Duration::from_millis(config.response_delay_ms),
        }
    }
}

/// Build the gateway router. Every method is routed to the handler so it
/// can answer 405 itself.
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/cep", any(handle_lookup))
        .with_state(state)
}
