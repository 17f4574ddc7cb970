//! Postal-code weather relay with end-to-end trace propagation.
//!
//! Two independently deployable services share this crate:
//! - [`gateway`] validates the code and forwards it, injecting trace context
//! - [`resolver`] continues the trace and calls the address and weather APIs

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod lookup;
pub mod observability;
pub mod resolver;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use observability::Telemetry;
