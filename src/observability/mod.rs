//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request headers
//!     → propagation.rs (extract W3C trace context)
//!     → spans.rs (Telemetry starts spans, SpanGuard closes them)
//!     → propagation.rs (inject context into outbound headers)
//!
//! Process bootstrap:
//!     → logging.rs (tracing-subscriber for log events)
//!     → provider.rs (tracer provider + optional OTLP export)
//! ```
//!
//! # Design Decisions
//! - No global tracer or propagator: handlers receive a `Telemetry` value
//! - Spans close on drop, so every exit path releases them
//! - Log events and distributed spans are separate pipelines

pub mod logging;
pub mod propagation;
pub mod provider;
pub mod spans;

pub use propagation::{Propagator, TRACEPARENT};
pub use provider::{init_provider, TelemetryError};
pub use spans::{SpanGuard, Telemetry};
