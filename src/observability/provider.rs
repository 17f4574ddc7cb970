//! Tracer provider bootstrap.
//!
//! Exporter wiring is deliberately thin: an OTLP/HTTP batch exporter when an
//! endpoint is configured, otherwise a provider with no processors. Spans are
//! still created and their ids still propagate in the second case.

use opentelemetry::KeyValue;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{trace::SdkTracerProvider, Resource};
use thiserror::Error;

use crate::config::TelemetryConfig;

/// Errors from building or tearing down the tracer provider.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("failed to build OTLP exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),

    #[error("failed to shut down tracer provider: {0}")]
    Shutdown(#[from] opentelemetry_sdk::error::OTelSdkError),
}

/// Build the tracer provider for one service process.
pub fn init_provider(
    config: &TelemetryConfig,
    service_name: &str,
) -> Result<SdkTracerProvider, TelemetryError> {
    let resource = Resource::builder_empty()
        .with_attributes([KeyValue::new("service.name", service_name.to_string())])
        .build();

    let builder = SdkTracerProvider::builder().with_resource(resource);

    let provider = match &config.otlp_endpoint {
        Some(endpoint) => {
            let exporter = opentelemetry_otlp::SpanExporter::builder()
                .with_http()
                .with_endpoint(endpoint.clone())
                .build()?;
            tracing::info!(%endpoint, service_name, "OTLP span export enabled");
            builder.with_batch_exporter(exporter).build()
        }
        None => {
            tracing::info!(service_name, "No OTLP endpoint configured, spans are not exported");
            builder.build()
        }
    };

    Ok(provider)
}
