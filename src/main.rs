//! Postal-code weather relay.
//!
//! # Architecture Overview
//!
//! ```text
//!   client                gateway                        resolver
//!     │  POST /cep          │                               │
//!     ├────────────────────▶│ root span                     │
//!     │                     │ validate code                 │
//!     │                     │ round-trip span ── traceparent ──▶ extract parent
//!     │                     │                               │ root span (child)
//!     │                     │                               │ address lookup ──▶ ViaCEP
//!     │                     │                               │ weather lookup ──▶ WeatherAPI
//!     │                     │◀──────────── JSON ────────────┤
//!     │◀── pretty JSON ─────┤                               │
//! ```
//!
//! Both services run from this binary: `weather-relay gateway` or
//! `weather-relay resolver`, optionally with `--config relay.toml`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;

use weather_relay::config::{resolve_config, ServiceKind};
use weather_relay::gateway::{self, GatewayState};
use weather_relay::http::HttpServer;
use weather_relay::lifecycle::{wait_for_signal, Shutdown};
use weather_relay::observability::{init_provider, logging::init_logging, Telemetry};
use weather_relay::resolver::{self, ResolverState};

#[derive(Parser)]
#[command(name = "weather-relay")]
#[command(about = "Postal-code weather lookup services", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults and environment are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    service: Service,
}

#[derive(Subcommand, Clone, Copy)]
enum Service {
    /// Front-facing service: validates and forwards to the resolver
    Gateway,
    /// Downstream service: resolves the code and fetches the weather
    Resolver,
}

impl From<Service> for ServiceKind {
    fn from(service: Service) -> Self {
        match service {
            Service::Gateway => ServiceKind::Gateway,
            Service::Resolver => ServiceKind::Resolver,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let kind = ServiceKind::from(cli.service);

    let config = resolve_config(cli.config.as_deref(), kind, |key| std::env::var(key).ok())?;
    init_logging(&config.telemetry.log_filter);

    let service_name = config.service_name(kind).to_string();
    tracing::info!(
        service = %service_name,
        bind_address = %config.listener(kind).bind_address,
        "weather-relay v{} starting",
        env!("CARGO_PKG_VERSION")
    );

    let provider = init_provider(&config.telemetry, &service_name)?;
    let telemetry = Telemetry::from_provider(&provider, kind.default_service_name());

    let app = match kind {
        ServiceKind::Gateway => {
            tracing::info!(resolver_url = %config.gateway.resolver_url, "Gateway configured");
            gateway::router(GatewayState::new(&config.gateway, telemetry))
        }
        ServiceKind::Resolver => {
            tracing::info!(
                address_api_url = %config.resolver.address_api_url,
                weather_api_url = %config.resolver.weather_api_url,
                "Resolver configured"
            );
            resolver::router(ResolverState::from_config(&config.resolver, telemetry))
        }
    };

    let listener = TcpListener::bind(&config.listener(kind).bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(app).run(listener, shutdown.subscribe());
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => result?,
        _ = wait_for_signal() => {
            shutdown.trigger();
            server.await?;
        }
    }

    if let Err(e) = provider.shutdown() {
        tracing::warn!(error = %e, "Tracer provider shutdown failed");
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
