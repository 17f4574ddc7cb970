//! HTTP server setup.
//!
//! # Responsibilities
//! - Wrap a service router with the shared middleware stack
//! - Bind it to a listener and serve until shutdown is signalled
//!
//! Both services run through this type; only their routers differ.

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::http::request::{propagate_request_id_layer, set_request_id_layer};

/// HTTP server for one service.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server around a service router.
    pub fn new(app: Router) -> Self {
        Self {
            router: Self::build_router(app),
        }
    }

    /// Add the middleware layers. The request ID is set outermost so the
    /// trace layer and the handlers both see it.
    fn build_router(app: Router) -> Router {
        app.layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Serve on `listener` until `shutdown` fires or its sender is dropped.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
