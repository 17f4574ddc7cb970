//! HTTP plumbing shared by both services.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum serve, graceful shutdown)
//!     → request.rs (assign / echo x-request-id)
//!     → TraceLayer (request log events)
//!     → service router (gateway or resolver)
//! ```

pub mod request;
pub mod server;

pub use request::{UuidRequestId, X_REQUEST_ID};
pub use server::HttpServer;
