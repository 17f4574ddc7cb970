//! Outbound call from the gateway to the resolver.

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};

use crate::lookup::{LookupError, LookupRequest};

/// Raw reply from the resolver, any status.
#[derive(Debug, Clone)]
pub struct ResolverReply {
    pub status: StatusCode,
    pub body: Bytes,
}

/// HTTP client bound to the resolver's lookup endpoint.
#[derive(Clone)]
pub struct ResolverClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ResolverClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST `request` as JSON with the caller's `headers` (trace context).
    ///
    /// Only connection and body-read failures are errors here; a non-2xx
    /// reply is returned as-is for the handler to interpret.
    pub async fn forward(
        &self,
        request: &LookupRequest,
        headers: HeaderMap,
    ) -> Result<ResolverReply, LookupError> {
        let response = self
            .http
            .post(&self.endpoint)
            .headers(headers)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        Ok(ResolverReply { status, body })
    }
}
