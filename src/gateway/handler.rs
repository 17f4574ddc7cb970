//! Gateway request handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method},
    response::{IntoResponse, Response},
};
use opentelemetry::Context;

use crate::gateway::client::ResolverReply;
use crate::gateway::GatewayState;
use crate::lookup::{ErrorBody, LookupError, LookupRequest};
use crate::observability::SpanGuard;

/// `POST /cep` on the gateway.
///
/// Opens the root span, validates, forwards to the resolver and relays the
/// outcome. Every span opened here is closed before the response is returned.
pub async fn handle_lookup(
    State(state): State<GatewayState>,
    method: Method,
    body: Bytes,
) -> Response {
    let root = state
        .telemetry
        .start_server("gateway.handle_lookup", &Context::new());

    if !state.response_delay.is_zero() {
        tokio::time::sleep(state.response_delay).await;
    }

    match forward_lookup(&state, &root, &method, &body).await {
        Ok(pretty) => {
            tracing::debug!(status = 200, "Lookup relayed");
            ([(header::CONTENT_TYPE, "application/json")], pretty).into_response()
        }
        Err(err) => {
            tracing::warn!(
                status = err.status().as_u16(),
                kind = err.kind(),
                error = %err,
                "Lookup failed"
            );
            root.set_attribute("error.kind", err.kind());
            root.fail(err.to_string());
            err.into_text_response()
        }
    }
}

async fn forward_lookup(
    state: &GatewayState,
    root: &SpanGuard,
    method: &Method,
    body: &[u8],
) -> Result<Vec<u8>, LookupError> {
    if *method != Method::POST {
        return Err(LookupError::MethodNotAllowed);
    }

    let request = LookupRequest::from_json(body)?;
    root.set_attribute("cep", request.code().to_string());

    let reply = {
        let span = state
            .telemetry
            .start_client("gateway.resolver_request", root.context());
        span.set_attribute("http.url", state.resolver.endpoint().to_string());

        let mut headers = HeaderMap::new();
        state.telemetry.inject(span.context(), &mut headers);

        let reply = state.resolver.forward(&request, headers).await;
        match &reply {
            Ok(reply) => span.set_attribute("http.status_code", i64::from(reply.status.as_u16())),
            Err(err) => span.fail(err.to_string()),
        }
        reply?
    };

    let span = state
        .telemetry
        .start_child("gateway.resolver_response", root.context());
    span.set_attribute("response.body", String::from_utf8_lossy(&reply.body).into_owned());

    relay(reply)
}

/// Turn a resolver reply into the gateway's response body.
///
/// 2xx bodies are re-serialized with two-space indentation. A non-2xx reply
/// carrying `{"error": ...}` keeps its status and message; anything else is a
/// transport failure.
fn relay(reply: ResolverReply) -> Result<Vec<u8>, LookupError> {
    if reply.status.is_success() {
        let value: serde_json::Value = serde_json::from_slice(&reply.body)
            .map_err(|e| LookupError::Transport(format!("undecodable resolver response: {e}")))?;
        return serde_json::to_vec_pretty(&value)
            .map_err(|e| LookupError::Transport(e.to_string()));
    }

    match serde_json::from_slice::<ErrorBody>(&reply.body) {
        Ok(envelope) => Err(LookupError::Upstream {
            status: reply.status,
            message: envelope.error,
        }),
        Err(_) => Err(LookupError::Transport(format!(
            "resolver responded with status {}",
            reply.status
        ))),
    }
}
