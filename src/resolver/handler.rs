//! Resolver request handler.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::lookup::{AddressResult, LookupError, LookupRequest, WeatherResult};
use crate::observability::SpanGuard;
use crate::resolver::ResolverState;

/// `POST /cep` on the resolver.
///
/// The root span is parented to the caller's trace when `traceparent` is
/// present. Errors are written as `{"error": "..."}`.
pub async fn handle_lookup(
    State(state): State<ResolverState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let parent = state.telemetry.extract(&headers);
    let root = state
        .telemetry
        .start_server("resolver.handle_lookup", &parent);

    match resolve(&state, &root, &method, &body).await {
        Ok(weather) => {
            let _span = state
                .telemetry
                .start_child("resolver.write_response", root.context());
            tracing::debug!(city = %weather.place, "Lookup resolved");
            (StatusCode::OK, Json(weather)).into_response()
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
            err.into_json_response()
        }
    }
}

async fn resolve(
    state: &ResolverState,
    root: &SpanGuard,
    method: &Method,
    body: &[u8],
) -> Result<WeatherResult, LookupError> {
    if *method != Method::POST {
        return Err(LookupError::MethodNotAllowed);
    }

    let request = LookupRequest::from_json(body)?;
    root.set_attribute("cep", request.code().to_string());

    let address = lookup_address(state, root, request.code()).await?;
    lookup_weather(state, root, &address).await
}

async fn lookup_address(
    state: &ResolverState,
    root: &SpanGuard,
    code: &str,
) -> Result<AddressResult, LookupError> {
    let span = state
        .telemetry
        .start_client("resolver.address_lookup", root.context());
    span.set_attribute("cep", code.to_string());

    let result = state.address.lookup(code).await;
    match &result {
        Ok(address) => span.set_attribute("locality", address.locality.clone()),
        Err(err) => span.fail(err.to_string()),
    }
    result
}

async fn lookup_weather(
    state: &ResolverState,
    root: &SpanGuard,
    address: &AddressResult,
) -> Result<WeatherResult, LookupError> {
    let span = state
        .telemetry
        .start_client("resolver.weather_lookup", root.context());
    span.set_attribute("locality", address.locality.clone());

    let result = state.weather.current(&address.locality).await;
    match &result {
        Ok(weather) => span.set_attribute("weather", weather.summary()),
        Err(err) => span.fail(err.to_string()),
    }
    result
}
