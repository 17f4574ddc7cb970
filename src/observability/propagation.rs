//! W3C trace-context propagation over HTTP headers.
//!
//! # Responsibilities
//! - Serialize the active span context into outbound request headers
//! - Rebuild a parent context from inbound request headers
//!
//! Extraction never fails: headers without a usable `traceparent` yield an
//! empty context, and spans started from it open a fresh trace.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use opentelemetry::propagation::{Extractor, Injector, TextMapPropagator};
use opentelemetry::Context;
use opentelemetry_sdk::propagation::TraceContextPropagator;

/// W3C Trace Context header name.
pub const TRACEPARENT: &str = "traceparent";

struct HeaderInjector<'a>(&'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let (Ok(name), Ok(val)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, val);
        }
    }
}

struct HeaderExtractor<'a>(&'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|v| v.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(|k| k.as_str()).collect()
    }
}

/// Trace-context propagator bound to HTTP header maps.
#[derive(Debug, Clone, Default)]
pub struct Propagator {
    inner: TraceContextPropagator,
}

impl Propagator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write the span context held by `cx` into `headers`.
    ///
    /// A context without a valid span writes nothing.
    pub fn inject(&self, cx: &Context, headers: &mut HeaderMap) {
        self.inner.inject_context(cx, &mut HeaderInjector(headers));
    }

    /// Read a remote parent from `headers`.
    ///
    /// Starts from an empty context rather than the thread's current one, so
    /// the result depends on the headers alone.
    pub fn extract(&self, headers: &HeaderMap) -> Context {
        self.inner
            .extract_with_context(&Context::new(), &HeaderExtractor(headers))
    }
}
