//! Span lifecycle for request handlers.
//!
//! # Responsibilities
//! - Hand out spans from an explicitly passed tracer
//! - Tie each span's lifetime to a guard value
//! - Expose inject/extract next to span creation so handlers need one dependency

use std::borrow::Cow;

use axum::http::HeaderMap;
use opentelemetry::trace::{
    SpanKind, Status, TraceContextExt, TraceId, Tracer as _, TracerProvider as _,
};
use opentelemetry::{Context, KeyValue, Value};
use opentelemetry_sdk::trace::{SdkTracer, SdkTracerProvider};

use crate::observability::propagation::Propagator;

/// Tracing capability threaded through each handler's state.
#[derive(Clone)]
pub struct Telemetry {
    tracer: SdkTracer,
    propagator: Propagator,
}

impl Telemetry {
    /// Bind a tracer named `scope` from `provider`.
    pub fn from_provider(provider: &SdkTracerProvider, scope: &'static str) -> Self {
        Self {
            tracer: provider.tracer(scope),
            propagator: Propagator::new(),
        }
    }

    /// Telemetry that creates and propagates spans but never exports them.
    pub fn noop() -> Self {
        Self::from_provider(&SdkTracerProvider::builder().build(), "noop")
    }

    /// Start a server span. An unlinked `parent` starts a new trace.
    pub fn start_server(&self, name: impl Into<Cow<'static, str>>, parent: &Context) -> SpanGuard {
        self.start(name, SpanKind::Server, parent)
    }

    /// Start a span around an outbound call.
    pub fn start_client(&self, name: impl Into<Cow<'static, str>>, parent: &Context) -> SpanGuard {
        self.start(name, SpanKind::Client, parent)
    }

    /// Start an in-process child span.
    pub fn start_child(&self, name: impl Into<Cow<'static, str>>, parent: &Context) -> SpanGuard {
        self.start(name, SpanKind::Internal, parent)
    }

    pub fn inject(&self, cx: &Context, headers: &mut HeaderMap) {
        self.propagator.inject(cx, headers);
    }

    pub fn extract(&self, headers: &HeaderMap) -> Context {
        self.propagator.extract(headers)
    }

    fn start(
        &self,
        name: impl Into<Cow<'static, str>>,
        kind: SpanKind,
        parent: &Context,
    ) -> SpanGuard {
        let span = self
            .tracer
            .span_builder(name)
            .with_kind(kind)
            .start_with_context(&self.tracer, parent);

        SpanGuard {
            cx: parent.with_span(span),
        }
    }
}

/// An open span. Ends when dropped.
#[must_use = "the span ends as soon as the guard is dropped"]
pub struct SpanGuard {
    cx: Context,
}

impl SpanGuard {
    /// Context carrying this span, for children and injection.
    pub fn context(&self) -> &Context {
        &self.cx
    }

    pub fn set_attribute(&self, key: &'static str, value: impl Into<Value>) {
        self.cx.span().set_attribute(KeyValue::new(key, value));
    }

    /// Mark the span as failed with `message`.
    pub fn fail(&self, message: impl Into<Cow<'static, str>>) {
        self.cx.span().set_status(Status::error(message));
    }

    pub fn trace_id(&self) -> TraceId {
        self.cx.span().span_context().trace_id()
    }
}

impl Drop for SpanGuard {
    fn drop(&mut self) {
        self.cx.span().end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::SpanId;
    use opentelemetry_sdk::trace::InMemorySpanExporter;

    fn recording() -> (Telemetry, InMemorySpanExporter) {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        (Telemetry::from_provider(&provider, "test"), exporter)
    }

    #[test]
    fn test_guard_ends_span_on_drop() {
        let (telemetry, exporter) = recording();

        {
            let root = telemetry.start_server("root", &Context::new());
            root.set_attribute("cep", "01310930");
            assert!(exporter.get_finished_spans().unwrap().is_empty());
        }

        let spans = exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].name, "root");
        assert_eq!(spans[0].parent_span_id, SpanId::INVALID);
        assert!(spans[0]
            .attributes
            .iter()
            .any(|kv| kv.key.as_str() == "cep" && kv.value.as_str() == "01310930"));
    }

    #[test]
    fn test_children_share_trace() {
        let (telemetry, exporter) = recording();

        let root = telemetry.start_server("root", &Context::new());
        let root_span_id = root.context().span().span_context().span_id();
        drop(telemetry.start_client("call", root.context()));
        drop(root);

        let spans = exporter.get_finished_spans().unwrap();
        assert_eq!(spans.len(), 2);
        let child = spans.iter().find(|s| s.name == "call").unwrap();
        let parent = spans.iter().find(|s| s.name == "root").unwrap();
        assert_eq!(child.span_context.trace_id(), parent.span_context.trace_id());
        assert_eq!(child.parent_span_id, root_span_id);
        assert_eq!(child.span_kind, SpanKind::Client);
    }

    #[test]
    fn test_fail_sets_error_status() {
        let (telemetry, exporter) = recording();

        let span = telemetry.start_child("lookup", &Context::new());
        span.fail("can not find zipcode");
        drop(span);

        let spans = exporter.get_finished_spans().unwrap();
        assert!(matches!(spans[0].status, Status::Error { .. }));
    }

    #[test]
    fn test_noop_still_propagates() {
        let telemetry = Telemetry::noop();
        let root = telemetry.start_server("root", &Context::new());
        assert_ne!(root.trace_id(), TraceId::INVALID);

        let mut headers = HeaderMap::new();
        telemetry.inject(root.context(), &mut headers);
        let cx = telemetry.extract(&headers);
        assert_eq!(cx.span().span_context().trace_id(), root.trace_id());
    }
}
