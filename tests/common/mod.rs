//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider, SpanData};
use tokio::net::TcpListener;

use weather_relay::lookup::{AddressResult, LookupError, WeatherResult};
use weather_relay::resolver::{AddressLookup, WeatherLookup};
use weather_relay::{HttpServer, Shutdown, Telemetry};

/// A service running on an ephemeral port. Stops when dropped.
pub struct TestApp {
    pub addr: SocketAddr,
    _shutdown: Shutdown,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

/// Serve `router` through the production middleware stack.
pub async fn spawn_app(router: Router) -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(router);
    let rx = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    TestApp {
        addr,
        _shutdown: shutdown,
    }
}

/// Telemetry whose finished spans can be inspected.
pub fn recording_telemetry(scope: &'static str) -> (Telemetry, InMemorySpanExporter) {
    let exporter = InMemorySpanExporter::default();
    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter.clone())
        .build();
    (Telemetry::from_provider(&provider, scope), exporter)
}

pub fn finished(exporter: &InMemorySpanExporter) -> Vec<SpanData> {
    exporter.get_finished_spans().unwrap()
}

pub fn span<'a>(spans: &'a [SpanData], name: &str) -> &'a SpanData {
    spans
        .iter()
        .find(|s| s.name == name)
        .unwrap_or_else(|| panic!("span {name} not recorded"))
}

pub fn attribute(span: &SpanData, key: &str) -> Option<String> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| kv.value.as_str().into_owned())
}

/// What a mock upstream saw on its last call.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: String,
}

/// A programmable HTTP backend answering every path with a fixed reply.
pub struct MockUpstream {
    pub addr: SocketAddr,
    pub calls: Arc<AtomicU32>,
    pub last: Arc<Mutex<Option<SeenRequest>>>,
    _app: TestApp,
}

impl MockUpstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> SeenRequest {
        self.last.lock().unwrap().clone().expect("upstream was never called")
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    calls: Arc<AtomicU32>,
    last: Arc<Mutex<Option<SeenRequest>>>,
}

async fn mock_reply(
    State(state): State<MockState>,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    state.calls.fetch_add(1, Ordering::SeqCst);
    *state.last.lock().unwrap() = Some(SeenRequest { uri, headers, body });
    (
        state.status,
        [(axum::http::header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

pub async fn start_mock_upstream(status: u16, body: &'static str) -> MockUpstream {
    let calls = Arc::new(AtomicU32::new(0));
    let last = Arc::new(Mutex::new(None));
    let state = MockState {
        status: StatusCode::from_u16(status).unwrap(),
        body,
        calls: calls.clone(),
        last: last.clone(),
    };

    let app = spawn_app(Router::new().fallback(mock_reply).with_state(state)).await;

    MockUpstream {
        addr: app.addr,
        calls,
        last,
        _app: app,
    }
}

/// An address with nothing listening on it.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// In-process address collaborator with a canned answer.
pub struct FakeAddress {
    result: Result<AddressResult, LookupError>,
    pub calls: AtomicU32,
}

impl FakeAddress {
    pub fn found(locality: &str) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(AddressResult {
                locality: locality.to_string(),
            }),
            calls: AtomicU32::new(0),
        })
    }

    pub fn failing(err: LookupError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            calls: AtomicU32::new(0),
        })
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AddressLookup for FakeAddress {
    async fn lookup(&self, _code: &str) -> Result<AddressResult, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

/// In-process weather collaborator with a canned answer.
pub struct FakeWeather {
    result: Result<f64, LookupError>,
    pub calls: AtomicU32,
    pub last_locality: Mutex<Option<String>>,
}

impl FakeWeather {
    pub fn celsius(value: f64) -> Arc<Self> {
        Arc::new(Self {
            result: Ok(value),
            calls: AtomicU32::new(0),
            last_locality: Mutex::new(None),
        })
    }

    pub fn failing(err: LookupError) -> Arc<Self> {
        Arc::new(Self {
            result: Err(err),
            calls: AtomicU32::new(0),
            last_locality: Mutex::new(None),
        })
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherLookup for FakeWeather {
    async fn current(&self, locality: &str) -> Result<WeatherResult, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_locality.lock().unwrap() = Some(locality.to_string());
        self.result
            .clone()
            .map(|celsius| WeatherResult::from_celsius(locality, celsius))
    }
}

/// Test HTTP client that never routes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
