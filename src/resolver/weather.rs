//! Weather lookup collaborator.

use async_trait::async_trait;
use axum::http::StatusCode;
use serde::Deserialize;

use crate::lookup::{LookupError, WeatherResult};

/// WeatherAPI error code for "No matching location found".
const NO_MATCHING_LOCATION: i64 = 1006;

/// Looks up current weather for a free-text place name.
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// `Err(WeatherNotFound)` when the place is unknown to the source,
    /// `Err(Transport)` for everything that is not a usable answer.
    async fn current(&self, locality: &str) -> Result<WeatherResult, LookupError>;
}

#[derive(Debug, Deserialize)]
struct CurrentResponse {
    location: Location,
    current: Current,
}

#[derive(Debug, Deserialize)]
struct Location {
    name: String,
}

#[derive(Debug, Deserialize)]
struct Current {
    temp_c: f64,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: i64,
}

/// Percent-encode `value` for use as a query parameter (spaces become `+`).
pub fn encode_query(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// HTTP client for a WeatherAPI-compatible `current.json` endpoint.
pub struct WeatherApiClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl WeatherApiClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    fn url_for(&self, locality: &str) -> String {
        format!(
            "{}?q={}&key={}",
            self.endpoint,
            encode_query(locality),
            encode_query(&self.api_key)
        )
    }
}

#[async_trait]
impl WeatherLookup for WeatherApiClient {
    async fn current(&self, locality: &str) -> Result<WeatherResult, LookupError> {
        let response = self.http.get(self.url_for(locality)).send().await?;
        let status = response.status();

        if status == StatusCode::BAD_REQUEST {
            let body = response.bytes().await?;
            return match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(e) if e.error.code == NO_MATCHING_LOCATION => Err(LookupError::WeatherNotFound),
                _ => Err(LookupError::Transport(format!(
                    "weather lookup responded with status {status}"
                ))),
            };
        }
        if !status.is_success() {
            return Err(LookupError::Transport(format!(
                "weather lookup responded with status {status}"
            )));
        }

        let body: CurrentResponse = response.json().await?;
        Ok(WeatherResult::from_celsius(body.location.name, body.current.temp_c))
    }
}
