//! Address lookup collaborator.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::lookup::{AddressResult, LookupError};

/// Resolves a postal code to a locality.
#[async_trait]
pub trait AddressLookup: Send + Sync {
    /// `Err(AddressNotFound)` when the source reports the code as unknown,
    /// `Err(Transport)` for everything that is not a usable answer.
    async fn lookup(&self, code: &str) -> Result<AddressResult, LookupError>;
}

/// ViaCEP-style response body.
#[derive(Debug, Deserialize)]
struct AddressResponse {
    #[serde(default)]
    localidade: String,
    /// `true` (or `"true"` in newer API revisions) for unknown codes.
    #[serde(default)]
    erro: Value,
}

impl AddressResponse {
    fn not_found(&self) -> bool {
        match &self.erro {
            Value::Bool(flag) => *flag,
            Value::String(flag) => flag == "true",
            _ => false,
        }
    }
}

/// HTTP client for a ViaCEP-compatible API (`{base}/{code}/json/`).
pub struct ViaCepClient {
    http: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, code: &str) -> String {
        format!("{}/{}/json/", self.base_url.trim_end_matches('/'), code)
    }
}

#[async_trait]
impl AddressLookup for ViaCepClient {
    async fn lookup(&self, code: &str) -> Result<AddressResult, LookupError> {
        let url = self.url_for(code);
        tracing::debug!(%url, "Requesting address");

        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!(
                "address lookup responded with status {status}"
            )));
        }

        let body: AddressResponse = response.json().await?;
        if body.not_found() {
            return Err(LookupError::AddressNotFound);
        }

        Ok(AddressResult {
            locality: body.localidade,
        })
    }
}
