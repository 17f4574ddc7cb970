//! Lookup error taxonomy.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that terminate a lookup request.
///
/// Every variant is final: nothing is retried and no partial result is written.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Anything other than POST.
    #[error("invalid request method")]
    MethodNotAllowed,

    /// Body is not decodable JSON.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    /// Code missing, not a string, or not eight digits.
    #[error("invalid zipcode")]
    InvalidCode,

    /// The address source reported the code as unknown.
    #[error("can not find zipcode")]
    AddressNotFound,

    /// The weather source has no match for the locality.
    #[error("can not find weather for locality")]
    WeatherNotFound,

    /// Connection failure, unexpected status or undecodable reply.
    #[error("{0}")]
    Transport(String),

    /// A downstream service answered with its own error envelope.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },
}

impl LookupError {
    /// HTTP status reported to the caller.
    pub fn status(&self) -> StatusCode {
        match self {
            LookupError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            LookupError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            LookupError::InvalidCode
            | LookupError::AddressNotFound
            | LookupError::WeatherNotFound => StatusCode::UNPROCESSABLE_ENTITY,
            LookupError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            LookupError::Upstream { status, .. } => *status,
        }
    }

    /// Coarse class used in logs and span attributes.
    pub fn kind(&self) -> &'static str {
        match self {
            LookupError::MethodNotAllowed
            | LookupError::MalformedBody(_)
            | LookupError::InvalidCode => "validation",
            LookupError::AddressNotFound | LookupError::WeatherNotFound => "domain",
            LookupError::Transport(_) | LookupError::Upstream { .. } => "transport",
        }
    }

    /// Plain-text body (gateway contract).
    pub fn into_text_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }

    /// `{"error": "..."}` body (resolver contract).
    pub fn into_json_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorBody { error: self.to_string() })).into_response()
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        LookupError::Transport(err.to_string())
    }
}

/// JSON error envelope written by the resolver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
