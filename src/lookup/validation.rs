//! Inbound request validation.
//!
//! # Responsibilities
//! - Decode the `{"cep": ...}` body
//! - Reject codes that are not strings or not exactly eight ASCII digits
//!
//! Both services call into this module; neither keeps its own copy of the rules.

use serde_json::{Map, Value};

use crate::lookup::error::LookupError;
use crate::lookup::types::LookupRequest;

/// Number of digits in a postal code.
pub const CODE_LENGTH: usize = 8;

/// Whether `code` has the shape of a postal code.
pub fn is_valid_code(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

impl LookupRequest {
    /// Parse and validate an inbound request body.
    ///
    /// Anything other than a JSON object is a [`LookupError::MalformedBody`];
    /// a missing, non-string or wrongly shaped code is a
    /// [`LookupError::InvalidCode`].
    pub fn from_json(body: &[u8]) -> Result<Self, LookupError> {
        let mut fields: Map<String, Value> = serde_json::from_slice(body)
            .map_err(|e| LookupError::MalformedBody(e.to_string()))?;

        match fields.remove("cep") {
            Some(Value::String(code)) if is_valid_code(&code) => Ok(Self { code }),
            _ => Err(LookupError::InvalidCode),
        }
    }
}
