//! Postal-code lookup domain shared by both services.
//!
//! # Data Flow
//! ```text
//! raw request body
//!     → validation.rs (parse JSON, check the code shape)
//!     → LookupRequest (validated, owned by one request)
//!     → AddressResult → WeatherResult (resolver only)
//! ```
//!
//! # Design Decisions
//! - One validation path for both services, so they cannot drift apart
//! - Errors carry their own status mapping; handlers only pick the body format

pub mod error;
pub mod types;
pub mod validation;

pub use error::{ErrorBody, LookupError};
pub use types::{AddressResult, LookupRequest, WeatherResult};
pub use validation::{is_valid_code, CODE_LENGTH};
