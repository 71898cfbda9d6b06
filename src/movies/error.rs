//! Search failure classification.

use thiserror::Error;

/// Message shown when the service fails without saying why.
pub const GENERIC_SERVER_MESSAGE: &str = "Error fetching movie data";

/// Message shown when a request got no reply.
pub const NO_RESPONSE_MESSAGE: &str =
    "No response from server. Please check your internet connection.";

/// Why a movie search failed.
///
/// Every variant renders a message ready to show to the user; callers only
/// need `to_string()`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SearchError {
    /// The date cannot be expressed as `MM/DD/YYYY`
    #[error("Invalid date provided")]
    InvalidInput,
    /// The service answered with a non-success status
    #[error("{message}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Message from the body's `error` field, or the generic message
        message: String,
    },
    /// The request went out but nothing came back
    #[error("{}", NO_RESPONSE_MESSAGE)]
    NoResponse,
    /// The request could not be built or dispatched
    #[error("Error setting up request: {0}")]
    RequestSetup(String),
}

impl SearchError {
    /// Build a server error, falling back to the generic message.
    pub fn server(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| GENERIC_SERVER_MESSAGE.to_string());
        Self::Server { status, message }
    }
}
