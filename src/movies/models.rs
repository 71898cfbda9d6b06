//! Movie search models and data structures.
//!
//! Mirrors the JSON payloads exchanged with the movie search service.

use serde::{Deserialize, Serialize};

/// A single movie returned by the search service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Movie {
    /// Movie title
    pub title: String,
    /// Release date, already formatted for display
    #[serde(default)]
    pub release_date: String,
    /// Plot and production summary (may be empty)
    #[serde(default)]
    pub summary: String,
    /// Link to the movie's page, if one exists
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
impl Movie {
    /// Create a movie without a link.
    pub fn new(title: impl Into<String>, release_date: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            release_date: release_date.into(),
            summary: summary.into(),
            url: None,
        }
    }

    /// Attach a link to the movie.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

/// Search response payload.
///
/// Returned unchanged from the service. `movies` keeps the service's order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// The query date echoed back by the service (`MM/DD/YYYY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Label for what was actually matched: the requested date or its month
    pub formatted_date: String,
    /// True when movies released on the exact date were found
    #[serde(default)]
    pub found_exact_date: bool,
    /// Matched movies
    #[serde(default)]
    pub movies: Vec<Movie>,
}

/// Error body of a failed search (`{"error": "..."}`).
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    /// Server-provided error message
    #[serde(default)]
    pub error: Option<String>,
}
