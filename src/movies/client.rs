//! Movie search service client implementation.
//!
//! Issues the date search request and folds every failure into a
//! [`SearchError`].

use crate::config::Config;
use crate::date::{format_query_date, is_query_representable};
use crate::movies::error::SearchError;
use crate::movies::models::{ApiErrorBody, SearchResult};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use reqwest::{Client, Url};
use std::time::Duration;

/// Path of the search endpoint, relative to the service base URL.
const SEARCH_PATH: &str = "api/movies";

/// Movie search service client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct MovieClient {
    /// HTTP client for API requests
    client: Client,
    /// Base URL of the search service
    base_url: String,
}

impl MovieClient {
    /// Create a new client from configuration.
    ///
    /// # Arguments
    /// * `config` - Application configuration
    ///
    /// # Returns
    /// * `Result<MovieClient>` - New client or error
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.api_base_url, Duration::from_secs(config.timeout_secs))
    }

    /// Create a client for an explicit base URL and timeout.
    ///
    /// # Details
    /// The base URL is not validated here. A malformed one surfaces as
    /// [`SearchError::RequestSetup`] on the first search.
    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search for movies released on a date.
    ///
    /// # Arguments
    /// * `date` - Release date to look up
    ///
    /// # Returns
    /// * `Result<SearchResult, SearchError>` - Service payload, unchanged, or the
    ///   classified failure
    ///
    /// # Details
    /// Sends `GET {base}/api/movies?date=MM/DD/YYYY`. Only a 2xx status counts
    /// as success. Failures are classified as:
    /// - `Server`: a response arrived with a non-2xx status
    /// - `NoResponse`: the request was sent but nothing came back
    /// - `RequestSetup`: the request could not be built
    pub async fn search_by_date(&self, date: NaiveDate) -> Result<SearchResult, SearchError> {
        if !is_query_representable(date) {
            tracing::warn!(%date, "rejecting date outside the MM/DD/YYYY range");
            return Err(SearchError::InvalidInput);
        }

        let query_date = format_query_date(date);
        let endpoint = self.endpoint()?;
        let request = self
            .client
            .get(endpoint)
            .query(&[("date", query_date.as_str())])
            .build()
            .map_err(|e| SearchError::RequestSetup(e.to_string()))?;

        tracing::info!(url = %request.url(), "searching movies for {}", query_date);

        let response = self
            .client
            .execute(request)
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            tracing::warn!(error = %e, "failed to read search response body");
            SearchError::NoResponse
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.error);
            tracing::warn!(status = status.as_u16(), ?message, "search service returned an error");
            return Err(SearchError::server(status.as_u16(), message));
        }

        match serde_json::from_str::<SearchResult>(&body) {
            Ok(result) => {
                tracing::info!(
                    movies = result.movies.len(),
                    exact = result.found_exact_date,
                    "search for {} completed",
                    query_date
                );
                Ok(result)
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse search response");
                Err(SearchError::server(status.as_u16(), None))
            }
        }
    }

    /// Full URL of the search endpoint.
    fn endpoint(&self) -> Result<Url, SearchError> {
        let raw = format!("{}/{}", self.base_url, SEARCH_PATH);
        Url::parse(&raw).map_err(|e| SearchError::RequestSetup(e.to_string()))
    }
}

/// Map a reqwest dispatch error onto the search error taxonomy.
///
/// Builder errors mean the request never left; anything else (connect
/// failure, timeout, reset) means no response was received.
fn classify_transport_error(error: reqwest::Error) -> SearchError {
    if error.is_builder() {
        tracing::warn!(error = %error, "failed to build search request");
        SearchError::RequestSetup(error.to_string())
    } else {
        tracing::warn!(
            error = %error,
            timeout = error.is_timeout(),
            connect = error.is_connect(),
            "no response from search service"
        );
        SearchError::NoResponse
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movies::error::{GENERIC_SERVER_MESSAGE, NO_RESPONSE_MESSAGE};
    use axum::Router;
    use axum::extract::Query;
    use axum::http::StatusCode;
    use axum::routing::get;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use tokio::net::TcpListener;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Serve `router` on an ephemeral port and return its base URL.
    async fn spawn_server(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    /// Server that always answers with `status` and `body`.
    async fn fixed_response(status: StatusCode, body: &'static str) -> String {
        let router = Router::new().route(
            "/api/movies",
            get(move || async move {
                (status, [("content-type", "application/json")], body)
            }),
        );
        spawn_server(router).await
    }

    fn client_for(base_url: &str) -> MovieClient {
        MovieClient::with_base_url(base_url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_client_new_from_config() {
        let config = Config {
            api_base_url: "http://localhost:5003/".to_string(),
            ..Config::default()
        };
        let client = MovieClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:5003");
    }

    #[tokio::test]
    async fn test_search_sends_formatted_date_and_passes_payload_through() {
        let seen: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let seen_in_handler = seen.clone();
        let router = Router::new().route(
            "/api/movies",
            get(move |Query(params): Query<HashMap<String, String>>| {
                let seen = seen_in_handler.clone();
                async move {
                    seen.lock()
                        .unwrap()
                        .push(params.get("date").cloned().unwrap_or_default());
                    (
                        [("content-type", "application/json")],
                        r#"{
                            "date": "07/05/2023",
                            "formatted_date": "July 05, 2023",
                            "found_exact_date": false,
                            "movies": [
                                {"title": "Zeta", "release_date": "July 28, 1995", "summary": "Last.", "url": null},
                                {"title": "Alpha", "release_date": "July 01, 1980", "summary": "First."}
                            ]
                        }"#,
                    )
                }
            }),
        );
        let base = spawn_server(router).await;

        let result = client_for(&base).search_by_date(ymd(2023, 7, 5)).await.unwrap();

        assert_eq!(seen.lock().unwrap().as_slice(), ["07/05/2023"]);
        assert_eq!(result.formatted_date, "July 05, 2023");
        assert!(!result.found_exact_date);
        let titles: Vec<&str> = result.movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Zeta", "Alpha"]);
    }

    #[tokio::test]
    async fn test_error_field_becomes_message() {
        let base = fixed_response(StatusCode::NOT_FOUND, r#"{"error":"not found"}"#).await;

        let err = client_for(&base)
            .search_by_date(ymd(2023, 7, 15))
            .await
            .unwrap_err();

        assert_eq!(
            err,
            SearchError::Server {
                status: 404,
                message: "not found".to_string()
            }
        );
        assert_eq!(err.to_string(), "not found");
    }

    #[tokio::test]
    async fn test_server_error_without_error_field_uses_generic_message() {
        let base = fixed_response(StatusCode::INTERNAL_SERVER_ERROR, r#"{"detail":"boom"}"#).await;

        let err = client_for(&base)
            .search_by_date(ymd(2023, 7, 15))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), GENERIC_SERVER_MESSAGE);
    }

    #[tokio::test]
    async fn test_server_error_with_non_json_body_uses_generic_message() {
        let base = fixed_response(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>").await;

        let err = client_for(&base)
            .search_by_date(ymd(2023, 7, 15))
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Server { status: 502, .. }));
        assert_eq!(err.to_string(), GENERIC_SERVER_MESSAGE);
    }

    #[tokio::test]
    async fn test_unparsable_success_body_is_a_server_error() {
        let base = fixed_response(StatusCode::OK, r#"{"unexpected": true}"#).await;

        let err = client_for(&base)
            .search_by_date(ymd(2023, 7, 15))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), GENERIC_SERVER_MESSAGE);
    }

    #[tokio::test]
    async fn test_connection_refused_is_no_response() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{}", addr))
            .search_by_date(ymd(2023, 7, 15))
            .await
            .unwrap_err();

        assert_eq!(err, SearchError::NoResponse);
        assert_eq!(err.to_string(), NO_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_timeout_is_no_response() {
        let router = Router::new().route(
            "/api/movies",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        );
        let base = spawn_server(router).await;
        let client = MovieClient::with_base_url(&base, Duration::from_millis(200)).unwrap();

        let err = client.search_by_date(ymd(2023, 7, 15)).await.unwrap_err();

        assert_eq!(err, SearchError::NoResponse);
    }

    #[tokio::test]
    async fn test_malformed_base_url_is_request_setup() {
        let err = client_for("not a url")
            .search_by_date(ymd(2023, 7, 15))
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::RequestSetup(_)));
        assert!(err.to_string().starts_with("Error setting up request: "));
    }

    #[tokio::test]
    async fn test_unrepresentable_date_fails_before_network() {
        // Nothing listens here; reaching the network would yield NoResponse
        let err = client_for("http://127.0.0.1:1")
            .search_by_date(ymd(10_000, 1, 1))
            .await
            .unwrap_err();

        assert_eq!(err, SearchError::InvalidInput);
    }
}
