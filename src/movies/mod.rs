//! Movie search service integration module.
//!
//! Provides the client for looking up Telugu movies by release date.

pub mod client;
pub mod error;
pub mod models;

pub use client::MovieClient;
pub use error::SearchError;
pub use models::{Movie, SearchResult};
