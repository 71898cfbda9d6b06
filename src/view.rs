//! Search view state machine.
//!
//! Owns the selected date, loading flag, error and latest result. Only this
//! type mutates that state; renderers read it.

use crate::movies::{SearchError, SearchResult};
use chrono::NaiveDate;

/// Validation message for submitting without a date.
pub const SELECT_DATE_MESSAGE: &str = "Please select a date";

/// Identifier of one dispatched search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

impl RequestId {
    /// Raw numeric value, for logging.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A search the caller must dispatch and later report back via
/// [`SearchView::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchRequest {
    /// Identifier to pass back with the outcome
    pub id: RequestId,
    /// Date to search for
    pub date: NaiveDate,
}

/// Where the view currently is in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing picked yet
    Idle,
    /// A date is picked but not searched (or the last submit failed validation)
    DateSelected,
    /// A search is in flight
    Searching,
    /// The last search succeeded
    Resulted,
    /// The last search failed
    Failed,
}

/// UI state for the date search.
#[derive(Debug, Default)]
pub struct SearchView {
    selected_date: Option<NaiveDate>,
    result: Option<SearchResult>,
    loading: bool,
    error: Option<String>,
    search_performed: bool,
    in_flight: Option<RequestId>,
    next_request: u64,
}

impl SearchView {
    /// Create an empty view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected date.
    pub fn selected_date(&self) -> Option<NaiveDate> {
        self.selected_date
    }

    /// Latest successful result.
    pub fn result(&self) -> Option<&SearchResult> {
        self.result.as_ref()
    }

    /// Whether a search is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Error message to display inline.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a search has been submitted since the date last changed.
    pub fn search_performed(&self) -> bool {
        self.search_performed
    }

    /// Identifier of the search currently in flight.
    pub fn in_flight(&self) -> Option<RequestId> {
        self.in_flight
    }

    /// Current phase, derived from the state fields.
    pub fn phase(&self) -> Phase {
        if self.loading {
            Phase::Searching
        } else if self.result.is_some() {
            Phase::Resulted
        } else if self.search_performed && self.error.is_some() {
            Phase::Failed
        } else if self.selected_date.is_some() {
            Phase::DateSelected
        } else {
            Phase::Idle
        }
    }

    /// Handle the user picking a date.
    ///
    /// # Details
    /// If a search was already performed, its result and error are cleared so
    /// stale results never sit next to an unsearched date. A search still in
    /// flight is superseded and its outcome will be discarded.
    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = Some(date);

        if let Some(id) = self.in_flight.take() {
            tracing::debug!(request = id.get(), "date changed, superseding search");
            self.loading = false;
        }

        if self.search_performed {
            self.result = None;
            self.error = None;
            self.search_performed = false;
        }
    }

    /// Handle the user submitting the search.
    ///
    /// # Returns
    /// * `Option<SearchRequest>` - The search to dispatch, or None when nothing
    ///   should be sent
    ///
    /// # Details
    /// Without a selected date the validation message is set and no search is
    /// started. A submit while a search is loading is ignored.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let date = match self.selected_date {
            Some(date) => date,
            None => {
                self.error = Some(SELECT_DATE_MESSAGE.to_string());
                return None;
            }
        };

        if self.loading {
            return None;
        }

        self.next_request += 1;
        let id = RequestId(self.next_request);

        self.error = None;
        self.result = None;
        self.loading = true;
        self.search_performed = true;
        self.in_flight = Some(id);

        Some(SearchRequest { id, date })
    }

    /// Apply the outcome of a dispatched search.
    ///
    /// # Arguments
    /// * `id` - Identifier from the matching [`SearchRequest`]
    /// * `outcome` - Result of the search
    ///
    /// # Returns
    /// * `bool` - True if applied, false if the request was superseded
    pub fn resolve(&mut self, id: RequestId, outcome: Result<SearchResult, SearchError>) -> bool {
        if self.in_flight != Some(id) {
            tracing::debug!(request = id.get(), "discarding stale search outcome");
            return false;
        }

        self.in_flight = None;
        self.loading = false;
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(e) => {
                self.error = Some(e.to_string());
                self.result = None;
            }
        }
        true
    }
}
