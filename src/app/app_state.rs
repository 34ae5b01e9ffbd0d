//! Centralized state for the demo application.
//!
//! Composes the query store, the row source standing in for the remote API,
//! and the page of rows fetched for the current query.

use rgrid::{decode, MemoryLocation, QueryStore};

use crate::app::listing_source::{FetchedPage, ListingSource};

/// Demo application state.
///
/// Responsibilities:
/// - Owning the query store the grid reads and writes
/// - Remembering which query version the current page was fetched for
/// - Mirroring the query into the editable address bar
pub struct AppState {
    // ===== Collaborators =====
    /// Query string and history
    pub location: MemoryLocation,

    /// Rows answering grid queries
    pub source: ListingSource,

    /// Where the rows came from, for the header
    pub source_label: String,

    // ===== Derived =====
    /// Rows for the current query
    pub page: FetchedPage,

    /// Location version `page` was fetched for
    fetched_version: Option<u64>,

    /// Editable copy of the query string
    pub address: String,

    /// Current error message to display (if any)
    pub error_message: Option<String>,
}

impl AppState {
    /// Creates state over `source`, starting at `query`.
    pub fn new(source: ListingSource, source_label: impl Into<String>, query: &str) -> Self {
        let location = MemoryLocation::new(query);
        Self {
            address: location.query(),
            location,
            source,
            source_label: source_label.into(),
            page: FetchedPage::default(),
            fetched_version: None,
            error_message: None,
        }
    }

    /// Swaps the row source and forces a refetch.
    pub fn replace_source(&mut self, source: ListingSource, label: impl Into<String>) {
        self.source = source;
        self.source_label = label.into();
        self.fetched_version = None;
    }

    /// Re-runs the query if the location moved since the last fetch.
    ///
    /// # Returns
    /// `true` if rows were refetched.
    pub fn refresh(&mut self) -> bool {
        let version = self.location.version();
        if self.fetched_version == Some(version) {
            return false;
        }
        let query = self.location.query();
        self.page = self.source.fetch(&decode(&query));
        self.address = query;
        self.fetched_version = Some(version);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn refresh_follows_location_version() {
        let source = ListingSource::new((1..=30).map(|id| json!({"id": id})).collect());
        let mut state = AppState::new(source, "test", "?limit=10&page=2");
        assert!(state.refresh());
        assert_eq!(state.page.rows.len(), 10);
        assert_eq!(state.page.rows[0]["id"], json!(11));
        assert_eq!(state.address, "limit=10&page=2");
        assert!(!state.refresh());

        state.location.navigate("limit=10&page=3".to_string());
        assert!(state.refresh());
        assert_eq!(state.page.rows[0]["id"], json!(21));
    }
}
