//! In-memory query store with history.
//!
//! Stands in for the browser location in desktop hosts and tests. Each
//! navigation to a different query pushes a history entry; `back` pops one.

use tracing::debug;

use crate::traits::QueryStore;

/// Query string plus navigation history.
#[derive(Debug, Clone, Default)]
pub struct MemoryLocation {
    current: String,
    history: Vec<String>,
    /// Bumped on every effective navigation.
    version: u64,
}

impl MemoryLocation {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            current: query.strip_prefix('?').map(str::to_string).unwrap_or(query),
            history: Vec::new(),
            version: 0,
        }
    }

    /// Previous query strings, oldest first.
    pub fn history(&self) -> &[String] {
        &self.history
    }

    /// Navigation counter; collaborators compare it to know when to refetch.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns to the previous query string.
    ///
    /// # Returns
    /// `true` if there was history to go back to.
    pub fn back(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.current = previous;
                self.version += 1;
                true
            }
            None => false,
        }
    }
}

impl QueryStore for MemoryLocation {
    fn query(&self) -> String {
        self.current.clone()
    }

    fn navigate(&mut self, query: String) {
        let query = query.strip_prefix('?').map(str::to_string).unwrap_or(query);
        if query == self.current {
            return;
        }
        debug!(from = %self.current, to = %query, "query navigation");
        let previous = std::mem::replace(&mut self.current, query);
        self.history.push(previous);
        self.version += 1;
    }
}
