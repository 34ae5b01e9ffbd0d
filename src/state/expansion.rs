//! Expanded-row state.
//!
//! Which rows show their detail panel. Client-local only: it is never
//! written to the query string and lives exactly as long as the grid.

use std::collections::HashSet;

use crate::traits::RowKey;

/// Set of expanded row identities.
#[derive(Debug, Clone, Default)]
pub struct ExpandedRowSet {
    expanded: HashSet<RowKey>,
}

impl ExpandedRowSet {
    pub fn new() -> Self {
        Self { expanded: HashSet::new() }
    }

    pub fn is_expanded(&self, key: &RowKey) -> bool {
        self.expanded.contains(key)
    }

    /// Flips the expansion of a row.
    ///
    /// # Returns
    /// `true` if the row is expanded afterwards.
    pub fn toggle(&mut self, key: RowKey) -> bool {
        if self.expanded.remove(&key) {
            false
        } else {
            self.expanded.insert(key);
            true
        }
    }

    pub fn expand(&mut self, key: RowKey) -> bool {
        self.expanded.insert(key)
    }

    pub fn collapse(&mut self, key: &RowKey) -> bool {
        self.expanded.remove(key)
    }

    /// Collapses every row.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }
}
