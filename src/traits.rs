//! Seams between the grid and its collaborators.
//!
//! - `QueryStore` is the navigable query string the grid reads and writes.
//! - `GridRow` is the read-only view of a row supplied by the data fetcher.

use std::borrow::Cow;
use std::fmt;

/// Navigable query state (the part of the URL after `?`).
///
/// Every write must start from `query()` read at the time of the write, so
/// two mutations in the same frame never clobber each other.
pub trait QueryStore {
    /// Current full query string, without a leading `?`.
    fn query(&self) -> String;

    /// Replaces the full query string.
    fn navigate(&mut self, query: String);
}

/// Read access to a row supplied by the collaborator.
pub trait GridRow {
    /// Value for a column field, if present.
    fn cell(&self, field: &str) -> Option<Cow<'_, serde_json::Value>>;

    /// Stable identity of the row, if it has one.
    fn row_id(&self) -> Option<String> {
        None
    }
}

impl GridRow for serde_json::Value {
    fn cell(&self, field: &str) -> Option<Cow<'_, serde_json::Value>> {
        self.get(field).map(Cow::Borrowed)
    }

    fn row_id(&self) -> Option<String> {
        match self.get("id")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl GridRow for serde_json::Map<String, serde_json::Value> {
    fn cell(&self, field: &str) -> Option<Cow<'_, serde_json::Value>> {
        self.get(field).map(Cow::Borrowed)
    }

    fn row_id(&self) -> Option<String> {
        match self.get("id")? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

/// Identity of a row within one grid: its id, or its index as a fallback.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RowKey {
    Id(String),
    Index(usize),
}

impl RowKey {
    pub fn of<R: GridRow>(row: &R, index: usize) -> Self {
        row.row_id().map(RowKey::Id).unwrap_or(RowKey::Index(index))
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Id(id) => write!(f, "{}", id),
            RowKey::Index(index) => write!(f, "#{}", index),
        }
    }
}
