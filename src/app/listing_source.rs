//! In-memory collaborator answering grid queries.
//!
//! Plays the role of the remote listing API: given a decoded `GridState` it
//! applies search, per-column filters, the single sort and pagination, and
//! reports the filtered and overall totals.

use std::cmp::Ordering;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};

use rgrid::rendering::cell_renderer::display_value;
use rgrid::{GridState, SortDirection};

/// `min-max` numeric range filter, e.g. `100-200`.
static RANGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(-?\d+(?:\.\d+)?)\s*-\s*(-?\d+(?:\.\d+)?)\s*$").expect("range pattern is valid"));

/// One page of results.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedPage {
    pub rows: Vec<Value>,
    pub total_rows: usize,
    pub total_general: usize,
}

/// Rows held in memory, shared cheaply with the export worker.
#[derive(Debug, Clone, Default)]
pub struct ListingSource {
    rows: Arc<Vec<Value>>,
}

impl ListingSource {
    pub fn new(rows: Vec<Value>) -> Self {
        Self { rows: Arc::new(rows) }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Field names of the first row, in order.
    pub fn fields(&self) -> Vec<String> {
        self.rows
            .first()
            .and_then(Value::as_object)
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Every row matching the state's search and filters, sorted.
    pub fn matching(&self, state: &GridState) -> Vec<&Value> {
        let search = state.search.trim().to_lowercase();
        let mut matched: Vec<&Value> = self
            .rows
            .iter()
            .filter(|row| search.is_empty() || matches_search(row, &search))
            .filter(|row| state.filters.iter().all(|(field, value)| matches_filter(row.get(field), value)))
            .collect();

        if let Some(sort) = &state.sort {
            matched.sort_by(|a, b| compare_values(a.get(&sort.field), b.get(&sort.field), sort.direction));
        }
        matched
    }

    /// Answers a grid query with one page of rows.
    pub fn fetch(&self, state: &GridState) -> FetchedPage {
        let matched = self.matching(state);
        let size = state.page_size.get() as usize;
        let offset = (state.page.max(1) as usize - 1) * size;

        FetchedPage {
            total_rows: matched.len(),
            total_general: self.rows.len(),
            rows: matched.into_iter().skip(offset).take(size).cloned().collect(),
        }
    }

    /// Matching rows reduced to `fields`, for export.
    pub fn project(&self, state: &GridState, fields: &[String]) -> Vec<Value> {
        self.matching(state)
            .into_iter()
            .map(|row| {
                let projected: Map<String, Value> = fields
                    .iter()
                    .map(|field| (field.clone(), row.get(field).cloned().unwrap_or(Value::Null)))
                    .collect();
                Value::Object(projected)
            })
            .collect()
    }
}

fn matches_search(row: &Value, needle: &str) -> bool {
    match row {
        Value::Object(obj) => obj.values().any(|v| matches_search(v, needle)),
        Value::Null => false,
        other => display_value(Some(other)).to_lowercase().contains(needle),
    }
}

/// Numeric cells accept `min-max` ranges; everything else is a
/// case-insensitive substring match.
fn matches_filter(cell: Option<&Value>, filter: &str) -> bool {
    if let (Some(Value::Number(n)), Some(caps)) = (cell, RANGE_RE.captures(filter)) {
        let bounds = (caps[1].parse::<f64>(), caps[2].parse::<f64>());
        if let (Some(x), (Ok(lo), Ok(hi))) = (n.as_f64(), bounds) {
            return lo <= x && x <= hi;
        }
    }
    match cell {
        None | Some(Value::Null) => false,
        Some(value) => display_value(Some(value)).to_lowercase().contains(&filter.to_lowercase()),
    }
}

/// Numbers numerically, strings case-insensitively, missing values last.
/// Missing values sort last in either direction.
fn compare_values(a: Option<&Value>, b: Option<&Value>, direction: SortDirection) -> Ordering {
    let ordering = match (a, b) {
        (None | Some(Value::Null), None | Some(Value::Null)) => return Ordering::Equal,
        (None | Some(Value::Null), _) => return Ordering::Greater,
        (_, None | Some(Value::Null)) => return Ordering::Less,
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(x), Some(y)) => display_value(Some(x))
            .to_lowercase()
            .cmp(&display_value(Some(y)).to_lowercase()),
    };
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgrid::{PageSize, SortSpec};
    use serde_json::json;

    fn source() -> ListingSource {
        ListingSource::new(vec![
            json!({"id": 1, "title": "Loft", "city": "Santiago", "price": 150}),
            json!({"id": 2, "title": "House", "city": "Lima", "price": 320}),
            json!({"id": 3, "title": "Studio", "city": "Santiago", "price": 90}),
            json!({"id": 4, "title": "Penthouse", "city": null, "price": 500}),
        ])
    }

    fn ids(rows: &[Value]) -> Vec<i64> {
        rows.iter().map(|r| r["id"].as_i64().unwrap()).collect()
    }

    #[test]
    fn search_matches_any_field() {
        let state = GridState { search: "santiago".into(), ..GridState::default() };
        let page = source().fetch(&state);
        assert_eq!(ids(&page.rows), vec![1, 3]);
        assert_eq!(page.total_rows, 2);
        assert_eq!(page.total_general, 4);
    }

    #[test]
    fn numeric_range_filter() {
        let mut state = GridState::default();
        state.filters.insert("price".into(), "100-200".into());
        assert_eq!(ids(&source().fetch(&state).rows), vec![1]);
    }

    #[test]
    fn text_filter_skips_nulls() {
        let mut state = GridState::default();
        state.filters.insert("city".into(), "a".into());
        assert_eq!(ids(&source().fetch(&state).rows), vec![1, 2, 3]);
    }

    #[test]
    fn sort_puts_nulls_last() {
        let state = GridState { sort: Some(SortSpec::asc("city")), ..GridState::default() };
        assert_eq!(ids(&source().fetch(&state).rows), vec![2, 1, 3, 4]);

        let state = GridState { sort: Some(SortSpec::desc("price")), ..GridState::default() };
        assert_eq!(ids(&source().fetch(&state).rows), vec![4, 2, 1, 3]);
    }

    #[test]
    fn descending_sort_keeps_nulls_last() {
        let state = GridState { sort: Some(SortSpec::desc("city")), ..GridState::default() };
        assert_eq!(ids(&source().fetch(&state).rows), vec![1, 3, 2, 4]);
    }

    #[test]
    fn pagination_slices_after_sorting() {
        let state = GridState {
            sort: Some(SortSpec::asc("price")),
            page: 2,
            page_size: PageSize::new(5).unwrap(),
            ..GridState::default()
        };
        let page = source().fetch(&state);
        assert!(page.rows.is_empty());
        assert_eq!(page.total_rows, 4);
    }

    #[test]
    fn projection_keeps_requested_fields() {
        let state = GridState { search: "loft".into(), ..GridState::default() };
        let rows = source().project(&state, &["title".to_string(), "missing".to_string()]);
        assert_eq!(rows, vec![json!({"title": "Loft", "missing": null})]);
    }
}
