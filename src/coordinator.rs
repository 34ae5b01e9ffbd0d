//! Applies grid interactions to the query store.
//!
//! Renderers report what the user did as `GridInteraction`s; the coordinator
//! turns each into a `StatePatch` and performs a read-modify-write on the
//! store. Because every write reads `store.query()` at write time, two
//! interactions handled in the same frame both land.

use std::time::Instant;

use tracing::debug;

use crate::columns::{first_sortable_field, ColumnSpec};
use crate::domain::pagination::{target_page, total_pages, PageNav};
use crate::domain::query_codec::{decode, encode};
use crate::domain::sorting::{header_click, quick_sort};
use crate::state::{GridState, GridViewState, PageSize, StatePatch};
use crate::traits::{QueryStore, RowKey};

/// Something the user did that the grid must act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridInteraction {
    /// A sortable header was clicked
    SortClicked(String),
    /// Toolbar quick-sort button
    QuickSort,
    /// Toolbar filter-mode toggle
    FilterModeToggled(bool),
    /// Search box debounce fired
    SearchCommitted(String),
    /// A filter input's debounce fired
    FilterCommitted { field: String, value: String },
    /// Footer navigation
    PageNav(PageNav),
    /// Footer page-size selector
    PageSizeChanged(PageSize),
    /// Row expand/collapse toggle
    RowExpandToggled(RowKey),
    /// Toolbar export button
    ExportRequested,
}

/// Coordinates interactions between the view state and the query store.
pub struct GridCoordinator;

impl GridCoordinator {
    /// Decodes the store's current query.
    pub fn current_state(store: &dyn QueryStore) -> GridState {
        decode(&store.query())
    }

    /// Applies a patch on top of the store's current query.
    ///
    /// # Returns
    /// `true` if the query string changed.
    pub fn write(store: &mut dyn QueryStore, patch: &StatePatch) -> bool {
        let current = store.query();
        let next = encode(patch, &current);
        if next == current {
            return false;
        }
        debug!(query = %next, "grid state write");
        store.navigate(next);
        true
    }

    /// Handles one interaction.
    ///
    /// `total_rows` is the filtered row count reported for the current query;
    /// it bounds page navigation. `ExportRequested` is not handled here since
    /// the export controller lives with the widget.
    ///
    /// # Returns
    /// `true` if the interaction was consumed.
    pub fn handle<R>(
        interaction: GridInteraction,
        view: &mut GridViewState,
        store: &mut dyn QueryStore,
        columns: &[ColumnSpec<R>],
        total_rows: usize,
    ) -> bool {
        match interaction {
            GridInteraction::SortClicked(field) => {
                let sortable = columns.iter().any(|c| c.field == field && c.sortable && !c.hidden);
                if !sortable {
                    return false;
                }
                let state = Self::current_state(store);
                let next = header_click(state.sort.as_ref(), &field);
                Self::write(store, &StatePatch::sort(Some(next)));
            }
            GridInteraction::QuickSort => {
                let state = Self::current_state(store);
                let next = quick_sort(state.sort.as_ref(), first_sortable_field(columns));
                if next != state.sort {
                    Self::write(store, &StatePatch::sort(next));
                }
            }
            GridInteraction::FilterModeToggled(enabled) => {
                if !enabled {
                    view.filters.clear();
                }
                Self::write(store, &StatePatch::filter_mode(enabled));
            }
            GridInteraction::SearchCommitted(text) => {
                Self::write(store, &StatePatch::search(text));
            }
            GridInteraction::FilterCommitted { field, value } => {
                // Inputs unmount with filter mode; a commit polled in the same
                // frame as the toggle must not write the filter back.
                if !Self::current_state(store).filter_mode {
                    debug!(%field, "filter commit dropped, filter mode is off");
                    return false;
                }
                Self::write(store, &StatePatch::filter(field, value));
            }
            GridInteraction::PageNav(nav) => {
                let state = Self::current_state(store);
                let pages = total_pages(total_rows, state.page_size);
                let page = target_page(nav, state.page, pages);
                Self::write(store, &StatePatch::page(page));
            }
            GridInteraction::PageSizeChanged(size) => {
                Self::write(store, &StatePatch::page_size(size));
            }
            GridInteraction::RowExpandToggled(key) => {
                view.expanded.toggle(key);
            }
            GridInteraction::ExportRequested => return false,
        }
        true
    }

    /// Collects the debounced commits that are due.
    pub fn poll_commits(view: &mut GridViewState, now: Instant) -> Vec<GridInteraction> {
        let mut due = Vec::new();
        if let Some(text) = view.search.poll(now) {
            due.push(GridInteraction::SearchCommitted(text));
        }
        due.extend(
            view.filters
                .poll(now)
                .into_iter()
                .map(|(field, value)| GridInteraction::FilterCommitted { field, value }),
        );
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::location::MemoryLocation;
    use crate::state::SortSpec;
    use serde_json::Value;

    fn columns() -> Vec<ColumnSpec<Value>> {
        vec![
            ColumnSpec::new("title", "Title"),
            ColumnSpec::new("price", "Price"),
            ColumnSpec::new("actions", "").sortable(false),
        ]
    }

    fn view() -> GridViewState {
        GridViewState::new(&GridConfig::default(), &GridState::default())
    }

    #[test]
    fn unsortable_header_click_is_ignored() {
        let mut location = MemoryLocation::new("");
        let handled = GridCoordinator::handle(
            GridInteraction::SortClicked("actions".to_string()),
            &mut view(),
            &mut location,
            &columns(),
            0,
        );
        assert!(!handled);
        assert_eq!(location.version(), 0);
    }

    #[test]
    fn header_clicks_write_sort() {
        let mut location = MemoryLocation::new("page=3");
        let mut view = view();
        let columns = columns();
        GridCoordinator::handle(GridInteraction::SortClicked("price".into()), &mut view, &mut location, &columns, 100);
        let state = GridCoordinator::current_state(&location);
        assert_eq!(state.sort, Some(SortSpec::asc("price")));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn quick_sort_uses_first_sortable_column() {
        let mut location = MemoryLocation::new("");
        let mut view = view();
        let columns = columns();
        GridCoordinator::handle(GridInteraction::QuickSort, &mut view, &mut location, &columns, 0);
        assert_eq!(GridCoordinator::current_state(&location).sort, Some(SortSpec::asc("title")));
        GridCoordinator::handle(GridInteraction::QuickSort, &mut view, &mut location, &columns, 0);
        assert_eq!(GridCoordinator::current_state(&location).sort, None);
    }

    #[test]
    fn row_toggle_never_touches_query() {
        let mut location = MemoryLocation::new("page=2");
        let mut view = view();
        GridCoordinator::handle(
            GridInteraction::RowExpandToggled(RowKey::Index(0)),
            &mut view,
            &mut location,
            &columns(),
            10,
        );
        assert!(view.expanded.is_expanded(&RowKey::Index(0)));
        assert_eq!(location.version(), 0);
    }

    #[test]
    fn filter_commit_without_filter_mode_is_dropped() {
        let mut location = MemoryLocation::new("page=2");
        let handled = GridCoordinator::handle(
            GridInteraction::FilterCommitted { field: "title".into(), value: "loft".into() },
            &mut view(),
            &mut location,
            &columns(),
            10,
        );
        assert!(!handled);
        assert_eq!(location.version(), 0);
    }

    #[test]
    fn two_writes_in_one_frame_both_land() {
        let mut location = MemoryLocation::new("filtration=true");
        let mut view = view();
        let columns = columns();
        GridCoordinator::handle(
            GridInteraction::FilterCommitted { field: "title".into(), value: "loft".into() },
            &mut view,
            &mut location,
            &columns,
            100,
        );
        GridCoordinator::handle(
            GridInteraction::PageSizeChanged(PageSize::new(50).unwrap()),
            &mut view,
            &mut location,
            &columns,
            100,
        );
        let state = GridCoordinator::current_state(&location);
        assert_eq!(state.filters["title"], "loft");
        assert_eq!(state.page_size.get(), 50);
    }
}
