//! Transient per-grid state.
//!
//! Everything the grid keeps besides the query string: debounce buffers,
//! expanded rows, the measured viewport and the column styles derived from
//! it. None of this is authoritative; the query string is.

use std::time::{Duration, Instant};

use crate::columns::ColumnSpec;
use crate::config::GridConfig;
use crate::domain::column_layout::{compute_styles, ColumnStyle};
use crate::state::{DebouncedText, ExpandedRowSet, FilterInputs, GridState, ViewportObserver};

/// Transient grid state composed of focused components.
///
/// Responsibilities:
/// - Holding debounced search and filter inputs
/// - Tracking expanded rows
/// - Caching column styles for the current viewport
#[derive(Debug, Clone)]
pub struct GridViewState {
    pub viewport: ViewportObserver,
    pub expanded: ExpandedRowSet,
    pub search: DebouncedText,
    pub filters: FilterInputs,
    styles: Vec<ColumnStyle>,
    layout_dirty: bool,
}

impl GridViewState {
    /// Creates view state seeded from the decoded query.
    pub fn new(config: &GridConfig, initial: &GridState) -> Self {
        Self {
            viewport: ViewportObserver::new(config.fallback_viewport_width),
            expanded: ExpandedRowSet::new(),
            search: DebouncedText::new(initial.search.clone(), config.debounce()),
            filters: FilterInputs::new(config.debounce()),
            styles: Vec::new(),
            layout_dirty: true,
        }
    }

    /// Styles for the visible columns, as of the last `refresh_layout`.
    pub fn styles(&self) -> &[ColumnStyle] {
        &self.styles
    }

    /// Forces the next `refresh_layout` to recompute (column set changed).
    pub fn invalidate_layout(&mut self) {
        self.layout_dirty = true;
    }

    /// Records the measured viewport width and recomputes every column style
    /// if it changed.
    ///
    /// # Returns
    /// `true` if styles were recomputed.
    pub fn refresh_layout<R>(&mut self, columns: &[ColumnSpec<R>], measured_width: Option<f32>) -> bool {
        let resized = self.viewport.observe(measured_width);
        if !resized && !self.layout_dirty {
            return false;
        }
        self.styles = compute_styles(columns, self.viewport.width());
        self.layout_dirty = false;
        true
    }

    /// Re-syncs idle inputs from the decoded query and drops filter inputs
    /// whose headers are no longer shown.
    pub fn sync_inputs<R>(&mut self, state: &GridState, columns: &[ColumnSpec<R>]) {
        self.search.sync_from_query(&state.search);

        if !state.filter_mode {
            self.filters.clear();
            return;
        }

        let shown: Vec<&ColumnSpec<R>> = columns.iter().filter(|c| !c.hidden && c.filterable).collect();
        self.filters.retain(shown.iter().map(|c| c.field.as_str()));
        for column in shown {
            let value = state.filter_value(&column.field);
            self.filters.input_mut(&column.field, value).sync_from_query(value);
        }
    }

    /// Shortest time until any pending input commits.
    pub fn next_commit_in(&self, now: Instant) -> Option<Duration> {
        let search = self.search.remaining(now);
        let filters = self.filters.next_deadline(now);
        match (search, filters) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }
}
