//! State modules for the data grid.
//!
//! This module contains state-only logic (no rendering):
//! - Grid state types that round-trip through the query string
//! - Viewport observation and breakpoints
//! - Debounced text inputs
//! - Expanded-row tracking
//! - Transient view state composing the above

mod grid_state;
mod viewport;
mod debounce;
mod expansion;
mod view_state;

pub use grid_state::{FilterChange, FilterMap, GridState, PageSize, SortDirection, SortSpec, StatePatch};
pub use viewport::{Breakpoint, ViewportClass, ViewportObserver, DEFAULT_VIEWPORT_WIDTH, DESKTOP_MIN, MOBILE_MAX_EXCLUSIVE};
pub use debounce::{DebounceState, DebouncedText, Debouncer, FilterInputs, DEFAULT_DEBOUNCE};
pub use expansion::ExpandedRowSet;
pub use view_state::GridViewState;
