//! A data grid whose whole interaction state lives in a URL query string.
//!
//! Sort, search, per-column filters, pagination and the filter-mode toggle are
//! read from the query on every frame and written back through a
//! `QueryStore`. The host fetches rows for the current query and passes them
//! to `DataGrid::show`.
//!
//! - `domain/` - Query codec, column layout, sorting and pagination
//! - `state/` - Grid state types, debounce, viewport, expansion
//! - `coordinator` - Applies interactions to the query store
//! - `io/` - Spreadsheet export
//! - `rendering/`, `ui/` - egui rendering

pub mod traits;
pub mod error;
pub mod config;
pub mod location;
pub mod columns;
pub mod domain;
pub mod state;
pub mod coordinator;
pub mod io;
pub mod rendering;
pub mod ui;

// Export seams
pub use traits::{GridRow, QueryStore, RowKey};
pub use location::MemoryLocation;

// Export configuration and errors
pub use config::GridConfig;
pub use error::{GridError, Result};

// Export column definitions
pub use columns::{Alignment, CellContext, ColumnSpec};

// Export grid state and codec entry points
pub use state::{FilterMap, GridState, PageSize, SortDirection, SortSpec, StatePatch};
pub use domain::query_codec::{decode, encode, export_query};
pub use domain::pagination::PageNav;

// Export interaction handling
pub use coordinator::{GridCoordinator, GridInteraction};

// Export the widget
pub use io::{ExportHandler, ExportRequest, HttpExporter};
pub use ui::{DataGrid, GridData, GridResponse};
