//! Grid rendering with egui
//!
//! This module contains the grid's ui components:
//! - Toolbar (search, quick sort, filter mode, export, create slot)
//! - Header row (sort labels and filter inputs)
//! - Body rows (cells, expand toggles, detail area)
//! - Footer (totals, page size, navigation)
//! - Notifications (transient export messages)
//! - Data grid (the widget composing all of the above)

pub mod toolbar;
pub mod header_row;
pub mod body_rows;
pub mod footer;
pub mod notifications;
pub mod data_grid;

pub use data_grid::{DataGrid, GridData, GridResponse};
pub use notifications::{Notification, NotificationLevel, Notifications};
