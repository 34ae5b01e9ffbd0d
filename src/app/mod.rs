//! Application-level modules for the grid demo.
//!
//! The demo plays the collaborator: it owns the query store, answers grid
//! queries from in-memory rows and persists the last query.

mod app_state;
mod application_coordinator;
mod header;
mod listing_source;
mod sample_data;
mod settings_coordinator;

pub use app_state::AppState;
pub use application_coordinator::ApplicationCoordinator;
pub use header::{render_header, HeaderInteraction};
pub use listing_source::ListingSource;
pub use settings_coordinator::SettingsCoordinator;
