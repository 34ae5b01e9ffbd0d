//! Demo workflows: switching row sources, address bar navigation and the
//! grid definition for the loaded rows.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;
use tracing::info;

use rgrid::{decode, Alignment, ColumnSpec, ExportHandler, QueryStore};

use crate::app::listing_source::ListingSource;
use crate::app::sample_data::{generate_listings, DEFAULT_SEED};
use crate::app::AppState;

/// Number of generated sample listings.
pub const SAMPLE_ROWS: usize = 347;

/// Filename used by the demo's local export.
pub const LOCAL_EXPORT_FILENAME: &str = "listings-export.json";

/// Coordinates demo-level operations.
///
/// This struct is responsible for:
/// - Loading rows from sample data or a JSON file
/// - Applying the address bar and back navigation
/// - Building columns and the local export handler for a row source
pub struct ApplicationCoordinator;

impl ApplicationCoordinator {
    pub fn sample_source() -> ListingSource {
        ListingSource::new(generate_listings(DEFAULT_SEED, SAMPLE_ROWS))
    }

    /// Reads a JSON array of objects.
    pub fn read_rows_file(path: &Path) -> Result<ListingSource> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        let value: Value = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
        let Value::Array(rows) = value else {
            bail!("{} does not contain a JSON array", path.display());
        };
        if rows.iter().any(|row| !row.is_object()) {
            bail!("{} must contain an array of objects", path.display());
        }
        info!(rows = rows.len(), path = %path.display(), "rows loaded");
        Ok(ListingSource::new(rows))
    }

    /// Replaces the rows with the contents of a JSON file.
    ///
    /// The query is reset since the old columns may not exist anymore.
    pub fn open_rows_file(state: &mut AppState, path: &Path) -> bool {
        match Self::read_rows_file(path) {
            Ok(source) => {
                let label = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
                state.replace_source(source, label);
                state.location.navigate(String::new());
                state.error_message = None;
                true
            }
            Err(err) => {
                state.error_message = Some(format!("Error loading rows: {:#}", err));
                false
            }
        }
    }

    pub fn open_sample(state: &mut AppState) {
        state.replace_source(Self::sample_source(), "Sample listings");
        state.location.navigate(String::new());
        state.error_message = None;
    }

    /// Navigates to the query typed in the address bar.
    pub fn apply_address(state: &mut AppState) {
        let typed = state.address.trim().to_string();
        state.location.navigate(typed);
    }

    pub fn go_back(state: &mut AppState) {
        state.location.back();
    }

    /// Columns for a row source: a tuned set for the sample listings,
    /// otherwise one auto-sized column per field of the first row.
    pub fn columns_for(source: &ListingSource) -> Vec<ColumnSpec<Value>> {
        let fields = source.fields();
        let is_sample = ["title", "city", "price", "status"].iter().all(|f| fields.iter().any(|x| x == f));
        if !is_sample {
            return fields.into_iter().map(|f| ColumnSpec::new(f.clone(), f)).collect();
        }

        vec![
            ColumnSpec::new("id", "ID").width(60.0).align(Alignment::Right),
            ColumnSpec::new("title", "Title").flex(2.0).min_width(180.0),
            ColumnSpec::new("city", "City").flex(1.0),
            ColumnSpec::new("price", "Price")
                .width(110.0)
                .align(Alignment::Right)
                .header_align(Alignment::Right)
                .renderer(|ui, cell| {
                    let text = cell
                        .value
                        .as_deref()
                        .and_then(Value::as_u64)
                        .map(format_price)
                        .unwrap_or_else(|| "-".to_string());
                    ui.label(text);
                }),
            ColumnSpec::new("bedrooms", "Beds").width(70.0).align(Alignment::Center),
            ColumnSpec::new("area_m2", "Area m²").width(90.0).align(Alignment::Right),
            ColumnSpec::new("status", "Status").width(100.0),
            ColumnSpec::new("agent", "Agent").width(100.0),
            ColumnSpec::new("actions", "")
                .width(60.0)
                .sortable(false)
                .filterable(false)
                .action(|ui, row: &Value, _| {
                    if ui.small_button("📋").on_hover_text("Copy title").clicked() {
                        let title = row.get("title").and_then(Value::as_str).unwrap_or_default();
                        ui.ctx().copy_text(title.to_string());
                    }
                }),
        ]
    }

    /// Export handler writing the matching rows as JSON into the download
    /// directory.
    pub fn local_export(source: &ListingSource) -> ExportHandler {
        let source = source.clone();
        ExportHandler::custom(move |request| {
            let state = decode(&request.query);
            let rows = source.project(&state, &request.fields);
            let dir = dirs::download_dir().unwrap_or_else(std::env::temp_dir);
            let path = dir.join(LOCAL_EXPORT_FILENAME);
            let bytes = serde_json::to_vec_pretty(&rows)?;
            std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            info!(rows = rows.len(), path = %path.display(), "local export written");
            Ok(())
        })
    }

    /// The store's current query, for persistence.
    pub fn current_query(state: &AppState) -> String {
        state.location.query()
    }
}

/// `1234500` -> `"$1,234,500"`
pub fn format_price(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${}", out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(0), "$0");
        assert_eq!(format_price(950), "$950");
        assert_eq!(format_price(1000), "$1,000");
        assert_eq!(format_price(1234500), "$1,234,500");
    }

    #[test]
    fn sample_columns_are_valid() {
        let columns = ApplicationCoordinator::columns_for(&ApplicationCoordinator::sample_source());
        assert!(rgrid::columns::validate_columns(&columns).is_ok());
        assert_eq!(rgrid::columns::first_sortable_field(&columns), Some("id"));
    }

    #[test]
    fn generic_columns_follow_first_row() {
        let source = ListingSource::new(vec![serde_json::json!({"name": "a", "age": 3})]);
        let fields: Vec<String> = ApplicationCoordinator::columns_for(&source).into_iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["name", "age"]);
    }

    #[test]
    fn non_array_file_is_rejected() {
        let path = std::env::temp_dir().join("rgrid-demo-not-array.json");
        std::fs::write(&path, r#"{"rows": []}"#).unwrap();
        assert!(ApplicationCoordinator::read_rows_file(&path).is_err());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn address_bar_navigates() {
        let mut state = AppState::new(ApplicationCoordinator::sample_source(), "Sample listings", "");
        state.address = " page=2&limit=50 ".to_string();
        ApplicationCoordinator::apply_address(&mut state);
        assert_eq!(ApplicationCoordinator::current_query(&state), "page=2&limit=50");
        ApplicationCoordinator::go_back(&mut state);
        assert_eq!(ApplicationCoordinator::current_query(&state), "");
    }
}
