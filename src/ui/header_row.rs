//! Header row rendering
//!
//! Sortable column labels with the active direction arrow and, in filter
//! mode, one debounced text input per filterable column.

use std::time::Instant;

use eframe::egui;
use egui::RichText;

use crate::columns::ColumnSpec;
use crate::state::{FilterInputs, GridState};
use crate::ui::body_rows::{cell, EXPAND_COLUMN_WIDTH};

/// Height of the label line.
pub const HEADER_HEIGHT: f32 = 24.0;

/// Extra height taken by the filter inputs in filter mode.
pub const FILTER_INPUT_HEIGHT: f32 = 26.0;

/// Result of user interaction with the header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderInteraction {
    /// A sortable header was clicked
    SortClicked(String),
}

/// Label shown for a column header, with the sort arrow when active.
pub fn header_label<R>(column: &ColumnSpec<R>, state: &GridState) -> String {
    match state.sort_direction_for(&column.field) {
        Some(direction) => format!("{} {}", column.header_name, direction.arrow()),
        None => column.header_name.clone(),
    }
}

/// Renders the header row for the visible columns.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `columns` - Visible columns, in display order
/// * `widths` - Resolved width of each visible column
/// * `state` - Decoded grid state (sort arrow, filter mode)
/// * `filters` - Debounced filter inputs, edited in place
/// * `expandable` - Reserve the leading expand-toggle column
/// * `now` - Frame time used to schedule filter commits
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header_row<R>(
    ui: &mut egui::Ui,
    columns: &[&ColumnSpec<R>],
    widths: &[f32],
    state: &GridState,
    filters: &mut FilterInputs,
    expandable: bool,
    now: Instant,
) -> Option<HeaderInteraction> {
    let mut interaction = None;
    let height = if state.filter_mode { HEADER_HEIGHT + FILTER_INPUT_HEIGHT } else { HEADER_HEIGHT };

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 0.0;

        if expandable {
            ui.allocate_exact_size(egui::vec2(EXPAND_COLUMN_WIDTH, height), egui::Sense::hover());
        }

        for (column, &width) in columns.iter().zip(widths) {
            cell(ui, width, height, column.header_align, |ui| {
                let label = RichText::new(header_label(column, state)).strong();
                if column.sortable {
                    let response = ui
                        .add(egui::Button::new(label).frame(false))
                        .on_hover_text("Click to sort");
                    if response.clicked() {
                        interaction = Some(HeaderInteraction::SortClicked(column.field.clone()));
                    }
                } else {
                    ui.label(label);
                }

                if state.filter_mode && column.filterable {
                    let input = filters.input_mut(&column.field, state.filter_value(&column.field));
                    let response = egui::TextEdit::singleline(input.buffer_mut())
                        .id_salt(("rgrid_filter", column.field.as_str()))
                        .hint_text("Filter")
                        .desired_width(width - 8.0)
                        .show(ui)
                        .response;
                    if response.changed() {
                        input.edited(now);
                    }
                }
            });
        }
    });

    interaction
}
