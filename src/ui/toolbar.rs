//! Toolbar rendering
//!
//! Search box, quick sort, filter-mode toggle, export button and the
//! caller's create-form slot.

use std::time::Instant;

use eframe::egui;

use crate::state::{DebouncedText, GridState};

/// Caller-provided content shown at the end of the toolbar (e.g. a
/// "New listing" button that opens a form).
pub type CreateFormSlot = Box<dyn FnMut(&mut egui::Ui)>;

/// Result of user interaction with the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarInteraction {
    /// Quick sort button clicked
    QuickSort,
    /// Filter mode toggled to the given value
    FilterModeToggled(bool),
    /// Export button clicked
    ExportRequested,
}

/// State of the export button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportButton {
    /// No export handler configured
    Hidden,
    Ready,
    /// An export is in flight
    Busy,
}

/// Renders the toolbar.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `search` - Debounced search buffer, edited in place
/// * `state` - Decoded grid state
/// * `export` - Export button state
/// * `create_form` - Optional caller slot
/// * `now` - Frame time used to schedule the search commit
///
/// # Returns
/// * `Option<ToolbarInteraction>` - User interaction result
pub fn render_toolbar(
    ui: &mut egui::Ui,
    search: &mut DebouncedText,
    state: &GridState,
    export: ExportButton,
    create_form: Option<&mut CreateFormSlot>,
    now: Instant,
) -> Option<ToolbarInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.label("🔍");
        let response = egui::TextEdit::singleline(search.buffer_mut())
            .id_salt("rgrid_search")
            .hint_text("Search")
            .desired_width(200.0)
            .show(ui)
            .response;
        if response.changed() {
            search.edited(now);
        }

        ui.separator();

        let sort_hint = match &state.sort {
            Some(spec) => format!("Sorted by {} {}", spec.field, spec.direction.arrow()),
            None => "Sort by first column".to_string(),
        };
        if ui.selectable_label(state.sort.is_some(), "⇅ Sort").on_hover_text(sort_hint).clicked() {
            interaction = Some(ToolbarInteraction::QuickSort);
        }

        let mut filter_mode = state.filter_mode;
        if ui.toggle_value(&mut filter_mode, "⚲ Filters").changed() {
            interaction = Some(ToolbarInteraction::FilterModeToggled(filter_mode));
        }

        match export {
            ExportButton::Hidden => {}
            ExportButton::Ready => {
                if ui.button("⬇ Export").clicked() {
                    interaction = Some(ToolbarInteraction::ExportRequested);
                }
            }
            ExportButton::Busy => {
                ui.add_enabled(false, egui::Button::new("⬇ Exporting..."));
                ui.spinner();
            }
        }

        if let Some(slot) = create_form {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| slot(ui));
        }
    });

    interaction
}
