//! Demo header bar
//!
//! Row source controls, back navigation and the editable address bar that
//! mirrors the grid's query string.

use eframe::egui;
use egui::Color32;
use std::path::PathBuf;

use crate::app::AppState;

/// Result of user interaction with the header bar
pub enum HeaderInteraction {
    /// User picked a JSON file of rows
    OpenFileRequested(PathBuf),
    /// User asked for the generated listings
    SampleRequested,
    /// User clicked back
    BackRequested,
    /// User pressed Enter in the address bar
    AddressSubmitted,
}

/// Renders the demo header.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Mutable reference to application state
///
/// # Returns
/// * `Option<HeaderInteraction>` - User interaction result
pub fn render_header(ui: &mut egui::Ui, state: &mut AppState) -> Option<HeaderInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        if ui.button("📁 Open JSON").clicked() {
            let mut dialog = rfd::FileDialog::new().add_filter("JSON rows", &["json"]);
            if let Ok(cwd) = std::env::current_dir() {
                dialog = dialog.set_directory(cwd);
            }
            if let Some(path) = dialog.pick_file() {
                interaction = Some(HeaderInteraction::OpenFileRequested(path));
            }
        }

        if ui.button("🏠 Sample listings").clicked() {
            interaction = Some(HeaderInteraction::SampleRequested);
        }

        ui.separator();

        if ui.add_enabled(state.location.can_go_back(), egui::Button::new("⬅")).on_hover_text("Back").clicked() {
            interaction = Some(HeaderInteraction::BackRequested);
        }

        ui.label("?");
        let response = egui::TextEdit::singleline(&mut state.address)
            .desired_width(ui.available_width() - 220.0)
            .font(egui::TextStyle::Monospace)
            .show(ui)
            .response;
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            interaction = Some(HeaderInteraction::AddressSubmitted);
        }

        ui.separator();
        ui.label(format!("{} ({} rows)", state.source_label, state.source.len()));
    });

    if let Some(err) = &state.error_message {
        ui.colored_label(Color32::RED, err);
    }

    interaction
}
