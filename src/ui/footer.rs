//! Footer rendering
//!
//! Totals, the visible row range, the page-size selector and page navigation.

use eframe::egui;
use egui::RichText;

use crate::domain::pagination::{range_label, total_pages, totals_label, PageNav};
use crate::state::{GridState, PageSize};

/// Result of user interaction with the footer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterInteraction {
    /// A navigation button was clicked
    Nav(PageNav),
    /// A different page size was selected
    PageSizeChanged(PageSize),
}

/// "Page x of y" for the current state.
pub fn page_label(state: &GridState, total_rows: usize) -> String {
    format!("Page {} of {}", state.page, total_pages(total_rows, state.page_size))
}

/// Renders the footer bar.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `state` - Decoded grid state
/// * `total_rows` - Row count after filtering
/// * `total_general` - Row count before filtering, if known
///
/// # Returns
/// * `Option<FooterInteraction>` - User interaction result
pub fn render_footer(
    ui: &mut egui::Ui,
    state: &GridState,
    total_rows: usize,
    total_general: Option<usize>,
) -> Option<FooterInteraction> {
    let mut interaction = None;

    ui.horizontal(|ui| {
        ui.label(RichText::new(totals_label(total_rows, total_general)).strong());
        ui.separator();
        ui.label(range_label(state.page, state.page_size, total_rows));

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            // Right-to-left, so buttons are added last-first
            let buttons = [
                ("⏭", PageNav::Last, "Last page"),
                ("▶", PageNav::Next, "Next page"),
            ];
            for (icon, nav, hint) in buttons {
                if ui.button(icon).on_hover_text(hint).clicked() {
                    interaction = Some(FooterInteraction::Nav(nav));
                }
            }

            ui.label(page_label(state, total_rows));

            let buttons = [
                ("◀", PageNav::Prev, "Previous page"),
                ("⏮", PageNav::First, "First page"),
            ];
            for (icon, nav, hint) in buttons {
                if ui.button(icon).on_hover_text(hint).clicked() {
                    interaction = Some(FooterInteraction::Nav(nav));
                }
            }

            ui.separator();

            let mut selected = state.page_size;
            egui::ComboBox::from_id_salt("rgrid_page_size")
                .selected_text(selected.to_string())
                .show_ui(ui, |ui| {
                    for size in PageSize::all() {
                        ui.selectable_value(&mut selected, size, size.to_string());
                    }
                });
            if selected != state.page_size {
                interaction = Some(FooterInteraction::PageSizeChanged(selected));
            }

            ui.label("Rows per page:");
        });
    });

    interaction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_label_uses_total_pages() {
        let state = GridState { page: 3, page_size: PageSize::new(10).unwrap(), ..GridState::default() };
        assert_eq!(page_label(&state, 47), "Page 3 of 5");
        assert_eq!(page_label(&GridState::default(), 0), "Page 1 of 1");
    }
}
