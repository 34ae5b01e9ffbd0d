//! Body row rendering
//!
//! One line per row with cells sized by the resolved column widths. When an
//! expanded-row renderer is configured, each row gets a leading toggle and
//! expanded rows show their detail directly below.

use std::rc::Rc;

use eframe::egui;

use crate::columns::{Alignment, CellRender, ColumnSpec};
use crate::rendering::cell_renderer::render_cell;
use crate::state::ExpandedRowSet;
use crate::traits::{GridRow, RowKey};

/// Height of one data row.
pub const ROW_HEIGHT: f32 = 22.0;

/// Width of the leading expand-toggle column.
pub const EXPAND_COLUMN_WIDTH: f32 = 24.0;

/// Text shown when there are no rows.
pub const EMPTY_TEXT: &str = "No records";

/// Renders the detail area of an expanded row.
pub type DetailRenderer<R> = Rc<dyn Fn(&mut egui::Ui, &R)>;

/// Result of user interaction with the body rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyInteraction {
    /// A row's expand toggle was clicked
    ExpandToggled(RowKey),
}

/// A visible column together with its resolved rendering strategy.
pub struct VisibleColumn<'a, R> {
    pub spec: &'a ColumnSpec<R>,
    pub render: &'a CellRender<R>,
}

/// Lays out a fixed-size cell and runs `add_contents` inside it.
pub(crate) fn cell<T>(
    ui: &mut egui::Ui,
    width: f32,
    height: f32,
    align: Alignment,
    add_contents: impl FnOnce(&mut egui::Ui) -> T,
) -> T {
    ui.allocate_ui_with_layout(
        egui::vec2(width, height),
        egui::Layout::top_down(align.to_egui()),
        |ui| {
            ui.set_min_size(egui::vec2(width, height));
            ui.set_max_width(width);
            add_contents(ui)
        },
    )
    .inner
}

/// Renders every row.
///
/// # Arguments
/// * `ui` - The egui UI context for drawing
/// * `rows` - Rows for the current page
/// * `columns` - Visible columns with their renderers
/// * `widths` - Resolved width of each visible column
/// * `expanded` - Which rows are expanded
/// * `detail` - Expanded-row renderer, if the grid supports expansion
///
/// # Returns
/// * `Option<BodyInteraction>` - User interaction result
pub fn render_body_rows<R: GridRow>(
    ui: &mut egui::Ui,
    rows: &[R],
    columns: &[VisibleColumn<'_, R>],
    widths: &[f32],
    expanded: &ExpandedRowSet,
    detail: Option<&DetailRenderer<R>>,
) -> Option<BodyInteraction> {
    if rows.is_empty() {
        ui.add_space(8.0);
        ui.weak(EMPTY_TEXT);
        return None;
    }

    let mut interaction = None;

    for (index, row) in rows.iter().enumerate() {
        let key = RowKey::of(row, index);
        let is_expanded = detail.is_some() && expanded.is_expanded(&key);

        ui.push_id(("rgrid_row", index), |ui| {
            ui.horizontal(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;

                if detail.is_some() {
                    let icon = if is_expanded { "▼" } else { "▶" };
                    let clicked = cell(ui, EXPAND_COLUMN_WIDTH, ROW_HEIGHT, Alignment::Center, |ui| {
                        ui.add(egui::Button::new(icon).frame(false)).clicked()
                    });
                    if clicked {
                        interaction = Some(BodyInteraction::ExpandToggled(key.clone()));
                    }
                }

                for (column, &width) in columns.iter().zip(widths) {
                    cell(ui, width, ROW_HEIGHT, column.spec.align, |ui| {
                        render_cell(ui, row, column.spec, column.render);
                    });
                }
            });

            if let (true, Some(detail)) = (is_expanded, detail) {
                ui.indent("rgrid_detail", |ui| detail(ui, row));
            }
        });

        ui.separator();
    }

    interaction
}
