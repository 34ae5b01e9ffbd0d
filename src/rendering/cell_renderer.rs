//! Per-cell rendering.
//!
//! Dispatches on the column's resolved `CellRender`: action renderers get
//! the whole row, custom renderers get the value, and everything else is
//! stringified and truncated to the column width.

use std::borrow::Cow;

use eframe::egui;
use serde_json::Value;

use crate::columns::{CellContext, CellRender, ColumnSpec};
use crate::rendering::text_utils::truncate_text_to_fit;
use crate::traits::GridRow;

/// Shown for missing and `null` values.
pub const MISSING_VALUE: &str = "-";

/// Default stringification of a cell value.
///
/// Strings are shown without quotes; other scalars and containers use their
/// JSON form.
pub fn display_value(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(MISSING_VALUE),
        Some(Value::String(s)) => Cow::Borrowed(s.as_str()),
        Some(other) => Cow::Owned(other.to_string()),
    }
}

/// Renders one cell inside the current `ui`.
///
/// # Arguments
/// * `ui` - Cell-sized ui
/// * `row` - Row being rendered
/// * `column` - Column definition
/// * `render` - Resolved rendering strategy for `column`
pub fn render_cell<R: GridRow>(ui: &mut egui::Ui, row: &R, column: &ColumnSpec<R>, render: &CellRender<R>) {
    match render {
        CellRender::Action(action) => action(ui, row, column),
        CellRender::Custom(renderer) => {
            let ctx = CellContext { row, value: row.cell(&column.field), column };
            renderer(ui, ctx);
        }
        CellRender::Plain => {
            let value = row.cell(&column.field);
            let text = display_value(value.as_deref());
            let font_id = egui::TextStyle::Body.resolve(ui.style());
            let shown = truncate_text_to_fit(&text, ui.available_width(), &font_id, ui.painter());
            let label = ui.add(egui::Label::new(shown.as_str()).selectable(false));
            if shown != text {
                label.on_hover_text(text.as_ref());
            }
        }
    }
}
