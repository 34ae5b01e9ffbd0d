//! Column configuration for the data grid.
//!
//! A `ColumnSpec` describes how one field of a row is sized, sorted,
//! filtered and rendered. Sizing and rendering are both resolved into tagged
//! variants (`ColumnSizing`, `CellRender`) so per-cell code never has to
//! re-inspect which optional settings a column carries.

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::rc::Rc;

use crate::error::{GridError, Result};

/// Horizontal alignment of cell or header content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn to_egui(self) -> egui::Align {
        match self {
            Alignment::Left => egui::Align::Min,
            Alignment::Center => egui::Align::Center,
            Alignment::Right => egui::Align::Max,
        }
    }
}

/// Values passed to a custom cell renderer.
pub struct CellContext<'a, R> {
    pub row: &'a R,
    pub value: Option<Cow<'a, serde_json::Value>>,
    pub column: &'a ColumnSpec<R>,
}

/// Renders a whole cell from the row (buttons, links, menus).
pub type ActionRenderer<R> = Rc<dyn Fn(&mut egui::Ui, &R, &ColumnSpec<R>)>;

/// Renders a cell from its value.
pub type CellRenderer<R> = Rc<dyn Fn(&mut egui::Ui, CellContext<'_, R>)>;

/// How a column takes horizontal space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnSizing {
    /// Explicit pixel width, never grows.
    Fixed(f32),
    /// Shares leftover space by weight.
    FlexWeighted(f32),
    /// Sized by content and minimum width; the layout engine decides whether
    /// it stretches.
    AutoSized,
}

/// Column definition.
pub struct ColumnSpec<R> {
    /// Unique key; the value is read from `row.cell(field)`.
    pub field: String,
    pub header_name: String,
    pub width: Option<f32>,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    pub flex_weight: Option<f32>,
    pub sortable: bool,
    pub filterable: bool,
    pub hidden: bool,
    pub align: Alignment,
    pub header_align: Alignment,
    pub cell_renderer: Option<CellRenderer<R>>,
    pub action_renderer: Option<ActionRenderer<R>>,
}

impl<R> ColumnSpec<R> {
    /// Creates a sortable, filterable, auto-sized column.
    pub fn new(field: impl Into<String>, header_name: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header_name: header_name.into(),
            width: None,
            min_width: None,
            max_width: None,
            flex_weight: None,
            sortable: true,
            filterable: true,
            hidden: false,
            align: Alignment::Left,
            header_align: Alignment::Left,
            cell_renderer: None,
            action_renderer: None,
        }
    }

    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_width(mut self, min_width: f32) -> Self {
        self.min_width = Some(min_width);
        self
    }

    pub fn max_width(mut self, max_width: f32) -> Self {
        self.max_width = Some(max_width);
        self
    }

    pub fn flex(mut self, weight: f32) -> Self {
        self.flex_weight = Some(weight);
        self
    }

    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    pub fn filterable(mut self, filterable: bool) -> Self {
        self.filterable = filterable;
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn header_align(mut self, align: Alignment) -> Self {
        self.header_align = align;
        self
    }

    pub fn renderer(mut self, renderer: impl Fn(&mut egui::Ui, CellContext<'_, R>) + 'static) -> Self {
        self.cell_renderer = Some(Rc::new(renderer));
        self
    }

    pub fn action(mut self, renderer: impl Fn(&mut egui::Ui, &R, &ColumnSpec<R>) + 'static) -> Self {
        self.action_renderer = Some(Rc::new(renderer));
        self
    }

    /// Resolves the sizing mode. An explicit width wins over a flex weight.
    pub fn sizing(&self) -> ColumnSizing {
        match (self.width, self.flex_weight) {
            (Some(width), _) => ColumnSizing::Fixed(width),
            (None, Some(weight)) => ColumnSizing::FlexWeighted(weight),
            (None, None) => ColumnSizing::AutoSized,
        }
    }
}

impl<R> Clone for ColumnSpec<R> {
    fn clone(&self) -> Self {
        Self {
            field: self.field.clone(),
            header_name: self.header_name.clone(),
            width: self.width,
            min_width: self.min_width,
            max_width: self.max_width,
            flex_weight: self.flex_weight,
            sortable: self.sortable,
            filterable: self.filterable,
            hidden: self.hidden,
            align: self.align,
            header_align: self.header_align,
            cell_renderer: self.cell_renderer.clone(),
            action_renderer: self.action_renderer.clone(),
        }
    }
}

impl<R> fmt::Debug for ColumnSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("field", &self.field)
            .field("header_name", &self.header_name)
            .field("sizing", &self.sizing())
            .field("sortable", &self.sortable)
            .field("filterable", &self.filterable)
            .field("hidden", &self.hidden)
            .field("render", &CellRender::resolve(self).kind())
            .finish()
    }
}

/// Rendering strategy for a column, resolved once.
///
/// Precedence: action renderer, then cell renderer, then plain text.
pub enum CellRender<R> {
    Action(ActionRenderer<R>),
    Custom(CellRenderer<R>),
    Plain,
}

impl<R> CellRender<R> {
    pub fn resolve(column: &ColumnSpec<R>) -> Self {
        if let Some(action) = &column.action_renderer {
            CellRender::Action(Rc::clone(action))
        } else if let Some(renderer) = &column.cell_renderer {
            CellRender::Custom(Rc::clone(renderer))
        } else {
            CellRender::Plain
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            CellRender::Action(_) => "action",
            CellRender::Custom(_) => "custom",
            CellRender::Plain => "plain",
        }
    }
}

/// Rejects column sets that reuse a field.
pub fn validate_columns<R>(columns: &[ColumnSpec<R>]) -> Result<()> {
    let mut seen = HashSet::with_capacity(columns.len());
    for column in columns {
        if !seen.insert(column.field.as_str()) {
            return Err(GridError::DuplicateField(column.field.clone()));
        }
    }
    Ok(())
}

/// First visible sortable column, used by the quick-sort action.
pub fn first_sortable_field<R>(columns: &[ColumnSpec<R>]) -> Option<&str> {
    columns
        .iter()
        .find(|c| !c.hidden && c.sortable)
        .map(|c| c.field.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn width_wins_over_flex() {
        let column = ColumnSpec::<Value>::new("price", "Price").width(120.0).flex(2.0);
        assert_eq!(column.sizing(), ColumnSizing::Fixed(120.0));
        assert_eq!(ColumnSpec::<Value>::new("a", "A").flex(2.0).sizing(), ColumnSizing::FlexWeighted(2.0));
        assert_eq!(ColumnSpec::<Value>::new("a", "A").sizing(), ColumnSizing::AutoSized);
    }

    #[test]
    fn action_takes_priority_over_renderer() {
        let column = ColumnSpec::<Value>::new("edit", "Edit")
            .renderer(|_, _| {})
            .action(|_, _, _| {});
        assert_eq!(CellRender::resolve(&column).kind(), "action");

        let column = ColumnSpec::<Value>::new("title", "Title").renderer(|_, _| {});
        assert_eq!(CellRender::resolve(&column).kind(), "custom");

        let column = ColumnSpec::<Value>::new("title", "Title");
        assert_eq!(CellRender::resolve(&column).kind(), "plain");
    }

    #[test]
    fn duplicate_fields_are_rejected() {
        let columns = vec![
            ColumnSpec::<Value>::new("id", "ID"),
            ColumnSpec::<Value>::new("city", "City"),
            ColumnSpec::<Value>::new("id", "Other"),
        ];
        assert!(matches!(validate_columns(&columns), Err(GridError::DuplicateField(f)) if f == "id"));
        assert!(validate_columns(&columns[..2]).is_ok());
    }

    #[test]
    fn first_sortable_skips_hidden_and_unsortable() {
        let columns = vec![
            ColumnSpec::<Value>::new("id", "ID").hidden(true),
            ColumnSpec::<Value>::new("actions", "").sortable(false),
            ColumnSpec::<Value>::new("title", "Title"),
        ];
        assert_eq!(first_sortable_field(&columns), Some("title"));
    }
}
