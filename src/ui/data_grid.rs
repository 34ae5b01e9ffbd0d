//! The data grid widget.
//!
//! `DataGrid` ties the pieces together once per frame: it decodes the query,
//! refreshes the column layout for the current viewport, renders toolbar,
//! header, rows and footer, then hands every collected interaction and due
//! debounce commit to `GridCoordinator`.

use std::rc::Rc;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing::{info, warn};

use crate::columns::{validate_columns, CellRender, ColumnSpec};
use crate::config::GridConfig;
use crate::coordinator::{GridCoordinator, GridInteraction};
use crate::domain::column_layout::resolve_widths;
use crate::error::Result;
use crate::io::{ExportController, ExportHandler, ExportRequest, ExportResult, HttpExporter};
use crate::state::{GridState, GridViewState};
use crate::traits::{GridRow, QueryStore};
use crate::ui::body_rows::{render_body_rows, BodyInteraction, DetailRenderer, VisibleColumn, EXPAND_COLUMN_WIDTH};
use crate::ui::footer::{render_footer, FooterInteraction};
use crate::ui::header_row::{render_header_row, HeaderInteraction};
use crate::ui::notifications::{render_notifications, Notifications};
use crate::ui::toolbar::{render_toolbar, CreateFormSlot, ExportButton, ToolbarInteraction};

/// Rows supplied by the collaborator for the current query.
#[derive(Debug)]
pub struct GridData<'a, R> {
    /// Rows of the current page, already filtered and sorted.
    pub rows: &'a [R],
    /// Row count after filtering.
    pub total_rows: usize,
    /// Row count before filtering, if known.
    pub total_general: Option<usize>,
}

impl<'a, R> GridData<'a, R> {
    pub fn new(rows: &'a [R], total_rows: usize) -> Self {
        Self { rows, total_rows, total_general: None }
    }

    pub fn with_total_general(mut self, total_general: usize) -> Self {
        self.total_general = Some(total_general);
        self
    }
}

/// What happened during one `show` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridResponse {
    /// Interactions handled this frame, in order.
    pub interactions: Vec<GridInteraction>,
    /// The query string changed; the collaborator should re-fetch.
    pub query_changed: bool,
}

/// A query-string driven data grid.
///
/// Responsibilities:
/// - Owning column definitions and their resolved renderers
/// - Owning transient view state (debounce buffers, expanded rows, layout)
/// - Running exports in the background and reporting them as notifications
pub struct DataGrid<R> {
    columns: Vec<ColumnSpec<R>>,
    renders: Vec<CellRender<R>>,
    config: GridConfig,
    view: GridViewState,
    detail: Option<DetailRenderer<R>>,
    create_form: Option<CreateFormSlot>,
    export: Option<ExportHandler>,
    exporter: ExportController,
    notifications: Notifications,
}

impl<R: GridRow> DataGrid<R> {
    /// Creates a grid. Fails if two columns share a field.
    ///
    /// When `config.export_url` is set, the export button uses the HTTP
    /// exporter for it.
    pub fn new(columns: Vec<ColumnSpec<R>>, config: GridConfig) -> Result<Self> {
        validate_columns(&columns)?;
        let renders = columns.iter().map(CellRender::resolve).collect();

        let export = config.export_url.as_deref().and_then(|url| match HttpExporter::new(url) {
            Ok(exporter) => Some(ExportHandler::Http(exporter)),
            Err(err) => {
                warn!("Export disabled: {}", err);
                None
            }
        });

        Ok(Self {
            columns,
            renders,
            view: GridViewState::new(&config, &GridState::default()),
            notifications: Notifications::new(config.notification_ttl()),
            config,
            detail: None,
            create_form: None,
            export,
            exporter: ExportController::new(),
        })
    }

    /// Enables row expansion with a detail renderer.
    pub fn with_expand(mut self, renderer: impl Fn(&mut egui::Ui, &R) + 'static) -> Self {
        self.detail = Some(Rc::new(renderer));
        self
    }

    /// Adds caller content to the toolbar.
    pub fn with_create_form(mut self, slot: impl FnMut(&mut egui::Ui) + 'static) -> Self {
        self.create_form = Some(Box::new(slot));
        self
    }

    /// Replaces the export handler.
    pub fn with_export(mut self, handler: ExportHandler) -> Self {
        self.export = Some(handler);
        self
    }

    pub fn columns(&self) -> &[ColumnSpec<R>] {
        &self.columns
    }

    /// Replaces the column set and forces a layout pass.
    pub fn set_columns(&mut self, columns: Vec<ColumnSpec<R>>) -> Result<()> {
        validate_columns(&columns)?;
        self.renders = columns.iter().map(CellRender::resolve).collect();
        self.columns = columns;
        self.view.invalidate_layout();
        Ok(())
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn view(&self) -> &GridViewState {
        &self.view
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn is_exporting(&self) -> bool {
        self.exporter.is_exporting()
    }

    /// Renders the grid and applies this frame's interactions to `store`.
    pub fn show(&mut self, ui: &mut egui::Ui, store: &mut dyn QueryStore, data: GridData<'_, R>) -> GridResponse {
        let now = Instant::now();
        self.poll_export(now);

        let state = GridCoordinator::current_state(store);
        self.view.refresh_layout(&self.columns, Some(ui.ctx().content_rect().width()));
        self.view.sync_inputs(&state, &self.columns);

        let visible: Vec<VisibleColumn<'_, R>> = self
            .columns
            .iter()
            .zip(&self.renders)
            .filter(|(spec, _)| !spec.hidden)
            .map(|(spec, render)| VisibleColumn { spec, render })
            .collect();
        let specs: Vec<&ColumnSpec<R>> = visible.iter().map(|c| c.spec).collect();

        let expandable = self.detail.is_some();
        let reserved = if expandable { EXPAND_COLUMN_WIDTH } else { 0.0 };
        let widths = resolve_widths(self.view.styles(), (ui.available_width() - reserved).max(0.0));

        let mut interactions = Vec::new();

        // ===== Toolbar =====
        let export_button = match (&self.export, self.exporter.is_exporting()) {
            (None, _) => ExportButton::Hidden,
            (Some(_), true) => ExportButton::Busy,
            (Some(_), false) => ExportButton::Ready,
        };
        if let Some(toolbar) = render_toolbar(
            ui,
            &mut self.view.search,
            &state,
            export_button,
            self.create_form.as_mut(),
            now,
        ) {
            interactions.push(match toolbar {
                ToolbarInteraction::QuickSort => GridInteraction::QuickSort,
                ToolbarInteraction::FilterModeToggled(on) => GridInteraction::FilterModeToggled(on),
                ToolbarInteraction::ExportRequested => GridInteraction::ExportRequested,
            });
        }

        render_notifications(ui, &self.notifications);
        ui.separator();

        // ===== Table =====
        egui::ScrollArea::horizontal().id_salt("rgrid_table").show(ui, |ui| {
            if let Some(HeaderInteraction::SortClicked(field)) = render_header_row(
                ui,
                &specs,
                &widths,
                &state,
                &mut self.view.filters,
                expandable,
                now,
            ) {
                interactions.push(GridInteraction::SortClicked(field));
            }
            ui.separator();

            if let Some(BodyInteraction::ExpandToggled(key)) = render_body_rows(
                ui,
                data.rows,
                &visible,
                &widths,
                &self.view.expanded,
                self.detail.as_ref(),
            ) {
                interactions.push(GridInteraction::RowExpandToggled(key));
            }
        });

        // ===== Footer =====
        if let Some(footer) = render_footer(ui, &state, data.total_rows, data.total_general) {
            interactions.push(match footer {
                FooterInteraction::Nav(nav) => GridInteraction::PageNav(nav),
                FooterInteraction::PageSizeChanged(size) => GridInteraction::PageSizeChanged(size),
            });
        }

        let fields: Vec<String> = specs.iter().map(|c| c.field.clone()).collect();

        interactions.extend(GridCoordinator::poll_commits(&mut self.view, now));

        let before = store.query();
        for interaction in &interactions {
            if *interaction == GridInteraction::ExportRequested {
                self.start_export(store, fields.clone(), ui.ctx(), now);
            } else {
                GridCoordinator::handle(interaction.clone(), &mut self.view, store, &self.columns, data.total_rows);
            }
        }
        let query_changed = store.query() != before;

        self.schedule_repaint(ui.ctx(), now);

        GridResponse { interactions, query_changed }
    }

    fn start_export(&mut self, store: &dyn QueryStore, fields: Vec<String>, ctx: &egui::Context, now: Instant) {
        let Some(handler) = self.export.clone() else {
            return;
        };
        let request = ExportRequest { query: store.query(), fields };
        if let Err(err) = self.exporter.start(handler, request, Some(ctx)) {
            self.notifications.error(err.user_message(), now);
        }
    }

    fn poll_export(&mut self, now: Instant) {
        self.notifications.prune(now);
        match self.exporter.check_completion() {
            ExportResult::Success(outcome) => {
                let message = match &outcome.saved_to {
                    Some(path) => format!("Export saved to {}", path.display()),
                    None => "Export finished".to_string(),
                };
                info!("{}", message);
                self.notifications.info(message, now);
            }
            ExportResult::Error(err) => {
                self.notifications.error(err.user_message(), now);
            }
            ExportResult::None => {}
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let due = [self.view.next_commit_in(now), self.notifications.next_expiry(now)]
            .into_iter()
            .flatten()
            .min();
        if let Some(delay) = due {
            ctx.request_repaint_after(delay.max(Duration::from_millis(1)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;
    use crate::location::MemoryLocation;
    use serde_json::{json, Value};

    fn columns() -> Vec<ColumnSpec<Value>> {
        vec![ColumnSpec::new("id", "ID").width(60.0), ColumnSpec::new("title", "Title")]
    }

    #[test]
    fn duplicate_columns_are_rejected() {
        let mut columns = columns();
        columns.push(ColumnSpec::new("title", "Again"));
        assert!(matches!(
            DataGrid::new(columns, GridConfig::default()),
            Err(GridError::DuplicateField(field)) if field == "title"
        ));
    }

    #[test]
    fn export_follows_configuration() {
        let grid = DataGrid::new(columns(), GridConfig::default()).unwrap();
        assert!(grid.export.is_none());

        let config = GridConfig { export_url: Some("https://api.example.com/export".into()), ..GridConfig::default() };
        assert!(DataGrid::<Value>::new(columns(), config).unwrap().export.is_some());

        let config = GridConfig { export_url: Some("not a url".into()), ..GridConfig::default() };
        assert!(DataGrid::<Value>::new(columns(), config).unwrap().export.is_none());
    }

    #[test]
    fn idle_frame_leaves_query_alone() {
        let ctx = egui::Context::default();
        let mut grid = DataGrid::new(columns(), GridConfig::default()).unwrap().with_expand(|ui, row: &Value| {
            ui.label(row.to_string());
        });
        let mut location = MemoryLocation::new("search=loft&filtration=true");
        let rows = vec![json!({"id": 1, "title": "Loft"}), json!({"id": 2, "title": null})];

        let mut response = GridResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                response = grid.show(ui, &mut location, GridData::new(&rows, 2).with_total_general(10));
            });
        });

        assert!(response.interactions.is_empty());
        assert!(!response.query_changed);
        assert_eq!(location.version(), 0);
        assert_eq!(grid.view().search.text(), "loft");
        assert_eq!(grid.view().filters.len(), 2);
        assert_eq!(grid.view().styles().len(), 2);
    }
}
