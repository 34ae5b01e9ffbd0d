//! Grid demo application
//!
//! Shows a `DataGrid` over generated property listings (or a JSON file of
//! rows). The address bar mirrors the query string the grid reads and
//! writes, so every sort, search, filter and page change is visible and can
//! be edited by hand or undone with Back.
//!
//! Configuration is read from `<config dir>/rgrid/grid.json`; set `RUST_LOG`
//! to adjust logging.

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use eframe::egui;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rgrid::{DataGrid, GridConfig, GridData};

mod app;

use app::{render_header, AppState, ApplicationCoordinator, HeaderInteraction, ListingSource, SettingsCoordinator};

/// Main entry point that initializes logging and launches the demo.
fn main() -> eframe::Result {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = dirs::config_dir()
        .map(|dir| GridConfig::load_or_default(&dir.join("rgrid").join("grid.json")))
        .unwrap_or_default();
    info!(?config, "starting grid demo");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("rgrid demo"),
        ..Default::default()
    };

    eframe::run_native(
        "rgrid demo",
        options,
        Box::new(move |cc| Ok(Box::new(GridDemoApp::new(cc, config)?))),
    )
}

/// The demo application.
///
/// - `ApplicationCoordinator` handles row sources and navigation
/// - `SettingsCoordinator` persists the last query
/// - `DataGrid` renders the rows and writes the query
struct GridDemoApp {
    state: AppState,
    grid: DataGrid<Value>,
    config: GridConfig,
}

impl GridDemoApp {
    fn new(cc: &eframe::CreationContext, config: GridConfig) -> rgrid::Result<Self> {
        let query = SettingsCoordinator::load_last_query(cc.storage);
        let source = ApplicationCoordinator::sample_source();
        let grid = Self::build_grid(&source, &config)?;
        Ok(Self {
            state: AppState::new(source, "Sample listings", &query),
            grid,
            config,
        })
    }

    fn build_grid(source: &ListingSource, config: &GridConfig) -> rgrid::Result<DataGrid<Value>> {
        let mut grid = DataGrid::new(ApplicationCoordinator::columns_for(source), config.clone())?
            .with_expand(|ui, row: &Value| {
                let pretty = serde_json::to_string_pretty(row).unwrap_or_default();
                ui.monospace(pretty);
            })
            .with_create_form(|ui| {
                if ui.button("➕ New listing").clicked() {
                    info!("create form requested");
                }
            });
        if config.export_url.is_none() {
            grid = grid.with_export(ApplicationCoordinator::local_export(source));
        }
        Ok(grid)
    }

    fn rebuild_grid(&mut self) {
        match Self::build_grid(&self.state.source, &self.config) {
            Ok(grid) => self.grid = grid,
            Err(err) => {
                error!("Cannot build grid: {}", err);
                self.state.error_message = Some(err.to_string());
            }
        }
    }

    fn handle_header_interaction(&mut self, interaction: HeaderInteraction) {
        match interaction {
            HeaderInteraction::OpenFileRequested(path) => {
                if ApplicationCoordinator::open_rows_file(&mut self.state, &path) {
                    self.rebuild_grid();
                }
            }
            HeaderInteraction::SampleRequested => {
                ApplicationCoordinator::open_sample(&mut self.state);
                self.rebuild_grid();
            }
            HeaderInteraction::BackRequested => ApplicationCoordinator::go_back(&mut self.state),
            HeaderInteraction::AddressSubmitted => ApplicationCoordinator::apply_address(&mut self.state),
        }
    }
}

impl eframe::App for GridDemoApp {
    /// Called when the app is being shut down - saves the last query.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        SettingsCoordinator::save_last_query(storage, &ApplicationCoordinator::current_query(&self.state));
    }

    /// Main update loop:
    /// 1. Refetch rows if the query changed
    /// 2. Render the header and handle its interaction
    /// 3. Render the grid, which writes the query on interaction
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.refresh();

        let mut header_interaction = None;
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            header_interaction = render_header(ui, &mut self.state);
        });
        if let Some(interaction) = header_interaction {
            self.handle_header_interaction(interaction);
            self.state.refresh();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let page = &self.state.page;
            let data = GridData::new(&page.rows, page.total_rows).with_total_general(page.total_general);
            let response = self.grid.show(ui, &mut self.state.location, data);
            if response.query_changed {
                ctx.request_repaint();
            }
        });
    }
}
