//! Geomapping Main Application
//! Main window with the query panel and the map viewer.

use crate::data::{GeoTable, QueryOutcome};
use crate::gui::{MapViewer, QueryPanel, QueryPanelAction};
use crate::map::{self, ExportError};
use egui::SidePanel;

/// Main application window.
pub struct GeomappingApp {
    table: GeoTable,
    query_panel: QueryPanel,
    map_viewer: MapViewer,
    outcome: QueryOutcome,
}

impl GeomappingApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, table: GeoTable) -> Self {
        let source = table
            .file_path()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "In-memory table".to_string());
        let mut query_panel = QueryPanel::new(
            format!("{} ({} rows)", source, table.row_count()),
            table.tier1_names(),
        );
        query_panel.set_status(&format!("Loaded {} rows", table.row_count()));

        Self {
            table,
            query_panel,
            map_viewer: MapViewer::new(),
            outcome: QueryOutcome::Idle,
        }
    }

    /// Run the full filter and render pipeline for a submitted key.
    fn handle_submit(&mut self, key: &str) {
        self.outcome = QueryOutcome::submit(&self.table, key);

        match &self.outcome {
            QueryOutcome::Idle => {
                self.query_panel.set_status("Ready");
            }
            QueryOutcome::Warned { message, .. } => {
                self.query_panel.set_status(message);
            }
            QueryOutcome::Rendered { map, .. } => {
                self.query_panel.set_status(&format!(
                    "Showing {} markers, {} paths",
                    map.markers.len(),
                    map.paths.len()
                ));
                self.map_viewer.reset_view();
            }
        }
        self.query_panel.export_enabled = self.outcome.map().is_some();
    }

    /// Write the current map to a temp file and open it in the browser.
    fn handle_open_in_browser(&mut self) {
        let (Some(doc), Some(key)) = (self.outcome.map(), self.outcome.key()) else {
            self.query_panel.set_status("No map to open");
            return;
        };

        match map::open_in_browser(doc, key) {
            Ok(path) => {
                self.query_panel
                    .set_status(&format!("Opened {}", path.display()));
            }
            Err(e) => self.report_export_error(e),
        }
    }

    /// Ask for a location and save the current map as HTML.
    fn handle_export_html(&mut self) {
        let (Some(doc), Some(key)) = (self.outcome.map(), self.outcome.key()) else {
            self.query_panel.set_status("No map to export");
            return;
        };

        let output_path = match rfd::FileDialog::new()
            .add_filter("HTML", &["html"])
            .set_file_name(format!("{}.html", map::file_stem(key)))
            .save_file()
        {
            Some(path) => path,
            None => return, // User cancelled
        };

        match map::write_html(doc, &map::page_title(key), &output_path) {
            Ok(()) => {
                self.query_panel
                    .set_status(&format!("Exported {}", output_path.display()));
            }
            Err(e) => self.report_export_error(e),
        }
    }

    fn report_export_error(&mut self, error: ExportError) {
        log::error!("{}", error);
        self.query_panel.set_status(&format!("Error: {}", error));
    }
}

impl eframe::App for GeomappingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Left panel - Query Panel
        SidePanel::left("query_panel")
            .min_width(300.0)
            .max_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.query_panel.show(ui) {
                        QueryPanelAction::Submit(key) => self.handle_submit(&key),
                        QueryPanelAction::OpenInBrowser => self.handle_open_in_browser(),
                        QueryPanelAction::ExportHtml => self.handle_export_html(),
                        QueryPanelAction::None => {}
                    }
                });
            });

        // Central panel - Map Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.map_viewer.show(ctx, ui, &self.outcome);
        });
    }
}
