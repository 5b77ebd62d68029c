//! Geomapping - Tiered Geographic Chain Viewer
//!
//! Loads a CSV of tier1/tier2/tier3 points once at startup and shows the
//! chains of one company as markers and animated tracing paths.

mod config;
mod data;
mod gui;
mod map;

use anyhow::Context;
use clap::Parser;
use config::{AppConfig, Cli, FileConfig, CONFIG_FILE};
use data::GeoTable;
use eframe::egui;
use gui::GeomappingApp;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let file_config = FileConfig::load_optional(Path::new(CONFIG_FILE))
        .with_context(|| format!("Invalid {}", CONFIG_FILE))?;
    let config = AppConfig::resolve(cli, file_config);

    env_logger::Builder::new()
        .parse_filters(&config.log_filter)
        .parse_default_env()
        .init();

    let table = GeoTable::load_csv(&config.csv_path)
        .with_context(|| format!("Cannot load {}", config.csv_path.display()))?;
    log::info!(
        "Loaded {} rows from {}",
        table.row_count(),
        config.csv_path.display()
    );

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([1000.0, 600.0])
            .with_title("Geomapping Visualization"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Geomapping Visualization",
        options,
        Box::new(move |cc| Ok(Box::new(GeomappingApp::new(cc, table)))),
    )
    .map_err(|e| anyhow::anyhow!("UI error: {}", e))
}
