//! GUI module - User interface components

mod app;
mod map_viewer;
mod query_panel;

pub use app::GeomappingApp;
pub use map_viewer::MapViewer;
pub use query_panel::{QueryPanel, QueryPanelAction};
