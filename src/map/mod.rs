//! Map module - map document construction, animation and HTML export

mod ant_path;
mod document;
mod html;

pub use ant_path::{animation_phase, ant_positions};
pub use document::{MapDocument, MarkerColor, PathStyle};
pub use html::{file_stem, open_in_browser, page_title, write_html, ExportError};
