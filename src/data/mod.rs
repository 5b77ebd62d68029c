//! Data module - CSV loading, coordinate parsing and chain queries

mod coordinate;
mod loader;
mod query;

pub use coordinate::{parse_coordinates, Coordinate};
pub use loader::GeoTable;
pub use query::{Chain, QueryOutcome};
