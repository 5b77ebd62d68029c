//! CSV Data Loader Module
//! Reads the tiered point table once at startup using Polars.

use polars::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const TIER1_NAME_COL: &str = "tier1_name";
pub const TIER1_COORDS_COL: &str = "tier1_geometry_coordinates";
pub const TIER2_COORDS_COL: &str = "tier2_geometry_coordinates";
pub const TIER3_COORDS_COL: &str = "tier3_geometry_coordinates";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// One row of the input table. Coordinate fields keep their raw text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub tier1_name: Option<String>,
    pub tier1_coords: Option<String>,
    pub tier2_coords: Option<String>,
    pub tier3_coords: Option<String>,
}

impl Record {
    /// Raw coordinate text for each tier, tier1 first.
    pub fn tier_fields(&self) -> [Option<&str>; 3] {
        [
            self.tier1_coords.as_deref(),
            self.tier2_coords.as_deref(),
            self.tier3_coords.as_deref(),
        ]
    }
}

/// Immutable, row-ordered table loaded at process start.
#[derive(Debug, Clone, Default)]
pub struct GeoTable {
    records: Vec<Record>,
    file_path: Option<PathBuf>,
}

impl GeoTable {
    /// Build a table from already parsed records.
    #[cfg(test)]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            records,
            file_path: None,
        }
    }

    /// Load a CSV file using Polars.
    ///
    /// Every column is read as text so coordinate fields reach the parser
    /// unchanged; empty cells come back as nulls.
    pub fn load_csv(file_path: &Path) -> Result<Self, LoaderError> {
        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(0))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let names = Self::text_column(&df, TIER1_NAME_COL)?;
        let tier1 = Self::text_column(&df, TIER1_COORDS_COL)?;
        let tier2 = Self::text_column(&df, TIER2_COORDS_COL)?;
        let tier3 = Self::text_column(&df, TIER3_COORDS_COL)?;

        let records = names
            .into_iter()
            .zip(tier1)
            .zip(tier2)
            .zip(tier3)
            .map(|(((tier1_name, tier1_coords), tier2_coords), tier3_coords)| Record {
                tier1_name,
                tier1_coords,
                tier2_coords,
                tier3_coords,
            })
            .collect();

        Ok(Self {
            records,
            file_path: Some(file_path.to_path_buf()),
        })
    }

    /// Extract a column as optional strings, in row order.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, LoaderError> {
        let column = df
            .column(name)
            .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
        let text = column.cast(&DataType::String)?;
        let values = text
            .as_materialized_series()
            .str()?
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect();
        Ok(values)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Get the number of rows in the table.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Distinct non-empty tier1 names, sorted.
    pub fn tier1_names(&self) -> Vec<String> {
        self.records
            .iter()
            .filter_map(|r| r.tier1_name.as_deref())
            .filter(|name| !name.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Get file path.
    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }
}
