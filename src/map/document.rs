//! Map Document Module
//! Builds the renderable description of a query result: view center,
//! per-tier markers and the animated tracing paths between them.

use crate::data::{Chain, Coordinate};
use serde::Serialize;

/// Initial zoom level of every rendered map.
pub const ZOOM_START: u8 = 5;
/// Logical display size of the map surface.
pub const MAP_WIDTH: u32 = 1920;
pub const MAP_HEIGHT: u32 = 1080;

/// Marker colour by tier position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    Red,
    Green,
    Blue,
    Gray,
}

impl MarkerColor {
    /// Colour for a 0-based tier position. Positions past tier3 fall back
    /// to gray.
    pub fn for_position(position: usize) -> Self {
        match position {
            0 => MarkerColor::Red,
            1 => MarkerColor::Green,
            2 => MarkerColor::Blue,
            _ => MarkerColor::Gray,
        }
    }
}

/// Visual style shared by all tracing paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PathStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub dash_array: [u32; 2],
    /// Animation period in milliseconds.
    pub delay: u32,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: "purple",
            weight: 2.5,
            opacity: 0.8,
            dash_array: [10, 20],
            delay: 400,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub location: Coordinate,
    pub tooltip: String,
    pub color: MarkerColor,
}

impl Marker {
    fn for_tier(location: Coordinate, position: usize) -> Self {
        Self {
            location,
            tooltip: format!("Tier{} Point", position + 1),
            color: MarkerColor::for_position(position),
        }
    }
}

/// An animated directional line, drawn from its first point to its last.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AntPath {
    pub locations: Vec<Coordinate>,
    pub style: PathStyle,
}

/// Everything needed to draw one query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapDocument {
    pub center: Coordinate,
    pub zoom: u8,
    pub width: u32,
    pub height: u32,
    pub markers: Vec<Marker>,
    pub paths: Vec<AntPath>,
}

impl MapDocument {
    /// Lay out markers and paths for a set of chains.
    pub fn render(chains: &[Chain]) -> Self {
        let mut markers = Vec::new();
        let mut paths = Vec::new();

        for chain in chains {
            for (position, point) in chain.tiers().into_iter().enumerate() {
                if let Some(point) = point {
                    markers.push(Marker::for_tier(point, position));
                }
            }

            let locations = chain.reversed_points();
            if locations.len() > 1 {
                paths.push(AntPath {
                    locations,
                    style: PathStyle::default(),
                });
            }
        }

        Self {
            center: centroid(chains),
            zoom: ZOOM_START,
            width: MAP_WIDTH,
            height: MAP_HEIGHT,
            markers,
            paths,
        }
    }
}

/// Unweighted mean of every present point across all chains.
///
/// Returns `(0, 0)` when there are no points.
pub fn centroid(chains: &[Chain]) -> Coordinate {
    let (sum_lat, sum_lon, count) = chains
        .iter()
        .flat_map(|chain| chain.tiers().into_iter().flatten())
        .fold((0.0, 0.0, 0usize), |(lat, lon, n), p| {
            (lat + p.lat, lon + p.lon, n + 1)
        });

    if count == 0 {
        return Coordinate::new(0.0, 0.0);
    }
    Coordinate::new(sum_lat / count as f64, sum_lon / count as f64)
}
