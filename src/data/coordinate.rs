//! Coordinate Parser Module
//! Turns raw "lon,lat" text fields into validated map coordinates.

use serde::Serialize;

/// Separator between the two numbers of a stored coordinate field.
const SEPARATOR: char = ',';

/// A validated map point in (latitude, longitude) order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Point as `[x, y]` for plotting (longitude on the x axis).
    pub fn plot_xy(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

/// Parse a raw coordinate field.
///
/// Fields are stored as `"<longitude>,<latitude>"`; the result is returned
/// with latitude first. Anything that is not exactly two numbers separated
/// by a comma yields `None`, as do NaN and infinite values.
pub fn parse_coordinates(raw: Option<&str>) -> Option<Coordinate> {
    let raw = raw?;
    if !raw.trim().contains(SEPARATOR) {
        return None;
    }

    let mut tokens = raw.split(SEPARATOR);
    let lon = parse_number(tokens.next()?)?;
    let lat = parse_number(tokens.next()?)?;
    if tokens.next().is_some() {
        return None;
    }

    Some(Coordinate::new(lat, lon))
}

fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
