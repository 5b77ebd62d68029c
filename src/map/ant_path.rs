//! Ant Path Animation
//! Positions of the moving dashes drawn along a tracing path in the
//! in-window viewer. Geometry is in plot space (longitude, latitude).

use crate::data::Coordinate;

/// Number of dash periods laid along each path.
pub const ANTS_PER_PATH: usize = 8;

/// Fraction of a dash period elapsed after `elapsed_secs`, in `[0, 1)`.
///
/// One period passes every `delay_ms` milliseconds.
pub fn animation_phase(elapsed_secs: f64, delay_ms: u32) -> f64 {
    if delay_ms == 0 {
        return 0.0;
    }
    let periods = elapsed_secs * 1000.0 / delay_ms as f64;
    periods.rem_euclid(1.0)
}

fn distance(a: Coordinate, b: Coordinate) -> f64 {
    (a.lat - b.lat).hypot(a.lon - b.lon)
}

/// Total length of a polyline.
pub fn path_length(locations: &[Coordinate]) -> f64 {
    locations.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Point at `offset` along the polyline, measured from its first point.
///
/// Offsets past either end clamp to the end points.
pub fn point_along(locations: &[Coordinate], offset: f64) -> Option<Coordinate> {
    let first = *locations.first()?;
    if offset <= 0.0 {
        return Some(first);
    }

    let mut remaining = offset;
    for w in locations.windows(2) {
        let seg = distance(w[0], w[1]);
        if remaining <= seg && seg > 0.0 {
            let t = remaining / seg;
            return Some(Coordinate::new(
                w[0].lat + (w[1].lat - w[0].lat) * t,
                w[0].lon + (w[1].lon - w[0].lon) * t,
            ));
        }
        remaining -= seg;
    }

    locations.last().copied()
}

/// Dash heads for the given phase, ordered from the path start.
///
/// Heads advance toward the end of the path as the phase grows, so the
/// animation reads in the same direction as the path.
pub fn ant_positions(locations: &[Coordinate], phase: f64) -> Vec<Coordinate> {
    let length = path_length(locations);
    if length <= 0.0 {
        return Vec::new();
    }

    let spacing = length / ANTS_PER_PATH as f64;
    (0..ANTS_PER_PATH)
        .filter_map(|i| point_along(locations, (i as f64 + phase) * spacing))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight() -> Vec<Coordinate> {
        vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 8.0)]
    }

    #[test]
    fn test_phase_wraps_every_delay() {
        assert_eq!(animation_phase(0.0, 400), 0.0);
        assert!((animation_phase(0.2, 400) - 0.5).abs() < 1e-9);
        assert!((animation_phase(0.5, 400) - 0.25).abs() < 1e-9);
        assert_eq!(animation_phase(3.0, 0), 0.0);
    }

    #[test]
    fn test_path_length_sums_segments() {
        let path = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(3.0, 4.0),
            Coordinate::new(3.0, 10.0),
        ];
        assert!((path_length(&path) - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_point_along_interpolates_and_clamps() {
        let path = straight();
        assert_eq!(point_along(&path, 2.0), Some(Coordinate::new(0.0, 2.0)));
        assert_eq!(point_along(&path, -1.0), Some(Coordinate::new(0.0, 0.0)));
        assert_eq!(point_along(&path, 100.0), Some(Coordinate::new(0.0, 8.0)));
        assert_eq!(point_along(&[], 1.0), None);
    }

    #[test]
    fn test_ants_move_toward_path_end() {
        let path = straight();
        let start = ant_positions(&path, 0.0);
        let later = ant_positions(&path, 0.5);

        assert_eq!(start.len(), ANTS_PER_PATH);
        assert_eq!(start[0], Coordinate::new(0.0, 0.0));
        assert_eq!(later[0], Coordinate::new(0.0, 0.5));
        assert!(later.iter().zip(&start).all(|(l, s)| l.lon > s.lon));
    }

    #[test]
    fn test_degenerate_path_has_no_ants() {
        let point = Coordinate::new(1.0, 1.0);
        assert!(ant_positions(&[point, point], 0.3).is_empty());
        assert!(ant_positions(&[point], 0.3).is_empty());
    }
}
