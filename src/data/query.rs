//! Query Module
//! Selects the coordinate chains of one tier1 entity and drives the
//! submit → filter → render pipeline.

use crate::data::{parse_coordinates, Coordinate, GeoTable};
use crate::map::MapDocument;

/// Coordinates of one matching record, tier1 first.
///
/// Tier1 and tier2 are always present; tier3 may be missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Chain {
    pub tier1: Coordinate,
    pub tier2: Coordinate,
    pub tier3: Option<Coordinate>,
}

impl Chain {
    /// Tier positions in source order, with gaps kept as `None`.
    pub fn tiers(&self) -> [Option<Coordinate>; 3] {
        [Some(self.tier1), Some(self.tier2), self.tier3]
    }

    /// Present points in tracing order: tier3, tier2, tier1.
    pub fn reversed_points(&self) -> Vec<Coordinate> {
        self.tiers().into_iter().rev().flatten().collect()
    }
}

/// Collect the chains of every record whose `tier1_name` equals `key`.
///
/// Rows keep their table order. Rows whose tier1 or tier2 field does not
/// parse are skipped.
pub fn filter_by_key(table: &GeoTable, key: &str) -> Vec<Chain> {
    let mut skipped = 0usize;
    let chains: Vec<Chain> = table
        .records()
        .iter()
        .filter_map(|record| {
            let [tier1, tier2, tier3] = record.tier_fields().map(parse_coordinates);
            let (Some(tier1), Some(tier2)) = (tier1, tier2) else {
                skipped += 1;
                return None;
            };
            if record.tier1_name.as_deref() != Some(key) {
                return None;
            }
            Some(Chain { tier1, tier2, tier3 })
        })
        .collect();

    if skipped > 0 {
        log::debug!("{} rows without usable tier1/tier2 coordinates", skipped);
    }
    chains
}

/// Result of one submission of the filter key.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// No key entered; nothing to show.
    Idle,
    /// A key matched at least one chain.
    Rendered { key: String, map: MapDocument },
    /// A key matched nothing.
    Warned { key: String, message: String },
}

impl QueryOutcome {
    /// Run the full pipeline for a submitted key.
    ///
    /// Every call recomputes from scratch; nothing is carried over from
    /// the previous outcome.
    pub fn submit(table: &GeoTable, key: &str) -> Self {
        if key.is_empty() {
            return QueryOutcome::Idle;
        }

        let chains = filter_by_key(table, key);
        log::info!("Query '{}' matched {} chains", key, chains.len());

        if chains.is_empty() {
            QueryOutcome::Warned {
                key: key.to_string(),
                message: no_data_message(key),
            }
        } else {
            QueryOutcome::Rendered {
                key: key.to_string(),
                map: MapDocument::render(&chains),
            }
        }
    }

    pub fn map(&self) -> Option<&MapDocument> {
        match self {
            QueryOutcome::Rendered { map, .. } => Some(map),
            _ => None,
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            QueryOutcome::Idle => None,
            QueryOutcome::Rendered { key, .. } | QueryOutcome::Warned { key, .. } => Some(key),
        }
    }
}

/// Warning shown when a key matches no rows.
pub fn no_data_message(key: &str) -> String {
    format!("No data found for {}.", key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::Record;

    fn record(name: &str, t1: &str, t2: &str, t3: &str) -> Record {
        let field = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Record {
            tier1_name: Some(name.to_string()),
            tier1_coords: field(t1),
            tier2_coords: field(t2),
            tier3_coords: field(t3),
        }
    }

    fn sample_table() -> GeoTable {
        GeoTable::from_records(vec![
            record("Acme", "-70,40", "-71,41", ""),
            record("Globex", "10,20", "11,21", "12,22"),
            record("Acme", "-60,30", "bad", "-62,32"),
            record("Acme", "-50,20", "-51,21", "-52,22"),
            record("acme", "-40,10", "-41,11", ""),
            record("Acme", "", "-31,1", "-32,2"),
        ])
    }

    #[test]
    fn test_filter_matches_exact_key_in_row_order() {
        let chains = filter_by_key(&sample_table(), "Acme");

        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].tier1, Coordinate::new(40.0, -70.0));
        assert_eq!(chains[0].tier3, None);
        assert_eq!(chains[1].tier1, Coordinate::new(20.0, -50.0));
        assert_eq!(chains[1].tier3, Some(Coordinate::new(22.0, -52.0)));
    }

    #[test]
    fn test_filter_is_case_sensitive() {
        let chains = filter_by_key(&sample_table(), "acme");
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].tier2, Coordinate::new(11.0, -41.0));
    }

    #[test]
    fn test_filter_unknown_key_is_empty() {
        assert!(filter_by_key(&sample_table(), "Initech").is_empty());
    }

    #[test]
    fn test_rows_without_name_never_match() {
        let mut nameless = record("", "-70,40", "-71,41", "");
        nameless.tier1_name = None;
        let table = GeoTable::from_records(vec![nameless]);

        assert!(filter_by_key(&table, "").is_empty());
    }

    #[test]
    fn test_reversed_points() {
        let full = Chain {
            tier1: Coordinate::new(1.0, 1.0),
            tier2: Coordinate::new(2.0, 2.0),
            tier3: Some(Coordinate::new(3.0, 3.0)),
        };
        assert_eq!(
            full.reversed_points(),
            vec![
                Coordinate::new(3.0, 3.0),
                Coordinate::new(2.0, 2.0),
                Coordinate::new(1.0, 1.0)
            ]
        );

        let short = Chain { tier3: None, ..full };
        assert_eq!(
            short.reversed_points(),
            vec![Coordinate::new(2.0, 2.0), Coordinate::new(1.0, 1.0)]
        );
    }

    #[test]
    fn test_empty_key_is_idle() {
        assert_eq!(QueryOutcome::submit(&sample_table(), ""), QueryOutcome::Idle);
    }

    #[test]
    fn test_unmatched_key_warns() {
        let outcome = QueryOutcome::submit(&sample_table(), "Initech");
        assert_eq!(
            outcome,
            QueryOutcome::Warned {
                key: "Initech".to_string(),
                message: "No data found for Initech.".to_string(),
            }
        );
        assert!(outcome.map().is_none());
        assert_eq!(outcome.key(), Some("Initech"));
    }

    #[test]
    fn test_single_row_example() {
        let table = GeoTable::from_records(vec![record("Acme", "-70,40", "-71,41", "")]);
        let chains = filter_by_key(&table, "Acme");

        assert_eq!(
            chains,
            vec![Chain {
                tier1: Coordinate::new(40.0, -70.0),
                tier2: Coordinate::new(41.0, -71.0),
                tier3: None,
            }]
        );
    }

    #[test]
    fn test_single_row_submit_end_to_end() {
        use crate::map::MarkerColor;

        let table = GeoTable::from_records(vec![record("Acme", "-70,40", "-71,41", "")]);
        let outcome = QueryOutcome::submit(&table, "Acme");
        let map = outcome.map().expect("map for Acme");

        assert_eq!(map.center, Coordinate::new(40.5, -70.5));
        assert_eq!(map.zoom, 5);

        assert_eq!(map.markers.len(), 2);
        assert_eq!(map.markers[0].location, Coordinate::new(40.0, -70.0));
        assert_eq!(map.markers[0].color, MarkerColor::Red);
        assert_eq!(map.markers[0].tooltip, "Tier1 Point");
        assert_eq!(map.markers[1].location, Coordinate::new(41.0, -71.0));
        assert_eq!(map.markers[1].color, MarkerColor::Green);
        assert_eq!(map.markers[1].tooltip, "Tier2 Point");

        assert_eq!(map.paths.len(), 1);
        assert_eq!(
            map.paths[0].locations,
            vec![Coordinate::new(41.0, -71.0), Coordinate::new(40.0, -70.0)]
        );

        assert_eq!(
            QueryOutcome::submit(&table, "Globex"),
            QueryOutcome::Warned {
                key: "Globex".to_string(),
                message: "No data found for Globex.".to_string(),
            }
        );
    }

    #[test]
    fn test_matched_key_renders() {
        let outcome = QueryOutcome::submit(&sample_table(), "Globex");
        let map = outcome.map().expect("map for matched key");
        assert_eq!(map.markers.len(), 3);
        assert_eq!(map.paths.len(), 1);
    }
}
