use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use geo::Point;
use log::{info, warn};
use petgraph::graph::NodeIndex;

use super::raw_types::{BusFeed, FeedStop};
use crate::Error;
use crate::model::{LineSet, TransitGraph, TransitStop};

/// Load the bus network from a JSON export
///
/// # Errors
///
/// Returns an error if the file cannot be opened or is not valid JSON
pub fn transit_graph_from_json(
    path: &Path,
    municipality: Option<&str>,
) -> Result<TransitGraph, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let feed: BusFeed = serde_json::from_reader(BufReader::new(file))?;
    let transit = transit_graph_from_feed(feed, municipality);
    info!(
        "Loaded bus network with {} stops and {} hops",
        transit.stop_count(),
        transit.hop_count()
    );
    Ok(transit)
}

/// Build the bus network from consecutive stops of every line
///
/// With a `municipality` filter, stops elsewhere are dropped and break the
/// line's sequence, so no hop spans the gap they leave.
pub fn transit_graph_from_feed(feed: BusFeed, municipality: Option<&str>) -> TransitGraph {
    let mut transit = TransitGraph::new();

    for line in feed.lines {
        if line.code.is_empty() {
            warn!("Skipping bus line without code ({})", line.name);
            continue;
        }
        // Previous stop of this line and the lines it advertises
        let mut previous: Option<(NodeIndex, LineSet)> = None;

        for stop in line.stops {
            if !in_municipality(&stop, municipality) {
                previous = None;
                continue;
            }
            if !stop.lon.is_finite() || !stop.lat.is_finite() || stop.code.is_empty() {
                warn!("Skipping invalid stop '{}' on line {}", stop.code, line.code);
                previous = None;
                continue;
            }

            let advertised = parse_line_list(&stop.lines);
            let mut stop_lines = advertised.clone();
            stop_lines.insert(line.code.clone());

            let node = transit.add_stop(TransitStop {
                code: stop.code,
                name: stop.name,
                geometry: Point::new(stop.lon, stop.lat),
                lines: stop_lines,
            });

            if let Some((previous_node, previous_advertised)) = previous.take() {
                let mut hop_lines: LineSet = previous_advertised
                    .intersection(&advertised)
                    .cloned()
                    .collect();
                hop_lines.insert(line.code.clone());
                transit.add_hop(previous_node, node, hop_lines);
            }
            previous = Some((node, advertised));
        }
    }

    transit
}

fn in_municipality(stop: &FeedStop, municipality: Option<&str>) -> bool {
    municipality.is_none_or(|name| stop.municipality.trim().eq_ignore_ascii_case(name))
}

/// Parse a `"H6 - V3 - 59"` style list of line codes
pub fn parse_line_list(lines: &str) -> LineSet {
    lines
        .split(" - ")
        .map(str::trim)
        .filter(|code| !code.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::lines;

    const FEED: &str = r#"{
        "lines": [
            {
                "code": "H6",
                "name": "Zona Universitària - Fabra i Puig",
                "stops": [
                    {"code": "001", "name": "Pl. Catalunya", "municipality": "Barcelona",
                     "lon": 2.170, "lat": 41.387, "lines": "H6 - V15"},
                    {"code": "002", "name": "Pg. de Gràcia", "municipality": "Barcelona",
                     "lon": 2.165, "lat": 41.392, "lines": "H6 - V15 - 22"},
                    {"code": "900", "name": "Av. Diagonal", "municipality": "L'Hospitalet",
                     "lon": 2.120, "lat": 41.360, "lines": "H6"},
                    {"code": "003", "name": "Diagonal", "municipality": "Barcelona",
                     "lon": 2.160, "lat": 41.395, "lines": "H6 - 22"}
                ]
            },
            {
                "code": "V15",
                "stops": [
                    {"code": "002", "name": "Pg. de Gràcia", "municipality": "Barcelona",
                     "lon": 2.165, "lat": 41.392, "lines": "H6 - V15 - 22"},
                    {"code": "001", "name": "Pl. Catalunya", "municipality": "Barcelona",
                     "lon": 2.170, "lat": 41.387, "lines": "H6 - V15"}
                ]
            }
        ]
    }"#;

    fn feed() -> BusFeed {
        serde_json::from_str(FEED).unwrap()
    }

    #[test]
    fn parses_line_lists() {
        assert_eq!(parse_line_list("H6 - V15 - 22"), lines(&["22", "H6", "V15"]));
        assert_eq!(parse_line_list(""), LineSet::new());
    }

    #[test]
    fn consecutive_stops_become_hops_with_shared_lines() {
        let transit = transit_graph_from_feed(feed(), None);

        assert_eq!(transit.stop_count(), 4);
        let a = transit.stop_by_code("001").unwrap();
        let b = transit.stop_by_code("002").unwrap();
        let edge = transit.graph.find_edge(a, b).unwrap();
        // Both lines read the same pair, so the hop is merged
        assert_eq!(transit.hop_count(), 3);
        assert_eq!(transit.graph[edge].lines, lines(&["H6", "V15"]));
    }

    #[test]
    fn municipality_filter_breaks_the_sequence() {
        let transit = transit_graph_from_feed(feed(), Some("barcelona"));

        assert_eq!(transit.stop_count(), 3);
        assert!(transit.stop_by_code("900").is_none());
        let b = transit.stop_by_code("002").unwrap();
        let c = transit.stop_by_code("003").unwrap();
        assert!(transit.graph.find_edge(b, c).is_none());
        assert_eq!(transit.hop_count(), 1);
    }

    #[test]
    fn stop_lines_include_every_line_passing_through() {
        let transit = transit_graph_from_feed(feed(), None);
        let stop = transit.stop_by_code("900").unwrap();
        assert_eq!(transit.stop(stop).unwrap().lines, lines(&["H6"]));

        let diagonal = transit.stop_by_code("003").unwrap();
        assert_eq!(transit.stop(diagonal).unwrap().lines, lines(&["22", "H6"]));
    }
}
