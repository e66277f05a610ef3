//! Small synthetic city shared by unit tests.
//!
//! One straight east-west street of intersections `100..` spaced 0.001 degrees
//! apart at latitude 41.38, and a bus line S1 - S2 - S3 running alongside it
//! just north of intersections 1, 5 and 9.

use geo::Point;
use petgraph::graph::DiGraph;

use crate::loading::{RoutingParams, build_city_graph};
use crate::model::{
    CityGraph, LineSet, StreetEdge, StreetGraph, StreetNode, TransitGraph, TransitStop,
};

pub(crate) const STREET_LAT: f64 = 41.38;
pub(crate) const STREET_LON: f64 = 2.15;

pub(crate) fn lines(ids: &[&str]) -> LineSet {
    ids.iter().map(|id| (*id).to_string()).collect()
}

/// Cheap boarding so that riding beats walking on the fixture street
pub(crate) fn test_params() -> RoutingParams {
    RoutingParams {
        boarding_overhead: 10.0,
        ..RoutingParams::default()
    }
}

pub(crate) fn street_point(position: usize) -> Point<f64> {
    Point::new(STREET_LON + 0.001 * position as f64, STREET_LAT)
}

/// `count` intersections joined by two-way segments of `segment_length` meters
pub(crate) fn street_line(count: usize, segment_length: f64) -> StreetGraph {
    let mut graph = DiGraph::new();
    let nodes: Vec<_> = (0..count)
        .map(|position| {
            graph.add_node(StreetNode {
                id: 100 + position as i64,
                geometry: street_point(position),
            })
        })
        .collect();
    for pair in nodes.windows(2) {
        graph.add_edge(pair[0], pair[1], StreetEdge { length: segment_length });
        graph.add_edge(pair[1], pair[0], StreetEdge { length: segment_length });
    }
    StreetGraph::new(graph)
}

/// Bus stops S1, S2, S3 next to intersections 1, 5 and 9
pub(crate) fn transit_line(first_hop: &[&str], second_hop: &[&str]) -> TransitGraph {
    let mut transit = TransitGraph::new();
    let first_hop = lines(first_hop);
    let second_hop = lines(second_hop);
    let stops = [
        ("S1", 1, first_hop.clone()),
        ("S2", 5, first_hop.union(&second_hop).cloned().collect()),
        ("S3", 9, second_hop.clone()),
    ];
    let nodes: Vec<_> = stops
        .into_iter()
        .map(|(code, position, stop_lines)| {
            let street = street_point(position);
            transit.add_stop(TransitStop {
                code: code.to_string(),
                name: format!("Stop {code}"),
                geometry: Point::new(street.x(), street.y() + 0.0001),
                lines: stop_lines,
            })
        })
        .collect();
    transit.add_hop(nodes[0], nodes[1], first_hop);
    transit.add_hop(nodes[1], nodes[2], second_hop);
    transit
}

pub(crate) struct Fixture {
    pub(crate) streets: StreetGraph,
    pub(crate) city: CityGraph,
    pub(crate) params: RoutingParams,
}

/// Eleven intersections 80 m apart plus the three-stop bus line
pub(crate) fn city_fixture(first_hop: &[&str], second_hop: &[&str]) -> Fixture {
    let streets = street_line(11, 80.0);
    let transit = transit_line(first_hop, second_hop);
    let params = test_params();
    let city = build_city_graph(&streets, &transit, &params).expect("fixture city builds");
    Fixture {
        streets,
        city,
        params,
    }
}
