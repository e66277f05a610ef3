use geo::{Distance, Haversine, Point};
use petgraph::graph::{DiGraph, NodeIndex};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::{StreetEdge, StreetNode};
use crate::Meters;
use crate::routing::dijkstra::dijkstra_path_weights;

/// Street node position stored in the spatial index: `[lon * lon_scale, lat]`
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Directed pedestrian street network with a spatial index over its nodes
#[derive(Debug, Clone)]
pub struct StreetGraph {
    pub graph: DiGraph<StreetNode, StreetEdge>,
    rtree: RTree<IndexedPoint>,
    /// cos of the network's mean latitude, so index distances approximate ground distances
    lon_scale: f64,
}

impl StreetGraph {
    pub fn new(graph: DiGraph<StreetNode, StreetEdge>) -> Self {
        let lon_scale = longitude_scale(&graph);
        let rtree = build_rtree(&graph, lon_scale);
        Self {
            graph,
            rtree,
            lon_scale,
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn node(&self, index: NodeIndex) -> Option<&StreetNode> {
        self.graph.node_weight(index)
    }

    /// Nearest street node to `point` and its ground distance in meters.
    ///
    /// The R-tree search runs on an equirectangular projection around the
    /// network's mean latitude, which is exact enough at city scale; the
    /// returned distance is haversine. `None` for an empty network or a
    /// non-finite `point`.
    pub fn nearest_node(&self, point: &Point<f64>) -> Option<(NodeIndex, Meters)> {
        if !point.x().is_finite() || !point.y().is_finite() {
            return None;
        }
        let nearest = self
            .rtree
            .nearest_neighbor(&[point.x() * self.lon_scale, point.y()])?;
        let node = self.graph.node_weight(nearest.data)?;
        Some((nearest.data, ground_distance(point, &node.geometry)))
    }

    /// Shortest distance by street length from `from` to `to`, following edge directions.
    pub fn shortest_distance(&self, from: NodeIndex, to: NodeIndex) -> Option<Meters> {
        if from == to {
            return Some(0.0);
        }
        dijkstra_path_weights(&self.graph, from, Some(to), |edge| edge.length)
            .get(&to)
            .copied()
    }
}

/// Great-circle distance between two (lon, lat) points in meters
pub fn ground_distance(a: &Point<f64>, b: &Point<f64>) -> Meters {
    Haversine.distance(*a, *b)
}

#[allow(clippy::cast_precision_loss)]
fn longitude_scale(graph: &DiGraph<StreetNode, StreetEdge>) -> f64 {
    if graph.node_count() == 0 {
        return 1.0;
    }
    let mean_lat =
        graph.node_weights().map(|node| node.geometry.y()).sum::<f64>() / graph.node_count() as f64;
    mean_lat.to_radians().cos().clamp(1e-6, 1.0)
}

fn build_rtree(graph: &DiGraph<StreetNode, StreetEdge>, lon_scale: f64) -> RTree<IndexedPoint> {
    let points = graph
        .node_indices()
        .map(|idx| {
            let geometry = graph[idx].geometry;
            IndexedPoint::new([geometry.x() * lon_scale, geometry.y()], idx)
        })
        .collect();
    RTree::bulk_load(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::street_line;

    #[test]
    fn nearest_node_reports_haversine_distance() {
        let streets = street_line(5, 80.0);
        let probe = Point::new(2.152, 41.3805);

        let (node, distance) = streets.nearest_node(&probe).unwrap();

        assert_eq!(streets.graph[node].id, 102);
        // 0.0005 degrees of latitude is roughly 55 m
        assert!((distance - 55.6).abs() < 1.0, "got {distance}");
    }

    #[test]
    fn nearest_node_compares_ground_distances() {
        // At 41.38 N, 0.001 degrees east is about 83 m while 0.0009 degrees north is about 100 m
        let mut graph = DiGraph::new();
        let east = graph.add_node(StreetNode {
            id: 1,
            geometry: Point::new(2.151, 41.38),
        });
        graph.add_node(StreetNode {
            id: 2,
            geometry: Point::new(2.15, 41.3809),
        });
        let streets = StreetGraph::new(graph);

        let (node, distance) = streets.nearest_node(&Point::new(2.15, 41.38)).unwrap();

        assert_eq!(node, east);
        assert!(distance < 90.0, "got {distance}");
    }

    #[test]
    fn non_finite_point_has_no_nearest_node() {
        let streets = street_line(5, 80.0);

        assert!(streets.nearest_node(&Point::new(f64::NAN, 41.38)).is_none());
        assert!(streets.nearest_node(&Point::new(2.15, f64::INFINITY)).is_none());
    }

    #[test]
    fn nearest_node_on_empty_graph_is_none() {
        let streets = StreetGraph::new(DiGraph::new());
        assert!(streets.nearest_node(&Point::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn shortest_distance_follows_edge_lengths() {
        let streets = street_line(5, 80.0);
        let first = NodeIndex::new(0);
        let last = NodeIndex::new(4);

        assert_eq!(streets.shortest_distance(first, last), Some(320.0));
        assert_eq!(streets.shortest_distance(last, first), Some(320.0));
        assert_eq!(streets.shortest_distance(first, first), Some(0.0));
    }

    #[test]
    fn shortest_distance_respects_one_way_segments() {
        let mut graph = DiGraph::new();
        let a = graph.add_node(StreetNode {
            id: 1,
            geometry: Point::new(0.0, 0.0),
        });
        let b = graph.add_node(StreetNode {
            id: 2,
            geometry: Point::new(0.001, 0.0),
        });
        graph.add_edge(a, b, StreetEdge { length: 100.0 });
        let streets = StreetGraph::new(graph);

        assert_eq!(streets.shortest_distance(a, b), Some(100.0));
        assert_eq!(streets.shortest_distance(b, a), None);
    }
}
