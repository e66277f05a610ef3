use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::components::{CityEdge, CityNode, StopNode};
use crate::FusionError;

/// Unified street + bus graph. Built once by fusion and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct CityGraph {
    pub(crate) graph: UnGraph<CityNode, CityEdge>,
    /// Street node index -> city node
    street_nodes: Vec<NodeIndex>,
    /// Stop code -> city node
    stop_nodes: HashMap<String, NodeIndex>,
    excluded_stops: Vec<FusionError>,
}

impl CityGraph {
    pub fn graph(&self) -> &UnGraph<CityNode, CityEdge> {
        &self.graph
    }

    pub fn node(&self, index: NodeIndex) -> Option<&CityNode> {
        self.graph.node_weight(index)
    }

    pub fn stop(&self, index: NodeIndex) -> Option<&StopNode> {
        self.node(index).and_then(CityNode::as_stop)
    }

    /// Edge between two nodes in either direction
    pub fn edge_between(&self, a: NodeIndex, b: NodeIndex) -> Option<&CityEdge> {
        self.graph
            .find_edge(a, b)
            .and_then(|edge| self.graph.edge_weight(edge))
    }

    /// City node corresponding to a street network node
    pub fn intersection_for(&self, street_node: NodeIndex) -> Option<NodeIndex> {
        self.street_nodes.get(street_node.index()).copied()
    }

    pub fn stop_by_code(&self, code: &str) -> Option<NodeIndex> {
        self.stop_nodes.get(code).copied()
    }

    /// Stops left out during fusion, with the reason
    pub fn excluded_stops(&self) -> &[FusionError] {
        &self.excluded_stops
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn stop_count(&self) -> usize {
        self.stop_nodes.len()
    }

    pub fn intersection_count(&self) -> usize {
        self.street_nodes.len()
    }

    /// Number of connector edges touching `stop`
    pub fn connector_count(&self, stop: NodeIndex) -> usize {
        self.graph
            .edges(stop)
            .filter(|edge| edge.weight().is_connector())
            .count()
    }

    pub(crate) fn add_intersection(&mut self, osm_id: i64, geometry: geo::Point<f64>) -> NodeIndex {
        let index = self
            .graph
            .add_node(CityNode::Intersection { osm_id, geometry });
        self.street_nodes.push(index);
        index
    }

    pub(crate) fn add_stop(&mut self, stop: StopNode) -> NodeIndex {
        let code = stop.code.clone();
        let index = self.graph.add_node(CityNode::Stop(stop));
        self.stop_nodes.insert(code, index);
        index
    }

    /// Adds an edge, merging with an existing one between the same pair. Self-loops are dropped.
    pub(crate) fn add_or_merge_edge(&mut self, a: NodeIndex, b: NodeIndex, edge: CityEdge) {
        if a == b {
            return;
        }
        match self.graph.find_edge(a, b) {
            Some(existing) => self.graph[existing].merge(edge),
            None => {
                self.graph.add_edge(a, b, edge);
            }
        }
    }

    pub(crate) fn exclude_stop(&mut self, reason: FusionError) {
        self.excluded_stops.push(reason);
    }
}
