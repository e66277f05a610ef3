//! Bus network graph and methods to work with it

use hashbrown::HashMap;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

use super::types::{LineSet, TransitHop, TransitStop};

/// Undirected graph of bus stops connected by consecutive-stop hops
#[derive(Debug, Clone, Default)]
pub struct TransitGraph {
    pub graph: UnGraph<TransitStop, TransitHop>,
    /// Mapping of stop codes to graph nodes
    stop_index: HashMap<String, NodeIndex>,
}

impl TransitGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a stop, or merges its lines into an already known stop with the same code.
    pub fn add_stop(&mut self, stop: TransitStop) -> NodeIndex {
        if let Some(&existing) = self.stop_index.get(&stop.code) {
            self.graph[existing].lines.extend(stop.lines);
            return existing;
        }
        let code = stop.code.clone();
        let index = self.graph.add_node(stop);
        self.stop_index.insert(code, index);
        index
    }

    /// Adds a hop between two stops. A repeated hop unions its lines into the existing one.
    pub fn add_hop(&mut self, a: NodeIndex, b: NodeIndex, lines: LineSet) {
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge].lines.extend(lines),
            None => {
                self.graph.add_edge(a, b, TransitHop { lines });
            }
        }
    }

    pub fn stop(&self, index: NodeIndex) -> Option<&TransitStop> {
        self.graph.node_weight(index)
    }

    pub fn stop_by_code(&self, code: &str) -> Option<NodeIndex> {
        self.stop_index.get(code).copied()
    }

    pub fn stop_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn hop_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Stops in insertion order
    pub fn stops(&self) -> impl Iterator<Item = (NodeIndex, &TransitStop)> {
        self.graph
            .node_indices()
            .map(move |index| (index, &self.graph[index]))
    }

    /// Hops in insertion order
    pub fn hops(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &TransitHop)> {
        self.graph
            .edge_references()
            .map(|edge| (edge.source(), edge.target(), edge.weight()))
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::test_support::lines;

    fn stop(code: &str, stop_lines: &[&str]) -> TransitStop {
        TransitStop {
            code: code.to_string(),
            name: format!("Stop {code}"),
            geometry: Point::new(2.15, 41.38),
            lines: lines(stop_lines),
        }
    }

    #[test]
    fn repeated_stop_code_merges_lines() {
        let mut transit = TransitGraph::new();
        let first = transit.add_stop(stop("001", &["H6"]));
        let second = transit.add_stop(stop("001", &["V3"]));

        assert_eq!(first, second);
        assert_eq!(transit.stop_count(), 1);
        assert_eq!(transit.stop(first).unwrap().lines, lines(&["H6", "V3"]));
        assert_eq!(transit.stop_by_code("001"), Some(first));
    }

    #[test]
    fn repeated_hop_is_merged_not_duplicated() {
        let mut transit = TransitGraph::new();
        let a = transit.add_stop(stop("001", &["H6", "V3"]));
        let b = transit.add_stop(stop("002", &["H6", "V3"]));
        transit.add_hop(a, b, lines(&["H6"]));
        transit.add_hop(b, a, lines(&["V3"]));

        assert_eq!(transit.hop_count(), 1);
        let (_, _, hop) = transit.hops().next().unwrap();
        assert_eq!(hop.lines, lines(&["H6", "V3"]));
    }
}
