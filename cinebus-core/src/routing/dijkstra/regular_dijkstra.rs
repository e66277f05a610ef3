use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::EdgeType;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::state::State;

/// Dijkstra's algorithm over any petgraph `Graph`, weighted by `edge_cost`.
///
/// Returns the best known cost of every reached node. When `target` is given the
/// search stops as soon as it is settled, so only the target's cost is final.
pub fn dijkstra_path_weights<N, E, Ty, F>(
    graph: &Graph<N, E, Ty>,
    start: NodeIndex,
    target: Option<NodeIndex>,
    edge_cost: F,
) -> HashMap<NodeIndex, f64>
where
    Ty: EdgeType,
    F: Fn(&E) -> f64,
{
    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut settled = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::new();

    if graph.node_weight(start).is_none() {
        return distances;
    }

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // Stale heap entry
        if settled.put(node.index()) {
            continue;
        }

        if target == Some(node) {
            break;
        }

        for edge in graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            let next_cost = cost + edge_cost(edge.weight());

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    distances
}
