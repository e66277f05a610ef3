use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::HashMap;
use petgraph::EdgeType;
use petgraph::graph::{Graph, NodeIndex};
use petgraph::visit::EdgeRef;

use super::state::State;

/// Dijkstra's algorithm with predecessor tracking for a single target.
///
/// Returns the total cost and the node sequence from `start` to `target`
/// (both included), or `None` if the target cannot be reached.
pub fn dijkstra_path<N, E, Ty, F>(
    graph: &Graph<N, E, Ty>,
    start: NodeIndex,
    target: NodeIndex,
    edge_cost: F,
) -> Option<(f64, Vec<NodeIndex>)>
where
    Ty: EdgeType,
    F: Fn(&E) -> f64,
{
    graph.node_weight(start)?;
    graph.node_weight(target)?;

    // Estimate capacity based on graph size (adjust as needed)
    let estimated_nodes = graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut settled = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    heap.push(State {
        cost: 0.0,
        node: start,
    });
    distances.insert(start, 0.0);

    let mut reached = false;
    while let Some(State { cost, node }) = heap.pop() {
        if settled.put(node.index()) {
            continue;
        }

        if node == target {
            reached = true;
            break;
        }

        for edge in graph.edges(node) {
            let next = if edge.source() == node {
                edge.target()
            } else {
                edge.source()
            };
            if settled.contains(next.index()) {
                continue;
            }
            let next_cost = cost + edge_cost(edge.weight());

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    if !reached {
        return None;
    }

    // Follow predecessors backward from target to start
    let mut node_path = vec![target];
    let mut current = target;
    while current != start {
        current = *predecessors.get(&current)?;
        node_path.push(current);
    }
    node_path.reverse();

    Some((distances[&target], node_path))
}
