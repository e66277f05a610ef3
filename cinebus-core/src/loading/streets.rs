//! Street network from CSV node and segment tables

use std::path::Path;

use hashbrown::HashMap;
use log::{info, warn};
use petgraph::graph::DiGraph;
use serde::Deserialize;

use super::parser::deserialize_csv_file;
use crate::Error;
use crate::model::{StreetEdge, StreetGraph, StreetNode};

#[derive(Debug, Clone, Deserialize)]
pub struct StreetNodeRecord {
    pub id: i64,
    pub lon: f64,
    pub lat: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreetEdgeRecord {
    pub source: i64,
    pub target: i64,
    /// Meters
    pub length: f64,
}

/// Load the street network from `nodes.csv` (`id,lon,lat`) and `edges.csv` (`source,target,length`)
///
/// # Errors
///
/// Returns an error if either file cannot be read
pub fn street_graph_from_csv(nodes_path: &Path, edges_path: &Path) -> Result<StreetGraph, Error> {
    let nodes: Vec<StreetNodeRecord> = deserialize_csv_file(nodes_path)?;
    let edges: Vec<StreetEdgeRecord> = deserialize_csv_file(edges_path)?;
    let graph = street_graph_from_records(nodes, edges);
    info!(
        "Loaded street network with {} nodes and {} segments",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Build the street network from raw records, dropping rows that break graph invariants
pub fn street_graph_from_records(
    nodes: Vec<StreetNodeRecord>,
    edges: Vec<StreetEdgeRecord>,
) -> StreetGraph {
    let mut graph = DiGraph::with_capacity(nodes.len(), edges.len());
    let mut index_by_id = HashMap::with_capacity(nodes.len());

    for record in nodes {
        if !record.lon.is_finite() || !record.lat.is_finite() {
            warn!("Skipping street node {} with invalid position", record.id);
            continue;
        }
        if index_by_id.contains_key(&record.id) {
            warn!("Skipping duplicate street node {}", record.id);
            continue;
        }
        let index = graph.add_node(StreetNode {
            id: record.id,
            geometry: geo::Point::new(record.lon, record.lat),
        });
        index_by_id.insert(record.id, index);
    }

    let mut skipped = 0usize;
    for record in edges {
        let endpoints = (
            index_by_id.get(&record.source),
            index_by_id.get(&record.target),
        );
        let valid_length = record.length.is_finite() && record.length >= 0.0;
        match endpoints {
            (Some(&source), Some(&target)) if valid_length && source != target => {
                graph.add_edge(
                    source,
                    target,
                    StreetEdge {
                        length: record.length,
                    },
                );
            }
            _ => skipped += 1,
        }
    }
    if skipped > 0 {
        warn!("Skipped {skipped} street segments with unknown endpoints, bad length or self-loops");
    }

    StreetGraph::new(graph)
}
