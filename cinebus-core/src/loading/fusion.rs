use log::{debug, info, trace, warn};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rayon::prelude::*;

use super::config::RoutingParams;
use crate::model::streets::network::ground_distance;
use crate::model::{CityEdge, CityGraph, StopNode, StreetGraph, TransitGraph};
use crate::{Error, FusionError, Meters};

/// Street node a stop was snapped to, with the distance between them
type SnappedStop = Result<(NodeIndex, Meters), FusionError>;

/// Merge the street network and the bus network into one time-weighted graph
///
/// Stops that cannot be attached to the streets are left out and recorded in
/// [`CityGraph::excluded_stops`]; only an empty street network is an error.
///
/// # Errors
///
/// Returns an error if the street network is empty or `params` are invalid
pub fn build_city_graph(
    streets: &StreetGraph,
    transit: &TransitGraph,
    params: &RoutingParams,
) -> Result<CityGraph, Error> {
    if streets.is_empty() {
        return Err(Error::EmptyStreetNetwork);
    }
    params.validate()?;

    let mut city = CityGraph::default();
    copy_street_network(&mut city, streets, params);
    info!(
        "Copied {} intersections and {} street segments",
        city.intersection_count(),
        city.edge_count()
    );

    // Snap all stops to street network nodes (Err = excluded from the graph)
    let snapped = snap_stops_to_network(streets, transit, params);
    let stop_nodes = add_stops(&mut city, transit, &snapped, params);
    info!(
        "Connected {} of {} stops to the street network",
        city.stop_count(),
        transit.stop_count()
    );

    let hop_distances = calculate_hop_distances(streets, transit, &snapped);
    add_transit_hops(&mut city, transit, &stop_nodes, &hop_distances, params);

    Ok(city)
}

fn copy_street_network(city: &mut CityGraph, streets: &StreetGraph, params: &RoutingParams) {
    for index in streets.graph.node_indices() {
        let node = &streets.graph[index];
        city.add_intersection(node.id, node.geometry);
    }

    for edge in streets.graph.edge_references() {
        let length = edge.weight().length;
        if !length.is_finite() || length < 0.0 {
            warn!(
                "Skipping street segment {} -> {} with invalid length {length}",
                streets.graph[edge.source()].id,
                streets.graph[edge.target()].id
            );
            continue;
        }
        if let (Some(a), Some(b)) = (
            city.intersection_for(edge.source()),
            city.intersection_for(edge.target()),
        ) {
            city.add_or_merge_edge(a, b, CityEdge::street(length, params.walking_time(length)));
        }
    }
}

/// Snap stops to their nearest street nodes, indexed like the transit graph's nodes
fn snap_stops_to_network(
    streets: &StreetGraph,
    transit: &TransitGraph,
    params: &RoutingParams,
) -> Vec<SnappedStop> {
    transit
        .stops()
        .map(|(_, stop)| {
            if stop.lines.is_empty() {
                return Err(FusionError::NoLines {
                    code: stop.code.clone(),
                });
            }
            let (node, distance) =
                streets
                    .nearest_node(&stop.geometry)
                    .ok_or_else(|| FusionError::NoStreetNode {
                        code: stop.code.clone(),
                    })?;
            if distance > params.max_stop_snap_distance {
                return Err(FusionError::TooFarFromStreets {
                    code: stop.code.clone(),
                    distance,
                    max_distance: params.max_stop_snap_distance,
                });
            }
            Ok((node, distance))
        })
        .collect()
}

/// Add snapped stops and their connector edges. Returns the city node of every transit stop.
fn add_stops(
    city: &mut CityGraph,
    transit: &TransitGraph,
    snapped: &[SnappedStop],
    params: &RoutingParams,
) -> Vec<Option<NodeIndex>> {
    transit
        .stops()
        .zip(snapped)
        .map(|((_, stop), snap)| match snap {
            Ok((street_node, distance)) => {
                let intersection = city.intersection_for(*street_node)?;
                let node = city.add_stop(StopNode {
                    code: stop.code.clone(),
                    name: stop.name.clone(),
                    geometry: stop.geometry,
                    lines: stop.lines.clone(),
                });
                let time = params.boarding_overhead + params.walking_time(*distance);
                city.add_or_merge_edge(node, intersection, CityEdge::connector(*distance, time));
                Some(node)
            }
            Err(reason) => {
                warn!("Excluding stop from the city graph: {reason}");
                city.exclude_stop(reason.clone());
                None
            }
        })
        .collect()
}

/// Road distance of every hop, in hop order. `None` for hops that will not be added.
fn calculate_hop_distances(
    streets: &StreetGraph,
    transit: &TransitGraph,
    snapped: &[SnappedStop],
) -> Vec<Option<Meters>> {
    let hops: Vec<(NodeIndex, NodeIndex)> = transit.hops().map(|(a, b, _)| (a, b)).collect();

    hops.into_par_iter()
        .map(|(a, b)| {
            if a == b {
                return None;
            }
            let (Ok((from, _)), Ok((to, _))) = (&snapped[a.index()], &snapped[b.index()]) else {
                return None;
            };
            let distance = streets.shortest_distance(*from, *to).unwrap_or_else(|| {
                let (stop_a, stop_b) = (&transit.graph[a], &transit.graph[b]);
                debug!(
                    "No street route between stops {} and {}, using straight-line distance",
                    stop_a.code, stop_b.code
                );
                ground_distance(&stop_a.geometry, &stop_b.geometry)
            });
            Some(distance)
        })
        .collect()
}

fn add_transit_hops(
    city: &mut CityGraph,
    transit: &TransitGraph,
    stop_nodes: &[Option<NodeIndex>],
    hop_distances: &[Option<Meters>],
    params: &RoutingParams,
) {
    let mut added = 0usize;
    for ((a, b, hop), distance) in transit.hops().zip(hop_distances) {
        if a == b {
            trace!("Skipping self-referential hop at stop {}", transit.graph[a].code);
            continue;
        }
        let (Some(from), Some(to), Some(distance)) =
            (stop_nodes[a.index()], stop_nodes[b.index()], *distance)
        else {
            continue;
        };
        if hop.lines.is_empty() {
            warn!(
                "Skipping hop {} - {} without lines",
                transit.graph[a].code, transit.graph[b].code
            );
            continue;
        }
        city.add_or_merge_edge(
            from,
            to,
            CityEdge::transit(hop.lines.clone(), distance, params.riding_time(distance)),
        );
        added += 1;
    }
    info!("Added {added} of {} bus hops", transit.hop_count());
}
