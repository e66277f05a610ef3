use geo::Point;
use itertools::Itertools;
use log::debug;
use petgraph::graph::NodeIndex;

use super::dijkstra::dijkstra_path;
use super::itinerary::{Itinerary, generate_itinerary};
use crate::loading::RoutingParams;
use crate::model::{CityGraph, StreetGraph};
use crate::{Error, Seconds};

/// Fastest path between two points of the city graph
#[derive(Debug, Clone)]
pub struct Path {
    pub source: NodeIndex,
    pub destination: NodeIndex,
    /// Nodes between source and destination, endpoints excluded
    pub intermediate: Vec<NodeIndex>,
    /// Total travel time in seconds
    pub travel_time: Seconds,
    /// Walk/ride segments; empty when the path could not be segmented
    pub itinerary: Itinerary,
}

impl Path {
    fn from_nodes(city: &CityGraph, mut nodes: Vec<NodeIndex>) -> Result<Self, Error> {
        let travel_time = path_time(city, &nodes).ok_or(Error::InvalidNodeIndex)?;
        let itinerary = generate_itinerary(city, &nodes);

        let source = *nodes.first().ok_or(Error::NoPathFound)?;
        let destination = *nodes.last().ok_or(Error::NoPathFound)?;
        let intermediate = if nodes.len() > 2 {
            nodes.pop();
            nodes.remove(0);
            nodes
        } else {
            Vec::new()
        };

        Ok(Self {
            source,
            destination,
            intermediate,
            travel_time,
            itinerary,
        })
    }

    /// Full node sequence, endpoints included
    pub fn nodes(&self) -> Vec<NodeIndex> {
        if self.source == self.destination && self.intermediate.is_empty() {
            return vec![self.source];
        }
        let mut nodes = Vec::with_capacity(self.intermediate.len() + 2);
        nodes.push(self.source);
        nodes.extend_from_slice(&self.intermediate);
        nodes.push(self.destination);
        nodes
    }

    /// Travel time rounded to whole minutes
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn minutes(&self) -> u32 {
        (self.travel_time / 60.0).round() as u32
    }
}

/// Find the fastest path between two (lon, lat) points
///
/// Both points are snapped to the street network first, since queries always
/// start and end on foot.
///
/// # Errors
///
/// [`Error::OutOfServiceArea`] when a point is too far from any street,
/// [`Error::NoPathFound`] when the snapped destination cannot be reached.
pub fn find_path(
    streets: &StreetGraph,
    city: &CityGraph,
    from: &Point<f64>,
    to: &Point<f64>,
    params: &RoutingParams,
) -> Result<Path, Error> {
    let source = snap(streets, city, from, params)?;
    let destination = snap(streets, city, to, params)?;

    let (_, nodes) =
        dijkstra_path(city.graph(), source, destination, |edge| edge.time).ok_or_else(|| {
            debug!("Destination {destination:?} unreachable from {source:?}");
            Error::NoPathFound
        })?;

    Path::from_nodes(city, nodes)
}

/// Nearest city intersection to `point`, within the service area tolerance
fn snap(
    streets: &StreetGraph,
    city: &CityGraph,
    point: &Point<f64>,
    params: &RoutingParams,
) -> Result<NodeIndex, Error> {
    let out_of_area = |distance| Error::OutOfServiceArea {
        lon: point.x(),
        lat: point.y(),
        distance,
    };
    let (street_node, distance) = streets
        .nearest_node(point)
        .ok_or_else(|| out_of_area(f64::INFINITY))?;
    if distance > params.max_snap_distance {
        return Err(out_of_area(distance));
    }
    city.intersection_for(street_node)
        .ok_or(Error::InvalidNodeIndex)
}

/// Sum of edge times along `nodes`, left to right. `None` if two consecutive nodes are not adjacent.
pub fn path_time(city: &CityGraph, nodes: &[NodeIndex]) -> Option<Seconds> {
    nodes
        .iter()
        .tuple_windows()
        .try_fold(0.0, |total, (&a, &b)| {
            city.edge_between(a, b).map(|edge| total + edge.time)
        })
}
