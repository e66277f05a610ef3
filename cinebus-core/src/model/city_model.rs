use geo::Point;

use super::{CityGraph, StreetGraph};
use crate::loading::RoutingParams;
use crate::routing::{Path, find_path};
use crate::screenings::{Screening, find_first_reachable_screening};
use crate::{Error, Time};

/// Routable model of a city: the street network used for snapping, the fused
/// graph used for searching and the parameters both were built with.
#[derive(Debug, Clone)]
pub struct CityModel {
    pub street_graph: StreetGraph,
    pub city_graph: CityGraph,
    pub params: RoutingParams,
}

impl CityModel {
    pub fn new(street_graph: StreetGraph, city_graph: CityGraph, params: RoutingParams) -> Self {
        Self {
            street_graph,
            city_graph,
            params,
        }
    }

    /// Fastest path between two (lon, lat) points
    pub fn find_path(&self, from: &Point<f64>, to: &Point<f64>) -> Result<Path, Error> {
        find_path(&self.street_graph, &self.city_graph, from, to, &self.params)
    }

    /// First screening in `screenings` that can be reached from `origin` leaving at `now`
    pub fn first_reachable_screening<'a>(
        &self,
        screenings: &'a [Screening],
        origin: &Point<f64>,
        now: Time,
    ) -> Option<(Path, &'a Screening)> {
        find_first_reachable_screening(
            &self.street_graph,
            &self.city_graph,
            screenings,
            origin,
            now,
            &self.params,
        )
    }

    pub fn intersection_count(&self) -> usize {
        self.city_graph.intersection_count()
    }

    pub fn stop_count(&self) -> usize {
        self.city_graph.stop_count()
    }

    pub fn excluded_stop_count(&self) -> usize {
        self.city_graph.excluded_stops().len()
    }

    pub fn summary(&self) -> String {
        format!(
            "CityModel with {} intersections, {} stops ({} excluded) and {} edges",
            self.intersection_count(),
            self.stop_count(),
            self.excluded_stop_count(),
            self.city_graph.edge_count()
        )
    }
}
