//! Data transfer objects for requests and responses.

use cinebus_core::loading::format_time_of_day;
use cinebus_core::model::CityGraph;
use cinebus_core::{Path, Screening, Segment};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// WGS84 position
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn to_point(self) -> Result<Point<f64>, AppError> {
        if !(-180.0..=180.0).contains(&self.lon) || !(-90.0..=90.0).contains(&self.lat) {
            return Err(AppError::BadRequest {
                message: format!("invalid coordinate ({}, {})", self.lon, self.lat),
            });
        }
        Ok(Point::new(self.lon, self.lat))
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(point: Point<f64>) -> Self {
        Self {
            lon: point.x(),
            lat: point.y(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    pub from: Coordinate,
    pub to: Coordinate,
}

#[derive(Debug, Deserialize)]
pub struct ScreeningRequest {
    /// Film title, matched case-insensitively
    pub film: String,
    pub from: Coordinate,
    /// Departure time in HH:MM format (defaults to now)
    pub time: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// `walk` or `ride`
    pub mode: &'static str,
    pub line: Option<String>,
    /// Stop name where the segment starts, if it starts at a stop
    pub from_stop: Option<String>,
    pub to_stop: Option<String>,
    pub node_count: usize,
}

#[derive(Debug, Serialize)]
pub struct StopResult {
    pub code: String,
    pub name: String,
    pub role: &'static str,
}

#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub travel_time_seconds: f64,
    pub minutes: u32,
    pub node_count: usize,
    pub segments: Vec<SegmentResult>,
    pub directions: Vec<String>,
    /// Boarding, alighting and transfer stops in travel order
    pub stops: Vec<StopResult>,
    pub transfers: usize,
    pub geojson: serde_json::Value,
}

impl RouteResponse {
    pub fn from_path(path: &Path, city: &CityGraph) -> Result<Self, AppError> {
        let stop_name = |node| city.stop(node).map(|stop| stop.name.clone());

        let segments = path
            .itinerary
            .segments()
            .iter()
            .map(|segment| SegmentResult {
                mode: match segment {
                    Segment::Walk { .. } => "walk",
                    Segment::Ride { .. } => "ride",
                },
                line: segment.line().map(str::to_string),
                from_stop: segment.from().and_then(stop_name),
                to_stop: segment.to().and_then(stop_name),
                node_count: segment.nodes().len(),
            })
            .collect();

        let stops = path
            .itinerary
            .stop_roles()
            .into_iter()
            .filter_map(|(node, role)| {
                city.stop(node).map(|stop| StopResult {
                    code: stop.code.clone(),
                    name: stop.name.clone(),
                    role: role.as_str(),
                })
            })
            .collect();

        let geojson = serde_json::to_value(path.to_geojson(city)?).map_err(|e| {
            AppError::Internal {
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            travel_time_seconds: path.travel_time,
            minutes: path.minutes(),
            node_count: path.nodes().len(),
            segments,
            directions: path.directions(city),
            stops,
            transfers: path.itinerary.transfer_count(),
            geojson,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ScreeningResponse {
    pub film: String,
    pub cinema: String,
    pub location: Coordinate,
    /// HH:MM
    pub start: String,
    /// Spare time on arrival, in minutes
    pub slack_minutes: i64,
    pub route: RouteResponse,
}

impl ScreeningResponse {
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(
        screening: &Screening,
        departure: u32,
        path: &Path,
        city: &CityGraph,
    ) -> Result<Self, AppError> {
        let arrival = f64::from(departure) + path.travel_time;
        let slack = ((f64::from(screening.start) - arrival) / 60.0).floor() as i64;
        Ok(Self {
            film: screening.film.clone(),
            cinema: screening.cinema.clone(),
            location: screening.location.into(),
            start: format_time_of_day(screening.start),
            slack_minutes: slack,
            route: RouteResponse::from_path(path, city)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct ModelSummary {
    pub intersections: usize,
    pub stops: usize,
    pub excluded_stops: usize,
    pub edges: usize,
    pub screenings: usize,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
