//! Earliest reachable screening search

use geo::Point;
use log::debug;

use crate::loading::RoutingParams;
use crate::model::{CityGraph, StreetGraph};
use crate::routing::{Path, find_path};
use crate::{Seconds, Time};

/// One showing of a film at a cinema
#[derive(Debug, Clone, PartialEq)]
pub struct Screening {
    pub film: String,
    pub cinema: String,
    /// Cinema position (lon, lat)
    pub location: Point<f64>,
    /// Start time in seconds since midnight
    pub start: Time,
}

impl Screening {
    /// Whether a traveler leaving at `now` and travelling `travel_time` seconds arrives in time
    pub fn reachable(&self, now: Time, travel_time: Seconds) -> bool {
        f64::from(self.start) >= f64::from(now) + travel_time
    }
}

/// Screenings of `title` (case-insensitive), sorted by start time
pub fn screenings_for_film(screenings: &[Screening], title: &str) -> Vec<Screening> {
    let title = title.trim().to_lowercase();
    let mut selected: Vec<Screening> = screenings
        .iter()
        .filter(|screening| screening.film.to_lowercase() == title)
        .cloned()
        .collect();
    selected.sort_by_key(|screening| screening.start);
    selected
}

/// Scan `screenings` in order and return the first one reachable from `origin` leaving at `now`
///
/// The list is expected to be sorted by start time. Screenings whose cinema
/// cannot be routed to are skipped.
pub fn find_first_reachable_screening<'a>(
    streets: &StreetGraph,
    city: &CityGraph,
    screenings: &'a [Screening],
    origin: &Point<f64>,
    now: Time,
    params: &RoutingParams,
) -> Option<(Path, &'a Screening)> {
    for screening in screenings {
        if screening.start < now {
            continue;
        }
        match find_path(streets, city, origin, &screening.location, params) {
            Ok(path) if screening.reachable(now, path.travel_time) => {
                return Some((path, screening));
            }
            Ok(path) => debug!(
                "{} at {} starts too early: {:.0} s of travel",
                screening.film, screening.cinema, path.travel_time
            ),
            Err(e) => debug!(
                "Skipping {} at {}: {e}",
                screening.film, screening.cinema
            ),
        }
    }
    None
}
