//! Multimodal routing core for the cinema planner.
//!
//! Fuses a pedestrian street network with a bus network into a single
//! time-weighted graph, finds the fastest path between two coordinates and
//! turns it into a walk/ride itinerary. On top of that sits the screening
//! search, which picks the first film screening the traveler can still reach.

pub mod error;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;
pub mod screenings;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, FusionError, ItineraryError};
pub use loading::{CityModelConfig, RoutingParams, build_city_graph, create_city_model};
pub use model::{CityEdge, CityGraph, CityModel, CityNode, StreetGraph, TransitGraph};
pub use routing::{Itinerary, Path, Segment, find_path, generate_itinerary};
pub use screenings::{Screening, find_first_reachable_screening, screenings_for_film};

/// Time of day in seconds since midnight
pub type Time = u32;

/// Travel duration in seconds. Edge costs and path totals use this.
pub type Seconds = f64;

/// Distance in meters
pub type Meters = f64;

/// Identifier of a bus line, e.g. `"H6"` or `"V15"`
pub type LineId = String;
