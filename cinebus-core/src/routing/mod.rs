//! Path finding on the unified city graph and walk/ride itineraries

pub(crate) mod dijkstra;
mod itinerary;
mod path_finder;

pub use itinerary::{
    Itinerary, Segment, StopRole, generate_itinerary, try_generate_itinerary,
};
pub use path_finder::{Path, find_path, path_time};
