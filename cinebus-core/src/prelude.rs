pub use crate::{Error, FusionError, ItineraryError};

// Building a model
pub use crate::loading::{
    CityModelConfig, RoutingParams, build_city_graph, create_city_model, screenings_from_csv,
    street_graph_from_csv, transit_graph_from_json,
};
pub use crate::model::{CityGraph, CityModel, StreetGraph, TransitGraph};

// Queries
pub use crate::routing::{Itinerary, Path, Segment, StopRole, find_path, generate_itinerary};
pub use crate::screenings::{Screening, find_first_reachable_screening, screenings_for_film};

pub use crate::{LineId, Meters, Seconds, Time};
