//! This module is responsible for loading the street network, the bus
//! network and the billboard, and for fusing the two networks into a
//! routable city model.

mod builder;
mod config;
mod fusion;
pub mod parser;
pub mod screenings;
pub mod streets;
pub mod transit;

pub use builder::create_city_model;
pub use config::{CityModelConfig, RoutingParams};
pub use fusion::build_city_graph;
pub use screenings::{format_time_of_day, parse_time_of_day, screenings_from_csv};
pub use streets::street_graph_from_csv;
pub use transit::transit_graph_from_json;
