//! Data model for multimodal routing
//!
//! Contains the two input networks (streets and buses), the unified graph
//! produced by fusion and the model facade used by queries.

pub mod city;
pub mod city_model;
pub mod streets;
pub mod transit;

pub use city::{CityEdge, CityGraph, CityNode, EdgeKind, StopNode};
pub use city_model::CityModel;
pub use streets::{StreetEdge, StreetGraph, StreetNode};
pub use transit::{LineSet, TransitGraph, TransitHop, TransitStop};
