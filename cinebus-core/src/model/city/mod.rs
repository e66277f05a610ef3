//! Unified city graph combining streets and bus lines

pub mod components;
pub mod graph;

pub use components::{CityEdge, CityNode, EdgeKind, StopNode};
pub use graph::CityGraph;
