//! Bus network model

pub mod data;
pub mod types;

pub use data::TransitGraph;
pub use types::{LineSet, TransitHop, TransitStop};
