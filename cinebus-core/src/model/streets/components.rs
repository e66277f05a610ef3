//! Street network components - intersections and street segments

use geo::Point;

use crate::Meters;

/// Street graph node (intersection or dead end)
#[derive(Debug, Clone, PartialEq)]
pub struct StreetNode {
    /// OSM ID of the node
    pub id: i64,
    /// Node coordinates (lon, lat)
    pub geometry: Point<f64>,
}

/// Street graph edge (directed street segment)
#[derive(Debug, Clone, PartialEq)]
pub struct StreetEdge {
    /// Physical length in meters
    pub length: Meters,
}
